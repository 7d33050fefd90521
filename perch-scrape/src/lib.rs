//! Delimiter-based extraction of posts from a profile page.
//!
//! The page is treated as one flat text buffer; posts are located by literal
//! start/end marker substrings, not by parsing the markup. This trades
//! robustness against layout changes for independence from a full HTML
//! grammar: attribute reordering or marker renames on the source site will
//! break the scan, and that is an accepted limitation of the approach rather
//! than a defect to silently absorb here.
//!
//! Pipeline order: [`listing::narrow_to_listing`] cuts the document down to
//! the post-listing block, [`decode::decode_posts`] turns that block into
//! [`perch_common::Post`] records. Both sit on top of the [`scan`] primitives.

use thiserror::Error;

pub mod decode;
pub mod entities;
pub mod listing;
pub mod markers;
pub mod scan;

pub use decode::decode_posts;
pub use listing::narrow_to_listing;
pub use scan::{locate_all, locate_next, Include, Span};

/// Failures while locating or decoding posts in the fetched page.
///
/// Extraction is all-or-nothing: a post is either fully decoded or the whole
/// decode step fails with one of these. Partial post records never escape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScrapeError {
    #[error("post listing block not found; the page layout may have changed or the fetch returned an error page")]
    ListingNotFound,
    #[error("post listing block is empty")]
    EmptyListing,
    #[error("scan count mismatch: {containers} post containers vs {texts} text fragments")]
    CountMismatch { containers: usize, texts: usize },
    #[error("post container has no `data-time` attribute")]
    TimestampMissing,
    #[error("invalid epoch-seconds timestamp `{0}`")]
    BadTimestamp(String),
}
