//! Marker strings for the current profile-page layout.
//!
//! These are implementation constants tied to the exact markup the target
//! site serves today and must stay bit-exact; a marker drifting from the
//! page layout surfaces as [`crate::ScrapeError::ListingNotFound`] or a
//! count mismatch rather than wrong output.

/// Start of the post-listing region of the page.
pub const LISTING_START: &str = "stream-items-id";
/// End of the post-listing region.
pub const LISTING_END: &str = "stream-footer";

/// Start of one post container (matched inclusive).
pub const POST_START: &str = "icon dogear";
/// End of one post container (matched inclusive).
pub const POST_END: &str = "stream-item-footer";

/// Start of a post's text field (matched exclusive).
pub const TEXT_START: &str = "tweet-text\">";
/// End of a post's text field (matched exclusive).
pub const TEXT_END: &str = "</p";

/// Quote-delimited epoch-seconds attribute inside a post container.
pub const TIME_ATTR_START: &str = "data-time=\"";
pub const TIME_ATTR_END: &str = "\"";
