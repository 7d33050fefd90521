//! Narrowing a full page down to its post-listing block.

use crate::scan::{locate_next, Include};
use crate::{markers, ScrapeError};

/// Cut `document` down to the region holding the list of posts, markers
/// included.
///
/// Fails with [`ScrapeError::ListingNotFound`] when the boundary markers are
/// missing and [`ScrapeError::EmptyListing`] when the narrowed block holds
/// nothing — either way the page is not the expected profile layout.
pub fn narrow_to_listing(document: &str) -> Result<&str, ScrapeError> {
    let span = locate_next(
        document,
        markers::LISTING_START,
        markers::LISTING_END,
        Include::Markers,
    )
    .ok_or(ScrapeError::ListingNotFound)?;

    if span.is_empty() {
        return Err(ScrapeError::EmptyListing);
    }
    tracing::debug!(listing_bytes = span.len(), "scrape.listing.narrowed");
    Ok(span.slice(document))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrows_to_marked_listing() {
        let doc = "<html>junk stream-items-id POSTS HERE stream-footer more junk";
        let listing = narrow_to_listing(doc).unwrap();
        assert_eq!(listing, "stream-items-id POSTS HERE stream-footer");
    }

    #[test]
    fn missing_markers_is_an_error() {
        assert_eq!(
            narrow_to_listing("<html>an error page</html>"),
            Err(ScrapeError::ListingNotFound)
        );
        // Start present but no end after it.
        assert_eq!(
            narrow_to_listing("stream-footer then stream-items-id"),
            Err(ScrapeError::ListingNotFound)
        );
    }
}
