//! Turning a narrowed listing block into decoded [`Post`] records.

use chrono::{DateTime, Local};
use perch_common::Post;

use crate::entities::decode_entities;
use crate::scan::{locate_all, locate_next, Include, Span};
use crate::{markers, ScrapeError};

/// Decode every post in the narrowed listing block.
///
/// Post containers and text fragments are scanned independently over the
/// same buffer and paired by position, so the two scans must agree on the
/// count; a mismatch means the page layout drifted and is a hard error, not
/// a truncation.
pub fn decode_posts(listing: &str) -> Result<Vec<Post>, ScrapeError> {
    let containers: Vec<Span> = locate_all(
        listing,
        markers::POST_START,
        markers::POST_END,
        Include::Markers,
    )
    .collect();
    let texts: Vec<Span> = locate_all(
        listing,
        markers::TEXT_START,
        markers::TEXT_END,
        Include::Between,
    )
    .collect();

    if containers.len() != texts.len() {
        return Err(ScrapeError::CountMismatch {
            containers: containers.len(),
            texts: texts.len(),
        });
    }

    let mut posts = Vec::with_capacity(containers.len());
    for (container, text) in containers.iter().zip(&texts) {
        let timestamp = decode_timestamp(container.slice(listing))?;
        let text = normalize_text(text.slice(listing));
        posts.push(Post::new(text, timestamp));
    }
    tracing::debug!(count = posts.len(), "scrape.posts.decoded");
    Ok(posts)
}

/// Pull the epoch-seconds `data-time` attribute out of one post container
/// and convert it to local calendar time.
fn decode_timestamp(container: &str) -> Result<DateTime<Local>, ScrapeError> {
    // The attribute may arrive entity-escaped; decode before scanning.
    let container = decode_entities(container);
    let span = locate_next(
        &container,
        markers::TIME_ATTR_START,
        markers::TIME_ATTR_END,
        Include::Between,
    )
    .ok_or(ScrapeError::TimestampMissing)?;

    let raw = span.slice(&container);
    let secs: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ScrapeError::BadTimestamp(raw.to_string()))?;
    epoch_to_local(secs).ok_or_else(|| ScrapeError::BadTimestamp(raw.to_string()))
}

/// Convert an epoch-seconds value (1970-01-01T00:00:00 UTC origin) to local
/// time. `None` on out-of-range values.
pub fn epoch_to_local(secs: i64) -> Option<DateTime<Local>> {
    DateTime::from_timestamp(secs, 0).map(|utc| utc.with_timezone(&Local))
}

/// Entity-decode a raw text fragment and normalise double quotes to single
/// quotes so the rendered HTML digest body stays well-formed.
fn normalize_text(raw: &str) -> String {
    decode_entities(raw).replace('"', "'")
}
