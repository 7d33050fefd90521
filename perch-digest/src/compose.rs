//! Rendering the ordered post sequence into one HTML digest body.

use perch_common::Post;

/// Timestamp rendering used inside the digest body.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render posts, in the order given, into a single HTML body.
///
/// Each entry is the post's local timestamp, a line break, the post text,
/// and a rule separating it from the next entry. Callers are expected to
/// have window-filtered and sorted already. An empty input renders an empty
/// body; deciding whether to deliver that is the caller's call.
pub fn compose(posts: &[Post]) -> String {
    let mut body = String::new();
    for post in posts {
        body.push_str(&post.timestamp.format(TIMESTAMP_FORMAT).to_string());
        body.push_str("<br>");
        body.push_str(&post.text);
        body.push_str("<hr>");
    }
    body
}
