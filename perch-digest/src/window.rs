//! The rolling lookback window over decoded posts.

use chrono::{DateTime, Duration, Local};
use perch_common::Post;

/// The interval `now - lookback_hours .. now` used to decide whether a post
/// is recent enough to include.
///
/// `lookback_hours` is validated positive at configuration time.
#[derive(Debug, Clone, Copy)]
pub struct TimeWindow {
    pub now: DateTime<Local>,
    pub lookback_hours: i64,
}

impl TimeWindow {
    pub fn new(now: DateTime<Local>, lookback_hours: i64) -> Self {
        Self {
            now,
            lookback_hours,
        }
    }

    /// The oldest timestamp still inside the window (exclusive bound).
    pub fn cutoff(&self) -> DateTime<Local> {
        self.now - Duration::hours(self.lookback_hours)
    }

    pub fn contains(&self, post: &Post) -> bool {
        post.timestamp > self.cutoff()
    }
}

/// Keep only in-window posts, ordered newest-first.
///
/// Out-of-window posts are dropped, never errored. The sort is stable, so
/// posts with equal timestamps keep their source-document order.
pub fn filter_recent(posts: Vec<Post>, window: &TimeWindow) -> Vec<Post> {
    let total = posts.len();
    let mut recent: Vec<Post> = posts.into_iter().filter(|p| window.contains(p)).collect();
    recent.sort_by_key(|p| std::cmp::Reverse(p.timestamp));
    tracing::debug!(
        kept = recent.len(),
        dropped = total - recent.len(),
        cutoff = %window.cutoff(),
        "digest.window.filtered"
    );
    recent
}
