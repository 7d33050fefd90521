//! Rolling-window filtering and digest rendering for decoded posts.
//!
//! [`window`] keeps only posts recent enough for the configured lookback and
//! orders them newest-first; [`compose`] renders the survivors into the HTML
//! body handed to the notifier. Both stages are pure functions over
//! immutable inputs.

pub mod compose;
pub mod window;

pub use compose::compose;
pub use window::{filter_recent, TimeWindow};
