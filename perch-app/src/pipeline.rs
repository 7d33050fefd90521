//! One fetch → scrape → filter → compose → deliver pass.

use anyhow::{Context, Result};
use chrono::Local;
use perch_config::PerchConfig;
use perch_digest::{compose, filter_recent, TimeWindow};
use perch_fetch::PageFetcher;
use perch_scrape::{decode_posts, narrow_to_listing};

use crate::notify::Notifier;

/// Run the pipeline once. Every stage consumes the previous stage's output;
/// errors propagate to the caller, which owns exit behavior.
///
/// An empty digest is still delivered: a quiet day on the feed should be
/// distinguishable from a pipeline that stopped running.
pub async fn run(cfg: &PerchConfig, fetcher: &PageFetcher, notifier: &dyn Notifier) -> Result<()> {
    let page = fetcher
        .get_text(&cfg.source.url)
        .await
        .with_context(|| format!("fetching {}", cfg.source.url))?;
    tracing::info!(bytes = page.len(), "pipeline.page.fetched");

    let listing = narrow_to_listing(&page).context("narrowing page to the post listing")?;
    let posts = decode_posts(listing).context("decoding posts from the listing")?;
    tracing::info!(count = posts.len(), "pipeline.posts.decoded");

    let window = TimeWindow::new(Local::now(), cfg.source.lookback_hours);
    let recent = filter_recent(posts, &window);
    let body = compose(&recent);
    tracing::info!(
        posts = recent.len(),
        body_bytes = body.len(),
        "pipeline.digest.composed"
    );

    let subject = format!(
        "{} - {}",
        cfg.digest.subject,
        window.now.format("%Y-%m-%d")
    );
    notifier
        .deliver(&subject, &body)
        .await
        .context("delivering digest")?;
    tracing::info!(subject = %subject, "pipeline.digest.delivered");
    Ok(())
}
