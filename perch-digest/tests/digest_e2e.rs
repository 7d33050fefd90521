//! End-to-end: fabricated profile page through narrow → decode → filter →
//! compose.

use chrono::{Duration, Local};
use perch_digest::{compose, filter_recent, TimeWindow};
use perch_scrape::{decode_posts, narrow_to_listing};

/// One post container + text field in the current page layout.
fn post_markup(epoch: i64, text: &str) -> String {
    format!(
        concat!(
            "<li class=\"stream-item\">",
            "<span class=\"icon dogear\"></span>",
            "<a href=\"/status\"><span data-time=\"{epoch}\">ago</span></a>",
            "<p class=\"tweet-text\">{text}</p>",
            "<div class=\"stream-item-footer\"></div>",
            "</li>"
        ),
        epoch = epoch,
        text = text,
    )
}

fn page(posts: &[(i64, &str)]) -> String {
    let mut doc = String::from("<html><head>chrome</head><body><div id=\"stream-items-id\">");
    for (epoch, text) in posts {
        doc.push_str(&post_markup(*epoch, text));
    }
    doc.push_str("</div><div class=\"stream-footer\"></div></body></html>");
    doc
}

#[test]
fn digest_contains_exactly_the_in_window_posts_newest_first() {
    let now = Local::now();
    let at = |hours_ago: i64| (now - Duration::hours(hours_ago)).timestamp();

    let doc = page(&[
        (at(10), "mid &amp; still fresh"),
        (at(30), "stale"),
        (at(1), "newest"),
    ]);

    let listing = narrow_to_listing(&doc).expect("listing present");
    let posts = decode_posts(listing).expect("three posts decode");
    assert_eq!(posts.len(), 3);

    let window = TimeWindow::new(now, 24);
    let recent = filter_recent(posts, &window);
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].text, "newest");
    assert_eq!(recent[1].text, "mid & still fresh");

    let body = compose(&recent);
    assert!(body.contains("newest"));
    assert!(body.contains("mid & still fresh"));
    assert!(!body.contains("stale"));
    assert!(body.find("newest").unwrap() < body.find("mid").unwrap());
}

#[test]
fn error_page_never_reaches_the_digest() {
    let err = narrow_to_listing("<html><body>Rate limited</body></html>");
    assert!(err.is_err());
}
