//! Types and utilities shared across Perch crates.
//!
//! This crate holds the [`Post`] record that flows through the scrape and
//! digest stages, plus the [`observability`] module that centralises tracing
//! setup for the binary and integration tests. It is intentionally
//! lightweight so every crate can depend on it without heavy transitive
//! costs.
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

pub mod observability;

/// One decoded post from the scraped profile page.
///
/// `text` is HTML-entity-decoded with literal double quotes normalised to
/// single quotes, so it can be embedded in an HTML digest body as-is.
/// `timestamp` is the post's epoch-seconds value converted to local time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub text: String,
    pub timestamp: DateTime<Local>,
}

impl Post {
    pub fn new(text: impl Into<String>, timestamp: DateTime<Local>) -> Self {
        Self {
            text: text.into(),
            timestamp,
        }
    }
}
