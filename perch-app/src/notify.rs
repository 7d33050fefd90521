//! Delivery of the rendered digest.
//!
//! The pipeline only produces a subject and an HTML body; everything about
//! transport lives behind [`Notifier`]. Shipping implementations are stdout
//! (inspection, `--print`) and a sendmail-compatible command pipe. An SMTP
//! transport would slot behind the same trait.

use std::process::Stdio;

use async_trait::async_trait;
use perch_config::NotifierConfig;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum SendError {
    #[error("failed to spawn notifier command `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
    #[error("failed to write message to notifier stdin: {0}")]
    Stdin(std::io::Error),
    #[error("failed waiting for notifier command: {0}")]
    Wait(std::io::Error),
    #[error("notifier command exited with {0}")]
    Exit(std::process::ExitStatus),
}

/// Accepts a rendered digest body and a subject line and attempts delivery.
#[async_trait]
pub trait Notifier {
    async fn deliver(&self, subject: &str, body: &str) -> Result<(), SendError>;
}

/// Build the configured notifier.
pub fn from_config(cfg: &NotifierConfig) -> Box<dyn Notifier + Send + Sync> {
    match cfg {
        NotifierConfig::Stdout => Box::new(StdoutNotifier),
        NotifierConfig::Sendmail { command, to, from } => Box::new(SendmailNotifier {
            command: command.clone(),
            to: to.clone(),
            from: from.clone(),
        }),
    }
}

/// Writes the digest to stdout. Used by `--print` and as the default when no
/// notifier is configured.
pub struct StdoutNotifier;

#[async_trait]
impl Notifier for StdoutNotifier {
    async fn deliver(&self, subject: &str, body: &str) -> Result<(), SendError> {
        println!("Subject: {subject}\n\n{body}");
        Ok(())
    }
}

/// Pipes an RFC-822-style message into a sendmail-compatible command.
pub struct SendmailNotifier {
    command: String,
    to: String,
    from: String,
}

impl SendmailNotifier {
    fn render_message(&self, subject: &str, body: &str) -> String {
        format!(
            "From: {from}\r\nTo: {to}\r\nSubject: {subject}\r\nMIME-Version: 1.0\r\nContent-Type: text/html; charset=utf-8\r\n\r\n{body}\r\n",
            from = self.from,
            to = self.to,
        )
    }
}

#[async_trait]
impl Notifier for SendmailNotifier {
    async fn deliver(&self, subject: &str, body: &str) -> Result<(), SendError> {
        let mut child = Command::new(&self.command)
            // -t: take recipients from the message headers
            .arg("-t")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SendError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(self.render_message(subject, body).as_bytes())
                .await
                .map_err(SendError::Stdin)?;
            drop(stdin);
        }

        let status = child.wait().await.map_err(SendError::Wait)?;
        if !status.success() {
            return Err(SendError::Exit(status));
        }
        tracing::info!(to = %self.to, command = %self.command, "notify.sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_has_headers_then_blank_line_then_body() {
        let n = SendmailNotifier {
            command: "/usr/sbin/sendmail".into(),
            to: "ops@example.org".into(),
            from: "perch@example.org".into(),
        };
        let msg = n.render_message("Recent Tweets - 2021-01-01", "a<br>b<hr>");
        let (headers, body) = msg.split_once("\r\n\r\n").expect("header/body split");
        assert!(headers.contains("To: ops@example.org"));
        assert!(headers.contains("From: perch@example.org"));
        assert!(headers.contains("Subject: Recent Tweets - 2021-01-01"));
        assert!(headers.contains("Content-Type: text/html"));
        assert_eq!(body, "a<br>b<hr>\r\n");
    }

    #[tokio::test]
    async fn stdout_notifier_always_delivers() {
        StdoutNotifier.deliver("subject", "body").await.unwrap();
    }
}
