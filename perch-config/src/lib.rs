//! Loader for Perch configuration with YAML + environment overlays.
//!
//! Sources merge in order: YAML file (or inline snippet in tests), then
//! `PERCH_`-prefixed environment variables with `__` as the nesting
//! separator. `${VAR}` placeholders anywhere in the merged tree are expanded
//! recursively before the typed structs materialise. The loaded value is
//! built once at startup, validated, and passed down by reference — nothing
//! mutates it afterwards.
use config::{Config, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

/// Hosts the source URL is allowed to reference.
const EXPECTED_HOSTS: &[&str] = &["twitter.com", "x.com"];

#[derive(Debug, Deserialize)]
pub struct PerchConfig {
    pub source: SourceConfig,
    pub digest: DigestConfig,
    #[serde(default)]
    pub notifier: NotifierConfig,
}

/// Which profile page to scrape and how far back to look.
#[derive(Debug, Deserialize)]
pub struct SourceConfig {
    pub url: String,
    pub lookback_hours: i64,
}

#[derive(Debug, Deserialize)]
pub struct DigestConfig {
    /// Subject hint; the delivery date is appended at send time.
    pub subject: String,
}

/// How the rendered digest leaves the process. The tag is `kind`.
#[derive(Debug, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NotifierConfig {
    #[default]
    Stdout,
    Sendmail {
        #[serde(default = "default_sendmail_command")]
        command: String,
        to: String,
        from: String,
    },
}

fn default_sendmail_command() -> String {
    "/usr/sbin/sendmail".into()
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("source.url is not a valid URL: {0}")]
    BadUrl(String),
    #[error("source.url host `{0}` does not reference the expected site")]
    UnexpectedHost(String),
    #[error("source.lookback_hours must be positive, got {0}")]
    NonPositiveLookback(i64),
    #[error("digest.subject must not be empty")]
    EmptySubject,
    #[error(transparent)]
    Load(#[from] config::ConfigError),
}

impl PerchConfig {
    /// Check the invariants the pipeline assumes: a URL on the expected
    /// site, a positive lookback window, and a usable subject.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = url::Url::parse(&self.source.url)
            .map_err(|e| ConfigError::BadUrl(e.to_string()))?;
        let host = url.host_str().unwrap_or_default();
        let expected = EXPECTED_HOSTS
            .iter()
            .any(|h| host == *h || host.ends_with(&format!(".{h}")));
        if !expected {
            return Err(ConfigError::UnexpectedHost(host.to_string()));
        }
        if self.source.lookback_hours <= 0 {
            return Err(ConfigError::NonPositiveLookback(self.source.lookback_hours));
        }
        if self.digest.subject.trim().is_empty() {
            return Err(ConfigError::EmptySubject);
        }
        Ok(())
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hiding the `config` crate wiring (YAML + env overrides).
pub struct PerchConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for PerchConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl PerchConfigLoader {
    /// Start an empty loader. Files and snippets layer in call order;
    /// `PERCH_` env overrides are applied last, in [`PerchConfigLoader::load`],
    /// so the environment always wins over file values.
    ///
    /// ```
    /// use perch_config::PerchConfigLoader;
    ///
    /// let cfg = PerchConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// source:
    ///   url: "https://twitter.com/example"
    ///   lookback_hours: 24
    /// digest:
    ///   subject: "Recent Tweets"
    /// "#,
    ///     )
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(cfg.source.lookback_hours, 24);
    /// assert!(cfg.validate().is_ok());
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by
    /// suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Merge an inline YAML snippet (tests and CLI overrides).
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources.
    ///
    /// `${VAR}` placeholders are expanded (recursively, with a depth cap)
    /// before the typed config materialises, so secrets can live in the
    /// environment rather than the YAML file.
    pub fn load(self) -> Result<PerchConfig, ConfigError> {
        // The env source goes in last: the `config` crate gives precedence
        // to later-added sources, and the environment must override files.
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix("PERCH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize().map_err(ConfigError::Load)?;
        expand_env_in_value(&mut v);

        let typed: PerchConfig = serde_json::from_value(v)
            .map_err(|e| ConfigError::Load(config::ConfigError::Message(e.to_string())))?;
        Ok(typed)
    }
}
