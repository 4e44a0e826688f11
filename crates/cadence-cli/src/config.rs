use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;
use figment::{Figment, providers::{Format, Toml, Env}};
use tracing::warn;

const DEFAULT_CONFIG_FILE: &str = "cadence.toml";

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// Occurrences listed by `next` when `--count` is not given
    #[serde(default = "default_preview_count")]
    pub preview_count: usize,
    /// chrono format string for printed dates
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_preview_count() -> usize {
    5
}

fn default_date_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preview_count: default_preview_count(),
            date_format: default_date_format(),
        }
    }
}

impl Config {
    /// Reads `cadence.toml` (or the file named by `CADENCE_CONFIG`), then
    /// `CADENCE_*` environment variables on top.
    pub fn new() -> Result<Self, figment::Error> {
        let path = std::env::var("CADENCE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::figment(&path).extract()
    }

    /// Drops a `date_format` chrono cannot render, so printing never fails.
    pub fn sanitized(mut self) -> Self {
        let valid = StrftimeItems::new(&self.date_format).all(|item| !matches!(item, Item::Error));
        if !valid {
            warn!(date_format = %self.date_format, "invalid date_format, using the default");
            self.date_format = default_date_format();
        }
        self
    }

    fn figment(path: &str) -> Figment {
        Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("CADENCE_").ignore(&["config"]))
    }
}
