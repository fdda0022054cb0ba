use std::env;
use std::path::PathBuf;

use crate::error::TaxVoiceError;

/// Default cap on suggestions returned per request.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Web server
    pub web_host: String,
    pub web_port: u16,

    // Suggestions
    pub catalog_path: Option<PathBuf>,
    pub max_suggestions: usize,
    pub badge_seed: Option<u64>,

    // Logging
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            web_host: "0.0.0.0".to_string(),
            web_port: 3000,
            catalog_path: None,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            badge_seed: None,
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    /// Every variable is optional; malformed values are rejected.
    pub fn from_env() -> Result<Self, TaxVoiceError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, TaxVoiceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let web_port = match lookup("WEB_PORT") {
            Some(raw) => parse_var("WEB_PORT", &raw)?,
            None => defaults.web_port,
        };

        let max_suggestions = match lookup("MAX_SUGGESTIONS") {
            Some(raw) => {
                let n: usize = parse_var("MAX_SUGGESTIONS", &raw)?;
                if n == 0 {
                    return Err(TaxVoiceError::Config(
                        "MAX_SUGGESTIONS must be at least 1".to_string(),
                    ));
                }
                n
            }
            None => defaults.max_suggestions,
        };

        let badge_seed = match lookup("BADGE_SEED") {
            Some(raw) => Some(parse_var("BADGE_SEED", &raw)?),
            None => None,
        };

        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("") | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(TaxVoiceError::Config(format!(
                    "LOG_FORMAT must be 'text' or 'json', got '{other}'"
                )))
            }
        };

        Ok(Self {
            web_host: lookup("WEB_HOST").unwrap_or(defaults.web_host),
            web_port,
            catalog_path: lookup("CATALOG_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            max_suggestions,
            badge_seed,
            log_format,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.web_host, self.web_port)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, TaxVoiceError> {
    raw.trim()
        .parse()
        .map_err(|_| TaxVoiceError::Config(format!("{key} must be a number, got '{raw}'")))
}
