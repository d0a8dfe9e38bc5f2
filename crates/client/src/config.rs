//! Client runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the transport and
//! services. Environment lookups go through a caller-supplied function so the binary reads the
//! real environment and tests can supply a fixed map.

use reqwest::Url;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const API_URL_VAR: &str = "PHR_API_URL";
pub const APP_ORIGIN_VAR: &str = "PHR_APP_ORIGIN";
pub const SESSION_FILE_VAR: &str = "PHR_SESSION_FILE";
pub const HTTP_TIMEOUT_VAR: &str = "PHR_HTTP_TIMEOUT_SECS";

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/v1";
pub const DEFAULT_APP_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_SESSION_FILE: &str = ".phr-session";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL '{value}' for {name}: {reason}")]
    InvalidUrl {
        name: &'static str,
        value: String,
        reason: String,
    },
    #[error("invalid value '{value}' for {name}: expected a positive number of seconds")]
    InvalidTimeout { name: &'static str, value: String },
    #[error("{name} cannot be empty")]
    Empty { name: &'static str },
}

/// Type alias for Results that can fail with a [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Client configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    api_url: String,
    app_origin: String,
    session_file: Option<PathBuf>,
    timeout: Duration,
}

fn validate_url(name: &'static str, value: &str) -> ConfigResult<String> {
    let cleaned = value.trim().trim_end_matches('/');
    if cleaned.is_empty() {
        return Err(ConfigError::Empty { name });
    }
    let parsed = Url::parse(cleaned).map_err(|e| ConfigError::InvalidUrl {
        name,
        value: cleaned.to_owned(),
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            name,
            value: cleaned.to_owned(),
            reason: format!("URL must use http or https scheme, got: {}", parsed.scheme()),
        });
    }
    Ok(cleaned.to_owned())
}

impl ClientConfig {
    /// Create a new `ClientConfig`.
    ///
    /// # Arguments
    ///
    /// * `api_url` - Base URL of the API, for example `http://localhost:8080/api/v1`.
    /// * `app_origin` - Web origin that share links are composed under.
    /// * `session_file` - Where the bearer token is persisted; `None` keeps it in memory only.
    /// * `timeout` - Per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if either URL is empty, unparsable or not http(s), or if the
    /// timeout is zero.
    pub fn new(
        api_url: &str,
        app_origin: &str,
        session_file: Option<PathBuf>,
        timeout: Duration,
    ) -> ConfigResult<Self> {
        let api_url = validate_url(API_URL_VAR, api_url)?;
        let app_origin = validate_url(APP_ORIGIN_VAR, app_origin)?;
        if timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout {
                name: HTTP_TIMEOUT_VAR,
                value: "0".into(),
            });
        }
        Ok(Self {
            api_url,
            app_origin,
            session_file,
            timeout,
        })
    }

    /// Resolve configuration from `lookup`, falling back to the documented defaults.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_url = get(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        let app_origin = get(APP_ORIGIN_VAR).unwrap_or_else(|| DEFAULT_APP_ORIGIN.to_owned());
        let session_file = get(SESSION_FILE_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE));
        let timeout = match get(HTTP_TIMEOUT_VAR) {
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or(ConfigError::InvalidTimeout {
                        name: HTTP_TIMEOUT_VAR,
                        value: raw.clone(),
                    })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        Self::new(&api_url, &app_origin, Some(session_file), timeout)
    }

    /// Base URL without a trailing slash.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Web origin without a trailing slash.
    pub fn app_origin(&self) -> &str {
        &self.app_origin
    }

    pub fn session_file(&self) -> Option<&Path> {
        self.session_file.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
