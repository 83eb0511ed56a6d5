//! Backend Credentials
//!
//! Host URL and API key used to authenticate every call. The key is wrapped in
//! [`ApiKey`] so it cannot leak through `Debug` or `Display`.

use crate::error::ConfigError;
use std::fmt;
use url::Url;

/// Endpoint used when no host is configured
pub const DEFAULT_HOST: &str = "https://api.us-east-1.whybobs.com";

/// Header carrying the API key on every request
pub const API_KEY_HEADER: &str = "api_key";

/// Secret API token; redacted whenever it is formatted
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a token. Empty or whitespace-only tokens are rejected.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(Self(token))
    }

    /// Raw token, only for building the request header
    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Parse a host setting, falling back to [`DEFAULT_HOST`] when unset or empty
pub fn parse_host(host: Option<&str>) -> Result<Url, ConfigError> {
    let raw = match host.map(str::trim) {
        Some(h) if !h.is_empty() => h,
        _ => DEFAULT_HOST,
    };

    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidHost {
        host: raw.to_string(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidHost {
            host: raw.to_string(),
            reason: "expected an http(s) base URL".to_string(),
        });
    }

    Ok(url)
}

/// Host and API key for one configuration run
#[derive(Debug, Clone)]
pub struct Credentials {
    host: Url,
    api_key: ApiKey,
}

impl Credentials {
    /// Build credentials, falling back to [`DEFAULT_HOST`] when `host` is unset or empty.
    pub fn new(host: Option<&str>, api_key: ApiKey) -> Result<Self, ConfigError> {
        Ok(Self::with_host(parse_host(host)?, api_key))
    }

    pub fn with_host(host: Url, api_key: ApiKey) -> Self {
        Self { host, api_key }
    }

    pub fn host(&self) -> &Url {
        &self.host
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Absolute URL for a backend path such as `/database/abc`
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.host.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
