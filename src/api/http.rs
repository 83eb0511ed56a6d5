//! HTTP transport for backend REST calls

use super::credentials::{Credentials, API_KEY_HEADER};
use crate::error::{BdccError, Result};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use std::time::Duration;

/// Per-call timeout applied to every request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Authenticated HTTP transport
///
/// Attaches the `api_key` header, enforces the call timeout and maps every
/// non-200 status to [`BdccError::Remote`]. No retries happen here.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    credentials: Credentials,
}

impl HttpTransport {
    /// Create a transport with the default 15 second timeout
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_timeout(credentials, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(credentials: Credentials, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("bdcc/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            credentials,
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Send one request and return the raw response body.
    ///
    /// `body`, when present, is encoded as compact JSON.
    pub async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<String>
    where
        B: Serialize + ?Sized,
    {
        let url = self.credentials.url_for(path);
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(API_KEY_HEADER, self.credentials.api_key().expose());

        if let Some(body) = body {
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(body)?);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(%method, %url, timeout = e.is_timeout(), "request failed: {}", e);
            BdccError::Transport(e)
        })?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            tracing::error!(
                "API error: {} {} -> {} - {}",
                method,
                url,
                status,
                sanitize_for_log(&body)
            );
            return Err(BdccError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}
