//! HTTP transport shared by every service.
//!
//! [`HttpTransport`] is configured once: base URL, a default `Content-Type: application/json`
//! header and a request timeout. Each request attaches `Authorization: Bearer <token>` when the
//! [`Session`] holds a token. Every failed response passes through one interceptor:
//! - HTTP 401 clears the session, redirects to the login route and returns
//!   [`ApiError::Unauthorised`]
//! - any other non-success status returns [`ApiError::Server`] carrying the body's `error` field

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::session::Session;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        })
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Query parameters and JSON body for one request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestOptions {
    pub params: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, name: &str, value: impl ToString) -> Self {
        self.params.push((name.to_owned(), value.to_string()));
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Issues one API request and returns the decoded JSON body.
///
/// Paths are relative to the configured base URL and begin with `/`.
pub trait Transport: Send + Sync {
    fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> impl Future<Output = ApiResult<Value>> + Send;
}

/// Pull the `error` string out of a failure body, if there is one.
fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<Value>(body)
        .ok()?
        .get("error")?
        .as_str()
        .map(str::to_owned)
}

/// Production [`Transport`] over `reqwest`.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    session: Arc<Session>,
}

impl HttpTransport {
    /// Build the shared HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the underlying client cannot be constructed (for
    /// example when no TLS backend is available).
    pub fn new(config: &ClientConfig, session: Arc<Session>) -> ApiResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api_url().to_owned(),
            session,
        })
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Transport for HttpTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> ApiResult<Value> {
        let mut builder = self.client.request(method.into(), self.url(path));
        if !options.params.is_empty() {
            builder = builder.query(&options.params);
        }
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &options.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::debug!(%method, path, "request did not complete: {e}");
            ApiError::Network(e.to_string())
        })?;
        let status = response.status();
        tracing::debug!(%method, path, status = status.as_u16(), "api request");

        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if status.is_success() {
            if body.iter().all(u8::is_ascii_whitespace) {
                return Ok(Value::Null);
            }
            return serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()));
        }

        let message = error_message(&body);
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(%method, path, "API rejected the session; signing out");
            self.session.handle_unauthorised();
            return Err(ApiError::Unauthorised { message });
        }
        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }
}
