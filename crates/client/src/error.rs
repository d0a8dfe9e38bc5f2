use phr_models::ModelError;
use serde::Serialize;

/// Errors raised by a [`Transport`](crate::Transport).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout, TLS failure).
    #[error("network error: {0}")]
    Network(String),

    /// HTTP 401. The transport has already cleared the session and redirected to the login route.
    #[error("unauthorised{}", suffix(.message))]
    Unauthorised { message: Option<String> },

    /// Any other non-success status. `message` is the failure body's `error` field, if any.
    #[error("server responded with status {status}{}", suffix(.message))]
    Server { status: u16, message: Option<String> },

    #[error("failed to decode response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// The message the server put in the failure body, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorised { message } | Self::Server { message, .. } => message.as_deref(),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }
}

fn suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

/// Type alias for Results that can fail with an [`ApiError`].
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure category carried by a [`ServiceError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorKind {
    Network,
    Server { status: u16 },
    Unauthorised,
    /// The response did not match the expected model.
    Decode,
    /// Local validation failed; no request was sent.
    Invalid,
}

/// Failure returned by every service operation.
///
/// `message` is always presentable to the user: the server's own error text when it supplied
/// one, otherwise the operation's fixed default such as "Failed to fetch prescriptions".
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ServiceError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ServiceError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Normalise a transport failure for the operation whose default message is `default`.
    pub fn from_api(err: ApiError, default: &str) -> Self {
        tracing::error!(error = %err, operation = default, "request failed");
        let message = err
            .server_message()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(default)
            .to_owned();
        let kind = match err {
            ApiError::Network(_) => ErrorKind::Network,
            ApiError::Unauthorised { .. } => ErrorKind::Unauthorised,
            ApiError::Server { status, .. } => ErrorKind::Server { status },
            ApiError::Decode(_) => ErrorKind::Decode,
        };
        Self { kind, message }
    }

    /// A response that arrived but did not decode into the expected model.
    pub fn decode(err: ModelError, default: &str) -> Self {
        tracing::error!(error = %err, operation = default, "response did not match model");
        Self::new(ErrorKind::Decode, default)
    }

    /// Local input was rejected before any request was made.
    pub fn invalid(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::error!(error = %message, "rejected invalid input");
        Self::new(ErrorKind::Invalid, message)
    }

    pub fn is_unauthorised(&self) -> bool {
        self.kind == ErrorKind::Unauthorised
    }
}

/// Type alias for Results returned by service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
