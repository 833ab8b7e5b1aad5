//! Proxy error definitions.

use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("invalid recipient {0:?}: expected a numeric data source id")]
    InvalidRecipient(String),

    #[error("failed to build proxied request: {0}")]
    BuildRequest(#[from] axum::http::Error),

    #[error("no response from data source proxy")]
    EmptyResponse,

    #[error("{message}")]
    Upstream { status: StatusCode, message: String },

    #[error("failed to extract response: {0}")]
    Extract(String),
}

impl ProxyError {
    /// Status reported to the caller.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::InvalidRecipient(_) => StatusCode::BAD_REQUEST,
            ProxyError::BuildRequest(_) | ProxyError::Extract(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::EmptyResponse => StatusCode::BAD_GATEWAY,
            ProxyError::Upstream { status, .. } => *status,
        }
    }
}
