//! Responses produced by proxied calls.
//!
//! # Responsibilities
//! - Turn a buffered upstream response into JSON via an extractor
//! - Build JSON error responses with a `message` field
//! - Derive error messages from failed upstream responses
//!
//! # Design Decisions
//! - HTML error pages are never echoed back, only "redacted html"
//! - A JSON `message` string beats the raw body

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::context::{BufferedResponse, ResponseSink, ResponseWriter};
use crate::proxy::error::ProxyError;

/// Turns a buffered upstream response into the JSON returned to the caller.
pub type Extractor = fn(&BufferedResponse) -> Result<Value, ProxyError>;

/// Parse the body as JSON.
pub fn json_extractor(resp: &BufferedResponse) -> Result<Value, ProxyError> {
    serde_json::from_slice(&resp.body()).map_err(|e| ProxyError::Extract(e.to_string()))
}

/// Wrap the body text as `{"message": ...}`.
pub fn message_extractor(resp: &BufferedResponse) -> Result<Value, ProxyError> {
    Ok(json!({ "message": resp.text() }))
}

/// Message for a failed upstream response.
pub fn upstream_error_message(resp: &BufferedResponse) -> String {
    let content_type = resp.content_type();

    if content_type.starts_with("application/json") {
        let message = serde_json::from_slice::<Value>(&resp.body())
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string));
        if let Some(message) = message {
            return message;
        }
    } else if content_type.starts_with("text/html") {
        return "redacted html".to_string();
    }

    resp.text()
}

/// Status plus JSON body, ready to be written to a client.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ProxyResponse {
    pub fn json(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "message": message.into() }),
        }
    }

    /// The `message` field, if the body has one.
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }

    pub fn write_to(&self, w: &mut ResponseWriter) {
        w.insert_header(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        w.write_header(self.status);
        w.write(self.body.to_string().as_bytes());
    }
}

impl From<ProxyError> for ProxyResponse {
    fn from(e: ProxyError) -> Self {
        ProxyResponse::error(e.status(), e.to_string())
    }
}

impl IntoResponse for ProxyResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
