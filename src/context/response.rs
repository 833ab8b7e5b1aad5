//! Response sinks and the writer installed on a request context.
//!
//! # Responsibilities
//! - Define the sink a handler's output lands in
//! - Buffer proxied responses in memory for inspection
//! - Wrap a sink in a writer with "first write sends 200" semantics
//!
//! # Design Decisions
//! - Sinks are shared via `Arc`: the caller keeps a handle to observe writes
//! - Interior mutability because writer and caller hold the sink at once
//! - Writers compare by sink identity, never by content

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// Destination of a handler's response.
pub trait ResponseSink: Send + Sync + fmt::Debug {
    fn write_header(&self, status: StatusCode);
    fn write_body(&self, chunk: &[u8]);
    fn insert_header(&self, name: HeaderName, value: HeaderValue);
    /// Status written so far, `0` if none.
    fn status(&self) -> u16;
    fn headers(&self) -> HeaderMap;
    fn body(&self) -> Bytes;
}

#[derive(Debug, Default)]
struct Buffered {
    status: u16,
    headers: HeaderMap,
    body: Vec<u8>,
}

/// In-memory sink holding a complete response.
#[derive(Debug, Default)]
pub struct BufferedResponse {
    inner: Mutex<Buffered>,
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Buffered> {
        // A poisoned buffer is still a valid buffer.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Value of the `Content-Type` header, empty if absent.
    pub fn content_type(&self) -> String {
        self.lock()
            .headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    /// Body decoded as UTF-8, lossy.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.lock().body).into_owned()
    }
}

impl ResponseSink for BufferedResponse {
    fn write_header(&self, status: StatusCode) {
        self.lock().status = status.as_u16();
    }

    fn write_body(&self, chunk: &[u8]) {
        self.lock().body.extend_from_slice(chunk);
    }

    fn insert_header(&self, name: HeaderName, value: HeaderValue) {
        self.lock().headers.insert(name, value);
    }

    fn status(&self) -> u16 {
        self.lock().status
    }

    fn headers(&self) -> HeaderMap {
        self.lock().headers.clone()
    }

    fn body(&self) -> Bytes {
        Bytes::copy_from_slice(&self.lock().body)
    }
}

impl IntoResponse for &BufferedResponse {
    fn into_response(self) -> Response {
        let buffered = self.lock();
        let status = StatusCode::from_u16(buffered.status).unwrap_or(StatusCode::OK);
        let mut response = Response::new(Body::from(buffered.body.clone()));
        *response.status_mut() = status;
        *response.headers_mut() = buffered.headers.clone();
        response
    }
}

/// Writer bound to one sink.
pub struct ResponseWriter {
    sink: Arc<dyn ResponseSink>,
    written: bool,
}

impl fmt::Debug for ResponseWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseWriter")
            .field("sink", &self.sink)
            .field("written", &self.written)
            .finish()
    }
}

impl ResponseWriter {
    pub fn new(sink: Arc<dyn ResponseSink>) -> Self {
        Self {
            sink,
            written: false,
        }
    }

    /// Set a header. Ignored once the status has been written.
    pub fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
        if !self.written {
            self.sink.insert_header(name, value);
        }
    }

    /// Write the status line. Only the first call has an effect.
    pub fn write_header(&mut self, status: StatusCode) {
        if self.written {
            return;
        }
        self.written = true;
        self.sink.write_header(status);
    }

    /// Append to the body, sending `200 OK` first if no status was written.
    pub fn write(&mut self, chunk: &[u8]) {
        if !self.written {
            self.write_header(StatusCode::OK);
        }
        self.sink.write_body(chunk);
    }

    pub fn written(&self) -> bool {
        self.written
    }

    pub fn status(&self) -> u16 {
        self.sink.status()
    }

    /// True if both writers land in the same sink.
    pub fn same_sink(&self, other: &ResponseWriter) -> bool {
        Arc::ptr_eq(&self.sink, &other.sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_header_wins() {
        let sink = Arc::new(BufferedResponse::new());
        let mut w = ResponseWriter::new(sink.clone());
        w.write_header(StatusCode::NOT_FOUND);
        w.write_header(StatusCode::OK);
        assert_eq!(sink.status(), 404);
    }

    #[test]
    fn test_write_defaults_to_ok() {
        let sink = Arc::new(BufferedResponse::new());
        let mut w = ResponseWriter::new(sink.clone());
        w.insert_header(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        w.write(b"hello ");
        w.write(b"world");
        w.insert_header(header::CONTENT_TYPE, HeaderValue::from_static("text/html"));

        assert_eq!(sink.status(), 200);
        assert_eq!(sink.text(), "hello world");
        assert_eq!(sink.content_type(), "text/plain");
    }

    #[test]
    fn test_same_sink() {
        let sink = Arc::new(BufferedResponse::new());
        let a = ResponseWriter::new(sink.clone());
        let b = ResponseWriter::new(sink);
        let c = ResponseWriter::new(Arc::new(BufferedResponse::new()));
        assert!(a.same_sink(&b));
        assert!(!a.same_sink(&c));
    }

    #[test]
    fn test_into_response() {
        let sink = BufferedResponse::new();
        sink.write_header(StatusCode::ACCEPTED);
        sink.write_body(b"{}");
        let response = (&sink).into_response();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }
}
