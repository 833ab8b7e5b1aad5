//! Per-request logger handle.

use std::sync::Arc;

/// Named logger bound to a request nonce. Emits `tracing` events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLogger {
    name: Arc<str>,
    nonce: Arc<str>,
}

impl RequestLogger {
    pub fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            nonce: Arc::from(""),
        }
    }

    /// Same logger, tagged with `nonce`.
    pub fn with_nonce(&self, nonce: &str) -> Self {
        Self {
            name: self.name.clone(),
            nonce: Arc::from(nonce),
        }
    }

    pub fn debug(&self, msg: &str) {
        tracing::debug!(logger = %self.name, nonce = %self.nonce, "{}", msg);
    }

    pub fn warn(&self, msg: &str) {
        tracing::warn!(logger = %self.name, nonce = %self.nonce, "{}", msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_nonce_keeps_name() {
        let base = RequestLogger::new("context");
        let tagged = base.with_nonce("abc");
        assert_ne!(base, tagged);
        assert_eq!(tagged, RequestLogger::new("context").with_nonce("abc"));
        assert_ne!(tagged, RequestLogger::new("other").with_nonce("abc"));
    }
}
