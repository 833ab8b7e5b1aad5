//! Access control capability.
//!
//! # Responsibilities
//! - Answer whether fine-grained access control is enabled
//! - Read the answer from live configuration or a fixed value
//!
//! # Design Decisions
//! - Injected as a trait object, never read from a global
//! - Fallible: callers decide how to treat an unknown answer

use thiserror::Error;

use crate::config::SharedConfig;

#[derive(Debug, Error)]
pub enum AccessControlError {
    #[error("access control configuration is not loaded")]
    ConfigUnavailable,

    #[error("access control evaluation failed: {0}")]
    Evaluation(String),
}

/// Capability consulted before every proxied call.
pub trait AccessControl: Send + Sync {
    /// True if access control is turned off.
    fn is_disabled(&self) -> Result<bool, AccessControlError>;
}

/// Fixed answer. Enabled unless `with_disabled` is called.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticAccessControl {
    disabled: bool,
}

impl StaticAccessControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

impl AccessControl for StaticAccessControl {
    fn is_disabled(&self) -> Result<bool, AccessControlError> {
        Ok(self.disabled)
    }
}

/// Reads `access_control.enabled` from the current configuration.
#[derive(Debug, Clone)]
pub struct ConfigAccessControl {
    config: SharedConfig,
}

impl ConfigAccessControl {
    pub fn new(config: SharedConfig) -> Self {
        Self { config }
    }
}

impl AccessControl for ConfigAccessControl {
    fn is_disabled(&self) -> Result<bool, AccessControlError> {
        let config = self.config.current().ok_or(AccessControlError::ConfigUnavailable)?;
        Ok(!config.access_control.enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProxyConfig;

    #[test]
    fn test_static() {
        assert!(!StaticAccessControl::new().is_disabled().unwrap());
        assert!(StaticAccessControl::new().with_disabled().is_disabled().unwrap());
    }

    #[test]
    fn test_config_follows_swaps() {
        let shared = SharedConfig::empty();
        let ac = ConfigAccessControl::new(shared.clone());
        assert!(matches!(ac.is_disabled(), Err(AccessControlError::ConfigUnavailable)));

        let mut config = ProxyConfig::default();
        config.access_control.enabled = false;
        shared.store(config.clone());
        assert!(ac.is_disabled().unwrap());

        config.access_control.enabled = true;
        shared.store(config);
        assert!(!ac.is_disabled().unwrap());
    }
}
