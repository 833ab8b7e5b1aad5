//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → SharedConfig (atomic swap, read by access control)
//!
//! On reload:
//!     SharedConfig::reload
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → atomic swap of Arc<ProxyConfig>, previous config kept on error
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{AccessControlConfig, ObservabilityConfig, ProxyConfig, RulerConfig};

use arc_swap::ArcSwapOption;
use std::path::Path;
use std::sync::Arc;

/// Hot-swappable configuration handle. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct SharedConfig {
    inner: Arc<ArcSwapOption<ProxyConfig>>,
}

impl SharedConfig {
    pub fn new(config: ProxyConfig) -> Self {
        let shared = Self::empty();
        shared.store(config);
        shared
    }

    /// A handle with nothing loaded yet.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Arc<ProxyConfig>> {
        self.inner.load_full()
    }

    pub fn store(&self, config: ProxyConfig) {
        self.inner.store(Some(Arc::new(config)));
    }

    /// Load `path` and swap it in. On error the current config stays.
    pub fn reload(&self, path: &Path) -> Result<(), ConfigError> {
        match load_config(path) {
            Ok(config) => {
                tracing::info!(path = ?path, "Configuration reloaded");
                self.store(config);
                Ok(())
            }
            Err(e) => {
                tracing::error!(path = ?path, error = %e, "Failed to reload config. Keeping current configuration.");
                Err(e)
            }
        }
    }
}
