//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the alerting proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ProxyConfig {
    /// Access control settings.
    pub access_control: AccessControlConfig,

    /// Ruler endpoint settings.
    pub ruler: RulerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Access control configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AccessControlConfig {
    /// When enabled, proxied calls run with at least Editor role.
    pub enabled: bool,
}

impl Default for AccessControlConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Ruler configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RulerConfig {
    /// Path prefix of the rules API on the alerting engine.
    pub prefix: String,
}

impl Default for RulerConfig {
    fn default() -> Self {
        Self {
            prefix: "/api/prom/rules".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
