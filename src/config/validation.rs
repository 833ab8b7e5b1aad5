//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the ruler prefix shape
//! - Validate the log level
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::ProxyConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("ruler.prefix must start with '/': {0:?}")]
    PrefixNotAbsolute(String),

    #[error("ruler.prefix must not end with '/': {0:?}")]
    PrefixTrailingSlash(String),

    #[error("observability.log_level is not a known level: {0:?}")]
    UnknownLogLevel(String),
}

pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let prefix = &config.ruler.prefix;
    if !prefix.starts_with('/') {
        errors.push(ValidationError::PrefixNotAbsolute(prefix.clone()));
    }
    if prefix.len() > 1 && prefix.ends_with('/') {
        errors.push(ValidationError::PrefixTrailingSlash(prefix.clone()));
    }

    let level = &config.observability.log_level;
    if !LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
        errors.push(ValidationError::UnknownLogLevel(level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
