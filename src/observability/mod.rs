//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (route registration, proxied calls, config reloads)
//!     → RequestLogger events tagged with the request nonce
//!
//! Consumers:
//!     → logging.rs subscriber (stdout)
//! ```
//!
//! # Design Decisions
//! - Structured fields instead of formatted strings where possible
//! - Request nonce flows into every proxied call's logs

pub mod logging;
