//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Proxied call:
//!     → access_control.rs (is access control enabled?)
//!     → proxy::context (elevate identity for the derived context)
//! ```
//!
//! # Design Decisions
//! - Fail closed on the answer: an unknown state counts as enabled
//! - No process-wide flag; the capability is passed in

pub mod access_control;

pub use access_control::{AccessControl, AccessControlError, ConfigAccessControl, StaticAccessControl};
