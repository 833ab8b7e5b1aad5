//! Proxying of alerting calls.
//!
//! # Design Decisions
//! - The inbound context is never handed to the transport; a derived one is
//! - Upstream answers are buffered so status and body can be inspected
//! - The transport itself is a trait, supplied by the embedding server

pub mod alerting;
pub mod context;
pub mod error;
pub mod response;

pub use alerting::{AlertingProxy, DatasourceProxy};
pub use context::{build_proxy_context, PROXY_MIN_ROLE};
pub use error::ProxyError;
pub use response::{json_extractor, message_extractor, Extractor, ProxyResponse};
