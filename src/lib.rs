//! Alerting proxy request-context forwarding.
//!
//! Proxies alerting API calls (the Lotex ruler API) to a data source under a
//! derived request context: same session, its own response sink, and an
//! identity raised to Editor when access control is enabled.
//!
//! # Architecture Overview
//!
//! ```text
//!   inbound RequestContext
//!        │
//!        ▼
//!   ┌──────────┐  brace templates   ┌───────────┐
//!   │ routing  │◀── translate() ────│ api/ruler │
//!   │ Router   │                    └───────────┘
//!   └────┬─────┘
//!        │ dispatch
//!        ▼
//!   ┌────────────────┐   build_proxy_context   ┌──────────────────┐
//!   │ RulerHandler   │────────────────────────▶│ derived context  │
//!   │ AlertingProxy  │◀── BufferedResponse ────│ DatasourceProxy  │
//!   └────────────────┘                         └──────────────────┘
//!
//!   Cross-cutting: config (SharedConfig), security (AccessControl),
//!                  observability (tracing)
//! ```

// Core subsystems
pub mod api;
pub mod context;
pub mod proxy;
pub mod routing;

// Cross-cutting concerns
pub mod config;
pub mod observability;
pub mod security;

pub use config::{ProxyConfig, SharedConfig};
pub use context::{OrgRole, RequestContext, SignedInUser};
pub use proxy::{build_proxy_context, AlertingProxy, DatasourceProxy};
pub use routing::{translate, Router};
pub use security::AccessControl;
