//! Alerting API routes served through the sub-dispatch router.

pub mod ruler;

pub use ruler::{register_ruler_routes, RulerEndpoint, RulerHandler};
