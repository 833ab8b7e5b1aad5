//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route registration (at startup):
//!     brace template "/ruler/{Recipient}/api/v1/rules"
//!     → pattern.rs translate → "/ruler/:Recipient/api/v1/rules"
//!     → PathPattern (parsed segments)
//!     → router.rs route table (frozen behind Arc)
//!
//! Sub-dispatch:
//!     RequestContext (method, path)
//!     → router.rs (route lookup, first match wins)
//!     → pattern.rs (segment match, capture params)
//!     → Handler writes through ctx.resp
//! ```

pub mod pattern;
pub mod router;

pub use pattern::{translate, PathPattern};
pub use router::{Handler, Router};
