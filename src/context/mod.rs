//! Request execution context.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → RequestContext::new (request, writer, router, anonymous user)
//!     → authentication fills signed_in_user, user_token, flags
//!     → router dispatch fills params
//!
//! Proxied sub-request:
//!     RequestContext (source, untouched)
//!     → RequestContext::fork (outbound request, fresh writer, identity)
//!     → derived context owned by the proxied call, dropped after it
//! ```
//!
//! # Design Decisions
//! - No `Clone`: derived contexts are built explicitly field by field
//! - Identity and token are shared through `Arc` and never mutated
//! - Router reference is shared, never copied

pub mod identity;
pub mod logger;
pub mod params;
pub mod response;

pub use identity::{OrgRole, SignedInUser, UserToken};
pub use logger::RequestLogger;
pub use params::PathParams;
pub use response::{BufferedResponse, ResponseSink, ResponseWriter};

use axum::body::Body;
use axum::http::Request;
use std::sync::Arc;
use uuid::Uuid;

use crate::routing::Router;

/// Everything a handler needs to serve one request.
#[derive(Debug)]
pub struct RequestContext {
    pub req: Request<Body>,
    pub resp: ResponseWriter,
    pub router: Arc<Router>,
    pub params: PathParams,
    pub signed_in_user: Arc<SignedInUser>,
    pub user_token: Option<Arc<UserToken>>,
    pub is_signed_in: bool,
    pub is_render_call: bool,
    pub allow_anonymous: bool,
    pub skip_cache: bool,
    pub logger: RequestLogger,
    pub request_nonce: String,
}

impl RequestContext {
    /// Fresh context for an unauthenticated request.
    pub fn new(req: Request<Body>, resp: ResponseWriter, router: Arc<Router>) -> Self {
        let request_nonce = generate_nonce();
        Self {
            req,
            resp,
            router,
            params: PathParams::default(),
            signed_in_user: Arc::new(SignedInUser::default()),
            user_token: None,
            is_signed_in: false,
            is_render_call: false,
            allow_anonymous: false,
            skip_cache: false,
            logger: RequestLogger::new("context").with_nonce(&request_nonce),
            request_nonce,
        }
    }

    /// A new context sharing this one's session state, with its own request,
    /// writer and identity. `self` is left untouched.
    pub fn fork(&self, req: Request<Body>, resp: ResponseWriter, signed_in_user: Arc<SignedInUser>) -> Self {
        Self {
            req,
            resp,
            router: Arc::clone(&self.router),
            params: self.params.clone(),
            signed_in_user,
            user_token: self.user_token.clone(),
            is_signed_in: self.is_signed_in,
            is_render_call: self.is_render_call,
            allow_anonymous: self.allow_anonymous,
            skip_cache: self.skip_cache,
            logger: self.logger.clone(),
            request_nonce: self.request_nonce.clone(),
        }
    }
}

fn generate_nonce() -> String {
    Uuid::new_v4().simple().to_string()
}
