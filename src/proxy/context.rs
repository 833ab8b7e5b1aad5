//! Derived contexts for proxied calls.
//!
//! # Responsibilities
//! - Build the context a proxied sub-request runs under
//! - Bind it to a fresh response writer over the caller's sink
//! - Raise the identity to Editor when access control is enabled
//!
//! # Design Decisions
//! - The source context is borrowed, never mutated
//! - Elevation only moves up: Editor and Admin keep their identity `Arc`
//! - An access control error counts as enabled (elevating branch)

use axum::body::Body;
use axum::http::Request;
use std::sync::Arc;

use crate::context::{OrgRole, RequestContext, RequestLogger, ResponseSink, ResponseWriter, SignedInUser};
use crate::security::AccessControl;

/// Minimum role a proxied alerting call runs with under access control.
pub const PROXY_MIN_ROLE: OrgRole = OrgRole::Editor;

/// Derive the context for a proxied call from `source`.
///
/// The result carries `outbound` as its request and writes into `sink`.
/// Token, flags, logger, nonce, params and router are taken from `source`.
pub fn build_proxy_context(
    ac: &dyn AccessControl,
    source: &RequestContext,
    outbound: Request<Body>,
    sink: Arc<dyn ResponseSink>,
) -> RequestContext {
    let user = proxy_identity(ac, &source.signed_in_user, &source.logger);
    source.fork(outbound, ResponseWriter::new(sink), user)
}

fn proxy_identity(
    ac: &dyn AccessControl,
    user: &Arc<SignedInUser>,
    logger: &RequestLogger,
) -> Arc<SignedInUser> {
    let enabled = match ac.is_disabled() {
        Ok(disabled) => !disabled,
        Err(e) => {
            logger.warn(&format!("access control state unknown, treating as enabled: {e}"));
            true
        }
    };

    if enabled && !user.has_role(PROXY_MIN_ROLE) {
        logger.debug(&format!(
            "elevating proxied request from {} to {}",
            user.org_role, PROXY_MIN_ROLE
        ));
        return Arc::new(user.with_role(PROXY_MIN_ROLE));
    }
    Arc::clone(user)
}
