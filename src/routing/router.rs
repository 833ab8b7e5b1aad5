//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store routes registered from brace templates
//! - Look up the matching route for a method and path
//! - Dispatch a request context to the matched handler
//!
//! # Design Decisions
//! - Immutable after registration, shared via `Arc` (thread-safe without locks)
//! - O(n) scan over routes (acceptable for typical route counts)
//! - First match wins (registration order)
//! - Explicit no-match rather than silent default

use async_trait::async_trait;
use axum::http::Method;
use std::fmt;
use std::sync::Arc;

use crate::context::{PathParams, RequestContext};
use crate::routing::pattern::{translate, PathPattern};

/// A request handler. Answers by writing through `ctx.resp`.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn call(&self, ctx: &mut RequestContext);
}

struct Route {
    method: Method,
    pattern: PathPattern,
    handler: Arc<dyn Handler>,
}

/// Colon-syntax router used for sub-dispatch.
#[derive(Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.routes.iter().map(|r| format!("{} {}", r.method, r.pattern.template())))
            .finish()
    }
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `method` under a brace template.
    pub fn register(
        &mut self,
        method: Method,
        template: &str,
        handler: Arc<dyn Handler>,
    ) -> &mut Self {
        let pattern = PathPattern::parse(translate(template));
        tracing::debug!(method = %method, route = %pattern.template(), "Route registered");
        self.routes.push(Route {
            method,
            pattern,
            handler,
        });
        self
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Find the first route matching `method` and `path`.
    pub fn match_route(&self, method: &Method, path: &str) -> Option<(Arc<dyn Handler>, PathParams)> {
        self.routes
            .iter()
            .filter(|r| r.method == *method)
            .find_map(|r| r.pattern.matches(path).map(|p| (r.handler.clone(), p)))
    }

    /// Route `ctx` to its handler. Returns `false` when nothing matched.
    pub async fn dispatch(&self, ctx: &mut RequestContext) -> bool {
        let method = ctx.req.method().clone();
        let path = ctx.req.uri().path().to_string();

        let Some((handler, params)) = self.match_route(&method, &path) else {
            ctx.logger.debug(&format!("no route matched {method} {path}"));
            return false;
        };

        ctx.params = params;
        handler.call(ctx).await;
        true
    }
}
