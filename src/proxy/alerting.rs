//! Forwarding of alerting API calls to a data source.
//!
//! # Data Flow
//! ```text
//! handler (inbound RequestContext)
//!     → with_req: build outbound request
//!     → create_proxy_context (fresh BufferedResponse sink, elevated identity)
//!     → DatasourceProxy (writes upstream answer into the sink)
//!     → status >= 400: error message, else extractor
//!     → ProxyResponse
//! ```

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::sync::Arc;

use crate::context::{BufferedResponse, RequestContext, ResponseSink};
use crate::proxy::context::build_proxy_context;
use crate::proxy::error::ProxyError;
use crate::proxy::response::{upstream_error_message, Extractor, ProxyResponse};
use crate::security::AccessControl;

/// Transport that forwards a request to a data source and writes the answer
/// through `ctx.resp`.
#[async_trait]
pub trait DatasourceProxy: Send + Sync {
    async fn proxy_datasource_request(&self, ctx: &mut RequestContext, datasource_id: i64);
}

/// Proxies alerting API calls under a derived request context.
#[derive(Clone)]
pub struct AlertingProxy {
    data_proxy: Arc<dyn DatasourceProxy>,
    ac: Arc<dyn AccessControl>,
}

impl AlertingProxy {
    pub fn new(data_proxy: Arc<dyn DatasourceProxy>, ac: Arc<dyn AccessControl>) -> Self {
        Self { data_proxy, ac }
    }

    /// Derive the context the proxied `request` runs under.
    pub fn create_proxy_context(
        &self,
        ctx: &RequestContext,
        request: Request<Body>,
        response: Arc<dyn ResponseSink>,
    ) -> RequestContext {
        build_proxy_context(self.ac.as_ref(), ctx, request, response)
    }

    /// Send `request` to data source `datasource_id` on behalf of `ctx`.
    ///
    /// `ctx` is only read; it is taken mutably so the returned future stays
    /// `Send` while the request body is not `Sync`.
    pub async fn with_req(
        &self,
        ctx: &mut RequestContext,
        datasource_id: i64,
        request: Request<Body>,
        extractor: Extractor,
    ) -> ProxyResponse {
        let method = request.method().clone();
        let uri = request.uri().clone();

        let sink = Arc::new(BufferedResponse::new());
        let mut proxy_ctx = self.create_proxy_context(ctx, request, sink.clone());

        tracing::debug!(
            nonce = %ctx.request_nonce,
            datasource_id,
            method = %method,
            uri = %uri,
            role = %proxy_ctx.signed_in_user.org_role,
            "Proxying alerting request"
        );

        self.data_proxy
            .proxy_datasource_request(&mut proxy_ctx, datasource_id)
            .await;
        drop(proxy_ctx);

        let status = match sink.status() {
            0 => return ProxyError::EmptyResponse.into(),
            s => StatusCode::from_u16(s).unwrap_or(StatusCode::BAD_GATEWAY),
        };

        if status.as_u16() >= 400 {
            let message = upstream_error_message(&sink);
            tracing::warn!(
                nonce = %ctx.request_nonce,
                datasource_id,
                status = %status,
                message = %message,
                "Alerting request failed upstream"
            );
            return ProxyError::Upstream { status, message }.into();
        }

        match extractor(sink.as_ref()) {
            Ok(body) => ProxyResponse::json(status, body),
            Err(e) => {
                tracing::error!(nonce = %ctx.request_nonce, error = %e, "Failed to extract upstream response");
                e.into()
            }
        }
    }
}
