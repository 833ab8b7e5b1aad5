//! Shared fixtures for integration tests.

#![allow(dead_code)]

use alerting_proxy::context::{BufferedResponse, RequestLogger, ResponseWriter, UserToken};
use alerting_proxy::{DatasourceProxy, OrgRole, RequestContext, Router, SignedInUser};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use std::sync::{Arc, Mutex};

/// A signed-in context with every flag set to a distinct value.
pub fn signed_in_context(router: Arc<Router>) -> (RequestContext, Arc<BufferedResponse>) {
    let sink = Arc::new(BufferedResponse::new());
    let mut ctx = RequestContext::new(Request::new(Body::empty()), ResponseWriter::new(sink.clone()), router);
    ctx.signed_in_user = Arc::new(SignedInUser {
        user_id: 10,
        org_id: 1,
        login: "test".into(),
        ..Default::default()
    });
    ctx.user_token = Some(Arc::new(UserToken {
        id: 5,
        user_id: 10,
        auth_token: "hashed".into(),
        ..Default::default()
    }));
    ctx.is_signed_in = true;
    ctx.is_render_call = false;
    ctx.allow_anonymous = true;
    ctx.skip_cache = false;
    ctx.logger = RequestLogger::new("test").with_nonce(&ctx.request_nonce);
    (ctx, sink)
}

/// Same context with a different org role.
pub fn with_role(ctx: &RequestContext, role: OrgRole) -> RequestContext {
    let mut out = ctx.fork(
        Request::new(Body::empty()),
        ResponseWriter::new(Arc::new(BufferedResponse::new())),
        Arc::new(ctx.signed_in_user.with_role(role)),
    );
    out.logger = ctx.logger.clone();
    out
}

/// What the fake transport saw.
#[derive(Debug, Clone)]
pub struct Seen {
    pub datasource_id: i64,
    pub method: Method,
    pub uri: String,
    pub role: OrgRole,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Transport double answering every call with a fixed response.
pub struct FakeDatasource {
    pub status: Option<StatusCode>,
    pub content_type: &'static str,
    pub body: &'static str,
    pub seen: Mutex<Vec<Seen>>,
}

impl FakeDatasource {
    pub fn answering(status: StatusCode, content_type: &'static str, body: &'static str) -> Arc<Self> {
        Arc::new(Self {
            status: Some(status),
            content_type,
            body,
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn silent() -> Arc<Self> {
        Arc::new(Self {
            status: None,
            content_type: "",
            body: "",
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl DatasourceProxy for FakeDatasource {
    async fn proxy_datasource_request(&self, ctx: &mut RequestContext, datasource_id: i64) {
        let body = std::mem::take(ctx.req.body_mut());
        let body = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();

        self.seen.lock().unwrap().push(Seen {
            datasource_id,
            method: ctx.req.method().clone(),
            uri: ctx.req.uri().to_string(),
            role: ctx.signed_in_user.org_role,
            content_type: ctx
                .req
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            body: body.to_vec(),
        });

        let Some(status) = self.status else {
            return;
        };
        ctx.resp
            .insert_header(header::CONTENT_TYPE, HeaderValue::from_static(self.content_type));
        ctx.resp.write_header(status);
        ctx.resp.write(self.body.as_bytes());
    }
}
