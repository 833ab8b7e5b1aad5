//! Ruler API proxied to a Lotex (Cortex/Loki) ruler.
//!
//! # Routes
//! ```text
//! GET    /api/ruler/{Recipient}/api/v1/rules                          → {prefix}
//! GET    /api/ruler/{Recipient}/api/v1/rules/{Namespace}              → {prefix}/{Namespace}
//! GET    /api/ruler/{Recipient}/api/v1/rules/{Namespace}/{Groupname}  → {prefix}/{Namespace}/{Groupname}
//! POST   /api/ruler/{Recipient}/api/v1/rules/{Namespace}              → {prefix}/{Namespace}
//! DELETE /api/ruler/{Recipient}/api/v1/rules/{Namespace}              → {prefix}/{Namespace}
//! DELETE /api/ruler/{Recipient}/api/v1/rules/{Namespace}/{Groupname}  → {prefix}/{Namespace}/{Groupname}
//! ```
//!
//! `Recipient` is the numeric id of the data source serving the rules.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request};
use std::sync::Arc;

use crate::config::RulerConfig;
use crate::context::{PathParams, RequestContext};
use crate::proxy::{json_extractor, message_extractor, AlertingProxy, Extractor, ProxyError, ProxyResponse};
use crate::routing::{Handler, Router};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulerEndpoint {
    GetRules,
    GetNamespaceRules,
    GetRuleGroup,
    PostNamespaceRules,
    DeleteNamespaceRules,
    DeleteRuleGroup,
}

impl RulerEndpoint {
    pub const ALL: [RulerEndpoint; 6] = [
        RulerEndpoint::GetRules,
        RulerEndpoint::GetNamespaceRules,
        RulerEndpoint::GetRuleGroup,
        RulerEndpoint::PostNamespaceRules,
        RulerEndpoint::DeleteNamespaceRules,
        RulerEndpoint::DeleteRuleGroup,
    ];

    pub fn method(&self) -> Method {
        match self {
            RulerEndpoint::GetRules | RulerEndpoint::GetNamespaceRules | RulerEndpoint::GetRuleGroup => Method::GET,
            RulerEndpoint::PostNamespaceRules => Method::POST,
            RulerEndpoint::DeleteNamespaceRules | RulerEndpoint::DeleteRuleGroup => Method::DELETE,
        }
    }

    /// Route template in brace syntax.
    pub fn template(&self) -> &'static str {
        match self {
            RulerEndpoint::GetRules => "/api/ruler/{Recipient}/api/v1/rules",
            RulerEndpoint::GetNamespaceRules
            | RulerEndpoint::PostNamespaceRules
            | RulerEndpoint::DeleteNamespaceRules => "/api/ruler/{Recipient}/api/v1/rules/{Namespace}",
            RulerEndpoint::GetRuleGroup | RulerEndpoint::DeleteRuleGroup => {
                "/api/ruler/{Recipient}/api/v1/rules/{Namespace}/{Groupname}"
            }
        }
    }

    fn extractor(&self) -> Extractor {
        if self.method() == Method::GET {
            json_extractor
        } else {
            message_extractor
        }
    }

    /// Path on the ruler, under `prefix`.
    fn upstream_path(&self, prefix: &str, params: &PathParams) -> String {
        let namespace = params.get("Namespace").unwrap_or_default();
        let group = params.get("Groupname").unwrap_or_default();
        match self {
            RulerEndpoint::GetRules => prefix.to_string(),
            RulerEndpoint::GetNamespaceRules
            | RulerEndpoint::PostNamespaceRules
            | RulerEndpoint::DeleteNamespaceRules => format!("{prefix}/{namespace}"),
            RulerEndpoint::GetRuleGroup | RulerEndpoint::DeleteRuleGroup => {
                format!("{prefix}/{namespace}/{group}")
            }
        }
    }
}

/// Forwards one ruler endpoint through the alerting proxy.
pub struct RulerHandler {
    proxy: AlertingProxy,
    prefix: String,
    endpoint: RulerEndpoint,
}

impl RulerHandler {
    pub fn new(proxy: AlertingProxy, config: &RulerConfig, endpoint: RulerEndpoint) -> Self {
        Self {
            proxy,
            prefix: config.prefix.clone(),
            endpoint,
        }
    }

    async fn forward(&self, ctx: &mut RequestContext) -> Result<ProxyResponse, ProxyError> {
        let datasource_id = recipient(&ctx.params)?;
        let request = self.build_request(ctx)?;
        Ok(self
            .proxy
            .with_req(ctx, datasource_id, request, self.endpoint.extractor())
            .await)
    }

    /// Outbound request: ruler path plus the inbound query. POST carries the
    /// inbound body and content type.
    fn build_request(&self, ctx: &mut RequestContext) -> Result<Request<Body>, ProxyError> {
        let mut uri = self.endpoint.upstream_path(&self.prefix, &ctx.params);
        if let Some(query) = ctx.req.uri().query() {
            uri.push('?');
            uri.push_str(query);
        }

        let method = self.endpoint.method();
        let mut builder = Request::builder().method(method.clone()).uri(uri);
        let body = if method == Method::POST {
            if let Some(content_type) = ctx.req.headers().get(header::CONTENT_TYPE) {
                builder = builder.header(header::CONTENT_TYPE, content_type.clone());
            }
            std::mem::take(ctx.req.body_mut())
        } else {
            Body::empty()
        };

        Ok(builder.body(body)?)
    }
}

#[async_trait]
impl Handler for RulerHandler {
    async fn call(&self, ctx: &mut RequestContext) {
        let response = match self.forward(ctx).await {
            Ok(r) => r,
            Err(e) => {
                ctx.logger.warn(&format!("ruler request rejected: {e}"));
                e.into()
            }
        };
        response.write_to(&mut ctx.resp);
    }
}

fn recipient(params: &PathParams) -> Result<i64, ProxyError> {
    let raw = params.get("Recipient").unwrap_or_default();
    raw.parse()
        .map_err(|_| ProxyError::InvalidRecipient(raw.to_string()))
}

/// Register every ruler endpoint on `router`.
pub fn register_ruler_routes(router: &mut Router, proxy: &AlertingProxy, config: &RulerConfig) {
    for endpoint in RulerEndpoint::ALL {
        let handler = RulerHandler::new(proxy.clone(), config, endpoint);
        router.register(endpoint.method(), endpoint.template(), Arc::new(handler));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> PathParams {
        let mut params = PathParams::default();
        for (k, v) in pairs {
            params.insert(*k, *v);
        }
        params
    }

    #[test]
    fn test_upstream_paths() {
        let p = params(&[("Recipient", "1"), ("Namespace", "ns"), ("Groupname", "g")]);
        assert_eq!(RulerEndpoint::GetRules.upstream_path("/api/prom/rules", &p), "/api/prom/rules");
        assert_eq!(RulerEndpoint::PostNamespaceRules.upstream_path("/api/prom/rules", &p), "/api/prom/rules/ns");
        assert_eq!(RulerEndpoint::DeleteRuleGroup.upstream_path("/r", &p), "/r/ns/g");
    }

    #[test]
    fn test_recipient_must_be_numeric() {
        assert_eq!(recipient(&params(&[("Recipient", "12")])).unwrap(), 12);
        assert!(matches!(
            recipient(&params(&[("Recipient", "prom")])),
            Err(ProxyError::InvalidRecipient(r)) if r == "prom"
        ));
        assert!(recipient(&PathParams::default()).is_err());
    }

    #[test]
    fn test_method_and_template_pairs_are_unique() {
        for (i, a) in RulerEndpoint::ALL.iter().enumerate() {
            for b in &RulerEndpoint::ALL[i + 1..] {
                assert!(a.method() != b.method() || a.template() != b.template());
            }
        }
    }
}
