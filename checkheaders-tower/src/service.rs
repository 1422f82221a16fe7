use std::sync::Arc;
use std::task::{Context, Poll};

use checkheaders_core::{RuleSet, Verdict};
use http::header::{CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS};
use http::{HeaderValue, Request, Response, StatusCode};
use tower::Service;
use tracing::{debug, trace};

use crate::future::HeaderMatchFuture;
use crate::metrics::record_verdict;

/// Body of every denial response.
pub const DENIED_BODY: &str = "Not allowed";

/// Tower [`Service`] evaluating header rules before calling `upstream`.
///
/// Created by [`HeaderMatch`](crate::HeaderMatch); the rule set is shared
/// between all clones of the service.
pub struct HeaderMatchService<S> {
    upstream: S,
    rules: Arc<RuleSet>,
    name: Arc<str>,
}

impl<S> HeaderMatchService<S> {
    /// Wraps `upstream` with the given rules.
    pub fn new(upstream: S, rules: Arc<RuleSet>, name: Arc<str>) -> Self {
        HeaderMatchService {
            upstream,
            rules,
            name,
        }
    }

    /// Rules evaluated for every request.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

impl<S> Clone for HeaderMatchService<S>
where
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            upstream: self.upstream.clone(),
            rules: Arc::clone(&self.rules),
            name: Arc::clone(&self.name),
        }
    }
}

impl<S> std::fmt::Debug for HeaderMatchService<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeaderMatchService")
            .field("name", &self.name)
            .field("rules", &self.rules.len())
            .finish()
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for HeaderMatchService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    ResBody: From<&'static str>,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = HeaderMatchFuture<S::Future, ResBody>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.upstream.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let verdict = self.rules.evaluate(&req);
        record_verdict(&self.name, verdict);

        match verdict {
            Verdict::Allow => {
                trace!(filter = %self.name, "headers valid, forwarding request");
                HeaderMatchFuture::upstream(self.upstream.call(req))
            }
            Verdict::Deny => {
                debug!(
                    filter = %self.name,
                    method = %req.method(),
                    path = req.uri().path(),
                    "headers invalid, request denied"
                );
                HeaderMatchFuture::denied(forbidden())
            }
        }
    }
}

/// Builds the fixed 403 response; nothing from the request is echoed back.
pub fn forbidden<B>() -> Response<B>
where
    B: From<&'static str>,
{
    let mut response = Response::new(B::from(DENIED_BODY));
    *response.status_mut() = StatusCode::FORBIDDEN;
    let headers = response.headers_mut();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    response
}
