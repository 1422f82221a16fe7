//! Tower Example
//!
//! Builds header rules in code and drives a plain Tower service with a few
//! requests, printing each verdict.
//!
//! Run:
//!   cargo run -p checkheaders-demos --example tower

use std::convert::Infallible;

use bytes::Bytes;
use checkheaders_core::{Quorum, Rule};
use checkheaders_tower::HeaderMatch;
use http::{Request, Response};
use http_body_util::{BodyExt, Full};
use tower::{ServiceBuilder, ServiceExt, service_fn};

async fn handler(_req: Request<Full<Bytes>>) -> Result<Response<Full<Bytes>>, Infallible> {
    Ok(Response::new(Full::new(Bytes::from_static(b"welcome"))))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("debug")
        .init();

    let header_match = HeaderMatch::builder()
        .name("tower-demo")
        .rule(Rule::exact("x-tenant", ["acme", "globex"]))
        .rule(
            Rule::contains("x-roles", ["reader", "writer"])
                .quorum(Quorum::All)
                .verbose(),
        )
        .rule(Rule::regex("x-request-id", [r"^[0-9a-f]{8}$"]).optional())
        .build()?;

    let service = ServiceBuilder::new()
        .layer(header_match)
        .service(service_fn(handler));

    let requests = [
        vec![("x-tenant", "acme"), ("x-roles", "reader,writer")],
        vec![("x-tenant", "acme"), ("x-roles", "reader")],
        vec![("x-tenant", "initech"), ("x-roles", "reader,writer")],
        vec![
            ("x-tenant", "globex"),
            ("x-roles", "admin,reader,writer"),
            ("x-request-id", "deadbeef"),
        ],
        vec![
            ("x-tenant", "globex"),
            ("x-roles", "reader,writer"),
            ("x-request-id", "not-hex"),
        ],
    ];

    for headers in requests {
        let mut request = Request::get("http://localhost/");
        for (name, value) in &headers {
            request = request.header(*name, *value);
        }
        let response = service
            .clone()
            .oneshot(request.body(Full::default())?)
            .await?;
        let status = response.status();
        let body = response.into_body().collect().await?.to_bytes();
        println!("{headers:?} -> {status} {}", String::from_utf8_lossy(&body));
    }
    Ok(())
}
