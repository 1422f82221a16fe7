//! Axum Integration Example
//!
//! Protects every route of an Axum router with header rules loaded from
//! `demos/checkheaders.yaml` (or the path given as the first argument).
//!
//! Run:
//!   cargo run -p checkheaders-demos --example axum
//!
//! Try it:
//!   curl -v http://localhost:3000/                                  # 403 Not allowed
//!   curl -v -H 'X-Country: NL' \
//!        -H 'X-Forwarded-Tls-Client-Cert-Info: Subject%3D%22CN%3Dcommon-name%22%3BSAN%3D%22somkindofdomain.domain.thing.test%22' \
//!        http://localhost:3000/                                  # 200
//!   curl -v -H 'X-Country: DE' ... http://localhost:3000/          # 403

use std::path::PathBuf;

use axum::{Router, routing::get};
use checkheaders_configuration::Config;
use checkheaders_tower::HeaderMatch;

async fn index() -> &'static str {
    "Hello, trusted client!"
}

async fn health() -> &'static str {
    "ok"
}

#[tokio::main]
async fn main() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter("info,checkheaders=trace")
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("checkheaders.yaml"));
    let config = Config::from_path(&path).expect("Failed to load header rules");
    let header_match = HeaderMatch::from_config(config)
        .expect("Invalid header rules")
        .with_name("axum-demo");

    let app = Router::new()
        .route("/", get(index))
        .layer(header_match)
        .route("/health", get(health));

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000")
        .await
        .expect("Failed to bind to port 3000");
    tracing::info!(rules = %path.display(), "Listening on http://{}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Server error");
}
