//! Tower middleware for header-based request admission.
//!
//! This crate provides [`HeaderMatch`], a Tower [`Layer`] that evaluates each
//! incoming request against a [`RuleSet`] and either forwards it unchanged to
//! the wrapped service or answers `403 Forbidden` with the body `Not allowed`.
//!
//! # Quick Start
//!
//! ```
//! use checkheaders_core::{Quorum, Rule};
//! use checkheaders_tower::HeaderMatch;
//! use tower::{ServiceBuilder, service_fn};
//!
//! let layer = HeaderMatch::builder()
//!     .name("client-cert")
//!     .rule(Rule::exact("x-api-version", ["2"]))
//!     .rule(
//!         Rule::contains("x-forwarded-tls-client-cert-info", ["CN=common-name"])
//!             .quorum(Quorum::All)
//!             .url_decode(),
//!     )
//!     .build()?;
//!
//! let service = ServiceBuilder::new()
//!     .layer(layer)
//!     .service(service_fn(|_req: http::Request<String>| async {
//!         Ok::<_, std::convert::Infallible>(http::Response::new(String::from("Hello")))
//!     }));
//! # let _ = service;
//! # Ok::<(), checkheaders_core::RuleError>(())
//! ```
//!
//! The layer can also be built from a configuration file with
//! [`HeaderMatch::from_config`].
//!
//! # Response Contract
//!
//! | Verdict | Behavior |
//! |---------|----------|
//! | Allow | Inner service called with the original request |
//! | Deny | `403 Forbidden`, `text/plain` body `Not allowed`; inner service not called |
//!
//! The denial never reveals which rule failed. Per-rule diagnostics are
//! available through `tracing` when a rule is marked verbose.
//!
//! # Feature Flags
//!
//! - `metrics`: count allowed and denied requests via the [`metrics`] crate,
//!   labelled with the instance name.
//!
//! [`Layer`]: tower::Layer
//! [`RuleSet`]: checkheaders_core::RuleSet
//! [`metrics`]: https://docs.rs/metrics

#![warn(missing_docs)]

/// Future type for the header match service.
pub mod future;
/// Tower layer and builder.
pub mod layer;
/// Verdict counters.
pub mod metrics;
/// The Tower service that evaluates requests.
pub mod service;

pub use checkheaders_configuration::Config;
pub use checkheaders_core::{Rule, RuleSet, Verdict};
pub use layer::{HeaderMatch, HeaderMatchBuilder};
pub use service::{DENIED_BODY, HeaderMatchService};
