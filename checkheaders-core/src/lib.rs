//! Header-based admission rules for HTTP requests.
//!
//! This crate decides, per request, whether a request may proceed based on
//! declarative rules evaluated against its header values. It is transport
//! agnostic: anything implementing [`HasHeaders`] can be evaluated, and the
//! `checkheaders-tower` crate wires the decision into a Tower middleware.
//!
//! # Core Concepts
//!
//! - **[`Rule`]**: one header constraint. Picks a [`MatchMode`] (exact,
//!   substring, regex), a [`Quorum`] over its values, a [`Requirement`] for
//!   absent headers, and optional URL decoding.
//!
//! - **[`RuleSet`]**: the validated, immutable collection of rules. Built once
//!   with [`RuleSet::new`], which rejects the whole set on the first defect and
//!   precompiles regular expressions.
//!
//! - **[`Verdict`]**: the result of [`RuleSet::evaluate`]. Rules are combined
//!   with AND and evaluation stops at the first failing rule.
//!
//! # Quick Start
//!
//! ```
//! use checkheaders_core::{Quorum, Rule, RuleSet, Verdict};
//! use http::Request;
//!
//! let rules = RuleSet::new(vec![
//!     Rule::exact("x-api-version", ["2"]),
//!     Rule::contains("x-client-cert", ["CN=common-name", "O=Organization"])
//!         .quorum(Quorum::All)
//!         .url_decode(),
//!     Rule::regex("x-country", ["^NL|GB|FR$"]).optional(),
//! ])?;
//!
//! let request = Request::builder()
//!     .header("x-api-version", "2")
//!     .header("x-client-cert", "CN%3Dcommon-name%2CO%3DOrganization")
//!     .body(())?;
//!
//! assert_eq!(rules.evaluate(&request), Verdict::Allow);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Diagnostics
//!
//! Rules marked verbose emit an `INFO` event on the
//! [`checkheaders::diagnostics`](matcher::DIAGNOSTICS_TARGET) target for
//! every evaluation, carrying the header, the observed value, the configured
//! values and the result. Diagnostics never influence the verdict.

pub mod decode;
mod error;
mod headers;
pub mod matcher;
mod rule;
mod rule_set;
mod verdict;

pub use error::RuleError;
pub use headers::HasHeaders;
pub use rule::{Decoding, Diagnostics, MatchMode, Quorum, Requirement, Rule};
pub use rule_set::{CompiledRule, Pattern, RuleSet};
pub use verdict::Verdict;
