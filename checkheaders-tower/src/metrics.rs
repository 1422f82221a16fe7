//! Metrics declaration and recording.

use checkheaders_core::Verdict;

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
lazy_static! {
    /// Track number of requests forwarded to the inner service.
    pub static ref REQUESTS_ALLOWED_COUNTER: &'static str = {
        metrics::describe_counter!(
            "checkheaders_requests_allowed_total",
            "Total number of requests that passed every header rule."
        );
        "checkheaders_requests_allowed_total"
    };
    /// Track number of requests rejected with 403.
    pub static ref REQUESTS_DENIED_COUNTER: &'static str = {
        metrics::describe_counter!(
            "checkheaders_requests_denied_total",
            "Total number of requests rejected by a header rule."
        );
        "checkheaders_requests_denied_total"
    };
}

/// Record a verdict for the filter instance `filter`.
///
/// When the `metrics` feature is disabled, this function is a no-op.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_verdict(filter: &str, verdict: Verdict) {
    let counter = if verdict.is_allowed() {
        *REQUESTS_ALLOWED_COUNTER
    } else {
        *REQUESTS_DENIED_COUNTER
    };
    metrics::counter!(counter, "filter" => filter.to_string()).increment(1);
}

/// No-op version when metrics feature is disabled.
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_verdict(_filter: &str, _verdict: Verdict) {}
