//! Shared helpers for the checkheaders integration tests.
//!
//! [`fixture`] holds the reference rule set exercised by every scenario and
//! [`tracing`] captures the per-rule diagnostic events emitted while a
//! request is evaluated.

pub mod fixture;
pub mod tracing;

pub use crate::fixture::{
    REFERENCE_YAML, TEST_CERT, reference_config, reference_layer, request_with,
    verbose_reference_config,
};
pub use crate::tracing::{CapturedEvent, EventCollector, create_event_collector};
