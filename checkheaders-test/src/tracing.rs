//! Tracing utilities for asserting on rule evaluation.
//!
//! The capture layer records every event emitted under the `checkheaders`
//! targets, so tests can check which rules ran and what they concluded.

use std::sync::{Arc, Mutex, MutexGuard};

use checkheaders_core::matcher::DIAGNOSTICS_TARGET;
use tracing::{Dispatch, Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::Registry;
use tracing_subscriber::layer::{Context, SubscriberExt};

/// Captured event information for testing.
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    /// The event target (e.g., "checkheaders::diagnostics")
    pub target: String,
    pub level: Level,
    /// Captured field values as strings, `message` included
    pub fields: Vec<(String, String)>,
}

impl CapturedEvent {
    /// Value of the field called `name`, if it was recorded.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn message(&self) -> Option<&str> {
        self.field("message")
    }
}

/// A tracing layer that captures checkheaders events for testing.
pub struct EventCaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor {
    fields: Vec<(String, String)>,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.fields
            .push((field.name().to_string(), format!("{:?}", value)));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.fields
            .push((field.name().to_string(), value.to_string()));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.fields
            .push((field.name().to_string(), value.to_string()));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.fields
            .push((field.name().to_string(), value.to_string()));
    }
}

impl<S> Layer<S> for EventCaptureLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("checkheaders") {
            return;
        }

        let mut visitor = FieldVisitor { fields: Vec::new() };
        event.record(&mut visitor);

        lock(&self.events).push(CapturedEvent {
            target: metadata.target().to_string(),
            level: *metadata.level(),
            fields: visitor.fields,
        });
    }
}

/// Collector for captured events.
#[derive(Clone)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
    dispatch: Dispatch,
}

/// Create a new event collector with its associated dispatch.
pub fn create_event_collector() -> EventCollector {
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCaptureLayer {
        events: Arc::clone(&events),
    };
    let subscriber = Registry::default().with(layer);
    EventCollector {
        events,
        dispatch: Dispatch::new(subscriber),
    }
}

impl EventCollector {
    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Runs `f` with this collector as the default subscriber.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    pub fn events(&self) -> Vec<CapturedEvent> {
        lock(&self.events).clone()
    }

    /// Per-rule diagnostic events, in evaluation order.
    pub fn diagnostics(&self) -> Vec<CapturedEvent> {
        lock(&self.events)
            .iter()
            .filter(|event| event.target == DIAGNOSTICS_TARGET)
            .cloned()
            .collect()
    }

    /// Header names of the rules that were evaluated, in order.
    ///
    /// Only verbose rules report themselves.
    pub fn evaluated_headers(&self) -> Vec<String> {
        self.diagnostics()
            .iter()
            .filter(|event| event.field("matched").is_some())
            .filter_map(|event| event.field("header").map(String::from))
            .collect()
    }

    /// `(header, matched)` for every evaluated verbose rule, in order.
    pub fn outcomes(&self) -> Vec<(String, bool)> {
        self.diagnostics()
            .iter()
            .filter_map(|event| {
                let header = event.field("header")?;
                let matched = event.field("matched")?;
                Some((header.to_string(), matched == "true"))
            })
            .collect()
    }

    /// Number of events at `level`, any target.
    pub fn count_at(&self, level: Level) -> usize {
        lock(&self.events)
            .iter()
            .filter(|event| event.level == level)
            .count()
    }

    pub fn clear(&self) {
        lock(&self.events).clear();
    }
}

fn lock(events: &Mutex<Vec<CapturedEvent>>) -> MutexGuard<'_, Vec<CapturedEvent>> {
    events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
