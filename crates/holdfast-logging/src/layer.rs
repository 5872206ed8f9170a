//! Bridge from `tracing` events to the facade.
//!
//! [`FacadeLayer`] implements [`tracing_subscriber::Layer`], captures each
//! event above its level floor, and forwards it through the process-wide
//! [`Facade`](crate::facade::Facade) to whatever sink is installed. Library
//! code keeps using plain `tracing` macros; host applications choose the
//! destination once, at startup.

use tracing::Subscriber;
use tracing::field::{Field, Visit};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

use crate::facade::{Facade, LogSink};
use crate::types::{LogLevel, LogRecord};

/// `tracing` layer forwarding events into the facade.
pub struct FacadeLayer {
    min_level: i32,
}

impl FacadeLayer {
    /// Forward events at `Info` and above.
    #[must_use]
    pub fn new() -> Self {
        Self::with_min_level(LogLevel::Info)
    }

    /// Forward events at `min_level` and above.
    #[must_use]
    pub fn with_min_level(min_level: LogLevel) -> Self {
        Self {
            min_level: min_level.as_num(),
        }
    }
}

impl Default for FacadeLayer {
    fn default() -> Self {
        Self::new()
    }
}

/// Visitor that splits the `message` field from the structured rest.
struct EventFieldVisitor {
    message: Option<String>,
    fields: serde_json::Map<String, serde_json::Value>,
}

impl EventFieldVisitor {
    fn new() -> Self {
        Self {
            message: None,
            fields: serde_json::Map::new(),
        }
    }
}

impl Visit for EventFieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            let _ = self.fields.insert(
                field.name().to_string(),
                serde_json::Value::String(value.to_string()),
            );
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        let _ = self.fields.insert(
            field.name().to_string(),
            serde_json::Value::Number(value.into()),
        );
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        let _ = self.fields.insert(
            field.name().to_string(),
            serde_json::Value::Number(value.into()),
        );
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        let _ = self
            .fields
            .insert(field.name().to_string(), serde_json::Value::Bool(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if let Some(n) = serde_json::Number::from_f64(value) {
            let _ = self
                .fields
                .insert(field.name().to_string(), serde_json::Value::Number(n));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        } else {
            let _ = self.fields.insert(
                field.name().to_string(),
                serde_json::Value::String(format!("{value:?}")),
            );
        }
    }
}

impl<S: Subscriber> Layer<S> for FacadeLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let level = LogLevel::from_tracing(event.metadata().level());
        if level.as_num() < self.min_level {
            return;
        }

        let mut visitor = EventFieldVisitor::new();
        event.record(&mut visitor);

        let record = LogRecord {
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            level,
            level_num: level.as_num(),
            target: event.metadata().target().to_string(),
            message: visitor.message.unwrap_or_default(),
            fields: visitor.fields,
        };
        Facade::global().log(&record);
    }
}

/// Register a global subscriber: formatted stderr output plus the facade
/// bridge at `min_level`.
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init_tracing(min_level: LogLevel) {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(FacadeLayer::with_min_level(min_level))
        .try_init();
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
