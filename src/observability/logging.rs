//! # Structured Logging
//!
//! JSON log records with a fixed schema and field-name redaction.
//!
//! Every record carries `timestamp`, `service_name`, `level`, `msg` and
//! `trace_id`, followed by the event's own fields and the fields of every
//! enclosing span (innermost wins). A record with no `trace_id` anywhere in
//! scope gets a generated `internal-{uuid}` so background work stays
//! searchable.
//!
//! Any field whose name matches [`SENSITIVE_FIELDS`] (ASCII case-insensitive)
//! is written as `[REDACTED]`, regardless of value type.
//!
//! ```rust,ignore
//! let dispatch = init_logging(&LoggingConfig::new("assignment", "info"))?;
//! tracing::dispatcher::set_global_default(dispatch)?;
//! tracing::info!(email = "a@b.c", "user created"); // email is redacted
//! ```

use std::fmt;
use std::io::Write;

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::{Dispatch, Event, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};

use crate::errors::{Error, Result};

/// Field names whose values are never written.
pub const SENSITIVE_FIELDS: &[&str] = &[
    "password",
    "password_hash",
    "token",
    "token_hash",
    "secret",
    "api_key",
    "ssn",
    "credit_card",
    "email",
    "phone_number",
    "address",
    "authorization",
];

pub const REDACTED: &str = "[REDACTED]";

/// Prefix of generated trace IDs for records outside any request.
pub const INTERNAL_TRACE_PREFIX: &str = "internal-";

const SERIALIZATION_FAILURE_MSG: &str = "Failed to serialize log entry";

/// Whether values of `name` must be redacted.
pub fn is_sensitive(name: &str) -> bool {
    SENSITIVE_FIELDS.iter().any(|field| field.eq_ignore_ascii_case(name))
}

/// Logging settings for a service.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub service_name: String,
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
}

impl LoggingConfig {
    pub fn new(service_name: impl Into<String>, level: impl Into<String>) -> Self {
        Self { service_name: service_name.into(), level: level.into() }
    }
}

/// Build the service's log dispatcher, writing JSON lines to stdout.
///
/// The dispatcher is returned rather than installed; the binary decides
/// whether to make it the global default.
pub fn init_logging(config: &LoggingConfig) -> Result<Dispatch> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            Error::config(format!("Invalid log level '{}': {}", config.level, e))
        })?,
    };

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(RedactingJsonLayer::new(config.service_name.clone(), std::io::stdout));

    Ok(Dispatch::new(subscriber))
}

/// Span fields captured at span creation, stored in the span's extensions.
struct SpanFields(Map<String, Value>);

/// Collects event or span fields into a JSON map, redacting by name.
#[derive(Default)]
struct JsonVisitor {
    fields: Map<String, Value>,
}

impl JsonVisitor {
    fn insert(&mut self, field: &Field, value: Value) {
        let name = field.name();
        let value = if is_sensitive(name) { Value::String(REDACTED.to_string()) } else { value };
        self.fields.insert(name.to_string(), value);
    }
}

impl Visit for JsonVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, Value::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::from(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, Value::String(format!("{:?}", value)));
    }
}

/// `tracing-subscriber` layer that writes one redacted JSON object per event.
pub struct RedactingJsonLayer<W> {
    service_name: String,
    make_writer: W,
}

impl<W> RedactingJsonLayer<W>
where
    W: for<'w> MakeWriter<'w> + 'static,
{
    pub fn new(service_name: impl Into<String>, make_writer: W) -> Self {
        Self { service_name: service_name.into(), make_writer }
    }

    fn build_record(
        &self,
        level: &tracing::Level,
        target: &str,
        mut fields: Map<String, Value>,
    ) -> Map<String, Value> {
        let msg = match fields.remove("message") {
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => String::new(),
        };
        let trace_id = match fields.remove("trace_id") {
            Some(Value::String(s)) if !s.is_empty() => s,
            _ => format!("{}{}", INTERNAL_TRACE_PREFIX, uuid::Uuid::new_v4()),
        };

        let mut record = Map::new();
        record.insert(
            "timestamp".to_string(),
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        record.insert("service_name".to_string(), Value::String(self.service_name.clone()));
        record.insert("level".to_string(), Value::String(level.to_string()));
        record.insert("msg".to_string(), Value::String(msg));
        record.insert("trace_id".to_string(), Value::String(trace_id));
        record.insert("target".to_string(), Value::String(target.to_string()));

        for (key, value) in fields {
            record.entry(key).or_insert(value);
        }
        record
    }

    fn write_line(&self, record: &Map<String, Value>) {
        let mut line = encode_record(&self.service_name, record);
        line.push(b'\n');
        let mut writer = self.make_writer.make_writer();
        // Nothing sensible to do if the sink itself fails.
        let _ = writer.write_all(&line);
    }
}

impl<S, W> Layer<S> for RedactingJsonLayer<W>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + 'static,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let mut visitor = JsonVisitor::default();
        attrs.record(&mut visitor);
        if let Some(span) = ctx.span(id) {
            span.extensions_mut().insert(SpanFields(visitor.fields));
        }
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else { return };
        let mut visitor = JsonVisitor::default();
        values.record(&mut visitor);

        let mut extensions = span.extensions_mut();
        if let Some(existing) = extensions.get_mut::<SpanFields>() {
            existing.0.extend(visitor.fields);
            return;
        }
        extensions.insert(SpanFields(visitor.fields));
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let mut fields = Map::new();
        if let Some(scope) = ctx.event_scope(event) {
            for span in scope.from_root() {
                if let Some(span_fields) = span.extensions().get::<SpanFields>() {
                    fields.extend(span_fields.0.clone());
                }
            }
        }

        let mut visitor = JsonVisitor::default();
        event.record(&mut visitor);
        fields.extend(visitor.fields);

        let metadata = event.metadata();
        let record = self.build_record(metadata.level(), metadata.target(), fields);
        self.write_line(&record);
    }
}

/// Serialize a record, or produce the fallback record if that fails.
fn encode_record(service_name: &str, record: &Map<String, Value>) -> Vec<u8> {
    match serde_json::to_vec(record) {
        Ok(bytes) => bytes,
        Err(_) => fallback_record(service_name),
    }
}

/// Minimal record emitted in place of one that could not be serialized.
fn fallback_record(service_name: &str) -> Vec<u8> {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let trace_id = format!("{}{}", INTERNAL_TRACE_PREFIX, uuid::Uuid::new_v4());
    format!(
        r#"{{"timestamp":"{}","service_name":{},"level":"ERROR","msg":"{}","trace_id":"{}"}}"#,
        timestamp,
        Value::String(service_name.to_string()),
        SERIALIZATION_FAILURE_MSG,
        trace_id
    )
    .into_bytes()
}
