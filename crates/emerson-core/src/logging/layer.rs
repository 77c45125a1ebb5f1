//! tracing Layer that forwards events to a [`LogSink`].

use std::fmt::Write as FmtWrite;
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

use super::entry::LogLine;
use super::LogSink;

/// A tracing Layer that turns events into [`LogLine`]s for a sink.
///
/// In the browser the sink is the devtools console; in tests it is a
/// [`MemorySink`](super::MemorySink).
pub struct ConsoleLayer<S> {
    sink: Arc<S>,
}

impl<S: LogSink> ConsoleLayer<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink: Arc::new(sink),
        }
    }

    /// Share an existing sink (keeps a handle for inspection).
    pub fn with_shared(sink: Arc<S>) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &Arc<S> {
        &self.sink
    }
}

impl<S, Sub> Layer<Sub> for ConsoleLayer<S>
where
    S: LogSink + 'static,
    Sub: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, Sub>) {
        let metadata = event.metadata();
        let level = metadata.level().as_str().to_lowercase();

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let mut line = LogLine::new(level, metadata.target(), visitor.message.unwrap_or_default());
        if !visitor.fields.is_empty() {
            line = line.with_fields(serde_json::Value::Object(visitor.fields));
        }
        self.sink.write(&line);
    }
}

/// Collects the message and fields of an event. Anything without a
/// dedicated JSON form is rendered through `Debug`.
#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: serde_json::Map<String, serde_json::Value>,
}

impl FieldVisitor {
    fn put(&mut self, field: &Field, value: serde_json::Value) {
        match (field.name(), value) {
            ("message", serde_json::Value::String(text)) => self.message = Some(text),
            (name, value) => {
                self.fields.insert(name.to_string(), value);
            }
        }
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let mut buf = String::new();
        let _ = write!(&mut buf, "{:?}", value);
        self.put(field, buf.into());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value.into());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value.into());
    }

    // NaN and infinities have no JSON number form
    fn record_f64(&mut self, field: &Field, value: f64) {
        match serde_json::Number::from_f64(value) {
            Some(n) => self.put(field, n.into()),
            None => self.put(field, value.to_string().into()),
        }
    }
}
