//! In-process telemetry capture for unit tests.
//!
//! `CapturingRecorder` is a `metrics::Recorder` that keeps counter totals and
//! histogram samples. `SpanCapture` is a `tracing_subscriber::Layer` that keeps
//! spans (with parent, fields, closed flag) and events.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use metrics::{
    Counter, CounterFn, Gauge, Histogram, HistogramFn, Key, KeyName, Metadata, Recorder,
    SharedString, Unit,
};
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

type Counters = Arc<Mutex<BTreeMap<String, u64>>>;
type Histograms = Arc<Mutex<BTreeMap<String, Vec<f64>>>>;

/// Renders a key as `name{k=v,...}` with labels sorted, or bare `name`.
fn render_key(key: &Key) -> String {
    let mut labels: Vec<String> = key
        .labels()
        .map(|label| format!("{}={}", label.key(), label.value()))
        .collect();
    if labels.is_empty() {
        return key.name().to_string();
    }
    labels.sort();
    format!("{}{{{}}}", key.name(), labels.join(","))
}

#[derive(Default)]
pub struct CapturingRecorder {
    counters: Counters,
    histograms: Histograms,
}

impl CapturingRecorder {
    pub fn counter(&self, key: &str) -> u64 {
        self.counters.lock().unwrap().get(key).copied().unwrap_or(0)
    }

    pub fn histogram(&self, key: &str) -> Vec<f64> {
        self.histograms
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .unwrap_or_default()
    }

    pub fn counter_keys(&self) -> Vec<String> {
        self.counters.lock().unwrap().keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.lock().unwrap().is_empty() && self.histograms.lock().unwrap().is_empty()
    }
}

struct CounterHandle {
    key: String,
    counters: Counters,
}

impl CounterFn for CounterHandle {
    fn increment(&self, value: u64) {
        *self.counters.lock().unwrap().entry(self.key.clone()).or_default() += value;
    }

    fn absolute(&self, value: u64) {
        let mut counters = self.counters.lock().unwrap();
        let entry = counters.entry(self.key.clone()).or_default();
        *entry = (*entry).max(value);
    }
}

struct HistogramHandle {
    key: String,
    histograms: Histograms,
}

impl HistogramFn for HistogramHandle {
    fn record(&self, value: f64) {
        self.histograms
            .lock()
            .unwrap()
            .entry(self.key.clone())
            .or_default()
            .push(value);
    }
}

impl Recorder for CapturingRecorder {
    fn describe_counter(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}

    fn describe_gauge(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}

    fn describe_histogram(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}

    fn register_counter(&self, key: &Key, _metadata: &Metadata<'_>) -> Counter {
        Counter::from_arc(Arc::new(CounterHandle {
            key: render_key(key),
            counters: self.counters.clone(),
        }))
    }

    fn register_gauge(&self, _key: &Key, _metadata: &Metadata<'_>) -> Gauge {
        Gauge::noop()
    }

    fn register_histogram(&self, key: &Key, _metadata: &Metadata<'_>) -> Histogram {
        Histogram::from_arc(Arc::new(HistogramHandle {
            key: render_key(key),
            histograms: self.histograms.clone(),
        }))
    }
}

#[derive(Debug, Clone)]
pub struct CapturedSpan {
    pub name: &'static str,
    pub parent: Option<&'static str>,
    pub fields: BTreeMap<String, String>,
    pub closed: bool,
}

#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub span: Option<&'static str>,
    pub message: String,
    pub fields: BTreeMap<String, String>,
}

#[derive(Default)]
struct Captured {
    spans: Vec<CapturedSpan>,
    events: Vec<CapturedEvent>,
}

/// Index of a span inside `Captured::spans`, stored in span extensions.
struct SpanSlot(usize);

#[derive(Clone, Default)]
pub struct SpanCapture {
    inner: Arc<Mutex<Captured>>,
}

impl SpanCapture {
    pub fn spans(&self) -> Vec<CapturedSpan> {
        self.inner.lock().unwrap().spans.clone()
    }

    pub fn events(&self) -> Vec<CapturedEvent> {
        self.inner.lock().unwrap().events.clone()
    }

    /// First span with the given name.
    pub fn span(&self, name: &str) -> Option<CapturedSpan> {
        self.spans().into_iter().find(|s| s.name == name)
    }

    /// Events emitted inside spans with the given name.
    pub fn events_in(&self, span: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.span == Some(span))
            .collect()
    }
}

struct FieldVisitor<'a>(&'a mut BTreeMap<String, String>);

impl Visit for FieldVisitor<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }
}

impl<S> Layer<S> for SpanCapture
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let mut fields = BTreeMap::new();
        attrs.record(&mut FieldVisitor(&mut fields));

        let Some(span) = ctx.span(id) else { return };
        let parent = span.parent().map(|p| p.name());

        let mut captured = self.inner.lock().unwrap();
        captured.spans.push(CapturedSpan {
            name: span.name(),
            parent,
            fields,
            closed: false,
        });
        span.extensions_mut().insert(SpanSlot(captured.spans.len() - 1));
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else { return };
        let extensions = span.extensions();
        let Some(SpanSlot(slot)) = extensions.get::<SpanSlot>() else { return };

        let mut captured = self.inner.lock().unwrap();
        values.record(&mut FieldVisitor(&mut captured.spans[*slot].fields));
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let mut fields = BTreeMap::new();
        event.record(&mut FieldVisitor(&mut fields));
        let message = fields.remove("message").unwrap_or_default();
        let span = ctx.event_span(event).map(|s| s.name());

        self.inner.lock().unwrap().events.push(CapturedEvent {
            span,
            message,
            fields,
        });
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else { return };
        let extensions = span.extensions();
        if let Some(SpanSlot(slot)) = extensions.get::<SpanSlot>() {
            self.inner.lock().unwrap().spans[*slot].closed = true;
        }
    }
}

/// Subscriber with a fresh `SpanCapture` attached.
pub fn capture_subscriber() -> (impl Subscriber + Send + Sync, SpanCapture) {
    use tracing_subscriber::layer::SubscriberExt;

    let capture = SpanCapture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    (subscriber, capture)
}
