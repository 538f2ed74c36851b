//! Forward Bevy's `tracing` spans into Micromegas thread-local scopes.
//!
//! With the `trace` feature Bevy opens a `tracing` span around every schedule
//! run. `ScopeBridgeLayer` watches for spans with a given metadata name and
//! mirrors their enter/exit as Micromegas named-scope events, labelled with
//! the span's `name` field (e.g. `Update`, `FixedUpdate`).

use micromegas_tracing::dispatch::{on_begin_named_scope, on_end_named_scope};
use micromegas_tracing::intern_string::intern_string;
use tracing::Subscriber;
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

micromegas_tracing::static_span_location!(BRIDGE_LOCATION);

/// Metadata name Bevy gives its per-schedule spans.
pub const SCHEDULE_SPAN: &str = "schedule";

/// Interned scope label attached to a bridged span.
struct BridgedScope(&'static str);

/// Pulls the `name` field out of span attributes.
#[derive(Default)]
struct LabelVisitor(Option<String>);

impl Visit for LabelVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "name" {
            self.0 = Some(value.to_owned());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "name" && self.0.is_none() {
            self.0 = Some(format!("{value:?}"));
        }
    }
}

pub struct ScopeBridgeLayer {
    span_name: &'static str,
}

impl ScopeBridgeLayer {
    /// Bridge Bevy's schedule spans.
    pub fn schedules() -> Self {
        Self {
            span_name: SCHEDULE_SPAN,
        }
    }

    fn scope<S>(id: &Id, ctx: &Context<'_, S>) -> Option<&'static str>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        let span = ctx.span(id)?;
        let extensions = span.extensions();
        extensions.get::<BridgedScope>().map(|scope| scope.0)
    }
}

impl<S> Layer<S> for ScopeBridgeLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        if attrs.metadata().name() != self.span_name {
            return;
        }
        let mut visitor = LabelVisitor::default();
        attrs.record(&mut visitor);
        let label = intern_string(&visitor.0.unwrap_or_else(|| self.span_name.to_owned()));

        if let Some(span) = ctx.span(id) {
            span.extensions_mut().insert(BridgedScope(label));
        }
    }

    fn on_enter(&self, id: &Id, ctx: Context<'_, S>) {
        if let Some(label) = Self::scope(id, &ctx) {
            on_begin_named_scope(&BRIDGE_LOCATION, label);
        }
    }

    fn on_exit(&self, id: &Id, ctx: Context<'_, S>) {
        if let Some(label) = Self::scope(id, &ctx) {
            on_end_named_scope(&BRIDGE_LOCATION, label);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    /// Label the bridge attached to `span`, if any.
    fn bridged_label(span: &tracing::Span) -> Option<&'static str> {
        let id = span.id()?;
        tracing::dispatcher::get_default(|dispatch| {
            let registry = dispatch.downcast_ref::<Registry>()?;
            let data = registry.span(&id)?;
            let extensions = data.extensions();
            extensions.get::<BridgedScope>().map(|scope| scope.0)
        })
    }

    #[test]
    fn only_schedule_spans_are_bridged() {
        let subscriber = Registry::default().with(ScopeBridgeLayer::schedules());
        tracing::subscriber::with_default(subscriber, || {
            let system = tracing::info_span!("system", name = "advance_session");
            assert_eq!(bridged_label(&system), None);

            let schedule = tracing::info_span!("schedule", name = "Update");
            assert_eq!(bridged_label(&schedule), Some("Update"));
        });
    }

    #[test]
    fn schedule_spans_bridge_without_thread_stream() {
        // Without a Micromegas thread stream the scope events are dropped, but
        // entering and leaving the span must not panic.
        let subscriber = Registry::default().with(ScopeBridgeLayer::schedules());
        tracing::subscriber::with_default(subscriber, || {
            let span = tracing::info_span!("schedule", name = "Update");
            let _guard = span.enter();
        });
    }
}
