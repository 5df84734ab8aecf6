mod layer;

pub use layer::{ProgressLayer, progress_layer};

/// Picks the `progress` and `step` fields out of an event.
#[derive(Debug, Default)]
pub(crate) struct ProgressVisitor {
    pub(crate) progress: Option<i64>,
    pub(crate) step: bool,
}

impl tracing::field::Visit for ProgressVisitor {
    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        if field.name() == "progress" {
            self.progress = Some(value);
        }
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        if field.name() == "progress" {
            self.progress = Some(i64::try_from(value).unwrap_or(i64::MAX));
        }
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        if field.name() == "step" {
            self.step = value;
        }
    }

    fn record_debug(&mut self, _field: &tracing::field::Field, _value: &dyn std::fmt::Debug) {}
}
