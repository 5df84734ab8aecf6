use std::io::Write;
use std::sync::Mutex;

use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::registry::LookupSpan;

use super::ProgressVisitor;
use crate::ProgressBar;

/// A `tracing` [`tracing_subscriber::Layer`] that moves a [`ProgressBar`] in
/// response to events.
///
/// Events carrying an integer `progress` field set the bar to that value;
/// events carrying `step = true` advance it by one. Everything else is ignored.
///
/// ```rust,ignore
/// let layer = progress_layer(ProgressBar::new(3)).with_target("sync");
/// tracing_subscriber::registry().with(layer).init();
///
/// tracing::info!(target: "sync", progress = 2, "halfway there");
/// tracing::info!(target: "sync", step = true);
/// ```
pub struct ProgressLayer<W: Write> {
    bar: Mutex<ProgressBar<W>>,
    target: Option<&'static str>,
}

impl<W: Write + Send + 'static> ProgressLayer<W> {
    pub fn new(bar: ProgressBar<W>) -> Self {
        Self {
            bar: Mutex::new(bar),
            target: None,
        }
    }

    /// Only react to events whose target is exactly `target`.
    pub fn with_target(mut self, target: &'static str) -> Self {
        self.target = Some(target);
        self
    }

    /// Consumes the layer, returning its bar.
    pub fn into_bar(self) -> ProgressBar<W> {
        self.bar.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn accepts(&self, metadata: &tracing::Metadata<'_>) -> bool {
        self.target.is_none_or(|target| metadata.target() == target)
    }
}

impl<S, W> Layer<S> for ProgressLayer<W>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: Write + Send + 'static,
{
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        if !self.accepts(event.metadata()) {
            return;
        }

        let mut visitor = ProgressVisitor::default();
        event.record(&mut visitor);

        let Ok(mut bar) = self.bar.lock() else {
            return;
        };
        match visitor {
            ProgressVisitor {
                progress: Some(value),
                ..
            } => bar.set_progress(value),
            ProgressVisitor { step: true, .. } => bar.step(),
            _ => {}
        }
    }
}

/// Creates a [`ProgressLayer`] driving `bar`.
pub fn progress_layer<W: Write + Send + 'static>(bar: ProgressBar<W>) -> ProgressLayer<W> {
    ProgressLayer::new(bar)
}
