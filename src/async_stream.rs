use tokio::sync::mpsc;

/// Async counterpart of [`crate::IntoProgressStream`].
///
/// The iterator runs on tokio's blocking pool and hands values over a channel
/// with a single slot. The producer stops once the receiver is dropped.
///
/// ```rust,ignore
/// let mut rx = range(0, 100).stream_async();
/// while let Some(i) = rx.recv().await {
///     // ...
/// }
/// ```
pub trait IntoAsyncProgressStream: Iterator + Send + Sized + 'static
where
    Self::Item: Send + 'static,
{
    /// Must be called from within a tokio runtime.
    fn stream_async(self) -> mpsc::Receiver<Self::Item> {
        let (tx, rx) = mpsc::channel(1);
        tokio::task::spawn_blocking(move || {
            for value in self {
                if tx.blocking_send(value).is_err() {
                    break;
                }
            }
        });
        rx
    }
}

impl<I> IntoAsyncProgressStream for I
where
    I: Iterator + Send + 'static,
    I::Item: Send + 'static,
{
}
