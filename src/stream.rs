use std::sync::mpsc::{Receiver, SyncSender, sync_channel};
use std::thread::JoinHandle;

/// Values pulled from an iterator on a background thread and handed over one
/// at a time.
///
/// The producer blocks on a rendezvous channel until the consumer takes each
/// value, so it never runs more than one element ahead. Dropping the stream
/// before it is exhausted stops the producer at its next hand-off and joins
/// its thread.
///
/// ```rust,ignore
/// let stream = range(0, 1_000).stream();
/// for i in stream {
///     // consumed here, produced (and rendered) on the background thread
/// }
/// ```
#[derive(Debug)]
pub struct ProgressStream<T> {
    rx: Option<Receiver<T>>,
    producer: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> ProgressStream<T> {
    /// Spawns a producer thread that drains `source` into the stream.
    pub fn spawn<I>(source: I) -> Self
    where
        I: Iterator<Item = T> + Send + 'static,
    {
        let (tx, rx) = sync_channel(0);
        let producer = std::thread::spawn(move || produce(source, tx));
        Self {
            rx: Some(rx),
            producer: Some(producer),
        }
    }
}

fn produce<I: Iterator>(source: I, tx: SyncSender<I::Item>) {
    for value in source {
        if tx.send(value).is_err() {
            // Receiver dropped.
            return;
        }
    }
}

impl<T> Iterator for ProgressStream<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match self.rx.as_ref()?.recv() {
            Ok(value) => Some(value),
            Err(_) => {
                // Producer is gone: either the source ended or it panicked.
                self.rx = None;
                if let Err(payload) = self.join_producer() {
                    std::panic::resume_unwind(payload);
                }
                None
            }
        }
    }
}

impl<T> ProgressStream<T> {
    fn join_producer(&mut self) -> std::thread::Result<()> {
        match self.producer.take() {
            Some(producer) => producer.join(),
            None => Ok(()),
        }
    }
}

impl<T> Drop for ProgressStream<T> {
    fn drop(&mut self) {
        // Close the channel first so a blocked producer wakes up and exits.
        drop(self.rx.take());
        if let Err(payload) = self.join_producer()
            && !std::thread::panicking()
        {
            std::panic::resume_unwind(payload);
        }
    }
}

/// Moves iteration of a progress-reporting iterator onto a background thread.
///
/// Implemented for every sendable iterator, including [`crate::SequenceIter`]
/// over `'static` data and [`crate::RangeIter`].
pub trait IntoProgressStream: Iterator + Send + Sized + 'static
where
    Self::Item: Send + 'static,
{
    /// Starts producing on a background thread. See [`ProgressStream`].
    fn stream(self) -> ProgressStream<Self::Item> {
        ProgressStream::spawn(self)
    }
}

impl<I> IntoProgressStream for I
where
    I: Iterator + Send + 'static,
    I::Item: Send + 'static,
{
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::iter::step_range;

    #[test]
    fn yields_in_source_order() {
        let stream = step_range(10, 0, -3).with_writer(Vec::<u8>::new()).stream();
        assert_eq!(stream.collect::<Vec<_>>(), vec![10, 7, 4, 1]);
    }

    #[test]
    fn static_sequence_streams() {
        static WORDS: [&str; 3] = ["a", "b", "c"];
        let bar = crate::ProgressBar::new(3).with_writer(Vec::<u8>::new());
        let stream = crate::SequenceIter::with_bar(&WORDS, bar).stream();
        assert_eq!(stream.copied().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn producer_stays_one_ahead_at_most() {
        let pulled = Arc::new(AtomicUsize::new(0));
        let counter = pulled.clone();
        let source = (0..100).inspect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let mut stream = source.stream();
        assert_eq!(stream.next(), Some(0));
        assert_eq!(stream.next(), Some(1));
        std::thread::sleep(std::time::Duration::from_millis(50));
        // two taken, at most one more pulled and waiting for hand-off
        assert!(pulled.load(Ordering::SeqCst) <= 3);
    }

    #[test]
    fn dropping_early_stops_producer() {
        let pulled = Arc::new(AtomicUsize::new(0));
        let counter = pulled.clone();
        let source = (0..).inspect(move |_: &u64| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let mut stream = source.stream();
        assert_eq!(stream.next(), Some(0));
        drop(stream);

        // the producer thread has been joined, so the count is final
        let after_drop = pulled.load(Ordering::SeqCst);
        std::thread::sleep(std::time::Duration::from_millis(20));
        assert_eq!(pulled.load(Ordering::SeqCst), after_drop);
        assert!(after_drop <= 2);
    }

    #[test]
    #[should_panic(expected = "source failed")]
    fn source_panic_reaches_consumer() {
        let stream = (0..10)
            .map(|i| if i == 3 { panic!("source failed") } else { i })
            .stream();
        let _ = stream.collect::<Vec<_>>();
    }

    #[test]
    fn values_before_source_panic_are_delivered() {
        let mut stream = (0..10)
            .map(|i| if i == 2 { panic!("source failed") } else { i })
            .stream();
        assert_eq!(stream.next(), Some(0));
        assert_eq!(stream.next(), Some(1));
        let end = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| stream.next()));
        assert!(end.is_err());
        // the panic has been surfaced once; the stream is now closed
        assert_eq!(stream.next(), None);
    }

    #[test]
    fn empty_source_closes_immediately() {
        let mut stream = std::iter::empty::<u8>().stream();
        assert_eq!(stream.next(), None);
        assert_eq!(stream.next(), None);
    }
}
