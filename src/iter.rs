//! Iterators that report progress as they are consumed.
//!
//! [`SequenceIter`] walks a slice and [`RangeIter`] counts through a stepped
//! integer range. Both own a [`ProgressBar`] and redraw it on every element:
//!
//! ```rust,ignore
//! for word in ["alpha", "beta", "gamma"].progress() {
//!     // ...
//! }
//!
//! for i in step_range(100, 0, -5) {
//!     // 100, 95, ..., 5
//! }
//! ```

use std::io::Write;

use crate::bar::{DEFAULT_BAR_CHAR, DEFAULT_BAR_SIZE, DEFAULT_FORMAT, ProgressBar};

/// Increment used when a range is given a step of zero.
pub const DEFAULT_STEP: i64 = 1;

/// Yields each element of a slice and moves its bar to the number of elements
/// taken so far.
#[derive(Debug)]
pub struct SequenceIter<'a, T, W: Write = std::io::Stdout> {
    items: &'a [T],
    index: usize,
    bar: ProgressBar<W>,
}

impl<'a, T> SequenceIter<'a, T> {
    /// Wraps `items` with a default bar sized to its length.
    pub fn new(items: &'a [T]) -> Self {
        let max = i64::try_from(items.len()).unwrap_or(i64::MAX);
        Self::with_bar(items, ProgressBar::new(max))
    }
}

impl<'a, T, W: Write> SequenceIter<'a, T, W> {
    /// Wraps `items` with a caller-configured bar.
    pub fn with_bar(items: &'a [T], bar: ProgressBar<W>) -> Self {
        Self {
            items,
            index: 0,
            bar,
        }
    }

    /// Rewinds to the first element and resets the bar.
    pub fn reset(&mut self) {
        self.index = 0;
        self.bar.reset();
    }

    pub fn bar(&self) -> &ProgressBar<W> {
        &self.bar
    }

    pub fn into_bar(self) -> ProgressBar<W> {
        self.bar
    }
}

impl<'a, T, W: Write> Iterator for SequenceIter<'a, T, W> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.items.get(self.index)?;
        self.index += 1;
        self.bar.set_progress(i64::try_from(self.index).unwrap_or(i64::MAX));
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.items.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl<T, W: Write> ExactSizeIterator for SequenceIter<'_, T, W> {}

/// Attaches a [`SequenceIter`] to any slice.
pub trait ProgressSliceExt<T> {
    /// Iterates the slice with a default bar sized to its length.
    fn progress(&self) -> SequenceIter<'_, T>;

    /// Iterates the slice, reporting to `bar`.
    fn progress_with<W: Write>(&self, bar: ProgressBar<W>) -> SequenceIter<'_, T, W>;
}

impl<T> ProgressSliceExt<T> for [T] {
    fn progress(&self) -> SequenceIter<'_, T> {
        SequenceIter::new(self)
    }

    fn progress_with<W: Write>(&self, bar: ProgressBar<W>) -> SequenceIter<'_, T, W> {
        SequenceIter::with_bar(self, bar)
    }
}

/// Counts from `start` towards `end` (exclusive) by `step`, stepping its bar
/// once per value.
///
/// A negative `step` counts down. The bar is sized to `(end - start) / step`,
/// so ranges whose length is not a multiple of `step` reach the end of the bar
/// one value early.
#[derive(Debug)]
pub struct RangeIter<W: Write = std::io::Stdout> {
    start: i64,
    end: i64,
    step: i64,
    current: i64,
    bar: ProgressBar<W>,
}

impl RangeIter {
    /// Creates a range with a fully configured bar drawing to standard output.
    ///
    /// A `step` of zero is replaced by [`DEFAULT_STEP`].
    pub fn new(start: i64, end: i64, step: i64, format: &str, size: usize, glyph: &str) -> Self {
        let step = coerce_step(step);
        let bar = ProgressBar::with_config(format, steps(start, end, step), size, glyph);
        Self::with_bar(start, end, step, bar)
    }
}

impl<W: Write> RangeIter<W> {
    /// Creates a range reporting to `bar` as-is.
    pub fn with_bar(start: i64, end: i64, step: i64, bar: ProgressBar<W>) -> Self {
        Self {
            start,
            end,
            step: coerce_step(step),
            current: start,
            bar,
        }
    }

    /// Redirects the bar to another writer.
    pub fn with_writer<T: Write>(self, writer: T) -> RangeIter<T> {
        RangeIter {
            start: self.start,
            end: self.end,
            step: self.step,
            current: self.current,
            bar: self.bar.with_writer(writer),
        }
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    pub fn step(&self) -> i64 {
        self.step
    }

    pub fn bar(&self) -> &ProgressBar<W> {
        &self.bar
    }

    pub fn into_bar(self) -> ProgressBar<W> {
        self.bar
    }

    fn exhausted(&self) -> bool {
        (self.step > 0 && self.current >= self.end) || (self.step < 0 && self.current <= self.end)
    }
}

impl<W: Write> Iterator for RangeIter<W> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.exhausted() {
            return None;
        }
        let value = self.current;
        self.current = self.current.saturating_add(self.step);
        self.bar.step();
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.exhausted() {
            return (0, Some(0));
        }
        let span = self.end.abs_diff(self.current);
        let step = self.step.unsigned_abs();
        let remaining = usize::try_from(span.div_ceil(step)).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

/// Counts from `start` up to `end` (exclusive) with the default bar.
pub fn range(start: i64, end: i64) -> RangeIter {
    step_range(start, end, DEFAULT_STEP)
}

/// Counts from `start` towards `end` (exclusive) by `step` with the default bar.
pub fn step_range(start: i64, end: i64, step: i64) -> RangeIter {
    RangeIter::new(start, end, step, DEFAULT_FORMAT, DEFAULT_BAR_SIZE, DEFAULT_BAR_CHAR)
}

fn coerce_step(step: i64) -> i64 {
    if step == 0 {
        #[cfg(feature = "tracing")]
        tracing::warn!(step = DEFAULT_STEP, "range step of 0, using the default step");
        return DEFAULT_STEP;
    }
    step
}

fn steps(start: i64, end: i64, step: i64) -> i64 {
    end.saturating_sub(start).checked_div(step).unwrap_or(i64::MAX)
}
