use std::io::Write;
use std::time::Instant;

use crate::format::{self, Fields};

/// Template used when none (or an empty one) is given.
pub const DEFAULT_FORMAT: &str = "%prog%% |%bar%| %curr%/%max% [%eta%, %spd%it/s]";
/// Glyph used for completed bar cells when none (or an empty one) is given.
pub const DEFAULT_BAR_CHAR: &str = "■";
/// Width of the `%bar%` segment in cells.
pub const DEFAULT_BAR_SIZE: usize = 80;

/// Smoothing coefficient of the speed estimate.
const GAMMA: f64 = 0.5;
/// Shortest interval used when measuring speed, in seconds.
const MIN_DURATION: f64 = 1e-6;
/// Lowest speed used when estimating the remaining time.
const MIN_ETA_SPEED: f64 = 0.01;

/// A single-line progress bar that redraws itself in place on every update.
///
/// Every update measures the time since the previous one and folds the
/// instantaneous rate into an exponential moving average, which drives the
/// `%spd%` and `%eta%` fields.
///
/// ```rust,ignore
/// let mut bar = ProgressBar::new(200).bar_size(30);
/// for _ in 0..200 {
///     // ...
///     bar.step();
/// }
/// println!();
/// // => 100.00% |■■■■■■■■■■■■■■■■■■■■■■■■■■■■■■| 200/200 [00:00.00, 1843.51it/s]
/// ```
///
/// The template understands `%bar%`, `%prog%`, `%curr%`, `%max%`, `%eta%` and
/// `%spd%`. A literal percent sign is written `\%`.
#[derive(Debug)]
pub struct ProgressBar<W: Write = std::io::Stdout> {
    format: String,
    progress: i64,
    max_progress: i64,
    bar_size: usize,
    bar_char: String,
    speed: f64,
    start_time: Instant,
    gamma: f64,
    writer: W,
}

impl ProgressBar {
    /// Creates a bar counting up to `max` with the default template, width and
    /// glyph, drawing to standard output.
    ///
    /// A `max` below 1 is treated as 1.
    pub fn new(max: i64) -> Self {
        Self::with_config(DEFAULT_FORMAT, max, DEFAULT_BAR_SIZE, DEFAULT_BAR_CHAR)
    }

    /// Creates a bar from a full configuration, drawing to standard output.
    ///
    /// An empty `format` or `bar_char` falls back to [`DEFAULT_FORMAT`] or
    /// [`DEFAULT_BAR_CHAR`], and a `max` below 1 is treated as 1.
    pub fn with_config(format: &str, max: i64, bar_size: usize, bar_char: &str) -> Self {
        Self {
            format: template_or_default(format),
            progress: 0,
            max_progress: coerce_max(max),
            bar_size,
            bar_char: glyph_or_default(bar_char),
            speed: 0.0,
            start_time: Instant::now(),
            gamma: GAMMA,
            writer: std::io::stdout(),
        }
    }
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<W: Write> ProgressBar<W> {
    /// Sets the template.
    pub fn format(mut self, format: &str) -> Self {
        self.format = template_or_default(format);
        self
    }

    /// Sets the width of the `%bar%` segment.
    pub fn bar_size(mut self, size: usize) -> Self {
        self.bar_size = size;
        self
    }

    /// Sets the glyph used for completed cells.
    pub fn bar_char(mut self, glyph: &str) -> Self {
        self.bar_char = glyph_or_default(glyph);
        self
    }

    /// Redirects rendering to another writer, keeping all progress state.
    pub fn with_writer<T: Write>(self, writer: T) -> ProgressBar<T> {
        ProgressBar {
            format: self.format,
            progress: self.progress,
            max_progress: self.max_progress,
            bar_size: self.bar_size,
            bar_char: self.bar_char,
            speed: self.speed,
            start_time: self.start_time,
            gamma: self.gamma,
            writer,
        }
    }

    /// Advances the bar by one unit.
    pub fn step(&mut self) {
        self.set_progress(self.progress.saturating_add(1));
    }

    /// Moves the bar to `value`, clamped into `0..=max`, updates the speed
    /// estimate and redraws.
    ///
    /// Moving backwards is allowed and counts as a negative rate.
    pub fn set_progress(&mut self, value: i64) {
        self.set_progress_at(value, Instant::now());
    }

    pub(crate) fn set_progress_at(&mut self, value: i64, now: Instant) {
        let duration = now
            .saturating_duration_since(self.start_time)
            .as_secs_f64()
            .max(MIN_DURATION);
        self.start_time = now;

        let value = value.clamp(0, self.max_progress);
        let delta = (value - self.progress) as f64;
        self.speed += self.gamma * (delta / duration - self.speed);
        self.progress = value;

        // Output is best-effort; a broken terminal must not stop the work.
        let _ = self.draw();
    }

    /// Zeroes progress and speed and restarts the timing interval.
    ///
    /// Does not redraw.
    pub fn reset(&mut self) {
        self.progress = 0;
        self.speed = 0.0;
        self.start_time = Instant::now();
    }

    /// Writes the current line, prefixed with a carriage return, and flushes.
    pub fn draw(&mut self) -> Result<(), std::io::Error> {
        let line = self.line();
        write!(self.writer, "\r{line}")?;
        self.writer.flush()
    }

    /// Renders the current state into a line, without the carriage return.
    pub fn line(&self) -> String {
        format::apply(&self.format, &self.fields())
    }

    /// Computes the display value of every placeholder used by the template.
    pub fn fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert("spd", format!("{:.2}", self.speed));
        fields.insert("eta", format_eta(self.eta_secs()));
        fields.insert("curr", self.progress.to_string());
        fields.insert("max", self.max_progress.to_string());
        fields.insert("prog", format!("{:.2}", self.percent()));
        if format::has_placeholder(&self.format, "bar") {
            fields.insert("bar", self.bar());
        }
        fields
    }

    /// Percent complete.
    pub fn percent(&self) -> f64 {
        100.0 * self.progress as f64 / self.max_progress as f64
    }

    /// Estimated seconds until `max` is reached at the current speed.
    pub fn eta_secs(&self) -> f64 {
        (self.max_progress - self.progress) as f64 / self.speed.max(MIN_ETA_SPEED)
    }

    /// Number of completed cells in the bar segment.
    pub fn filled_cells(&self) -> usize {
        let filled = self.bar_size as f64 * self.progress as f64 / self.max_progress as f64;
        (filled as usize).min(self.bar_size)
    }

    fn bar(&self) -> String {
        let filled = self.filled_cells();
        let mut bar = self.bar_char.repeat(filled);
        bar.extend(std::iter::repeat_n(' ', self.bar_size - filled));
        bar
    }

    pub fn progress(&self) -> i64 {
        self.progress
    }

    pub fn max_progress(&self) -> i64 {
        self.max_progress
    }

    /// Smoothed speed in units per second.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn template(&self) -> &str {
        &self.format
    }

    pub fn width(&self) -> usize {
        self.bar_size
    }

    pub fn glyph(&self) -> &str {
        &self.bar_char
    }

    /// Borrows the output target.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Consumes the bar, returning the output target.
    pub fn into_inner(self) -> W {
        self.writer
    }

    #[cfg(test)]
    pub(crate) fn start_time_for_test(&self) -> Instant {
        self.start_time
    }
}

fn coerce_max(max: i64) -> i64 {
    if max < 1 {
        #[cfg(feature = "tracing")]
        tracing::warn!(max, "progress bar max below 1, using 1");
        return 1;
    }
    max
}

fn template_or_default(format: &str) -> String {
    match format {
        "" => DEFAULT_FORMAT.to_string(),
        format => format.to_string(),
    }
}

fn glyph_or_default(glyph: &str) -> String {
    match glyph {
        "" => DEFAULT_BAR_CHAR.to_string(),
        glyph => glyph.to_string(),
    }
}

/// Formats seconds as `MM:SS.ss`.
fn format_eta(secs: f64) -> String {
    let minutes = (secs / 60.0) as i64;
    let seconds = (secs as i64 % 60) as f64 + secs.fract();
    format!("{minutes:02}:{seconds:05.2}")
}
