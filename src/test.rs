use std::io::Write;
use std::time::Duration;

use crate::{ProgressBar, ProgressSliceExt, RangeIter, step_range};

/// A single-row terminal: `\r` returns to column 0 and later text overwrites
/// what is already there.
pub struct VirtualTerm {
    pub line: Vec<char>,
    pub cursor: usize,
    pub writes: usize,
    buf: Vec<u8>,
}

impl VirtualTerm {
    pub fn new() -> Self {
        Self {
            line: Vec::new(),
            cursor: 0,
            writes: 0,
            buf: Vec::new(),
        }
    }

    pub fn render(&self) -> String {
        self.line.iter().collect()
    }

    fn process(&mut self, s: &str) {
        for c in s.chars() {
            match c {
                '\r' => self.cursor = 0,
                _ => {
                    if self.cursor < self.line.len() {
                        self.line[self.cursor] = c;
                    } else {
                        self.line.push(c);
                    }
                    self.cursor += 1;
                }
            }
        }
    }
}

impl std::io::Write for VirtualTerm {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if !self.buf.is_empty() {
            let s = String::from_utf8(std::mem::take(&mut self.buf)).unwrap();
            self.process(&s);
            self.writes += 1;
        }
        Ok(())
    }
}

fn term_bar(max: i64) -> ProgressBar<VirtualTerm> {
    ProgressBar::new(max).with_writer(VirtualTerm::new())
}

#[test]
fn test_virtual_term() {
    let mut term = VirtualTerm::new();
    write!(term, "\rhello\rj").unwrap();
    term.flush().unwrap();
    assert_eq!(term.render(), "jello");
}

#[test]
fn test_each_update_redraws_in_place() {
    let mut bar = term_bar(3).format("%curr%/%max%");
    bar.step();
    bar.step();
    bar.step();
    let term = bar.into_inner();
    assert_eq!(term.writes, 3);
    assert_eq!(term.render(), "3/3");
}

#[test]
fn test_shorter_line_leaves_tail() {
    let mut bar = term_bar(100).format("%curr%");
    bar.set_progress(100);
    bar.set_progress(7);
    assert_eq!(bar.into_inner().render(), "700");
}

#[test]
fn test_full_default_line() {
    let mut bar = term_bar(8).bar_size(8);
    let t0 = bar.start_time_for_test();
    bar.set_progress_at(8, t0 + Duration::from_secs(2));
    assert_eq!(
        bar.into_inner().render(),
        "100.00% |■■■■■■■■| 8/8 [00:00.00, 2.00it/s]"
    );
}

#[test]
fn test_sequence_iteration_screen() {
    let words = ["parse", "check", "emit"];
    let bar = term_bar(3).format(r"%prog%\% %curr%/%max%");
    let mut seen = Vec::new();
    let mut it = words.progress_with(bar);
    for word in it.by_ref() {
        seen.push(*word);
    }
    assert_eq!(seen, words);
    let term = it.into_bar().into_inner();
    assert_eq!(term.writes, 3);
    assert_eq!(term.render(), "100.00% 3/3");
}

#[test]
fn test_range_iteration_screen() {
    let mut it: RangeIter<VirtualTerm> = step_range(0, 10, 2).with_writer(VirtualTerm::new());
    assert_eq!(it.by_ref().sum::<i64>(), 20);
    let bar = it.into_bar();
    assert_eq!(bar.progress(), 5);
    assert!(bar.into_inner().render().contains("| 5/5 ["));
}

#[test]
fn test_custom_glyph_and_width() {
    let mut bar = term_bar(4).format("[%bar%]").bar_size(4).bar_char("=");
    bar.set_progress(3);
    assert_eq!(bar.into_inner().render(), "[=== ]");
}
