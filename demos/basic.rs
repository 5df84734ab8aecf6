//! The three ways to drive a bar: by hand, over a slice and over a range.

use std::time::Duration;

use tally_bar::*;

fn main() {
    let mut bar = ProgressBar::new(120).bar_size(40);
    for _ in 0..120 {
        std::thread::sleep(Duration::from_millis(15));
        bar.step();
    }
    println!();

    let crates = ["indexmap", "tracing", "tracing-subscriber", "tokio"];
    let bar = ProgressBar::new(crates.len() as i64)
        .format(r"%prog%\% [%bar%] %curr%/%max% crates")
        .bar_size(20)
        .bar_char("#");
    for _name in crates.progress_with(bar) {
        std::thread::sleep(Duration::from_millis(400));
    }
    println!();

    for _ in step_range(300, 0, -3) {
        std::thread::sleep(Duration::from_millis(10));
    }
    println!();
}
