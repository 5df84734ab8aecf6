//! Driving a bar from `tracing` events.

use std::time::Duration;

use tally_bar::*;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    let bar = ProgressBar::new(50).format("downloading %curr%/%max% [%eta%]");
    tracing_subscriber::registry()
        .with(progress_layer(bar).with_target("download"))
        .init();

    for chunk in 1..=50 {
        std::thread::sleep(Duration::from_millis(40));
        tracing::info!(target: "download", progress = chunk);
    }
    println!();
}
