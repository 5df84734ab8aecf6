//! Consuming a range from async code.

use std::time::Duration;

use tally_bar::*;

#[tokio::main]
async fn main() {
    let mut rx = range(0, 100).stream_async();
    while let Some(_i) = rx.recv().await {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    println!();
}
