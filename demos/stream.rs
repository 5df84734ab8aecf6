//! Producing on a background thread while the main thread consumes.

use std::time::Duration;

use tally_bar::*;

fn main() {
    let mut checksum = 0i64;
    for i in range(0, 200).stream() {
        std::thread::sleep(Duration::from_millis(10));
        checksum += i;
    }
    println!();
    println!("checksum {checksum}");

    // Abandoning the stream early stops the producer.
    let first: Vec<i64> = range(0, 1_000_000).stream().take(5).collect();
    println!();
    println!("first {first:?}");
}
