//! Example demonstrating usage of the `FairMutex` from the `axiom-fairlock`
//! crate.
//!
//! This program spawns 3 threads, each incrementing a shared counter a
//! thousand times. The counter is protected by a `FairMutex<i64>`, so the
//! increments are admitted in strict arrival order and none are lost.
//!
//! Run with `RUST_LOG=axiom_fairlock=trace` to watch the handoff between
//! threads.

use axiom_fairlock::FairMutex;
use log::info;
use std::thread;

// Shared static fair lock protecting a 64-bit counter.
static COUNTER: FairMutex<i64> = FairMutex::new(0);

const THREADS: usize = 3;
const INCREMENTS: usize = 1000;

fn setup_logger() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "axiom_fairlock=info");
    }
    env_logger::init();
}

/// Increment the shared counter a thousand times.
/// Each increment waits its turn in the admission queue before mutating.
fn add() {
    for _ in 0..INCREMENTS {
        *COUNTER.lock() += 1;
    }
    info!("{:?} finished its increments", thread::current().id());
}

fn main() {
    setup_logger();
    println!("Starting fair lock test...");

    // Spawn the worker threads performing concurrent increments.
    let mut threads = Vec::with_capacity(THREADS);
    for _ in 0..THREADS {
        threads.push(thread::spawn(add));
    }

    // Wait for all threads to finish.
    for t in threads {
        let _ = t.join();
    }

    // Display the final result.
    println!(
        "Final counter value: {} (expected {})",
        *COUNTER.lock(),
        (THREADS * INCREMENTS) as i64
    );
}
