//! Example: pick the subset of a batch of file sizes that best fills a disk.
//!
//! Run with:
//! `cargo run --example closest_subset`

use std::time::Duration;

use approx_subsetsum::{SolveError, SolverBuilder};

fn main() {
    // Sizes in MiB.
    let files = [734u32, 4_480, 1_200, 650, 2_048, 3_100, 512, 900];
    let disc = 4_700;

    let solver = SolverBuilder::new(disc)
        .with_deadline(Duration::from_secs(1))
        .build()
        .expect("valid configuration");

    match solver.solve(&files) {
        Ok(selection) => {
            println!("Fill: {} / {disc} MiB", selection.selected_sum());
            for &i in selection.indices() {
                println!("  file #{i}: {} MiB", files[i]);
            }
        }
        Err(SolveError::Timeout { elapsed, .. }) => {
            println!("gave up after {elapsed:?}");
        }
        Err(err) => println!("no selection: {err}"),
    }

    // With a little slack the solver may overshoot when that lands closer.
    let relaxed = SolverBuilder::new(disc)
        .with_slack(50)
        .build()
        .expect("valid configuration");
    if let Ok(selection) = relaxed.solve(&files) {
        println!("With 50 MiB slack: {} MiB", selection.selected_sum());
    }
}
