//! # Demo: parallel
//!
//! Two sibling supervisors working one item from different threads,
//! sharing the sinks and the worst-severity cell.
//!
//! Demonstrates how to:
//! - Fork a sibling with [`Supervisor::parallel`].
//! - Let both sides execute the same step identity independently (the
//!   dedup set is per supervisor).
//! - Read the shared outcome after joining.
//!
//! ## Run
//! ```bash
//! cargo run --example parallel
//! ```

use std::sync::Arc;

use stepvisor::{Config, LocalizedText, Message, PrintSink, Severity, StepId, Supervisor};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sink = Arc::new(PrintSink::new());
    let mut sup = Supervisor::new(Config::new("parallel-demo"), sink);

    let wobble = Message::new(
        Severity::Warning,
        LocalizedText::english("retrying shard $1"),
    );

    sup.effectuate(StepId::new("parallel", "plan"), |_| {});

    // The sibling gets its own dedup set and pause gate; "plan" may run
    // again over there.
    let mut sibling = sup.parallel();
    let worker = std::thread::spawn(move || {
        sibling.effectuate(StepId::new("parallel", "plan"), |sup| {
            sup.log(&wobble, &["7"]);
        });
    });
    worker.join().expect("worker thread panicked");

    // The warning logged by the sibling is visible in the shared cell.
    assert_eq!(sup.worst_severity(), Severity::Warning);
    println!("worst severity: {}", sup.worst_severity());
    sup.close_sinks()?;
    Ok(())
}
