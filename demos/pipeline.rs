//! # Demo: pipeline
//!
//! A work item with optional and dispensable parts, driven by name sets,
//! plus a described part and an appeased region.
//!
//! Demonstrates how to:
//! - Activate optional parts and dispense with default parts by name.
//! - Bracket free-form work with `doing`.
//! - Cap severities in a region with `appease_errors` so a `Fatal` inside
//!   it degrades to `Error` and the execution keeps going.
//!
//! ## Run
//! ```bash
//! cargo run --example pipeline
//! ```

use std::sync::Arc;

use stepvisor::{
    Config, LocalizedText, Message, PrintSink, Severity, StepId, Supervisor,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::new("pipeline-demo")
        .with_item_info("batch-42")
        .activate_option("export:csv")
        .dispense_with("thumbnails");

    let mut sup = Supervisor::new(config, Arc::new(PrintSink::new().with_step_indentation()));

    let unreadable = Message::new(
        Severity::Fatal,
        LocalizedText::english("archive member $1 is unreadable"),
    )
    .with_solution(LocalizedText::english("re-download the archive"));

    sup.effectuate(StepId::new("pipeline", "run"), |sup| {
        // Runs: activated by name.
        sup.optional("export:csv", |sup| {
            sup.doing("writing rows", |_| {});
        });

        // Skipped: never activated.
        sup.optional("export:xml", |_| {});

        // Skipped: dispensed with by name.
        sup.dispensable("thumbnails", |_| {});

        // A fatal inside the appeased region is delivered as Error and
        // does not stop the execution.
        sup.appease_errors(|sup| {
            sup.log(&unreadable, &["member-7.bin"]);
        });
    });

    assert!(!sup.stopped());
    println!("worst severity: {}", sup.worst_severity());
    sup.close_sinks()?;
    Ok(())
}
