//! # Demo: basic
//!
//! Minimal run of a step tree under a supervisor, logging to stdout.
//!
//! Demonstrates how to:
//! - Build a [`Supervisor`] over a [`PrintSink`].
//! - Fence nested work with `effectuate` and watch dedup kick in.
//! - Read the worst severity after the work item completed.
//!
//! ## Flow
//! ```text
//! Supervisor::effectuate("import")
//!     ├─► ">> STEP import@basic"
//!     ├─► effectuate("parse")   ──► runs once
//!     ├─► effectuate("parse")   ──► deduplicated, skipped
//!     └─► "<< DONE STEP import@basic"
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example basic
//! ```

use std::sync::Arc;

use stepvisor::{Config, LocalizedText, Message, PrintSink, Severity, StepId, Supervisor};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. A print sink with indentation makes the nesting visible
    let sink = Arc::new(PrintSink::new().with_step_indentation());

    // 2. One supervisor per work item
    let config = Config::new("basic-demo").with_process_id(std::process::id());
    let mut sup = Supervisor::new(config, sink);

    let rows = Message::new(Severity::Info, LocalizedText::english("parsed $1 rows"));

    // 3. Nested steps; the second "parse" entry is deduplicated
    sup.effectuate(StepId::new("basic", "import"), |sup| {
        sup.effectuate(StepId::new("basic", "parse"), |sup| {
            sup.log(&rows, &["128"]);
        });
        let skipped = sup.effectuate(StepId::new("basic", "parse"), |_| {});
        assert!(skipped.is_none());
    });

    // 4. The worst severity is the outcome of the work item
    println!("worst severity: {}", sup.worst_severity());
    sup.close_sinks()?;
    Ok(())
}
