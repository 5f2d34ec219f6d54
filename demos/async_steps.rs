//! # Demo: async_steps
//!
//! The async operator family: the same step tree with suspending bodies.
//!
//! Demonstrates how to:
//! - Drive `effectuate_async` under a tokio runtime.
//! - Pass bodies through [`async_body`] so the boxed-future signature
//!   needs no lifetime annotations at the call site.
//! - Mix awaits with nested operators while dedup still applies.
//!
//! ## Run
//! ```bash
//! cargo run --example async_steps
//! ```

use std::sync::Arc;
use std::time::Duration;

use stepvisor::{async_body, Config, PrintSink, StepId, Supervisor};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sink = Arc::new(PrintSink::new().with_step_indentation());
    let mut sup = Supervisor::new(Config::new("async-demo"), sink);

    sup.effectuate_async(
        StepId::new("async_steps", "sync_remote"),
        async_body(|sup| {
            Box::pin(async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                sup.effectuate_async(
                    StepId::new("async_steps", "fetch_page"),
                    async_body(|_| Box::pin(async { 3 })),
                )
                .await;

                // Deduplicated: same identity as above.
                let skipped = sup
                    .effectuate_async(
                        StepId::new("async_steps", "fetch_page"),
                        async_body(|_| Box::pin(async { 4 })),
                    )
                    .await;
                assert!(skipped.is_none());
            })
        }),
    )
    .await;

    println!("worst severity: {}", sup.worst_severity());
    sup.close_sinks()?;
    Ok(())
}
