//! # Demo: crash_logger
//!
//! A file-backed crash sink next to the main pipeline: flagged events are
//! on disk, flushed, before `log` returns, so they survive a hard crash.
//!
//! Demonstrates how to:
//! - Compose a main pipeline from [`MultiSink`], [`PrefixSink`] and a
//!   background file writer.
//! - Attach a [`CrashSink`] over a blocking [`FileSink`].
//! - Route one event to both destinations with `add_crash_info`.
//!
//! ## Flow
//! ```text
//! log(event, add_crash_info = true)
//!     ├─► CrashSink ──► crash.log      (synchronous, flushed)
//!     └─► MultiSink
//!           ├─► PrintSink              (stdout)
//!           └─► BackgroundSink ──► events.log
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example crash_logger
//! ```

use std::sync::Arc;

use stepvisor::{
    BackgroundSink, Config, CrashSink, FileSink, LocalizedText, Message, MultiSink, PrintSink,
    Severity, SeverityFilter, StepId, Supervisor,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = stepvisor::util::ScratchDir::new("crash-logger-demo")?;

    // Main pipeline: stdout plus a background file writer.
    let file = Arc::new(FileSink::blocking(dir.file("events.log"))?);
    let background = Arc::new(BackgroundSink::wrapping(SeverityFilter::default(), file)?);
    let main = Arc::new(MultiSink::new(vec![
        Arc::new(PrintSink::new()),
        background,
    ]));

    // Crash pipeline: synchronous blocking file, flushed per event.
    let crash_file = Arc::new(FileSink::blocking(dir.file("crash.log"))?);
    let crash = Arc::new(CrashSink::wrapping(SeverityFilter::default(), crash_file));

    let config = Config::new("crash-demo").with_process_id(std::process::id());
    let mut sup = Supervisor::new(config, main).with_crash_sink(crash);

    let corrupt = Message::new(
        Severity::Error,
        LocalizedText::english("checksum mismatch in $1"),
    );

    sup.effectuate(StepId::new("crash_logger", "verify"), |sup| {
        // Flagged: reaches crash.log synchronously before this call returns.
        sup.log_at(&corrupt, Some("block 12"), true, &["segment-3"]);
    });

    let on_disk = std::fs::read_to_string(dir.file("crash.log"))?;
    println!("crash.log carries {} line(s)", on_disk.lines().count());

    sup.close_sinks()?;
    Ok(())
}
