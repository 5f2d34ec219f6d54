//! Appease, stopped propagation, panic cleanup and worst severity.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use super::common::{collecting_supervisor, message, step};
use crate::{CollectingSink, Config, Effectuation, Severity, Supervisor};

/// A `Fatal` logged inside `appease(Error)` reaches the main sink as
/// `Error`, reaches the crash sink with its original severity, and does
/// not stop the execution.
#[test]
fn appease_caps_main_sink_but_not_crash_sink() {
    let main = Arc::new(CollectingSink::new());
    let crash = Arc::new(CollectingSink::new());
    let mut sup =
        Supervisor::new(Config::new("app"), main.clone()).with_crash_sink(crash.clone());

    let disk_failure = message(Severity::Fatal, "disk gave up");
    sup.appease(Severity::Error, |sup| {
        sup.log_at(&disk_failure, None, true, &[]);
    });

    assert_eq!(main.events()[0].severity, Severity::Error);
    assert_eq!(crash.events()[0].severity, Severity::Fatal);
    assert!(!sup.stopped());
    assert_eq!(sup.worst_severity(), Severity::Error);
}

/// Without an appease frame the crash sink and main sink agree.
#[test]
fn crash_routing_preserves_severity_without_appease() {
    let main = Arc::new(CollectingSink::new());
    let crash = Arc::new(CollectingSink::new());
    let sup = Supervisor::new(Config::new("app"), main.clone()).with_crash_sink(crash.clone());

    sup.log_at(&message(Severity::Error, "plain failure"), None, true, &[]);
    assert_eq!(main.events()[0].severity, Severity::Error);
    assert_eq!(crash.events()[0].severity, Severity::Error);
}

/// Only flagged events reach the crash sink unless the supervisor is
/// configured with `always_add_crash_info`.
#[test]
fn crash_sink_receives_only_flagged_events() {
    let main = Arc::new(CollectingSink::new());
    let crash = Arc::new(CollectingSink::new());
    let sup = Supervisor::new(Config::new("app"), main.clone()).with_crash_sink(crash.clone());

    sup.log(&message(Severity::Error, "not flagged"), &[]);
    sup.log_at(&message(Severity::Error, "flagged"), None, true, &[]);

    assert_eq!(main.len(), 2);
    assert_eq!(crash.english_facts(), vec!["flagged".to_string()]);
}

#[test]
fn always_add_crash_info_routes_everything() {
    let main = Arc::new(CollectingSink::new());
    let crash = Arc::new(CollectingSink::new());
    let config = Config::new("app").with_always_add_crash_info();
    let sup = Supervisor::new(config, main).with_crash_sink(crash.clone());

    sup.log(&message(Severity::Info, "routine"), &[]);
    assert_eq!(crash.len(), 1);
}

/// Reaching `Fatal` turns later step entries into single-`Debug` skips.
#[test]
fn fatal_stops_later_step_entries() {
    let (mut sup, sink) = collecting_supervisor();
    sup.log(&message(Severity::Fatal, "boom"), &[]);
    assert!(sup.stopped());

    let ran = sup.effectuate(step("next"), |_| 7);
    assert_eq!(ran, None);

    let debugs = sink.english_facts_at(Severity::Debug);
    assert_eq!(debugs.len(), 1);
    assert!(debugs[0].starts_with("SKIPPING STEP next@f1"));
    assert!(sink.english_facts_at(Severity::Progress).is_empty());
}

/// A step whose body stops the execution closes with `ABORDED`.
#[test]
fn stopping_inside_a_step_closes_with_aborded() {
    let (mut sup, sink) = collecting_supervisor();
    let doomed = message(Severity::Fatal, "lost the database");

    sup.effectuate(step("doomed"), |sup| {
        sup.log(&doomed, &[]);
    });

    let progress = sink.english_facts_at(Severity::Progress);
    assert!(progress[0].starts_with(">> STEP doomed@f1"));
    assert!(progress[1].starts_with("<< ABORDED STEP doomed@f1 (duration:"));
}

/// Panics propagate out of nested operators after the stacks were
/// restored, and the step still closes its progress bracket.
#[test]
fn panic_restores_stacks_and_propagates() {
    let (mut sup, sink) = collecting_supervisor();

    let outcome = std::panic::catch_unwind(AssertUnwindSafe(|| {
        sup.effectuate(step("explode"), |sup| {
            sup.doing("risky part", |_| panic!("boom"));
        })
    }));
    assert!(outcome.is_err());
    assert!(sup.effectuation_stack().is_empty());

    let progress = sink.english_facts_at(Severity::Progress);
    assert!(progress.last().unwrap().starts_with("<< ABORDED STEP explode@f1"));

    // The supervisor is intact and usable afterwards.
    let ran = sup.effectuate(step("recovery"), |_| 1);
    assert_eq!(ran, Some(1));
}

/// The open and close progress events bracket everything logged from
/// within the body, in delivery order on the same sink.
#[test]
fn step_events_bracket_the_bodys_events() {
    let (mut sup, sink) = collecting_supervisor();
    sup.effectuate(step("outer"), |sup| {
        sup.log(&message(Severity::Info, "first"), &[]);
        sup.log(&message(Severity::Info, "second"), &[]);
    });

    let facts = sink.english_facts();
    assert!(facts[0].starts_with(">> STEP outer@f1"));
    assert_eq!(facts[1], "first");
    assert_eq!(facts[2], "second");
    assert!(facts[3].starts_with("<< DONE STEP outer@f1"));
}

/// Events inside a step carry the step frame; the open/close events
/// themselves carry the surrounding (pre-push) stack.
#[test]
fn step_open_and_close_use_the_surrounding_stack() {
    let (mut sup, sink) = collecting_supervisor();
    sup.effectuate(step("outer"), |sup| {
        sup.log(&message(Severity::Info, "inside"), &[]);
    });

    let events = sink.events();
    assert_eq!(events[0].execution_level(), 0); // ">> STEP"
    assert_eq!(events[1].execution_level(), 1); // "inside"
    assert_eq!(events[2].execution_level(), 0); // "<< DONE STEP"
}

/// The worst-severity cell is the maximum of the delivered severities,
/// starting at `Info`.
#[test]
fn worst_severity_is_the_delivered_maximum() {
    let (sup, _sink) = collecting_supervisor();
    assert_eq!(sup.worst_severity(), Severity::Info);

    sup.log(&message(Severity::Debug, "detail"), &[]);
    assert_eq!(sup.worst_severity(), Severity::Info);

    sup.log(&message(Severity::Warning, "wobble"), &[]);
    sup.log(&message(Severity::Iteration, "row 7"), &[]);
    assert_eq!(sup.worst_severity(), Severity::Warning);
}

/// Direct merges are bounded by the innermost appease cap.
#[test]
fn update_worst_severity_respects_the_appease_cap() {
    let (mut sup, _sink) = collecting_supervisor();
    sup.appease(Severity::Warning, |sup| {
        sup.update_worst_severity(Severity::Fatal);
    });
    assert_eq!(sup.worst_severity(), Severity::Warning);
    assert!(!sup.stopped());
}

/// Nested appease frames: the innermost cap applies.
#[test]
fn innermost_appease_cap_applies() {
    let (mut sup, sink) = collecting_supervisor();
    let fatal = message(Severity::Fatal, "deep failure");
    sup.appease(Severity::Error, |sup| {
        sup.appease(Severity::Warning, |sup| {
            sup.log(&fatal, &[]);
        });
    });
    assert_eq!(sink.events()[0].severity, Severity::Warning);
}

/// Parallel siblings share the sinks and the worst-severity cell but not
/// the dedup set or the effectuation stack.
#[test]
fn parallel_sibling_shares_status_but_not_dedup() {
    let (mut sup, sink) = collecting_supervisor();
    let a = step("A");
    sup.effectuate(a.clone(), |_| {});

    let mut sibling = sup.parallel();
    assert!(!sibling.has_executed(&a));
    assert_eq!(sibling.effectuation_stack().len(), 0);

    let worker = std::thread::spawn(move || {
        let reran = sibling.effectuate(step("A"), |_| {});
        assert!(reran.is_some());
        sibling.log(&message(Severity::Error, "worker failed"), &[]);
    });
    worker.join().unwrap();

    assert_eq!(sup.worst_severity(), Severity::Error);
    assert!(sink
        .english_facts()
        .iter()
        .any(|fact| fact == "worker failed"));
}

/// A sibling forked inside a step starts from the parent's stack snapshot.
#[test]
fn parallel_sibling_snapshots_the_effectuation_stack() {
    let (mut sup, _sink) = collecting_supervisor();
    sup.effectuate(step("outer"), |sup| {
        let sibling = sup.parallel();
        assert_eq!(sibling.effectuation_stack().len(), 1);
        assert!(matches!(
            sibling.effectuation_stack()[0],
            Effectuation::Step(_)
        ));
    });
}
