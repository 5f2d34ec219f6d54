//! Pause gate semantics.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use super::common::{collecting_supervisor, step};
use crate::PauseGate;

#[test]
fn checkpoint_passes_an_open_gate() {
    let gate = PauseGate::new();
    assert!(!gate.is_paused());
    gate.checkpoint();
}

#[test]
fn checkpoint_blocks_until_proceed() {
    let gate = std::sync::Arc::new(PauseGate::new());
    gate.pause();
    assert!(gate.is_paused());

    let (done_tx, done_rx) = mpsc::channel();
    let waiter_gate = gate.clone();
    let waiter = thread::spawn(move || {
        waiter_gate.checkpoint();
        done_tx.send(()).ok();
    });

    assert!(
        done_rx.recv_timeout(Duration::from_millis(100)).is_err(),
        "checkpoint must block while paused"
    );

    gate.proceed();
    assert!(done_rx.recv_timeout(Duration::from_secs(5)).is_ok());
    waiter.join().unwrap();
}

/// A paused supervisor halts its worker thread at the next step entry and
/// resumes where it stopped once the controller proceeds.
#[test]
fn paused_supervisor_halts_at_step_entry() {
    let (mut sup, sink) = collecting_supervisor();
    let gate = sup.pause_gate();
    sup.pause();

    let (done_tx, done_rx) = mpsc::channel();
    let worker = thread::spawn(move || {
        sup.effectuate(step("gated"), |_| {});
        done_tx.send(()).ok();
    });

    assert!(
        done_rx.recv_timeout(Duration::from_millis(100)).is_err(),
        "step entry must wait on the gate"
    );

    gate.proceed();
    assert!(done_rx.recv_timeout(Duration::from_secs(5)).is_ok());
    worker.join().unwrap();

    let progress = sink.english_facts_at(crate::Severity::Progress);
    assert!(progress[0].starts_with(">> STEP gated@f1"));
}

/// The checkpoint releases immediately: one proceed unblocks every later
/// step entry, not just the first.
#[test]
fn checkpoint_does_not_reacquire_the_slot() {
    let (mut sup, _sink) = collecting_supervisor();
    sup.pause();
    sup.proceed();
    sup.effectuate(step("one"), |_| {});
    sup.effectuate(step("two"), |_| {});
}
