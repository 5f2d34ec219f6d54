//! Utility helpers: clock, scratch dirs, step-id macro, attached data.

use std::time::Instant;

use super::common::collecting_supervisor;
use crate::util::{elapsed_nanos, monotonic_millis, ScratchDir};

#[test]
fn monotonic_millis_never_decreases() {
    let mut previous = monotonic_millis();
    for _ in 0..1_000 {
        let now = monotonic_millis();
        assert!(now >= previous);
        previous = now;
    }
}

#[test]
fn elapsed_nanos_measures_forward_time() {
    let start = Instant::now();
    std::thread::sleep(std::time::Duration::from_millis(5));
    assert!(elapsed_nanos(start) >= 5_000_000);
}

#[test]
fn scratch_dir_is_removed_on_drop() {
    let kept_path;
    {
        let dir = ScratchDir::new("stepvisor-scratch").unwrap();
        kept_path = dir.path().to_path_buf();
        std::fs::write(dir.file("inner.txt"), "contents").unwrap();
        assert!(kept_path.exists());
    }
    assert!(!kept_path.exists());
}

#[test]
fn scratch_dirs_do_not_collide() {
    let first = ScratchDir::new("stepvisor-unique").unwrap();
    let second = ScratchDir::new("stepvisor-unique").unwrap();
    assert_ne!(first.path(), second.path());
}

#[test]
fn step_id_macro_uses_the_current_file() {
    let id = crate::step_id!("helper()");
    assert_eq!(id.signature(), "helper()");
    assert!(id.file().ends_with("util.rs"));
}

#[test]
fn attached_values_come_back_typed() {
    let (mut sup, _sink) = collecting_supervisor();
    sup.attach("retries", 3u32);
    sup.attach("label", "first pass".to_string());

    assert_eq!(sup.attached::<u32>("retries"), Some(&3));
    assert_eq!(
        sup.attached::<String>("label").map(String::as_str),
        Some("first pass")
    );
    // Wrong type or missing key: no value.
    assert_eq!(sup.attached::<u64>("retries"), None);
    assert_eq!(sup.attached::<u32>("absent"), None);

    // Re-attaching replaces.
    sup.attach("retries", 5u32);
    assert_eq!(sup.attached::<u32>("retries"), Some(&5));
}
