//! The async operator family: same semantics, suspending bodies.

use std::sync::Arc;

use super::common::{assert_progress, collecting_supervisor, message, step};
use crate::{async_body, CollectingSink, Config, Severity, Supervisor};

#[tokio::test]
async fn async_steps_nest_and_deduplicate() {
    let (mut sup, sink) = collecting_supervisor();
    let a = step("A");
    let a_again = a.clone();

    let ran = sup
        .effectuate_async(
            a,
            async_body(|sup| {
                Box::pin(async move {
                    tokio::task::yield_now().await;
                    sup.effectuate_async(step("B"), async_body(|_| Box::pin(async move { 1 })))
                        .await
                })
            }),
        )
        .await;
    assert_eq!(ran, Some(Some(1)));

    let skipped = sup
        .effectuate_async(a_again, async_body(|_| Box::pin(async move { 2 })))
        .await;
    assert_eq!(skipped, None);

    assert_progress(
        &sink,
        &[
            ">> STEP A@f1",
            ">> STEP B@f1",
            "<< DONE STEP B@f1 (duration:",
            "<< DONE STEP A@f1 (duration:",
        ],
    );
}

#[tokio::test]
async fn async_force_reruns_a_step() {
    let (mut sup, _sink) = collecting_supervisor();
    sup.effectuate_async(step("once"), async_body(|_| Box::pin(async {})))
        .await;

    let reran = sup
        .force_async(async_body(|sup| {
            Box::pin(async move {
                sup.effectuate_async(step("once"), async_body(|_| Box::pin(async { 9 })))
                    .await
            })
        }))
        .await;
    assert_eq!(reran, Some(9));
}

#[tokio::test]
async fn async_appease_caps_like_the_sync_family() {
    let (mut sup, sink) = collecting_supervisor();
    let fatal = message(Severity::Fatal, "async failure");

    sup.appease_errors_async(async_body(|sup| {
        Box::pin(async move {
            sup.log(&fatal, &[]);
        })
    }))
    .await;

    assert_eq!(sink.events()[0].severity, Severity::Error);
    assert!(!sup.stopped());
}

#[tokio::test]
async fn async_disremember_restores_the_dedup_set() {
    let (mut sup, _sink) = collecting_supervisor();
    sup.disremember_async(async_body(|sup| {
        Box::pin(async move {
            sup.effectuate_async(step("transient"), async_body(|_| Box::pin(async {})))
                .await;
        })
    }))
    .await;
    assert!(!sup.has_executed(&step("transient")));
}

#[tokio::test]
async fn async_optional_and_dispensable_mirror_the_sync_rules() {
    let config = Config::new("app").activate_option("on").dispense_with("off");
    let sink = Arc::new(CollectingSink::new());
    let mut sup = Supervisor::new(config, sink.clone());

    let ran = sup
        .optional_async("on", async_body(|_| Box::pin(async { 1 })))
        .await;
    assert_eq!(ran, Some(1));

    let skipped = sup
        .dispensable_async("off", async_body(|_| Box::pin(async { 2 })))
        .await;
    assert_eq!(skipped, None);

    let facts = sink.english_facts_at(Severity::Progress);
    assert_eq!(
        facts,
        vec![
            ">> START OPTIONAL PART \"on\"",
            "<< DONE OPTIONAL PART \"on\"",
            "DISPENSABLE PART \"off\" DEACTIVATED",
        ]
    );
}

#[tokio::test]
async fn async_doing_brackets_across_awaits() {
    let (mut sup, sink) = collecting_supervisor();
    sup.doing_async(
        "fetching remote state",
        async_body(|sup| {
            Box::pin(async move {
                tokio::task::yield_now().await;
                assert_eq!(sup.effectuation_stack().len(), 1);
            })
        }),
    )
    .await;

    assert!(sup.effectuation_stack().is_empty());
    assert_progress(
        &sink,
        &[
            "START DOING fetching remote state",
            "DONE DOING fetching remote state",
        ],
    );
}

/// Async entries do not observe the pause gate.
#[tokio::test]
async fn async_steps_ignore_the_pause_gate() {
    let (mut sup, _sink) = collecting_supervisor();
    sup.pause();
    let ran = sup
        .effectuate_async(step("free"), async_body(|_| Box::pin(async { 5 })))
        .await;
    assert_eq!(ran, Some(5));
    sup.proceed();
}

/// A stopped execution skips async step entries too.
#[tokio::test]
async fn async_steps_skip_after_stop() {
    let (mut sup, sink) = collecting_supervisor();
    sup.log(&message(Severity::Fatal, "halt"), &[]);

    let ran = sup
        .effectuate_async(step("after"), async_body(|_| Box::pin(async { 1 })))
        .await;
    assert_eq!(ran, None);
    assert_eq!(sink.english_facts_at(Severity::Debug).len(), 1);
}
