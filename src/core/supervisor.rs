//! # Supervisor: drives the step tree of one work item.
//!
//! The [`Supervisor`] owns the execution context (effectuation stack,
//! force/appease stacks, dedup set) and the sink handles, and exposes the
//! structured operators user code nests to fence its work.
//!
//! ## Architecture
//! ```text
//! user closure ──► effectuate(step, body)
//!                      │
//!                      ├──► dedup check (executed set, force stack)
//!                      ├──► pause-gate checkpoint
//!                      ├──► ">> STEP" progress event
//!                      ├──► push frames ──► body(self) ──► pop frames
//!                      └──► "<< DONE STEP" / "<< ABORDED STEP"
//!
//! log(message) ──► compose event ──► crash sink (original severity)
//!                                ──► appease rewrite ──► main sink
//!                                ──► worst-severity merge
//! ```
//!
//! ## Rules
//! - One supervisor per work item; one owner at a time. Parallel work goes
//!   through [`Supervisor::parallel`] siblings, never shared references.
//! - Every operator restores the context stacks on every exit path,
//!   panics included; the panic then propagates unchanged.
//! - Reaching `Fatal` in the worst-severity cell stops the execution:
//!   later step entries skip with a single `Debug` event.
//! - Step open/close progress events bracket everything emitted from
//!   within the body.

use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::core::pause::PauseGate;
use crate::core::worst::WorstSeverity;
use crate::error::SinkError;
use crate::events::{Effectuation, LoggingEvent, StepId};
use crate::messages::{LocalizedText, Message};
use crate::severity::Severity;
use crate::sinks::SinkRef;

/// Hook invoked around step entries: `(operation_count, step) → accepted`.
///
/// The counter is pre-incremented; returning `false` rolls it back, so it
/// counts only accepted invocations. Hooks run inline with the operator
/// and must not call back into the supervisor.
pub type StepHook = Box<dyn FnMut(u64, &StepId) -> bool + Send>;

/// Execution supervisor for a single work item.
///
/// ## Example
/// ```
/// use std::sync::Arc;
/// use stepvisor::{CollectingSink, Config, StepId, Supervisor};
///
/// let sink = Arc::new(CollectingSink::new());
/// let mut sup = Supervisor::new(Config::new("app"), sink.clone());
///
/// let parse = StepId::new("input", "parse()");
/// let ran = sup.effectuate(parse.clone(), |_| 42);
/// assert_eq!(ran, Some(42));
///
/// // Same identity again: deduplicated.
/// let again = sup.effectuate(parse, |_| 42);
/// assert_eq!(again, None);
/// ```
pub struct Supervisor {
    config: Config,
    sink: SinkRef,
    crash_sink: Option<SinkRef>,
    executed_steps: HashSet<StepId>,
    effectuation_stack: Vec<Effectuation>,
    force_stack: Vec<bool>,
    appease_stack: Vec<Severity>,
    before_step: Option<StepHook>,
    after_step: Option<StepHook>,
    operation_count: u64,
    worst: WorstSeverity,
    pause_gate: Arc<PauseGate>,
    attached: HashMap<String, Box<dyn Any + Send>>,
}

impl Supervisor {
    /// Creates a supervisor logging through `sink`.
    pub fn new(config: Config, sink: SinkRef) -> Self {
        Self {
            config,
            sink,
            crash_sink: None,
            executed_steps: HashSet::new(),
            effectuation_stack: Vec::new(),
            force_stack: Vec::new(),
            appease_stack: Vec::new(),
            before_step: None,
            after_step: None,
            operation_count: 0,
            worst: WorstSeverity::new(),
            pause_gate: Arc::new(PauseGate::new()),
            attached: HashMap::new(),
        }
    }

    /// Adds a crash sink; flagged events reach it synchronously with
    /// their original severity.
    pub fn with_crash_sink(mut self, sink: SinkRef) -> Self {
        self.crash_sink = Some(sink);
        self
    }

    /// Installs the hook run before each accepted step entry.
    pub fn set_before_step_hook(
        &mut self,
        hook: impl FnMut(u64, &StepId) -> bool + Send + 'static,
    ) {
        self.before_step = Some(Box::new(hook));
    }

    /// Installs the hook run after each step exit.
    pub fn set_after_step_hook(
        &mut self,
        hook: impl FnMut(u64, &StepId) -> bool + Send + 'static,
    ) {
        self.after_step = Some(Box::new(hook));
    }

    // ---- Introspection ----

    /// This supervisor's configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current worst severity of the execution.
    pub fn worst_severity(&self) -> Severity {
        self.worst.get()
    }

    /// Whether the execution has stopped (worst severity reached `Fatal`).
    pub fn stopped(&self) -> bool {
        self.worst.is_stopping()
    }

    /// Count of accepted hook invocations so far.
    pub fn operation_count(&self) -> u64 {
        self.operation_count
    }

    /// Snapshot view of the live effectuation stack, outermost first.
    pub fn effectuation_stack(&self) -> &[Effectuation] {
        &self.effectuation_stack
    }

    /// Whether `step` has executed (and not been disremembered) here.
    pub fn has_executed(&self, step: &StepId) -> bool {
        self.executed_steps.contains(step)
    }

    // ---- Operators ----

    /// Runs `body` as the step `step`, once per identity.
    ///
    /// Returns `None` without running the body when the execution has
    /// stopped (one `Debug` skip event) or when the step already executed
    /// and the innermost force frame is not set (a `Debug` skip event only
    /// when `debug` is configured).
    ///
    /// ### Rules
    /// - One `">> STEP"` and one closing progress event per executed
    ///   entry; the closing event reads `"<< ABORDED STEP"` when the
    ///   execution stopped inside the body or the body panicked.
    /// - The step and force frames are popped on every exit path; a panic
    ///   then resumes unchanged.
    pub fn effectuate<R>(&mut self, step: StepId, body: impl FnOnce(&mut Self) -> R) -> Option<R> {
        if !self.step_enter(&step, true) {
            return None;
        }
        let started = Instant::now();
        let outcome = self.guarded(body);
        match outcome {
            Ok(result) => {
                self.step_exit(&step, started, false);
                Some(result)
            }
            Err(panic) => {
                self.step_exit(&step, started, true);
                resume_unwind(panic)
            }
        }
    }

    /// Runs `body` with dedup disabled for directly nested step entries.
    ///
    /// Pushes `true` on the force stack for the duration of the body; no
    /// effectuation frame is added. Steps entered one level deeper push
    /// their own `false`, so forcing does not leak to grand-children (use
    /// [`inherit_forced`](Self::inherit_forced) for that).
    pub fn force<R>(&mut self, body: impl FnOnce(&mut Self) -> R) -> R {
        self.force_stack.push(true);
        let outcome = self.guarded(body);
        self.force_stack.pop();
        unwind_into(outcome)
    }

    /// Like [`force`](Self::force), but propagates the innermost force
    /// frame instead of setting it: inside a forced region this keeps
    /// forcing one level deeper, outside it is inert.
    pub fn inherit_forced<R>(&mut self, body: impl FnOnce(&mut Self) -> R) -> R {
        let inherited = self.current_force();
        self.force_stack.push(inherited);
        let outcome = self.guarded(body);
        self.force_stack.pop();
        unwind_into(outcome)
    }

    /// Runs `body` and forgets every step execution recorded inside it:
    /// the dedup set is restored to its pre-body snapshot on every exit
    /// path, so those steps may run again outside.
    pub fn disremember<R>(&mut self, body: impl FnOnce(&mut Self) -> R) -> R {
        let snapshot = self.snapshot_steps();
        let outcome = self.guarded(body);
        self.restore_steps(snapshot);
        unwind_into(outcome)
    }

    /// Runs `body` as the optional part `name`, only when activated.
    ///
    /// The body runs iff `name` is in the activated options and not
    /// dispensed with; dispensing always wins. A skipped part emits one
    /// `NOT ACTIVATED` progress event and returns `None`.
    pub fn optional<R>(&mut self, name: &str, body: impl FnOnce(&mut Self) -> R) -> Option<R> {
        if !self.optional_enter(name) {
            return None;
        }
        let outcome = self.guarded(body);
        match outcome {
            Ok(result) => {
                self.optional_exit(name, false);
                Some(result)
            }
            Err(panic) => {
                self.optional_exit(name, true);
                resume_unwind(panic)
            }
        }
    }

    /// Runs `body` as the dispensable part `name`, unless switched off.
    ///
    /// A dispensed part emits one `DEACTIVATED` progress event and
    /// returns `None`.
    pub fn dispensable<R>(&mut self, name: &str, body: impl FnOnce(&mut Self) -> R) -> Option<R> {
        if !self.dispensable_enter(name) {
            return None;
        }
        let outcome = self.guarded(body);
        match outcome {
            Ok(result) => {
                self.dispensable_exit(name, false);
                Some(result)
            }
            Err(panic) => {
                self.dispensable_exit(name, true);
                resume_unwind(panic)
            }
        }
    }

    /// Predicate form of [`dispensable`](Self::dispensable): reports
    /// whether the part would run, emitting the matching progress event,
    /// without running anything.
    pub fn dispensable_is_active(&self, name: &str) -> bool {
        if self.config.is_dispensed_with(name) {
            self.progress(format!("DISPENSABLE PART \"{name}\" DEACTIVATED"));
            false
        } else {
            self.progress(format!("DISPENSABLE PART \"{name}\" IS ACTIVE"));
            true
        }
    }

    /// Runs `body` with logged severities capped at `cap`.
    ///
    /// While the frame is active, events above `cap` are rewritten to
    /// `cap` on their way to the main sink and the worst-severity merge;
    /// the crash sink receives original severities. An appeased `Fatal`
    /// therefore does not stop the execution. Panics are not caught.
    pub fn appease<R>(&mut self, cap: Severity, body: impl FnOnce(&mut Self) -> R) -> R {
        self.appease_stack.push(cap);
        let outcome = self.guarded(body);
        self.appease_stack.pop();
        unwind_into(outcome)
    }

    /// [`appease`](Self::appease) with the conventional `Error` cap.
    pub fn appease_errors<R>(&mut self, body: impl FnOnce(&mut Self) -> R) -> R {
        self.appease(Severity::Error, body)
    }

    /// Runs `body` as a described part, bracketed by `START DOING` /
    /// `DONE DOING` progress events.
    pub fn doing<R>(&mut self, description: &str, body: impl FnOnce(&mut Self) -> R) -> R {
        self.doing_with_id(None, description, body)
    }

    /// [`doing`](Self::doing) with a message id stamped on the bracketing
    /// progress events.
    pub fn doing_with_id<R>(
        &mut self,
        id: Option<&str>,
        description: &str,
        body: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.doing_enter(id, description);
        let outcome = self.guarded(body);
        self.doing_exit(id, description, outcome.is_err());
        unwind_into(outcome)
    }

    // ---- Logging ----

    /// Logs `message` with positional arguments substituted into its
    /// localized texts.
    pub fn log(&self, message: &Message, args: &[&str]) {
        self.log_at(message, None, false, args);
    }

    /// Logs `message` with an item position and an explicit crash flag.
    ///
    /// ### Routing
    /// 1. When flagged (or `always_add_crash_info` is configured) and a
    ///    crash sink is set, the event goes there first, synchronously,
    ///    with its original severity.
    /// 2. The innermost appease cap rewrites the severity, if exceeded.
    /// 3. The event goes to the main sink.
    /// 4. The worst-severity cell merges the delivered severity.
    pub fn log_at(
        &self,
        message: &Message,
        position_info: Option<&str>,
        add_crash_info: bool,
        args: &[&str],
    ) {
        let event = LoggingEvent {
            message_id: message.id().map(str::to_string),
            severity: message.severity(),
            process_id: self.config.process_id,
            application_name: self.config.application_name.clone(),
            fact: message.fact().substitute(args),
            solution: message.solution().map(|solution| solution.substitute(args)),
            item_info: self.config.item_info.clone(),
            item_position_info: position_info.map(str::to_string),
            effectuation_stack: self.effectuation_stack.clone(),
            time: crate::util::monotonic_millis(),
        };
        self.route(event, add_crash_info);
    }

    /// Merges `severity` into the shared worst-severity cell, bounded
    /// above by the innermost appease cap.
    pub fn update_worst_severity(&self, severity: Severity) {
        let capped = match self.appease_stack.last() {
            Some(&cap) if severity > cap => cap,
            _ => severity,
        };
        self.worst.merge(capped);
    }

    // ---- Pause ----

    /// Acquires the pause slot: synchronous step entries block at their
    /// next checkpoint until [`proceed`](Self::proceed).
    pub fn pause(&self) {
        self.pause_gate.pause();
    }

    /// Releases the pause slot.
    pub fn proceed(&self) {
        self.pause_gate.proceed();
    }

    /// Handle to this supervisor's pause gate, for hosts that pause and
    /// resume from a controlling thread while the supervisor itself has
    /// moved to a worker.
    pub fn pause_gate(&self) -> Arc<PauseGate> {
        Arc::clone(&self.pause_gate)
    }

    // ---- Parallel ----

    /// Forks a sibling supervisor for use from another thread or task.
    ///
    /// The sibling shares the sinks, the worst-severity cell and the
    /// configuration, and starts from a snapshot of this supervisor's
    /// effectuation stack. It has its own empty dedup set, fresh
    /// force/appease stacks and its own pause gate.
    pub fn parallel(&self) -> Supervisor {
        Supervisor {
            config: self.config.clone(),
            sink: Arc::clone(&self.sink),
            crash_sink: self.crash_sink.clone(),
            executed_steps: HashSet::new(),
            effectuation_stack: self.effectuation_stack.clone(),
            force_stack: Vec::new(),
            appease_stack: Vec::new(),
            before_step: None,
            after_step: None,
            operation_count: 0,
            worst: self.worst.clone(),
            pause_gate: Arc::new(PauseGate::new()),
            attached: HashMap::new(),
        }
    }

    // ---- Attached user data ----

    /// Attaches an arbitrary value under `key`, replacing any previous one.
    pub fn attach(&mut self, key: impl Into<String>, value: impl Any + Send) {
        self.attached.insert(key.into(), Box::new(value));
    }

    /// Returns the value attached under `key`, when present with type `T`.
    pub fn attached<T: Any + Send>(&self, key: &str) -> Option<&T> {
        self.attached.get(key)?.downcast_ref()
    }

    // ---- Shutdown ----

    /// Closes the main sink, then the crash sink. Both are attempted; the
    /// first failure propagates.
    pub fn close_sinks(&self) -> Result<(), SinkError> {
        let main = self.sink.close();
        let crash = match &self.crash_sink {
            Some(sink) => sink.close(),
            None => Ok(()),
        };
        main.and(crash)
    }

    // ---- Shared machinery (also used by the async operator family) ----

    /// Checks, hooks and opens a step entry. Returns `false` when the
    /// entry is skipped; `true` after the frames have been pushed.
    pub(crate) fn step_enter(&mut self, step: &StepId, observe_gate: bool) -> bool {
        if self.stopped() {
            self.debug_event(format!("SKIPPING STEP {step} (execution is stopped)"));
            return false;
        }
        if self.executed_steps.contains(step) && !self.current_force() {
            if self.config.debug {
                self.debug_event(format!("SKIPPING STEP {step} (already executed)"));
            }
            return false;
        }
        run_step_hook(&mut self.operation_count, &mut self.before_step, step);
        if observe_gate {
            self.pause_gate.checkpoint();
        }
        self.progress(format!(">> STEP {step}"));
        self.effectuation_stack.push(Effectuation::Step(step.clone()));
        self.force_stack.push(false);
        self.executed_steps.insert(step.clone());
        true
    }

    /// Pops the step frames, runs the after hook and emits the closing
    /// progress event.
    pub(crate) fn step_exit(&mut self, step: &StepId, started: Instant, panicked: bool) {
        self.force_stack.pop();
        self.effectuation_stack.pop();
        run_step_hook(&mut self.operation_count, &mut self.after_step, step);
        let seconds = started.elapsed().as_secs_f64();
        let marker = if panicked || self.stopped() {
            "<< ABORDED STEP"
        } else {
            "<< DONE STEP"
        };
        self.progress(format!("{marker} {step} (duration: {seconds:.3} seconds)"));
    }

    pub(crate) fn optional_enter(&mut self, name: &str) -> bool {
        if !self.config.is_activated(name) || self.config.is_dispensed_with(name) {
            self.progress(format!("OPTIONAL PART \"{name}\" NOT ACTIVATED"));
            return false;
        }
        self.progress(format!(">> START OPTIONAL PART \"{name}\""));
        self.effectuation_stack
            .push(Effectuation::OptionalPart(name.to_string()));
        true
    }

    pub(crate) fn optional_exit(&mut self, name: &str, panicked: bool) {
        self.effectuation_stack.pop();
        if !panicked {
            self.progress(format!("<< DONE OPTIONAL PART \"{name}\""));
        }
    }

    pub(crate) fn dispensable_enter(&mut self, name: &str) -> bool {
        if self.config.is_dispensed_with(name) {
            self.progress(format!("DISPENSABLE PART \"{name}\" DEACTIVATED"));
            return false;
        }
        self.progress(format!(">> START DISPENSABLE PART \"{name}\""));
        self.effectuation_stack
            .push(Effectuation::DispensablePart(name.to_string()));
        true
    }

    pub(crate) fn dispensable_exit(&mut self, name: &str, panicked: bool) {
        self.effectuation_stack.pop();
        if !panicked {
            self.progress(format!("<< DONE DISPENSABLE PART \"{name}\""));
        }
    }

    pub(crate) fn doing_enter(&mut self, id: Option<&str>, description: &str) {
        self.emit(Severity::Progress, id, format!("START DOING {description}"));
        self.effectuation_stack
            .push(Effectuation::DescribedPart(description.to_string()));
    }

    pub(crate) fn doing_exit(&mut self, id: Option<&str>, description: &str, panicked: bool) {
        self.effectuation_stack.pop();
        if !panicked {
            self.emit(Severity::Progress, id, format!("DONE DOING {description}"));
        }
    }

    pub(crate) fn current_force(&self) -> bool {
        self.force_stack.last().copied().unwrap_or(false)
    }

    pub(crate) fn push_force(&mut self, flag: bool) {
        self.force_stack.push(flag);
    }

    pub(crate) fn pop_force(&mut self) {
        self.force_stack.pop();
    }

    pub(crate) fn push_appease(&mut self, cap: Severity) {
        self.appease_stack.push(cap);
    }

    pub(crate) fn pop_appease(&mut self) {
        self.appease_stack.pop();
    }

    pub(crate) fn snapshot_steps(&self) -> HashSet<StepId> {
        self.executed_steps.clone()
    }

    pub(crate) fn restore_steps(&mut self, snapshot: HashSet<StepId>) {
        self.executed_steps = snapshot;
    }

    pub(crate) fn progress(&self, text: String) {
        self.emit(Severity::Progress, None, text);
    }

    fn debug_event(&self, text: String) {
        self.emit(Severity::Debug, None, text);
    }

    fn emit(&self, severity: Severity, message_id: Option<&str>, text: String) {
        let event = LoggingEvent {
            message_id: message_id.map(str::to_string),
            severity,
            process_id: self.config.process_id,
            application_name: self.config.application_name.clone(),
            fact: LocalizedText::english(text),
            solution: None,
            item_info: self.config.item_info.clone(),
            item_position_info: None,
            effectuation_stack: self.effectuation_stack.clone(),
            time: crate::util::monotonic_millis(),
        };
        self.route(event, false);
    }

    fn route(&self, mut event: LoggingEvent, add_crash_info: bool) {
        if add_crash_info || self.config.always_add_crash_info {
            if let Some(crash) = &self.crash_sink {
                crash.log(&event);
            }
        }
        if let Some(&cap) = self.appease_stack.last() {
            if event.severity > cap {
                event.severity = cap;
            }
        }
        self.sink.log(&event);
        self.worst.merge(event.severity);
    }

    /// Runs `body` against a reborrow of `self`, converting a panic into a
    /// value so the caller can restore its stacks before resuming it.
    fn guarded<R>(&mut self, body: impl FnOnce(&mut Self) -> R) -> std::thread::Result<R> {
        let this = &mut *self;
        catch_unwind(AssertUnwindSafe(move || body(this)))
    }
}

fn run_step_hook(count: &mut u64, hook: &mut Option<StepHook>, step: &StepId) {
    if let Some(hook) = hook.as_mut() {
        *count += 1;
        if !hook(*count, step) {
            *count -= 1;
        }
    }
}

fn unwind_into<R>(outcome: std::thread::Result<R>) -> R {
    match outcome {
        Ok(result) => result,
        Err(panic) => resume_unwind(panic),
    }
}
