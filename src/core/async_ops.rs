//! # Async operator family: the same operators with suspending bodies.
//!
//! Each `*_async` operator mirrors its synchronous counterpart against
//! the same supervisor state. Bodies are closures returning a
//! [`BoxStepFuture`], so they may await freely while holding the mutable
//! borrow of the supervisor.
//!
//! ## Rules
//! - Single-owner discipline: one logical task owns the supervisor at a
//!   time. Suspension points inside bodies do not release that ownership;
//!   concurrency goes through [`parallel`](Supervisor::parallel) siblings.
//! - The pause gate is *not* observed by async step entries; pausing only
//!   affects the synchronous family.
//! - Panics inside bodies are caught, the context stacks are restored,
//!   and the panic resumes unchanged: the same cleanup contract as the
//!   synchronous operators.

use std::future::Future;
use std::panic::{resume_unwind, AssertUnwindSafe};
use std::pin::Pin;
use std::time::Instant;

use futures::FutureExt;

use crate::core::supervisor::Supervisor;
use crate::events::StepId;
use crate::severity::Severity;

/// Boxed future returned by an async operator body.
///
/// The lifetime ties the future to the mutable supervisor borrow it was
/// handed, so nested operator calls borrow-check the same way the
/// synchronous family does.
pub type BoxStepFuture<'a, R> = Pin<Box<dyn Future<Output = R> + 'a>>;

/// Identity helper that pins a closure to the operator body signature, so
/// call sites can pass `async_body(|sup| Box::pin(async move { … }))`
/// without spelling out the higher-ranked lifetime.
pub fn async_body<R, F>(body: F) -> F
where
    F: for<'a> FnOnce(&'a mut Supervisor) -> BoxStepFuture<'a, R>,
{
    body
}

impl Supervisor {
    /// Async mirror of [`effectuate`](Supervisor::effectuate). Does not
    /// observe the pause gate.
    pub async fn effectuate_async<R>(
        &mut self,
        step: StepId,
        body: impl for<'a> FnOnce(&'a mut Supervisor) -> BoxStepFuture<'a, R>,
    ) -> Option<R> {
        if !self.step_enter(&step, false) {
            return None;
        }
        let started = Instant::now();
        let outcome = self.guarded_async(body).await;
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

    /// Async mirror of [`force`](Supervisor::force).
    pub async fn force_async<R>(
        &mut self,
        body: impl for<'a> FnOnce(&'a mut Supervisor) -> BoxStepFuture<'a, R>,
    ) -> R {
        self.push_force(true);
        let outcome = self.guarded_async(body).await;
        self.pop_force();
        unwind_into(outcome)
    }

    /// Async mirror of [`inherit_forced`](Supervisor::inherit_forced).
    pub async fn inherit_forced_async<R>(
        &mut self,
        body: impl for<'a> FnOnce(&'a mut Supervisor) -> BoxStepFuture<'a, R>,
    ) -> R {
        let inherited = self.current_force();
        self.push_force(inherited);
        let outcome = self.guarded_async(body).await;
        self.pop_force();
        unwind_into(outcome)
    }

    /// Async mirror of [`disremember`](Supervisor::disremember).
    pub async fn disremember_async<R>(
        &mut self,
        body: impl for<'a> FnOnce(&'a mut Supervisor) -> BoxStepFuture<'a, R>,
    ) -> R {
        let snapshot = self.snapshot_steps();
        let outcome = self.guarded_async(body).await;
        self.restore_steps(snapshot);
        unwind_into(outcome)
    }

    /// Async mirror of [`optional`](Supervisor::optional).
    pub async fn optional_async<R>(
        &mut self,
        name: &str,
        body: impl for<'a> FnOnce(&'a mut Supervisor) -> BoxStepFuture<'a, R>,
    ) -> Option<R> {
        if !self.optional_enter(name) {
            return None;
        }
        let outcome = self.guarded_async(body).await;
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

    /// Async mirror of [`dispensable`](Supervisor::dispensable).
    pub async fn dispensable_async<R>(
        &mut self,
        name: &str,
        body: impl for<'a> FnOnce(&'a mut Supervisor) -> BoxStepFuture<'a, R>,
    ) -> Option<R> {
        if !self.dispensable_enter(name) {
            return None;
        }
        let outcome = self.guarded_async(body).await;
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

    /// Async mirror of [`appease`](Supervisor::appease).
    pub async fn appease_async<R>(
        &mut self,
        cap: Severity,
        body: impl for<'a> FnOnce(&'a mut Supervisor) -> BoxStepFuture<'a, R>,
    ) -> R {
        self.push_appease(cap);
        let outcome = self.guarded_async(body).await;
        self.pop_appease();
        unwind_into(outcome)
    }

    /// Async mirror of [`appease_errors`](Supervisor::appease_errors).
    pub async fn appease_errors_async<R>(
        &mut self,
        body: impl for<'a> FnOnce(&'a mut Supervisor) -> BoxStepFuture<'a, R>,
    ) -> R {
        self.appease_async(Severity::Error, body).await
    }

    /// Async mirror of [`doing`](Supervisor::doing).
    pub async fn doing_async<R>(
        &mut self,
        description: &str,
        body: impl for<'a> FnOnce(&'a mut Supervisor) -> BoxStepFuture<'a, R>,
    ) -> R {
        self.doing_with_id_async(None, description, body).await
    }

    /// Async mirror of [`doing_with_id`](Supervisor::doing_with_id).
    pub async fn doing_with_id_async<R>(
        &mut self,
        id: Option<&str>,
        description: &str,
        body: impl for<'a> FnOnce(&'a mut Supervisor) -> BoxStepFuture<'a, R>,
    ) -> R {
        self.doing_enter(id, description);
        let outcome = self.guarded_async(body).await;
        self.doing_exit(id, description, outcome.is_err());
        unwind_into(outcome)
    }

    /// Runs an async body against a reborrow of `self`, converting a panic
    /// into a value so the caller can restore its stacks before resuming.
    async fn guarded_async<R>(
        &mut self,
        body: impl for<'a> FnOnce(&'a mut Supervisor) -> BoxStepFuture<'a, R>,
    ) -> std::thread::Result<R> {
        let this = &mut *self;
        AssertUnwindSafe(body(this)).catch_unwind().await
    }
}

fn unwind_into<R>(outcome: std::thread::Result<R>) -> R {
    match outcome {
        Ok(result) => result,
        Err(panic) => resume_unwind(panic),
    }
}
