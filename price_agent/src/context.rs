//! Cancellation-aware execution context handed to the task handler.
//!
//! Cancellation is signalled by disconnecting a crossbeam channel: once the
//! `CancelHandle` is cancelled (or dropped), every `recv` on the context's
//! receiver returns immediately, so any number of waits observe it.
//!
//! Blocking provider calls run on a short-lived worker thread; `TaskContext::run`
//! `select!`s between the worker's result and the cancellation signal, so the
//! caller gets `PriceError::Cancelled` promptly. The abandoned worker finishes on
//! its own, bounded by the HTTP client timeout.
use crossbeam_channel::{Receiver, Sender, bounded, never, select};
use price_common::{PriceError, Result};
use std::sync::{Arc, Mutex};
use std::thread;

/// Execution context for one task.
#[derive(Clone)]
pub struct TaskContext {
    cancel_rx: Receiver<()>,
}

/// Cancels the paired `TaskContext`. Dropping the handle cancels as well.
pub struct CancelHandle {
    _cancel_tx: Sender<()>,
}

impl CancelHandle {
    /// Cancels the context.
    pub fn cancel(self) {}
}

impl TaskContext {
    /// A context that is never cancelled.
    pub fn background() -> Self {
        Self { cancel_rx: never() }
    }

    /// A context paired with a handle that cancels it.
    pub fn with_cancel() -> (Self, CancelHandle) {
        let (cancel_tx, cancel_rx) = bounded::<()>(0);
        (Self { cancel_rx }, CancelHandle { _cancel_tx: cancel_tx })
    }

    /// Returns `true` once the context has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self.cancel_rx.try_recv(),
            Err(crossbeam_channel::TryRecvError::Disconnected)
        )
    }

    /// Runs `job` on a worker thread and waits for either its result or cancellation.
    pub fn run<T, F>(&self, job: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        if self.is_cancelled() {
            return Err(PriceError::Cancelled);
        }

        let (done_tx, done_rx) = bounded::<Result<T>>(1);
        thread::Builder::new()
            .name("provider-call".into())
            .spawn(move || {
                // The receiver is gone if the task was cancelled meanwhile.
                let _ = done_tx.send(job());
            })?;

        select! {
            recv(done_rx) -> msg => match msg {
                Ok(result) => result,
                Err(e) => Err(PriceError::Worker(format!("exited without a result: {}", e))),
            },
            recv(self.cancel_rx) -> _ => Err(PriceError::Cancelled),
        }
    }
}

/// Holds the cancel handle of the task currently running, shared with a signal handler.
#[derive(Clone, Default)]
pub struct InFlight {
    slot: Arc<Mutex<Option<CancelHandle>>>,
}

impl InFlight {
    /// Registers a new task and returns its context.
    pub fn begin(&self) -> TaskContext {
        let (ctx, handle) = TaskContext::with_cancel();
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(handle);
        }
        ctx
    }

    /// Forgets the current task once it has returned.
    pub fn finish(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            slot.take();
        }
    }

    /// Cancels the running task. Returns `false` when nothing was running.
    pub fn interrupt(&self) -> bool {
        let handle = self.slot.lock().ok().and_then(|mut slot| slot.take());
        match handle {
            Some(handle) => {
                handle.cancel();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn background_context_runs_job() {
        let ctx = TaskContext::background();
        assert!(!ctx.is_cancelled());
        assert_eq!(ctx.run(|| Ok(21 * 2)).unwrap(), 42);
    }

    #[test]
    fn job_errors_are_passed_through() {
        let ctx = TaskContext::background();
        let result: Result<()> = ctx.run(|| Err(PriceError::Config("boom".into())));
        assert!(matches!(result, Err(PriceError::Config(msg)) if msg == "boom"));
    }

    #[test]
    fn cancelled_context_skips_the_job() {
        let (ctx, handle) = TaskContext::with_cancel();
        handle.cancel();
        assert!(ctx.is_cancelled());
        let result = ctx.run(|| -> Result<()> { panic!("job must not run") });
        assert!(matches!(result, Err(PriceError::Cancelled)));
    }

    #[test]
    fn cancellation_interrupts_a_slow_job() {
        let (ctx, handle) = TaskContext::with_cancel();
        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            handle.cancel();
        });

        let started = Instant::now();
        let result = ctx.run(|| {
            thread::sleep(Duration::from_secs(5));
            Ok(())
        });
        assert!(matches!(result, Err(PriceError::Cancelled)));
        assert!(started.elapsed() < Duration::from_secs(2));
        canceller.join().unwrap();
    }

    #[test]
    fn clones_share_cancellation() {
        let (ctx, handle) = TaskContext::with_cancel();
        let clone = ctx.clone();
        drop(handle);
        assert!(ctx.is_cancelled());
        assert!(clone.is_cancelled());
    }

    #[test]
    fn panicking_worker_is_reported() {
        let result: Result<()> = TaskContext::background().run(|| -> Result<()> { panic!("worker died") });
        assert!(matches!(result, Err(PriceError::Worker(_))));
    }

    #[test]
    fn interrupt_cancels_only_the_running_task() {
        let in_flight = InFlight::default();
        assert!(!in_flight.interrupt());

        let first = in_flight.begin();
        assert!(in_flight.interrupt());
        assert!(first.is_cancelled());
        in_flight.finish();

        // The next task starts clean and still runs.
        let second = in_flight.begin();
        assert!(!second.is_cancelled());
        assert_eq!(second.run(|| Ok("next")).unwrap(), "next");
        in_flight.finish();
        assert!(!in_flight.interrupt());
    }
}
