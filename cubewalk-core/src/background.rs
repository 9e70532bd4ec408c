//! Running a simulation off the caller's thread.
//!
//! [`Simulation::spawn`] moves the run onto a named worker thread and hands
//! the outcome to a one-shot callback. Cancellation is cooperative: the worker
//! checks a shared [`CancellationToken`] between walks. The worker inherits
//! the caller's current span and tracing dispatcher.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread::{self, JoinHandle},
};

use tracing::{Dispatch, Span, debug, dispatcher};

use crate::{Result, error::SimulationError, simulation::Simulation, summary::SimulationSummary};

const WORKER_NAME: &str = "cubewalk-simulation";

/// Shared flag used to ask a running simulation to stop.
///
/// Clones observe the same flag.
///
/// # Examples
/// ```
/// use cubewalk_core::CancellationToken;
///
/// let token = CancellationToken::new();
/// let observer = token.clone();
/// token.cancel();
/// assert!(observer.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns `true` once [`Self::cancel`] has been called on any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Handle to a simulation running on a worker thread.
#[derive(Debug)]
pub struct SimulationTask {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl SimulationTask {
    /// Asks the worker to stop before its next walk.
    ///
    /// The completion callback still runs, receiving
    /// [`SimulationError::Cancelled`] unless the run had already finished.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns the token shared with the worker.
    #[must_use]
    pub const fn cancellation_token(&self) -> &CancellationToken {
        &self.token
    }

    /// Returns `true` once the worker thread has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the worker thread to exit.
    ///
    /// # Errors
    /// Returns [`SimulationError::WorkerPanicked`] when the worker, including
    /// the completion callback, panicked.
    pub fn join(self) -> Result<()> {
        self.handle
            .join()
            .map_err(|_| SimulationError::WorkerPanicked)
    }
}

impl Simulation {
    /// Runs the simulation on a worker thread and passes the outcome to
    /// `on_complete`, which is called exactly once on that thread.
    ///
    /// # Errors
    /// Returns [`SimulationError::SpawnFailed`] when the operating system
    /// refuses to start the thread; `on_complete` is not called in that case.
    ///
    /// # Examples
    /// ```
    /// use std::sync::mpsc;
    ///
    /// use cubewalk_core::SimulationBuilder;
    ///
    /// let simulation = SimulationBuilder::new()
    ///     .with_trials(200)
    ///     .with_seed(4)
    ///     .build()
    ///     .expect("valid configuration");
    /// let (sender, receiver) = mpsc::channel();
    /// let task = simulation
    ///     .spawn(move |outcome| {
    ///         let _ = sender.send(outcome);
    ///     })
    ///     .expect("worker starts");
    /// let summary = receiver.recv().expect("callback runs").expect("run succeeds");
    /// task.join().expect("worker exits cleanly");
    /// assert_eq!(summary.trials(), 200);
    /// ```
    pub fn spawn<F>(self, on_complete: F) -> Result<SimulationTask>
    where
        F: FnOnce(Result<SimulationSummary>) + Send + 'static,
    {
        let token = CancellationToken::new();
        let worker_token = token.clone();
        let parent = Span::current();
        let dispatch = dispatcher::get_default(Dispatch::clone);
        let handle = thread::Builder::new()
            .name(WORKER_NAME.to_owned())
            .spawn(move || {
                dispatcher::with_default(&dispatch, || {
                    let _entered = parent.enter();
                    let outcome = self.run_cancellable(&worker_token);
                    debug!(ok = outcome.is_ok(), "delivering simulation outcome");
                    on_complete(outcome);
                });
            })
            .map_err(|err| SimulationError::SpawnFailed {
                reason: Arc::from(err.to_string()),
            })?;
        Ok(SimulationTask { token, handle })
    }
}
