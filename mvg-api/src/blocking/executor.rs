//! Drive an async call to completion from synchronous code.

use std::future::Future;
use std::sync::Arc;

use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::trace;

use crate::mvg::MvgError;

use super::worker::BackgroundWorker;

/// Runs futures to completion for blocking callers.
///
/// Outside any runtime a throwaway current-thread runtime is built for the
/// call. Inside a runtime that can't be done, so the future is handed to the
/// [`BackgroundWorker`] and the calling thread waits for it.
#[derive(Debug, Clone)]
pub struct Executor {
    worker: Arc<BackgroundWorker>,
}

impl Executor {
    pub fn new(worker: Arc<BackgroundWorker>) -> Self {
        Self { worker }
    }

    pub fn worker(&self) -> &Arc<BackgroundWorker> {
        &self.worker
    }

    pub fn run<F, T>(&self, fut: F) -> Result<T, MvgError>
    where
        F: Future<Output = Result<T, MvgError>> + Send + 'static,
        T: Send + 'static,
    {
        match Handle::try_current() {
            Err(_) => {
                trace!("running on a fresh runtime");
                let rt = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .map_err(|e| MvgError::Executor(format!("failed to start runtime: {e}")))?;
                rt.block_on(fut)
            }
            Ok(current) => {
                trace!("running on the background worker");
                let task = self.worker.handle()?.spawn(fut);
                let wait = || futures::executor::block_on(task);
                let joined = match current.runtime_flavor() {
                    RuntimeFlavor::MultiThread => tokio::task::block_in_place(wait),
                    _ => wait(),
                };
                joined.map_err(|e| MvgError::Executor(format!("background call failed: {e}")))?
            }
        }
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new(BackgroundWorker::shared())
    }
}
