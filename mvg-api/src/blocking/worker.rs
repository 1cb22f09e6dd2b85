//! Lazily started background runtime.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use tokio::runtime::{Handle, Runtime};
use tracing::debug;

use crate::mvg::MvgError;

const WORKER_THREAD_NAME: &str = "mvg-worker";

/// A Tokio runtime with a single worker thread, started on first use.
///
/// Blocking calls made from inside an async context can't start a runtime of
/// their own, so they run their request here instead. The runtime is created
/// at most once per worker, even when several threads ask for it at the same
/// time, and is shut down on [`BackgroundWorker::shutdown`] or drop.
#[derive(Debug, Default)]
pub struct BackgroundWorker {
    runtime: Mutex<Option<Runtime>>,
    launches: AtomicUsize,
}

impl BackgroundWorker {
    /// A worker that hasn't started its runtime yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide worker used by default.
    pub fn shared() -> Arc<BackgroundWorker> {
        static SHARED: OnceLock<Arc<BackgroundWorker>> = OnceLock::new();
        SHARED
            .get_or_init(|| Arc::new(BackgroundWorker::new()))
            .clone()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Runtime>> {
        // The guarded value is either a runtime or nothing, so a panic while
        // holding the lock can't leave it half-updated.
        self.runtime.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Handle to the runtime, starting it if needed.
    pub fn handle(&self) -> Result<Handle, MvgError> {
        let mut runtime = self.lock();
        if let Some(rt) = runtime.as_ref() {
            return Ok(rt.handle().clone());
        }

        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name(WORKER_THREAD_NAME)
            .enable_all()
            .build()
            .map_err(|e| MvgError::Executor(format!("failed to start background worker: {e}")))?;
        let handle = rt.handle().clone();
        *runtime = Some(rt);

        let launches = self.launches.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(launches, "started background worker");
        Ok(handle)
    }

    pub fn is_running(&self) -> bool {
        self.lock().is_some()
    }

    /// How many times the runtime has been started.
    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }

    /// Stop the runtime without waiting for outstanding tasks.
    ///
    /// A later call to [`BackgroundWorker::handle`] starts a new one.
    pub fn shutdown(&self) {
        if let Some(rt) = self.lock().take() {
            debug!("shutting down background worker");
            rt.shutdown_background();
        }
    }
}

impl Drop for BackgroundWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
