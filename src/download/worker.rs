//! Bounded worker pool for collaborator calls
//!
//! Network-and-CPU-bound work (metadata probes, downloads) is dispatched
//! here so the dispatcher loop stays responsive. The pool is a semaphore
//! over spawned tasks: at most `limit` jobs run at once, excess dispatches
//! queue on the permit. Every dispatch is awaited by the handler that
//! issued it — there is no fire-and-forget, so a status message can always
//! be edited once the call resolves.
//!
//! No cancellation or timeout is imposed here; the collaborator carries its
//! own timeout.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::core::error::AppError;

/// Semaphore-bounded dispatcher for background jobs.
#[derive(Debug)]
pub struct WorkerPool {
    permits: Arc<Semaphore>,
}

impl WorkerPool {
    pub fn new(limit: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(limit)),
        }
    }

    /// Runs `job` on the pool and waits for its result.
    ///
    /// Blocks (asynchronously) until a permit is free, spawns the job, and
    /// joins it. A panicking job surfaces as a `Download` error instead of
    /// taking the dispatcher down.
    pub async fn dispatch<F, T>(&self, job: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>> + Send + 'static,
        T: Send + 'static,
    {
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|e| AppError::Download(format!("worker pool closed: {}", e)))?;

        let handle = tokio::spawn(async move {
            let _permit = permit;
            job.await
        });

        handle
            .await
            .map_err(|e| AppError::Download(format!("background task failed: {}", e)))?
    }

    /// Free slots right now (diagnostics only).
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }
}
