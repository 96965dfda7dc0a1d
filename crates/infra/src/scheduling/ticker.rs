//! Shared ticker mechanics for the four periodic workers (§4.4, §5).
//!
//! Every worker is "Idle → Running → Idle, driven by a monotonic ticker":
//! ticks that fire while the previous tick is still running are dropped
//! (the loop only re-arms `sleep` once the previous tick future resolves,
//! giving single-slot, non-overlapping execution for free), and a
//! cancellation token lets `stop()` end the loop between ticks without
//! aborting in-flight work.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use super::error::{SchedulerError, SchedulerResult};
use crate::observability::metrics::PerformanceMetrics;

type TaskHandle = Arc<Mutex<Option<JoinHandle<()>>>>;

/// Generic start/stop/cancellation scaffolding for a periodic worker.
///
/// Each concrete worker owns one `Ticker` and supplies the per-tick closure
/// to [`Ticker::start`].
pub struct Ticker {
    name: &'static str,
    cancellation_token: CancellationToken,
    task_handle: TaskHandle,
}

impl Ticker {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            cancellation_token: CancellationToken::new(),
            task_handle: Arc::new(Mutex::new(None)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.task_handle
            .try_lock()
            .ok()
            .and_then(|guard| guard.as_ref().map(|h| !h.is_finished()))
            .unwrap_or(false)
    }

    /// Start the background loop. `tick` is invoked once per period; its
    /// future must resolve before the next sleep is armed, which is what
    /// enforces the overlap-drop policy.
    #[instrument(skip(self, metrics, tick), fields(worker = self.name))]
    pub async fn start<F, Fut>(
        &mut self,
        interval: Duration,
        metrics: Arc<PerformanceMetrics>,
        mut tick: F,
    ) -> SchedulerResult<()>
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning);
        }

        info!(worker = self.name, ?interval, "starting worker");
        self.cancellation_token = CancellationToken::new();
        let cancel = self.cancellation_token.clone();
        let name = self.name;

        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        debug!(worker = name, "worker loop cancelled");
                        break;
                    }
                    _ = tokio::time::sleep(interval) => {
                        let _ = metrics.record_call();
                        let started = Instant::now();
                        tick().await;
                        let _ = metrics.record_fetch_time(started.elapsed());
                    }
                }
            }
        });

        *self.task_handle.lock().await = Some(handle);
        Ok(())
    }

    #[instrument(skip(self), fields(worker = self.name))]
    pub async fn stop(&mut self) -> SchedulerResult<()> {
        if !self.is_running() {
            return Err(SchedulerError::NotRunning);
        }

        info!(worker = self.name, "stopping worker");
        self.cancellation_token.cancel();

        if let Some(handle) = self.task_handle.lock().await.take() {
            let join_timeout = Duration::from_secs(5);
            tokio::time::timeout(join_timeout, handle)
                .await
                .map_err(|source| SchedulerError::Timeout { duration: join_timeout, source })?
                .map_err(|e| SchedulerError::TaskJoinFailed(e.to_string()))?;
        }

        Ok(())
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        if self.is_running() {
            self.cancellation_token.cancel();
        }
    }
}
