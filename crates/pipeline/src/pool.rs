//! Pool orchestration: one blob source, N workers, joined outcomes.

use std::sync::Arc;

use blobcast_generator::{BlobProvider, BlobSource};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::config::SenderConfig;
use crate::error::PipelineError;
use crate::outcome::RunReport;
use crate::queue::work_queue;
use crate::worker::SenderWorker;

/// Runs the full sender pipeline: blob source, work queue, worker pool.
///
/// Cancelling the pool's token stops the source; the workers keep draining
/// whatever was already enqueued and [`run`] still returns a complete
/// report, so shutdown is always an orderly drain rather than an abort.
///
/// [`run`]: SenderPool::run
pub struct SenderPool {
    config: Arc<SenderConfig>,
    cancel: CancellationToken,
}

impl SenderPool {
    pub fn new(config: SenderConfig) -> Self {
        Self {
            config: Arc::new(config),
            cancel: CancellationToken::new(),
        }
    }

    /// Token that stops the blob source. Queued work still drains.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Runs one complete pipeline pass.
    ///
    /// Workers are spawned first so the queue drains while the source is
    /// still emitting; the source then runs to exhaustion or cancellation,
    /// and dropping its queue handle releases the workers at end-of-stream.
    pub async fn run(&self) -> Result<RunReport, PipelineError> {
        let (tx, queue) = work_queue(self.config.effective_queue_capacity());

        let workers = self.config.num_workers.max(1);
        let mut handles = Vec::with_capacity(workers);
        for id in 0..workers {
            let client = reqwest::Client::builder()
                .build()
                .map_err(PipelineError::Client)?;
            let worker = SenderWorker::new(id, Arc::clone(&self.config), client);
            handles.push(tokio::spawn(worker.run(queue.clone())));
        }
        info!(workers, blobs = self.config.num_blobs, "sender pool started");

        let provider = BlobProvider::new(
            self.config.num_blobs,
            self.config.min_blob_bytes,
            self.config.max_blob_bytes,
        );
        let source = BlobSource::new(provider, self.cancel.clone())
            .with_pause(self.config.min_pause, self.config.max_pause);
        let generated = source.run(tx).await;

        let mut outcomes = Vec::with_capacity(generated as usize);
        for handle in handles {
            match handle.await {
                Ok(mut worker_outcomes) => outcomes.append(&mut worker_outcomes),
                Err(e) => error!(error = %e, "sender worker panicked"),
            }
        }

        let report = RunReport {
            generated,
            outcomes,
        };
        info!(
            generated = report.generated,
            succeeded = report.succeeded(),
            failed = report.failed(),
            "pipeline drained"
        );
        Ok(report)
    }
}
