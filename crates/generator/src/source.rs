//! Async task feeding blobs into the work queue.

use std::time::Duration;

use rand::Rng;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::{Blob, BlobProvider, MAX_PAUSE, MIN_PAUSE};

/// Walks a [`BlobProvider`] and emits each blob into the queue, pausing a
/// randomly sampled interval between emissions.
///
/// Cancellation is observed at both suspension points (the queue send and
/// the pause), so a cancelled source neither finishes the pause it is
/// sleeping through nor emits further blobs. Returning from [`run`] drops
/// the queue sender, which is the end-of-stream signal for consumers.
///
/// [`run`]: BlobSource::run
pub struct BlobSource {
    provider: BlobProvider,
    min_pause: Duration,
    max_pause: Duration,
    cancel: CancellationToken,
}

impl BlobSource {
    /// Creates a source with the default pause bounds (1 ms to 1000 ms).
    pub fn new(provider: BlobProvider, cancel: CancellationToken) -> Self {
        Self {
            provider,
            min_pause: MIN_PAUSE,
            max_pause: MAX_PAUSE,
            cancel,
        }
    }

    /// Overrides the pause bounds. A max below min is raised to min.
    pub fn with_pause(mut self, min: Duration, max: Duration) -> Self {
        self.min_pause = min;
        self.max_pause = max.max(min);
        self
    }

    /// Emits blobs until the provider is exhausted or cancellation fires.
    ///
    /// Returns the number of blobs actually handed to the queue. Blobs cut
    /// off by cancellation mid-send are not counted.
    pub async fn run(mut self, queue: mpsc::Sender<Blob>) -> u64 {
        let mut emitted = 0u64;

        while !self.cancel.is_cancelled() {
            let Some(blob) = self.provider.next() else {
                break;
            };
            let sequence = blob.sequence;
            let bytes = blob.payload.len();

            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                sent = queue.send(blob) => {
                    if sent.is_err() {
                        // Every consumer is gone; no point generating more.
                        break;
                    }
                }
            }
            emitted += 1;
            debug!(sequence, bytes, "blob enqueued");

            let pause = sample_pause(self.min_pause, self.max_pause);
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                _ = tokio::time::sleep(pause) => {}
            }
        }

        info!(emitted, "blob source finished");
        emitted
    }
}

/// Samples a pause uniformly from `[min, max]`, in whole milliseconds.
fn sample_pause(min: Duration, max: Duration) -> Duration {
    if min >= max {
        return min;
    }
    let millis = rand::thread_rng().gen_range(min.as_millis() as u64..=max.as_millis() as u64);
    Duration::from_millis(millis)
}
