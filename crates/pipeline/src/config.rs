//! Pipeline configuration, built once at startup and shared read-only.

use std::path::PathBuf;
use std::time::Duration;

use blobcast_generator::{MAX_BLOB_BYTES, MAX_PAUSE, MIN_BLOB_BYTES, MIN_PAUSE};

/// Default receiver endpoint.
pub const DEFAULT_UPLOAD_URL: &str = "http://127.0.0.1:8000/uploads";

/// Default number of blobs per run.
pub const DEFAULT_BLOB_COUNT: u64 = 100;

/// Default worker pool size.
pub const DEFAULT_POOL_SIZE: usize = 10;

/// Immutable sender configuration.
///
/// Constructed in `main` from CLI flags and passed into the pool behind an
/// `Arc`; no component mutates it afterwards.
#[derive(Debug, Clone)]
pub struct SenderConfig {
    /// Full URL the workers post uploads to.
    pub upload_url: String,
    /// Directory receiving the local `sender-<uuid>.bin` copies.
    pub save_dir: PathBuf,
    /// Number of blobs to generate.
    pub num_blobs: u64,
    /// Number of concurrent sender workers.
    pub num_workers: usize,
    /// Work queue capacity; 0 means one slot per blob.
    pub queue_capacity: usize,
    /// Smallest generated payload, in bytes.
    pub min_blob_bytes: usize,
    /// Largest generated payload, in bytes.
    pub max_blob_bytes: usize,
    /// Shortest pause between emissions.
    pub min_pause: Duration,
    /// Longest pause between emissions.
    pub max_pause: Duration,
    /// Probability that a payload is corrupted after its digest is taken;
    /// 0.0 disables injection.
    pub corrupt_probability: f64,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            upload_url: DEFAULT_UPLOAD_URL.to_string(),
            save_dir: PathBuf::from("/tmp"),
            num_blobs: DEFAULT_BLOB_COUNT,
            num_workers: DEFAULT_POOL_SIZE,
            queue_capacity: 0,
            min_blob_bytes: MIN_BLOB_BYTES,
            max_blob_bytes: MAX_BLOB_BYTES,
            min_pause: MIN_PAUSE,
            max_pause: MAX_PAUSE,
            corrupt_probability: 0.0,
        }
    }
}

impl SenderConfig {
    /// Effective queue capacity: the explicit value, or one slot per blob.
    pub(crate) fn effective_queue_capacity(&self) -> usize {
        if self.queue_capacity == 0 {
            self.num_blobs.max(1) as usize
        } else {
            self.queue_capacity
        }
    }
}
