//! Sender-side pipeline: a bounded work queue, a fixed pool of upload
//! workers, and the orchestration that drains blobs from the source out
//! through HTTP.
//!
//! The pipeline's failure policy is containment: a blob that cannot be
//! persisted or uploaded produces a failed [`SendOutcome`] and nothing else;
//! the queue keeps moving. Cancellation stops the source, never the workers,
//! so everything already enqueued still drains before [`SenderPool::run`]
//! returns.

pub mod config;
pub mod error;
pub mod outcome;
pub mod pool;
pub mod queue;
pub mod worker;

pub use config::{DEFAULT_BLOB_COUNT, DEFAULT_POOL_SIZE, DEFAULT_UPLOAD_URL, SenderConfig};
pub use error::{PipelineError, SendError};
pub use outcome::{RunReport, SendOutcome};
pub use pool::SenderPool;
pub use queue::{WorkQueue, work_queue};
pub use worker::{SENDER_FILE_PREFIX, SenderWorker};
