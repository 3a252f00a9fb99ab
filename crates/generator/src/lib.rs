//! Random blob production for the blobcast sender.
//!
//! [`BlobProvider`] is a plain iterator that samples payload sizes and fills
//! them with random bytes; [`BlobSource`] is the async task that walks the
//! provider and feeds a work queue, pausing a random interval between
//! emissions and stopping early on cancellation.

use std::time::Duration;

pub mod blob;
pub mod source;

pub use blob::{Blob, BlobProvider};
pub use source::BlobSource;

/// Smallest payload the default provider emits (1 KiB).
pub const MIN_BLOB_BYTES: usize = 1024;

/// Largest payload the default provider emits (1 MiB).
pub const MAX_BLOB_BYTES: usize = 1024 * 1024;

/// Shortest pause between two emissions.
pub const MIN_PAUSE: Duration = Duration::from_millis(1);

/// Longest pause between two emissions.
pub const MAX_PAUSE: Duration = Duration::from_millis(1000);
