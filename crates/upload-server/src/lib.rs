//! HTTP receiver for blobcast uploads.
//!
//! One route, `POST /uploads`: the declared digest arrives in a header, the
//! payload as the raw body. The handler recomputes the digest while reading
//! and, in strict mode, answers 400 on a mismatch without touching the disk;
//! accepted payloads land in `server-<uuid>.bin` under the configured
//! directory.

use std::path::PathBuf;

pub mod handler;
pub mod server;

pub use handler::{UploadError, router};
pub use server::{ServeError, UploadServer};

/// Filename prefix for stored uploads.
pub const SERVER_FILE_PREFIX: &str = "server-";

/// Immutable receiver configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct ReceiverConfig {
    /// Directory receiving the `server-<uuid>.bin` files.
    pub save_dir: PathBuf,
    /// Reject uploads whose recomputed digest differs from the declared one.
    pub verify_checksums: bool,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from("/tmp"),
            verify_checksums: true,
        }
    }
}
