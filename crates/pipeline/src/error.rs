//! Pipeline error taxonomy.

use thiserror::Error;

/// Failure of a single transfer attempt.
///
/// A rejection the receiver answers with (4xx/5xx) is not an error; it comes
/// back as an unsuccessful [`crate::SendOutcome`]. These variants cover the
/// attempt never completing at all.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Failure to assemble the pipeline itself.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}
