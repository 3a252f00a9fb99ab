//! The upload route: validate, recompute, persist, answer.

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use blobcast_protocol::{
    CHECKSUM_HEADER, TRANSFER_ID_HEADER, UPLOAD_PATH, UploadReceipt, UploadRejection,
    is_hex_digest,
};
use futures_util::StreamExt;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{ReceiverConfig, SERVER_FILE_PREFIX};

/// Reasons an upload is refused, each mapping to a response status.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("missing {0} header")]
    MissingHeader(&'static str),

    #[error("malformed checksum header")]
    MalformedChecksum,

    #[error("malformed transfer id")]
    MalformedTransferId,

    #[error("checksum mismatch: declared {declared}, computed {computed}")]
    ChecksumMismatch { declared: String, computed: String },

    #[error("failed to read request body: {0}")]
    Body(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl UploadError {
    fn status(&self) -> StatusCode {
        match self {
            UploadError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        (self.status(), Json(UploadRejection::new(self.to_string()))).into_response()
    }
}

#[derive(Clone)]
pub(crate) struct AppState {
    config: Arc<ReceiverConfig>,
}

/// Builds the upload router over the given configuration.
pub fn router(config: Arc<ReceiverConfig>) -> Router {
    Router::new()
        .route(UPLOAD_PATH, post(accept_upload))
        .with_state(AppState { config })
}

/// Accepts one upload: headers first, then the body, then the verdict.
///
/// Header validation happens before the body is read and long before any
/// disk I/O; the transfer id must parse as a UUID so header content can
/// never smuggle path components into the target directory.
async fn accept_upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Result<Json<UploadReceipt>, UploadError> {
    let declared = required_header(&headers, CHECKSUM_HEADER)?;
    if !is_hex_digest(declared) {
        warn!(declared, "rejecting malformed checksum header");
        return Err(UploadError::MalformedChecksum);
    }
    let declared = declared.to_ascii_lowercase();

    let transfer_id = required_header(&headers, TRANSFER_ID_HEADER)?;
    let transfer_id = Uuid::parse_str(transfer_id).map_err(|_| {
        warn!(transfer_id, "rejecting malformed transfer id");
        UploadError::MalformedTransferId
    })?;

    // Hash while the body streams in; the declared digest is judged against
    // what actually arrived, not what the sender meant to send.
    let mut hasher = Sha256::new();
    let mut received = Vec::new();
    let mut stream = body.into_data_stream();
    while let Some(frame) = stream.next().await {
        let chunk = frame.map_err(|e| UploadError::Body(e.to_string()))?;
        hasher.update(&chunk);
        received.extend_from_slice(&chunk);
    }
    let computed = hex::encode(hasher.finalize());

    if state.config.verify_checksums && computed != declared {
        error!(
            %transfer_id,
            declared = %declared,
            computed = %computed,
            bytes = received.len(),
            "checksum mismatch, upload rejected"
        );
        return Err(UploadError::ChecksumMismatch { declared, computed });
    }

    let path = state
        .config
        .save_dir
        .join(format!("{SERVER_FILE_PREFIX}{transfer_id}.bin"));
    tokio::fs::write(&path, &received).await.map_err(|e| {
        error!(
            %transfer_id,
            path = %path.display(),
            error = %e,
            "failed to persist upload"
        );
        UploadError::Io(e)
    })?;
    info!(
        %transfer_id,
        bytes = received.len(),
        path = %path.display(),
        "stored upload"
    );

    Ok(Json(UploadReceipt::for_len(received.len())))
}

fn required_header<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<&'a str, UploadError> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .ok_or(UploadError::MissingHeader(name))
}
