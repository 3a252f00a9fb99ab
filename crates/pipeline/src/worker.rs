//! Sender worker: seals, persists, and uploads blobs pulled from the queue.

use std::sync::Arc;

use blobcast_generator::Blob;
use blobcast_protocol::{
    CHECKSUM_HEADER, TRANSFER_ID_HEADER, UploadReceipt, UploadRejection, sha256_hex,
};
use rand::Rng;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::SenderConfig;
use crate::error::SendError;
use crate::outcome::SendOutcome;
use crate::queue::WorkQueue;

/// Filename prefix for the sender's local copies.
pub const SENDER_FILE_PREFIX: &str = "sender-";

/// One member of the sender pool.
///
/// Owns its HTTP client for the whole run. Blobs arrive through the shared
/// queue and leave as exactly one POST each; there are no retries, so a
/// failure only costs that one blob.
pub struct SenderWorker {
    id: usize,
    config: Arc<SenderConfig>,
    client: reqwest::Client,
}

impl SenderWorker {
    pub fn new(id: usize, config: Arc<SenderConfig>, client: reqwest::Client) -> Self {
        Self { id, config, client }
    }

    /// Drains the queue until end-of-stream, producing one outcome per blob
    /// taken.
    pub async fn run(self, queue: WorkQueue) -> Vec<SendOutcome> {
        let mut outcomes = Vec::new();
        while let Some(blob) = queue.take().await {
            outcomes.push(self.process(blob).await);
        }
        info!(worker = self.id, processed = outcomes.len(), "worker done");
        outcomes
    }

    /// Runs one blob through seal-persist-upload, folding every failure into
    /// the outcome.
    async fn process(&self, blob: Blob) -> SendOutcome {
        let sequence = blob.sequence;
        let bytes = blob.payload.len();
        let transfer_id = Uuid::new_v4().to_string();

        match self.transfer(&transfer_id, blob).await {
            Ok(outcome) => {
                if outcome.success {
                    info!(
                        worker = self.id,
                        sequence,
                        transfer_id = %outcome.transfer_id,
                        bytes,
                        message = %outcome.message,
                        "blob delivered"
                    );
                } else {
                    warn!(
                        worker = self.id,
                        sequence,
                        transfer_id = %outcome.transfer_id,
                        bytes,
                        status = outcome.http_status,
                        message = %outcome.message,
                        "upload refused"
                    );
                }
                outcome
            }
            Err(e) => {
                warn!(
                    worker = self.id,
                    sequence,
                    transfer_id = %transfer_id,
                    bytes,
                    error = %e,
                    "transfer failed"
                );
                SendOutcome {
                    sequence,
                    transfer_id,
                    bytes,
                    success: false,
                    http_status: None,
                    message: e.to_string(),
                }
            }
        }
    }

    async fn transfer(&self, transfer_id: &str, blob: Blob) -> Result<SendOutcome, SendError> {
        let sequence = blob.sequence;
        let mut payload = blob.payload;
        let bytes = payload.len();

        let (digest, corrupted) = seal_payload(&mut payload, self.config.corrupt_probability);
        if corrupted {
            info!(
                worker = self.id,
                sequence,
                transfer_id,
                "corrupting payload after digest"
            );
        }

        // The local copy records the exact bytes that go on the wire, which
        // is not necessarily what the digest describes.
        let path = self
            .config
            .save_dir
            .join(format!("{SENDER_FILE_PREFIX}{transfer_id}.bin"));
        tokio::fs::write(&path, &payload).await?;
        debug!(
            worker = self.id,
            sequence,
            path = %path.display(),
            "wrote local copy"
        );

        let response = self
            .client
            .post(&self.config.upload_url)
            .header(CHECKSUM_HEADER, digest.as_str())
            .header(TRANSFER_ID_HEADER, transfer_id)
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let receipt: UploadReceipt = response.json().await?;
            Ok(SendOutcome {
                sequence,
                transfer_id: transfer_id.to_string(),
                bytes,
                success: true,
                http_status: Some(status.as_u16()),
                message: receipt.message,
            })
        } else {
            let message = response
                .json::<UploadRejection>()
                .await
                .map(|r| r.error)
                .unwrap_or_else(|_| format!("status {status}"));
            Ok(SendOutcome {
                sequence,
                transfer_id: transfer_id.to_string(),
                bytes,
                success: false,
                http_status: Some(status.as_u16()),
                message,
            })
        }
    }
}

/// Digest-then-corrupt sealing step.
///
/// The digest always covers the payload as passed in; the corruption roll,
/// when it hits, mutates the bytes only after that digest exists. Returns
/// the digest and whether the payload was mutated.
fn seal_payload(payload: &mut [u8], corrupt_probability: f64) -> (String, bool) {
    let digest = sha256_hex(payload);
    let corrupted = corrupt_probability > 0.0
        && rand::thread_rng().gen_bool(corrupt_probability.clamp(0.0, 1.0));
    if corrupted {
        corrupt_first_byte(payload);
    }
    (digest, corrupted)
}

/// Bumps the first byte, wrapping; enough to break the digest.
fn corrupt_first_byte(payload: &mut [u8]) {
    if let Some(first) = payload.first_mut() {
        *first = first.wrapping_add(1);
    }
}
