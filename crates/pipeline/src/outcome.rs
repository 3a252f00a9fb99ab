//! Per-transfer outcomes and the aggregate run report.

/// Result of one upload attempt.
///
/// Outcomes exist for logging and the end-of-run tally; they are never
/// persisted. A refused upload and a transport failure both land here as
/// `success: false`, distinguished by whether a status is present.
#[derive(Debug, Clone)]
pub struct SendOutcome {
    /// Sequence number assigned at generation time.
    pub sequence: u64,
    /// Transfer id minted for this attempt; names both sides' files.
    pub transfer_id: String,
    /// Payload size as generated, in bytes.
    pub bytes: usize,
    /// Whether the receiver accepted the upload.
    pub success: bool,
    /// HTTP status answered, if the request completed at all.
    pub http_status: Option<u16>,
    /// Receipt message on success, error text otherwise.
    pub message: String,
}

/// Aggregate view of one pipeline run.
#[derive(Debug)]
pub struct RunReport {
    /// Blobs the source actually handed to the queue.
    pub generated: u64,
    /// One outcome per blob taken off the queue.
    pub outcomes: Vec<SendOutcome>,
}

impl RunReport {
    /// Number of accepted uploads.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success).count()
    }

    /// Number of failed attempts, rejections and transport losses alike.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}
