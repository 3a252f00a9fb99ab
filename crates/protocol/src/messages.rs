//! JSON bodies the receiver answers with.

use serde::{Deserialize, Serialize};

/// Body of a `200 OK` response to an accepted upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub message: String,
}

impl UploadReceipt {
    /// Builds the receipt for a stored payload of `len` bytes.
    pub fn for_len(len: usize) -> Self {
        Self {
            message: format!("Successfully received the {len} byte file"),
        }
    }
}

/// Body of a `4xx`/`5xx` response to a refused upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadRejection {
    pub error: String,
}

impl UploadRejection {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_reports_byte_count() {
        let receipt = UploadReceipt::for_len(2048);
        assert_eq!(receipt.message, "Successfully received the 2048 byte file");
    }

    #[test]
    fn receipt_round_trips_through_json() {
        let receipt = UploadReceipt::for_len(17);
        let json = serde_json::to_string(&receipt).unwrap();
        let back: UploadReceipt = serde_json::from_str(&json).unwrap();
        assert_eq!(back, receipt);
    }

    #[test]
    fn rejection_round_trips_through_json() {
        let rejection = UploadRejection::new("checksum mismatch");
        let json = serde_json::to_string(&rejection).unwrap();
        assert_eq!(json, r#"{"error":"checksum mismatch"}"#);
        let back: UploadRejection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rejection);
    }
}
