//! Wire contract shared by the blobcast sender and receiver.
//!
//! Both processes agree on the upload endpoint, the headers that carry
//! transfer metadata, the JSON response bodies, and the digest that seals
//! each payload. Everything else (queueing, pooling, persistence) is local
//! to one side or the other.

pub mod digest;
pub mod messages;

pub use digest::{DIGEST_HEX_LEN, is_hex_digest, sha256_hex};
pub use messages::{UploadReceipt, UploadRejection};

/// Path the receiver serves and the sender posts to.
pub const UPLOAD_PATH: &str = "/uploads";

/// Header carrying the hex-encoded SHA-256 digest of the original payload.
///
/// The digest always describes the payload *before* any deliberate
/// corruption, so a mutated body is detectable on the receiving side.
pub const CHECKSUM_HEADER: &str = "x-blob-checksum";

/// Header carrying the sender-assigned transfer id (a UUID).
///
/// The receiver names its stored copy after this id, so the two processes'
/// files for one transfer correlate.
pub const TRANSFER_ID_HEADER: &str = "x-blob-id";
