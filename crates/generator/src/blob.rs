//! Blob unit of work and its random provider.

use rand::Rng;

use crate::{MAX_BLOB_BYTES, MIN_BLOB_BYTES};

/// One unit of work flowing through the pipeline.
///
/// The sequence number identifies the blob in logs; it carries no ordering
/// guarantee past the queue, since workers race to dequeue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub sequence: u64,
    pub payload: Vec<u8>,
}

/// Iterator producing a fixed number of randomly sized, randomly filled
/// blobs.
///
/// Sizes are sampled uniformly from `[min_bytes, max_bytes]`; contents are
/// uniformly random. Sequence numbers start at zero and increase by one per
/// blob.
#[derive(Debug)]
pub struct BlobProvider {
    count: u64,
    emitted: u64,
    min_bytes: usize,
    max_bytes: usize,
}

impl BlobProvider {
    /// Creates a provider for `count` blobs sized within
    /// `[min_bytes, max_bytes]`. A max below min is raised to min.
    pub fn new(count: u64, min_bytes: usize, max_bytes: usize) -> Self {
        Self {
            count,
            emitted: 0,
            min_bytes,
            max_bytes: max_bytes.max(min_bytes),
        }
    }

    /// Creates a provider with the default size bounds (1 KiB to 1 MiB).
    pub fn with_default_sizes(count: u64) -> Self {
        Self::new(count, MIN_BLOB_BYTES, MAX_BLOB_BYTES)
    }

    /// Number of blobs this provider will still emit.
    pub fn remaining(&self) -> u64 {
        self.count - self.emitted
    }
}

impl Iterator for BlobProvider {
    type Item = Blob;

    fn next(&mut self) -> Option<Blob> {
        if self.emitted == self.count {
            return None;
        }

        let mut rng = rand::thread_rng();
        let size = rng.gen_range(self.min_bytes..=self.max_bytes);
        let mut payload = vec![0u8; size];
        rng.fill(payload.as_mut_slice());

        let blob = Blob {
            sequence: self.emitted,
            payload,
        };
        self.emitted += 1;
        Some(blob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_emits_exactly_count_blobs() {
        let provider = BlobProvider::new(7, 8, 16);
        assert_eq!(provider.count(), 7);
    }

    #[test]
    fn provider_sizes_stay_within_bounds() {
        for blob in BlobProvider::new(50, 8, 32) {
            assert!(blob.payload.len() >= 8, "undersized: {}", blob.payload.len());
            assert!(blob.payload.len() <= 32, "oversized: {}", blob.payload.len());
        }
    }

    #[test]
    fn provider_default_bounds_hold() {
        let blob = BlobProvider::with_default_sizes(1)
            .next()
            .expect("one blob");
        assert!(blob.payload.len() >= MIN_BLOB_BYTES);
        assert!(blob.payload.len() <= MAX_BLOB_BYTES);
    }

    #[test]
    fn provider_sequences_are_monotonic() {
        let sequences: Vec<u64> = BlobProvider::new(10, 4, 8).map(|b| b.sequence).collect();
        assert_eq!(sequences, (0..10).collect::<Vec<u64>>());
    }

    #[test]
    fn provider_payloads_are_random() {
        let mut provider = BlobProvider::new(2, 64, 64);
        let a = provider.next().expect("first");
        let b = provider.next().expect("second");
        assert_ne!(a.payload, b.payload);
    }

    #[test]
    fn provider_tracks_remaining() {
        let mut provider = BlobProvider::new(3, 4, 8);
        assert_eq!(provider.remaining(), 3);
        provider.next();
        assert_eq!(provider.remaining(), 2);
    }

    #[test]
    fn provider_raises_inverted_max_to_min() {
        let blob = BlobProvider::new(1, 16, 4).next().expect("one blob");
        assert_eq!(blob.payload.len(), 16);
    }
}
