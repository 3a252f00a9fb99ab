//! Multi-consumer handoff between the blob source and the sender workers.

use std::sync::Arc;

use blobcast_generator::Blob;
use tokio::sync::{Mutex, mpsc};

/// Creates a bounded queue, returning the producer handle and the shared
/// consumer end.
///
/// Dropping the producer closes the stream: `take` drains whatever is still
/// buffered and then answers `None`. A capacity of zero is raised to one.
pub fn work_queue(capacity: usize) -> (mpsc::Sender<Blob>, WorkQueue) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (
        tx,
        WorkQueue {
            inner: Arc::new(Mutex::new(rx)),
        },
    )
}

/// FIFO, single-delivery queue shared by every sender worker.
///
/// Clones share one underlying channel; whichever worker locks first gets
/// the next blob. The lock is only ever held across a single `recv`, so a
/// waiting consumer never starves one holding work.
#[derive(Debug, Clone)]
pub struct WorkQueue {
    inner: Arc<Mutex<mpsc::Receiver<Blob>>>,
}

impl WorkQueue {
    /// Takes the next blob, waiting for one to arrive.
    ///
    /// Returns `None` once the producer is gone and the buffer is empty.
    pub async fn take(&self) -> Option<Blob> {
        self.inner.lock().await.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn blob(sequence: u64) -> Blob {
        Blob {
            sequence,
            payload: vec![0xAB; 4],
        }
    }

    #[tokio::test]
    async fn delivers_in_fifo_order_to_a_single_consumer() {
        let (tx, queue) = work_queue(8);
        for sequence in 0..5 {
            tx.send(blob(sequence)).await.unwrap();
        }
        drop(tx);

        let mut sequences = Vec::new();
        while let Some(blob) = queue.take().await {
            sequences.push(blob.sequence);
        }
        assert_eq!(sequences, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn delivers_each_blob_exactly_once_across_consumers() {
        let (tx, queue) = work_queue(4);

        let mut consumers = Vec::new();
        for _ in 0..3 {
            let queue = queue.clone();
            consumers.push(tokio::spawn(async move {
                let mut taken = Vec::new();
                while let Some(blob) = queue.take().await {
                    taken.push(blob.sequence);
                    // Yield so the other consumers get a turn at the lock.
                    tokio::time::sleep(Duration::from_millis(1)).await;
                }
                taken
            }));
        }

        for sequence in 0..30 {
            tx.send(blob(sequence)).await.unwrap();
        }
        drop(tx);

        let mut all = Vec::new();
        for consumer in consumers {
            all.extend(consumer.await.unwrap());
        }
        all.sort_unstable();
        assert_eq!(all, (0..30).collect::<Vec<u64>>());
    }

    #[tokio::test]
    async fn every_consumer_observes_end_of_stream() {
        let (tx, queue) = work_queue(1);
        drop(tx);

        for _ in 0..4 {
            assert!(queue.take().await.is_none());
        }
    }

    #[tokio::test]
    async fn take_waits_for_work_to_arrive() {
        let (tx, queue) = work_queue(1);

        let waiter = tokio::spawn(async move { queue.take().await });
        tokio::time::sleep(Duration::from_millis(20)).await;
        tx.send(blob(9)).await.unwrap();

        let taken = waiter.await.unwrap();
        assert_eq!(taken.map(|b| b.sequence), Some(9));
    }
}
