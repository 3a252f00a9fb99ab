//! Wires the sender pipeline to configuration and signal handling.

use blobcast_pipeline::{SenderConfig, SenderPool};
use blobcast_protocol::UPLOAD_PATH;

use crate::Args;

/// Runs the pipeline to completion or until interrupted.
pub async fn run(args: Args) -> anyhow::Result<()> {
    let corrupt_probability = if args.inject_corruption {
        args.corruption_rate
    } else {
        0.0
    };

    let config = SenderConfig {
        upload_url: format!("http://{}:{}{}", args.address, args.port, UPLOAD_PATH),
        save_dir: args.blob_dir,
        num_blobs: args.num_blobs,
        num_workers: args.num_workers,
        corrupt_probability,
        ..SenderConfig::default()
    };

    let pool = SenderPool::new(config);

    // SIGINT stops the blob source; blobs already queued still drain
    // through the workers before the run returns.
    let cancel = pool.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("SIGINT received, stopping blob source");
            cancel.cancel();
        }
    });

    let report = pool.run().await?;

    tracing::info!(
        generated = report.generated,
        succeeded = report.succeeded(),
        failed = report.failed(),
        "all workers finished"
    );
    Ok(())
}
