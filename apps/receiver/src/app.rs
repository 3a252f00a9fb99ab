//! Wires the upload server to configuration and signal handling.

use blobcast_upload_server::{ReceiverConfig, UploadServer};

use crate::Args;

/// Serves uploads until interrupted.
pub async fn run(args: Args) -> anyhow::Result<()> {
    let config = ReceiverConfig {
        save_dir: args.uploads_dir,
        verify_checksums: !args.disable_checksum_verification,
    };

    let server = UploadServer::new(config);

    // SIGINT stops accepting connections; requests already in flight
    // complete before the server returns.
    let shutdown = std::sync::Arc::clone(&server);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("SIGINT received, shutting down");
            shutdown.shutdown();
        }
    });

    server.run((args.address.as_str(), args.port)).await?;
    Ok(())
}
