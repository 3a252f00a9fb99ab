//! Upload server lifecycle: bind, serve, drain, stop.

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::{TcpListener, ToSocketAddrs};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::ReceiverConfig;
use crate::handler;

/// Errors that prevent the server from serving at all.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The blob upload server.
///
/// Binds a TCP listener and serves the upload route until [`shutdown`] is
/// called; requests already in flight finish before [`run`] returns, so a
/// stop can never truncate a write.
///
/// [`run`]: UploadServer::run
/// [`shutdown`]: UploadServer::shutdown
pub struct UploadServer {
    config: Arc<ReceiverConfig>,
    cancel: CancellationToken,
    local_addr: Mutex<Option<SocketAddr>>,
}

impl UploadServer {
    /// Creates a new server with the given configuration.
    pub fn new(config: ReceiverConfig) -> Arc<Self> {
        Arc::new(Self {
            config: Arc::new(config),
            cancel: CancellationToken::new(),
            local_addr: Mutex::new(None),
        })
    }

    /// Returns the bound address.
    ///
    /// Only available after [`run`] has bound the socket; binding to port 0
    /// and reading this back is how tests find the server.
    ///
    /// [`run`]: UploadServer::run
    pub async fn local_addr(&self) -> Option<SocketAddr> {
        *self.local_addr.lock().await
    }

    /// Requests a graceful stop: no new connections, in-flight uploads
    /// finish.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Binds `addr` and serves until shutdown.
    pub async fn run(self: &Arc<Self>, addr: impl ToSocketAddrs) -> Result<(), ServeError> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        *self.local_addr.lock().await = Some(local_addr);
        info!(
            addr = %local_addr,
            strict = self.config.verify_checksums,
            dir = %self.config.save_dir.display(),
            "upload server listening"
        );

        let app = handler::router(Arc::clone(&self.config));
        let cancel = self.cancel.clone();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { cancel.cancelled().await })
            .await?;

        info!("upload server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn run_binds_port_zero_and_reports_the_address() {
        let dir = tempfile::tempdir().unwrap();
        let server = UploadServer::new(ReceiverConfig {
            save_dir: dir.path().to_path_buf(),
            verify_checksums: true,
        });

        let task = Arc::clone(&server);
        let handle = tokio::spawn(async move { task.run("127.0.0.1:0").await });

        let addr = loop {
            if let Some(addr) = server.local_addr().await {
                break addr;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        };
        assert_ne!(addr.port(), 0);

        server.shutdown();
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn shutdown_before_any_request_unblocks_run() {
        let dir = tempfile::tempdir().unwrap();
        let server = UploadServer::new(ReceiverConfig {
            save_dir: dir.path().to_path_buf(),
            verify_checksums: true,
        });

        let task = Arc::clone(&server);
        let handle = tokio::spawn(async move { task.run("127.0.0.1:0").await });
        while server.local_addr().await.is_none() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        server.shutdown();
        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("run did not stop");
        assert!(result.unwrap().is_ok());
    }

    #[tokio::test]
    async fn bind_failure_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let server = UploadServer::new(ReceiverConfig {
            save_dir: dir.path().to_path_buf(),
            verify_checksums: true,
        });

        let result = server.run("256.256.256.256:0").await;
        assert!(result.is_err());
    }
}
