//! Blobcast receiver entry point.

mod app;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Default address to listen on.
const DEFAULT_ADDRESS: &str = "127.0.0.1";
/// Default listening port.
const DEFAULT_PORT: u16 = 8000;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Address to listen on.
    #[arg(short, long, default_value = DEFAULT_ADDRESS)]
    address: String,
    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,
    /// Directory received blobs are written to.
    #[arg(short = 'd', long, default_value = "/tmp")]
    uploads_dir: PathBuf,
    /// Write logs to this file instead of stdout.
    #[arg(short = 'f', long)]
    logfile: Option<PathBuf>,
    /// Accept uploads even when the declared checksum does not match.
    #[arg(long)]
    disable_checksum_verification: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.logfile.as_deref())?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "starting blobcast receiver"
    );

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(app::run(args))?;

    tracing::info!("receiver shut down cleanly");
    Ok(())
}

fn init_logging(logfile: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match logfile {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
    Ok(())
}
