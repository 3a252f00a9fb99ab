//! Blobcast sender entry point.

mod app;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use blobcast_pipeline::{DEFAULT_BLOB_COUNT, DEFAULT_POOL_SIZE};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Default receiver address to upload to.
const DEFAULT_ADDRESS: &str = "127.0.0.1";
/// Default receiver port.
const DEFAULT_PORT: u16 = 8000;
/// Default corruption probability when injection is switched on.
const DEFAULT_CORRUPTION_RATE: f64 = 0.1;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Address of the receiver to upload to.
    #[arg(short, long, default_value = DEFAULT_ADDRESS)]
    address: String,
    /// Port the receiver is listening on.
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,
    /// Number of blobs to generate.
    #[arg(short, long, default_value_t = DEFAULT_BLOB_COUNT)]
    num_blobs: u64,
    /// Number of concurrent sender workers.
    #[arg(short = 'w', long, default_value_t = DEFAULT_POOL_SIZE)]
    num_workers: usize,
    /// Directory the sender-side copy of each blob is written to.
    #[arg(short = 'd', long, default_value = "/tmp")]
    blob_dir: PathBuf,
    /// Write logs to this file instead of stdout.
    #[arg(short = 'f', long)]
    logfile: Option<PathBuf>,
    /// Corrupt a fraction of payloads after their checksum is taken.
    #[arg(long)]
    inject_corruption: bool,
    /// Probability that a payload is corrupted when injection is enabled.
    #[arg(long, default_value_t = DEFAULT_CORRUPTION_RATE)]
    corruption_rate: f64,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.logfile.as_deref())?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "starting blobcast sender"
    );

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(app::run(args))?;

    tracing::info!("Done!");
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
