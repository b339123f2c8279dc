use std::net::SocketAddr;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use runner::{HttpBatchClient, RunPhase, Runner};
use server::Config;

#[derive(Parser)]
#[command(name = "acervo", about = "Catalog ingestion server and run driver")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the ingestion HTTP server
    Serve {
        #[arg(long, env = "PORT", default_value_t = 3000)]
        port: u16,
    },
    /// Drive a full ingestion run against a running server
    Run {
        /// Dataset variant to ingest (see GET /catalogs)
        #[arg(long)]
        variant: String,
        #[arg(long, default_value_t = 12)]
        batch_size: usize,
        /// Offset to resume from, as reported by a previous paused run
        #[arg(long, default_value_t = 0)]
        start_index: usize,
        #[arg(long, default_value = "http://127.0.0.1:3000")]
        server: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match Cli::parse().command {
        Command::Serve { port } => {
            let config = Config::from_env()?;
            let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;
            server::run_server(addr, config).await
        }
        Command::Run {
            variant,
            batch_size,
            start_index,
            server,
        } => run_ingest(variant, batch_size, start_index, server).await,
    }
}

async fn run_ingest(
    variant: String,
    batch_size: usize,
    start_index: usize,
    server_url: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(120))
        .build()?;
    let executor = HttpBatchClient::new(client, server_url);
    let mut runner = Runner::new(std::sync::Arc::new(executor), variant, batch_size);

    // Ctrl-C pauses cooperatively; the in-flight batch completes first
    let pause = runner.pause_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Stop requested, pausing after the current batch");
            pause.store(true, std::sync::atomic::Ordering::SeqCst);
        }
    });

    let phase = runner.start_from(start_index).await;
    let state = runner.state();
    tracing::info!(
        "Run finished in phase {:?}: {} inserted, {} skipped, next offset {}",
        phase,
        state.cumulative_inserted,
        state.cumulative_skipped,
        state.offset
    );

    if phase == RunPhase::Paused {
        tracing::info!(
            "Resume later with --start-index {} (run state is not persisted server-side)",
            state.offset
        );
    }

    Ok(())
}
