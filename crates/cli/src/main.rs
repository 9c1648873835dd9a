mod commands;
mod remote;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mala_counter_core::TrackedItem;
use mala_counter_service::ExportFormat;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::remote::RemoteStore;

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000";

#[derive(Parser)]
#[command(name = "mala-counter")]
#[command(about = "Mantra recitation counter with per-deity mala tallies", long_about = None)]
#[command(version)]
struct Cli {
    /// Base URL of a running mala-counter server (client commands only)
    #[arg(long, global = true, env = "MALA_COUNTER_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        #[arg(short, long, default_value = "5000", env = "MALA_COUNTER_PORT")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1", env = "MALA_COUNTER_HOST")]
        host: String,
    },
    /// Print the current record as JSON
    Show,
    /// List tracked deities and mantras
    Items,
    /// Count one recitation on the live counter
    Increment {
        #[arg(long, default_value = "amitabha")]
        item: TrackedItem,
    },
    /// Add whole malas to an item (zero or negative does nothing)
    Add {
        item: TrackedItem,
        #[arg(allow_negative_numbers = true)]
        count: i64,
    },
    /// Zero an item's completed malas and recitations
    Reset { item: TrackedItem },
    /// Reset every counter and image
    ResetAll {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
    /// Upload a custom icon for an item
    SetImage { item: TrackedItem, path: PathBuf },
    /// Restore an item's default icon
    ClearImage { item: TrackedItem },
    /// Download a backup (json) or spreadsheet (xlsx)
    Export {
        format: ExportFormat,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Restore counters from a JSON backup
    Import { path: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let remote = || RemoteStore::new(&cli.endpoint);
    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(port, host).await,
        Commands::Show => commands::counter::show(&remote()).await,
        Commands::Items => commands::counter::items(),
        Commands::Increment { item } => commands::counter::increment(remote(), item).await,
        Commands::Add { item, count } => commands::counter::add(remote(), item, count).await,
        Commands::Reset { item } => commands::counter::reset(remote(), item).await,
        Commands::ResetAll { yes } => commands::counter::reset_all(&remote(), yes).await,
        Commands::SetImage { item, path } => commands::image::set(&remote(), item, &path).await,
        Commands::ClearImage { item } => commands::image::clear(&remote(), item).await,
        Commands::Export { format, output } => {
            commands::backup::export(&remote(), format, output).await
        },
        Commands::Import { path } => commands::backup::import(&remote(), &path).await,
    }
}
