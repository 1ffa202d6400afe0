//! Pausegate CLI
//!
//! Command-line interface for pausing and resuming pipeline systems.

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;

#[derive(Parser)]
#[command(name = "pausegate")]
#[command(about = "Pause and resume release pipeline systems", long_about = None)]
struct Cli {
    /// Pausegate server URL
    #[arg(
        long,
        env = "PAUSEGATE_SERVER_URL",
        default_value = "http://localhost:8080"
    )]
    server_url: String,

    /// Operator name recorded on pause events
    #[arg(long, env = "USER")]
    who: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        server_url: cli.server_url,
        who: cli.who,
    };

    handle_command(cli.command, &config).await
}
