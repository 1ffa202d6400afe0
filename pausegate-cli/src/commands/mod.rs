//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod pause;
mod status;

use anyhow::Result;
use clap::Subcommand;
use pausegate_client::PauseGateClient;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Pause a pipeline system
    Pause {
        /// Pipeline system to pause
        pipeline_system: String,

        /// Why the system is being paused
        #[arg(long)]
        because: String,
    },
    /// Resolve a pause event, unpausing the system if it was the last one
    Resolve {
        /// Pause event ID
        event_id: String,
    },
    /// Show pause status of one or all pipeline systems
    Status {
        /// Pipeline system (all systems when omitted)
        pipeline_system: Option<String>,

        /// Only list systems that are paused
        #[arg(long)]
        paused_only: bool,
    },
    /// List configured pipeline systems and their pipelines
    Systems,
    /// Recreate missing historical pause records
    Reconcile,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    let client = PauseGateClient::new(&config.server_url);

    match command {
        Commands::Pause {
            pipeline_system,
            because,
        } => pause::pause_system(&client, config.who()?, &pipeline_system, &because).await,
        Commands::Resolve { event_id } => {
            pause::resolve_event(&client, config.who()?, &event_id).await
        }
        Commands::Status {
            pipeline_system,
            paused_only,
        } => status::show_status(&client, pipeline_system.as_deref(), paused_only).await,
        Commands::Systems => status::list_systems(&client).await,
        Commands::Reconcile => pause::reconcile(&client).await,
    }
}
