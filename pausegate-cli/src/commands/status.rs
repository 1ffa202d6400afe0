//! Status command handlers

use anyhow::Result;
use colored::*;
use pausegate_client::PauseGateClient;

use crate::output;

/// Show the status of one or all pipeline systems
pub async fn show_status(
    client: &PauseGateClient,
    pipeline_system: Option<&str>,
    paused_only: bool,
) -> Result<()> {
    let statuses = match client.status(pipeline_system, paused_only).await {
        Ok(statuses) => statuses,
        Err(err) if err.is_not_found() => {
            let message = err.api_message().unwrap_or("Unknown pipeline system");
            anyhow::bail!("{}", message)
        }
        Err(err) => return Err(err.into()),
    };

    let rendered = match pipeline_system {
        Some(system) => {
            let events = statuses.get(system).map(Vec::as_slice).unwrap_or_default();
            output::system_status(system, events)
        }
        None => output::all_statuses(&statuses, paused_only),
    };

    for line in rendered.lines() {
        if line.contains("PAUSED") {
            println!("{}", line.red().bold());
        } else if line.contains("ACTIVE") || line.contains("active") {
            println!("{}", line.green());
        } else {
            println!("{}", line);
        }
    }

    Ok(())
}

/// List configured pipeline systems
pub async fn list_systems(client: &PauseGateClient) -> Result<()> {
    let registry = client.list_systems().await?;

    println!(
        "{}",
        format!("Found {} pipeline system(s):", registry.len()).bold()
    );
    for (system, pipelines) in registry.iter() {
        println!("  {}", system.cyan());
        for pipeline in pipelines {
            println!("    - {}", pipeline.dimmed());
        }
    }

    Ok(())
}
