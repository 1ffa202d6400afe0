//! Pause command handlers

use anyhow::Result;
use colored::*;
use pausegate_client::PauseGateClient;

use crate::output;

/// Pause a pipeline system
pub async fn pause_system(
    client: &PauseGateClient,
    who: &str,
    pipeline_system: &str,
    reason: &str,
) -> Result<()> {
    match client.pause_system(who, pipeline_system, reason).await {
        Ok(added) => {
            println!(
                "{} {}",
                "✓".green().bold(),
                output::pause_added(&added.event_id, pipeline_system)
            );
            Ok(())
        }
        Err(err) if err.is_not_found() => {
            let message = err.api_message().unwrap_or("Unknown pipeline system");
            anyhow::bail!("{}", message)
        }
        Err(err) => Err(err.into()),
    }
}

/// Resolve a pause event
pub async fn resolve_event(client: &PauseGateClient, who: &str, event_id: &str) -> Result<()> {
    match client.resolve_event(who, event_id).await {
        Ok(status) => {
            let message = output::event_removed(event_id, &status);
            if status.unpaused {
                println!("{} {}", "✓".green().bold(), message);
            } else {
                println!("{} {}", "✓".green().bold(), message.yellow());
            }
            Ok(())
        }
        Err(err) if err.is_not_found() => anyhow::bail!("{}", output::event_not_found(event_id)),
        Err(err) if err.is_conflict() => {
            anyhow::bail!("{}", output::multiple_events_found(event_id))
        }
        Err(err) => Err(err.into()),
    }
}

/// Recreate missing historical records
pub async fn reconcile(client: &PauseGateClient) -> Result<()> {
    let report = client.reconcile().await?;
    let message = output::reconcile_report(&report);

    if report.repaired.is_empty() {
        println!("{} {}", "✓".green().bold(), message);
    } else {
        println!("{} {}", "✓".green().bold(), message.yellow());
    }

    Ok(())
}
