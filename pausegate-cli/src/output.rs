//! Output formatting
//!
//! Plain-text renderings of server responses. Color is applied by the
//! command handlers when printing.

use pausegate_core::domain::PauseEvent;
use pausegate_core::dto::pause::{ReconcileReport, RemoveStatus, SystemStatus};

pub fn pause_added(event_id: &str, pipeline_system: &str) -> String {
    format!(
        "Added pause event {} for system '{}' - paused the system.",
        event_id, pipeline_system
    )
}

pub fn event_removed(event_id: &str, status: &RemoveStatus) -> String {
    let mut message = format!(
        "Event '{}' successfully removed from system '{}'",
        event_id, status.pipeline_system
    );
    if status.unpaused {
        message.push_str(" - unpaused the system.");
    } else {
        message.push_str(&format!(
            " - {} pause event(s) remaining.",
            status.num_remaining_events
        ));
    }
    message
}

pub fn event_not_found(event_id: &str) -> String {
    format!("Event '{}' was not found.", event_id)
}

pub fn multiple_events_found(event_id: &str) -> String {
    format!(
        "Multiple events found with ID '{}'? Should not happen - check the object store.",
        event_id
    )
}

fn paused_for(count: usize) -> String {
    format!("PAUSED for {} reason(s)", count)
}

/// One event, indented under its system
pub fn pause_event(event: &PauseEvent) -> String {
    format!(
        "        {} paused by {} at {}: {}",
        event.event_id, event.who_paused, event.time_paused, event.pause_reason
    )
}

/// Status of one pipeline system, with its events
pub fn system_status(pipeline_system: &str, events: &[PauseEvent]) -> String {
    let mut output = format!("Pipeline system: {}\n", pipeline_system);
    if events.is_empty() {
        output.push_str("    ACTIVE");
        return output;
    }

    output.push_str(&format!("    {}", paused_for(events.len())));
    for event in events {
        output.push('\n');
        output.push_str(&pause_event(event));
    }
    output
}

/// One line per pipeline system
pub fn all_statuses(statuses: &SystemStatus, paused_only: bool) -> String {
    let mut output = String::from("Pipeline systems:");

    let shown: Vec<_> = statuses
        .iter()
        .filter(|(_, events)| !(paused_only && events.is_empty()))
        .collect();

    if shown.is_empty() {
        output.push_str("\n     All systems active.");
        return output;
    }

    for (system, events) in shown {
        let state = if events.is_empty() {
            "ACTIVE".to_string()
        } else {
            paused_for(events.len())
        };
        output.push_str(&format!("\n{:>10}: {}", system, state));
    }
    output
}

pub fn reconcile_report(report: &ReconcileReport) -> String {
    let mut output = format!(
        "Scanned {} current pause event(s), repaired {}.",
        report.scanned,
        report.repaired.len()
    );
    for event_id in &report.repaired {
        output.push_str(&format!("\n    recreated history for {}", event_id));
    }
    output
}
