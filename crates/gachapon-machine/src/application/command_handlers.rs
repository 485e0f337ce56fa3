//! Command handlers for registry edits and stats resets.
//!
//! Each handler locks the machine, applies the domain mutation, and on
//! success persists a snapshot before notifying listeners. Validation
//! failures surface as an error notice and are never persisted.

use tokio::sync::{Mutex, mpsc};
use tracing::{debug, error, info, instrument};

use gachapon_core::command::Command;
use gachapon_core::error::GachaError;
use gachapon_core::store::StateStore;

use crate::domain::aggregates::GachaMachine;
use crate::domain::commands::{AddOption, RemoveOption, ResetStats};
use crate::domain::events::{MachineEvent, Severity};

/// Persists a snapshot of the machine, logging on failure.
///
/// A failed save never aborts the command that triggered it; the
/// in-memory state stays authoritative and the next successful save
/// catches up.
pub(crate) async fn persist_state(machine: &GachaMachine, store: &dyn StateStore) {
    if let Err(err) = store.save(&machine.to_persisted()).await {
        error!(error = %err, "failed to persist machine state");
    }
}

/// Sends an event to whoever is listening.
pub(crate) fn notify(events: &mpsc::UnboundedSender<MachineEvent>, event: MachineEvent) {
    if events.send(event).is_err() {
        debug!("event receiver dropped, notification skipped");
    }
}

/// Handles the add option command.
///
/// Returns the label as stored (trimmed).
///
/// # Errors
///
/// Returns `GachaError::Validation` when the label fails validation.
#[instrument(skip(machine, store, events), fields(command_type = command.command_type()))]
pub async fn handle_add_option(
    command: AddOption,
    machine: &Mutex<GachaMachine>,
    store: &dyn StateStore,
    events: &mpsc::UnboundedSender<MachineEvent>,
) -> Result<String, GachaError> {
    info!(correlation_id = %command.correlation_id, "handling add option command");

    let mut machine = machine.lock().await;
    match machine.add_option(&command.label) {
        Ok(label) => {
            persist_state(&machine, store).await;
            notify(events, MachineEvent::OptionAdded {
                label: label.clone(),
            });
            notify(events, MachineEvent::Notice {
                severity: Severity::Success,
                message: "Option added successfully!".to_owned(),
            });
            Ok(label)
        }
        Err(err) => {
            notify(events, MachineEvent::Notice {
                severity: Severity::Error,
                message: err.user_message().to_owned(),
            });
            Err(err)
        }
    }
}

/// Handles the remove option command.
///
/// Removing a label that is not in the registry still counts as
/// success.
///
/// # Errors
///
/// Returns `GachaError::Validation` when only one option remains.
#[instrument(skip(machine, store, events), fields(command_type = command.command_type()))]
pub async fn handle_remove_option(
    command: RemoveOption,
    machine: &Mutex<GachaMachine>,
    store: &dyn StateStore,
    events: &mpsc::UnboundedSender<MachineEvent>,
) -> Result<(), GachaError> {
    info!(correlation_id = %command.correlation_id, "handling remove option command");

    let mut machine = machine.lock().await;
    match machine.remove_option(&command.label) {
        Ok(()) => {
            persist_state(&machine, store).await;
            notify(events, MachineEvent::OptionRemoved {
                label: command.label.clone(),
            });
            notify(events, MachineEvent::Notice {
                severity: Severity::Success,
                message: "Option removed successfully!".to_owned(),
            });
            Ok(())
        }
        Err(err) => {
            notify(events, MachineEvent::Notice {
                severity: Severity::Error,
                message: err.user_message().to_owned(),
            });
            Err(err)
        }
    }
}

/// Handles the reset stats command. Cannot fail; the option list is
/// kept.
#[instrument(skip(machine, store, events), fields(command_type = command.command_type()))]
pub async fn handle_reset_stats(
    command: ResetStats,
    machine: &Mutex<GachaMachine>,
    store: &dyn StateStore,
    events: &mpsc::UnboundedSender<MachineEvent>,
) {
    info!(correlation_id = %command.correlation_id, "handling reset stats command");

    let mut machine = machine.lock().await;
    machine.reset_stats();
    persist_state(&machine, store).await;
    notify(events, MachineEvent::StatsReset);
    notify(events, MachineEvent::Notice {
        severity: Severity::Success,
        message: "Statistics reset successfully!".to_owned(),
    });
}
