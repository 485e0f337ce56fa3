//! Events emitted by the picker machine.
//!
//! Presentation layers consume these over the controller's event
//! channel and render accordingly. The serialized form uses a `type`
//! tag so the stream can cross a process boundary unchanged.

use serde::{Deserialize, Serialize};

use super::history::DrawRecord;

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The request was rejected.
    Error,
    /// The request completed.
    Success,
    /// Neutral information.
    Info,
}

/// Outcome of a resolved draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawOutcome {
    /// A real option was drawn and recorded.
    Picked(DrawRecord),
    /// Every option already appears in the history; nothing was drawn.
    AllCompleted,
}

/// Events emitted by the machine, in the order they happen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MachineEvent {
    /// A spin has started; the machine rejects further spins until it
    /// settles.
    SpinStarted,
    /// Interim candidate flashed while the spin is running.
    SpinTick {
        /// The candidate label to display.
        candidate: String,
    },
    /// The spin outcome has been committed.
    SpinResolved {
        /// What was drawn.
        outcome: DrawOutcome,
        /// Options still missing from the history after this draw.
        remaining_uncompleted: usize,
    },
    /// The settle pause has elapsed; the machine accepts spins again.
    SpinSettled,
    /// An option was added to the registry.
    OptionAdded {
        /// The stored (trimmed) label.
        label: String,
    },
    /// An option was removed from the registry.
    OptionRemoved {
        /// The removed label.
        label: String,
    },
    /// Pick statistics were reset.
    StatsReset,
    /// A user-facing notice.
    Notice {
        /// How to present the notice.
        severity: Severity,
        /// The message text.
        message: String,
    },
}
