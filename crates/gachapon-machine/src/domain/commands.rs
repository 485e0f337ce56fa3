//! Commands for the picker machine.

use gachapon_core::command::Command;
use uuid::Uuid;

/// Command to start a spin.
#[derive(Debug, Clone)]
pub struct SpinMachine {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for SpinMachine {
    fn command_type(&self) -> &'static str {
        "machine.spin"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to add an option to the registry.
#[derive(Debug, Clone)]
pub struct AddOption {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The label to add, as entered by the user.
    pub label: String,
}

impl Command for AddOption {
    fn command_type(&self) -> &'static str {
        "machine.add_option"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to remove an option from the registry.
#[derive(Debug, Clone)]
pub struct RemoveOption {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The exact label to remove.
    pub label: String,
}

impl Command for RemoveOption {
    fn command_type(&self) -> &'static str {
        "machine.remove_option"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to reset pick statistics, keeping the option list.
#[derive(Debug, Clone)]
pub struct ResetStats {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for ResetStats {
    fn command_type(&self) -> &'static str {
        "machine.reset_stats"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
