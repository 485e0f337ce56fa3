//! Domain model for the picker machine.

pub mod aggregates;
pub mod commands;
pub mod events;
pub mod history;
