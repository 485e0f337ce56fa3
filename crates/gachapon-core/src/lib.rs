//! Gachapon Core: shared abstractions for the picker engine.
//!
//! This crate defines the fundamental traits and types that the machine
//! and storage crates depend on. It contains no infrastructure code.

pub mod clock;
pub mod command;
pub mod error;
pub mod rng;
pub mod store;
