//! Gachapon picker engine: the machine bounded context.
//!
//! Owns the option registry, the spin state machine, pick statistics,
//! and the draw history. Presentation layers drive it through
//! [`application::controller::GachaController`] and react to the
//! outbound event stream; nothing in this crate touches a display
//! surface.

pub mod application;
pub mod config;
pub mod domain;
