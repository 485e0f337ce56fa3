//! Application services: command handlers, queries, and the spin
//! driver, tied together by the controller.

pub mod command_handlers;
pub mod controller;
pub mod query_handlers;
pub mod spin_driver;
