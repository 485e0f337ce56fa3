//! Shared test fakes and utilities for the gachapon picker engine.

mod clock;
mod rng;
mod store;

pub use clock::FixedClock;
pub use rng::{MockRng, SequenceRng};
pub use store::{FailingStateStore, MemoryStateStore};
