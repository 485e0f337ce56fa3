//! Shared helpers for machine integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{TimeZone, Utc};
use tokio::sync::mpsc::UnboundedReceiver;

use gachapon_core::rng::DrawRng;
use gachapon_core::store::StateStore;
use gachapon_machine::application::controller::GachaController;
use gachapon_machine::config::MachineConfig;
use gachapon_machine::domain::events::MachineEvent;
use gachapon_test_support::{FixedClock, MemoryStateStore};

pub fn fixed_clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
}

/// A controller wired to in-memory collaborators, plus handles for
/// inspecting what it emitted and saved.
pub struct TestHarness {
    pub controller: GachaController,
    pub events: UnboundedReceiver<MachineEvent>,
    pub store: Arc<MemoryStateStore>,
}

pub async fn build_controller(config: MachineConfig, rng: impl DrawRng + 'static) -> TestHarness {
    build_controller_with_store(config, rng, Arc::new(MemoryStateStore::new())).await
}

pub async fn build_controller_with_store(
    config: MachineConfig,
    rng: impl DrawRng + 'static,
    store: Arc<MemoryStateStore>,
) -> TestHarness {
    let rng: Arc<Mutex<dyn DrawRng>> = Arc::new(Mutex::new(rng));
    let (controller, events) = GachaController::load(
        config,
        Arc::new(fixed_clock()),
        rng,
        Arc::clone(&store) as Arc<dyn StateStore>,
    )
    .await
    .expect("loading from a memory store cannot fail");

    TestHarness {
        controller,
        events,
        store,
    }
}

/// Receive the next event, panicking instead of hanging forever if the
/// machine never emits one.
pub async fn recv_event(events: &mut UnboundedReceiver<MachineEvent>) -> MachineEvent {
    tokio::time::timeout(Duration::from_secs(30), events.recv())
        .await
        .expect("timed out waiting for a machine event")
        .expect("event channel closed")
}
