//! The controller: the public face of one picker machine.
//!
//! Presentation layers hold a `GachaController`, send intents through
//! its methods, and render the `MachineEvent` stream handed out at
//! load time. The controller owns no task of its own; each spin runs
//! on a task spawned for it.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, mpsc};
use tracing::{info, instrument};
use uuid::Uuid;

use gachapon_core::clock::{Clock, SystemClock};
use gachapon_core::error::GachaError;
use gachapon_core::rng::{DrawRng, StdDrawRng};
use gachapon_core::store::StateStore;

use super::command_handlers::{self, notify};
use super::query_handlers::{self, DrawView, StatsView};
use super::spin_driver::SpinRun;
use crate::config::{MachineConfig, SpinTiming};
use crate::domain::aggregates::{GachaMachine, SpinAttempt, SpinPhase};
use crate::domain::commands::{AddOption, RemoveOption, ResetStats, SpinMachine};
use crate::domain::events::MachineEvent;

/// Handle to a running picker machine. Cloning is cheap; clones share
/// the same machine.
#[derive(Clone)]
pub struct GachaController {
    machine: Arc<AsyncMutex<GachaMachine>>,
    clock: Arc<dyn Clock>,
    rng: Arc<Mutex<dyn DrawRng>>,
    store: Arc<dyn StateStore>,
    events: mpsc::UnboundedSender<MachineEvent>,
    timing: SpinTiming,
}

impl GachaController {
    /// Loads the machine from the store, falling back to configuration
    /// defaults when nothing is persisted, and hand back the controller
    /// together with its event stream.
    ///
    /// # Errors
    ///
    /// Returns `GachaError::Persistence` when the store cannot be read.
    /// A present but malformed blob is the store's problem and does not
    /// surface here.
    pub async fn load(
        config: MachineConfig,
        clock: Arc<dyn Clock>,
        rng: Arc<Mutex<dyn DrawRng>>,
        store: Arc<dyn StateStore>,
    ) -> Result<(Self, mpsc::UnboundedReceiver<MachineEvent>), GachaError> {
        let machine = match store.load().await? {
            Some(state) => GachaMachine::from_persisted(&config, state),
            None => GachaMachine::new(&config),
        };
        let (events, receiver) = mpsc::unbounded_channel();

        let controller = Self {
            machine: Arc::new(AsyncMutex::new(machine)),
            clock,
            rng,
            store,
            events,
            timing: config.timing,
        };
        Ok((controller, receiver))
    }

    /// Loads with the system clock and an operating-system-seeded RNG.
    ///
    /// # Errors
    ///
    /// Returns `GachaError::Persistence` when the store cannot be read.
    pub async fn load_with_defaults(
        config: MachineConfig,
        store: Arc<dyn StateStore>,
    ) -> Result<(Self, mpsc::UnboundedReceiver<MachineEvent>), GachaError> {
        let rng: Arc<Mutex<dyn DrawRng>> = Arc::new(Mutex::new(StdDrawRng::new()));
        Self::load(config, Arc::new(SystemClock), rng, store).await
    }

    /// Starts a spin.
    ///
    /// Rolls a duration, emits `SpinStarted`, and spawns a driver task
    /// that ticks out interim candidates before committing the outcome.
    /// Attempts made while the machine is busy or the registry is empty
    /// are rejected quietly through the returned `SpinAttempt`.
    #[instrument(skip(self))]
    pub async fn spin(&self) -> SpinAttempt {
        let command = SpinMachine {
            correlation_id: Uuid::new_v4(),
        };
        info!(correlation_id = %command.correlation_id, "handling spin command");

        let attempt = self.machine.lock().await.begin_spin();
        if attempt != SpinAttempt::Started {
            return attempt;
        }

        // Lock the RNG only around the synchronous roll; a poisoned
        // lock still holds a usable generator.
        let duration = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            self.timing.roll_duration(&mut *rng)
        };
        notify(&self.events, MachineEvent::SpinStarted);

        tokio::spawn(
            SpinRun {
                machine: Arc::clone(&self.machine),
                clock: Arc::clone(&self.clock),
                rng: Arc::clone(&self.rng),
                store: Arc::clone(&self.store),
                events: self.events.clone(),
                timing: self.timing,
                duration,
                correlation_id: command.correlation_id,
            }
            .run(),
        );
        SpinAttempt::Started
    }

    /// Adds an option to the registry.
    ///
    /// # Errors
    ///
    /// Returns `GachaError::Validation` when the label fails
    /// validation. The same message also goes out as an error notice.
    pub async fn add_option(&self, label: &str) -> Result<String, GachaError> {
        let command = AddOption {
            correlation_id: Uuid::new_v4(),
            label: label.to_owned(),
        };
        command_handlers::handle_add_option(
            command,
            &self.machine,
            self.store.as_ref(),
            &self.events,
        )
        .await
    }

    /// Removes an option from the registry by exact label.
    ///
    /// # Errors
    ///
    /// Returns `GachaError::Validation` when only one option remains.
    pub async fn remove_option(&self, label: &str) -> Result<(), GachaError> {
        let command = RemoveOption {
            correlation_id: Uuid::new_v4(),
            label: label.to_owned(),
        };
        command_handlers::handle_remove_option(
            command,
            &self.machine,
            self.store.as_ref(),
            &self.events,
        )
        .await
    }

    /// Resets pick statistics and the draw history, keeping the options.
    pub async fn reset_stats(&self) {
        let command = ResetStats {
            correlation_id: Uuid::new_v4(),
        };
        command_handlers::handle_reset_stats(
            command,
            &self.machine,
            self.store.as_ref(),
            &self.events,
        )
        .await;
    }

    /// Current pick statistics.
    pub async fn stats(&self) -> StatsView {
        query_handlers::stats_view(&*self.machine.lock().await)
    }

    /// Draw history, newest first, with rendered ages.
    pub async fn draws(&self) -> Vec<DrawView> {
        query_handlers::draw_views(&*self.machine.lock().await, self.clock.as_ref())
    }

    /// Options currently in the registry, in display order.
    pub async fn options(&self) -> Vec<String> {
        self.machine.lock().await.options().to_vec()
    }

    /// Number of options not yet drawn this session.
    pub async fn remaining_uncompleted(&self) -> usize {
        self.machine.lock().await.uncompleted().len()
    }

    /// Whether a spin is currently running or settling.
    pub async fn is_busy(&self) -> bool {
        self.machine.lock().await.phase() != SpinPhase::Idle
    }
}
