//! Background task that runs a single spin to completion.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::{Mutex as AsyncMutex, mpsc};
use tokio::time::{interval, sleep};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use gachapon_core::clock::Clock;
use gachapon_core::rng::DrawRng;
use gachapon_core::store::StateStore;

use super::command_handlers::{notify, persist_state};
use crate::config::SpinTiming;
use crate::domain::aggregates::GachaMachine;
use crate::domain::events::{DrawOutcome, MachineEvent};

/// One spin in flight. Holds clones of the controller's shared handles
/// plus the duration rolled for this spin.
///
/// The RNG lock is only ever taken around the synchronous domain
/// methods and never held across an await.
pub(crate) struct SpinRun {
    pub(crate) machine: Arc<AsyncMutex<GachaMachine>>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) rng: Arc<Mutex<dyn DrawRng>>,
    pub(crate) store: Arc<dyn StateStore>,
    pub(crate) events: mpsc::UnboundedSender<MachineEvent>,
    pub(crate) timing: SpinTiming,
    pub(crate) duration: Duration,
    pub(crate) correlation_id: Uuid,
}

impl SpinRun {
    /// Drives the spin. Emits an interim candidate on every tick until
    /// the quiet tail, commits the outcome once the rolled duration
    /// elapses, and settles before handing the machine back to `Idle`.
    #[instrument(skip(self), fields(correlation_id = %self.correlation_id))]
    pub(crate) async fn run(self) {
        let quiet_from = self.duration.saturating_sub(self.timing.quiet_tail);

        let mut ticker = interval(self.timing.tick_interval);
        // The first tick completes immediately; elapsed time is counted
        // from the ticks after it.
        ticker.tick().await;

        let mut elapsed = Duration::ZERO;
        loop {
            ticker.tick().await;
            elapsed += self.timing.tick_interval;

            if elapsed < quiet_from {
                let machine = self.machine.lock().await;
                // Lock the RNG only around the synchronous sample; a
                // poisoned lock still holds a usable generator.
                let candidate = {
                    let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
                    machine.interim_candidate(&mut *rng)
                };
                if let Some(candidate) = candidate {
                    notify(&self.events, MachineEvent::SpinTick { candidate });
                }
            }
            if elapsed >= self.duration {
                break;
            }
        }

        {
            let mut machine = self.machine.lock().await;
            let outcome = {
                let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
                machine.resolve_draw(self.clock.as_ref(), &mut *rng)
            };
            match outcome {
                Ok(outcome) => {
                    if matches!(outcome, DrawOutcome::Picked(_)) {
                        persist_state(&machine, self.store.as_ref()).await;
                    }
                    let remaining_uncompleted = machine.uncompleted().len();
                    info!(?outcome, remaining_uncompleted, "spin resolved");
                    notify(&self.events, MachineEvent::SpinResolved {
                        outcome,
                        remaining_uncompleted,
                    });
                }
                Err(err) => {
                    warn!(error = %err, "spin resolution failed");
                    return;
                }
            }
        }

        sleep(self.timing.settle_delay).await;

        let mut machine = self.machine.lock().await;
        if let Err(err) = machine.finish_settle() {
            warn!(error = %err, "settle ended in an unexpected phase");
        }
        notify(&self.events, MachineEvent::SpinSettled);
    }
}
