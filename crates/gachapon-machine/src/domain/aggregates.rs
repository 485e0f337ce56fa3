//! Aggregate root for the picker machine.

use gachapon_core::clock::Clock;
use gachapon_core::error::GachaError;
use gachapon_core::rng::DrawRng;
use gachapon_core::store::{PersistedState, StoredDraw};

use super::events::DrawOutcome;
use super::history::{DrawRecord, HistoryLog};
use crate::config::MachineConfig;

/// Longest label the registry accepts, in characters.
pub const MAX_OPTION_CHARS: usize = 30;

/// Spin phase state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinPhase {
    /// No spin in progress.
    Idle,
    /// A spin is running; interim candidates are being emitted.
    Spinning,
    /// The outcome is committed; waiting out the settle pause.
    Settling,
}

/// Result of asking the machine to start a spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinAttempt {
    /// The spin started; a driver task should run it to completion.
    Started,
    /// A spin is already running or settling.
    Busy,
    /// The registry is empty; nothing to draw.
    NoOptions,
}

/// The aggregate root for one picker machine.
///
/// Holds the full session state: the option registry, pick statistics,
/// the draw history, and the transient spin phase. The phase is never
/// persisted; a reloaded machine always starts `Idle`.
#[derive(Debug)]
pub struct GachaMachine {
    /// Selectable options, in display order.
    options: Vec<String>,
    /// Running count of committed draws.
    total_picks: u64,
    /// Most recently drawn option.
    last_pick: Option<String>,
    /// Committed draws, oldest first.
    history: HistoryLog,
    /// Current spin phase (transient).
    phase: SpinPhase,
}

impl GachaMachine {
    /// Creates a fresh machine from configuration defaults.
    #[must_use]
    pub fn new(config: &MachineConfig) -> Self {
        Self {
            options: config.default_options.clone(),
            total_picks: 0,
            last_pick: None,
            history: HistoryLog::new(),
            phase: SpinPhase::Idle,
        }
    }

    /// Rebuilds a machine from a persisted blob.
    ///
    /// A blob without an `options` field falls back to the configured
    /// defaults; an explicitly empty list is honored as-is. Blobs that
    /// carry a pick count but no history are accepted, and sequence
    /// numbering continues from the stored count.
    #[must_use]
    pub fn from_persisted(config: &MachineConfig, state: PersistedState) -> Self {
        let options = state
            .options
            .unwrap_or_else(|| config.default_options.clone());

        let mut history = HistoryLog::new();
        for draw in state.spin_results {
            history.push(DrawRecord {
                option: draw.option,
                timestamp: draw.timestamp,
                sequence_number: draw.pick_number,
            });
        }

        Self {
            options,
            total_picks: state.total_picks,
            last_pick: state.last_pick,
            history,
            phase: SpinPhase::Idle,
        }
    }

    /// Returns a snapshot of the persisted subset of state.
    #[must_use]
    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            options: Some(self.options.clone()),
            total_picks: self.total_picks,
            last_pick: self.last_pick.clone(),
            spin_results: self
                .history
                .records()
                .iter()
                .map(|r| StoredDraw {
                    option: r.option.clone(),
                    timestamp: r.timestamp,
                    pick_number: r.sequence_number,
                })
                .collect(),
        }
    }

    /// Options currently in the registry, in display order.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Total number of committed draws.
    #[must_use]
    pub fn total_picks(&self) -> u64 {
        self.total_picks
    }

    /// Most recently drawn option.
    #[must_use]
    pub fn last_pick(&self) -> Option<&str> {
        self.last_pick.as_deref()
    }

    /// The draw history.
    #[must_use]
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Current spin phase.
    #[must_use]
    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    /// Options not yet present in the history, in display order.
    #[must_use]
    pub fn uncompleted(&self) -> Vec<String> {
        self.options
            .iter()
            .filter(|option| !self.history.contains(option))
            .cloned()
            .collect()
    }

    /// Tries to move the machine into the `Spinning` phase.
    ///
    /// Attempts made while a spin is running or settling, or while the
    /// registry is empty, are rejected without error.
    pub fn begin_spin(&mut self) -> SpinAttempt {
        if self.phase != SpinPhase::Idle {
            return SpinAttempt::Busy;
        }
        if self.options.is_empty() {
            return SpinAttempt::NoOptions;
        }
        self.phase = SpinPhase::Spinning;
        SpinAttempt::Started
    }

    /// Samples an interim candidate from the live uncompleted set, or
    /// from the full list once every option has been drawn.
    ///
    /// The pool is recomputed on every call against current state, so
    /// registry edits made mid-spin show up in the very next tick.
    /// Candidates carry no state effect and are never reused as the
    /// final outcome. Returns `None` only when the registry is empty.
    pub fn interim_candidate(&self, rng: &mut dyn DrawRng) -> Option<String> {
        let mut pool = self.uncompleted();
        if pool.is_empty() {
            pool = self.options.clone();
        }
        if pool.is_empty() {
            return None;
        }
        let index = rng.pick_index(pool.len());
        Some(pool.swap_remove(index))
    }

    /// Commits the outcome of a running spin.
    ///
    /// Draws uniformly from the uncompleted set, records the pick, and
    /// moves to the `Settling` phase. When every option has already
    /// been drawn nothing is recorded and the outcome is the
    /// `AllCompleted` sentinel; the machine still settles.
    ///
    /// # Errors
    ///
    /// Returns `GachaError::Validation` if not in `Spinning` phase.
    pub fn resolve_draw(
        &mut self,
        clock: &dyn Clock,
        rng: &mut dyn DrawRng,
    ) -> Result<DrawOutcome, GachaError> {
        if self.phase != SpinPhase::Spinning {
            return Err(GachaError::Validation(
                "machine must be in Spinning phase".to_owned(),
            ));
        }

        let mut uncompleted = self.uncompleted();
        if uncompleted.is_empty() {
            self.phase = SpinPhase::Settling;
            return Ok(DrawOutcome::AllCompleted);
        }

        let index = rng.pick_index(uncompleted.len());
        let option = uncompleted.swap_remove(index);

        self.total_picks += 1;
        self.last_pick = Some(option.clone());
        let record = DrawRecord {
            option,
            timestamp: clock.now(),
            sequence_number: self.total_picks,
        };
        self.history.push(record.clone());
        self.phase = SpinPhase::Settling;

        Ok(DrawOutcome::Picked(record))
    }

    /// Finishes the settle pause, returning to `Idle`.
    ///
    /// # Errors
    ///
    /// Returns `GachaError::Validation` if not in `Settling` phase.
    pub fn finish_settle(&mut self) -> Result<(), GachaError> {
        if self.phase != SpinPhase::Settling {
            return Err(GachaError::Validation(
                "machine must be in Settling phase".to_owned(),
            ));
        }
        self.phase = SpinPhase::Idle;
        Ok(())
    }

    /// Validates and appends a new option.
    ///
    /// The label is trimmed before any check. Returns the label as
    /// stored.
    ///
    /// # Errors
    ///
    /// Returns `GachaError::Validation` when the trimmed label is
    /// empty, already present, or longer than `MAX_OPTION_CHARS`
    /// characters.
    pub fn add_option(&mut self, label: &str) -> Result<String, GachaError> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(GachaError::Validation("Please enter an option!".to_owned()));
        }
        if self.options.iter().any(|option| option == trimmed) {
            return Err(GachaError::Validation(
                "This option already exists!".to_owned(),
            ));
        }
        if trimmed.chars().count() > MAX_OPTION_CHARS {
            return Err(GachaError::Validation(
                "Option is too long! (max 30 characters)".to_owned(),
            ));
        }

        let stored = trimmed.to_owned();
        self.options.push(stored.clone());
        Ok(stored)
    }

    /// Removes an option by exact label.
    ///
    /// Removing a label that is not present leaves the registry
    /// unchanged and is not an error. History is never rewritten.
    ///
    /// # Errors
    ///
    /// Returns `GachaError::Validation` when only one option remains.
    /// The floor is checked before membership.
    pub fn remove_option(&mut self, label: &str) -> Result<(), GachaError> {
        if self.options.len() <= 1 {
            return Err(GachaError::Validation(
                "You need at least one option!".to_owned(),
            ));
        }
        self.options.retain(|option| option != label);
        Ok(())
    }

    /// Resets pick statistics and the draw history, keeping the option
    /// list.
    pub fn reset_stats(&mut self) {
        self.total_picks = 0;
        self.last_pick = None;
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use gachapon_test_support::{FixedClock, SequenceRng};

    fn fixed_clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    fn config_with(options: &[&str]) -> MachineConfig {
        MachineConfig {
            default_options: options.iter().map(|s| (*s).to_owned()).collect(),
            ..MachineConfig::default()
        }
    }

    fn spinning_machine(options: &[&str]) -> GachaMachine {
        let mut machine = GachaMachine::new(&config_with(options));
        assert_eq!(machine.begin_spin(), SpinAttempt::Started);
        machine
    }

    // --- construction tests ---

    #[test]
    fn test_new_machine_starts_with_defaults() {
        let machine = GachaMachine::new(&MachineConfig::default());

        assert_eq!(machine.options().len(), 5);
        assert_eq!(machine.options()[0], "Dumplings");
        assert_eq!(machine.total_picks(), 0);
        assert_eq!(machine.last_pick(), None);
        assert!(machine.history().is_empty());
        assert_eq!(machine.phase(), SpinPhase::Idle);
    }

    #[test]
    fn test_from_persisted_restores_all_fields() {
        let state = PersistedState {
            options: Some(vec!["A".to_owned(), "B".to_owned()]),
            total_picks: 1,
            last_pick: Some("A".to_owned()),
            spin_results: vec![gachapon_core::store::StoredDraw {
                option: "A".to_owned(),
                timestamp: fixed_clock().0,
                pick_number: 1,
            }],
        };

        let machine = GachaMachine::from_persisted(&MachineConfig::default(), state);

        assert_eq!(machine.options(), &["A".to_owned(), "B".to_owned()]);
        assert_eq!(machine.total_picks(), 1);
        assert_eq!(machine.last_pick(), Some("A"));
        assert_eq!(machine.history().len(), 1);
        assert_eq!(machine.history().records()[0].sequence_number, 1);
        assert_eq!(machine.phase(), SpinPhase::Idle);
    }

    #[test]
    fn test_from_persisted_missing_options_uses_defaults() {
        let state = PersistedState {
            options: None,
            total_picks: 3,
            ..PersistedState::default()
        };

        let machine = GachaMachine::from_persisted(&MachineConfig::default(), state);

        assert_eq!(machine.options().len(), 5);
        assert_eq!(machine.total_picks(), 3);
    }

    #[test]
    fn test_from_persisted_keeps_explicit_empty_options() {
        let state = PersistedState {
            options: Some(Vec::new()),
            ..PersistedState::default()
        };

        let machine = GachaMachine::from_persisted(&MachineConfig::default(), state);

        assert!(machine.options().is_empty());
    }

    #[test]
    fn test_persisted_round_trip_preserves_state() {
        let clock = fixed_clock();
        let mut machine = GachaMachine::new(&config_with(&["A", "B", "C"]));
        let mut rng = SequenceRng::new(vec![1]);
        machine.begin_spin();
        machine.resolve_draw(&clock, &mut rng).unwrap();

        let restored =
            GachaMachine::from_persisted(&MachineConfig::default(), machine.to_persisted());

        assert_eq!(restored.options(), machine.options());
        assert_eq!(restored.total_picks(), 1);
        assert_eq!(restored.last_pick(), Some("B"));
        assert_eq!(restored.history().len(), 1);
        assert_eq!(restored.history().records()[0].timestamp, clock.0);
    }

    // --- add_option tests ---

    #[test]
    fn test_add_option_appends_trimmed_label() {
        let mut machine = GachaMachine::new(&MachineConfig::default());
        let before = machine.options().len();

        let stored = machine.add_option("  Sushi  ").unwrap();

        assert_eq!(stored, "Sushi");
        assert_eq!(machine.options().len(), before + 1);
        assert_eq!(machine.options().last().map(String::as_str), Some("Sushi"));
    }

    #[test]
    fn test_add_option_rejects_empty_label() {
        let mut machine = GachaMachine::new(&MachineConfig::default());

        for label in ["", "   "] {
            match machine.add_option(label).unwrap_err() {
                GachaError::Validation(msg) => assert_eq!(msg, "Please enter an option!"),
                other => panic!("expected Validation, got {other:?}"),
            }
        }
        assert_eq!(machine.options().len(), 5);
    }

    #[test]
    fn test_add_option_rejects_duplicate() {
        let mut machine = GachaMachine::new(&MachineConfig::default());

        match machine.add_option("Noodles").unwrap_err() {
            GachaError::Validation(msg) => assert_eq!(msg, "This option already exists!"),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_add_option_trims_before_duplicate_check() {
        let mut machine = GachaMachine::new(&MachineConfig::default());

        assert!(machine.add_option("  Noodles ").is_err());
    }

    #[test]
    fn test_add_option_rejects_overlong_label() {
        let mut machine = GachaMachine::new(&MachineConfig::default());

        match machine.add_option(&"x".repeat(31)).unwrap_err() {
            GachaError::Validation(msg) => {
                assert_eq!(msg, "Option is too long! (max 30 characters)");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_add_option_accepts_label_at_limit() {
        let mut machine = GachaMachine::new(&MachineConfig::default());

        assert!(machine.add_option(&"x".repeat(30)).is_ok());
    }

    #[test]
    fn test_add_option_limit_counts_characters_not_bytes() {
        let mut machine = GachaMachine::new(&MachineConfig::default());

        // 30 two-byte characters are still 30 characters.
        assert!(machine.add_option(&"é".repeat(30)).is_ok());
    }

    // --- remove_option tests ---

    #[test]
    fn test_remove_option_removes_label() {
        let mut machine = GachaMachine::new(&MachineConfig::default());

        machine.remove_option("Pasta").unwrap();

        assert_eq!(machine.options().len(), 4);
        assert!(!machine.options().contains(&"Pasta".to_owned()));
    }

    #[test]
    fn test_remove_last_option_is_rejected() {
        let mut machine = GachaMachine::new(&config_with(&["Solo"]));

        match machine.remove_option("Solo").unwrap_err() {
            GachaError::Validation(msg) => assert_eq!(msg, "You need at least one option!"),
            other => panic!("expected Validation, got {other:?}"),
        }
        assert_eq!(machine.options(), &["Solo".to_owned()]);
    }

    #[test]
    fn test_remove_checks_floor_before_membership() {
        let mut machine = GachaMachine::new(&config_with(&["Solo"]));

        assert!(machine.remove_option("Missing").is_err());
    }

    #[test]
    fn test_remove_absent_label_is_silent() {
        let mut machine = GachaMachine::new(&MachineConfig::default());

        machine.remove_option("Missing").unwrap();

        assert_eq!(machine.options().len(), 5);
    }

    #[test]
    fn test_remove_option_keeps_history() {
        let clock = fixed_clock();
        let mut machine = GachaMachine::new(&config_with(&["A", "B"]));
        let mut rng = SequenceRng::new(vec![0]);
        machine.begin_spin();
        machine.resolve_draw(&clock, &mut rng).unwrap();
        machine.finish_settle().unwrap();

        machine.remove_option("A").unwrap();

        assert_eq!(machine.history().len(), 1);
        assert_eq!(machine.history().records()[0].option, "A");
        assert_eq!(machine.total_picks(), 1);
    }

    // --- spin phase tests ---

    #[test]
    fn test_begin_spin_from_idle_starts() {
        let mut machine = GachaMachine::new(&MachineConfig::default());

        assert_eq!(machine.begin_spin(), SpinAttempt::Started);
        assert_eq!(machine.phase(), SpinPhase::Spinning);
    }

    #[test]
    fn test_begin_spin_while_spinning_is_busy() {
        let mut machine = spinning_machine(&["A", "B"]);

        assert_eq!(machine.begin_spin(), SpinAttempt::Busy);
        assert_eq!(machine.phase(), SpinPhase::Spinning);
    }

    #[test]
    fn test_begin_spin_while_settling_is_busy() {
        let mut machine = spinning_machine(&["A", "B"]);
        let mut rng = SequenceRng::new(vec![0]);
        machine.resolve_draw(&fixed_clock(), &mut rng).unwrap();

        assert_eq!(machine.phase(), SpinPhase::Settling);
        assert_eq!(machine.begin_spin(), SpinAttempt::Busy);
    }

    #[test]
    fn test_begin_spin_with_empty_registry_is_rejected() {
        let state = PersistedState {
            options: Some(Vec::new()),
            ..PersistedState::default()
        };
        let mut machine = GachaMachine::from_persisted(&MachineConfig::default(), state);

        assert_eq!(machine.begin_spin(), SpinAttempt::NoOptions);
        assert_eq!(machine.phase(), SpinPhase::Idle);
    }

    #[test]
    fn test_finish_settle_returns_to_idle() {
        let mut machine = spinning_machine(&["A", "B"]);
        let mut rng = SequenceRng::new(vec![0]);
        machine.resolve_draw(&fixed_clock(), &mut rng).unwrap();

        machine.finish_settle().unwrap();

        assert_eq!(machine.phase(), SpinPhase::Idle);
    }

    #[test]
    fn test_finish_settle_when_idle_is_rejected() {
        let mut machine = GachaMachine::new(&MachineConfig::default());

        match machine.finish_settle().unwrap_err() {
            GachaError::Validation(msg) => {
                assert_eq!(msg, "machine must be in Settling phase");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_draw_when_idle_is_rejected() {
        let mut machine = GachaMachine::new(&MachineConfig::default());
        let mut rng = SequenceRng::new(vec![0]);

        match machine.resolve_draw(&fixed_clock(), &mut rng).unwrap_err() {
            GachaError::Validation(msg) => {
                assert_eq!(msg, "machine must be in Spinning phase");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    // --- resolve_draw tests ---

    #[test]
    fn test_resolve_draw_records_the_pick() {
        let clock = fixed_clock();
        let mut machine = spinning_machine(&["A", "B", "C"]);
        let mut rng = SequenceRng::new(vec![2]);

        let outcome = machine.resolve_draw(&clock, &mut rng).unwrap();

        match outcome {
            DrawOutcome::Picked(record) => {
                assert_eq!(record.option, "C");
                assert_eq!(record.sequence_number, 1);
                assert_eq!(record.timestamp, clock.0);
            }
            DrawOutcome::AllCompleted => panic!("expected Picked"),
        }
        assert_eq!(machine.total_picks(), 1);
        assert_eq!(machine.last_pick(), Some("C"));
        assert_eq!(machine.history().len(), 1);
        assert_eq!(machine.phase(), SpinPhase::Settling);
    }

    #[test]
    fn test_resolve_draw_picks_only_from_uncompleted() {
        let clock = fixed_clock();
        let mut machine = spinning_machine(&["A", "B"]);
        let mut rng = SequenceRng::new(vec![0, 0]);

        machine.resolve_draw(&clock, &mut rng).unwrap();
        machine.finish_settle().unwrap();

        // "A" is now in the history, so index 0 of the uncompleted set
        // must land on "B".
        machine.begin_spin();
        let outcome = machine.resolve_draw(&clock, &mut rng).unwrap();

        match outcome {
            DrawOutcome::Picked(record) => assert_eq!(record.option, "B"),
            DrawOutcome::AllCompleted => panic!("expected Picked"),
        }
        assert!(machine.uncompleted().is_empty());
    }

    #[test]
    fn test_resolve_draw_after_exhaustion_returns_sentinel() {
        let clock = fixed_clock();
        let mut machine = spinning_machine(&["A", "B"]);
        let mut rng = SequenceRng::new(vec![0, 0]);

        machine.resolve_draw(&clock, &mut rng).unwrap();
        machine.finish_settle().unwrap();
        machine.begin_spin();
        machine.resolve_draw(&clock, &mut rng).unwrap();
        machine.finish_settle().unwrap();

        machine.begin_spin();
        let outcome = machine.resolve_draw(&clock, &mut rng).unwrap();

        assert_eq!(outcome, DrawOutcome::AllCompleted);
        assert_eq!(machine.total_picks(), 2);
        assert_eq!(machine.history().len(), 2);
        assert_eq!(machine.last_pick(), Some("B"));
        assert_eq!(machine.phase(), SpinPhase::Settling);
    }

    #[test]
    fn test_sequence_numbers_match_running_total() {
        let clock = fixed_clock();
        let mut machine = GachaMachine::new(&config_with(&["A", "B", "C"]));
        let mut rng = SequenceRng::new(vec![0, 0, 0]);

        for expected in 1..=3 {
            machine.begin_spin();
            let outcome = machine.resolve_draw(&clock, &mut rng).unwrap();
            machine.finish_settle().unwrap();

            match outcome {
                DrawOutcome::Picked(record) => {
                    assert_eq!(record.sequence_number, expected);
                }
                DrawOutcome::AllCompleted => panic!("expected Picked"),
            }
            assert_eq!(machine.total_picks(), expected);
            assert_eq!(machine.history().len() as u64, expected);
        }
    }

    #[test]
    fn test_sequence_continues_from_legacy_pick_count() {
        let state = PersistedState {
            options: Some(vec!["A".to_owned(), "B".to_owned()]),
            total_picks: 7,
            last_pick: Some("A".to_owned()),
            spin_results: Vec::new(),
        };
        let mut machine = GachaMachine::from_persisted(&MachineConfig::default(), state);
        let mut rng = SequenceRng::new(vec![0]);

        machine.begin_spin();
        let outcome = machine.resolve_draw(&fixed_clock(), &mut rng).unwrap();

        match outcome {
            DrawOutcome::Picked(record) => assert_eq!(record.sequence_number, 8),
            DrawOutcome::AllCompleted => panic!("expected Picked"),
        }
        assert_eq!(machine.total_picks(), 8);
    }

    #[test]
    fn test_uncompleted_shrinks_as_draws_commit() {
        let clock = fixed_clock();
        let mut machine = GachaMachine::new(&config_with(&["A", "B", "C"]));
        let mut rng = SequenceRng::new(vec![0, 0, 0]);

        assert_eq!(machine.uncompleted().len(), 3);
        for remaining in [2, 1, 0] {
            machine.begin_spin();
            machine.resolve_draw(&clock, &mut rng).unwrap();
            machine.finish_settle().unwrap();
            assert_eq!(machine.uncompleted().len(), remaining);
        }
    }

    #[test]
    fn test_reset_stats_clears_picks_and_keeps_options() {
        let clock = fixed_clock();
        let mut machine = spinning_machine(&["A", "B"]);
        let mut rng = SequenceRng::new(vec![0, 0]);
        machine.resolve_draw(&clock, &mut rng).unwrap();
        machine.finish_settle().unwrap();

        machine.reset_stats();

        assert_eq!(machine.total_picks(), 0);
        assert_eq!(machine.last_pick(), None);
        assert!(machine.history().is_empty());
        assert_eq!(machine.options().len(), 2);
        assert_eq!(machine.uncompleted().len(), 2);

        // Numbering restarts after a reset.
        machine.begin_spin();
        match machine.resolve_draw(&clock, &mut rng).unwrap() {
            DrawOutcome::Picked(record) => assert_eq!(record.sequence_number, 1),
            DrawOutcome::AllCompleted => panic!("expected Picked"),
        }
    }

    // --- interim candidate tests ---

    #[test]
    fn test_interim_candidate_prefers_uncompleted() {
        let clock = fixed_clock();
        let mut machine = spinning_machine(&["A", "B"]);
        let mut rng = SequenceRng::new(vec![0, 0]);
        machine.resolve_draw(&clock, &mut rng).unwrap();
        machine.finish_settle().unwrap();

        // "A" is drawn; the only uncompleted option is "B".
        let candidate = machine.interim_candidate(&mut rng);

        assert_eq!(candidate.as_deref(), Some("B"));
    }

    #[test]
    fn test_interim_candidate_falls_back_to_full_list() {
        let clock = fixed_clock();
        let mut machine = spinning_machine(&["A", "B"]);
        let mut rng = SequenceRng::new(vec![0, 0, 1]);
        machine.resolve_draw(&clock, &mut rng).unwrap();
        machine.finish_settle().unwrap();
        machine.begin_spin();
        machine.resolve_draw(&clock, &mut rng).unwrap();
        machine.finish_settle().unwrap();

        // Everything is drawn; candidates come from the full list.
        let candidate = machine.interim_candidate(&mut rng);

        assert_eq!(candidate.as_deref(), Some("B"));
    }

    #[test]
    fn test_interim_candidate_none_when_registry_empty() {
        let state = PersistedState {
            options: Some(Vec::new()),
            ..PersistedState::default()
        };
        let machine = GachaMachine::from_persisted(&MachineConfig::default(), state);
        let mut rng = SequenceRng::new(vec![0]);

        assert_eq!(machine.interim_candidate(&mut rng), None);
    }

    #[test]
    fn test_interim_candidate_has_no_state_effect() {
        let machine = spinning_machine(&["A", "B"]);
        let mut rng = SequenceRng::new(vec![0, 1, 0, 1]);

        for _ in 0..4 {
            machine.interim_candidate(&mut rng);
        }

        assert_eq!(machine.total_picks(), 0);
        assert!(machine.history().is_empty());
        assert_eq!(machine.uncompleted().len(), 2);
    }
}
