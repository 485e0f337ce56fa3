//! Test RNG: deterministic `DrawRng` implementations for tests.

use gachapon_core::rng::DrawRng;

/// A no-op RNG that always returns `0` for `pick_index` and `0.0` for
/// `unit_f64`. Suitable for tests that do not depend on specific random
/// values.
#[derive(Debug)]
pub struct MockRng;

impl DrawRng for MockRng {
    fn pick_index(&mut self, _len: usize) -> usize {
        0
    }

    fn unit_f64(&mut self) -> f64 {
        0.0
    }
}

/// An RNG that returns values from predetermined sequences. Panics when a
/// sequence is exhausted. Used in tests that need specific, repeatable
/// outcomes (e.g., which option a draw lands on).
///
/// Indices are returned as scripted; callers are responsible for keeping
/// them in range for the pools they are drawn against.
#[derive(Debug)]
pub struct SequenceRng {
    indices: Vec<usize>,
    index_cursor: usize,
    units: Vec<f64>,
    unit_cursor: usize,
}

impl SequenceRng {
    /// Creates a `SequenceRng` that scripts `pick_index` with the given
    /// values and returns `0.0` from every `unit_f64` call.
    #[must_use]
    pub fn new(indices: Vec<usize>) -> Self {
        Self {
            indices,
            index_cursor: 0,
            units: Vec::new(),
            unit_cursor: 0,
        }
    }

    /// Creates a `SequenceRng` that also scripts `unit_f64`.
    #[must_use]
    pub fn with_units(indices: Vec<usize>, units: Vec<f64>) -> Self {
        Self {
            indices,
            index_cursor: 0,
            units,
            unit_cursor: 0,
        }
    }
}

impl DrawRng for SequenceRng {
    fn pick_index(&mut self, _len: usize) -> usize {
        let val = self.indices[self.index_cursor];
        self.index_cursor += 1;
        val
    }

    fn unit_f64(&mut self) -> f64 {
        if self.units.is_empty() {
            return 0.0;
        }
        let val = self.units[self.unit_cursor];
        self.unit_cursor += 1;
        val
    }
}
