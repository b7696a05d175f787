//! Dice pool construction and rolling.

use tracing::{debug, trace};

use super::roll::RollOutcome;
use super::{DEFAULT_SUCCESS_THRESHOLD, DieSource, ModifierSet, SIDES};
use crate::stats::PoolSize;

/// A pool of d10s ready to be rolled.
#[derive(Debug, Clone)]
pub struct DicePool {
    size: PoolSize,
    success_threshold: u32,
    modifiers: ModifierSet,
}

impl DicePool {
    /// Create a pool of `size` dice with the default threshold and modifiers.
    pub fn new(size: i32) -> Self {
        Self::from_pool_size(PoolSize::flat(size))
    }

    /// Create a pool from a resolved pool size, keeping the pre-modifier size
    /// for outcome classification.
    pub fn from_pool_size(size: PoolSize) -> Self {
        Self {
            size,
            success_threshold: DEFAULT_SUCCESS_THRESHOLD,
            modifiers: ModifierSet::default(),
        }
    }

    /// Set the value a die must meet to count as a success, clamped to
    /// `1..=10`.
    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.success_threshold = threshold.clamp(1, SIDES);
        self
    }

    /// Set the modifiers for this roll.
    pub fn with_modifiers(mut self, modifiers: ModifierSet) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// The pool size this roll uses.
    pub fn size(&self) -> PoolSize {
        self.size
    }

    /// The modifiers for this roll.
    pub fn modifiers(&self) -> &ModifierSet {
        &self.modifiers
    }

    /// Returns true if the pool is rolled as a single chance die.
    pub fn is_chance(&self) -> bool {
        self.size.final_pool <= 0
    }

    /// Roll the pool.
    pub fn roll<S: DieSource + ?Sized>(&self, source: &mut S) -> RollOutcome {
        let mut tally = Tally::new(self.success_threshold);

        if self.is_chance() {
            let value = source.roll_die();
            trace!(value, "chance die");
            tally.record(value);
            return tally.finish(self.size, 0, 0);
        }

        let explode = self.modifiers.explode_threshold();
        let mut failed_chains = 0u32;
        let mut exploded = 0u32;

        for _ in 0..self.size.final_pool {
            let before = tally.successes;
            let mut value = source.roll_die();
            tally.record(value);
            while explode.explodes(value) {
                value = source.roll_die();
                trace!(value, threshold = explode.value(), "exploded");
                tally.record(value);
                exploded += 1;
            }
            if tally.successes == before {
                failed_chains += 1;
            }
        }

        let mut rerolled = 0u32;
        if self.modifiers.is_rote() {
            for _ in 0..failed_chains {
                let value = source.roll_die();
                trace!(value, "rote reroll");
                tally.record(value);
                rerolled += 1;
            }
        }

        debug!(
            pool = self.size.final_pool,
            successes = tally.successes,
            exploded,
            rerolled,
            "rolled pool"
        );
        tally.finish(self.size, exploded, rerolled)
    }
}

/// Roll `final_pool_size` dice against `threshold` with the given modifiers.
///
/// Convenience wrapper over [`DicePool`] for callers that have no separate
/// pre-modifier pool size. `threshold` is clamped like
/// [`DicePool::with_threshold`].
pub fn roll_pool<S: DieSource + ?Sized>(
    final_pool_size: i32,
    threshold: u32,
    modifiers: &ModifierSet,
    source: &mut S,
) -> RollOutcome {
    DicePool::new(final_pool_size)
        .with_threshold(threshold)
        .with_modifiers(modifiers.clone())
        .roll(source)
}

struct Tally {
    threshold: u32,
    values: Vec<u32>,
    successes: u32,
    ones: u32,
}

impl Tally {
    fn new(threshold: u32) -> Self {
        Self {
            threshold,
            values: Vec::new(),
            successes: 0,
            ones: 0,
        }
    }

    fn record(&mut self, value: u32) {
        self.values.push(value);
        if value >= self.threshold {
            self.successes += 1;
        }
        if value == 1 {
            self.ones += 1;
        }
    }

    fn finish(self, size: PoolSize, exploded: u32, rerolled: u32) -> RollOutcome {
        RollOutcome {
            die_results: self.values,
            success_count: self.successes,
            one_count: self.ones,
            final_pool_size: size.final_pool,
            pre_modifier_pool_size: size.pre_modifier,
            exploded,
            rerolled,
        }
    }
}
