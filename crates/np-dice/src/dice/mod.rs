//! Dice sources, modifiers, pools, and rolling.
//!
//! Every die is a d10. A pool explodes on its active X-again threshold
//! (10 unless a stricter modifier is present) and may reroll failed chains
//! once under the rote modifier.

pub mod modifier;
pub mod pool;
pub mod roll;

pub use modifier::{Modifier, ModifierSet};
pub use pool::{DicePool, roll_pool};
pub use roll::RollOutcome;

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::DiceError;

/// Number of sides on every die in the pool.
pub const SIDES: u32 = 10;

/// Value a die must meet or exceed to count as a success.
pub const DEFAULT_SUCCESS_THRESHOLD: u32 = 8;

/// Anything that can produce d10 results.
///
/// Every [`rand::Rng`] is a source. [`FixedDice`] replays a known sequence.
pub trait DieSource {
    /// Roll a single die, returning a value in `1..=SIDES`.
    fn roll_die(&mut self) -> u32;
}

impl<R: Rng + ?Sized> DieSource for R {
    fn roll_die(&mut self) -> u32 {
        self.random_range(1..=SIDES)
    }
}

/// A die source that replays a fixed sequence of values.
///
/// Values are clamped to `1..=SIDES`. Once the sequence is exhausted every
/// further die comes up 1, so an explosion chain always terminates.
#[derive(Debug, Clone, Default)]
pub struct FixedDice {
    values: VecDeque<u32>,
}

impl FixedDice {
    /// Create a source that yields `values` in order.
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().map(|v| v.clamp(1, SIDES)).collect(),
        }
    }

    /// Number of values not yet drawn.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl DieSource for FixedDice {
    fn roll_die(&mut self) -> u32 {
        self.values.pop_front().unwrap_or(1)
    }
}

/// The value at or above which a die explodes into another die.
///
/// Only 8, 9, and 10 are legal; any lower threshold could explode forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExplodeThreshold {
    /// 8-again.
    Eight,
    /// 9-again.
    Nine,
    /// 10-again, the baseline rule.
    Ten,
}

impl ExplodeThreshold {
    /// The die value that triggers an explosion.
    pub fn value(self) -> u32 {
        match self {
            Self::Eight => 8,
            Self::Nine => 9,
            Self::Ten => 10,
        }
    }

    /// Returns true if a die showing `value` explodes.
    pub fn explodes(self, value: u32) -> bool {
        value >= self.value()
    }
}

impl TryFrom<u32> for ExplodeThreshold {
    type Error = DiceError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            8 => Ok(Self::Eight),
            9 => Ok(Self::Nine),
            10 => Ok(Self::Ten),
            other => Err(DiceError::InvalidThreshold(other)),
        }
    }
}

impl From<ExplodeThreshold> for Modifier {
    fn from(threshold: ExplodeThreshold) -> Self {
        match threshold {
            ExplodeThreshold::Eight => Modifier::ExplodeAt8,
            ExplodeThreshold::Nine => Modifier::ExplodeAt9,
            ExplodeThreshold::Ten => Modifier::ExplodeAt10,
        }
    }
}

impl std::fmt::Display for ExplodeThreshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-again", self.value())
    }
}
