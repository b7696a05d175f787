//! Roll outcomes.

use serde::{Deserialize, Serialize};

use crate::outcome::{OutcomeTier, classify};

/// The result of rolling one dice pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// Every die value drawn, in generation order: each initial die followed
    /// by its explosion chain, then any rote rerolls.
    pub die_results: Vec<u32>,
    /// Number of dice at or above the success threshold.
    pub success_count: u32,
    /// Number of dice showing a natural 1.
    pub one_count: u32,
    /// Pool size after modifiers. A value at or below zero means a chance die.
    pub final_pool_size: i32,
    /// Pool size before modifiers were applied.
    pub pre_modifier_pool_size: i32,
    /// How many dice were added by explosions.
    pub exploded: u32,
    /// How many dice were added by rote rerolls.
    pub rerolled: u32,
}

impl RollOutcome {
    /// Returns true if this roll used the single chance die.
    pub fn is_chance_roll(&self) -> bool {
        self.final_pool_size <= 0
    }

    /// Classify the outcome into its tier.
    pub fn tier(&self) -> OutcomeTier {
        classify(
            self.success_count,
            self.one_count,
            self.pre_modifier_pool_size,
        )
    }

    /// Number of dice drawn in total.
    pub fn dice_rolled(&self) -> usize {
        self.die_results.len()
    }
}

impl std::fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.die_results.iter().map(|v| v.to_string()).collect();
        let noun = if self.success_count == 1 {
            "success"
        } else {
            "successes"
        };
        write!(f, "[{}] = {} {noun}", values.join(", "), self.success_count)
    }
}
