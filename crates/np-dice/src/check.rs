//! End-to-end rolls: parse, resolve, bound, roll, classify.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::RollConfig;
use crate::dice::{DicePool, DieSource, ModifierSet, RollOutcome};
use crate::error::DiceResult;
use crate::outcome::OutcomeTier;
use crate::parse::{RollRequest, parse};
use crate::stats::{PoolSize, StatResolver, resolve_request};

/// The result of rolling one expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// The parsed expression.
    pub request: RollRequest,
    /// The resolved pool size.
    pub pool: PoolSize,
    /// The modifiers the roll used.
    pub modifiers: ModifierSet,
    /// The dice rolled.
    pub roll: RollOutcome,
    /// The classified outcome.
    pub tier: OutcomeTier,
}

impl CheckResult {
    /// Number of successes rolled.
    pub fn successes(&self) -> u32 {
        self.roll.success_count
    }

    /// Returns true if the roll fell back to a chance die.
    pub fn is_chance_roll(&self) -> bool {
        self.roll.is_chance_roll()
    }
}

/// Roll a free-form expression for a character.
pub fn perform_roll<S: DieSource + ?Sized>(
    expression: &str,
    stats: &dyn StatResolver,
    modifiers: &ModifierSet,
    config: &RollConfig,
    source: &mut S,
) -> DiceResult<CheckResult> {
    let request = parse(expression)?;
    let pool = resolve_request(&request, stats)?;
    config.check_pool(pool)?;

    let roll = DicePool::from_pool_size(pool)
        .with_threshold(config.success_threshold)
        .with_modifiers(modifiers.clone())
        .roll(source);
    let tier = roll.tier();

    info!(
        expression = %request,
        pool = pool.final_pool,
        successes = roll.success_count,
        tier = %tier,
        "roll resolved"
    );

    Ok(CheckResult {
        request,
        pool,
        modifiers: modifiers.clone(),
        roll,
        tier,
    })
}
