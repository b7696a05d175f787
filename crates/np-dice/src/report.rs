//! Presentation adapters for a finished roll.
//!
//! The actor sees every die, observers see only the count and tier, and
//! the shared record receives a [`RecordEntry`].

use chrono::Utc;

use crate::check::CheckResult;
use crate::dice::Modifier;
use crate::record::RecordEntry;

/// A finished roll attributed to an actor.
#[derive(Debug, Clone, Copy)]
pub struct RollReport<'a> {
    actor: &'a str,
    result: &'a CheckResult,
}

impl<'a> RollReport<'a> {
    /// Attribute `result` to `actor`.
    pub fn new(actor: &'a str, result: &'a CheckResult) -> Self {
        Self { actor, result }
    }

    /// Full detail for the acting party.
    pub fn actor_view(&self) -> String {
        let result = self.result;
        let mut details = Vec::new();
        if result.is_chance_roll() {
            details.push("chance die".to_string());
        } else {
            let n = result.pool.final_pool;
            details.push(format!("{n} {}", if n == 1 { "die" } else { "dice" }));
        }
        details.extend(
            self.applied_modifiers()
                .into_iter()
                .filter(|m| m.explode_threshold().is_some() || *m == Modifier::Rote)
                .map(|m| m.to_string()),
        );

        let values: Vec<String> = result.roll.die_results.iter().map(|v| v.to_string()).collect();
        let mut out = format!(
            "{} rolls {} ({}): [{}] = {}",
            self.actor,
            result.request,
            details.join(", "),
            values.join(", "),
            self.tally()
        );
        out.push_str(&self.verdict());
        out
    }

    /// Success count and tier only, for everyone else present.
    pub fn observer_view(&self) -> String {
        let mut out = format!(
            "{} rolls {}: {}",
            self.actor,
            self.result.request,
            self.tally()
        );
        out.push_str(&self.verdict());
        out
    }

    /// An entry for the shared roll record.
    pub fn record_entry(&self) -> RecordEntry {
        let result = self.result;
        RecordEntry {
            actor: self.actor.to_string(),
            expression: result.request.to_string(),
            values: result.roll.die_results.clone(),
            successes: result.roll.success_count,
            tier: result.tier,
            modifiers: self
                .applied_modifiers()
                .iter()
                .map(|m| m.to_string())
                .collect(),
            chance_die: result.is_chance_roll(),
            damage_only: result.modifiers.is_damage_only(),
            timestamp: Utc::now(),
        }
    }

    /// Notable modifiers that had an effect. A chance die never explodes
    /// or rerolls, so those are dropped for it.
    fn applied_modifiers(&self) -> Vec<Modifier> {
        let chance = self.result.is_chance_roll();
        self.result
            .modifiers
            .notable()
            .into_iter()
            .filter(|m| !chance || (m.explode_threshold().is_none() && *m != Modifier::Rote))
            .collect()
    }

    fn tally(&self) -> String {
        let n = self.result.roll.success_count;
        if self.result.modifiers.is_damage_only() {
            format!("{n} damage")
        } else if n == 1 {
            "1 success".to_string()
        } else {
            format!("{n} successes")
        }
    }

    fn verdict(&self) -> String {
        let mut out = String::new();
        if !self.result.modifiers.is_damage_only() {
            out.push_str(&format!(". {}", self.result.tier));
        }
        out.push('.');
        if self.result.modifiers.is_no_cost() {
            out.push_str(" (no cost)");
        }
        out
    }
}
