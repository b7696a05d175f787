//! Roll record entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::outcome::OutcomeTier;

/// One roll as it appears in the shared record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEntry {
    /// Who rolled.
    pub actor: String,
    /// The canonical roll expression.
    pub expression: String,
    /// Individual die values, in roll order.
    pub values: Vec<u32>,
    /// Number of successes.
    pub successes: u32,
    /// The classified outcome.
    pub tier: OutcomeTier,
    /// Display names of the notable modifiers.
    pub modifiers: Vec<String>,
    /// Whether the roll used a chance die.
    pub chance_die: bool,
    /// Whether successes count as damage.
    pub damage_only: bool,
    /// When the roll was made.
    pub timestamp: DateTime<Utc>,
}

impl RecordEntry {
    /// The result part of a record line, e.g. `3 successes (Success)`.
    pub fn summary(&self) -> String {
        let n = self.successes;
        if self.damage_only {
            return format!("{n} damage");
        }
        let noun = if n == 1 { "success" } else { "successes" };
        format!("{n} {noun} ({})", self.tier)
    }

    /// The die values joined for display.
    pub fn values_text(&self) -> String {
        let vals: Vec<String> = self.values.iter().map(|v| v.to_string()).collect();
        vals.join(", ")
    }

    /// Extra notes shown after the expression, if any.
    pub fn notes(&self) -> Option<String> {
        let mut notes = Vec::new();
        if self.chance_die {
            notes.push("chance die".to_string());
        }
        notes.extend(self.modifiers.iter().cloned());
        if notes.is_empty() {
            None
        } else {
            Some(notes.join(", "))
        }
    }
}
