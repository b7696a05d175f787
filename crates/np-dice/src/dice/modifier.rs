//! Roll modifiers and their precedence rules.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::ExplodeThreshold;

/// A named modifier applied to a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Modifier {
    /// No special handling beyond the baseline 10-again.
    Normal,
    /// Dice showing 8 or more explode.
    ExplodeAt8,
    /// Dice showing 9 or more explode.
    ExplodeAt9,
    /// Dice showing 10 explode.
    ExplodeAt10,
    /// Every chain without a success is rerolled once.
    Rote,
    /// The roll does not cost the actor their action.
    NoCost,
    /// Successes are reported as damage, without an outcome tier.
    DamageOnly,
}

impl Modifier {
    /// Parse a command switch such as `rote`, `9again`, or `nocost`.
    pub fn from_switch(switch: &str) -> Option<Self> {
        let s = switch.trim().to_lowercase();
        match s.as_str() {
            "normal" => Some(Self::Normal),
            "8" | "8again" | "8-again" => Some(Self::ExplodeAt8),
            "9" | "9again" | "9-again" => Some(Self::ExplodeAt9),
            "10" | "10again" | "10-again" => Some(Self::ExplodeAt10),
            "rote" => Some(Self::Rote),
            "nocost" | "no-cost" => Some(Self::NoCost),
            "damage" | "dmg" => Some(Self::DamageOnly),
            _ => None,
        }
    }

    /// The exploding threshold this modifier selects, if any.
    pub fn explode_threshold(self) -> Option<ExplodeThreshold> {
        match self {
            Self::ExplodeAt8 => Some(ExplodeThreshold::Eight),
            Self::ExplodeAt9 => Some(ExplodeThreshold::Nine),
            Self::ExplodeAt10 => Some(ExplodeThreshold::Ten),
            _ => None,
        }
    }
}

impl std::fmt::Display for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::ExplodeAt8 => write!(f, "8-again"),
            Self::ExplodeAt9 => write!(f, "9-again"),
            Self::ExplodeAt10 => write!(f, "10-again"),
            Self::Rote => write!(f, "rote"),
            Self::NoCost => write!(f, "no cost"),
            Self::DamageOnly => write!(f, "damage only"),
        }
    }
}

/// An immutable set of modifiers for one roll.
///
/// An empty set is never observable: constructing one from no modifiers
/// yields `{ExplodeAt10}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierSet {
    modifiers: BTreeSet<Modifier>,
}

impl Default for ModifierSet {
    fn default() -> Self {
        Self {
            modifiers: BTreeSet::from([Modifier::ExplodeAt10]),
        }
    }
}

impl ModifierSet {
    /// Build a set from the given modifiers, falling back to the default
    /// `{ExplodeAt10}` when none are supplied.
    pub fn new(modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        let modifiers: BTreeSet<Modifier> = modifiers.into_iter().collect();
        if modifiers.is_empty() {
            Self::default()
        } else {
            Self { modifiers }
        }
    }

    /// Returns true if the set contains `modifier`.
    pub fn contains(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    /// Returns true if failed chains are rerolled once.
    pub fn is_rote(&self) -> bool {
        self.contains(Modifier::Rote)
    }

    /// Returns true if successes are reported as damage.
    pub fn is_damage_only(&self) -> bool {
        self.contains(Modifier::DamageOnly)
    }

    /// Returns true if the roll does not cost an action.
    pub fn is_no_cost(&self) -> bool {
        self.contains(Modifier::NoCost)
    }

    /// The single exploding threshold in effect.
    ///
    /// The lowest threshold present wins; with none present the baseline
    /// 10-again applies.
    pub fn explode_threshold(&self) -> ExplodeThreshold {
        self.modifiers
            .iter()
            .filter_map(|m| m.explode_threshold())
            .min()
            .unwrap_or(ExplodeThreshold::Ten)
    }

    /// Iterate over the modifiers in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.modifiers.iter().copied()
    }

    /// Modifiers worth mentioning when displaying a roll: the effective
    /// exploding threshold when it is not the baseline, then every other
    /// flag except `Normal`.
    pub fn notable(&self) -> Vec<Modifier> {
        let threshold = self.explode_threshold();
        let mut out = Vec::new();
        if threshold != ExplodeThreshold::Ten {
            out.push(Modifier::from(threshold));
        }
        out.extend(
            self.iter()
                .filter(|m| m.explode_threshold().is_none() && *m != Modifier::Normal),
        );
        out
    }
}

impl FromIterator<Modifier> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl std::fmt::Display for ModifierSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.iter().map(|m| m.to_string()).collect();
        write!(f, "{}", names.join(", "))
    }
}
