//! Stat resolution: turning named terms into pool sizes.
//!
//! The engine never owns character data. Callers inject a [`StatResolver`],
//! and a term that does not resolve surfaces as [`DiceError::StatNotFound`].

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{DiceError, DiceResult};
use crate::parse::RollRequest;

/// Looks up a character's stat by case-folded name.
pub trait StatResolver {
    /// Returns the stat's value, or `None` if the character has no such stat.
    fn resolve(&self, name: &str) -> Option<i32>;
}

impl StatResolver for HashMap<String, i32> {
    fn resolve(&self, name: &str) -> Option<i32> {
        self.get(&name.to_lowercase()).copied()
    }
}

impl StatResolver for BTreeMap<String, i32> {
    fn resolve(&self, name: &str) -> Option<i32> {
        self.get(&name.to_lowercase()).copied()
    }
}

impl<T: StatResolver + ?Sized> StatResolver for &T {
    fn resolve(&self, name: &str) -> Option<i32> {
        (**self).resolve(name)
    }
}

/// A table of stats keyed by case-folded name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, i32>", into = "BTreeMap<String, i32>")]
pub struct StatBlock {
    stats: BTreeMap<String, i32>,
}

impl StatBlock {
    /// Create an empty stat block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a stat block from a JSON object of `name: value` pairs.
    pub fn from_json(json: &str) -> DiceResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set a stat, replacing any previous value.
    pub fn set(&mut self, name: &str, value: i32) {
        self.stats.insert(name.trim().to_lowercase(), value);
    }

    /// Builder form of [`StatBlock::set`].
    pub fn with(mut self, name: &str, value: i32) -> Self {
        self.set(name, value);
        self
    }

    /// Number of stats.
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    /// Whether the block has no stats.
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.stats.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl StatResolver for StatBlock {
    fn resolve(&self, name: &str) -> Option<i32> {
        self.stats.resolve(name)
    }
}

impl From<BTreeMap<String, i32>> for StatBlock {
    fn from(map: BTreeMap<String, i32>) -> Self {
        map.into_iter().fold(Self::new(), |block, (k, v)| block.with(&k, v))
    }
}

impl From<StatBlock> for BTreeMap<String, i32> {
    fn from(block: StatBlock) -> Self {
        block.stats
    }
}

/// A pool size before and after modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSize {
    /// Sum of the resolved terms, or the direct pool size.
    pub pre_modifier: i32,
    /// The pool actually rolled.
    pub final_pool: i32,
}

impl PoolSize {
    /// A pool with no modifiers applied.
    pub fn flat(size: i32) -> Self {
        Self {
            pre_modifier: size,
            final_pool: size,
        }
    }
}

/// Resolve a parsed request into a pool size.
///
/// Terms are summed in order; the first missing term aborts resolution.
pub fn resolve_request(request: &RollRequest, stats: &dyn StatResolver) -> DiceResult<PoolSize> {
    if let Some(size) = request.pool_size() {
        return Ok(PoolSize::flat(size));
    }

    let mut pre_modifier = 0i32;
    for name in request.terms() {
        let value = stats
            .resolve(name)
            .ok_or_else(|| DiceError::StatNotFound(name.to_string()))?;
        pre_modifier = pre_modifier.saturating_add(value);
    }

    Ok(PoolSize {
        pre_modifier,
        final_pool: pre_modifier.saturating_add(request.modifier()),
    })
}
