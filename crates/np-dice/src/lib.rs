//! Dice-pool resolution engine for Nightpool.
//!
//! Parses roll expressions such as `Strength + Brawl - 2`, resolves named
//! terms against a character's stats, rolls a pool of ten-sided dice with
//! X-again explosions and rote rerolls, and classifies the result into
//! an outcome tier. A pool at or below zero falls back to a single chance die.

pub mod check;
pub mod config;
pub mod dice;
pub mod error;
pub mod outcome;
pub mod parse;
pub mod record;
pub mod report;
pub mod session;
pub mod stats;

pub use check::{CheckResult, perform_roll};
pub use config::RollConfig;
pub use dice::{
    DicePool, DieSource, ExplodeThreshold, FixedDice, Modifier, ModifierSet, RollOutcome,
    roll_pool,
};
pub use error::{DiceError, DiceResult, ParseError};
pub use outcome::{OutcomeTier, classify};
pub use parse::{RollRequest, RollShape, extract_modifier, parse};
pub use record::{OpenPolicy, RecordEntry, RecordPolicy, RollRecord};
pub use report::RollReport;
pub use session::RollSession;
pub use stats::{PoolSize, StatBlock, StatResolver, resolve_request};
