//! Outcome tiers for a rolled pool.
//!
//! - **Dramatic failure**: a chance-die roll with no successes and a natural 1
//! - **Failure**: no successes otherwise
//! - **Success**: one to four successes
//! - **Exceptional success**: five or more successes

use serde::{Deserialize, Serialize};

/// Successes needed for an exceptional success.
pub const EXCEPTIONAL_SUCCESSES: u32 = 5;

/// The narrative result of a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeTier {
    /// A chance die came up 1.
    DramaticFailure,
    /// No successes.
    Failure,
    /// One to four successes.
    Success,
    /// Five or more successes.
    ExceptionalSuccess,
}

impl OutcomeTier {
    /// Returns true for `Success` and `ExceptionalSuccess`.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success | Self::ExceptionalSuccess)
    }
}

impl std::fmt::Display for OutcomeTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DramaticFailure => write!(f, "Dramatic Failure"),
            Self::Failure => write!(f, "Failure"),
            Self::Success => write!(f, "Success"),
            Self::ExceptionalSuccess => write!(f, "Exceptional Success"),
        }
    }
}

/// Classify a roll.
///
/// Dramatic failure keys on the pool size *before* modifiers, so a positive
/// pool pushed to zero by a penalty can fail but never fail dramatically.
pub fn classify(success_count: u32, one_count: u32, pre_modifier_pool_size: i32) -> OutcomeTier {
    match success_count {
        0 if one_count >= 1 && pre_modifier_pool_size <= 0 => OutcomeTier::DramaticFailure,
        0 => OutcomeTier::Failure,
        n if n >= EXCEPTIONAL_SUCCESSES => OutcomeTier::ExceptionalSuccess,
        _ => OutcomeTier::Success,
    }
}
