//! The shared roll record.
//!
//! Posting to the record goes through a [`RecordPolicy`], so a host can
//! decide who may write to it.

pub mod entry;
pub mod log;

pub use entry::RecordEntry;
pub use log::RollRecord;

/// Decides whether an actor may post to a record.
pub trait RecordPolicy {
    /// Returns true if `actor` may post.
    fn may_post(&self, actor: &str) -> bool;
}

/// A policy that lets everyone post.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenPolicy;

impl RecordPolicy for OpenPolicy {
    fn may_post(&self, _actor: &str) -> bool {
        true
    }
}
