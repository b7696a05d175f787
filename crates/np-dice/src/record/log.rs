//! Record storage and export.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::RecordPolicy;
use super::entry::RecordEntry;
use crate::error::{DiceError, DiceResult};

/// A chronological log of posted rolls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RollRecord {
    entries: Vec<RecordEntry>,
}

impl RollRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry without consulting a policy.
    pub fn append(&mut self, entry: RecordEntry) {
        self.entries.push(entry);
    }

    /// Append an entry if `policy` lets its actor post.
    pub fn post(&mut self, entry: RecordEntry, policy: &dyn RecordPolicy) -> DiceResult<()> {
        if !policy.may_post(&entry.actor) {
            warn!(actor = %entry.actor, "record post refused");
            return Err(DiceError::RecordDenied(entry.actor));
        }
        debug!(actor = %entry.actor, expression = %entry.expression, "posted to record");
        self.append(entry);
        Ok(())
    }

    /// Get all entries.
    pub fn entries(&self) -> &[RecordEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export the record as markdown.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Roll Record\n\n");
        for entry in &self.entries {
            let notes = entry
                .notes()
                .map(|n| format!(" *({n})*"))
                .unwrap_or_default();
            out.push_str(&format!(
                "**{}** rolls {}{notes}: [{}] = **{}**\n\n",
                entry.actor,
                entry.expression,
                entry.values_text(),
                entry.summary()
            ));
        }
        out
    }

    /// Export the record as plain text.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Roll Record\n===========\n\n");
        for entry in &self.entries {
            let notes = entry.notes().map(|n| format!(" ({n})")).unwrap_or_default();
            out.push_str(&format!(
                "[{}] {} rolls {}{notes}: [{}] = {}\n",
                entry.timestamp.format("%H:%M:%S"),
                entry.actor,
                entry.expression,
                entry.values_text(),
                entry.summary()
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::OutcomeTier;
    use crate::record::OpenPolicy;
    use chrono::Utc;

    fn entry(actor: &str) -> RecordEntry {
        RecordEntry {
            actor: actor.to_string(),
            expression: "strength + brawl".to_string(),
            values: vec![8, 2, 10, 9, 3],
            successes: 3,
            tier: OutcomeTier::Success,
            modifiers: Vec::new(),
            chance_die: false,
            damage_only: false,
            timestamp: Utc::now(),
        }
    }

    struct Storytellers(Vec<&'static str>);

    impl RecordPolicy for Storytellers {
        fn may_post(&self, actor: &str) -> bool {
            self.0.iter().any(|a| *a == actor)
        }
    }

    #[test]
    fn empty_record() {
        let r = RollRecord::new();
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
    }

    #[test]
    fn open_policy_accepts_everyone() {
        let mut r = RollRecord::new();
        r.post(entry("Kara"), &OpenPolicy).unwrap();
        r.post(entry("Jonas"), &OpenPolicy).unwrap();
        assert_eq!(r.len(), 2);
        assert_eq!(r.entries()[1].actor, "Jonas");
    }

    #[test]
    fn refused_post_leaves_record_unchanged() {
        let mut r = RollRecord::new();
        let policy = Storytellers(vec!["ST"]);
        let err = r.post(entry("Kara"), &policy).unwrap_err();
        assert!(matches!(err, DiceError::RecordDenied(ref a) if a == "Kara"));
        assert_eq!(err.to_string(), "Kara may not post to this record");
        assert!(r.is_empty());

        r.post(entry("ST"), &policy).unwrap();
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn export_markdown_lines() {
        let mut r = RollRecord::new();
        r.append(entry("Kara"));
        let md = r.export_markdown();
        assert!(md.starts_with("# Roll Record"));
        assert!(md.contains("**Kara** rolls strength + brawl: [8, 2, 10, 9, 3] = **3 successes (Success)**"));
    }

    #[test]
    fn export_text_notes_and_damage() {
        let mut r = RollRecord::new();
        let mut e = entry("Kara");
        e.expression = "0".to_string();
        e.values = vec![10];
        e.successes = 1;
        e.chance_die = true;
        e.damage_only = true;
        e.modifiers = vec!["damage only".to_string()];
        r.append(e);
        let txt = r.export_text();
        assert!(txt.contains("Kara rolls 0 (chance die, damage only): [10] = 1 damage"));
    }

    #[test]
    fn record_serde_roundtrip() {
        let mut r = RollRecord::new();
        r.append(entry("Kara"));
        let json = serde_json::to_string(&r).unwrap();
        let r2: RollRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(r2.entries(), r.entries());
    }
}
