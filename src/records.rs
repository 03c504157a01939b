//! Best-shot records
//!
//! Fewest shots needed to clear each level, keyed by level name. Lives only
//! for the session.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Best-shot table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BestShots {
    entries: HashMap<String, u32>,
}

impl BestShots {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Check if a shot count would beat the current record
    pub fn qualifies(&self, level: &str, shots: u32) -> bool {
        self.entries.get(level).is_none_or(|&best| shots < best)
    }

    /// Record a completion. Returns true if it set a new best.
    pub fn record(&mut self, level: &str, shots: u32) -> bool {
        if !self.qualifies(level, shots) {
            return false;
        }
        self.entries.insert(level.to_string(), shots);
        true
    }

    /// Best shot count for a level (if any)
    pub fn best(&self, level: &str) -> Option<u32> {
        self.entries.get(level).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_completion_is_best() {
        let mut records = BestShots::new();
        assert!(records.is_empty());
        assert!(records.record("Double Curve", 4));
        assert_eq!(records.best("Double Curve"), Some(4));
        assert_eq!(records.best("Tight Binary"), None);
    }

    #[test]
    fn test_worse_run_keeps_record() {
        let mut records = BestShots::new();
        assert!(records.record("Slingshot Basics", 3));
        assert!(!records.record("Slingshot Basics", 5));
        assert_eq!(records.best("Slingshot Basics"), Some(3));
    }

    #[test]
    fn test_tie_is_not_a_new_best() {
        let mut records = BestShots::new();
        records.record("Slingshot Basics", 3);
        assert!(!records.qualifies("Slingshot Basics", 3));
        assert!(records.qualifies("Slingshot Basics", 2));
    }

    #[test]
    fn test_levels_are_independent() {
        let mut records = BestShots::new();
        records.record("A", 2);
        records.record("B", 7);
        assert_eq!(records.len(), 2);
        assert_eq!(records.best("A"), Some(2));
        assert_eq!(records.best("B"), Some(7));
    }
}
