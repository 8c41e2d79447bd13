use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Durable per-user-per-SOP record of weak areas and quiz history. Created
/// lazily the first time a trainee opens a given SOP; mutated only by quiz
/// submission; never deleted by normal flow.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResultProfile {
    /// Topic label to miss-count. Every stored counter is >= 1; a counter
    /// at 0 means the topic is mastered and is removed, never stored.
    pub weak_areas: BTreeMap<String, u32>,
    /// Append-only, in submission order. Never mutated or reordered.
    pub history: Vec<HistoryEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct HistoryEntry {
    pub score: u32,
    pub total: u32,
    pub time: DateTime<Utc>,
}

impl ResultProfile {
    pub fn weak_topics(&self) -> Vec<String> {
        self.weak_areas.keys().cloned().collect()
    }

    pub fn record_attempt(&mut self, score: u32, total: u32) {
        self.history.push(HistoryEntry {
            score,
            total,
            time: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_profile_is_empty() {
        let profile = ResultProfile::default();
        assert!(profile.weak_areas.is_empty());
        assert!(profile.history.is_empty());
    }

    #[test]
    fn record_attempt_appends_in_order() {
        let mut profile = ResultProfile::default();
        profile.record_attempt(3, 5);
        profile.record_attempt(5, 5);

        assert_eq!(profile.history.len(), 2);
        assert_eq!(profile.history[0].score, 3);
        assert_eq!(profile.history[1].score, 5);
        assert!(profile.history[0].time <= profile.history[1].time);
    }

    #[test]
    fn serialization_round_trip_preserves_history_order() {
        let mut profile = ResultProfile::default();
        profile.weak_areas.insert("ppe".to_string(), 2);
        profile.record_attempt(1, 7);
        profile.record_attempt(6, 7);

        let json = serde_json::to_string(&profile).unwrap();
        let parsed: ResultProfile = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, profile);
        assert_eq!(parsed.history[0].total, 7);
        assert_eq!(parsed.history[0].score, 1);
        assert_eq!(parsed.history[1].score, 6);
    }
}
