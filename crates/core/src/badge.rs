//! Badge definitions and unlock rules.

use serde::{Deserialize, Serialize};

use crate::constants::{KANTO_SPECIES_MAX, KANTO_SPECIES_MIN};
use crate::event::EventKind;
use crate::progress::ProgressCounters;

/// What a badge's `target` is compared against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BadgeRule {
    /// Number of applied events of `kind`.
    EventCount { kind: EventKind },
    /// Number of distinct captured species with ids in `min_id..=max_id`.
    RegionSpecies { min_id: u32, max_id: u32 },
}

/// Static, process-wide badge configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeDefinition {
    pub id: String,
    pub title: String,
    pub target: u64,
    pub rule: BadgeRule,
}

impl BadgeDefinition {
    #[must_use]
    pub fn new(id: &str, title: &str, target: u64, rule: BadgeRule) -> Self {
        Self { id: id.to_owned(), title: title.to_owned(), target, rule }
    }

    /// Current value of the counter this badge tracks.
    #[must_use]
    pub fn counter_value(&self, counters: &ProgressCounters) -> u64 {
        match &self.rule {
            BadgeRule::EventCount { kind } => counters.event_count(kind),
            BadgeRule::RegionSpecies { min_id, max_id } => {
                counters.species_in_range(*min_id, *max_id)
            },
        }
    }

    #[must_use]
    pub fn is_satisfied(&self, counters: &ProgressCounters) -> bool {
        self.counter_value(counters) >= self.target
    }
}

/// Built-in badge set.
#[must_use]
pub fn default_badges() -> Vec<BadgeDefinition> {
    vec![
        BadgeDefinition::new(
            "KANTO",
            "Kanto Explorer",
            5,
            BadgeRule::RegionSpecies { min_id: KANTO_SPECIES_MIN, max_id: KANTO_SPECIES_MAX },
        ),
        BadgeDefinition::new(
            "SOCIALITE",
            "Social Trainer",
            1,
            BadgeRule::EventCount { kind: EventKind::FirstDiscoveryPost },
        ),
        BadgeDefinition::new(
            "DAILY_VETERAN",
            "Daily Veteran",
            7,
            BadgeRule::EventCount { kind: EventKind::DailyChallengeComplete },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn badge(id: &str) -> BadgeDefinition {
        default_badges().into_iter().find(|b| b.id == id).unwrap()
    }

    #[test]
    fn socialite_needs_one_post() {
        let mut counters = ProgressCounters::default();
        assert!(!badge("SOCIALITE").is_satisfied(&counters));
        counters.record_event(&EventKind::FirstDiscoveryPost);
        assert!(badge("SOCIALITE").is_satisfied(&counters));
    }

    #[test]
    fn kanto_counts_distinct_species_in_region() {
        let mut counters = ProgressCounters::default();
        for id in [1, 4, 7, 7, 25, 152, 251] {
            counters.record_species(id);
        }
        let kanto = badge("KANTO");
        assert_eq!(kanto.counter_value(&counters), 4);
        assert!(!kanto.is_satisfied(&counters));
        counters.record_species(151);
        assert!(kanto.is_satisfied(&counters));
    }

    #[test]
    fn rule_json_shape() {
        let json = serde_json::to_value(&badge("DAILY_VETERAN").rule).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "event_count", "kind": "DAILY_CHALLENGE_COMPLETE"})
        );
    }
}
