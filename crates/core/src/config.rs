//! Immutable progression configuration: level table, XP awards and badges.
//!
//! Built once at startup (from the built-in tables or a JSON file) and shared
//! by `Arc` with whatever applies awards.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::badge::{default_badges, BadgeDefinition};
use crate::constants::{XP_DAILY_CHALLENGE_COMPLETE, XP_FIRST_DISCOVERY_POST, XP_POKEMON_CAPTURE};
use crate::error::{ProgressError, Result};
use crate::event::EventKind;
use crate::level::LevelTable;

/// XP granted for one event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpAward {
    pub xp: u64,
    /// Grant the XP only the first time this kind is applied for a user.
    #[serde(default)]
    pub once: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    pub levels: LevelTable,
    pub xp_awards: BTreeMap<EventKind, XpAward>,
    pub badges: Vec<BadgeDefinition>,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        let xp_awards = BTreeMap::from([
            (EventKind::PokemonCapture, XpAward { xp: XP_POKEMON_CAPTURE, once: false }),
            (
                EventKind::DailyChallengeComplete,
                XpAward { xp: XP_DAILY_CHALLENGE_COMPLETE, once: false },
            ),
            (EventKind::FirstDiscoveryPost, XpAward { xp: XP_FIRST_DISCOVERY_POST, once: true }),
        ]);
        Self { levels: LevelTable::default(), xp_awards, badges: default_badges() }
    }
}

impl ProgressionConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&raw)?;
        tracing::info!(
            path = %path.display(),
            levels = config.levels.max_level(),
            badges = config.badges.len(),
            "loaded progression config"
        );
        Ok(config)
    }

    /// Badge ids must be non-empty and unique.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for badge in &self.badges {
            if badge.id.trim().is_empty() {
                return Err(ProgressError::InvalidConfig("badge with empty id".to_owned()));
            }
            if !seen.insert(badge.id.as_str()) {
                return Err(ProgressError::InvalidConfig(format!("duplicate badge id {}", badge.id)));
            }
        }
        Ok(())
    }

    /// Configured award for `kind`; unknown kinds earn nothing.
    #[must_use]
    pub fn award_for(&self, kind: &EventKind) -> XpAward {
        self.xp_awards.get(kind).copied().unwrap_or(XpAward { xp: 0, once: false })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn default_awards() {
        let config = ProgressionConfig::default();
        assert_eq!(config.award_for(&EventKind::PokemonCapture).xp, 50);
        assert_eq!(config.award_for(&EventKind::DailyChallengeComplete).xp, 150);
        let post = config.award_for(&EventKind::FirstDiscoveryPost);
        assert_eq!(post.xp, 200);
        assert!(post.once);
        assert_eq!(config.award_for(&EventKind::Other("WAVE".into())).xp, 0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ProgressionConfig::from_json_str(r#"{"levels": [0, 10, 20]}"#).unwrap();
        assert_eq!(config.levels.max_level(), 3);
        assert_eq!(config.badges.len(), 3);
        assert_eq!(config.award_for(&EventKind::PokemonCapture).xp, 50);
    }

    #[test]
    fn json_awards_and_badges() {
        let raw = r#"{
            "xp_awards": {"POKEMON_CAPTURE": {"xp": 10}, "RAID_WON": {"xp": 500, "once": true}},
            "badges": [{"id": "RAIDER", "title": "Raider", "target": 1,
                        "rule": {"type": "event_count", "kind": "RAID_WON"}}]
        }"#;
        let config = ProgressionConfig::from_json_str(raw).unwrap();
        assert_eq!(config.award_for(&EventKind::PokemonCapture).xp, 10);
        assert_eq!(config.award_for(&EventKind::FirstDiscoveryPost).xp, 0);
        let raid = config.award_for(&EventKind::Other("RAID_WON".into()));
        assert_eq!(raid, XpAward { xp: 500, once: true });
        assert!(config.badges.iter().any(|b| b.id == "RAIDER"));
    }

    #[test]
    fn rejects_duplicate_badges() {
        let raw = r#"{"badges": [
            {"id": "A", "title": "A", "target": 1, "rule": {"type": "event_count", "kind": "X"}},
            {"id": "A", "title": "A2", "target": 2, "rule": {"type": "event_count", "kind": "X"}}
        ]}"#;
        assert!(matches!(
            ProgressionConfig::from_json_str(raw),
            Err(ProgressError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_bad_level_table() {
        assert!(ProgressionConfig::from_json_str(r#"{"levels": [1, 2]}"#).is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"levels": [0, 75]}}"#).unwrap();
        let config = ProgressionConfig::load(file.path()).unwrap();
        assert_eq!(config.levels.thresholds(), &[0, 75]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ProgressionConfig::load(Path::new("/nonexistent/pokexp.json")).unwrap_err();
        assert!(matches!(err, ProgressError::Io(_)));
    }
}
