use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::constants::DEFAULT_CHALLENGE_TARGET;
use crate::event::EventKind;
use crate::level::LevelTable;

/// Per-user progression record, persisted as one JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub xp: u64,
    pub level: u32,
    pub badges: Vec<String>,
    pub daily_challenge_status: DailyChallengeStatus,
    #[serde(default)]
    pub counters: ProgressCounters,
}

/// State of the current daily-challenge cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyChallengeStatus {
    pub completed: bool,
    #[serde(deserialize_with = "lenient_date")]
    pub last_completion_date: Option<NaiveDate>,
    pub pokemon_type: Option<String>,
    pub target_count: u32,
}

/// Counters backing badge rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressCounters {
    pub event_counts: BTreeMap<EventKind, u64>,
    pub caught_species: BTreeSet<u32>,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            xp: 0,
            level: 1,
            badges: Vec::new(),
            daily_challenge_status: DailyChallengeStatus::default(),
            counters: ProgressCounters::default(),
        }
    }
}

impl Default for DailyChallengeStatus {
    fn default() -> Self {
        Self {
            completed: false,
            last_completion_date: None,
            pokemon_type: None,
            target_count: DEFAULT_CHALLENGE_TARGET,
        }
    }
}

impl UserProgress {
    /// Overlay a stored record on the default record.
    ///
    /// Top-level stored fields win; missing or `null` fields come from the
    /// default. A stored field that does not fit the schema is replaced by
    /// its default without discarding the rest of the record.
    #[must_use]
    pub fn merge_with_defaults(stored: Option<Value>) -> Self {
        let stored = match stored {
            None => return Self::default(),
            Some(Value::Object(map)) => map,
            Some(other) => {
                tracing::warn!(kind = json_kind(&other), "stored progress is not an object, using defaults");
                return Self::default();
            },
        };

        let mut merged = match serde_json::to_value(Self::default()) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        for (key, value) in stored {
            if value.is_null() {
                continue;
            }
            let previous = merged.insert(key.clone(), value);
            if let Err(e) = serde_json::from_value::<Self>(Value::Object(merged.clone())) {
                tracing::warn!(field = %key, error = %e, "stored progress field does not match schema, using default");
                match previous {
                    Some(default) => merged.insert(key, default),
                    None => merged.remove(&key),
                };
            }
        }

        serde_json::from_value(Value::Object(merged)).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "stored progress does not match schema, using defaults");
            Self::default()
        })
    }

    /// Re-derive `level` from `xp` and drop duplicate badge ids.
    ///
    /// Returns `true` if anything changed.
    pub fn normalize(&mut self, levels: &LevelTable) -> bool {
        let mut changed = false;
        let level = levels.level_from_xp(self.xp);
        if level != self.level {
            tracing::debug!(stored = self.level, derived = level, xp = self.xp, "level re-derived from xp");
            self.level = level;
            changed = true;
        }
        let before = self.badges.len();
        let mut seen = HashSet::new();
        self.badges.retain(|id| seen.insert(id.clone()));
        changed || self.badges.len() != before
    }

    #[must_use]
    pub fn has_badge(&self, id: &str) -> bool {
        self.badges.iter().any(|b| b == id)
    }
}

impl DailyChallengeStatus {
    /// Start a new cycle if the last completion happened before `today`.
    ///
    /// Returns `true` when the status was reset.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        let stale = self.completed && self.last_completion_date.is_none_or(|d| d < today);
        if stale {
            self.completed = false;
        }
        stale
    }

    pub fn complete(&mut self, today: NaiveDate) {
        self.completed = true;
        self.last_completion_date = Some(today);
    }

    /// Set a new challenge. A completion made on `today` still stands.
    pub fn assign(&mut self, pokemon_type: String, target_count: u32, today: NaiveDate) {
        self.completed = self.completed_on(today);
        self.pokemon_type = Some(pokemon_type);
        self.target_count = target_count.max(1);
    }

    #[must_use]
    pub fn completed_on(&self, day: NaiveDate) -> bool {
        self.completed && self.last_completion_date == Some(day)
    }
}

impl ProgressCounters {
    pub fn record_event(&mut self, kind: &EventKind) {
        let count = self.event_counts.entry(kind.clone()).or_insert(0);
        *count = count.saturating_add(1);
    }

    #[must_use]
    pub fn event_count(&self, kind: &EventKind) -> u64 {
        self.event_counts.get(kind).copied().unwrap_or(0)
    }

    /// Returns `true` if the species was not caught before.
    pub fn record_species(&mut self, pokemon_id: u32) -> bool {
        self.caught_species.insert(pokemon_id)
    }

    #[must_use]
    pub fn species_in_range(&self, min_id: u32, max_id: u32) -> u64 {
        if min_id > max_id {
            return 0;
        }
        self.caught_species.range(min_id..=max_id).count() as u64
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps or null. Anything else reads as `None`.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::String(s)) = raw else {
        return Ok(None);
    };
    if let Ok(date) = NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    match chrono::DateTime::parse_from_rfc3339(&s) {
        Ok(ts) => Ok(Some(ts.date_naive())),
        Err(_) => {
            tracing::warn!(value = %s, "unparsable lastCompletionDate, treating as never completed");
            Ok(None)
        },
    }
}
