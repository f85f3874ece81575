//! XP to level mapping.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_LEVEL_THRESHOLDS;
use crate::error::{ProgressError, Result};

/// Cumulative XP thresholds for levels `1..=max_level`.
///
/// Level 1 always starts at 0 XP and thresholds strictly increase, so every
/// threshold maps back to exactly its own level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u64>", into = "Vec<u64>")]
pub struct LevelTable {
    thresholds: Vec<u64>,
}

/// Where a given XP total sits inside its level, for progress bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    pub level: u32,
    pub current_threshold: u64,
    pub next_threshold: u64,
    pub xp_into_level: u64,
    pub xp_to_next: u64,
    pub is_max_level: bool,
}

impl LevelTable {
    /// Build a table from cumulative thresholds, index 0 being level 1.
    pub fn new(thresholds: Vec<u64>) -> Result<Self> {
        match thresholds.first() {
            None => return Err(ProgressError::InvalidConfig("level table is empty".to_owned())),
            Some(&first) if first != 0 => {
                return Err(ProgressError::InvalidConfig(format!(
                    "level 1 must start at 0 XP, got {first}"
                )));
            },
            Some(_) => {},
        }
        if let Some(pos) = thresholds.windows(2).position(|w| w[0] >= w[1]) {
            return Err(ProgressError::InvalidConfig(format!(
                "threshold for level {} ({}) must be greater than level {} ({})",
                pos + 2,
                thresholds[pos + 1],
                pos + 1,
                thresholds[pos]
            )));
        }
        if u32::try_from(thresholds.len()).is_err() {
            return Err(ProgressError::InvalidConfig("level table too large".to_owned()));
        }
        Ok(Self { thresholds })
    }

    /// Highest defined level.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, reason = "length checked in constructor")]
    pub fn max_level(&self) -> u32 {
        self.thresholds.len() as u32
    }

    /// Cumulative threshold of `level`, `None` outside `1..=max_level`.
    #[must_use]
    pub fn threshold(&self, level: u32) -> Option<u64> {
        let idx = usize::try_from(level.checked_sub(1)?).ok()?;
        self.thresholds.get(idx).copied()
    }

    /// Highest level whose threshold is at most `total_xp`. Never below 1.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, reason = "bounded by table length")]
    pub fn level_from_xp(&self, total_xp: u64) -> u32 {
        // thresholds are sorted and thresholds[0] == 0, so the count is >= 1
        self.thresholds.partition_point(|&t| t <= total_xp).max(1) as u32
    }

    /// Threshold of the level after `current_level`.
    ///
    /// At max level this is the max level's own threshold. Callers treat
    /// equal current and next thresholds as "no further levels".
    /// Out-of-range levels are clamped into `1..=max_level`.
    #[must_use]
    pub fn xp_threshold_for_next_level(&self, current_level: u32) -> u64 {
        let max = self.max_level();
        let level = current_level.clamp(1, max);
        let next = if level == max { level } else { level + 1 };
        self.threshold(next).unwrap_or(0)
    }

    #[must_use]
    pub fn progress_for(&self, total_xp: u64) -> LevelProgress {
        let level = self.level_from_xp(total_xp);
        let current_threshold = self.threshold(level).unwrap_or(0);
        let next_threshold = self.xp_threshold_for_next_level(level);
        let is_max_level = level == self.max_level();
        LevelProgress {
            level,
            current_threshold,
            next_threshold,
            xp_into_level: total_xp.saturating_sub(current_threshold),
            xp_to_next: if is_max_level { 0 } else { next_threshold.saturating_sub(total_xp) },
            is_max_level,
        }
    }

    #[must_use]
    pub fn thresholds(&self) -> &[u64] {
        &self.thresholds
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self { thresholds: DEFAULT_LEVEL_THRESHOLDS.to_vec() }
    }
}

impl TryFrom<Vec<u64>> for LevelTable {
    type Error = ProgressError;

    fn try_from(thresholds: Vec<u64>) -> Result<Self> {
        Self::new(thresholds)
    }
}

impl From<LevelTable> for Vec<u64> {
    fn from(table: LevelTable) -> Self {
        table.thresholds
    }
}
