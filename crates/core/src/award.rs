//! The pure award step: one event in, updated record and notifications out.
//!
//! Nothing here touches storage or presentation; the service layer persists
//! the returned record and hands the notifications to a sink.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::badge::BadgeRule;
use crate::config::ProgressionConfig;
use crate::event::{AwardEvent, EventKind};
use crate::progress::UserProgress;

/// A user-visible consequence of an award.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressNotification {
    LevelUp { level: u32 },
    BadgeUnlocked { id: String, title: String },
}

impl fmt::Display for ProgressNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LevelUp { level } => {
                write!(f, "Congratulations! You leveled up to Level {level}!")
            },
            Self::BadgeUnlocked { title, .. } => write!(f, "Badge Unlocked: {title}!"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwardOutcome {
    pub progress: UserProgress,
    pub notifications: Vec<ProgressNotification>,
    pub xp_awarded: u64,
    pub previous_level: u32,
}

impl AwardOutcome {
    #[must_use]
    pub fn leveled_up(&self) -> bool {
        self.progress.level > self.previous_level
    }

    pub fn unlocked_badges(&self) -> impl Iterator<Item = &str> {
        self.notifications.iter().filter_map(|n| match n {
            ProgressNotification::BadgeUnlocked { id, .. } => Some(id.as_str()),
            ProgressNotification::LevelUp { .. } => None,
        })
    }
}

/// Apply one award event to `progress` as of `today`.
#[must_use]
pub fn apply_award(
    config: &ProgressionConfig,
    mut progress: UserProgress,
    event: &AwardEvent,
    today: NaiveDate,
) -> AwardOutcome {
    progress.normalize(&config.levels);
    backfill_event_counts(config, &mut progress);
    let previous_level = progress.level;

    if progress.daily_challenge_status.roll_over(today) {
        tracing::debug!(%today, "daily challenge rolled over to a new cycle");
    }

    let award = config.award_for(&event.kind);
    let repeat = progress.counters.event_count(&event.kind) > 0;
    let xp_awarded = if award.once && repeat { 0 } else { award.xp };
    progress.xp = progress.xp.saturating_add(xp_awarded);

    // A second completion on the same day still pays XP but is not another
    // daily challenge.
    let same_day_completion = event.kind == EventKind::DailyChallengeComplete
        && progress.daily_challenge_status.completed_on(today);
    if !same_day_completion {
        progress.counters.record_event(&event.kind);
    }

    match event.kind {
        EventKind::PokemonCapture => {
            if let Some(id) = event.context.pokemon_id {
                progress.counters.record_species(id);
            }
        },
        EventKind::DailyChallengeComplete => progress.daily_challenge_status.complete(today),
        EventKind::FirstDiscoveryPost | EventKind::Other(_) => {},
    }

    let mut notifications = Vec::new();

    let new_level = config.levels.level_from_xp(progress.xp);
    if new_level > previous_level {
        notifications.push(ProgressNotification::LevelUp { level: new_level });
    }
    progress.level = new_level;

    for badge in &config.badges {
        if progress.has_badge(&badge.id) || !badge.is_satisfied(&progress.counters) {
            continue;
        }
        progress.badges.push(badge.id.clone());
        notifications.push(ProgressNotification::BadgeUnlocked {
            id: badge.id.clone(),
            title: badge.title.clone(),
        });
    }

    AwardOutcome { progress, notifications, xp_awarded, previous_level }
}

/// Records written before event counters existed can hold badges whose
/// counters read zero. Raise those counters to the badge target so one-time
/// awards are not granted a second time.
fn backfill_event_counts(config: &ProgressionConfig, progress: &mut UserProgress) {
    for badge in &config.badges {
        let BadgeRule::EventCount { kind } = &badge.rule else {
            continue;
        };
        if !progress.has_badge(&badge.id) {
            continue;
        }
        let count = progress.counters.event_counts.entry(kind.clone()).or_insert(0);
        if *count < badge.target {
            *count = badge.target;
        }
    }
}
