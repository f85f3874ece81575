use std::sync::Arc;

use chrono::{Local, NaiveDate};
use pokexp_core::{
    apply_award, progress_key, AwardContext, AwardEvent, AwardOutcome, EventKind,
    ProgressionConfig, UserProgress,
};
use pokexp_storage::{KeyValueStore as _, StorageBackend};

use crate::error::ServiceError;
use crate::notifier::{Notifier, UserNotification};

/// Read-modify-write shell around the pure award step.
///
/// Every award does one read and one combined write of the user's record.
/// Two awards racing for the same user can lose an update (last write wins);
/// callers are expected to award sequentially per session.
pub struct ProgressService {
    storage: Arc<StorageBackend>,
    config: Arc<ProgressionConfig>,
    notifier: Arc<dyn Notifier>,
}

fn storage_key(user_key: &str) -> Option<String> {
    (!user_key.trim().is_empty()).then(|| progress_key(user_key))
}

impl ProgressService {
    #[must_use]
    pub fn new(
        storage: Arc<StorageBackend>,
        config: Arc<ProgressionConfig>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self { storage, config, notifier }
    }

    #[must_use]
    pub fn config(&self) -> &ProgressionConfig {
        &self.config
    }

    /// Load a user's progress. Never fails.
    ///
    /// Absent, unreadable or malformed records yield the default record, which
    /// is not written back.
    pub async fn load_progress(&self, user_key: &str) -> UserProgress {
        let Some(key) = storage_key(user_key) else {
            tracing::debug!("blank user key, returning default progress");
            return UserProgress::default();
        };

        let stored = match self.storage.get(&key).await {
            Ok(Some(raw)) => match serde_json::from_str::<serde_json::Value>(&raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "malformed progress record, using defaults");
                    None
                },
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "failed to read progress, using defaults");
                None
            },
        };

        let mut progress = UserProgress::merge_with_defaults(stored);
        progress.normalize(&self.config.levels);
        progress
    }

    /// Persist the whole record for `user_key`.
    pub async fn save_progress(
        &self,
        user_key: &str,
        progress: &UserProgress,
    ) -> Result<(), ServiceError> {
        let key = storage_key(user_key)
            .ok_or_else(|| ServiceError::InvalidInput("user key is blank".to_owned()))?;
        let raw = serde_json::to_string(progress)?;
        self.storage.set(&key, &raw).await?;
        Ok(())
    }

    /// Apply an award event dated today and return the updated record.
    pub async fn award_xp_and_check_badges(
        &self,
        user_key: &str,
        kind: EventKind,
        context: Option<AwardContext>,
    ) -> UserProgress {
        self.award_at(user_key, kind, context, Local::now().date_naive()).await.progress
    }

    /// Apply an award event as of `today`.
    ///
    /// A failed write is logged and the computed record is still returned.
    pub async fn award_at(
        &self,
        user_key: &str,
        kind: EventKind,
        context: Option<AwardContext>,
        today: NaiveDate,
    ) -> AwardOutcome {
        let current = self.load_progress(user_key).await;
        let event = AwardEvent { kind, context: context.unwrap_or_default() };
        let outcome = apply_award(&self.config, current, &event, today);

        tracing::debug!(
            user = %user_key.trim(),
            event = %event.kind,
            xp_awarded = outcome.xp_awarded,
            xp = outcome.progress.xp,
            level = outcome.progress.level,
            "applied award"
        );

        match self.save_progress(user_key, &outcome.progress).await {
            Ok(()) => {},
            Err(ServiceError::InvalidInput(_)) => {
                tracing::warn!(event = %event.kind, "award for blank user key was not persisted");
            },
            Err(e) => {
                tracing::warn!(
                    user = %user_key.trim(),
                    error = %e,
                    transient = e.is_transient(),
                    "failed to save progress, returning unsaved record"
                );
            },
        }

        for notification in &outcome.notifications {
            self.notifier.notify(&UserNotification::new(user_key, notification.clone()));
        }

        outcome
    }

    /// Start a new daily-challenge cycle for `user_key`.
    pub async fn assign_daily_challenge(
        &self,
        user_key: &str,
        pokemon_type: &str,
        target_count: u32,
        today: NaiveDate,
    ) -> Result<UserProgress, ServiceError> {
        let pokemon_type = pokemon_type.trim();
        if pokemon_type.is_empty() {
            return Err(ServiceError::InvalidInput("challenge type is blank".to_owned()));
        }
        let mut progress = self.load_progress(user_key).await;
        progress.daily_challenge_status.roll_over(today);
        progress.daily_challenge_status.assign(pokemon_type.to_owned(), target_count, today);
        self.save_progress(user_key, &progress).await?;
        tracing::info!(user = %user_key.trim(), pokemon_type, "assigned daily challenge");
        Ok(progress)
    }

    /// Delete a user's record (logout with reset, account deletion).
    ///
    /// Returns `true` if a record existed.
    pub async fn reset_progress(&self, user_key: &str) -> Result<bool, ServiceError> {
        let key = storage_key(user_key)
            .ok_or_else(|| ServiceError::InvalidInput("user key is blank".to_owned()))?;
        let removed = self.storage.delete(&key).await?;
        tracing::info!(user = %user_key.trim(), removed, "reset progress");
        Ok(removed)
    }
}
