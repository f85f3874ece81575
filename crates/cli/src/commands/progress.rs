use anyhow::Result;
use chrono::{Local, NaiveDate};
use pokexp_core::{AwardContext, EventKind, LevelProgress, UserProgress};
use pokexp_service::ProgressService;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProgressView<'a> {
    user: &'a str,
    progress: &'a UserProgress,
    level_progress: LevelProgress,
    #[serde(skip_serializing_if = "Option::is_none")]
    xp_awarded: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    notifications: Vec<String>,
}

impl<'a> ProgressView<'a> {
    fn new(service: &ProgressService, user: &'a str, progress: &'a UserProgress) -> Self {
        Self {
            user,
            progress,
            level_progress: service.config().levels.progress_for(progress.xp),
            xp_awarded: None,
            notifications: Vec::new(),
        }
    }
}

fn print_view(view: &ProgressView<'_>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(view)?);
    Ok(())
}

pub(crate) async fn run_show(service: &ProgressService, user: &str) -> Result<()> {
    let progress = service.load_progress(user).await;
    print_view(&ProgressView::new(service, user.trim(), &progress))
}

pub(crate) async fn run_award(
    service: &ProgressService,
    user: &str,
    event: &str,
    pokemon_id: Option<u32>,
    date: Option<NaiveDate>,
) -> Result<()> {
    let kind = EventKind::from(event.to_owned());
    let context = pokemon_id.map(AwardContext::with_pokemon);
    let today = date.unwrap_or_else(|| Local::now().date_naive());
    let outcome = service.award_at(user, kind, context, today).await;

    let mut view = ProgressView::new(service, user.trim(), &outcome.progress);
    view.xp_awarded = Some(outcome.xp_awarded);
    view.notifications = outcome.notifications.iter().map(ToString::to_string).collect();
    print_view(&view)
}

pub(crate) async fn run_challenge(
    service: &ProgressService,
    user: &str,
    pokemon_type: &str,
    target: u32,
    date: Option<NaiveDate>,
) -> Result<()> {
    let today = date.unwrap_or_else(|| Local::now().date_naive());
    let progress = service.assign_daily_challenge(user, pokemon_type, target, today).await?;
    print_view(&ProgressView::new(service, user.trim(), &progress))
}

pub(crate) async fn run_reset(service: &ProgressService, user: &str) -> Result<()> {
    let removed = service.reset_progress(user).await?;
    println!("{}", serde_json::json!({ "user": user.trim(), "removed": removed }));
    Ok(())
}
