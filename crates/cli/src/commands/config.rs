use anyhow::Result;
use pokexp_core::ProgressionConfig;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LevelRow {
    level: u32,
    xp_required: u64,
}

pub(crate) fn run_levels(config: &ProgressionConfig) -> Result<()> {
    let rows: Vec<LevelRow> = (1..=config.levels.max_level())
        .filter_map(|level| {
            config.levels.threshold(level).map(|xp_required| LevelRow { level, xp_required })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

pub(crate) fn run_badges(config: &ProgressionConfig) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&config.badges)?);
    Ok(())
}
