use serde::Serialize;
use tracing::instrument;

use crate::db::{Repository, Summoner};
use crate::error::AppError;
use crate::game::champion_name;
use crate::riot::RiotClient;

#[derive(Debug, Clone, Serialize)]
pub struct MasteryView {
    pub champion_name: &'static str,
    pub champion_level: i32,
    pub points: i64,
    pub img: String,
    /// Date of the newest stored game on that champion, or `N/A`.
    pub last_played: String,
}

#[instrument(skip_all, fields(summoner = %summoner.name))]
pub async fn champion_masteries(
    db: &Repository,
    riot: &RiotClient,
    summoner: &Summoner,
) -> Result<Vec<MasteryView>, AppError> {
    let masteries = riot.get_champion_masteries(&summoner.summoner_id).await?;

    let mut out = Vec::with_capacity(masteries.len());
    for mastery in masteries {
        let name = champion_name(mastery.champion_id);
        let last_played = db
            .latest_match_ref_with_champion(summoner.id, name)
            .await?
            .map(|r| r.date())
            .unwrap_or_else(|| "N/A".to_string());

        out.push(MasteryView {
            champion_name: name,
            champion_level: mastery.champion_level,
            points: mastery.champion_points,
            img: format!("img/champion/{name}.png"),
            last_played,
        });
    }

    Ok(out)
}
