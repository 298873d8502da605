use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::AppError;
use crate::game::is_leaderboard_queue;
use crate::riot::{LeagueGroup, LeagueItemDto, RiotClient};

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub name: String,
    pub points: i32,
    pub wins: i32,
    pub losses: i32,
    pub winrate: String,
}

/// Orders a league by points, highest first, and numbers it from 1.
pub fn rank_league_entries(mut entries: Vec<LeagueItemDto>) -> Vec<LeaderboardRow> {
    entries.sort_by(|a, b| b.league_points.cmp(&a.league_points));

    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            let total = entry.wins + entry.losses;
            let winrate = if total == 0 {
                0.0
            } else {
                f64::from(entry.wins) / f64::from(total) * 100.0
            };

            LeaderboardRow {
                rank: i + 1,
                name: entry.summoner_name,
                points: entry.league_points,
                wins: entry.wins,
                losses: entry.losses,
                winrate: format!("{winrate:.2}%"),
            }
        })
        .collect()
}

#[instrument(skip(riot))]
pub async fn leaderboard(
    riot: &RiotClient,
    group: LeagueGroup,
    queue: &str,
) -> Result<Vec<LeaderboardRow>, AppError> {
    if !is_leaderboard_queue(queue) {
        return Err(AppError::InvalidQueue(queue.to_string()));
    }

    let league = riot.get_league_list(group, queue).await?;
    debug!(entries = league.entries.len(), "🏆 League fetched");

    Ok(rank_league_entries(league.entries))
}
