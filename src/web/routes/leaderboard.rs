use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::riot::LeagueGroup;
use crate::stats::{self, LeaderboardRow};
use crate::web::AppState;

const DEFAULT_QUEUE: &str = "RANKED_SOLO_5x5";
const DEFAULT_GROUP: &str = "masters";

#[derive(Deserialize)]
pub struct LeaderboardParams {
    queue: Option<String>,
    group: Option<String>,
}

#[derive(Serialize)]
pub struct LeaderboardResponse {
    group: String,
    queue: String,
    entries: Vec<LeaderboardRow>,
}

pub async fn leaderboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<LeaderboardResponse>, AppError> {
    let queue = params.queue.unwrap_or_else(|| DEFAULT_QUEUE.to_string());
    let group_name = params.group.unwrap_or_else(|| DEFAULT_GROUP.to_string());
    let group: LeagueGroup = group_name.parse()?;

    let entries = stats::leaderboard(state.syncer.riot(), group, &queue).await?;

    Ok(Json(LeaderboardResponse {
        group: group_name,
        queue,
        entries,
    }))
}
