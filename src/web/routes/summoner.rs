use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    response::Redirect,
};

use crate::error::AppError;
use crate::stats::{self, MasteryView, ProfileQuery, SummonerPage};
use crate::sync::absorb_storage_error;
use crate::web::AppState;

/// Profile page. `null` when the store failed while assembling it.
pub async fn summoner(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(query): Query<ProfileQuery>,
) -> Result<Json<Option<SummonerPage>>, AppError> {
    let page = stats::summoner_page(&state.syncer, &name, &query, state.posts_per_page).await?;
    Ok(Json(page))
}

pub async fn masteries(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Vec<MasteryView>>, AppError> {
    let syncer = &state.syncer;
    let Some(summoner) = syncer.grab_summoner(&name).await? else {
        return Ok(Json(Vec::new()));
    };

    let masteries =
        absorb_storage_error(stats::champion_masteries(syncer.db(), syncer.riot(), &summoner).await)?;
    Ok(Json(masteries.unwrap_or_default()))
}

/// Pulls new games and rank, then sends the client back to the profile.
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Redirect, AppError> {
    state.syncer.update_summoner_page(&name).await?;
    Ok(Redirect::to(&format!(
        "/summoner/{}",
        urlencoding::encode(&name)
    )))
}
