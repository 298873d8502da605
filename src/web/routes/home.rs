use axum::Json;
use serde::Serialize;

const TITLE: &str = "ogpp: The Old Games & Player Profiles League Database";

#[derive(Serialize)]
pub struct HomeResponse {
    title: &'static str,
}

pub async fn home() -> Json<HomeResponse> {
    Json(HomeResponse { title: TITLE })
}
