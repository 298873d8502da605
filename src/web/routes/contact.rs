use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;

use crate::mail::ContactForm;
use crate::web::AppState;

#[derive(Serialize)]
pub struct ContactResponse {
    success: bool,
}

pub async fn contact(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ContactForm>,
) -> Json<ContactResponse> {
    let success = state.mailer.send_contact(&form);
    Json(ContactResponse { success })
}
