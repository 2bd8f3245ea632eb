use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::catalog::{PERSONAS, SERVICE_MENU};
use crate::errors::AppError;
use crate::models::{Persona, Promotion, Service};
use crate::state::AppState;

pub async fn services() -> Json<&'static [Service]> {
    Json(SERVICE_MENU)
}

pub async fn personas() -> Json<&'static [Persona]> {
    Json(PERSONAS)
}

pub async fn promotions(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Promotion>>, AppError> {
    Ok(Json(state.session()?.promotions.clone()))
}
