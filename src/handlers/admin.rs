use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::{Appointment, ConfigEdit, Promotion, SalonConfig};
use crate::services::dashboard::{self, DashboardStats};
use crate::services::promotions::{self, PromotionForm};
use crate::state::AppState;

fn check_auth(headers: &HeaderMap, expected_token: &str) -> Result<(), AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token != expected_token {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

// GET /api/admin/stats
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<DashboardStats>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;
    let session = state.session()?;
    Ok(Json(dashboard::compute_stats(&session.appointments)))
}

// GET /api/admin/bookings
pub async fn get_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Appointment>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;
    Ok(Json(state.session()?.appointments.clone()))
}

// GET /api/admin/export
pub async fn export_data(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;
    let session = state.session()?;
    let book = dashboard::data_book(&session.config, &session.appointments, Utc::now());
    let value = serde_json::to_value(book).map_err(|e| AppError::Internal(e.into()))?;
    Ok(Json(value))
}

// GET /api/admin/config/draft
#[derive(Serialize)]
pub struct DraftResponse {
    draft: SalonConfig,
    committed: SalonConfig,
    has_changes: bool,
}

fn draft_response(state: &AppState) -> Result<DraftResponse, AppError> {
    let session = state.session()?;
    Ok(DraftResponse {
        draft: session.draft.clone(),
        committed: session.config.clone(),
        has_changes: session.draft_dirty,
    })
}

pub async fn get_draft(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<DraftResponse>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;
    Ok(Json(draft_response(&state)?))
}

// PATCH /api/admin/config/draft
pub async fn edit_draft(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<ConfigEdit>,
) -> Result<Json<DraftResponse>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;
    state.session()?.edit_draft(body);
    Ok(Json(draft_response(&state)?))
}

// POST /api/admin/config/save
pub async fn save_draft(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<SalonConfig>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;
    let mut session = state.session()?;
    session.save_draft()?;
    Ok(Json(session.config.clone()))
}

// POST /api/admin/promotions
pub async fn create_promotion(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(form): Json<PromotionForm>,
) -> Result<Json<Promotion>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;
    let promotion = promotions::build_promotion(form, Utc::now())
        .map_err(|e| AppError::Unprocessable(e.to_string()))?;

    state.session()?.add_promotion(promotion.clone())?;
    tracing::info!(id = %promotion.id, code = %promotion.code, "promotion created");
    Ok(Json(promotion))
}

// DELETE /api/admin/promotions/:id
pub async fn remove_promotion(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    if !state.session()?.remove_promotion(&id)? {
        return Err(AppError::NotFound(format!("promotion {id}")));
    }
    Ok(Json(serde_json::json!({"ok": true})))
}

// POST /api/admin/clear
pub async fn clear_data(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;
    if state.busy.load(Ordering::SeqCst) {
        return Err(AppError::Busy);
    }

    state.session()?.clear_data()?;
    tracing::warn!("all stored salon data cleared");
    Ok(Json(serde_json::json!({"ok": true})))
}
