pub mod admin;
pub mod calendar;
pub mod catalog;
pub mod chat;
pub mod health;

use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/catalog/services", get(catalog::services))
        .route("/api/catalog/personas", get(catalog::personas))
        .route("/api/promotions", get(catalog::promotions))
        .route(
            "/api/chat/messages",
            get(chat::get_messages).post(chat::send_message),
        )
        .route("/api/chat/persona", post(chat::select_persona))
        .route("/api/chat/reset", post(chat::reset))
        .route("/api/chat/quick-book", post(chat::quick_book))
        .route(
            "/api/chat/appointments/:id/:action",
            post(chat::ticket_action),
        )
        .route("/api/appointments/:id/handoff", get(chat::handoff_link))
        .route("/calendar/:appointment_id", get(calendar::download_ics))
        .route("/api/admin/stats", get(admin::get_stats))
        .route("/api/admin/bookings", get(admin::get_bookings))
        .route("/api/admin/export", get(admin::export_data))
        .route(
            "/api/admin/config/draft",
            get(admin::get_draft).patch(admin::edit_draft),
        )
        .route("/api/admin/config/save", post(admin::save_draft))
        .route("/api/admin/promotions", post(admin::create_promotion))
        .route("/api/admin/promotions/:id", delete(admin::remove_promotion))
        .route("/api/admin/clear", post(admin::clear_data))
        .with_state(state)
}
