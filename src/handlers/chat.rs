use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::errors::AppError;
use crate::models::{BookingProgress, BookingStage, ChatMessage, Persona};
use crate::services::{conversation, handoff};
use crate::state::AppState;

#[derive(Serialize)]
pub struct ChatView {
    persona: Persona,
    messages: Vec<ChatMessage>,
    progress: BookingProgress,
    stage: BookingStage,
    busy: bool,
    setup_required: bool,
}

fn chat_view(state: &AppState) -> Result<ChatView, AppError> {
    let session = state.session()?;
    Ok(ChatView {
        persona: session.persona.clone(),
        messages: session.messages.clone(),
        progress: session.progress.clone(),
        stage: session.progress.stage(),
        busy: state.busy.load(Ordering::SeqCst),
        setup_required: !state.config.has_api_key(),
    })
}

// GET /api/chat/messages
pub async fn get_messages(State(state): State<Arc<AppState>>) -> Result<Json<ChatView>, AppError> {
    Ok(Json(chat_view(&state)?))
}

#[derive(Serialize)]
pub struct TurnResponse {
    message: ChatMessage,
    progress: BookingProgress,
    stage: BookingStage,
}

async fn run_turn(
    state: &Arc<AppState>,
    text: &str,
    use_search: bool,
    fresh_progress: bool,
) -> Result<Json<TurnResponse>, AppError> {
    let turn = conversation::process_message(state, text, use_search, fresh_progress).await?;
    Ok(Json(TurnResponse {
        message: turn.message,
        stage: turn.progress.stage(),
        progress: turn.progress,
    }))
}

// POST /api/chat/messages
#[derive(Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
    #[serde(default)]
    pub use_search: bool,
}

pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SendMessageRequest>,
) -> Result<Json<TurnResponse>, AppError> {
    run_turn(&state, &body.message, body.use_search, false).await
}

// POST /api/chat/quick-book
pub async fn quick_book(State(state): State<Arc<AppState>>) -> Result<Json<TurnResponse>, AppError> {
    run_turn(&state, "1", false, false).await
}

#[derive(Deserialize, Clone, Copy, Debug)]
#[serde(rename_all = "lowercase")]
pub enum TicketAction {
    Reschedule,
    Reminder,
}

// POST /api/chat/appointments/:id/:action
pub async fn ticket_action(
    State(state): State<Arc<AppState>>,
    Path((id, action)): Path<(String, TicketAction)>,
) -> Result<Json<TurnResponse>, AppError> {
    if state.session()?.find_appointment(&id).is_none() {
        return Err(AppError::NotFound(format!("appointment {id}")));
    }

    tracing::info!(appointment = %id, ?action, "ticket action");
    let text = match action {
        TicketAction::Reschedule => format!("Modify booking {id}"),
        TicketAction::Reminder => format!("Set reminder for {id}"),
    };
    let reschedule = matches!(action, TicketAction::Reschedule);
    run_turn(&state, &text, false, reschedule).await
}

// POST /api/chat/persona
#[derive(Deserialize)]
pub struct SelectPersonaRequest {
    pub persona_id: String,
}

pub async fn select_persona(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SelectPersonaRequest>,
) -> Result<Json<Persona>, AppError> {
    let persona = catalog::find_persona(&body.persona_id)
        .ok_or_else(|| AppError::NotFound(format!("persona {}", body.persona_id)))?;
    state.session()?.select_persona(persona);
    Ok(Json(persona.clone()))
}

// POST /api/chat/reset
pub async fn reset(State(state): State<Arc<AppState>>) -> Result<Json<ChatView>, AppError> {
    if state.busy.load(Ordering::SeqCst) {
        return Err(AppError::Busy);
    }
    state.session()?.reset();
    Ok(Json(chat_view(&state)?))
}

// GET /api/appointments/:id/handoff
#[derive(Serialize)]
pub struct HandoffResponse {
    url: String,
    text: String,
}

pub async fn handoff_link(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<HandoffResponse>, AppError> {
    let session = state.session()?;
    let appointment = session
        .find_appointment(&id)
        .ok_or_else(|| AppError::NotFound(format!("appointment {id}")))?;

    let url = handoff::whatsapp_link(&session.config.whatsapp_number, appointment)?;
    Ok(Json(HandoffResponse {
        url: url.to_string(),
        text: handoff::confirmation_text(appointment),
    }))
}
