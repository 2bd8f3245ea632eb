use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};

use crate::catalog::{self, SERVICE_MENU};
use crate::errors::AppError;
use crate::models::{Appointment, AppointmentStatus, BookingProgress, ChatMessage, Persona};
use crate::services::ai::{BookingArgs, ChatRequest, LlmProvider, Message, ToolCall};
use crate::services::session::SETUP_MESSAGE;
use crate::state::AppState;

pub const HISTORY_LIMIT: usize = 10;

/// Returned for `get_available_slots`; there is no real availability lookup.
pub const PLACEHOLDER_SLOTS: [&str; 4] = ["10:00 AM", "12:30 PM", "3:00 PM", "6:00 PM"];

const SERVICE_TRIGGERS: [&str; 5] = ["select", "choose", "pick", "service", "treatment"];
const DATE_TRIGGERS: [&str; 3] = ["date", "(dd-mm)", "day"];

/// Holds the busy flag for the lifetime of one turn.
pub struct TurnGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> TurnGuard<'a> {
    pub fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

pub struct TurnInput {
    pub history: Vec<Message>,
    pub message: String,
    pub persona: &'static Persona,
    pub salon_phone: String,
    pub prior: BookingProgress,
    pub use_search: bool,
}

pub struct TurnOutcome {
    pub reply: ChatMessage,
    pub progress: BookingProgress,
    pub appointments: Vec<Appointment>,
}

/// Last ten transcript entries without error entries, starting at the first user turn.
pub fn build_history(messages: &[ChatMessage]) -> Vec<Message> {
    let kept: Vec<&ChatMessage> = messages.iter().filter(|m| !m.is_error).collect();
    let recent = &kept[kept.len().saturating_sub(HISTORY_LIMIT)..];

    recent
        .iter()
        .map(|m| Message {
            role: m.history_role().to_string(),
            content: m.content.clone(),
        })
        .skip_while(|m| m.role != "user")
        .collect()
}

pub fn build_instruction(persona: &Persona, progress: &BookingProgress, salon_phone: &str) -> String {
    format!("{}\n\n{}", persona.instruction, progress.context_block(salon_phone))
}

/// Seven calendar days starting today, as `YYYY-MM-DD`.
pub fn next_dates(today: NaiveDate) -> Vec<String> {
    (0..7)
        .map(|i| (today + Duration::days(i)).format("%Y-%m-%d").to_string())
        .collect()
}

/// Attaches the service or date picker when the reply text asks for one.
pub fn attach_pickers(reply: &mut ChatMessage, progress: &BookingProgress, today: NaiveDate) {
    let lowered = reply.content.to_lowercase();

    if progress.service.is_none() && SERVICE_TRIGGERS.iter().any(|t| lowered.contains(t)) {
        reply.service_options = Some(catalog::grouped_menu());
    }

    if progress.service.is_some()
        && progress.date.is_none()
        && DATE_TRIGGERS.iter().any(|t| lowered.contains(t))
    {
        reply.date_options = Some(next_dates(today));
    }
}

fn new_appointment_id() -> String {
    let token = uuid::Uuid::new_v4().simple().to_string();
    format!("BKG-{}", token[..6].to_uppercase())
}

fn book(args: &BookingArgs) -> Option<Appointment> {
    let service = catalog::find_service(&args.service)?;
    Some(Appointment {
        id: new_appointment_id(),
        customer_name: args.customer_name.clone(),
        customer_phone: Some("Linked".to_string()),
        service: service.name.to_string(),
        date: args.date.clone(),
        time: args.time.clone(),
        status: AppointmentStatus::Confirmed,
        applied_promo: args.promo_code.clone(),
    })
}

/// Runs the returned tool calls in order against `refreshed` progress.
///
/// Returns the progress to keep and the appointments to append.
pub fn apply_tool_calls(
    reply: &mut ChatMessage,
    calls: &[ToolCall],
    refreshed: &BookingProgress,
) -> (BookingProgress, Vec<Appointment>) {
    let mut progress = refreshed.clone();
    let mut created = Vec::new();

    for call in calls {
        match call {
            ToolCall::BookAppointment(args) => match book(args) {
                Some(appointment) => {
                    tracing::info!(
                        id = %appointment.id,
                        service = %appointment.service,
                        "appointment booked"
                    );
                    progress = BookingProgress::default();
                    reply.appointment = Some(appointment.clone());
                    created.push(appointment);
                }
                None => {
                    tracing::info!(service = %args.service, "booking for unknown service dropped");
                }
            },
            ToolCall::GetAvailableSlots { .. } => {
                if refreshed.time.is_none() {
                    reply.available_slots =
                        Some(PLACEHOLDER_SLOTS.iter().map(|s| s.to_string()).collect());
                }
            }
            ToolCall::Unknown { .. } => {
                tracing::debug!(tool = call.name(), "ignoring tool call without handler");
            }
        }
    }

    (progress, created)
}

/// One call to the model plus the post-processing of its reply. Has no side effects.
pub async fn execute_turn(
    llm: &dyn LlmProvider,
    model: &str,
    input: TurnInput,
    today: NaiveDate,
) -> anyhow::Result<TurnOutcome> {
    let refreshed = input.prior.absorb(&input.message, SERVICE_MENU);
    let instruction = build_instruction(input.persona, &refreshed, &input.salon_phone);

    let result = llm
        .chat(ChatRequest {
            model: model.to_string(),
            history: input.history,
            message: input.message,
            instruction,
            use_search: input.use_search,
        })
        .await?;

    let mut reply = ChatMessage::agent(result.text);
    reply.grounding_urls = result.grounding;

    attach_pickers(&mut reply, &refreshed, today);
    let (progress, appointments) = apply_tool_calls(&mut reply, &result.tool_calls, &refreshed);

    Ok(TurnOutcome {
        reply,
        progress,
        appointments,
    })
}

/// What one accepted turn left behind: the entry appended for it and the
/// progress as committed by that same turn.
pub struct TurnResult {
    pub message: ChatMessage,
    pub progress: BookingProgress,
}

/// Handles one visitor message end to end.
///
/// Model and storage failures become an error entry in the transcript; only
/// a missing key, an empty message or a turn already in flight are rejected,
/// and a rejected turn changes nothing. `fresh_progress` drops the booking
/// progress before the message is read, once the turn has been accepted.
pub async fn process_message(
    state: &Arc<AppState>,
    text: &str,
    use_search: bool,
    fresh_progress: bool,
) -> Result<TurnResult, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Unprocessable("message is empty".to_string()));
    }

    let _turn = TurnGuard::acquire(&state.busy).ok_or(AppError::Busy)?;

    if !state.config.has_api_key() {
        return Err(AppError::Config(SETUP_MESSAGE.to_string()));
    }

    let input = {
        let mut session = state.session()?;
        if fresh_progress {
            session.progress = BookingProgress::default();
        }
        let history = build_history(&session.messages);
        session.messages.push(ChatMessage::user(text));
        TurnInput {
            history,
            message: text.to_string(),
            persona: session.persona,
            salon_phone: session.config.owner_phone.clone(),
            prior: session.progress.clone(),
            use_search,
        }
    };
    let persona = input.persona.id;

    let outcome = execute_turn(
        state.llm.as_ref(),
        &state.config.gemini_model,
        input,
        Utc::now().date_naive(),
    )
    .await;

    let mut session = state.session()?;
    let entry = match outcome {
        Ok(outcome) => match session.append_appointments(outcome.appointments) {
            Ok(()) => {
                session.progress = outcome.progress;
                tracing::info!(
                    persona,
                    stage = session.progress.stage().as_str(),
                    "processed chat turn"
                );
                outcome.reply
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to persist appointment");
                ChatMessage::error(format!("Error: {e:#}"))
            }
        },
        Err(e) => {
            tracing::error!(error = %e, persona, "chat turn failed");
            ChatMessage::error(format!("Error: {e:#}"))
        }
    };

    session.messages.push(entry.clone());
    Ok(TurnResult {
        message: entry,
        progress: session.progress.clone(),
    })
}
