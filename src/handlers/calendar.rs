use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use chrono::{Datelike, Utc};

use crate::errors::AppError;
use crate::services::calendar::generate_ics;
use crate::state::AppState;

pub async fn download_ics(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Response, AppError> {
    // Strip .ics suffix if present
    let appointment_id = raw_id.strip_suffix(".ics").unwrap_or(&raw_id);

    let appointment = state
        .session()?
        .find_appointment(appointment_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("appointment {appointment_id}")))?;

    let now = Utc::now();
    let ics = generate_ics(&appointment, now.naive_utc(), now.year()).ok_or_else(|| {
        AppError::Unprocessable(format!(
            "appointment {appointment_id} has no usable date/time ({} {})",
            appointment.date, appointment.time
        ))
    })?;
    let filename = format!("booking-{appointment_id}.ics");

    Ok((
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        ics,
    )
        .into_response())
}
