use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::catalog;
use crate::models::Appointment;

const BUSINESS_NAME: &str = "Dyra Beauty Parlour";
const DEFAULT_DURATION_MINUTES: i64 = 60;

/// Appointment dates are `DD-MM` as collected in chat; `YYYY-MM-DD` is accepted too.
fn parse_date(raw: &str, year: i32) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| NaiveDate::parse_from_str(&format!("{raw}-{year}"), "%d-%m-%Y").ok())
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%I:%M %p")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

pub fn appointment_start(appointment: &Appointment, year: i32) -> Option<NaiveDateTime> {
    let date = parse_date(&appointment.date, year)?;
    let time = parse_time(&appointment.time)?;
    Some(date.and_time(time))
}

/// Builds an .ics file for the appointment, or `None` when its date or time
/// cannot be read as a calendar moment.
pub fn generate_ics(appointment: &Appointment, stamp: NaiveDateTime, year: i32) -> Option<String> {
    let start = appointment_start(appointment, year)?;
    let minutes = catalog::find_service(&appointment.service)
        .and_then(|s| s.duration_minutes())
        .unwrap_or(DEFAULT_DURATION_MINUTES);

    let dtstart = start.format("%Y%m%dT%H%M%S").to_string();
    let dtend = (start + Duration::minutes(minutes))
        .format("%Y%m%dT%H%M%S")
        .to_string();
    let dtstamp = stamp.format("%Y%m%dT%H%M%S").to_string();
    let uid = format!("{}@salonbook", appointment.id);

    let summary = format!("{} at {BUSINESS_NAME}", appointment.service);
    let description = match (&appointment.customer_name, &appointment.applied_promo) {
        (Some(name), Some(promo)) => format!("Booked for {name}. Promo {promo}. Ref {}", appointment.reference()),
        (Some(name), None) => format!("Booked for {name}. Ref {}", appointment.reference()),
        (None, _) => format!("Ref {}", appointment.reference()),
    };

    Some(format!(
        "BEGIN:VCALENDAR\r\n\
         VERSION:2.0\r\n\
         PRODID:-//Salonbook//Booking Concierge//EN\r\n\
         BEGIN:VEVENT\r\n\
         UID:{uid}\r\n\
         DTSTAMP:{dtstamp}\r\n\
         DTSTART:{dtstart}\r\n\
         DTEND:{dtend}\r\n\
         SUMMARY:{summary}\r\n\
         DESCRIPTION:{description}\r\n\
         END:VEVENT\r\n\
         END:VCALENDAR\r\n"
    ))
}
