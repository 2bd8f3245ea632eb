use reqwest::Url;

use crate::models::Appointment;

/// Confirmation text the visitor sends to the salon over WhatsApp.
pub fn confirmation_text(appointment: &Appointment) -> String {
    format!(
        "Hi Dyra Salon! I'd like to confirm my booking:\n\n✨ Service: {}\n📅 Date: {}\n🕒 Time: {}\n👤 Name: {}\n🆔 Ref: {}",
        appointment.service,
        appointment.date,
        appointment.time,
        appointment.customer_name.as_deref().unwrap_or("Guest"),
        appointment.reference(),
    )
}

/// `https://wa.me/{number}?text=...` for the given appointment.
pub fn whatsapp_link(whatsapp_number: &str, appointment: &Appointment) -> anyhow::Result<Url> {
    let base = format!("https://wa.me/{whatsapp_number}");
    let url = Url::parse_with_params(&base, &[("text", confirmation_text(appointment))])?;
    Ok(url)
}
