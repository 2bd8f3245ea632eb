use anyhow::Context;
use serde::Deserialize;
use serde_json::{json, Value};

pub const BOOK_APPOINTMENT: &str = "book_appointment";
pub const GET_AVAILABLE_SLOTS: &str = "get_available_slots";
pub const GET_ACTIVE_PROMOTIONS: &str = "get_active_promotions";
pub const ADD_CALENDAR_REMINDER: &str = "add_calendar_reminder";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingArgs {
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    pub service: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub promo_code: Option<String>,
}

/// Structured instruction returned alongside the reply text.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    BookAppointment(BookingArgs),
    GetAvailableSlots {
        date: Option<String>,
        service: Option<String>,
    },
    /// Declared or not, anything without a handler lands here and is skipped.
    Unknown { name: String, args: Value },
}

impl ToolCall {
    pub fn from_function_call(name: &str, args: Value) -> anyhow::Result<Self> {
        match name {
            BOOK_APPOINTMENT => {
                let args: BookingArgs = serde_json::from_value(args)
                    .context("malformed book_appointment arguments")?;
                Ok(ToolCall::BookAppointment(args))
            }
            GET_AVAILABLE_SLOTS => Ok(ToolCall::GetAvailableSlots {
                date: args.get("date").and_then(Value::as_str).map(str::to_string),
                service: args.get("service").and_then(Value::as_str).map(str::to_string),
            }),
            _ => Ok(ToolCall::Unknown {
                name: name.to_string(),
                args,
            }),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ToolCall::BookAppointment(_) => BOOK_APPOINTMENT,
            ToolCall::GetAvailableSlots { .. } => GET_AVAILABLE_SLOTS,
            ToolCall::Unknown { name, .. } => name,
        }
    }
}

/// Function declarations offered to the model when web search is off.
pub fn declarations() -> Value {
    json!([
        {
            "name": BOOK_APPOINTMENT,
            "description": "Record an appointment request for the user. Call this ONLY when you have Name, Phone, Service, Date, and Time.",
            "parameters": {
                "type": "OBJECT",
                "properties": {
                    "customerName": { "type": "STRING", "description": "Full name of the customer" },
                    "customerPhone": { "type": "STRING", "description": "10-digit phone number" },
                    "service": { "type": "STRING", "description": "Name of the service (exact name from menu)" },
                    "date": { "type": "STRING", "description": "Date in DD-MM format" },
                    "time": { "type": "STRING", "description": "Time slot (e.g. 10:00 AM)" },
                    "promoCode": { "type": "STRING", "description": "Optional promo code to apply" }
                },
                "required": ["service", "date", "time", "customerName", "customerPhone"]
            }
        },
        {
            "name": GET_ACTIVE_PROMOTIONS,
            "description": "Get a list of all current active offers and promo codes.",
            "parameters": { "type": "OBJECT", "properties": {} }
        },
        {
            "name": GET_AVAILABLE_SLOTS,
            "description": "Get available time slots for a specific date or service.",
            "parameters": {
                "type": "OBJECT",
                "properties": {
                    "date": { "type": "STRING", "description": "The date to check (DD-MM)" },
                    "service": { "type": "STRING", "description": "The service name" }
                }
            }
        },
        {
            "name": ADD_CALENDAR_REMINDER,
            "description": "Sync the appointment to the user calendar. Call this when user asks for a reminder.",
            "parameters": {
                "type": "OBJECT",
                "properties": {
                    "appointmentId": { "type": "STRING", "description": "The unique ID of the booking" }
                },
                "required": ["appointmentId"]
            }
        }
    ])
}
