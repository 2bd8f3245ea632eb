use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    /// Service name as booked; not a reference into the catalog.
    pub service: String,
    pub date: String,
    pub time: String,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_promo: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
}

impl Appointment {
    /// Short reference shown to the customer: last six characters, uppercased.
    pub fn reference(&self) -> String {
        let chars: Vec<char> = self.id.chars().collect();
        let start = chars.len().saturating_sub(6);
        chars[start..].iter().collect::<String>().to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_uses_storage_field_names() {
        let appt = Appointment {
            id: "BKG-ABC123".to_string(),
            customer_name: Some("Priya".to_string()),
            customer_phone: Some("Linked".to_string()),
            service: "Hydra-Facial".to_string(),
            date: "05-12".to_string(),
            time: "3:00 PM".to_string(),
            status: AppointmentStatus::Confirmed,
            applied_promo: None,
        };
        let json = serde_json::to_value(&appt).unwrap();
        assert_eq!(json["customerName"], "Priya");
        assert_eq!(json["status"], "confirmed");
        assert!(json.get("appliedPromo").is_none());
    }

    #[test]
    fn test_reference_is_last_six_uppercased() {
        let appt = Appointment {
            id: "bkg-xy12ab".to_string(),
            customer_name: None,
            customer_phone: None,
            service: "Party Makeup".to_string(),
            date: String::new(),
            time: String::new(),
            status: AppointmentStatus::Pending,
            applied_promo: None,
        };
        assert_eq!(appt.reference(), "XY12AB");
    }
}
