use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::Service;

fn date_pattern() -> &'static Regex {
    static DATE: OnceLock<Regex> = OnceLock::new();
    DATE.get_or_init(|| Regex::new(r"\d{2}-\d{2}").expect("date pattern is valid"))
}

/// Booking fields inferred from the visitor's messages so far.
///
/// Fields only ever move from `None` to `Some` (or get overwritten by a later
/// match) until a booking is recorded, at which point the whole value is reset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BookingProgress {
    pub service: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookingStage {
    AwaitingService,
    AwaitingDate,
    AwaitingTime,
    /// Service, date and time are known; the name is collected by the agent itself.
    AwaitingName,
}

impl BookingStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStage::AwaitingService => "awaiting_service",
            BookingStage::AwaitingDate => "awaiting_date",
            BookingStage::AwaitingTime => "awaiting_time",
            BookingStage::AwaitingName => "awaiting_name",
        }
    }
}

impl BookingProgress {
    pub fn stage(&self) -> BookingStage {
        match (&self.service, &self.date, &self.time) {
            (None, _, _) => BookingStage::AwaitingService,
            (Some(_), None, _) => BookingStage::AwaitingDate,
            (Some(_), Some(_), None) => BookingStage::AwaitingTime,
            (Some(_), Some(_), Some(_)) => BookingStage::AwaitingName,
        }
    }

    /// Folds the latest visitor message into the progress.
    ///
    /// The date and time rules keep the whole message, not the matched token,
    /// so "Hydra-Facial on 05-12 at 3:00 PM" fills both with the full text.
    pub fn absorb(&self, message: &str, catalog: &[Service]) -> Self {
        let lowered = message.to_lowercase();
        let service = catalog
            .iter()
            .find(|s| lowered.contains(&s.name.to_lowercase()))
            .map(|s| s.name.to_string())
            .or_else(|| self.service.clone());

        let date = if date_pattern().is_match(message) {
            Some(message.to_string())
        } else {
            self.date.clone()
        };

        let time = if message.contains("AM") || message.contains("PM") {
            Some(message.to_string())
        } else {
            self.time.clone()
        };

        Self {
            service,
            date,
            time,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.service.is_none() && self.date.is_none() && self.time.is_none()
    }

    /// Progress block appended to the persona instruction each turn.
    pub fn context_block(&self, salon_phone: &str) -> String {
        format!(
            "[DEPLOYMENT_STATE]: LIVE\n[SALON_PHONE]: {salon_phone}\n[CURRENT_BOOKING_PROGRESS]: \n- Service: {}\n- Date: {}\n- Time: {}\n- Contact: Phone linked (Customer)",
            self.service.as_deref().unwrap_or("None"),
            self.date.as_deref().unwrap_or("None"),
            self.time.as_deref().unwrap_or("None"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SERVICE_MENU;
    use crate::models::ServiceCategory;

    fn service(id: &'static str, name: &'static str) -> Service {
        Service {
            id,
            name,
            price: "₹100",
            duration: "30 min",
            category: ServiceCategory::Hair,
            icon: None,
            description: None,
            is_popular: false,
        }
    }

    #[test]
    fn test_service_match_is_case_insensitive() {
        let next = BookingProgress::default().absorb("can I get a HYDRA-FACIAL?", SERVICE_MENU);
        assert_eq!(next.service.as_deref(), Some("Hydra-Facial"));
        assert_eq!(next.stage(), BookingStage::AwaitingDate);
    }

    #[test]
    fn test_first_catalog_entry_wins() {
        let catalog = vec![service("a", "Cut"), service("b", "Haircut")];
        let next = BookingProgress::default().absorb("one haircut please", &catalog);
        assert_eq!(next.service.as_deref(), Some("Cut"));

        let reversed = vec![service("b", "Haircut"), service("a", "Cut")];
        let next = BookingProgress::default().absorb("one haircut please", &reversed);
        assert_eq!(next.service.as_deref(), Some("Haircut"));
    }

    #[test]
    fn test_date_keeps_whole_message() {
        let msg = "how about 07-11 then";
        let next = BookingProgress::default().absorb(msg, SERVICE_MENU);
        assert_eq!(next.date.as_deref(), Some(msg));
    }

    #[test]
    fn test_date_false_positive_is_preserved() {
        let msg = "my code is 12-34";
        let next = BookingProgress::default().absorb(msg, SERVICE_MENU);
        assert_eq!(next.date.as_deref(), Some(msg));
    }

    #[test]
    fn test_time_is_case_sensitive() {
        let next = BookingProgress::default().absorb("around 3 pm", SERVICE_MENU);
        assert_eq!(next.time, None);

        let next = BookingProgress::default().absorb("around 3 PM", SERVICE_MENU);
        assert_eq!(next.time.as_deref(), Some("around 3 PM"));
    }

    #[test]
    fn test_single_message_fills_everything() {
        let msg = "I want Hydra-Facial on 05-12 at 3:00 PM";
        let next = BookingProgress::default().absorb(msg, SERVICE_MENU);
        assert_eq!(next.service.as_deref(), Some("Hydra-Facial"));
        assert_eq!(next.date.as_deref(), Some(msg));
        assert_eq!(next.time.as_deref(), Some(msg));
        assert_eq!(next.date, next.time);
        assert_eq!(next.stage(), BookingStage::AwaitingName);
    }

    #[test]
    fn test_unmatched_message_keeps_prior_values() {
        let prior = BookingProgress {
            service: Some("Party Makeup".to_string()),
            date: Some("05-12".to_string()),
            time: None,
        };
        let next = prior.absorb("sounds lovely", SERVICE_MENU);
        assert_eq!(next, prior);
        assert_eq!(next.stage(), BookingStage::AwaitingTime);
    }

    #[test]
    fn test_context_block_renders_none() {
        let block = BookingProgress::default().context_block("+91 7057656600");
        assert!(block.contains("[SALON_PHONE]: +91 7057656600"));
        assert!(block.contains("- Service: None"));
        assert!(block.contains("- Date: None"));
        assert!(block.contains("- Time: None"));
    }
}
