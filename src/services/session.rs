use std::sync::Arc;

use crate::catalog;
use crate::models::{
    Appointment, BookingProgress, ChatMessage, ConfigEdit, Persona, Promotion, SalonConfig,
};
use crate::services::persistence::{self, BlobStore};

pub const SETUP_MESSAGE: &str = "🚨 ATTENTION: API KEY NOT DETECTED\n\nI'm ready to assist you, but I cannot connect to Google's servers yet. \n\n1. Get your key from aistudio.google.com\n2. Set GEMINI_API_KEY in the service environment\n3. Restart the service.\n\nOnce configured, I will be your luxury salon assistant! ✨";

const NEW_GUEST_GREETING: &str = "Hello & Welcome to Dyra Beauty Parlour 🌸\n\nI'm Maya, your luxury salon assistant. Our systems are online and ready to assist you. How can I help you today?\n\n1️⃣ Reserve an Appointment\n2️⃣ Explore Services & Prices\n3️⃣ Exclusive Launch Offers\n4️⃣ Talk to Human Support";

fn welcome_back(name: &str) -> String {
    format!(
        "Welcome back to Dyra, {name}! ✨ Ready for your next session of pampering?\n\n1️⃣ Quick Re-book\n2️⃣ Browse New Services\n3️⃣ View Your Offers\n4️⃣ Connect with Support"
    )
}

/// First transcript entry for a fresh session.
pub fn opening_message(appointments: &[Appointment], has_api_key: bool) -> ChatMessage {
    if !has_api_key {
        return ChatMessage::error(SETUP_MESSAGE);
    }

    let returning_name = appointments
        .iter()
        .rev()
        .find_map(|a| a.customer_name.as_deref().filter(|n| !n.trim().is_empty()));

    match returning_name {
        Some(name) => ChatMessage::agent(welcome_back(name)),
        None => ChatMessage::agent(NEW_GUEST_GREETING),
    }
}

/// Everything one salon session owns: the three stored documents, the staged
/// config edit, the transcript and the inferred booking progress.
pub struct Session {
    store: Arc<dyn BlobStore>,
    has_api_key: bool,
    pub appointments: Vec<Appointment>,
    pub promotions: Vec<Promotion>,
    pub config: SalonConfig,
    pub draft: SalonConfig,
    pub draft_dirty: bool,
    pub progress: BookingProgress,
    pub messages: Vec<ChatMessage>,
    pub persona: &'static Persona,
}

impl Session {
    pub fn load(store: Arc<dyn BlobStore>, has_api_key: bool) -> Self {
        let appointments = persistence::load_appointments(store.as_ref());
        let promotions = persistence::load_promotions(store.as_ref());
        let config = persistence::load_config(store.as_ref());

        tracing::info!(
            appointments = appointments.len(),
            promotions = promotions.len(),
            "session loaded"
        );

        let opening = opening_message(&appointments, has_api_key);
        Self {
            store,
            has_api_key,
            draft: config.clone(),
            draft_dirty: false,
            appointments,
            promotions,
            config,
            progress: BookingProgress::default(),
            messages: vec![opening],
            persona: catalog::default_persona(),
        }
    }

    pub fn store(&self) -> &dyn BlobStore {
        self.store.as_ref()
    }

    /// Drops the transcript and progress; stored documents stay.
    pub fn reset(&mut self) {
        self.progress = BookingProgress::default();
        self.messages = vec![opening_message(&self.appointments, self.has_api_key)];
    }

    /// Wipes every stored document and starts over from the built-in defaults.
    pub fn clear_data(&mut self) -> anyhow::Result<()> {
        self.store.clear()?;
        *self = Session::load(Arc::clone(&self.store), self.has_api_key);
        Ok(())
    }

    pub fn select_persona(&mut self, persona: &'static Persona) {
        tracing::info!(persona = persona.id, "persona selected");
        self.persona = persona;
    }

    // ── Appointments ──

    pub fn append_appointments(&mut self, new: Vec<Appointment>) -> anyhow::Result<()> {
        if new.is_empty() {
            return Ok(());
        }
        let mut next = self.appointments.clone();
        next.extend(new);
        persistence::save_appointments(self.store(), &next)?;
        self.appointments = next;
        Ok(())
    }

    pub fn find_appointment(&self, id: &str) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    // ── Promotions ──

    /// New offers go to the front of the list.
    pub fn add_promotion(&mut self, promotion: Promotion) -> anyhow::Result<()> {
        let mut next = Vec::with_capacity(self.promotions.len() + 1);
        next.push(promotion);
        next.extend(self.promotions.iter().cloned());
        persistence::save_promotions(self.store(), &next)?;
        self.promotions = next;
        Ok(())
    }

    pub fn remove_promotion(&mut self, id: &str) -> anyhow::Result<bool> {
        let next: Vec<Promotion> = self
            .promotions
            .iter()
            .filter(|p| p.id != id)
            .cloned()
            .collect();
        if next.len() == self.promotions.len() {
            return Ok(false);
        }
        persistence::save_promotions(self.store(), &next)?;
        self.promotions = next;
        Ok(true)
    }

    // ── Config ──

    pub fn edit_draft(&mut self, edit: ConfigEdit) {
        self.draft.apply(edit);
        self.draft_dirty = true;
    }

    pub fn save_draft(&mut self) -> anyhow::Result<()> {
        persistence::save_config(self.store(), &self.draft)?;
        self.config = self.draft.clone();
        self.draft_dirty = false;
        tracing::info!(whatsapp = %self.config.whatsapp_number, "salon config saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppointmentStatus, PromotionType, Role};
    use crate::services::persistence::MemoryBlobStore;

    fn appointment(id: &str, name: Option<&str>) -> Appointment {
        Appointment {
            id: id.to_string(),
            customer_name: name.map(str::to_string),
            customer_phone: Some("Linked".to_string()),
            service: "Hydra-Facial".to_string(),
            date: "05-12".to_string(),
            time: "3:00 PM".to_string(),
            status: AppointmentStatus::Confirmed,
            applied_promo: None,
        }
    }

    fn session() -> Session {
        Session::load(Arc::new(MemoryBlobStore::new()), true)
    }

    #[test]
    fn test_new_guest_greeting() {
        let msg = opening_message(&[], true);
        assert_eq!(msg.role, Role::Agent);
        assert!(!msg.is_error);
        assert!(msg.content.starts_with("Hello & Welcome to Dyra Beauty Parlour 🌸"));
    }

    #[test]
    fn test_returning_guest_greeting() {
        let msg = opening_message(&[appointment("BKG-1", Some("Riya"))], true);
        assert!(msg.content.starts_with("Welcome back to Dyra, Riya! ✨"));
    }

    #[test]
    fn test_returning_uses_latest_named_booking() {
        let history = vec![
            appointment("BKG-1", Some("Riya")),
            appointment("BKG-2", Some("Kavya")),
            appointment("BKG-3", None),
        ];
        let msg = opening_message(&history, true);
        assert!(msg.content.starts_with("Welcome back to Dyra, Kavya!"));
    }

    #[test]
    fn test_missing_key_shows_setup() {
        let msg = opening_message(&[appointment("BKG-1", Some("Riya"))], false);
        assert!(msg.is_error);
        assert_eq!(msg.content, SETUP_MESSAGE);
    }

    #[test]
    fn test_appointments_persist_on_append() {
        let store: Arc<dyn BlobStore> = Arc::new(MemoryBlobStore::new());
        let mut session = Session::load(Arc::clone(&store), true);
        session
            .append_appointments(vec![appointment("BKG-9", Some("Isha"))])
            .unwrap();

        let reloaded = Session::load(store, true);
        assert_eq!(reloaded.appointments.len(), 1);
        assert!(reloaded.messages[0].content.contains("Isha"));
    }

    #[test]
    fn test_promotions_prepend_and_remove() {
        let mut session = session();
        let promo = Promotion {
            id: "promo-2".to_string(),
            code: "BRIDE".to_string(),
            title: "Bridal week".to_string(),
            description: "Save on bridal".to_string(),
            discount: "15% OFF".to_string(),
            expiry: "Until 1/31/2026".to_string(),
            valid_until: "2026-01-31T00:00:00Z".to_string(),
            kind: PromotionType::Seasonal,
        };
        session.add_promotion(promo).unwrap();
        assert_eq!(session.promotions[0].id, "promo-2");
        assert_eq!(session.promotions.len(), 2);

        assert!(session.remove_promotion("promo-1").unwrap());
        assert!(!session.remove_promotion("promo-1").unwrap());
        assert_eq!(session.promotions.len(), 1);
    }

    #[test]
    fn test_draft_is_staged_until_saved() {
        let mut session = session();
        session.edit_draft(ConfigEdit {
            whatsapp_number: Some("15550009999".to_string()),
            ..Default::default()
        });
        assert!(session.draft_dirty);
        assert_eq!(session.config, SalonConfig::default());
        assert_eq!(
            persistence::load_config(session.store()),
            SalonConfig::default()
        );

        session.save_draft().unwrap();
        assert!(!session.draft_dirty);
        assert_eq!(session.config.whatsapp_link, "https://wa.me/15550009999");
        assert_eq!(persistence::load_config(session.store()), session.config);
    }

    #[test]
    fn test_clear_data_restores_defaults() {
        let mut session = session();
        session
            .append_appointments(vec![appointment("BKG-1", Some("Riya"))])
            .unwrap();
        session.remove_promotion("promo-1").unwrap();

        session.clear_data().unwrap();
        assert!(session.appointments.is_empty());
        assert_eq!(session.promotions, catalog::initial_promotions());
        assert!(session.messages[0].content.starts_with("Hello & Welcome"));
    }

    #[test]
    fn test_reset_keeps_documents() {
        let mut session = session();
        session.progress.service = Some("Party Makeup".to_string());
        session.messages.push(ChatMessage::user("hi"));
        session
            .append_appointments(vec![appointment("BKG-1", Some("Riya"))])
            .unwrap();

        session.reset();
        assert!(session.progress.is_empty());
        assert_eq!(session.messages.len(), 1);
        assert_eq!(session.appointments.len(), 1);
    }
}
