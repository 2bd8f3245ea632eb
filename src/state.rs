use std::sync::atomic::AtomicBool;
use std::sync::{Mutex, MutexGuard};

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::services::ai::LlmProvider;
use crate::services::session::Session;

pub struct AppState {
    pub config: AppConfig,
    pub llm: Box<dyn LlmProvider>,
    pub session: Mutex<Session>,
    /// Set while a chat turn is waiting on the model.
    pub busy: AtomicBool,
}

impl AppState {
    pub fn new(config: AppConfig, llm: Box<dyn LlmProvider>, session: Session) -> Self {
        Self {
            config,
            llm,
            session: Mutex::new(session),
            busy: AtomicBool::new(false),
        }
    }

    pub fn session(&self) -> Result<MutexGuard<'_, Session>, AppError> {
        self.session
            .lock()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("session lock poisoned")))
    }
}
