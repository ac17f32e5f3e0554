// src/state.rs
use std::sync::Arc;
use std::time::Duration;

use crate::services::completion::CompletionService;
use crate::services::session_manager::SessionManager;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub sessions: SessionManager,
    pub completion: Arc<dyn CompletionService>,
}

impl AppState {
    pub fn new(session_ttl: Duration, completion: Arc<dyn CompletionService>) -> Self {
        Self {
            sessions: SessionManager::new(session_ttl),
            completion,
        }
    }
}
