//! Application state management
//!
//! Contains shared state accessible across all handlers.

use crate::repository::UserRepository;
use std::sync::Arc;

/// Application state shared across all handlers
pub struct AppState {
    /// User storage; PostgreSQL in production
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

/// Type alias for shared state
pub type SharedState = Arc<AppState>;
