//! Darkroom Photography Department Inventory Server
//!
//! Tracks consumable supplies, camera gear checkouts and lab equipment
//! servicing, and emails weekly reminders to the staff who need them.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    pub repository: repository::Repository,
}
