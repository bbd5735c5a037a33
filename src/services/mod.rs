//! Business logic services

pub mod email;
pub mod frequency;
pub mod notifications;

use std::sync::Arc;

use crate::{
    config::AppConfig,
    repository::{InventoryStore, Repository},
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub notifications: notifications::NotificationService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, config: &AppConfig) -> Self {
        let mailer: Option<Arc<dyn email::Mailer>> = if config.email.enabled {
            Some(Arc::new(email::EmailService::new(config.email.clone())))
        } else {
            None
        };

        let store: Arc<dyn InventoryStore> = Arc::new(repository);

        Self {
            notifications: notifications::NotificationService::new(
                store,
                mailer,
                config.tasks.clone(),
            ),
        }
    }
}
