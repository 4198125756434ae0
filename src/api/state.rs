//! Application state shared by the handlers

use std::sync::Arc;

use crate::infrastructure::registration::RegistrationService;

#[derive(Clone)]
pub struct AppState {
    pub registration_service: Arc<RegistrationService>,
}

impl AppState {
    pub fn new(registration_service: Arc<RegistrationService>) -> Self {
        Self {
            registration_service,
        }
    }
}
