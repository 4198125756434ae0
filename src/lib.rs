//! CIE Ignite team registration service
//!
//! Accepts team registrations over HTTP and rejects any submission that
//! reuses a registered team name, email or SRN.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::registration::{create_registration_repository, RegistrationService};
use infrastructure::wallet::WalletRegistry;
use tracing::info;

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_config = config.storage.storage_config()?;
    let repository = create_registration_repository(&storage_config, &config.storage.table).await?;

    let rules = config.registration.rules()?;
    let mut service = RegistrationService::new(repository, rules);

    match &config.registration.wallet_file {
        Some(path) => {
            info!(path = %path.display(), "Recording captain wallets");
            service = service.with_wallet_registry(Arc::new(WalletRegistry::new(path)));
        }
        None => info!("Wallet registry disabled"),
    }

    Ok(AppState::new(Arc::new(service)))
}
