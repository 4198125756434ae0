//! Wallet registry backed by a JSON file
//!
//! Maps team names to the captain's wallet address. The admin dashboard reads
//! this file to know which accounts may receive badges.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::DomainError;

/// Team name to wallet address
pub type WalletMap = BTreeMap<String, String>;

#[derive(Debug)]
pub struct WalletRegistry {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl WalletRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Read the registry; a missing file is an empty registry
    pub async fn load(&self) -> Result<WalletMap, DomainError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                DomainError::storage(format!(
                    "Wallet registry {} is not valid JSON: {}",
                    self.path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(WalletMap::new()),
            Err(e) => Err(DomainError::storage(format!(
                "Failed to read wallet registry {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    /// Record or overwrite the wallet for a team.
    ///
    /// An unreadable existing file is replaced rather than blocking the write.
    pub async fn record(&self, team_name: &str, wallet_address: &str) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut wallets = match self.load().await {
            Ok(wallets) => wallets,
            Err(e) => {
                warn!(error = %e, "Starting wallet registry from scratch");
                WalletMap::new()
            }
        };

        wallets.insert(team_name.to_string(), wallet_address.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let content = serde_json::to_string_pretty(&wallets)
            .map_err(|e| DomainError::internal(format!("Failed to encode wallets: {}", e)))?;

        tokio::fs::write(&self.path, content).await.map_err(|e| {
            DomainError::storage(format!(
                "Failed to write wallet registry {}: {}",
                self.path.display(),
                e
            ))
        })?;

        info!(team_name = %team_name, wallet = %wallet_address, "Wallet recorded");
        Ok(())
    }
}
