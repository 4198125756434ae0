//! Registration service: validate, check for duplicates, insert

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::domain::registration::{
    Candidate, DuplicateChecker, DuplicateReport, Member, RegistrationId, RegistrationRules,
    TeamRegistration, TeamRegistrationRepository,
};
use crate::domain::DomainError;
use crate::infrastructure::wallet::WalletRegistry;

/// A team registration as submitted by the onboarding form
#[derive(Debug, Clone, Default)]
pub struct RegisterTeamRequest {
    pub team_name: String,
    pub idea: String,
    pub idea_description: String,
    pub captain: Member,
    pub members: Vec<Member>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Result of a registration attempt that reached the store
#[derive(Debug, Clone)]
pub enum RegistrationOutcome {
    Created(TeamRegistration),
    /// Nothing was written; the report lists every collision
    Duplicate(DuplicateReport),
}

pub struct RegistrationService {
    repository: Arc<dyn TeamRegistrationRepository>,
    checker: DuplicateChecker,
    rules: RegistrationRules,
    wallets: Option<Arc<WalletRegistry>>,
}

impl RegistrationService {
    pub fn new(repository: Arc<dyn TeamRegistrationRepository>, rules: RegistrationRules) -> Self {
        Self {
            checker: DuplicateChecker::new(repository.clone()),
            repository,
            rules,
            wallets: None,
        }
    }

    /// Record captain wallets after each successful registration
    pub fn with_wallet_registry(mut self, wallets: Arc<WalletRegistry>) -> Self {
        self.wallets = Some(wallets);
        self
    }

    pub fn wallets(&self) -> Option<&Arc<WalletRegistry>> {
        self.wallets.as_ref()
    }

    /// Register a team unless it collides with an existing registration.
    ///
    /// The check and the insert are not atomic: two concurrent submissions
    /// with overlapping identities can both be accepted.
    pub async fn register(
        &self,
        request: RegisterTeamRequest,
    ) -> Result<RegistrationOutcome, DomainError> {
        info!(team_name = %request.team_name, "Registering team");

        let registration = build_registration(request);

        self.rules.validate(&registration).map_err(|errors| {
            let message = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            DomainError::validation(message)
        })?;

        let report = self
            .checker
            .check(&Candidate::from_registration(&registration))
            .await?;

        if report.has_duplicates {
            warn!(
                team_name = %registration.team_name(),
                team_name_conflict = report.team_name_conflict,
                emails = ?report.conflicting_emails,
                srns = ?report.conflicting_srns,
                "Duplicate email, SRN or team name found"
            );
            return Ok(RegistrationOutcome::Duplicate(report));
        }

        let created = self.repository.create(registration).await?;
        info!(id = %created.id(), team_name = %created.team_name(), "Team registered");

        self.record_wallet(&created).await;

        Ok(RegistrationOutcome::Created(created))
    }

    async fn record_wallet(&self, registration: &TeamRegistration) {
        let Some(wallets) = &self.wallets else {
            return;
        };

        let wallet_address = &registration.captain().wallet_address;

        if wallet_address.is_empty() {
            debug!(team_name = %registration.team_name(), "No captain wallet to record");
            return;
        }

        // The registration is already stored; a registry failure only gets logged
        if let Err(e) = wallets.record(registration.team_name(), wallet_address).await {
            warn!(
                team_name = %registration.team_name(),
                error = %e,
                "Failed to record captain wallet"
            );
        }
    }

    pub async fn get(&self, id: &str) -> Result<Option<TeamRegistration>, DomainError> {
        let Some(id) = RegistrationId::parse(id) else {
            return Ok(None);
        };
        self.repository.get(&id).await
    }

    pub async fn list(&self) -> Result<Vec<TeamRegistration>, DomainError> {
        self.repository.list().await
    }

    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }
}

fn build_registration(request: RegisterTeamRequest) -> TeamRegistration {
    let members = request
        .members
        .into_iter()
        .filter(|m| !m.is_blank())
        .collect();

    let registration = TeamRegistration::new(request.team_name, request.captain)
        .with_idea(request.idea, request.idea_description)
        .with_members(members);

    match request.created_at {
        Some(created_at) => registration.with_created_at(created_at),
        None => registration,
    }
}
