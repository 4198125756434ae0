//! Duplicate registration detection
//!
//! A candidate team collides with an existing registration when it reuses the
//! team name, or when any email or SRN of its captain and members already
//! appears on a stored team. Comparison is exact and case-sensitive. Empty
//! strings never count as colliding values.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::entity::{Identity, TeamRegistration};
use super::repository::TeamRegistrationRepository;
use crate::domain::DomainError;

/// The identities a new team wants to register
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub team_name: String,
    pub captain: Identity,
    pub members: Vec<Identity>,
}

impl Candidate {
    pub fn new(team_name: impl Into<String>, captain: Identity, members: Vec<Identity>) -> Self {
        Self {
            team_name: team_name.into(),
            captain,
            members,
        }
    }

    pub fn from_registration(registration: &TeamRegistration) -> Self {
        Self {
            team_name: registration.team_name().to_string(),
            captain: registration.captain().identity(),
            members: registration.members().iter().map(|m| m.identity()).collect(),
        }
    }

    /// Build the match criteria, dropping empty values
    pub fn to_query(&self) -> DuplicateQuery {
        let people = std::iter::once(&self.captain).chain(self.members.iter());
        let mut emails = BTreeSet::new();
        let mut srns = BTreeSet::new();

        for identity in people {
            if !identity.email.is_empty() {
                emails.insert(identity.email.clone());
            }

            if !identity.srn.is_empty() {
                srns.insert(identity.srn.clone());
            }
        }

        DuplicateQuery {
            team_name: self.team_name.clone(),
            emails,
            srns,
        }
    }
}

/// Criteria selecting every stored team that may collide with a candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateQuery {
    team_name: String,
    emails: BTreeSet<String>,
    srns: BTreeSet<String>,
}

impl DuplicateQuery {
    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    pub fn emails(&self) -> &BTreeSet<String> {
        &self.emails
    }

    pub fn srns(&self) -> &BTreeSet<String> {
        &self.srns
    }

    /// Whether a stored team satisfies the query
    ///
    /// Backends that cannot push the query down to the store filter with this.
    pub fn matches(&self, team: &TeamRegistration) -> bool {
        team.team_name() == self.team_name
            || team
                .people()
                .any(|p| self.emails.contains(&p.email) || self.srns.contains(&p.srn))
    }
}

/// Outcome of a duplicate check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateReport {
    pub has_duplicates: bool,
    pub team_name_conflict: bool,
    pub conflicting_emails: BTreeSet<String>,
    pub conflicting_srns: BTreeSet<String>,
}

impl DuplicateReport {
    /// Fold the teams returned for `query` into a report
    pub fn from_matches(query: &DuplicateQuery, matches: &[TeamRegistration]) -> Self {
        let mut report = Self::default();

        for team in matches {
            if team.team_name() == query.team_name() {
                report.team_name_conflict = true;
            }

            for person in team.people() {
                if query.emails().contains(&person.email) {
                    report.conflicting_emails.insert(person.email.clone());
                }

                if query.srns().contains(&person.srn) {
                    report.conflicting_srns.insert(person.srn.clone());
                }
            }
        }

        report.has_duplicates = report.team_name_conflict
            || !report.conflicting_emails.is_empty()
            || !report.conflicting_srns.is_empty();
        report
    }

    /// Message shown to the person submitting the form
    pub fn describe(&self) -> String {
        let mut message = String::new();

        if self.team_name_conflict {
            message.push_str("Team is already registered. ");
        }

        let has_emails = !self.conflicting_emails.is_empty();
        let has_srns = !self.conflicting_srns.is_empty();

        if has_emails || has_srns {
            message.push_str("The following ");

            if has_emails {
                message.push_str("emails are already in use: ");
                message.push_str(&join(&self.conflicting_emails));
            }

            if has_emails && has_srns {
                message.push_str(" and ");
            }

            if has_srns {
                message.push_str("SRNs are already in use: ");
                message.push_str(&join(&self.conflicting_srns));
            }

            message.push_str(". ");
        }

        message.push_str("Team not created.");
        message
    }
}

fn join(values: &BTreeSet<String>) -> String {
    values.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// Runs duplicate checks against a registration repository
#[derive(Clone)]
pub struct DuplicateChecker {
    repository: Arc<dyn TeamRegistrationRepository>,
}

impl DuplicateChecker {
    pub fn new(repository: Arc<dyn TeamRegistrationRepository>) -> Self {
        Self { repository }
    }

    /// Check a candidate against every stored registration.
    ///
    /// Issues exactly one read against the repository and never writes. A
    /// storage failure is returned as-is; no partial report is produced.
    pub async fn check(&self, candidate: &Candidate) -> Result<DuplicateReport, DomainError> {
        let query = candidate.to_query();
        let matches = self.repository.find_matching(&query).await?;

        debug!(
            team_name = %candidate.team_name,
            matched = matches.len(),
            "Duplicate query completed"
        );

        Ok(DuplicateReport::from_matches(&query, &matches))
    }
}
