//! Team registration entity and identity types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::storage::{StorageEntity, StorageKey};

/// Registration identifier, a hyphenated UUID v4
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationId(String);

impl RegistrationId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Parse an identifier, accepting only well-formed UUIDs
    pub fn parse(value: &str) -> Option<Self> {
        uuid::Uuid::parse_str(value)
            .ok()
            .map(|uuid| Self(uuid.hyphenated().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for RegistrationId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// The pair of values used to recognise a person across registrations
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Identity {
    pub email: String,
    pub srn: String,
}

impl Identity {
    pub fn new(email: impl Into<String>, srn: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            srn: srn.into(),
        }
    }
}

/// A captain or team member as submitted and stored
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(default)]
    pub srn: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub wallet_address: String,
}

impl Member {
    pub fn new(srn: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            srn: srn.into(),
            name: name.into(),
            email: email.into(),
            wallet_address: String::new(),
        }
    }

    pub fn with_wallet_address(mut self, wallet_address: impl Into<String>) -> Self {
        self.wallet_address = wallet_address.into();
        self
    }

    pub fn identity(&self) -> Identity {
        Identity::new(&self.email, &self.srn)
    }

    /// True when the form row was left completely blank
    pub fn is_blank(&self) -> bool {
        self.srn.trim().is_empty() && self.name.trim().is_empty() && self.email.trim().is_empty()
    }
}

/// A registered team
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRegistration {
    id: RegistrationId,
    team_name: String,
    #[serde(default)]
    idea: String,
    #[serde(default)]
    idea_description: String,
    captain: Member,
    #[serde(default)]
    members: Vec<Member>,
    created_at: DateTime<Utc>,
}

impl TeamRegistration {
    pub fn new(team_name: impl Into<String>, captain: Member) -> Self {
        Self {
            id: RegistrationId::generate(),
            team_name: team_name.into(),
            idea: String::new(),
            idea_description: String::new(),
            captain,
            members: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_idea(mut self, idea: impl Into<String>, description: impl Into<String>) -> Self {
        self.idea = idea.into();
        self.idea_description = description.into();
        self
    }

    pub fn with_members(mut self, members: Vec<Member>) -> Self {
        self.members = members;
        self
    }

    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    // Getters

    pub fn id(&self) -> &RegistrationId {
        &self.id
    }

    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    pub fn idea(&self) -> &str {
        &self.idea
    }

    pub fn idea_description(&self) -> &str {
        &self.idea_description
    }

    pub fn captain(&self) -> &Member {
        &self.captain
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Captain first, then members in submission order
    pub fn people(&self) -> impl Iterator<Item = &Member> {
        std::iter::once(&self.captain).chain(self.members.iter())
    }
}

impl StorageEntity for TeamRegistration {
    type Key = RegistrationId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
