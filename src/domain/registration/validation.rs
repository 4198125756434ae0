//! Registration form validation

use regex::{Regex, RegexBuilder};
use thiserror::Error;

use super::entity::{Member, TeamRegistration};
use crate::domain::DomainError;

pub const MAX_TEAM_NAME_LENGTH: usize = 50;
pub const MAX_IDEA_LENGTH: usize = 100;
pub const MAX_IDEA_DESCRIPTION_LENGTH: usize = 250;
pub const MAX_SRN_LENGTH: usize = 20;
pub const MAX_NAME_LENGTH: usize = 50;
pub const MAX_EMAIL_LENGTH: usize = 30;

/// A single problem found in a registration
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegistrationValidationError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be {max} characters or less")]
    TooLong { field: String, max: usize },

    #[error("{field} must be from @{domain} domain")]
    InvalidEmailDomain { field: String, domain: String },

    #[error("A team can have at most {0} members besides the captain")]
    TooManyMembers(usize),
}

/// Validation rules for a registration, parameterised by deployment
#[derive(Debug, Clone)]
pub struct RegistrationRules {
    email_domain: String,
    email_pattern: Regex,
    max_members: usize,
}

impl RegistrationRules {
    pub fn new(email_domain: &str, max_members: usize) -> Result<Self, DomainError> {
        let domain = email_domain.trim().trim_start_matches('@');

        if domain.is_empty() {
            return Err(DomainError::configuration("Email domain cannot be empty"));
        }

        let pattern = format!(r"^[^\s@]+@.*{}$", regex::escape(domain));
        let email_pattern = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| DomainError::configuration(format!("Invalid email domain: {}", e)))?;

        Ok(Self {
            email_domain: domain.to_string(),
            email_pattern,
            max_members,
        })
    }

    pub fn is_valid_email(&self, email: &str) -> bool {
        self.email_pattern.is_match(email)
    }

    /// Check every field, collecting all problems rather than stopping at the first
    pub fn validate(
        &self,
        registration: &TeamRegistration,
    ) -> Result<(), Vec<RegistrationValidationError>> {
        let mut errors = Vec::new();

        check_text(&mut errors, "Team Name", registration.team_name(), MAX_TEAM_NAME_LENGTH);
        check_text(&mut errors, "Idea", registration.idea(), MAX_IDEA_LENGTH);
        check_text(
            &mut errors,
            "Idea Description",
            registration.idea_description(),
            MAX_IDEA_DESCRIPTION_LENGTH,
        );

        let captain = registration.captain();
        check_text(&mut errors, "Captain SRN", &captain.srn, MAX_SRN_LENGTH);
        check_text(&mut errors, "Captain Name", &captain.name, MAX_NAME_LENGTH);
        check_text(&mut errors, "Captain Email", &captain.email, MAX_EMAIL_LENGTH);
        self.check_email(&mut errors, "Captain Email", &captain.email);

        if registration.members().len() > self.max_members {
            errors.push(RegistrationValidationError::TooManyMembers(self.max_members));
        }

        for (index, member) in registration.members().iter().enumerate() {
            self.check_member(&mut errors, index + 1, member);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn check_member(
        &self,
        errors: &mut Vec<RegistrationValidationError>,
        position: usize,
        member: &Member,
    ) {
        let fields = [
            ("SRN", member.srn.as_str(), MAX_SRN_LENGTH),
            ("Name", member.name.as_str(), MAX_NAME_LENGTH),
            ("Email", member.email.as_str(), MAX_EMAIL_LENGTH),
        ];

        for (label, value, max) in fields {
            check_text(errors, &format!("Member {} {}", position, label), value, max);
        }

        self.check_email(errors, &format!("Member {} Email", position), &member.email);
    }

    fn check_email(&self, errors: &mut Vec<RegistrationValidationError>, field: &str, email: &str) {
        if !email.trim().is_empty() && !self.is_valid_email(email) {
            errors.push(RegistrationValidationError::InvalidEmailDomain {
                field: field.to_string(),
                domain: self.email_domain.clone(),
            });
        }
    }
}

fn check_text(
    errors: &mut Vec<RegistrationValidationError>,
    field: &str,
    value: &str,
    max: usize,
) {
    if value.trim().is_empty() {
        errors.push(RegistrationValidationError::Required {
            field: field.to_string(),
        });
    } else if value.chars().count() > max {
        errors.push(RegistrationValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
}
