//! Team registration domain
//!
//! Teams register with a captain and up to a handful of members. A new
//! registration is accepted only when its team name, emails and SRNs are not
//! already taken by a stored team.

mod duplicate;
mod entity;
mod repository;
mod validation;

pub use duplicate::{Candidate, DuplicateChecker, DuplicateQuery, DuplicateReport};
pub use entity::{Identity, Member, RegistrationId, TeamRegistration};
pub use repository::TeamRegistrationRepository;
pub use validation::{RegistrationRules, RegistrationValidationError};

#[cfg(test)]
pub use repository::MockTeamRegistrationRepository;
