//! Domain layer - registration entities, duplicate detection and storage traits

pub mod error;
pub mod registration;
pub mod storage;

pub use error::DomainError;
pub use registration::{
    Candidate, DuplicateChecker, DuplicateReport, Identity, Member, RegistrationId,
    TeamRegistration, TeamRegistrationRepository,
};
pub use storage::{Storage, StorageEntity, StorageKey};
