//! Infrastructure layer - storage backends, repositories and services

pub mod logging;
pub mod registration;
pub mod storage;
pub mod wallet;
