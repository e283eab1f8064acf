//! Business logic services for the PharmaFlow API

pub mod auth;
pub mod medication;
pub mod reporting;

pub use auth::{Authenticator, StaticCredentialAuthenticator};
pub use medication::MedicationService;
pub use reporting::ReportingService;
