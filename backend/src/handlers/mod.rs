//! HTTP handlers for the PharmaFlow API

pub mod auth;
pub mod health;
pub mod medication;
pub mod reporting;

pub use auth::*;
pub use health::*;
pub use medication::*;
pub use reporting::*;
