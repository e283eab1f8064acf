//! Domain models for the PharmaFlow inventory

mod auth;
mod medication;

pub use auth::*;
pub use medication::*;
