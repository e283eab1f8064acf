//! Shared types and inventory logic for PharmaFlow
//!
//! This crate contains the domain core shared between the backend and the
//! browser dashboard (via WASM): record validation, expiry classification,
//! dashboard statistics, list filtering and the FEFO report.

pub mod analytics;
pub mod api;
pub mod models;
pub mod report;
pub mod session;
pub mod types;
pub mod validation;

pub use analytics::*;
pub use api::*;
pub use models::*;
pub use report::*;
pub use session::*;
pub use types::*;
pub use validation::*;
