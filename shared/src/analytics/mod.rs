//! Expiry analytics for the inventory dashboard
//!
//! Every consumer (list filtering, dashboard counters, report rows) goes
//! through [`classify`] so the 0 and 90 day thresholds live in one place.

mod expiry;
mod filter;
mod stats;

pub use expiry::*;
pub use filter::*;
pub use stats::*;
