//! List filtering and FEFO ordering

use std::borrow::Borrow;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ExpiryStatus;
use crate::models::Medication;

/// Tier selector of the list view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TierFilter {
    #[default]
    #[serde(alias = "todos")]
    All,
    /// At risk, not yet expired
    #[serde(alias = "riesgo")]
    AtRisk,
    #[serde(alias = "caducados")]
    Expired,
}

impl TierFilter {
    /// `None` means the expiry date could not be classified; such records
    /// only pass the `All` filter.
    pub fn matches(&self, status: Option<ExpiryStatus>) -> bool {
        match self {
            TierFilter::All => true,
            TierFilter::AtRisk => status.is_some_and(|s| s.is_risk_only()),
            TierFilter::Expired => status.is_some_and(|s| s.is_expired()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TierFilter::All => "all",
            TierFilter::AtRisk => "atRisk",
            TierFilter::Expired => "expired",
        }
    }
}

impl FromStr for TierFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "all" | "todos" => Ok(TierFilter::All),
            "atRisk" | "riesgo" => Ok(TierFilter::AtRisk),
            "expired" | "caducados" => Ok(TierFilter::Expired),
            _ => Err(format!(
                "Invalid tier filter: {}. Use all, atRisk or expired",
                s
            )),
        }
    }
}

/// Case-insensitive substring match on name, national code, lot and the raw
/// expiry date (so `2025-03` finds every batch expiring that month).
pub fn matches_search(record: &Medication, search_text: &str) -> bool {
    if search_text.is_empty() {
        return true;
    }
    let needle = search_text.to_lowercase();
    [
        &record.name,
        &record.national_code,
        &record.lot,
        &record.expiry_date,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

/// Stable ascending sort on the raw expiry date string
pub fn sort_by_expiry<T: Borrow<Medication>>(records: &mut [T]) {
    records.sort_by(|a, b| a.borrow().expiry_date.cmp(&b.borrow().expiry_date));
}

/// Narrow a collection by search text and tier, soonest expiry first
pub fn filter_and_sort<'a>(
    records: &'a [Medication],
    search_text: &str,
    tier: TierFilter,
    reference: NaiveDate,
) -> Vec<&'a Medication> {
    let mut selected: Vec<&Medication> = records
        .iter()
        .filter(|record| matches_search(record, search_text))
        .filter(|record| tier.matches(record.expiry_status(reference).ok()))
        .collect();
    sort_by_expiry(&mut selected);
    selected
}
