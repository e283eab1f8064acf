//! Expiry classification

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Batches expiring within this many days are at risk
pub const EXPIRY_RISK_WINDOW_DAYS: i64 = 90;

/// Storage format of expiry dates
pub const EXPIRY_DATE_FORMAT: &str = "%Y-%m-%d";

/// An expiry date that is not a zero-padded `YYYY-MM-DD` calendar date
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed expiry date: {0:?}")]
pub struct MalformedDate(pub String);

/// Risk tier of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpiryTier {
    Expired,
    AtRisk,
    Safe,
}

impl ExpiryTier {
    /// First match wins: `<= 0` expired, `<= 90` at risk, otherwise safe.
    /// A batch expiring today is expired.
    pub fn from_days_remaining(days_remaining: i64) -> Self {
        if days_remaining <= 0 {
            ExpiryTier::Expired
        } else if days_remaining <= EXPIRY_RISK_WINDOW_DAYS {
            ExpiryTier::AtRisk
        } else {
            ExpiryTier::Safe
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpiryTier::Expired => "expired",
            ExpiryTier::AtRisk => "atRisk",
            ExpiryTier::Safe => "safe",
        }
    }
}

impl std::fmt::Display for ExpiryTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying one expiry date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryStatus {
    pub days_remaining: i64,
    pub tier: ExpiryTier,
}

impl ExpiryStatus {
    pub fn from_days_remaining(days_remaining: i64) -> Self {
        Self {
            days_remaining,
            tier: ExpiryTier::from_days_remaining(days_remaining),
        }
    }

    /// Aggregation bucket: at risk or already expired (`days <= 90`)
    pub fn is_risk_or_expired(&self) -> bool {
        matches!(self.tier, ExpiryTier::Expired | ExpiryTier::AtRisk)
    }

    /// Filter bucket: at risk but not yet expired (`0 < days <= 90`)
    pub fn is_risk_only(&self) -> bool {
        self.tier == ExpiryTier::AtRisk
    }

    pub fn is_expired(&self) -> bool {
        self.tier == ExpiryTier::Expired
    }
}

/// Parse a stored expiry date. Only the zero-padded ISO form is accepted so
/// that string order and calendar order agree.
pub fn parse_expiry_date(raw: &str) -> Result<NaiveDate, MalformedDate> {
    let bytes = raw.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return Err(MalformedDate(raw.to_string()));
    }
    NaiveDate::parse_from_str(raw, EXPIRY_DATE_FORMAT).map_err(|_| MalformedDate(raw.to_string()))
}

/// Whole days from `reference` until `expiry` (negative once past)
pub fn days_remaining(expiry: NaiveDate, reference: NaiveDate) -> i64 {
    expiry.signed_duration_since(reference).num_days()
}

pub fn classify_date(expiry: NaiveDate, reference: NaiveDate) -> ExpiryStatus {
    ExpiryStatus::from_days_remaining(days_remaining(expiry, reference))
}

/// Classify a raw expiry date against a reference date
pub fn classify(expiry_date: &str, reference: NaiveDate) -> Result<ExpiryStatus, MalformedDate> {
    parse_expiry_date(expiry_date).map(|expiry| classify_date(expiry, reference))
}

/// Today in the local calendar
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, EXPIRY_DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_tier_boundaries() {
        let today = date("2025-01-01");
        let at = |days: i64| classify_date(today + chrono::Duration::days(days), today);

        assert_eq!(at(-30).tier, ExpiryTier::Expired);
        assert_eq!(at(0).tier, ExpiryTier::Expired);
        assert_eq!(at(1).tier, ExpiryTier::AtRisk);
        assert_eq!(at(90).tier, ExpiryTier::AtRisk);
        assert_eq!(at(91).tier, ExpiryTier::Safe);
    }

    #[test]
    fn test_days_remaining_crosses_months_and_leap_day() {
        assert_eq!(days_remaining(date("2024-03-01"), date("2024-02-28")), 2);
        assert_eq!(days_remaining(date("2025-03-01"), date("2025-02-28")), 1);
        assert_eq!(days_remaining(date("2024-12-31"), date("2025-01-10")), -10);
    }

    #[test]
    fn test_classify_raw_string() {
        let status = classify("2025-03-15", date("2025-03-05")).unwrap();
        assert_eq!(status.days_remaining, 10);
        assert_eq!(status.tier, ExpiryTier::AtRisk);
        assert!(status.is_risk_only());
        assert!(status.is_risk_or_expired());
    }

    #[test]
    fn test_expired_is_risk_or_expired_but_not_risk_only() {
        let status = ExpiryStatus::from_days_remaining(0);
        assert!(status.is_expired());
        assert!(status.is_risk_or_expired());
        assert!(!status.is_risk_only());
    }

    #[test]
    fn test_malformed_dates_rejected() {
        let today = date("2025-01-01");
        for raw in ["", "2025-3-15", "15/03/2025", "2025-02-30", "2025-03-15T00:00", "soon"] {
            assert_eq!(classify(raw, today), Err(MalformedDate(raw.to_string())), "{raw}");
        }
    }

    #[test]
    fn test_tier_serializes_camel_case() {
        assert_eq!(serde_json::to_string(&ExpiryTier::AtRisk).unwrap(), "\"atRisk\"");
        let status = ExpiryStatus::from_days_remaining(120);
        let json = serde_json::to_value(status).unwrap();
        assert_eq!(json["daysRemaining"], 120);
        assert_eq!(json["tier"], "safe");
    }
}
