//! Dashboard statistics

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::models::Medication;

/// Summary shown on the dashboard cards
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total_stock: i64,
    /// Units expiring within the risk window, expired units included
    pub critical_risk_units: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub risk_value: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_inventory_value: Decimal,
}

/// Round a monetary amount to cents, halves away from zero
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Fold a collection into dashboard statistics.
///
/// The risk bucket is the classifier's `expired ∪ atRisk` union. Records
/// with an unparseable expiry date still count toward the totals but never
/// toward risk.
pub fn aggregate(records: &[Medication], reference: NaiveDate) -> InventoryStats {
    let mut stats = records
        .iter()
        .fold(InventoryStats::default(), |mut acc, record| {
            let line_value = record.line_value();
            acc.total_stock = acc.total_stock.saturating_add(record.stock);
            acc.total_inventory_value = acc.total_inventory_value.saturating_add(line_value);

            let at_risk = record
                .expiry_status(reference)
                .map(|status| status.is_risk_or_expired())
                .unwrap_or(false);
            if at_risk {
                acc.critical_risk_units = acc.critical_risk_units.saturating_add(record.stock);
                acc.risk_value = acc.risk_value.saturating_add(line_value);
            }
            acc
        });

    stats.risk_value = round_currency(stats.risk_value);
    stats.total_inventory_value = round_currency(stats.total_inventory_value);
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn med(id: &str, expiry: &str, stock: i64, price: &str) -> Medication {
        Medication {
            id: id.to_string(),
            name: format!("Med {id}"),
            national_code: "123456".to_string(),
            lot: format!("L-{id}"),
            expiry_date: expiry.to_string(),
            stock,
            unit_price: dec(price),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn test_total_value_far_from_expiry() {
        let records = vec![
            med("1", "2030-01-01", 2, "10"),
            med("2", "2030-01-01", 4, "5"),
        ];
        let stats = aggregate(&records, today());

        assert_eq!(stats.total_inventory_value, dec("40"));
        assert_eq!(stats.total_stock, 6);
        assert_eq!(stats.critical_risk_units, 0);
        assert_eq!(stats.risk_value, Decimal::ZERO);
    }

    #[test]
    fn test_batch_expiring_in_ten_days_is_critical() {
        let records = vec![med("1", "2025-01-11", 1, "10")];
        let stats = aggregate(&records, today());

        assert_eq!(stats.critical_risk_units, 1);
        assert_eq!(stats.risk_value, dec("10"));
    }

    #[test]
    fn test_expired_stock_counts_as_risk() {
        let records = vec![
            med("1", "2024-06-01", 3, "2"),
            med("2", "2025-01-01", 2, "1"),
            med("3", "2025-04-01", 5, "1"),
            med("4", "2025-04-02", 7, "1"),
        ];
        let stats = aggregate(&records, today());

        // 2025-04-01 is day 90, 2025-04-02 is day 91
        assert_eq!(stats.critical_risk_units, 10);
        assert_eq!(stats.risk_value, dec("13"));
        assert_eq!(stats.total_stock, 17);
        assert_eq!(stats.total_inventory_value, dec("20"));
    }

    #[test]
    fn test_values_rounded_to_cents() {
        let records = vec![
            med("1", "2030-01-01", 3, "0.1"),
            med("2", "2030-01-01", 1, "0.005"),
        ];
        let stats = aggregate(&records, today());
        assert_eq!(stats.total_inventory_value, dec("0.31"));
    }

    #[test]
    fn test_malformed_date_counts_toward_totals_only() {
        let records = vec![med("1", "not-a-date", 4, "2.5")];
        let stats = aggregate(&records, today());

        assert_eq!(stats.total_stock, 4);
        assert_eq!(stats.total_inventory_value, dec("10"));
        assert_eq!(stats.critical_risk_units, 0);
    }

    #[test]
    fn test_legacy_negative_stock_is_summed_as_stored() {
        let records = vec![
            med("1", "2030-01-01", 10, "1"),
            med("2", "2025-01-05", -2, "1"),
        ];
        let stats = aggregate(&records, today());

        assert_eq!(stats.total_stock, 8);
        assert_eq!(stats.critical_risk_units, -2);
        assert_eq!(stats.total_inventory_value, dec("8"));
    }

    #[test]
    fn test_empty_collection() {
        assert_eq!(aggregate(&[], today()), InventoryStats::default());
    }

    #[test]
    fn test_serializes_values_as_numbers() {
        let records = vec![med("1", "2025-01-05", 3, "8.25")];
        let json = serde_json::to_value(aggregate(&records, today())).unwrap();
        assert_eq!(json["riskValue"], serde_json::json!(24.75));
        assert_eq!(json["criticalRiskUnits"], 3);
    }
}
