//! FEFO inventory report
//!
//! The full inventory, soonest expiry first, with the same tier the
//! dashboard uses for each row so the report highlights match the list.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analytics::{aggregate, round_currency, sort_by_expiry, ExpiryTier};
use crate::models::Medication;

/// One line of the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub national_code: String,
    /// Uppercased product name
    pub name: String,
    pub lot: String,
    pub expiry_date: String,
    pub stock: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub line_total: Decimal,
    pub days_remaining: Option<i64>,
    /// `None` when the expiry date cannot be read
    pub tier: Option<ExpiryTier>,
}

impl ReportRow {
    /// Column names in serialization order
    pub const COLUMNS: [&'static str; 9] = [
        "nationalCode",
        "name",
        "lot",
        "expiryDate",
        "stock",
        "unitPrice",
        "lineTotal",
        "daysRemaining",
        "tier",
    ];

    fn from_medication(record: &Medication, reference: NaiveDate) -> Self {
        let status = record.expiry_status(reference).ok();
        Self {
            national_code: record.national_code.clone(),
            name: record.name.to_uppercase(),
            lot: record.lot.clone(),
            expiry_date: record.expiry_date.clone(),
            stock: record.stock,
            unit_price: record.unit_price,
            line_total: round_currency(record.line_value()),
            days_remaining: status.map(|s| s.days_remaining),
            tier: status.map(|s| s.tier),
        }
    }

    /// Rows that the report highlights (expired or inside the risk window)
    pub fn is_highlighted(&self) -> bool {
        matches!(self.tier, Some(ExpiryTier::Expired | ExpiryTier::AtRisk))
    }
}

/// The complete report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReport {
    pub generated_on: NaiveDate,
    pub rows: Vec<ReportRow>,
    /// Same figure as the dashboard's inventory value card
    #[serde(with = "rust_decimal::serde::float")]
    pub total_inventory_value: Decimal,
    pub item_count: usize,
}

impl InventoryReport {
    /// Download name without extension, e.g. `Reporte_PharmaFlow_2025-01-31`
    pub fn file_stem(&self) -> String {
        format!("Reporte_PharmaFlow_{}", self.generated_on.format("%Y-%m-%d"))
    }
}

pub fn build_report(records: &[Medication], reference: NaiveDate) -> InventoryReport {
    let mut ordered: Vec<&Medication> = records.iter().collect();
    sort_by_expiry(&mut ordered);

    InventoryReport {
        generated_on: reference,
        rows: ordered
            .into_iter()
            .map(|record| ReportRow::from_medication(record, reference))
            .collect(),
        total_inventory_value: aggregate(records, reference).total_inventory_value,
        item_count: records.len(),
    }
}
