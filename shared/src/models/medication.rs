//! Medication batch models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analytics::{classify, ExpiryStatus, MalformedDate};

/// A batch of medication held in stock.
///
/// Legacy records written with Spanish keys (`nombre`, `cn`, `lote`,
/// `fechaCaducidad`, `precio`) are read through the aliases; records without
/// a price load with a price of zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub id: String,
    #[serde(alias = "nombre")]
    pub name: String,
    /// National code (CN), six digits kept as text
    #[serde(alias = "cn")]
    pub national_code: String,
    #[serde(alias = "lote")]
    pub lot: String,
    /// `YYYY-MM-DD`, stored verbatim
    #[serde(alias = "fechaCaducidad")]
    pub expiry_date: String,
    /// Signed so legacy records with negative stock still load; new input is
    /// validated to be non-negative
    pub stock: i64,
    #[serde(default, alias = "precio", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
}

impl Medication {
    /// Value of the whole batch (`unit_price * stock`)
    pub fn line_value(&self) -> Decimal {
        self.unit_price.saturating_mul(Decimal::from(self.stock))
    }

    /// Classify this batch against a reference date
    pub fn expiry_status(&self, reference: NaiveDate) -> Result<ExpiryStatus, MalformedDate> {
        classify(&self.expiry_date, reference)
    }

    /// Replace every field except the id
    pub fn apply(&mut self, update: NewMedication) {
        self.name = update.name;
        self.national_code = update.national_code;
        self.lot = update.lot;
        self.expiry_date = update.expiry_date;
        self.stock = i64::from(update.stock);
        self.unit_price = update.unit_price;
    }
}

/// A validated medication without an id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewMedication {
    pub name: String,
    pub national_code: String,
    pub lot: String,
    pub expiry_date: String,
    pub stock: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
}

impl NewMedication {
    pub fn into_medication(self, id: impl Into<String>) -> Medication {
        Medication {
            id: id.into(),
            name: self.name,
            national_code: self.national_code,
            lot: self.lot,
            expiry_date: self.expiry_date,
            stock: i64::from(self.stock),
            unit_price: self.unit_price,
        }
    }
}

/// An untyped candidate record as submitted by a client.
///
/// Every field is kept as raw JSON so the validator can report on it instead
/// of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationCandidate {
    #[serde(default, alias = "nombre")]
    pub name: Option<Value>,
    #[serde(default, alias = "cn")]
    pub national_code: Option<Value>,
    #[serde(default, alias = "lote")]
    pub lot: Option<Value>,
    #[serde(default, alias = "fechaCaducidad")]
    pub expiry_date: Option<Value>,
    #[serde(default)]
    pub stock: Option<Value>,
    #[serde(default, alias = "precio")]
    pub unit_price: Option<Value>,
}

impl MedicationCandidate {
    /// Build a candidate from any JSON value. Non-object input yields an
    /// empty candidate, which then fails validation on every field.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }
}

impl From<Value> for MedicationCandidate {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}
