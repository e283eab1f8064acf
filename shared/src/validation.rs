//! Validation of submitted medication records
//!
//! Every field is checked independently and all failures are reported
//! together. Numeric fields are coerced the way a browser form submits them:
//! numbers and numeric strings are accepted, blanks count as missing.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::analytics::parse_expiry_date;
use crate::models::{MedicationCandidate, NewMedication};

/// Required length of a national code
pub const NATIONAL_CODE_LEN: usize = 6;

pub const NAME_REQUIRED: &str = "Name is required";
pub const NATIONAL_CODE_LENGTH: &str = "National code must be exactly 6 digits";
pub const NATIONAL_CODE_DIGITS: &str = "National code may only contain digits";
pub const LOT_REQUIRED: &str = "Lot is required";
pub const EXPIRY_DATE_REQUIRED: &str = "Expiry date is required";
pub const EXPIRY_DATE_MALFORMED: &str = "Expiry date must be a valid date (YYYY-MM-DD)";
pub const STOCK_NOT_A_NUMBER: &str = "Stock must be a number";
pub const STOCK_NOT_WHOLE: &str = "Stock must be a whole number";
pub const STOCK_NEGATIVE: &str = "Stock cannot be negative";
pub const UNIT_PRICE_INVALID: &str = "Unit price is required and must be greater than 0";

/// Fields of a medication record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    NationalCode,
    Lot,
    ExpiryDate,
    Stock,
    UnitPrice,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::NationalCode => "nationalCode",
            Field::Lot => "lot",
            Field::ExpiryDate => "expiryDate",
            Field::Stock => "stock",
            Field::UnitPrice => "unitPrice",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One failed field constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// Every failed constraint of a candidate, in field order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[serde(transparent)]
#[error("{}", first_message(.0))]
pub struct ValidationErrors(Vec<FieldError>);

fn first_message(errors: &[FieldError]) -> &'static str {
    errors.first().map(|e| e.message).unwrap_or("Invalid record")
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Message of the first failing field
    pub fn first_message(&self) -> &'static str {
        first_message(&self.0)
    }

    pub fn message_for(&self, field: Field) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }

    pub fn fields(&self) -> Vec<Field> {
        self.0.iter().map(|e| e.field).collect()
    }

    fn check<T>(&mut self, field: Field, result: Result<T, &'static str>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.0.push(FieldError { field, message });
                None
            }
        }
    }
}

/// Validate a candidate and normalize it into a [`NewMedication`].
///
/// Text fields are trimmed; `stock` and `unit_price` come back as numbers.
pub fn validate_medication(candidate: &MedicationCandidate) -> Result<NewMedication, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let name = errors.check(Field::Name, validate_name(text(candidate.name.as_ref())));
    let national_code = errors.check(
        Field::NationalCode,
        validate_national_code(text(candidate.national_code.as_ref())),
    );
    let lot = errors.check(Field::Lot, validate_lot(text(candidate.lot.as_ref())));
    let expiry_date = errors.check(
        Field::ExpiryDate,
        validate_expiry_date(text(candidate.expiry_date.as_ref())),
    );
    let stock = errors.check(Field::Stock, validate_stock(candidate.stock.as_ref()));
    let unit_price = errors.check(Field::UnitPrice, validate_unit_price(candidate.unit_price.as_ref()));

    match (name, national_code, lot, expiry_date, stock, unit_price) {
        (Some(name), Some(national_code), Some(lot), Some(expiry_date), Some(stock), Some(unit_price))
            if errors.is_empty() =>
        {
            Ok(NewMedication {
                name,
                national_code,
                lot,
                expiry_date,
                stock,
                unit_price,
            })
        }
        _ => Err(errors),
    }
}

/// Only JSON strings count as text; anything else is treated as blank
fn text(value: Option<&Value>) -> &str {
    match value {
        Some(Value::String(s)) => s,
        _ => "",
    }
}

pub fn validate_name(name: &str) -> Result<String, &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(NAME_REQUIRED);
    }
    Ok(trimmed.to_string())
}

/// Exactly six ASCII digits; leading zeros are significant
pub fn validate_national_code(code: &str) -> Result<String, &'static str> {
    if code.chars().count() != NATIONAL_CODE_LEN {
        return Err(NATIONAL_CODE_LENGTH);
    }
    if !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(NATIONAL_CODE_DIGITS);
    }
    Ok(code.to_string())
}

pub fn validate_lot(lot: &str) -> Result<String, &'static str> {
    let trimmed = lot.trim();
    if trimmed.is_empty() {
        return Err(LOT_REQUIRED);
    }
    Ok(trimmed.to_string())
}

pub fn validate_expiry_date(raw: &str) -> Result<String, &'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EXPIRY_DATE_REQUIRED);
    }
    parse_expiry_date(trimmed).map_err(|_| EXPIRY_DATE_MALFORMED)?;
    Ok(trimmed.to_string())
}

pub fn validate_stock(value: Option<&Value>) -> Result<u32, &'static str> {
    let number = match coerce_number(value) {
        Coerced::Number(n) => n,
        Coerced::Empty | Coerced::NotANumber => return Err(STOCK_NOT_A_NUMBER),
    };
    if !number.fract().is_zero() {
        return Err(STOCK_NOT_WHOLE);
    }
    if number < Decimal::ZERO {
        return Err(STOCK_NEGATIVE);
    }
    number.to_u32().ok_or(STOCK_NOT_A_NUMBER)
}

pub fn validate_unit_price(value: Option<&Value>) -> Result<Decimal, &'static str> {
    match coerce_number(value) {
        Coerced::Number(n) if n > Decimal::ZERO => Ok(n.normalize()),
        _ => Err(UNIT_PRICE_INVALID),
    }
}

/// Outcome of coercing a form value to a number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coerced {
    Empty,
    NotANumber,
    Number(Decimal),
}

/// Coerce a raw JSON value to a number: JSON numbers and numeric strings
/// convert, `null`, missing and blank strings are empty, everything else is
/// not a number.
pub fn coerce_number(value: Option<&Value>) -> Coerced {
    match value {
        None | Some(Value::Null) => Coerced::Empty,
        Some(Value::Number(n)) => parse_decimal(&n.to_string()),
        Some(Value::String(s)) if s.trim().is_empty() => Coerced::Empty,
        Some(Value::String(s)) => parse_decimal(s.trim()),
        Some(_) => Coerced::NotANumber,
    }
}

fn parse_decimal(text: &str) -> Coerced {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map(Coerced::Number)
        .unwrap_or(Coerced::NotANumber)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn candidate(value: Value) -> MedicationCandidate {
        MedicationCandidate::from_value(value)
    }

    fn valid() -> Value {
        json!({
            "name": "Ibuprofeno 600",
            "nationalCode": "123456",
            "lot": "LOTE-01",
            "expiryDate": "2026-10-10",
            "stock": 50,
            "unitPrice": 4.5
        })
    }

    #[test]
    fn test_valid_record_normalizes_numbers() {
        let mut raw = valid();
        raw["stock"] = json!("50");
        raw["unitPrice"] = json!(" 4.50 ");

        let med = validate_medication(&candidate(raw)).unwrap();
        assert_eq!(med.stock, 50);
        assert_eq!(med.unit_price, Decimal::from_str("4.5").unwrap());
        assert_eq!(med.national_code, "123456");
    }

    #[test]
    fn test_accepts_legacy_keys() {
        let raw = json!({
            "nombre": "Ibuprofeno 600",
            "cn": "123456",
            "lote": "LOTE-01",
            "fechaCaducidad": "2026-10-10",
            "stock": 50,
            "precio": 4.5
        });
        assert!(validate_medication(&candidate(raw)).is_ok());
    }

    #[test]
    fn test_national_code_rules() {
        assert_eq!(validate_national_code("12345"), Err(NATIONAL_CODE_LENGTH));
        assert_eq!(validate_national_code("1234567"), Err(NATIONAL_CODE_LENGTH));
        assert_eq!(validate_national_code("12345A"), Err(NATIONAL_CODE_DIGITS));
        assert_eq!(validate_national_code("012345"), Ok("012345".to_string()));
    }

    #[test]
    fn test_national_code_failure_is_field_specific() {
        let mut raw = valid();
        raw["nationalCode"] = json!("123");
        let errors = validate_medication(&candidate(raw)).unwrap_err();

        assert_eq!(errors.fields(), vec![Field::NationalCode]);
        assert_eq!(errors.first_message(), NATIONAL_CODE_LENGTH);
        assert_eq!(errors.to_string(), NATIONAL_CODE_LENGTH);
    }

    #[test]
    fn test_collects_every_failing_field() {
        let errors = validate_medication(&candidate(json!({}))).unwrap_err();
        assert_eq!(
            errors.fields(),
            vec![
                Field::Name,
                Field::NationalCode,
                Field::Lot,
                Field::ExpiryDate,
                Field::Stock,
                Field::UnitPrice
            ]
        );
        assert_eq!(errors.message_for(Field::Stock), Some(STOCK_NOT_A_NUMBER));
        assert_eq!(errors.message_for(Field::UnitPrice), Some(UNIT_PRICE_INVALID));
    }

    #[test]
    fn test_blank_text_fields_fail() {
        let mut raw = valid();
        raw["name"] = json!("   ");
        raw["lot"] = json!("");
        let errors = validate_medication(&candidate(raw)).unwrap_err();
        assert_eq!(errors.fields(), vec![Field::Name, Field::Lot]);
    }

    #[test]
    fn test_expiry_date_rules() {
        assert_eq!(validate_expiry_date(""), Err(EXPIRY_DATE_REQUIRED));
        assert_eq!(validate_expiry_date("2025-13-01"), Err(EXPIRY_DATE_MALFORMED));
        assert_eq!(validate_expiry_date("10/10/2026"), Err(EXPIRY_DATE_MALFORMED));
        assert_eq!(validate_expiry_date("2026-10-10"), Ok("2026-10-10".to_string()));
    }

    #[test]
    fn test_stock_coercion() {
        assert_eq!(validate_stock(Some(&json!(12))), Ok(12));
        assert_eq!(validate_stock(Some(&json!("7"))), Ok(7));
        assert_eq!(validate_stock(Some(&json!(0))), Ok(0));
        assert_eq!(validate_stock(Some(&json!(""))), Err(STOCK_NOT_A_NUMBER));
        assert_eq!(validate_stock(Some(&json!("abc"))), Err(STOCK_NOT_A_NUMBER));
        assert_eq!(validate_stock(None), Err(STOCK_NOT_A_NUMBER));
        assert_eq!(validate_stock(Some(&json!(2.5))), Err(STOCK_NOT_WHOLE));
        assert_eq!(validate_stock(Some(&json!(-1))), Err(STOCK_NEGATIVE));
    }

    #[test]
    fn test_unit_price_must_be_positive() {
        assert_eq!(
            validate_unit_price(Some(&json!("8.25"))),
            Ok(Decimal::from_str("8.25").unwrap())
        );
        assert_eq!(validate_unit_price(Some(&json!(0))), Err(UNIT_PRICE_INVALID));
        assert_eq!(validate_unit_price(Some(&json!(-3))), Err(UNIT_PRICE_INVALID));
        assert_eq!(validate_unit_price(Some(&json!(""))), Err(UNIT_PRICE_INVALID));
        assert_eq!(validate_unit_price(Some(&json!("x"))), Err(UNIT_PRICE_INVALID));
        assert_eq!(validate_unit_price(None), Err(UNIT_PRICE_INVALID));
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(Some(&Value::Null)), Coerced::Empty);
        assert_eq!(coerce_number(Some(&json!("  "))), Coerced::Empty);
        assert_eq!(coerce_number(Some(&json!(true))), Coerced::NotANumber);
        assert_eq!(coerce_number(Some(&json!([1]))), Coerced::NotANumber);
        assert_eq!(coerce_number(Some(&json!("1e2"))), Coerced::Number(Decimal::from(100)));
    }

    #[test]
    fn test_errors_serialize_as_list() {
        let mut raw = valid();
        raw["lot"] = json!("");
        let errors = validate_medication(&candidate(raw)).unwrap_err();
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, json!([{ "field": "lot", "message": LOT_REQUIRED }]));
    }
}
