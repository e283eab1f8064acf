//! Report export

use serde::Serialize;

use crate::error::{AppError, AppResult};

pub struct ReportingService;

impl ReportingService {
    /// Export rows to CSV. The header comes from the field names, or from
    /// `columns` when there are no rows to derive it from.
    pub fn export_to_csv<T: Serialize>(data: &[T], columns: &[&str]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        if data.is_empty() {
            wtr.write_record(columns)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
    }
}
