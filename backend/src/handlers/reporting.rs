//! Dashboard statistics and report export handlers

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use shared::analytics::{parse_expiry_date, today, InventoryStats};
use shared::report::ReportRow;

use crate::error::{AppError, AppResult};
use crate::services::{MedicationService, ReportingService};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    /// Reference date (`YYYY-MM-DD`), defaults to today
    pub today: Option<String>,
    pub format: Option<String>, // "json" or "csv"
}

impl ReportQuery {
    fn reference_date(&self) -> AppResult<NaiveDate> {
        match self.today.as_deref() {
            None | Some("") => Ok(today()),
            Some(raw) => parse_expiry_date(raw).map_err(|_| {
                AppError::BadRequest(format!("Invalid reference date: {}", raw))
            }),
        }
    }
}

/// Dashboard statistics
pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<InventoryStats>> {
    let reference = query.reference_date()?;
    let service = MedicationService::new(state.store.clone());
    Ok(Json(service.stats(reference).await))
}

/// FEFO inventory report, as JSON or CSV
pub async fn get_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Response> {
    let reference = query.reference_date()?;
    let service = MedicationService::new(state.store.clone());
    let report = service.report(reference).await;

    match query.format.as_deref() {
        None | Some("json") => Ok(Json(report).into_response()),
        Some("csv") => {
            let csv = ReportingService::export_to_csv(&report.rows, &ReportRow::COLUMNS)?;
            let disposition = format!("attachment; filename=\"{}.csv\"", report.file_stem());
            Ok((
                [
                    (header::CONTENT_TYPE, "text/csv".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                csv,
            )
                .into_response())
        }
        Some(other) => Err(AppError::BadRequest(format!(
            "Unsupported report format: {}",
            other
        ))),
    }
}
