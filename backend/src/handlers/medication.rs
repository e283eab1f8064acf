//! HTTP handlers for the medication inventory endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use shared::models::{Medication, MedicationCandidate};

use crate::error::AppResult;
use crate::services::MedicationService;
use crate::AppState;

/// List every stored medication
pub async fn list_medications(State(state): State<AppState>) -> Json<Vec<Medication>> {
    let service = MedicationService::new(state.store.clone());
    Json(service.list().await)
}

/// Create a medication
pub async fn create_medication(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Medication>)> {
    let Json(body) = payload?;
    let service = MedicationService::new(state.store.clone());
    let medication = service.create(&MedicationCandidate::from_value(body)).await?;
    Ok((StatusCode::CREATED, Json(medication)))
}

/// Replace a medication's fields
pub async fn update_medication(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Medication>> {
    let Json(body) = payload?;
    let service = MedicationService::new(state.store.clone());
    let medication = service
        .update(&id, &MedicationCandidate::from_value(body))
        .await?;
    Ok(Json(medication))
}

/// Delete a medication
pub async fn delete_medication(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let service = MedicationService::new(state.store.clone());
    service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
