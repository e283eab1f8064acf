//! Medication inventory service
//!
//! Create, update and delete validate first, then run one locked
//! load-modify-save cycle against the store. Listing returns the stored
//! collection as is; filtering and ordering happen on the client.

use std::sync::Arc;

use chrono::NaiveDate;
use shared::analytics::{aggregate, InventoryStats};
use shared::models::{Medication, MedicationCandidate};
use shared::report::{build_report, InventoryReport};
use shared::validation::validate_medication;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::storage::JsonFileStore;

const RESOURCE: &str = "Medication";

/// Service managing the medication collection
#[derive(Clone)]
pub struct MedicationService {
    store: Arc<JsonFileStore>,
}

impl MedicationService {
    /// Create a new MedicationService instance
    pub fn new(store: Arc<JsonFileStore>) -> Self {
        Self { store }
    }

    /// Full stored collection. An unreadable store is logged and reads as
    /// empty.
    pub async fn list(&self) -> Vec<Medication> {
        match self.store.load().await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("Failed to read inventory, serving empty list: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn create(&self, candidate: &MedicationCandidate) -> AppResult<Medication> {
        let new_medication = validate_medication(candidate)?;

        let created = self
            .store
            .modify(|records| {
                let id = fresh_id(records);
                let medication = new_medication.into_medication(id);
                records.push(medication.clone());
                Ok::<_, AppError>(medication)
            })
            .await?;

        tracing::info!(
            "Created medication {} ({}, lot {})",
            created.id,
            created.national_code,
            created.lot
        );
        Ok(created)
    }

    /// Replace every field of an existing record; the id is kept
    pub async fn update(&self, id: &str, candidate: &MedicationCandidate) -> AppResult<Medication> {
        let update = validate_medication(candidate)?;

        let updated = self
            .store
            .modify(|records| {
                let record = records
                    .iter_mut()
                    .find(|m| m.id == id)
                    .ok_or_else(|| AppError::NotFound(RESOURCE.to_string()))?;
                record.apply(update);
                Ok::<_, AppError>(record.clone())
            })
            .await?;

        tracing::info!("Updated medication {}", updated.id);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.store
            .modify(|records| {
                let before = records.len();
                records.retain(|m| m.id != id);
                if records.len() == before {
                    return Err(AppError::NotFound(RESOURCE.to_string()));
                }
                Ok(())
            })
            .await?;

        tracing::info!("Deleted medication {}", id);
        Ok(())
    }

    /// Dashboard statistics over the stored collection
    pub async fn stats(&self, reference: NaiveDate) -> InventoryStats {
        aggregate(&self.list().await, reference)
    }

    /// FEFO report over the stored collection
    pub async fn report(&self, reference: NaiveDate) -> InventoryReport {
        build_report(&self.list().await, reference)
    }
}

/// A v4 UUID not already used in the collection
fn fresh_id(records: &[Medication]) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if !records.iter().any(|m| m.id == id) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::validation::NATIONAL_CODE_LENGTH;
    use tempfile::TempDir;

    fn service() -> (MedicationService, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(JsonFileStore::new(dir.path().join("inventario.json")));
        (MedicationService::new(store), dir)
    }

    fn candidate(national_code: &str, expiry: &str, stock: u32) -> MedicationCandidate {
        MedicationCandidate::from_value(json!({
            "name": "Ibuprofeno 600",
            "nationalCode": national_code,
            "lot": "LOTE-01",
            "expiryDate": expiry,
            "stock": stock,
            "unitPrice": 4.5
        }))
    }

    #[tokio::test]
    async fn test_create_assigns_new_id() {
        let (service, _dir) = service();
        let first = service.create(&candidate("123456", "2026-10-10", 50)).await.unwrap();
        let second = service.create(&candidate("123456", "2026-10-10", 50)).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(service.list().await, vec![first, second]);
    }

    #[tokio::test]
    async fn test_invalid_candidate_is_not_stored() {
        let (service, _dir) = service();
        let err = service.create(&candidate("123", "2026-10-10", 1)).await.unwrap_err();

        match err {
            AppError::Validation(errors) => {
                assert_eq!(errors.first_message(), NATIONAL_CODE_LENGTH)
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(service.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_update_only_touches_target() {
        let (service, _dir) = service();
        let keep = service.create(&candidate("111111", "2026-01-01", 1)).await.unwrap();
        let target = service.create(&candidate("222222", "2026-01-01", 1)).await.unwrap();

        let updated = service
            .update(&target.id, &candidate("222222", "2027-01-01", 100))
            .await
            .unwrap();
        assert_eq!(updated.id, target.id);
        assert_eq!(updated.stock, 100);

        let records = service.list().await;
        assert_eq!(records[0], keep);
        assert_eq!(records[1], updated);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let (service, _dir) = service();
        let err = service
            .update("id-falso", &candidate("123456", "2026-10-10", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete() {
        let (service, _dir) = service();
        let created = service.create(&candidate("123456", "2026-10-10", 1)).await.unwrap();

        service.delete(&created.id).await.unwrap();
        assert!(service.list().await.is_empty());
        assert!(matches!(
            service.delete(&created.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_corrupt_store_lists_empty_but_refuses_writes() {
        let (service, dir) = service();
        std::fs::write(dir.path().join("inventario.json"), "garbage").unwrap();

        assert!(service.list().await.is_empty());
        let err = service.create(&candidate("123456", "2026-10-10", 1)).await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        let raw = std::fs::read_to_string(dir.path().join("inventario.json")).unwrap();
        assert_eq!(raw, "garbage");
    }
}
