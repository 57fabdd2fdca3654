use tracing::info;
use uuid::Uuid;

use crate::cache::{CacheKey, ProjectionCache, RecordKind, WriteScope};
use crate::db::models::{Certification, NewCertification, certification::CreateCertificationRequest};
use crate::error::{AppError, AppResult};
use crate::services::employees_service::EmployeesService;
use crate::store::WorkforceStore;
use crate::validation::certification::validate_create_certification;

pub struct CertificationsService;

impl CertificationsService {
    /// Soonest expiry first; certifications that never expire come last.
    pub async fn list(
        store: &dyn WorkforceStore,
        cache: &ProjectionCache,
        employee_id: Uuid,
    ) -> AppResult<Vec<Certification>> {
        cache
            .get_or_load(CacheKey::certifications(employee_id), || async move {
                EmployeesService::require(store, employee_id).await?;
                store.list_certifications(employee_id).await
            })
            .await
    }

    pub async fn create(
        store: &dyn WorkforceStore,
        cache: &ProjectionCache,
        employee_id: Uuid,
        req: CreateCertificationRequest,
    ) -> AppResult<Certification> {
        validate_create_certification(&req)?;
        EmployeesService::require(store, employee_id).await?;

        let certification = store
            .insert_certification(NewCertification {
                employee_id,
                name: req.name.trim().to_string(),
                issuer: req.issuer.map(|i| i.trim().to_string()),
                valid_until: req.valid_until,
            })
            .await?;
        cache
            .invalidate(RecordKind::Certification, WriteScope::employee(employee_id))
            .await;
        info!(employee_id = %employee_id, certification_id = %certification.id, "certification added");
        Ok(certification)
    }

    pub async fn delete(
        store: &dyn WorkforceStore,
        cache: &ProjectionCache,
        certification_id: Uuid,
    ) -> AppResult<()> {
        let certification = store
            .find_certification(certification_id)
            .await?
            .ok_or_else(|| AppError::not_found("Certification"))?;
        store.delete_certification(certification_id).await?;
        cache
            .invalidate(
                RecordKind::Certification,
                WriteScope::employee(certification.employee_id),
            )
            .await;
        info!(certification_id = %certification_id, "certification removed");
        Ok(())
    }
}
