use serde::{Deserialize, Serialize};

use crate::cache::{CacheKey, ProjectionCache};
use crate::error::AppResult;
use crate::services::context::RequestContext;
use crate::services::workforce::WorkforceRecords;
use crate::store::WorkforceStore;
use crate::utilization::{DashboardKpis, EntityRollup, entity_rollups, project_kpis};

/// Everything the dashboard shows for one reference date, cached as a unit.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DashboardSnapshot {
    pub kpis: DashboardKpis,
    pub entities: Vec<EntityRollup>,
}

pub struct DashboardService;

impl DashboardService {
    pub async fn snapshot(
        store: &dyn WorkforceStore,
        cache: &ProjectionCache,
        ctx: &RequestContext,
    ) -> AppResult<DashboardSnapshot> {
        let reference_date = ctx.reference_date;
        cache
            .get_or_load(CacheKey::dashboard(reference_date), || async move {
                let records = WorkforceRecords::load(store).await?;
                let employees = records.project_counted(reference_date);
                let projects = records.projects_as_of(reference_date);
                Ok(DashboardSnapshot {
                    kpis: project_kpis(&employees, &projects),
                    entities: entity_rollups(&employees, &projects),
                })
            })
            .await
    }

    pub async fn kpis(
        store: &dyn WorkforceStore,
        cache: &ProjectionCache,
        ctx: &RequestContext,
    ) -> AppResult<DashboardKpis> {
        Ok(Self::snapshot(store, cache, ctx).await?.kpis)
    }

    pub async fn entities(
        store: &dyn WorkforceStore,
        cache: &ProjectionCache,
        ctx: &RequestContext,
    ) -> AppResult<Vec<EntityRollup>> {
        Ok(Self::snapshot(store, cache, ctx).await?.entities)
    }
}
