// src/services/analytics_service.rs

use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AnalyticsRepository, StoreRepository},
    models::analytics::{
        AccountSummary, CampaignStat, FlowStat, FormStat, RevenueSeriesEntry, SegmentStat,
    },
    services::permission_service::PermissionService,
};

// Janela padrão das consultas quando o cliente não informa o período.
const DEFAULT_RANGE_DAYS: i64 = 30;

#[derive(Clone)]
pub struct AnalyticsService {
    analytics_repo: AnalyticsRepository,
    store_repo: StoreRepository,
    permissions: PermissionService,
}

impl AnalyticsService {
    pub fn new(
        analytics_repo: AnalyticsRepository,
        store_repo: StoreRepository,
        permissions: PermissionService,
    ) -> Self {
        Self {
            analytics_repo,
            store_repo,
            permissions,
        }
    }

    // Resolve a loja e exige canViewAnalytics antes de qualquer consulta.
    async fn authorize_store(
        &self,
        user_id: Uuid,
        store_public_id: &str,
    ) -> Result<Uuid, AppError> {
        let store = self
            .store_repo
            .find_by_public_id(store_public_id)
            .await?
            .ok_or(AppError::StoreNotFound)?;

        let allowed = self
            .permissions
            .user_has_permission(user_id, store.id, "canViewAnalytics")
            .await?;
        if !allowed {
            return Err(AppError::PermissionDenied("canViewAnalytics".into()));
        }

        Ok(store.id)
    }

    fn resolve_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> (NaiveDate, NaiveDate) {
        let to = to.unwrap_or_else(|| Utc::now().date_naive());
        let from = from.unwrap_or(to - Duration::days(DEFAULT_RANGE_DAYS));
        (from, to)
    }

    pub async fn summary(
        &self,
        user_id: Uuid,
        store_public_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<AccountSummary, AppError> {
        let store_id = self.authorize_store(user_id, store_public_id).await?;
        let (from, to) = Self::resolve_range(from, to);
        self.analytics_repo.account_summary(store_id, from, to).await
    }

    pub async fn revenue_series(
        &self,
        user_id: Uuid,
        store_public_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<RevenueSeriesEntry>, AppError> {
        let store_id = self.authorize_store(user_id, store_public_id).await?;
        let (from, to) = Self::resolve_range(from, to);
        self.analytics_repo.revenue_series(store_id, from, to).await
    }

    pub async fn campaigns(
        &self,
        user_id: Uuid,
        store_public_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<CampaignStat>, AppError> {
        let store_id = self.authorize_store(user_id, store_public_id).await?;
        let (from, to) = Self::resolve_range(from, to);
        self.analytics_repo.campaigns(store_id, from, to).await
    }

    pub async fn flows(
        &self,
        user_id: Uuid,
        store_public_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<FlowStat>, AppError> {
        let store_id = self.authorize_store(user_id, store_public_id).await?;
        let (from, to) = Self::resolve_range(from, to);
        self.analytics_repo.flows(store_id, from, to).await
    }

    pub async fn segments(
        &self,
        user_id: Uuid,
        store_public_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<SegmentStat>, AppError> {
        let store_id = self.authorize_store(user_id, store_public_id).await?;
        let (from, to) = Self::resolve_range(from, to);
        self.analytics_repo.segments(store_id, from, to).await
    }

    pub async fn forms(
        &self,
        user_id: Uuid,
        store_public_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<FormStat>, AppError> {
        let store_id = self.authorize_store(user_id, store_public_id).await?;
        let (from, to) = Self::resolve_range(from, to);
        self.analytics_repo.forms(store_id, from, to).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_range_is_thirty_days() {
        let to = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
        let (from, resolved_to) = AnalyticsService::resolve_range(None, Some(to));
        assert_eq!(resolved_to, to);
        assert_eq!(from, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
    }

    #[test]
    fn explicit_range_is_kept() {
        let from = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        assert_eq!(
            AnalyticsService::resolve_range(Some(from), Some(to)),
            (from, to)
        );
    }
}
