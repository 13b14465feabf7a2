// src/db/analytics_repo.rs

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::analytics::{
    AccountSummary, CampaignStat, FlowStat, FormStat, RevenueSeriesEntry, SegmentStat,
};

// Leituras sobre as tabelas pré-agregadas de métricas.
// A escrita é do pipeline de ingestão; aqui é tudo somente leitura.
#[derive(Clone)]
pub struct AnalyticsRepository {
    pool: PgPool,
}

impl AnalyticsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // 1. Resumo Geral (os cards do topo do dashboard)
    pub async fn account_summary(
        &self,
        store_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<AccountSummary, AppError> {
        let summary = sqlx::query_as::<_, AccountSummary>(
            r#"
            SELECT
                COALESCE(SUM(total_revenue), 0)      AS total_revenue,
                COALESCE(SUM(attributed_revenue), 0) AS attributed_revenue,
                COALESCE(SUM(orders), 0)::bigint     AS orders,
                COALESCE(SUM(recipients), 0)::bigint AS recipients
            FROM account_metrics_daily
            WHERE store_id = $1 AND metric_date BETWEEN $2 AND $3
            "#,
        )
        .bind(store_id)
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;

        Ok(summary)
    }

    // 2. Gráfico de Linha (receita por dia)
    pub async fn revenue_series(
        &self,
        store_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<RevenueSeriesEntry>, AppError> {
        let data = sqlx::query_as::<_, RevenueSeriesEntry>(
            r#"
            SELECT
                metric_date AS date,
                SUM(total_revenue)      AS total_revenue,
                SUM(attributed_revenue) AS attributed_revenue
            FROM account_metrics_daily
            WHERE store_id = $1 AND metric_date BETWEEN $2 AND $3
            GROUP BY 1
            ORDER BY 1 ASC
            "#,
        )
        .bind(store_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(data)
    }

    // 3. Campanhas do período, mais recentes primeiro
    pub async fn campaigns(
        &self,
        store_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<CampaignStat>, AppError> {
        let data = sqlx::query_as::<_, CampaignStat>(
            r#"
            SELECT campaign_name, channel, send_date,
                   recipients, opens, clicks, conversions, revenue
            FROM campaign_stats
            WHERE store_id = $1 AND send_date BETWEEN $2 AND $3
            ORDER BY send_date DESC
            "#,
        )
        .bind(store_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(data)
    }

    // 4. Fluxos agregados por fluxo, ordenados por receita
    pub async fn flows(
        &self,
        store_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<FlowStat>, AppError> {
        let data = sqlx::query_as::<_, FlowStat>(
            r#"
            SELECT
                flow_id, flow_name,
                SUM(recipients)::bigint  AS recipients,
                SUM(opens)::bigint       AS opens,
                SUM(clicks)::bigint      AS clicks,
                SUM(conversions)::bigint AS conversions,
                SUM(revenue)             AS revenue
            FROM flow_stats
            WHERE store_id = $1 AND metric_date BETWEEN $2 AND $3
            GROUP BY flow_id, flow_name
            ORDER BY SUM(revenue) DESC
            "#,
        )
        .bind(store_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(data)
    }

    // 5. Segmentos: a última medição de cada segmento dentro do período
    pub async fn segments(
        &self,
        store_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<SegmentStat>, AppError> {
        let data = sqlx::query_as::<_, SegmentStat>(
            r#"
            SELECT DISTINCT ON (segment_id)
                segment_id, segment_name, metric_date, members, revenue
            FROM segment_stats
            WHERE store_id = $1 AND metric_date BETWEEN $2 AND $3
            ORDER BY segment_id, metric_date DESC
            "#,
        )
        .bind(store_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(data)
    }

    // 6. Formulários agregados no período
    pub async fn forms(
        &self,
        store_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<FormStat>, AppError> {
        let data = sqlx::query_as::<_, FormStat>(
            r#"
            SELECT
                form_id, form_name,
                SUM(views)::bigint   AS views,
                SUM(submits)::bigint AS submits
            FROM form_stats
            WHERE store_id = $1 AND metric_date BETWEEN $2 AND $3
            GROUP BY form_id, form_name
            ORDER BY SUM(submits) DESC
            "#,
        )
        .bind(store_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(data)
    }
}
