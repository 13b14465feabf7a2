// src/models/analytics.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// 1. Resumo da Conta (Os Cards do Topo)
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub total_revenue: Decimal,      // Receita total no período
    pub attributed_revenue: Decimal, // Receita atribuída a campanhas/fluxos
    pub orders: i64,
    pub recipients: i64,
}

// 2. Gráfico de Linha (receita por dia)
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSeriesEntry {
    pub date: NaiveDate,
    pub total_revenue: Option<Decimal>,
    pub attributed_revenue: Option<Decimal>,
}

// 3. Campanhas (linhas pré-agregadas por envio)
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignStat {
    pub campaign_name: String,
    #[schema(example = "email")]
    pub channel: String,
    pub send_date: NaiveDate,
    pub recipients: i32,
    pub opens: i32,
    pub clicks: i32,
    pub conversions: i32,
    pub revenue: Decimal,
}

// 4. Fluxos (agregados por fluxo no período)
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlowStat {
    pub flow_id: String,
    pub flow_name: String,
    pub recipients: Option<i64>,
    pub opens: Option<i64>,
    pub clicks: Option<i64>,
    pub conversions: Option<i64>,
    pub revenue: Option<Decimal>,
}

// 5. Segmentos (última medição de cada segmento no período)
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SegmentStat {
    pub segment_id: String,
    pub segment_name: String,
    pub metric_date: NaiveDate,
    pub members: i32,
    pub revenue: Decimal,
}

// 6. Formulários (agregados por formulário no período)
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormStat {
    pub form_id: String,
    pub form_name: String,
    pub views: Option<i64>,
    pub submits: Option<i64>,
}

// Parâmetros comuns das rotas de analytics.
// `store` é o ID público da loja; o período padrão são os últimos 30 dias.
#[derive(Debug, Deserialize, IntoParams)]
pub struct AnalyticsQuery {
    pub store: String,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}
