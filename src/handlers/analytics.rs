// src/handlers/analytics.rs

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::analytics::AnalyticsQuery,
};

// GET /api/analytics/summary
#[utoipa::path(
    get,
    path = "/api/analytics/summary",
    tag = "Analytics",
    security(("api_jwt" = [])),
    params(AnalyticsQuery),
    responses(
        (status = 200, body = crate::models::analytics::AccountSummary),
        (status = 403, description = "Sem permissão canViewAnalytics")
    )
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Query(query): Query<AnalyticsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = app_state
        .analytics_service
        .summary(user.0.id, &query.store, query.from, query.to)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(summary))
}

// GET /api/analytics/revenue
#[utoipa::path(
    get,
    path = "/api/analytics/revenue",
    tag = "Analytics",
    security(("api_jwt" = [])),
    params(AnalyticsQuery),
    responses((status = 200, body = [crate::models::analytics::RevenueSeriesEntry]))
)]
pub async fn get_revenue_series(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Query(query): Query<AnalyticsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let series = app_state
        .analytics_service
        .revenue_series(user.0.id, &query.store, query.from, query.to)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(series))
}

// GET /api/analytics/campaigns
#[utoipa::path(
    get,
    path = "/api/analytics/campaigns",
    tag = "Analytics",
    security(("api_jwt" = [])),
    params(AnalyticsQuery),
    responses((status = 200, body = [crate::models::analytics::CampaignStat]))
)]
pub async fn get_campaigns(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Query(query): Query<AnalyticsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let campaigns = app_state
        .analytics_service
        .campaigns(user.0.id, &query.store, query.from, query.to)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(campaigns))
}

// GET /api/analytics/flows
#[utoipa::path(
    get,
    path = "/api/analytics/flows",
    tag = "Analytics",
    security(("api_jwt" = [])),
    params(AnalyticsQuery),
    responses((status = 200, body = [crate::models::analytics::FlowStat]))
)]
pub async fn get_flows(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Query(query): Query<AnalyticsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let flows = app_state
        .analytics_service
        .flows(user.0.id, &query.store, query.from, query.to)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(flows))
}

// GET /api/analytics/segments
#[utoipa::path(
    get,
    path = "/api/analytics/segments",
    tag = "Analytics",
    security(("api_jwt" = [])),
    params(AnalyticsQuery),
    responses((status = 200, body = [crate::models::analytics::SegmentStat]))
)]
pub async fn get_segments(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Query(query): Query<AnalyticsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let segments = app_state
        .analytics_service
        .segments(user.0.id, &query.store, query.from, query.to)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(segments))
}

// GET /api/analytics/forms
#[utoipa::path(
    get,
    path = "/api/analytics/forms",
    tag = "Analytics",
    security(("api_jwt" = [])),
    params(AnalyticsQuery),
    responses((status = 200, body = [crate::models::analytics::FormStat]))
)]
pub async fn get_forms(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Query(query): Query<AnalyticsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let forms = app_state
        .analytics_service
        .forms(user.0.id, &query.store, query.from, query.to)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(forms))
}
