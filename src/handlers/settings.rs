// src/handlers/settings.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::store::UpdateSettingsPayload,
};

// GET /api/stores/{store_public_id}/settings
#[utoipa::path(
    get,
    path = "/api/stores/{store_public_id}/settings",
    tag = "Settings",
    security(("api_jwt" = [])),
    params(("store_public_id" = String, Path, description = "ID público da loja")),
    responses((status = 200, body = crate::models::store::StoreSettings))
)]
pub async fn get_settings(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(store_public_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let settings = app_state
        .store_service
        .get_settings(user.0.id, &store_public_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(settings)))
}

// PUT /api/stores/{store_public_id}/settings
#[utoipa::path(
    put,
    path = "/api/stores/{store_public_id}/settings",
    request_body = UpdateSettingsPayload,
    tag = "Settings",
    security(("api_jwt" = [])),
    params(("store_public_id" = String, Path, description = "ID público da loja")),
    responses(
        (status = 200, body = crate::models::store::StoreSettings),
        (status = 403, description = "Sem permissão canEditStore")
    )
)]
pub async fn update_settings(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(store_public_id): Path<String>,
    Json(payload): Json<UpdateSettingsPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = app_state
        .store_service
        .update_settings(
            user.0.id,
            &store_public_id,
            payload.timezone.as_deref(),
            payload.currency.as_deref(),
            payload.conversion_rate,
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(updated)))
}
