// src/handlers/store.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale, tenancy::ContractContext},
    models::store::CreateStorePayload,
};

// POST /api/stores
#[utoipa::path(
    post,
    path = "/api/stores",
    request_body = CreateStorePayload,
    tag = "Stores",
    security(("api_jwt" = [])),
    params(("x-contract-id" = String, Header, description = "Contrato em uso")),
    responses(
        (status = 201, body = crate::models::store::Store),
        (status = 409, description = "Limite de lojas atingido")
    )
)]
pub async fn create_store(
    State(app_state): State<AppState>,
    locale: Locale,
    contract: ContractContext,
    Json(payload): Json<CreateStorePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let store = app_state
        .store_service
        .create_store(
            contract.0,
            &payload.name,
            payload.url.as_deref(),
            payload.parent_store_public_id.as_deref(),
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(store)))
}

// GET /api/stores
#[utoipa::path(
    get,
    path = "/api/stores",
    tag = "Stores",
    security(("api_jwt" = [])),
    params(("x-contract-id" = String, Header, description = "Contrato em uso")),
    responses((status = 200, body = [crate::models::store::Store]))
)]
pub async fn list_stores(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    contract: ContractContext,
) -> Result<impl IntoResponse, ApiError> {
    let stores = app_state
        .store_service
        .list_stores(&user.0, contract.0)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(stores))
}

// DELETE /api/stores/{store_public_id}
#[utoipa::path(
    delete,
    path = "/api/stores/{store_public_id}",
    tag = "Stores",
    security(("api_jwt" = [])),
    params(("store_public_id" = String, Path, description = "ID público da loja")),
    responses(
        (status = 204, description = "Loja desativada"),
        (status = 403, description = "Sem permissão canDeleteStore")
    )
)]
pub async fn delete_store(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(store_public_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .store_service
        .delete_store(user.0.id, &store_public_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
