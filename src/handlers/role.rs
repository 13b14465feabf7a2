// src/handlers/role.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{PermTeamManageRoles, RequirePermission},
        tenancy::ContractContext,
    },
    models::role::CreateRolePayload,
};

// POST /api/contracts/roles
#[utoipa::path(
    post,
    path = "/api/contracts/roles",
    request_body = CreateRolePayload,
    tag = "RBAC",
    security(("api_jwt" = [])),
    params(("x-contract-id" = String, Header, description = "Contrato em uso")),
    responses(
        (status = 201, body = crate::models::role::Role),
        (status = 409, description = "Nome de cargo já em uso")
    )
)]
pub async fn create_role(
    State(app_state): State<AppState>,
    locale: Locale,
    contract: ContractContext,
    _perm: RequirePermission<PermTeamManageRoles>,
    Json(payload): Json<CreateRolePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let role = app_state
        .role_service
        .create_custom_role(
            contract.0,
            &payload.name,
            &payload.display_name,
            payload.description.as_deref(),
            payload.level,
            &payload.permissions,
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(role)))
}

// GET /api/contracts/roles
#[utoipa::path(
    get,
    path = "/api/contracts/roles",
    tag = "RBAC",
    security(("api_jwt" = [])),
    params(("x-contract-id" = String, Header, description = "Contrato em uso")),
    responses((status = 200, body = [crate::models::role::Role]))
)]
pub async fn list_roles(
    State(app_state): State<AppState>,
    locale: Locale,
    contract: ContractContext,
) -> Result<impl IntoResponse, ApiError> {
    let roles = app_state
        .role_service
        .list_roles(contract.0)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(roles))
}

// GET /api/permissions (para o frontend saber o que mostrar na tela)
#[utoipa::path(
    get,
    path = "/api/permissions",
    tag = "RBAC",
    responses((status = 200, body = [crate::models::role::PermissionCatalogEntry]))
)]
pub async fn list_permissions(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(app_state.role_service.permission_catalog()))
}
