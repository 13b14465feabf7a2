// src/handlers/permissions.rs
//
// A superfície HTTP do núcleo de resolução: snapshot, concessão, troca de
// cargo, revogação e verificação em lote, sempre por loja.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::store::Store,
};

// Quem mexe em acesso de loja precisa de canManageUsers nela.
async fn require_manage_users(
    app_state: &AppState,
    locale: &Locale,
    actor_id: Uuid,
    store: &Store,
) -> Result<(), ApiError> {
    let allowed = app_state
        .permission_service
        .user_has_permission(actor_id, store.id, "canManageUsers")
        .await
        .map_err(|e| e.to_api_error(locale, &app_state.i18n_store))?;

    if !allowed {
        return Err(AppError::PermissionDenied("canManageUsers".into())
            .to_api_error(locale, &app_state.i18n_store));
    }
    Ok(())
}

async fn resolve_store(
    app_state: &AppState,
    locale: &Locale,
    store_public_id: &str,
) -> Result<Store, ApiError> {
    app_state
        .store_service
        .find_by_public_id(store_public_id)
        .await
        .map_err(|e| e.to_api_error(locale, &app_state.i18n_store))
}

// GET /api/stores/{store_public_id}/permissions
#[utoipa::path(
    get,
    path = "/api/stores/{store_public_id}/permissions",
    tag = "Permissions",
    security(("api_jwt" = [])),
    params(("store_public_id" = String, Path, description = "ID público da loja")),
    responses(
        (status = 200, body = crate::models::role::PermissionSnapshot),
        (status = 404, description = "Sem acesso resolvível para esta loja")
    )
)]
pub async fn get_my_permissions(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(store_public_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let store = resolve_store(&app_state, &locale, &store_public_id).await?;

    let snapshot = app_state
        .permission_service
        .get_user_store_permissions(user.0.id, store.id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    match snapshot {
        Some(snapshot) => Ok(Json(snapshot).into_response()),
        None => Err(AppError::AccessDenied.to_api_error(&locale, &app_state.i18n_store)),
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrantAccessPayload {
    pub user_id: Uuid,

    #[validate(length(min = 1, message = "O cargo é obrigatório."))]
    #[schema(example = "creator")]
    pub role: String,
}

// POST /api/stores/{store_public_id}/permissions
#[utoipa::path(
    post,
    path = "/api/stores/{store_public_id}/permissions",
    request_body = GrantAccessPayload,
    tag = "Permissions",
    security(("api_jwt" = [])),
    params(("store_public_id" = String, Path, description = "ID público da loja")),
    responses(
        (status = 201, body = crate::models::role::PermissionSnapshot),
        (status = 403, description = "Sem permissão canManageUsers")
    )
)]
pub async fn grant_access(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(store_public_id): Path<String>,
    Json(payload): Json<GrantAccessPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let store = resolve_store(&app_state, &locale, &store_public_id).await?;
    require_manage_users(&app_state, &locale, user.0.id, &store).await?;

    let snapshot = app_state
        .permission_service
        .grant_store_access(payload.user_id, store.id, &payload.role, user.0.id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(snapshot)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRolePayload {
    #[validate(length(min = 1, message = "O cargo é obrigatório."))]
    #[schema(example = "manager")]
    pub role: String,
}

// PUT /api/stores/{store_public_id}/permissions/{user_id}
#[utoipa::path(
    put,
    path = "/api/stores/{store_public_id}/permissions/{user_id}",
    request_body = UpdateRolePayload,
    tag = "Permissions",
    security(("api_jwt" = [])),
    params(
        ("store_public_id" = String, Path, description = "ID público da loja"),
        ("user_id" = Uuid, Path, description = "Usuário alvo")
    ),
    responses((status = 200, body = crate::models::role::PermissionSnapshot))
)]
pub async fn update_role(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path((store_public_id, target_user_id)): Path<(String, Uuid)>,
    Json(payload): Json<UpdateRolePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let store = resolve_store(&app_state, &locale, &store_public_id).await?;
    require_manage_users(&app_state, &locale, user.0.id, &store).await?;

    let snapshot = app_state
        .permission_service
        .update_user_role(target_user_id, store.id, &payload.role, user.0.id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(snapshot))
}

// DELETE /api/stores/{store_public_id}/permissions/{user_id}
#[utoipa::path(
    delete,
    path = "/api/stores/{store_public_id}/permissions/{user_id}",
    tag = "Permissions",
    security(("api_jwt" = [])),
    params(
        ("store_public_id" = String, Path, description = "ID público da loja"),
        ("user_id" = Uuid, Path, description = "Usuário alvo")
    ),
    responses((status = 204, description = "Acesso revogado"))
)]
pub async fn revoke_access(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path((store_public_id, target_user_id)): Path<(String, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    let store = resolve_store(&app_state, &locale, &store_public_id).await?;
    require_manage_users(&app_state, &locale, user.0.id, &store).await?;

    app_state
        .permission_service
        .revoke_store_access(target_user_id, store.id, user.0.id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckPermissionsPayload {
    #[schema(example = json!(["canEditStore", "canViewAnalytics"]))]
    pub permissions: Vec<String>,
}

// POST /api/stores/{store_public_id}/permissions/check
#[utoipa::path(
    post,
    path = "/api/stores/{store_public_id}/permissions/check",
    request_body = CheckPermissionsPayload,
    tag = "Permissions",
    security(("api_jwt" = [])),
    params(("store_public_id" = String, Path, description = "ID público da loja")),
    responses((status = 200, description = "Mapa permissão -> permitido"))
)]
pub async fn check_permissions(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(store_public_id): Path<String>,
    Json(payload): Json<CheckPermissionsPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let store = resolve_store(&app_state, &locale, &store_public_id).await?;

    let results = app_state
        .permission_service
        .check_permissions(user.0.id, store.id, &payload.permissions)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(results))
}
