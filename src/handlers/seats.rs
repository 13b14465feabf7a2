// src/handlers/seats.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{PermTeamInvite, PermTeamManageRoles, PermTeamRemove, RequirePermission},
        tenancy::ContractContext,
    },
    models::seat::{InviteSeatPayload, UpdateSeatRolePayload},
};

// GET /api/contracts/seats
#[utoipa::path(
    get,
    path = "/api/contracts/seats",
    tag = "Seats",
    security(("api_jwt" = [])),
    params(("x-contract-id" = String, Header, description = "Contrato em uso")),
    responses((status = 200, body = [crate::models::seat::SeatDetail]))
)]
pub async fn list_seats(
    State(app_state): State<AppState>,
    locale: Locale,
    contract: ContractContext,
) -> Result<impl IntoResponse, ApiError> {
    let seats = app_state
        .contract_service
        .list_seats(contract.0)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(seats))
}

// POST /api/contracts/seats
#[utoipa::path(
    post,
    path = "/api/contracts/seats",
    request_body = InviteSeatPayload,
    tag = "Seats",
    security(("api_jwt" = [])),
    params(("x-contract-id" = String, Header, description = "Contrato em uso")),
    responses(
        (status = 201, body = crate::models::seat::ContractSeat),
        (status = 404, description = "Usuário ou cargo não encontrado"),
        (status = 409, description = "Assento já existe")
    )
)]
pub async fn invite_seat(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    contract: ContractContext,
    _perm: RequirePermission<PermTeamInvite>,
    Json(payload): Json<InviteSeatPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let seat = app_state
        .contract_service
        .invite_seat(
            contract.0,
            user.0.id,
            &payload.email,
            &payload.role,
            &payload.store_access,
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(seat)))
}

// PUT /api/contracts/seats/{seat_id}
#[utoipa::path(
    put,
    path = "/api/contracts/seats/{seat_id}",
    request_body = UpdateSeatRolePayload,
    tag = "Seats",
    security(("api_jwt" = [])),
    params(
        ("seat_id" = Uuid, Path, description = "ID do assento"),
        ("x-contract-id" = String, Header, description = "Contrato em uso")
    ),
    responses((status = 200, body = crate::models::seat::ContractSeat))
)]
pub async fn update_seat_role(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    contract: ContractContext,
    _perm: RequirePermission<PermTeamManageRoles>,
    Path(seat_id): Path<Uuid>,
    Json(payload): Json<UpdateSeatRolePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let seat = app_state
        .contract_service
        .update_seat_role(contract.0, seat_id, &payload.role, user.0.id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(seat))
}

// DELETE /api/contracts/seats/{seat_id}
#[utoipa::path(
    delete,
    path = "/api/contracts/seats/{seat_id}",
    tag = "Seats",
    security(("api_jwt" = [])),
    params(
        ("seat_id" = Uuid, Path, description = "ID do assento"),
        ("x-contract-id" = String, Header, description = "Contrato em uso")
    ),
    responses((status = 204, description = "Assento revogado"))
)]
pub async fn revoke_seat(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    contract: ContractContext,
    _perm: RequirePermission<PermTeamRemove>,
    Path(seat_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .contract_service
        .revoke_seat(contract.0, seat_id, user.0.id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
