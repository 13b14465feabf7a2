// src/handlers/contract.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{PermBillingManage, RequirePermission},
        tenancy::ContractContext,
    },
    models::contract::{ConsumeCreditsPayload, CreateContractPayload},
};

// POST /api/contracts
#[utoipa::path(
    post,
    path = "/api/contracts",
    request_body = CreateContractPayload,
    tag = "Contracts",
    security(("api_jwt" = [])),
    responses((status = 201, body = crate::models::contract::Contract))
)]
pub async fn create_contract(
    State(app_state): State<AppState>,
    locale: Locale,
    // Precisamos do utilizador autenticado para o podermos tornar "dono"
    user: AuthenticatedUser,
    Json(payload): Json<CreateContractPayload>,
) -> Result<impl IntoResponse, ApiError> {
    // 1. Validar o payload
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    // 2. Chamar o Serviço (operação transacional: contrato + assento do dono)
    let contract = app_state
        .contract_service
        .create_contract_with_owner(&payload.name, &payload.billing_email, user.0.id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    // 3. Responder com Sucesso
    Ok((StatusCode::CREATED, Json(contract)))
}

// GET /api/contracts
#[utoipa::path(
    get,
    path = "/api/contracts",
    tag = "Contracts",
    security(("api_jwt" = [])),
    responses((status = 200, body = [crate::models::contract::Contract]))
)]
pub async fn list_my_contracts(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let contracts = app_state
        .contract_service
        .list_user_contracts(user.0.id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(contracts))
}

// POST /api/contracts/credits/consume
#[utoipa::path(
    post,
    path = "/api/contracts/credits/consume",
    request_body = ConsumeCreditsPayload,
    tag = "Contracts",
    security(("api_jwt" = [])),
    params(("x-contract-id" = String, Header, description = "Contrato em uso")),
    responses(
        (status = 200, description = "Saldo restante"),
        (status = 402, description = "Créditos insuficientes")
    )
)]
pub async fn consume_credits(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    contract: ContractContext,
    Json(payload): Json<ConsumeCreditsPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let balance = app_state
        .contract_service
        .consume_credits(contract.0, user.0.id, payload.credits, &payload.operation)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(serde_json::json!({ "balance": balance })))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddCreditsPayload {
    #[validate(range(min = 1, message = "A quantidade de créditos deve ser positiva."))]
    pub credits: i32,
}

// POST /api/contracts/credits
#[utoipa::path(
    post,
    path = "/api/contracts/credits",
    request_body = AddCreditsPayload,
    tag = "Contracts",
    security(("api_jwt" = [])),
    params(("x-contract-id" = String, Header, description = "Contrato em uso")),
    responses((status = 200, description = "Saldo atualizado"))
)]
pub async fn add_credits(
    State(app_state): State<AppState>,
    locale: Locale,
    contract: ContractContext,
    // Somente quem gerencia cobrança compra créditos
    _perm: RequirePermission<PermBillingManage>,
    Json(payload): Json<AddCreditsPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let balance = app_state
        .contract_service
        .add_credits(contract.0, payload.credits)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(serde_json::json!({ "balance": balance })))
}

// GET /api/contracts/credits/usage
#[utoipa::path(
    get,
    path = "/api/contracts/credits/usage",
    tag = "Contracts",
    security(("api_jwt" = [])),
    params(("x-contract-id" = String, Header, description = "Contrato em uso")),
    responses((status = 200, body = [crate::models::contract::AiCreditUsage]))
)]
pub async fn list_credit_usage(
    State(app_state): State<AppState>,
    locale: Locale,
    contract: ContractContext,
    _perm: RequirePermission<PermBillingManage>,
) -> Result<impl IntoResponse, ApiError> {
    let usage = app_state
        .contract_service
        .list_credit_usage(contract.0)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(usage))
}
