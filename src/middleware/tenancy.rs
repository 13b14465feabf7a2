// src/middleware/tenancy.rs

use axum::{
    extract::{FromRequestParts, State},
    http::{request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    common::{
        error::{ApiError, AppError},
        i18n::I18nStore,
    },
    config::AppState,
    middleware::i18n::Locale,
};

// O nome do nosso cabeçalho HTTP customizado
const CONTRACT_ID_HEADER: &str = "x-contract-id";

// O extrator de contexto de contrato.
// Armazena o UUID do contrato que o utilizador quer aceder.
#[derive(Debug, Clone, Copy)]
pub struct ContractContext(pub Uuid);

fn parse_contract_header(headers: &HeaderMap, locale: &Locale) -> Result<Uuid, ApiError> {
    let lang = locale.0.as_str();
    let i18n = I18nStore::new();

    let Some(value) = headers.get(CONTRACT_ID_HEADER) else {
        // Erro: o cabeçalho está em falta.
        return Err(ApiError {
            status: StatusCode::BAD_REQUEST,
            error: i18n.message(lang, "contract_header_missing").to_string(),
            details: None,
        });
    };

    let value_str = value.to_str().map_err(|_| ApiError {
        status: StatusCode::BAD_REQUEST,
        error: i18n.message(lang, "contract_header_invalid").to_string(),
        details: None,
    })?;

    Uuid::parse_str(value_str).map_err(|_| ApiError {
        status: StatusCode::BAD_REQUEST,
        error: i18n.message(lang, "contract_header_invalid").to_string(),
        details: None,
    })
}

impl<S> FromRequestParts<S> for ContractContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let locale = Locale::from_headers(&parts.headers);
        parse_contract_header(&parts.headers, &locale).map(ContractContext)
    }
}

// O middleware de tenancy: autentica E confirma que o usuário tem um
// assento ativo no contrato do cabeçalho (superusuário passa direto).
pub async fn contract_guard(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let locale = Locale::from_headers(request.headers());

    // 1. Autentica (Bearer)
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok());

    let Some(token) = auth_header.and_then(|h| h.strip_prefix("Bearer ")) else {
        return Err(AppError::InvalidToken.to_api_error(&locale, &app_state.i18n_store));
    };

    let user = app_state
        .auth_service
        .validate_token(token)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    // 2. Contexto do contrato
    let contract_id = parse_contract_header(request.headers(), &locale)?;

    // 3. Assento ativo (a verificação de autorização mais importante)
    if !user.is_super_admin() {
        let seat = app_state
            .seat_repo
            .find_active(user.id, contract_id)
            .await
            .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

        if seat.is_none() {
            return Err(AppError::AccessDenied.to_api_error(&locale, &app_state.i18n_store));
        }
    }

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
