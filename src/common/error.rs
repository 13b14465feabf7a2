// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;

// Nosso tipo de erro de domínio, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Contrato não encontrado")]
    ContractNotFound,

    #[error("Loja não encontrada")]
    StoreNotFound,

    #[error("Cargo não encontrado: {0}")]
    RoleNotFound(String),

    #[error("Assento não encontrado")]
    SeatNotFound,

    #[error("Usuário já possui assento neste contrato")]
    SeatAlreadyExists,

    #[error("Acesso negado")]
    AccessDenied,

    #[error("Permissão necessária: {0}")]
    PermissionDenied(String),

    #[error("Limite de lojas do contrato atingido ({0})")]
    StoreLimitReached(i32),

    #[error("Créditos de IA insuficientes")]
    InsufficientCredits,

    #[error("Violação de unicidade: {0}")]
    UniqueConstraintViolation(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    // Traduz o erro de domínio para a resposta HTTP, já no idioma do cliente.
    pub fn to_api_error(&self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let (status, key) = match self {
            AppError::ValidationError(errors) => {
                // Retorna todos os detalhes da validação, campo a campo.
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                return ApiError {
                    status: StatusCode::BAD_REQUEST,
                    error: i18n.message(&locale.0, "validation").to_string(),
                    details: Some(json!(details)),
                };
            }
            AppError::EmailAlreadyExists => (StatusCode::CONFLICT, "email_exists"),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid_credentials"),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token"),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "user_not_found"),
            AppError::ContractNotFound => (StatusCode::NOT_FOUND, "contract_not_found"),
            AppError::StoreNotFound => (StatusCode::NOT_FOUND, "store_not_found"),
            AppError::RoleNotFound(name) => {
                return ApiError {
                    status: StatusCode::NOT_FOUND,
                    error: i18n.message(&locale.0, "role_not_found").to_string(),
                    details: Some(json!({ "role": name })),
                };
            }
            AppError::SeatNotFound => (StatusCode::NOT_FOUND, "seat_not_found"),
            AppError::SeatAlreadyExists => (StatusCode::CONFLICT, "seat_exists"),
            AppError::AccessDenied => (StatusCode::FORBIDDEN, "access_denied"),
            AppError::PermissionDenied(slug) => {
                return ApiError {
                    status: StatusCode::FORBIDDEN,
                    error: i18n.message(&locale.0, "permission_denied").to_string(),
                    details: Some(json!({ "permission": slug })),
                };
            }
            AppError::StoreLimitReached(max) => {
                return ApiError {
                    status: StatusCode::CONFLICT,
                    error: i18n.message(&locale.0, "store_limit").to_string(),
                    details: Some(json!({ "maxAllowed": max })),
                };
            }
            AppError::InsufficientCredits => (StatusCode::PAYMENT_REQUIRED, "insufficient_credits"),
            AppError::UniqueConstraintViolation(constraint) => {
                return ApiError {
                    status: StatusCode::CONFLICT,
                    error: i18n.message(&locale.0, "unique_violation").to_string(),
                    details: Some(json!({ "constraint": constraint })),
                };
            }

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` loga a mensagem detalhada que o `thiserror` nos deu.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal")
            }
        };

        ApiError {
            status,
            error: i18n.message(&locale.0, key).to_string(),
            details: None,
        }
    }
}

// O "envelope" HTTP: status + mensagem já localizada.
// É o tipo de rejeição dos extratores e o retorno de erro dos handlers.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => Json(json!({ "error": self.error, "details": details })),
            None => Json(json!({ "error": self.error })),
        };
        (self.status, body).into_response()
    }
}
