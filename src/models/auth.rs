// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Papel de superusuário com passe-livre na resolução de permissões.
pub const SUPER_ADMIN: &str = "SUPER_ADMIN";

// Representa um usuário vindo do banco de dados.
// Carrega as três gerações de autorização em paralelo:
// legacy_store_roles (ger. 1), store_permissions (ger. 2) e active_seats
// (denormalização da ger. 3, os assentos de contrato).
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    pub is_super_user: bool,
    pub super_user_role: Option<String>,

    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub legacy_store_roles: Json<Vec<LegacyStoreRole>>,

    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub store_permissions: Json<Vec<StorePermissionEntry>>,

    #[schema(value_type = Vec<ActiveSeatRef>)]
    pub active_seats: Json<Vec<ActiveSeatRef>>,

    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub reset_password_token: Option<String>,
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub reset_password_expires: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_super_admin(&self) -> bool {
        self.is_super_user || self.super_user_role.as_deref() == Some(SUPER_ADMIN)
    }
}

// Geração 1: papel gravado direto no documento do usuário.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LegacyStoreRole {
    pub store_id: Uuid,
    pub store_public_id: Option<String>,
    pub role: String, // owner, admin, creator, member, editor
    #[serde(default)]
    pub permissions: Vec<String>, // nomes legados (canEditStore, ...)
    pub joined_at: Option<DateTime<Utc>>,
    pub invited_by: Option<Uuid>,
}

// Geração 2: entrada de store_permissions (papel + proveniência).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StorePermissionEntry {
    pub store_id: Uuid,
    pub role: String,
    pub granted_by: Option<Uuid>,
    pub granted_at: Option<DateTime<Utc>>,
}

// Denormalização dos assentos ativos para leitura rápida no login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSeatRef {
    pub contract_id: Uuid,
    pub contract_name: String,
    pub seat_id: Uuid,
}

// Dados para registro de um novo usuário
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUserPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password_hash: "x".into(),
            is_super_user: false,
            super_user_role: None,
            legacy_store_roles: Json(vec![]),
            store_permissions: Json(vec![]),
            active_seats: Json(vec![]),
            reset_password_token: None,
            reset_password_expires: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn super_admin_by_flag_or_role() {
        let mut user = base_user();
        assert!(!user.is_super_admin());

        user.is_super_user = true;
        assert!(user.is_super_admin());

        user.is_super_user = false;
        user.super_user_role = Some(SUPER_ADMIN.into());
        assert!(user.is_super_admin());

        user.super_user_role = Some("TECHNICAL_SUPPORT".into());
        assert!(!user.is_super_admin());
    }

    #[test]
    fn password_hash_never_serialized() {
        let user = base_user();
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
    }
}
