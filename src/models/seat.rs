// src/models/seat.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Status do assento no contrato. Revogação é sempre "soft".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "seat_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Pending,
    Active,
    Suspended,
    Revoked,
}

// ---
// ContractSeat (A "Ponte" Usuário-Contrato)
// ---
// Liga um usuário a um contrato com um cargo padrão e, opcionalmente,
// uma lista de overrides por loja.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContractSeat {
    pub id: Uuid,
    pub contract_id: Uuid,
    pub user_id: Uuid,
    pub default_role_id: Uuid,

    // 'standard' para assentos criados junto com o contrato,
    // 'additional' para os criados por concessão direta de loja
    pub seat_type: String,

    pub status: SeatStatus,
    pub invited_by: Option<Uuid>,
    pub invitation_email: Option<String>,

    pub activated_at: Option<DateTime<Utc>>,
    pub suspended_at: Option<DateTime<Utc>>,
    #[schema(ignore)]
    pub suspended_by: Option<Uuid>,
    pub revoked_at: Option<DateTime<Utc>>,
    #[schema(ignore)]
    pub revoked_by: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Override de acesso por loja dentro de um assento.
// role_id NULL significa "usa o cargo padrão do assento".
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreAccess {
    pub seat_id: Uuid,
    pub store_id: Uuid,
    pub role_id: Option<Uuid>,
    pub granted_by: Option<Uuid>,
    pub granted_at: DateTime<Utc>,
}

// Assento com os dados do usuário e do cargo padrão, para listagem.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeatWithUser {
    pub id: Uuid,
    pub contract_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_email: String,
    pub default_role_id: Uuid,
    pub default_role_name: String,
    pub status: SeatStatus,
    pub invited_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

// Assento + overrides de loja, o formato da listagem de equipe.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeatDetail {
    #[serde(flatten)]
    pub seat: SeatWithUser,
    pub store_access: Vec<StoreAccess>,
}

// O payload para convidar um usuário para o contrato
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InviteSeatPayload {
    #[validate(email(message = "O e-mail do convidado é inválido."))]
    pub email: String,

    #[schema(example = "creator")]
    #[validate(length(min = 1, message = "O cargo é obrigatório."))]
    pub role: String,

    // Restringe o assento a estas lojas (IDs públicos). Vazio = todas.
    #[serde(default)]
    pub store_access: Vec<String>,
}

// O payload para trocar o cargo padrão de um assento
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSeatRolePayload {
    #[schema(example = "manager")]
    #[validate(length(min = 1, message = "O cargo é obrigatório."))]
    pub role: String,
}
