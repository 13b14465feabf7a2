// src/models/store.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// ---
// 1. Store (A "Loja")
// ---
// O recurso de tenancy: pertence a exatamente um contrato e pode ter uma
// loja matriz (hierarquia de franquias).
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: Uuid,

    #[schema(example = "aB3xY9z")]
    pub public_id: String,

    pub contract_id: Uuid,
    pub parent_store_id: Option<Uuid>,

    #[schema(example = "Acme Outdoors")]
    pub name: String,

    #[schema(example = "https://acme-outdoors.com")]
    pub url: Option<String>,

    // Derivado dos assentos do contrato; nunca editado diretamente.
    #[schema(value_type = Vec<TeamMember>)]
    pub team_members: Json<Vec<TeamMember>>,

    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(ignore)]
    pub deleted_by: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// 2. TeamMember (membro denormalizado da equipe)
// ---
// Recalculado a partir dos assentos sempre que acesso muda.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    #[schema(example = "manager")]
    pub role: String,
    pub granted_at: Option<DateTime<Utc>>,
}

// ---
// 3. StoreSettings (Configurações da Loja)
// ---
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    #[schema(ignore)]
    pub store_id: Uuid,

    #[schema(example = "America/Sao_Paulo")]
    pub timezone: Option<String>,

    #[schema(example = "USD")]
    pub currency: String,

    // Taxa de conversão para USD (ex.: 0.75 para EUR)
    pub conversion_rate: Decimal,

    pub updated_at: Option<DateTime<Utc>>,
}

// O payload para criar uma loja
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStorePayload {
    #[validate(length(min = 1, message = "O nome da loja é obrigatório."))]
    #[schema(example = "Acme Outdoors")]
    pub name: String,

    #[validate(url(message = "A URL da loja é inválida."))]
    pub url: Option<String>,

    // ID público da loja matriz (franquias)
    pub parent_store_public_id: Option<String>,
}

// O payload para atualizar as configurações
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsPayload {
    #[schema(example = "America/New_York")]
    pub timezone: Option<String>,

    #[schema(example = "EUR")]
    pub currency: Option<String>,

    pub conversion_rate: Option<Decimal>,
}
