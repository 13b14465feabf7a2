// src/models/contract.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// ---
// 1. Contract (A fronteira de cobrança/tenancy)
// ---
// Dono das lojas, dos assentos e do saldo de créditos de IA.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: Uuid,

    #[schema(example = "Xk3dP2qZ")]
    pub public_id: String,

    #[schema(example = "Acme Marketing")]
    pub name: String,

    pub billing_email: String,
    pub owner_id: Uuid,

    // trialing, active, past_due, cancelled
    pub subscription_status: String,
    // starter, growth, pro, enterprise
    pub subscription_tier: String,
    pub price_per_month: Decimal,

    pub stores_max_allowed: i32,
    pub stores_active_count: i32,
    pub price_per_additional: Decimal,

    pub ai_credits_monthly: i32,
    pub ai_credits_balance: i32,

    pub status: String,
    pub is_deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(ignore)]
    pub deleted_by: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contract {
    // Regra de limite: só cria loja enquanto houver vaga no plano.
    pub fn can_create_store(&self) -> bool {
        self.stores_active_count < self.stores_max_allowed
    }
}

// Lançamento no razão de créditos de IA.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AiCreditUsage {
    pub id: Uuid,
    pub contract_id: Uuid,
    pub user_id: Option<Uuid>,
    pub seat_id: Option<Uuid>,
    pub credits_used: i32,
    #[schema(example = "generate")]
    pub operation: String,
    pub used_at: DateTime<Utc>,
}

// O payload para criar um contrato
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContractPayload {
    #[validate(length(min = 1, message = "O nome do contrato é obrigatório."))]
    #[schema(example = "Acme Marketing")]
    pub name: String,

    #[validate(email(message = "O e-mail de cobrança é inválido."))]
    pub billing_email: String,
}

// O payload para consumir créditos de IA
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ConsumeCreditsPayload {
    #[validate(range(min = 1, message = "A quantidade de créditos deve ser positiva."))]
    pub credits: i32,

    // 'generate', 'analyze', 'optimize'
    #[validate(length(min = 1, message = "A operação é obrigatória."))]
    #[schema(example = "generate")]
    pub operation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract(active: i32, max: i32) -> Contract {
        Contract {
            id: Uuid::new_v4(),
            public_id: "Xk3dP2qZ".into(),
            name: "Acme".into(),
            billing_email: "billing@acme.com".into(),
            owner_id: Uuid::new_v4(),
            subscription_status: "active".into(),
            subscription_tier: "starter".into(),
            price_per_month: Decimal::ZERO,
            stores_max_allowed: max,
            stores_active_count: active,
            price_per_additional: Decimal::new(29, 0),
            ai_credits_monthly: 100,
            ai_credits_balance: 100,
            status: "active".into(),
            is_deleted: false,
            deleted_at: None,
            deleted_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn store_limit_is_strict() {
        assert!(contract(0, 1).can_create_store());
        assert!(!contract(1, 1).can_create_store());
        assert!(contract(2, 5).can_create_store());
    }
}
