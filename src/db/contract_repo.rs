// src/db/contract_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::contract::{AiCreditUsage, Contract};

#[derive(Clone)]
pub struct ContractRepository {
    pool: PgPool,
}

impl ContractRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_contract<'e, E>(
        &self,
        executor: E,
        public_id: &str,
        name: &str,
        billing_email: &str,
        owner_id: Uuid,
    ) -> Result<Contract, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let contract = sqlx::query_as::<_, Contract>(
            r#"
            INSERT INTO contracts (public_id, name, billing_email, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(public_id)
        .bind(name)
        .bind(billing_email)
        .bind(owner_id)
        .fetch_one(executor)
        .await?;

        Ok(contract)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Contract>, AppError> {
        let contract = sqlx::query_as::<_, Contract>(
            "SELECT * FROM contracts WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(contract)
    }

    pub async fn find_by_public_id(&self, public_id: &str) -> Result<Option<Contract>, AppError> {
        let contract = sqlx::query_as::<_, Contract>(
            "SELECT * FROM contracts WHERE public_id = $1 AND is_deleted = FALSE",
        )
        .bind(public_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(contract)
    }

    // Usado pelo retry de geração de ID público.
    pub async fn public_id_exists(&self, public_id: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM contracts WHERE public_id = $1)",
        )
        .bind(public_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    // Contratos em que o usuário tem assento ativo.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Contract>, AppError> {
        let contracts = sqlx::query_as::<_, Contract>(
            r#"
            SELECT c.*
            FROM contracts c
            JOIN contract_seats cs ON cs.contract_id = c.id
            WHERE cs.user_id = $1
              AND cs.status = 'active'
              AND c.is_deleted = FALSE
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(contracts)
    }

    // Incremento guardado: só conta se ainda houver vaga no plano.
    // Retorna false quando o limite já foi atingido.
    pub async fn increment_store_count<'e, E>(
        &self,
        executor: E,
        contract_id: Uuid,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE contracts
            SET stores_active_count = stores_active_count + 1, updated_at = now()
            WHERE id = $1 AND stores_active_count < stores_max_allowed
            "#,
        )
        .bind(contract_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn decrement_store_count<'e, E>(
        &self,
        executor: E,
        contract_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE contracts
            SET stores_active_count = stores_active_count - 1, updated_at = now()
            WHERE id = $1 AND stores_active_count > 0
            "#,
        )
        .bind(contract_id)
        .execute(executor)
        .await?;
        Ok(())
    }

    // Débito guardado: falha com InsufficientCredits se o saldo não cobre.
    pub async fn consume_credits<'e, E>(
        &self,
        executor: E,
        contract_id: Uuid,
        credits: i32,
    ) -> Result<i32, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let balance = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE contracts
            SET ai_credits_balance = ai_credits_balance - $2, updated_at = now()
            WHERE id = $1 AND ai_credits_balance >= $2
            RETURNING ai_credits_balance
            "#,
        )
        .bind(contract_id)
        .bind(credits)
        .fetch_optional(executor)
        .await?;

        balance.ok_or(AppError::InsufficientCredits)
    }

    pub async fn add_credits<'e, E>(
        &self,
        executor: E,
        contract_id: Uuid,
        credits: i32,
    ) -> Result<i32, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let balance = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE contracts
            SET ai_credits_balance = ai_credits_balance + $2, updated_at = now()
            WHERE id = $1
            RETURNING ai_credits_balance
            "#,
        )
        .bind(contract_id)
        .bind(credits)
        .fetch_optional(executor)
        .await?;

        balance.ok_or(AppError::ContractNotFound)
    }

    // Lançamento no razão de uso de créditos.
    pub async fn record_credit_usage<'e, E>(
        &self,
        executor: E,
        contract_id: Uuid,
        user_id: Option<Uuid>,
        seat_id: Option<Uuid>,
        credits: i32,
        operation: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO ai_credit_usage (contract_id, user_id, seat_id, credits_used, operation)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(contract_id)
        .bind(user_id)
        .bind(seat_id)
        .bind(credits)
        .bind(operation)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn list_credit_usage(
        &self,
        contract_id: Uuid,
    ) -> Result<Vec<AiCreditUsage>, AppError> {
        let usage = sqlx::query_as::<_, AiCreditUsage>(
            r#"
            SELECT * FROM ai_credit_usage
            WHERE contract_id = $1
            ORDER BY used_at DESC
            LIMIT 100
            "#,
        )
        .bind(contract_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(usage)
    }
}
