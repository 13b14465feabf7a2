// src/db/audit_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::audit::{AuditEvent, AuditLogEntry};

#[derive(Clone)]
pub struct AuditRepository {
    pool: PgPool,
}

impl AuditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Grava um evento na trilha. Participa da transação do chamador.
    pub async fn record<'e, E>(
        &self,
        executor: E,
        actor_id: Option<Uuid>,
        contract_id: Option<Uuid>,
        store_id: Option<Uuid>,
        event: AuditEvent,
        detail: serde_json::Value,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO audit_log (actor_id, contract_id, store_id, event, detail)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(actor_id)
        .bind(contract_id)
        .bind(store_id)
        .bind(event.as_str())
        .bind(detail)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn list_by_contract(
        &self,
        contract_id: Uuid,
        limit: i64,
    ) -> Result<Vec<AuditLogEntry>, AppError> {
        let entries = sqlx::query_as::<_, AuditLogEntry>(
            r#"
            SELECT * FROM audit_log
            WHERE contract_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(contract_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }
}
