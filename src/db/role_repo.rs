// src/db/role_repo.rs

use sqlx::types::Json;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::role::{PermissionMatrix, Role};

#[derive(Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, AppError> {
        let role = sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(role)
    }

    // Cargo de sistema (global) pelo nome.
    pub async fn find_system_by_name(&self, name: &str) -> Result<Option<Role>, AppError> {
        let role = sqlx::query_as::<_, Role>(
            "SELECT * FROM roles WHERE contract_id IS NULL AND name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(role)
    }

    // Resolve um nome de cargo no escopo do contrato:
    // cargos de sistema valem para todos, customizados só no próprio contrato.
    pub async fn find_by_name_for_contract(
        &self,
        contract_id: Uuid,
        name: &str,
    ) -> Result<Option<Role>, AppError> {
        let role = sqlx::query_as::<_, Role>(
            r#"
            SELECT * FROM roles
            WHERE name = $2 AND (contract_id IS NULL OR contract_id = $1)
            LIMIT 1
            "#,
        )
        .bind(contract_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(role)
    }

    pub async fn list_for_contract(&self, contract_id: Uuid) -> Result<Vec<Role>, AppError> {
        let roles = sqlx::query_as::<_, Role>(
            r#"
            SELECT * FROM roles
            WHERE contract_id IS NULL OR contract_id = $1
            ORDER BY level DESC, name
            "#,
        )
        .bind(contract_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(roles)
    }

    pub async fn create_custom<'e, E>(
        &self,
        executor: E,
        contract_id: Uuid,
        name: &str,
        display_name: &str,
        description: &str,
        level: i32,
        permissions: &PermissionMatrix,
    ) -> Result<Role, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let role = sqlx::query_as::<_, Role>(
            r#"
            INSERT INTO roles (contract_id, name, display_name, description, level, is_system, permissions)
            VALUES ($1, $2, $3, $4, $5, FALSE, $6)
            RETURNING *
            "#,
        )
        .bind(contract_id)
        .bind(name)
        .bind(display_name)
        .bind(description)
        .bind(level)
        .bind(Json(permissions))
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(
                        "Já existe um cargo com esse nome neste contrato.".into(),
                    );
                }
            }
            e.into()
        })?;

        Ok(role)
    }
}
