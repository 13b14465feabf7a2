// src/db/store_repo.rs

use sqlx::types::Json;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::store::{Store, TeamMember};

#[derive(Clone)]
pub struct StoreRepository {
    pool: PgPool,
}

impl StoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        public_id: &str,
        contract_id: Uuid,
        parent_store_id: Option<Uuid>,
        name: &str,
        url: Option<&str>,
    ) -> Result<Store, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let store = sqlx::query_as::<_, Store>(
            r#"
            INSERT INTO stores (public_id, contract_id, parent_store_id, name, url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(public_id)
        .bind(contract_id)
        .bind(parent_store_id)
        .bind(name)
        .bind(url)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    if let Some(constraint) = db_err.constraint() {
                        return AppError::UniqueConstraintViolation(constraint.to_string());
                    }
                }
            }
            e.into()
        })?;

        Ok(store)
    }

    pub async fn public_id_exists(&self, public_id: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM stores WHERE public_id = $1)",
        )
        .bind(public_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    // Busca por ID público, ignorando lojas desativadas.
    pub async fn find_by_public_id(&self, public_id: &str) -> Result<Option<Store>, AppError> {
        let store = sqlx::query_as::<_, Store>(
            "SELECT * FROM stores WHERE public_id = $1 AND is_active = TRUE",
        )
        .bind(public_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(store)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Store>, AppError> {
        let store =
            sqlx::query_as::<_, Store>("SELECT * FROM stores WHERE id = $1 AND is_active = TRUE")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(store)
    }

    pub async fn list_by_contract(&self, contract_id: Uuid) -> Result<Vec<Store>, AppError> {
        let stores = sqlx::query_as::<_, Store>(
            r#"
            SELECT * FROM stores
            WHERE contract_id = $1 AND is_active = TRUE
            ORDER BY created_at
            "#,
        )
        .bind(contract_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(stores)
    }

    // Regrava a equipe denormalizada da loja.
    pub async fn update_team_members<'e, E>(
        &self,
        executor: E,
        store_id: Uuid,
        members: &[TeamMember],
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE stores SET team_members = $2, updated_at = now() WHERE id = $1")
            .bind(store_id)
            .bind(Json(members))
            .execute(executor)
            .await?;
        Ok(())
    }

    // Exclusão soft: a loja some das listagens mas segue no histórico.
    pub async fn soft_delete<'e, E>(
        &self,
        executor: E,
        store_id: Uuid,
        deleted_by: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE stores
            SET is_active = FALSE, deleted_at = now(), deleted_by = $2, updated_at = now()
            WHERE id = $1 AND is_active = TRUE
            "#,
        )
        .bind(store_id)
        .bind(deleted_by)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }
}
