// src/db/user_repo.rs

use sqlx::types::Json;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::auth::{ActiveSeatRef, StorePermissionEntry, User};

// O repositório de usuários, responsável por todas as interações com a
// tabela 'users'.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

const USER_COLUMNS: &str = r#"
    id, name, email, password_hash, is_super_user, super_user_role,
    legacy_store_roles, store_permissions, active_seats,
    reset_password_token, reset_password_expires, created_at, updated_at
"#;

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca um usuário pelo seu e-mail
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    // Busca um usuário pelo seu ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    // Cria um novo usuário no banco de dados.
    // Com tratamento de erro específico para e-mails duplicados.
    pub async fn create_user<'e, E>(
        &self,
        executor: E,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            e.into()
        })?;

        Ok(user)
    }

    // Regrava a denormalização dos assentos ativos do usuário.
    pub async fn update_active_seats<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        seats: &[ActiveSeatRef],
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE users SET active_seats = $2, updated_at = now() WHERE id = $1")
            .bind(user_id)
            .bind(Json(seats))
            .execute(executor)
            .await?;
        Ok(())
    }

    // Regrava as entradas da geração 2 (store_permissions).
    // Usado pelo fallback legado de revogação.
    pub async fn update_store_permissions<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        entries: &[StorePermissionEntry],
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE users SET store_permissions = $2, updated_at = now() WHERE id = $1")
            .bind(user_id)
            .bind(Json(entries))
            .execute(executor)
            .await?;
        Ok(())
    }
}
