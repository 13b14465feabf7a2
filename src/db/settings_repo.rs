// src/db/settings_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::store::StoreSettings;

#[derive(Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Toda loja nasce com uma linha de configurações padrão.
    pub async fn create_default<'e, E>(
        &self,
        executor: E,
        store_id: Uuid,
    ) -> Result<StoreSettings, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let settings = sqlx::query_as::<_, StoreSettings>(
            r#"
            INSERT INTO store_settings (store_id)
            VALUES ($1)
            RETURNING *
            "#,
        )
        .bind(store_id)
        .fetch_one(executor)
        .await?;
        Ok(settings)
    }

    pub async fn get(&self, store_id: Uuid) -> Result<Option<StoreSettings>, AppError> {
        let settings = sqlx::query_as::<_, StoreSettings>(
            "SELECT * FROM store_settings WHERE store_id = $1",
        )
        .bind(store_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(settings)
    }

    // Atualização parcial: campos ausentes mantêm o valor atual.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        store_id: Uuid,
        timezone: Option<&str>,
        currency: Option<&str>,
        conversion_rate: Option<Decimal>,
    ) -> Result<StoreSettings, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let settings = sqlx::query_as::<_, StoreSettings>(
            r#"
            UPDATE store_settings
            SET timezone = COALESCE($2, timezone),
                currency = COALESCE($3, currency),
                conversion_rate = COALESCE($4, conversion_rate),
                updated_at = now()
            WHERE store_id = $1
            RETURNING *
            "#,
        )
        .bind(store_id)
        .bind(timezone)
        .bind(currency)
        .bind(conversion_rate)
        .fetch_optional(executor)
        .await?;

        settings.ok_or(AppError::StoreNotFound)
    }
}
