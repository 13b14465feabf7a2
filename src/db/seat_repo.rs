// src/db/seat_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::seat::{ContractSeat, SeatWithUser, StoreAccess};

#[derive(Clone)]
pub struct SeatRepository {
    pool: PgPool,
}

impl SeatRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Assento ativo do usuário para um contrato.
    // É a consulta central da resolução de permissões.
    pub async fn find_active(
        &self,
        user_id: Uuid,
        contract_id: Uuid,
    ) -> Result<Option<ContractSeat>, AppError> {
        let seat = sqlx::query_as::<_, ContractSeat>(
            r#"
            SELECT * FROM contract_seats
            WHERE user_id = $1 AND contract_id = $2 AND status = 'active'
            "#,
        )
        .bind(user_id)
        .bind(contract_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(seat)
    }

    // Assento em qualquer status (para reativação de revogados).
    pub async fn find_any(
        &self,
        user_id: Uuid,
        contract_id: Uuid,
    ) -> Result<Option<ContractSeat>, AppError> {
        let seat = sqlx::query_as::<_, ContractSeat>(
            "SELECT * FROM contract_seats WHERE user_id = $1 AND contract_id = $2",
        )
        .bind(user_id)
        .bind(contract_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(seat)
    }

    pub async fn find_by_id(&self, seat_id: Uuid) -> Result<Option<ContractSeat>, AppError> {
        let seat =
            sqlx::query_as::<_, ContractSeat>("SELECT * FROM contract_seats WHERE id = $1")
                .bind(seat_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(seat)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        contract_id: Uuid,
        user_id: Uuid,
        default_role_id: Uuid,
        seat_type: &str,
        invited_by: Option<Uuid>,
        invitation_email: Option<&str>,
    ) -> Result<ContractSeat, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let seat = sqlx::query_as::<_, ContractSeat>(
            r#"
            INSERT INTO contract_seats
                (contract_id, user_id, default_role_id, seat_type, status,
                 invited_by, invitation_email, activated_at)
            VALUES ($1, $2, $3, $4, 'active', $5, $6, now())
            RETURNING *
            "#,
        )
        .bind(contract_id)
        .bind(user_id)
        .bind(default_role_id)
        .bind(seat_type)
        .bind(invited_by)
        .bind(invitation_email)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::SeatAlreadyExists;
                }
            }
            e.into()
        })?;

        Ok(seat)
    }

    // Reativa um assento revogado, com novo cargo padrão.
    pub async fn reactivate<'e, E>(
        &self,
        executor: E,
        seat_id: Uuid,
        default_role_id: Uuid,
    ) -> Result<ContractSeat, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let seat = sqlx::query_as::<_, ContractSeat>(
            r#"
            UPDATE contract_seats
            SET status = 'active', default_role_id = $2, activated_at = now(),
                revoked_at = NULL, revoked_by = NULL, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(seat_id)
        .bind(default_role_id)
        .fetch_one(executor)
        .await?;
        Ok(seat)
    }

    pub async fn set_default_role<'e, E>(
        &self,
        executor: E,
        seat_id: Uuid,
        role_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "UPDATE contract_seats SET default_role_id = $2, updated_at = now() WHERE id = $1",
        )
        .bind(seat_id)
        .bind(role_id)
        .execute(executor)
        .await?;
        Ok(())
    }

    // Revogação soft: o assento fica no histórico do contrato.
    pub async fn revoke<'e, E>(
        &self,
        executor: E,
        seat_id: Uuid,
        revoked_by: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE contract_seats
            SET status = 'revoked', revoked_at = now(), revoked_by = $2, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(seat_id)
        .bind(revoked_by)
        .execute(executor)
        .await?;
        Ok(())
    }

    // Todos os assentos do contrato, com usuário e cargo padrão (listagem).
    pub async fn list_by_contract(&self, contract_id: Uuid) -> Result<Vec<SeatWithUser>, AppError> {
        let seats = sqlx::query_as::<_, SeatWithUser>(
            r#"
            SELECT
                cs.id, cs.contract_id, cs.user_id,
                u.name AS user_name, u.email AS user_email,
                cs.default_role_id, r.name AS default_role_name,
                cs.status, cs.invited_by, cs.created_at
            FROM contract_seats cs
            JOIN users u ON u.id = cs.user_id
            JOIN roles r ON r.id = cs.default_role_id
            WHERE cs.contract_id = $1
            ORDER BY cs.created_at DESC
            "#,
        )
        .bind(contract_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(seats)
    }

    // Somente os ativos, usados na ressincronização de team_members.
    pub async fn list_active_by_contract(
        &self,
        contract_id: Uuid,
    ) -> Result<Vec<SeatWithUser>, AppError> {
        let seats = sqlx::query_as::<_, SeatWithUser>(
            r#"
            SELECT
                cs.id, cs.contract_id, cs.user_id,
                u.name AS user_name, u.email AS user_email,
                cs.default_role_id, r.name AS default_role_name,
                cs.status, cs.invited_by, cs.created_at
            FROM contract_seats cs
            JOIN users u ON u.id = cs.user_id
            JOIN roles r ON r.id = cs.default_role_id
            WHERE cs.contract_id = $1 AND cs.status = 'active'
            "#,
        )
        .bind(contract_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(seats)
    }

    // ---
    // Overrides por loja (seat_store_access)
    // ---

    pub async fn list_access(&self, seat_id: Uuid) -> Result<Vec<StoreAccess>, AppError> {
        let access = sqlx::query_as::<_, StoreAccess>(
            "SELECT * FROM seat_store_access WHERE seat_id = $1 ORDER BY granted_at",
        )
        .bind(seat_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(access)
    }

    pub async fn find_access(
        &self,
        seat_id: Uuid,
        store_id: Uuid,
    ) -> Result<Option<StoreAccess>, AppError> {
        let access = sqlx::query_as::<_, StoreAccess>(
            "SELECT * FROM seat_store_access WHERE seat_id = $1 AND store_id = $2",
        )
        .bind(seat_id)
        .bind(store_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(access)
    }

    // Concede (ou atualiza) o acesso de um assento a uma loja.
    pub async fn upsert_access<'e, E>(
        &self,
        executor: E,
        seat_id: Uuid,
        store_id: Uuid,
        role_id: Option<Uuid>,
        granted_by: Option<Uuid>,
    ) -> Result<StoreAccess, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let access = sqlx::query_as::<_, StoreAccess>(
            r#"
            INSERT INTO seat_store_access (seat_id, store_id, role_id, granted_by)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (seat_id, store_id)
            DO UPDATE SET role_id = COALESCE(EXCLUDED.role_id, seat_store_access.role_id),
                          granted_by = EXCLUDED.granted_by,
                          granted_at = now()
            RETURNING *
            "#,
        )
        .bind(seat_id)
        .bind(store_id)
        .bind(role_id)
        .bind(granted_by)
        .fetch_one(executor)
        .await?;
        Ok(access)
    }

    pub async fn update_access_role<'e, E>(
        &self,
        executor: E,
        seat_id: Uuid,
        store_id: Uuid,
        role_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE seat_store_access
            SET role_id = $3, granted_at = now()
            WHERE seat_id = $1 AND store_id = $2
            "#,
        )
        .bind(seat_id)
        .bind(store_id)
        .bind(role_id)
        .execute(executor)
        .await?;
        Ok(())
    }

    // Remove o override; retorna quantas linhas saíram.
    pub async fn delete_access<'e, E>(
        &self,
        executor: E,
        seat_id: Uuid,
        store_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result =
            sqlx::query("DELETE FROM seat_store_access WHERE seat_id = $1 AND store_id = $2")
                .bind(seat_id)
                .bind(store_id)
                .execute(executor)
                .await?;
        Ok(result.rows_affected())
    }
}
