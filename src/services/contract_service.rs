// src/services/contract_service.rs

use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{error::AppError, public_id},
    db::{AuditRepository, ContractRepository, RoleRepository, SeatRepository, UserRepository},
    models::{
        audit::AuditEvent,
        auth::ActiveSeatRef,
        contract::{AiCreditUsage, Contract},
        seat::{ContractSeat, SeatDetail, SeatStatus},
    },
    services::permission_service::{map_legacy_role, PermissionService},
};

#[derive(Clone)]
pub struct ContractService {
    contract_repo: ContractRepository,
    seat_repo: SeatRepository,
    user_repo: UserRepository,
    role_repo: RoleRepository,
    audit_repo: AuditRepository,
    permissions: PermissionService,
    store_repo: crate::db::StoreRepository,
    pool: PgPool,
}

impl ContractService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        contract_repo: ContractRepository,
        seat_repo: SeatRepository,
        user_repo: UserRepository,
        role_repo: RoleRepository,
        audit_repo: AuditRepository,
        permissions: PermissionService,
        store_repo: crate::db::StoreRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            contract_repo,
            seat_repo,
            user_repo,
            role_repo,
            audit_repo,
            permissions,
            store_repo,
            pool,
        }
    }

    // LÓGICA DE NEGÓCIO: Cria um novo Contrato e, atomicamente, dá ao
    // criador o assento de "owner".
    pub async fn create_contract_with_owner(
        &self,
        name: &str,
        billing_email: &str,
        owner_id: Uuid,
    ) -> Result<Contract, AppError> {
        let owner_role = self
            .role_repo
            .find_system_by_name("owner")
            .await?
            .ok_or_else(|| AppError::RoleNotFound("owner".into()))?;

        let owner = self
            .user_repo
            .find_by_id(owner_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        // Gera um ID público único (retry contra o índice UNIQUE)
        let mut contract_public_id = public_id::generate(public_id::CONTRACT_PUBLIC_ID_LEN);
        while self
            .contract_repo
            .public_id_exists(&contract_public_id)
            .await?
        {
            contract_public_id = public_id::generate(public_id::CONTRACT_PUBLIC_ID_LEN);
        }

        // 1. Inicia a transação
        let mut tx = self.pool.begin().await?;

        // 2. Cria o Contrato
        let contract = self
            .contract_repo
            .create_contract(&mut *tx, &contract_public_id, name, billing_email, owner_id)
            .await?;

        // 3. Assento do dono, com o cargo de sistema "owner"
        let seat = self
            .seat_repo
            .create(
                &mut *tx,
                contract.id,
                owner_id,
                owner_role.id,
                "standard",
                None,
                None,
            )
            .await?;

        // 4. Denormaliza active_seats do dono
        let mut seats_ref = owner.active_seats.0.clone();
        seats_ref.push(ActiveSeatRef {
            contract_id: contract.id,
            contract_name: contract.name.clone(),
            seat_id: seat.id,
        });
        self.user_repo
            .update_active_seats(&mut *tx, owner_id, &seats_ref)
            .await?;

        // 5. Trilha de auditoria
        self.audit_repo
            .record(
                &mut *tx,
                Some(owner_id),
                Some(contract.id),
                None,
                AuditEvent::RoleAssigned,
                json!({ "userId": owner_id, "role": "owner" }),
            )
            .await?;

        // 6. Commit
        tx.commit().await?;

        Ok(contract)
    }

    // Contratos em que o usuário tem assento ativo.
    pub async fn list_user_contracts(&self, user_id: Uuid) -> Result<Vec<Contract>, AppError> {
        self.contract_repo.list_for_user(user_id).await
    }

    // Listagem da equipe: assentos + overrides de loja.
    pub async fn list_seats(&self, contract_id: Uuid) -> Result<Vec<SeatDetail>, AppError> {
        let seats = self.seat_repo.list_by_contract(contract_id).await?;

        let mut details = Vec::with_capacity(seats.len());
        for seat in seats {
            let store_access = self.seat_repo.list_access(seat.id).await?;
            details.push(SeatDetail { seat, store_access });
        }
        Ok(details)
    }

    // Convida um usuário (já registrado) para o contrato.
    // `store_access` restringe o assento a lojas específicas; vazio = todas.
    pub async fn invite_seat(
        &self,
        contract_id: Uuid,
        invited_by: Uuid,
        email: &str,
        role_name: &str,
        store_access: &[String],
    ) -> Result<ContractSeat, AppError> {
        let mapped = map_legacy_role(role_name);

        let contract = self
            .contract_repo
            .find_by_id(contract_id)
            .await?
            .ok_or(AppError::ContractNotFound)?;

        let role = self
            .role_repo
            .find_by_name_for_contract(contract_id, mapped)
            .await?
            .ok_or_else(|| AppError::RoleNotFound(role_name.to_string()))?;

        let invited_user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::UserNotFound)?;

        // Resolve as lojas da restrição antes de abrir a transação
        let mut restricted_stores = Vec::with_capacity(store_access.len());
        for store_public_id in store_access {
            let store = self
                .store_repo
                .find_by_public_id(store_public_id)
                .await?
                .filter(|s| s.contract_id == contract_id)
                .ok_or(AppError::StoreNotFound)?;
            restricted_stores.push(store);
        }

        let existing = self.seat_repo.find_any(invited_user.id, contract_id).await?;

        let mut tx = self.pool.begin().await?;

        let seat = match existing {
            None => {
                self.seat_repo
                    .create(
                        &mut *tx,
                        contract_id,
                        invited_user.id,
                        role.id,
                        "standard",
                        Some(invited_by),
                        Some(email),
                    )
                    .await?
            }
            // Assento revogado volta à ativa com o novo cargo
            Some(seat) if seat.status == SeatStatus::Revoked => {
                self.seat_repo.reactivate(&mut *tx, seat.id, role.id).await?
            }
            Some(_) => return Err(AppError::SeatAlreadyExists),
        };

        for store in &restricted_stores {
            self.seat_repo
                .upsert_access(&mut *tx, seat.id, store.id, None, Some(invited_by))
                .await?;
        }

        // Denormaliza active_seats do convidado
        let mut seats_ref = invited_user.active_seats.0.clone();
        if !seats_ref.iter().any(|r| r.contract_id == contract_id) {
            seats_ref.push(ActiveSeatRef {
                contract_id,
                contract_name: contract.name.clone(),
                seat_id: seat.id,
            });
            self.user_repo
                .update_active_seats(&mut *tx, invited_user.id, &seats_ref)
                .await?;
        }

        self.audit_repo
            .record(
                &mut *tx,
                Some(invited_by),
                Some(contract_id),
                None,
                AuditEvent::RoleAssigned,
                json!({ "userId": invited_user.id, "role": mapped, "email": email }),
            )
            .await?;

        tx.commit().await?;

        // Ressincroniza a equipe das lojas afetadas
        let affected = if restricted_stores.is_empty() {
            self.store_repo.list_by_contract(contract_id).await?
        } else {
            restricted_stores
        };
        for store in &affected {
            self.permissions.sync_team_members(store).await?;
        }

        Ok(seat)
    }

    // Troca o cargo padrão de um assento.
    pub async fn update_seat_role(
        &self,
        contract_id: Uuid,
        seat_id: Uuid,
        role_name: &str,
        changed_by: Uuid,
    ) -> Result<ContractSeat, AppError> {
        let mapped = map_legacy_role(role_name);

        let seat = self
            .seat_repo
            .find_by_id(seat_id)
            .await?
            .filter(|s| s.contract_id == contract_id)
            .ok_or(AppError::SeatNotFound)?;

        let role = self
            .role_repo
            .find_by_name_for_contract(contract_id, mapped)
            .await?
            .ok_or_else(|| AppError::RoleNotFound(role_name.to_string()))?;

        let mut tx = self.pool.begin().await?;

        self.seat_repo
            .set_default_role(&mut *tx, seat.id, role.id)
            .await?;

        self.audit_repo
            .record(
                &mut *tx,
                Some(changed_by),
                Some(contract_id),
                None,
                AuditEvent::RoleAssigned,
                json!({ "userId": seat.user_id, "role": mapped }),
            )
            .await?;

        tx.commit().await?;

        // O cargo padrão vale para todas as lojas sem override
        for store in self.store_repo.list_by_contract(contract_id).await? {
            self.permissions.sync_team_members(&store).await?;
        }

        self.seat_repo
            .find_by_id(seat.id)
            .await?
            .ok_or(AppError::SeatNotFound)
    }

    // Revogação soft do assento + limpeza da denormalização no usuário.
    pub async fn revoke_seat(
        &self,
        contract_id: Uuid,
        seat_id: Uuid,
        revoked_by: Uuid,
    ) -> Result<(), AppError> {
        let seat = self
            .seat_repo
            .find_by_id(seat_id)
            .await?
            .filter(|s| s.contract_id == contract_id)
            .ok_or(AppError::SeatNotFound)?;

        let user = self
            .user_repo
            .find_by_id(seat.user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let mut tx = self.pool.begin().await?;

        self.seat_repo.revoke(&mut *tx, seat.id, revoked_by).await?;

        let seats_ref: Vec<ActiveSeatRef> = user
            .active_seats
            .iter()
            .filter(|r| r.contract_id != contract_id)
            .cloned()
            .collect();
        self.user_repo
            .update_active_seats(&mut *tx, user.id, &seats_ref)
            .await?;

        self.audit_repo
            .record(
                &mut *tx,
                Some(revoked_by),
                Some(contract_id),
                None,
                AuditEvent::RoleRemoved,
                json!({ "userId": seat.user_id }),
            )
            .await?;

        tx.commit().await?;

        for store in self.store_repo.list_by_contract(contract_id).await? {
            self.permissions.sync_team_members(&store).await?;
        }

        Ok(())
    }

    // Debita créditos de IA e lança no razão de uso.
    pub async fn consume_credits(
        &self,
        contract_id: Uuid,
        user_id: Uuid,
        credits: i32,
        operation: &str,
    ) -> Result<i32, AppError> {
        let seat = self.seat_repo.find_active(user_id, contract_id).await?;

        let mut tx = self.pool.begin().await?;

        let balance = self
            .contract_repo
            .consume_credits(&mut *tx, contract_id, credits)
            .await?;

        self.contract_repo
            .record_credit_usage(
                &mut *tx,
                contract_id,
                Some(user_id),
                seat.map(|s| s.id),
                credits,
                operation,
            )
            .await?;

        tx.commit().await?;

        Ok(balance)
    }

    // Credita créditos comprados.
    pub async fn add_credits(&self, contract_id: Uuid, credits: i32) -> Result<i32, AppError> {
        let mut tx = self.pool.begin().await?;
        let balance = self
            .contract_repo
            .add_credits(&mut *tx, contract_id, credits)
            .await?;
        tx.commit().await?;
        Ok(balance)
    }

    pub async fn list_credit_usage(
        &self,
        contract_id: Uuid,
    ) -> Result<Vec<AiCreditUsage>, AppError> {
        self.contract_repo.list_credit_usage(contract_id).await
    }
}
