// src/services/store_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{error::AppError, public_id},
    db::{ContractRepository, SeatRepository, SettingsRepository, StoreRepository},
    models::{
        auth::User,
        store::{Store, StoreSettings},
    },
    services::permission_service::PermissionService,
};

#[derive(Clone)]
pub struct StoreService {
    store_repo: StoreRepository,
    contract_repo: ContractRepository,
    seat_repo: SeatRepository,
    settings_repo: SettingsRepository,
    permissions: PermissionService,
    pool: PgPool,
}

impl StoreService {
    pub fn new(
        store_repo: StoreRepository,
        contract_repo: ContractRepository,
        seat_repo: SeatRepository,
        settings_repo: SettingsRepository,
        permissions: PermissionService,
        pool: PgPool,
    ) -> Self {
        Self {
            store_repo,
            contract_repo,
            seat_repo,
            settings_repo,
            permissions,
            pool,
        }
    }

    // Cria uma loja respeitando o limite do plano do contrato.
    pub async fn create_store(
        &self,
        contract_id: Uuid,
        name: &str,
        url: Option<&str>,
        parent_store_public_id: Option<&str>,
    ) -> Result<Store, AppError> {
        let contract = self
            .contract_repo
            .find_by_id(contract_id)
            .await?
            .ok_or(AppError::ContractNotFound)?;

        if !contract.can_create_store() {
            return Err(AppError::StoreLimitReached(contract.stores_max_allowed));
        }

        // Loja matriz (franquias) precisa ser do mesmo contrato
        let parent_store_id = match parent_store_public_id {
            Some(parent_public_id) => {
                let parent = self
                    .store_repo
                    .find_by_public_id(parent_public_id)
                    .await?
                    .filter(|s| s.contract_id == contract_id)
                    .ok_or(AppError::StoreNotFound)?;
                Some(parent.id)
            }
            None => None,
        };

        // Gera um ID público único (retry contra o índice UNIQUE)
        let mut store_public_id = public_id::generate(public_id::STORE_PUBLIC_ID_LEN);
        while self.store_repo.public_id_exists(&store_public_id).await? {
            store_public_id = public_id::generate(public_id::STORE_PUBLIC_ID_LEN);
        }

        // 1. Transação: loja + configurações + contador do contrato
        let mut tx = self.pool.begin().await?;

        let store = self
            .store_repo
            .create(
                &mut *tx,
                &store_public_id,
                contract_id,
                parent_store_id,
                name,
                url,
            )
            .await?;

        self.settings_repo.create_default(&mut *tx, store.id).await?;

        // Incremento guardado: protege contra corrida com outra criação
        let incremented = self
            .contract_repo
            .increment_store_count(&mut *tx, contract_id)
            .await?;
        if !incremented {
            return Err(AppError::StoreLimitReached(contract.stores_max_allowed));
        }

        tx.commit().await?;

        // 2. A equipe nasce preenchida a partir dos assentos do contrato
        self.permissions.sync_team_members(&store).await?;

        self.store_repo
            .find_by_id(store.id)
            .await?
            .ok_or(AppError::StoreNotFound)
    }

    // Lojas do contrato visíveis para o usuário.
    // Assento restrito enxerga só as lojas da sua lista.
    pub async fn list_stores(&self, user: &User, contract_id: Uuid) -> Result<Vec<Store>, AppError> {
        let stores = self.store_repo.list_by_contract(contract_id).await?;

        if user.is_super_admin() {
            return Ok(stores);
        }

        let Some(seat) = self.seat_repo.find_active(user.id, contract_id).await? else {
            return Ok(vec![]);
        };
        let access_list = self.seat_repo.list_access(seat.id).await?;
        if access_list.is_empty() {
            return Ok(stores);
        }

        Ok(stores
            .into_iter()
            .filter(|store| access_list.iter().any(|a| a.store_id == store.id))
            .collect())
    }

    pub async fn find_by_public_id(&self, public_id: &str) -> Result<Store, AppError> {
        self.store_repo
            .find_by_public_id(public_id)
            .await?
            .ok_or(AppError::StoreNotFound)
    }

    // Exclusão soft, exige canDeleteStore.
    pub async fn delete_store(&self, user_id: Uuid, store_public_id: &str) -> Result<(), AppError> {
        let store = self.find_by_public_id(store_public_id).await?;

        let allowed = self
            .permissions
            .user_has_permission(user_id, store.id, "canDeleteStore")
            .await?;
        if !allowed {
            return Err(AppError::PermissionDenied("canDeleteStore".into()));
        }

        let mut tx = self.pool.begin().await?;

        let deleted = self.store_repo.soft_delete(&mut *tx, store.id, user_id).await?;
        if deleted > 0 {
            self.contract_repo
                .decrement_store_count(&mut *tx, store.contract_id)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    // Configurações: leitura para qualquer membro, escrita exige canEditStore.
    pub async fn get_settings(
        &self,
        user_id: Uuid,
        store_public_id: &str,
    ) -> Result<StoreSettings, AppError> {
        let store = self.find_by_public_id(store_public_id).await?;

        let is_member = self
            .permissions
            .user_has_minimum_role(user_id, store.id, "viewer")
            .await?;
        if !is_member {
            return Err(AppError::AccessDenied);
        }

        self.settings_repo
            .get(store.id)
            .await?
            .ok_or(AppError::StoreNotFound)
    }

    pub async fn update_settings(
        &self,
        user_id: Uuid,
        store_public_id: &str,
        timezone: Option<&str>,
        currency: Option<&str>,
        conversion_rate: Option<Decimal>,
    ) -> Result<StoreSettings, AppError> {
        let store = self.find_by_public_id(store_public_id).await?;

        let allowed = self
            .permissions
            .user_has_permission(user_id, store.id, "canEditStore")
            .await?;
        if !allowed {
            return Err(AppError::PermissionDenied("canEditStore".into()));
        }

        self.settings_repo
            .update(&self.pool, store.id, timezone, currency, conversion_rate)
            .await
    }
}
