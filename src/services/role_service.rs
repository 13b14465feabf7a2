// src/services/role_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::RoleRepository,
    models::role::{PermissionCatalogEntry, PermissionMatrix, Role},
    services::permission_service::PERMISSION_MAPPING,
};

#[derive(Clone)]
pub struct RoleService {
    role_repo: RoleRepository,
    pool: PgPool,
}

impl RoleService {
    pub fn new(role_repo: RoleRepository, pool: PgPool) -> Self {
        Self { role_repo, pool }
    }

    // Cargos visíveis no contrato: os de sistema + os customizados dele.
    pub async fn list_roles(&self, contract_id: Uuid) -> Result<Vec<Role>, AppError> {
        self.role_repo.list_for_contract(contract_id).await
    }

    // Cria um cargo customizado do contrato.
    // Nomes de cargos de sistema não podem ser sombreados.
    pub async fn create_custom_role(
        &self,
        contract_id: Uuid,
        name: &str,
        display_name: &str,
        description: Option<&str>,
        level: i32,
        permissions: &PermissionMatrix,
    ) -> Result<Role, AppError> {
        if self.role_repo.find_system_by_name(name).await?.is_some() {
            return Err(AppError::UniqueConstraintViolation(
                "Nome reservado para cargo de sistema.".into(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let role = self
            .role_repo
            .create_custom(
                &mut *tx,
                contract_id,
                name,
                display_name,
                description.unwrap_or(""),
                level,
                permissions,
            )
            .await?;

        tx.commit().await?;

        Ok(role)
    }

    // Catálogo estático: nomes legados e seus caminhos na matriz.
    // (Para o frontend montar a tela de cargos.)
    pub fn permission_catalog(&self) -> Vec<PermissionCatalogEntry> {
        PERMISSION_MAPPING
            .iter()
            .map(|(legacy, paths)| PermissionCatalogEntry {
                legacy_name: legacy.to_string(),
                paths: paths.iter().map(|p| p.to_string()).collect(),
            })
            .collect()
    }
}
