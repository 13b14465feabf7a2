// src/services/permission_service.rs

use std::collections::BTreeMap;

use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        AuditRepository, ContractRepository, RoleRepository, SeatRepository, StoreRepository,
        UserRepository,
    },
    models::{
        audit::AuditEvent,
        auth::{ActiveSeatRef, LegacyStoreRole, StorePermissionEntry, User},
        role::{PermissionSnapshot, Role},
        seat::{ContractSeat, SeatStatus, StoreAccess},
        store::Store,
    },
};

// ---
// Tabelas estáticas da resolução
// ---

// Hierarquia de cargos (número maior = mais permissões)
pub const ROLE_HIERARCHY: &[(&str, i32)] = &[
    ("viewer", 10),
    ("reviewer", 30),
    ("creator", 40),
    ("manager", 60),
    ("admin", 80),
    ("owner", 100),
];

// Nomes de cargos legados -> cargos universais
pub const LEGACY_ROLE_MAPPING: &[(&str, &str)] = &[("editor", "creator"), ("member", "viewer")];

// Permissões no formato legado -> caminhos "categoria.acao" na matriz nova
pub const PERMISSION_MAPPING: &[(&str, &[&str])] = &[
    ("canEditStore", &["stores.edit"]),
    (
        "canManageUsers",
        &["team.invite_users", "team.remove_users", "team.manage_roles"],
    ),
    (
        "canViewAnalytics",
        &["analytics.view_own", "analytics.view_all"],
    ),
    ("canCreateCampaigns", &["campaigns.create"]),
    ("canManageIntegrations", &["stores.manage_integrations"]),
    ("canDeleteStore", &["stores.delete"]),
    ("canManageBilling", &["billing.manage"]),
    ("canExportData", &["analytics.export"]),
];

// Um cargo exigido fora da hierarquia nunca é satisfeito.
const UNKNOWN_REQUIRED_LEVEL: i32 = 999;

pub fn map_legacy_role(role: &str) -> &str {
    LEGACY_ROLE_MAPPING
        .iter()
        .find(|(legacy, _)| *legacy == role)
        .map(|(_, mapped)| *mapped)
        .unwrap_or(role)
}

pub fn role_level(name: &str) -> Option<i32> {
    ROLE_HIERARCHY
        .iter()
        .find(|(role, _)| *role == name)
        .map(|(_, level)| *level)
}

pub fn legacy_permission_paths(permission: &str) -> Option<&'static [&'static str]> {
    PERMISSION_MAPPING
        .iter()
        .find(|(legacy, _)| *legacy == permission)
        .map(|(_, paths)| *paths)
}

// Um cargo da geração nova atende uma permissão legada se QUALQUER um dos
// caminhos mapeados estiver ligado na matriz.
pub fn role_allows_legacy(role: &Role, permission: &str) -> bool {
    let Some(paths) = legacy_permission_paths(permission) else {
        return false;
    };
    paths.iter().any(|path| role.allows(path))
}

// Converte a matriz nova para o mapa booleano no formato legado.
pub fn to_legacy_permission_map(role: &Role) -> BTreeMap<String, bool> {
    PERMISSION_MAPPING
        .iter()
        .map(|(legacy, paths)| {
            (
                legacy.to_string(),
                paths.iter().any(|path| role.allows(path)),
            )
        })
        .collect()
}

// Permissões implícitas dos papéis da geração 1, para entradas sem
// lista explícita de permissões.
fn legacy_role_grants(role: &str, permission: &str) -> bool {
    match map_legacy_role(role) {
        "owner" => true,
        "admin" => permission != "canManageBilling" && permission != "canDeleteStore",
        "creator" => permission == "canCreateCampaigns" || permission == "canViewAnalytics",
        "viewer" => permission == "canViewAnalytics",
        _ => false,
    }
}

// Mapa legado completo de um papel da geração 1/2.
fn legacy_role_permission_map(role: &str) -> BTreeMap<String, bool> {
    PERMISSION_MAPPING
        .iter()
        .map(|(legacy, _)| (legacy.to_string(), legacy_role_grants(role, legacy)))
        .collect()
}

// ---
// Decisões puras sobre documentos já carregados
// ---

// Geração 1: entrada em legacy_store_roles.
// Lista explícita de permissões vence; vazia cai nos padrões do papel.
fn check_legacy_permission(user: &User, store: &Store, permission: &str) -> bool {
    let Some(entry) = find_legacy_entry(user, store) else {
        return false;
    };
    if !entry.permissions.is_empty() {
        return entry.permissions.iter().any(|p| p == permission);
    }
    legacy_role_grants(&entry.role, permission)
}

fn find_legacy_entry<'u>(user: &'u User, store: &Store) -> Option<&'u LegacyStoreRole> {
    user.legacy_store_roles.iter().find(|entry| {
        entry.store_id == store.id
            || entry.store_public_id.as_deref() == Some(store.public_id.as_str())
    })
}

// Geração 2: entrada em store_permissions, comparada por nível.
// O cargo exigido chega aqui SEM o mapeamento legado aplicado, como no
// fluxo original.
fn check_legacy_role(user: &User, store: &Store, required_role: &str) -> bool {
    let Some(entry) = user
        .store_permissions
        .iter()
        .find(|perm| perm.store_id == store.id)
    else {
        return false;
    };
    let user_level = role_level(&entry.role).unwrap_or(0);
    let required_level = role_level(required_role).unwrap_or(UNKNOWN_REQUIRED_LEVEL);
    user_level >= required_level
}

// Escolhe o cargo efetivo de um assento para uma loja:
// - lista de overrides não vazia e loja fora dela => sem acesso;
// - override com cargo => o cargo do override;
// - senão => o cargo padrão do assento.
fn resolve_seat_role_id(
    seat: &ContractSeat,
    access_list: &[StoreAccess],
    store_id: Uuid,
) -> Option<Uuid> {
    let store_access = access_list.iter().find(|a| a.store_id == store_id);
    if store_access.is_none() && !access_list.is_empty() {
        return None;
    }
    Some(
        store_access
            .and_then(|a| a.role_id)
            .unwrap_or(seat.default_role_id),
    )
}

// ---
// O serviço
// ---

#[derive(Clone)]
pub struct PermissionService {
    user_repo: UserRepository,
    store_repo: StoreRepository,
    seat_repo: SeatRepository,
    role_repo: RoleRepository,
    contract_repo: ContractRepository,
    audit_repo: AuditRepository,
    pool: PgPool,
}

impl PermissionService {
    pub fn new(
        user_repo: UserRepository,
        store_repo: StoreRepository,
        seat_repo: SeatRepository,
        role_repo: RoleRepository,
        contract_repo: ContractRepository,
        audit_repo: AuditRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            user_repo,
            store_repo,
            seat_repo,
            role_repo,
            contract_repo,
            audit_repo,
            pool,
        }
    }

    // Verifica se o usuário tem uma permissão legada numa loja.
    // Documento ausente resolve para `false`, nunca para erro.
    pub async fn user_has_permission(
        &self,
        user_id: Uuid,
        store_id: Uuid,
        permission: &str,
    ) -> Result<bool, AppError> {
        let Some(user) = self.user_repo.find_by_id(user_id).await? else {
            return Ok(false);
        };
        if user.is_super_admin() {
            return Ok(true);
        }

        let Some(store) = self.store_repo.find_by_id(store_id).await? else {
            return Ok(false);
        };

        let Some(seat) = self
            .seat_repo
            .find_active(user_id, store.contract_id)
            .await?
        else {
            // Sem assento: cai na geração 1
            return Ok(check_legacy_permission(&user, &store, permission));
        };

        let access_list = self.seat_repo.list_access(seat.id).await?;
        let Some(role_id) = resolve_seat_role_id(&seat, &access_list, store.id) else {
            // Assento restrito a outras lojas
            return Ok(false);
        };

        let Some(role) = self.role_repo.find_by_id(role_id).await? else {
            return Ok(false);
        };

        Ok(role_allows_legacy(&role, permission))
    }

    // Verifica se o usuário tem ao menos o nível do cargo exigido na loja.
    pub async fn user_has_minimum_role(
        &self,
        user_id: Uuid,
        store_id: Uuid,
        required_role: &str,
    ) -> Result<bool, AppError> {
        let mapped = map_legacy_role(required_role);

        let Some(user) = self.user_repo.find_by_id(user_id).await? else {
            return Ok(false);
        };
        if user.is_super_admin() {
            return Ok(true);
        }

        let Some(store) = self.store_repo.find_by_id(store_id).await? else {
            return Ok(false);
        };

        let Some(seat) = self
            .seat_repo
            .find_active(user_id, store.contract_id)
            .await?
        else {
            // Sem assento: compara níveis contra a geração 2
            return Ok(check_legacy_role(&user, &store, required_role));
        };

        let access_list = self.seat_repo.list_access(seat.id).await?;
        let Some(role_id) = resolve_seat_role_id(&seat, &access_list, store.id) else {
            return Ok(false);
        };
        let Some(role) = self.role_repo.find_by_id(role_id).await? else {
            return Ok(false);
        };

        let required_level = role_level(mapped).unwrap_or(UNKNOWN_REQUIRED_LEVEL);
        Ok(role.level >= required_level)
    }

    // Snapshot completo das permissões efetivas do usuário na loja.
    pub async fn get_user_store_permissions(
        &self,
        user_id: Uuid,
        store_id: Uuid,
    ) -> Result<Option<PermissionSnapshot>, AppError> {
        let Some(user) = self.user_repo.find_by_id(user_id).await? else {
            return Ok(None);
        };

        if user.is_super_admin() {
            // Snapshot sintético: tudo liberado
            let permissions = PERMISSION_MAPPING
                .iter()
                .map(|(legacy, _)| (legacy.to_string(), true))
                .collect();
            return Ok(Some(PermissionSnapshot {
                role: "owner".into(),
                role_level: 100,
                permissions,
                granted_by: None,
                granted_at: None,
                is_super: true,
                is_legacy: false,
            }));
        }

        let Some(store) = self.store_repo.find_by_id(store_id).await? else {
            return Ok(None);
        };

        let Some(seat) = self
            .seat_repo
            .find_active(user_id, store.contract_id)
            .await?
        else {
            // Fallback: snapshot da geração 2
            let entry = user
                .store_permissions
                .iter()
                .find(|perm| perm.store_id == store.id);
            return Ok(entry.map(|entry| PermissionSnapshot {
                role: entry.role.clone(),
                role_level: role_level(&entry.role).unwrap_or(0),
                permissions: legacy_role_permission_map(&entry.role),
                granted_by: entry.granted_by,
                granted_at: entry.granted_at,
                is_super: false,
                is_legacy: true,
            }));
        };

        let access_list = self.seat_repo.list_access(seat.id).await?;
        let store_access = access_list.iter().find(|a| a.store_id == store.id);
        let Some(role_id) = resolve_seat_role_id(&seat, &access_list, store.id) else {
            return Ok(None);
        };
        let Some(role) = self.role_repo.find_by_id(role_id).await? else {
            return Ok(None);
        };

        Ok(Some(PermissionSnapshot {
            role: role.name.clone(),
            role_level: role.level,
            permissions: to_legacy_permission_map(&role),
            granted_by: store_access.and_then(|a| a.granted_by).or(seat.invited_by),
            granted_at: store_access
                .map(|a| a.granted_at)
                .or(Some(seat.created_at)),
            is_super: false,
            is_legacy: false,
        }))
    }

    // Concede acesso a uma loja: encontra (ou cria) o assento do contrato,
    // grava o override e ressincroniza as denormalizações.
    pub async fn grant_store_access(
        &self,
        user_id: Uuid,
        store_id: Uuid,
        role_name: &str,
        granted_by: Uuid,
    ) -> Result<PermissionSnapshot, AppError> {
        let mapped = map_legacy_role(role_name);

        let store = self
            .store_repo
            .find_by_id(store_id)
            .await?
            .ok_or(AppError::StoreNotFound)?;
        let role = self
            .role_repo
            .find_by_name_for_contract(store.contract_id, mapped)
            .await?
            .ok_or_else(|| AppError::RoleNotFound(role_name.to_string()))?;
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;
        let contract = self
            .contract_repo
            .find_by_id(store.contract_id)
            .await?
            .ok_or(AppError::ContractNotFound)?;

        let existing = self.seat_repo.find_any(user_id, contract.id).await?;

        let mut tx = self.pool.begin().await?;

        // 1. Assento: cria, reativa ou reaproveita
        let seat = match existing {
            None => {
                self.seat_repo
                    .create(
                        &mut *tx,
                        contract.id,
                        user_id,
                        role.id,
                        "additional",
                        Some(granted_by),
                        None,
                    )
                    .await?
            }
            Some(seat) if seat.status == SeatStatus::Revoked => {
                self.seat_repo.reactivate(&mut *tx, seat.id, role.id).await?
            }
            Some(seat) => seat,
        };

        // 2. Override da loja
        let access = self
            .seat_repo
            .upsert_access(&mut *tx, seat.id, store.id, Some(role.id), Some(granted_by))
            .await?;

        // 3. Denormaliza active_seats do usuário
        let mut seats_ref = user.active_seats.0.clone();
        if !seats_ref.iter().any(|r| r.contract_id == contract.id) {
            seats_ref.push(ActiveSeatRef {
                contract_id: contract.id,
                contract_name: contract.name.clone(),
                seat_id: seat.id,
            });
            self.user_repo
                .update_active_seats(&mut *tx, user_id, &seats_ref)
                .await?;
        }

        // 4. Trilha de auditoria
        self.audit_repo
            .record(
                &mut *tx,
                Some(granted_by),
                Some(contract.id),
                Some(store.id),
                AuditEvent::PermissionGranted,
                json!({ "userId": user_id, "role": mapped }),
            )
            .await?;

        tx.commit().await?;

        // 5. Ressincroniza a equipe denormalizada (fora da transação,
        // como qualquer mutação de acesso)
        self.sync_team_members(&store).await?;

        Ok(PermissionSnapshot {
            role: mapped.to_string(),
            role_level: role.level,
            permissions: to_legacy_permission_map(&role),
            granted_by: Some(granted_by),
            granted_at: Some(access.granted_at),
            is_super: false,
            is_legacy: false,
        })
    }

    // Troca o cargo do usuário numa loja: atualiza o override se houver,
    // senão o cargo padrão do assento.
    pub async fn update_user_role(
        &self,
        user_id: Uuid,
        store_id: Uuid,
        new_role: &str,
        changed_by: Uuid,
    ) -> Result<PermissionSnapshot, AppError> {
        let mapped = map_legacy_role(new_role);

        let store = self
            .store_repo
            .find_by_id(store_id)
            .await?
            .ok_or(AppError::StoreNotFound)?;
        let role = self
            .role_repo
            .find_by_name_for_contract(store.contract_id, mapped)
            .await?
            .ok_or_else(|| AppError::RoleNotFound(new_role.to_string()))?;
        let seat = self
            .seat_repo
            .find_active(user_id, store.contract_id)
            .await?
            .ok_or(AppError::SeatNotFound)?;

        let store_access = self.seat_repo.find_access(seat.id, store.id).await?;

        let mut tx = self.pool.begin().await?;

        if store_access.is_some() {
            self.seat_repo
                .update_access_role(&mut *tx, seat.id, store.id, role.id)
                .await?;
        } else {
            // Sem override específico: muda o cargo padrão do contrato
            self.seat_repo
                .set_default_role(&mut *tx, seat.id, role.id)
                .await?;
        }

        self.audit_repo
            .record(
                &mut *tx,
                Some(changed_by),
                Some(store.contract_id),
                Some(store.id),
                AuditEvent::RoleAssigned,
                json!({ "userId": user_id, "role": mapped }),
            )
            .await?;

        tx.commit().await?;

        self.sync_team_members(&store).await?;

        Ok(PermissionSnapshot {
            role: mapped.to_string(),
            role_level: role.level,
            permissions: to_legacy_permission_map(&role),
            granted_by: Some(changed_by),
            granted_at: None,
            is_super: false,
            is_legacy: false,
        })
    }

    // Revoga o acesso do usuário a uma loja.
    // Sem assento, cai na remoção legada (geração 2).
    pub async fn revoke_store_access(
        &self,
        user_id: Uuid,
        store_id: Uuid,
        revoked_by: Uuid,
    ) -> Result<bool, AppError> {
        let store = self
            .store_repo
            .find_by_id(store_id)
            .await?
            .ok_or(AppError::StoreNotFound)?;

        let Some(seat) = self
            .seat_repo
            .find_active(user_id, store.contract_id)
            .await?
        else {
            return self.remove_legacy_permission(user_id, store.id).await;
        };

        let mut tx = self.pool.begin().await?;

        self.seat_repo
            .delete_access(&mut *tx, seat.id, store.id)
            .await?;

        self.audit_repo
            .record(
                &mut *tx,
                Some(revoked_by),
                Some(store.contract_id),
                Some(store.id),
                AuditEvent::PermissionRevoked,
                json!({ "userId": user_id }),
            )
            .await?;

        tx.commit().await?;

        self.sync_team_members(&store).await?;

        Ok(true)
    }

    // Verificação em lote, uma resposta por permissão pedida.
    pub async fn check_permissions(
        &self,
        user_id: Uuid,
        store_id: Uuid,
        permissions: &[String],
    ) -> Result<BTreeMap<String, bool>, AppError> {
        let mut results = BTreeMap::new();
        for permission in permissions {
            let allowed = self
                .user_has_permission(user_id, store_id, permission)
                .await?;
            results.insert(permission.clone(), allowed);
        }
        Ok(results)
    }

    // Permissão no escopo do contrato (sem loja): usa o cargo padrão do
    // assento. É o que o guardião de rotas consulta.
    pub async fn user_has_contract_permission(
        &self,
        user_id: Uuid,
        contract_id: Uuid,
        path: &str,
    ) -> Result<bool, AppError> {
        let Some(user) = self.user_repo.find_by_id(user_id).await? else {
            return Ok(false);
        };
        if user.is_super_admin() {
            return Ok(true);
        }

        let Some(seat) = self.seat_repo.find_active(user_id, contract_id).await? else {
            return Ok(false);
        };
        let Some(role) = self.role_repo.find_by_id(seat.default_role_id).await? else {
            return Ok(false);
        };
        Ok(role.allows(path))
    }

    // Reconstrói a equipe denormalizada da loja a partir dos assentos
    // ativos do contrato.
    pub async fn sync_team_members(&self, store: &Store) -> Result<(), AppError> {
        let seats = self
            .seat_repo
            .list_active_by_contract(store.contract_id)
            .await?;

        let mut members = Vec::new();
        for seat in seats {
            let access_list = self.seat_repo.list_access(seat.id).await?;
            let entry = access_list.iter().find(|a| a.store_id == store.id);
            if entry.is_none() && !access_list.is_empty() {
                // Assento restrito a outras lojas
                continue;
            }

            let (role_name, granted_at) = match entry {
                Some(access) => {
                    let name = match access.role_id {
                        Some(role_id) => self
                            .role_repo
                            .find_by_id(role_id)
                            .await?
                            .map(|r| r.name)
                            .unwrap_or_else(|| seat.default_role_name.clone()),
                        None => seat.default_role_name.clone(),
                    };
                    (name, access.granted_at)
                }
                None => (seat.default_role_name.clone(), seat.created_at),
            };

            members.push(crate::models::store::TeamMember {
                user_id: seat.user_id,
                name: seat.user_name.clone(),
                email: seat.user_email.clone(),
                role: role_name,
                granted_at: Some(granted_at),
            });
        }

        self.store_repo
            .update_team_members(&self.pool, store.id, &members)
            .await?;

        Ok(())
    }

    // Remoção legada: filtra a entrada da geração 2 e regrava o documento.
    async fn remove_legacy_permission(
        &self,
        user_id: Uuid,
        store_id: Uuid,
    ) -> Result<bool, AppError> {
        let Some(user) = self.user_repo.find_by_id(user_id).await? else {
            return Ok(false);
        };

        let remaining: Vec<StorePermissionEntry> = user
            .store_permissions
            .iter()
            .filter(|perm| perm.store_id != store_id)
            .cloned()
            .collect();

        if remaining.len() == user.store_permissions.len() {
            return Ok(false);
        }

        self.user_repo
            .update_store_permissions(&self.pool, user_id, &remaining)
            .await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sqlx::types::Json;

    fn user_with(
        legacy: Vec<LegacyStoreRole>,
        store_perms: Vec<StorePermissionEntry>,
    ) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password_hash: "x".into(),
            is_super_user: false,
            super_user_role: None,
            legacy_store_roles: Json(legacy),
            store_permissions: Json(store_perms),
            active_seats: Json(vec![]),
            reset_password_token: None,
            reset_password_expires: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn store() -> Store {
        Store {
            id: Uuid::new_v4(),
            public_id: "aB3xY9z".into(),
            contract_id: Uuid::new_v4(),
            parent_store_id: None,
            name: "Loja".into(),
            url: None,
            team_members: Json(vec![]),
            is_active: true,
            deleted_at: None,
            deleted_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn seat(default_role_id: Uuid) -> ContractSeat {
        ContractSeat {
            id: Uuid::new_v4(),
            contract_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            default_role_id,
            seat_type: "standard".into(),
            status: SeatStatus::Active,
            invited_by: None,
            invitation_email: None,
            activated_at: None,
            suspended_at: None,
            suspended_by: None,
            revoked_at: None,
            revoked_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn access(seat_id: Uuid, store_id: Uuid, role_id: Option<Uuid>) -> StoreAccess {
        StoreAccess {
            seat_id,
            store_id,
            role_id,
            granted_by: None,
            granted_at: Utc::now(),
        }
    }

    #[test]
    fn legacy_role_names_map_to_universal_ones() {
        assert_eq!(map_legacy_role("editor"), "creator");
        assert_eq!(map_legacy_role("member"), "viewer");
        assert_eq!(map_legacy_role("manager"), "manager");
    }

    #[test]
    fn hierarchy_levels_match_the_table() {
        assert_eq!(role_level("viewer"), Some(10));
        assert_eq!(role_level("owner"), Some(100));
        assert_eq!(role_level("nope"), None);
    }

    #[test]
    fn permission_mapping_covers_all_legacy_names() {
        assert_eq!(PERMISSION_MAPPING.len(), 8);
        assert_eq!(
            legacy_permission_paths("canManageUsers"),
            Some(
                ["team.invite_users", "team.remove_users", "team.manage_roles"].as_slice()
            )
        );
        assert_eq!(legacy_permission_paths("canFly"), None);
    }

    #[test]
    fn role_allows_legacy_ors_over_the_paths() {
        use crate::models::role::tests::role_with;

        // view_all liga canViewAnalytics mesmo sem view_own
        let role = role_with(&["analytics.view_all"], 30);
        assert!(role_allows_legacy(&role, "canViewAnalytics"));
        assert!(!role_allows_legacy(&role, "canEditStore"));
        assert!(!role_allows_legacy(&role, "canFly"));
    }

    #[test]
    fn legacy_permission_map_round_trips_the_matrix() {
        use crate::models::role::tests::role_with;

        let role = role_with(&["stores.edit", "campaigns.create"], 60);
        let map = to_legacy_permission_map(&role);
        assert_eq!(map["canEditStore"], true);
        assert_eq!(map["canCreateCampaigns"], true);
        assert_eq!(map["canDeleteStore"], false);
        assert_eq!(map.len(), 8);
    }

    #[test]
    fn gen1_explicit_permissions_win_over_role_defaults() {
        let s = store();
        let entry = LegacyStoreRole {
            store_id: s.id,
            store_public_id: None,
            role: "member".into(),
            permissions: vec!["canEditStore".into()],
            joined_at: None,
            invited_by: None,
        };
        let user = user_with(vec![entry], vec![]);

        // A lista explícita concede edição mesmo para "member"
        assert!(check_legacy_permission(&user, &s, "canEditStore"));
        // ...e nega o que não está na lista
        assert!(!check_legacy_permission(&user, &s, "canViewAnalytics"));
    }

    #[test]
    fn gen1_empty_permission_list_uses_role_defaults() {
        let s = store();
        let entry = LegacyStoreRole {
            store_id: s.id,
            store_public_id: None,
            role: "admin".into(),
            permissions: vec![],
            joined_at: None,
            invited_by: None,
        };
        let user = user_with(vec![entry], vec![]);

        assert!(check_legacy_permission(&user, &s, "canEditStore"));
        assert!(check_legacy_permission(&user, &s, "canManageUsers"));
        assert!(!check_legacy_permission(&user, &s, "canManageBilling"));
        assert!(!check_legacy_permission(&user, &s, "canDeleteStore"));
    }

    #[test]
    fn gen1_matches_by_public_id_too() {
        let s = store();
        let entry = LegacyStoreRole {
            store_id: Uuid::new_v4(),
            store_public_id: Some(s.public_id.clone()),
            role: "owner".into(),
            permissions: vec![],
            joined_at: None,
            invited_by: None,
        };
        let user = user_with(vec![entry], vec![]);
        assert!(check_legacy_permission(&user, &s, "canManageBilling"));
    }

    #[test]
    fn gen2_minimum_role_compares_levels() {
        let s = store();
        let entry = StorePermissionEntry {
            store_id: s.id,
            role: "manager".into(),
            granted_by: None,
            granted_at: None,
        };
        let user = user_with(vec![], vec![entry]);

        assert!(check_legacy_role(&user, &s, "creator"));
        assert!(check_legacy_role(&user, &s, "manager"));
        assert!(!check_legacy_role(&user, &s, "admin"));
        // Cargo exigido desconhecido nunca é satisfeito
        assert!(!check_legacy_role(&user, &s, "editor"));
    }

    #[test]
    fn gen2_unknown_held_role_counts_as_zero() {
        let s = store();
        let entry = StorePermissionEntry {
            store_id: s.id,
            role: "intern".into(),
            granted_by: None,
            granted_at: None,
        };
        let user = user_with(vec![], vec![entry]);
        assert!(!check_legacy_role(&user, &s, "viewer"));
    }

    #[test]
    fn empty_override_list_grants_all_contract_stores() {
        let role_id = Uuid::new_v4();
        let seat = seat(role_id);
        let store_id = Uuid::new_v4();

        assert_eq!(resolve_seat_role_id(&seat, &[], store_id), Some(role_id));
    }

    #[test]
    fn restricted_seat_denies_unlisted_store() {
        let role_id = Uuid::new_v4();
        let seat = seat(role_id);
        let other_store = access(seat.id, Uuid::new_v4(), None);

        assert_eq!(
            resolve_seat_role_id(&seat, &[other_store], Uuid::new_v4()),
            None
        );
    }

    #[test]
    fn override_role_wins_over_default() {
        let default_role = Uuid::new_v4();
        let override_role = Uuid::new_v4();
        let seat = seat(default_role);
        let store_id = Uuid::new_v4();

        let with_role = access(seat.id, store_id, Some(override_role));
        assert_eq!(
            resolve_seat_role_id(&seat, &[with_role], store_id),
            Some(override_role)
        );

        // Override sem cargo específico usa o padrão do assento
        let without_role = access(seat.id, store_id, None);
        assert_eq!(
            resolve_seat_role_id(&seat, &[without_role], store_id),
            Some(default_role)
        );
    }
}
