// src/middleware/rbac.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
};
use std::marker::PhantomData;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, tenancy::ContractContext},
    models::auth::User,
};

/// 1. O Trait que define o que é uma Permissão
pub trait PermissionDef: Send + Sync + 'static {
    // Caminho "categoria.acao" na matriz de permissões
    fn path() -> &'static str;
}

/// 2. O Extractor (Guardião)
pub struct RequirePermission<T>(pub PhantomData<T>);

// 3. Implementação do FromRequestParts

impl<T, S> FromRequestParts<S> for RequirePermission<T>
where
    T: PermissionDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        // A. Extrai Usuário
        let user = parts
            .extensions
            .get::<User>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(ApiError {
                status: StatusCode::UNAUTHORIZED,
                error: "Usuário não autenticado".into(),
                details: None,
            })?;

        // B. Extrai o contexto do contrato
        let contract = ContractContext::from_request_parts(parts, state).await?;

        // C. O caminho exigido
        let required_path = T::path();

        // D. Verifica no cargo padrão do assento
        let has_permission = app_state
            .permission_service
            .user_has_contract_permission(user.0.id, contract.0, required_path)
            .await
            .map_err(|_| ApiError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: "Falha ao verificar permissões".into(),
                details: None,
            })?;

        if !has_permission {
            return Err(ApiError {
                status: StatusCode::FORBIDDEN,
                error: format!(
                    "Você precisa da permissão '{}' para realizar esta ação.",
                    required_path
                ),
                details: None,
            });
        }

        Ok(RequirePermission(PhantomData))
    }
}

// ---
// DEFINIÇÃO DAS PERMISSÕES (TIPOS)
// ---

pub struct PermTeamInvite;
impl PermissionDef for PermTeamInvite {
    fn path() -> &'static str {
        "team.invite_users"
    }
}

pub struct PermTeamRemove;
impl PermissionDef for PermTeamRemove {
    fn path() -> &'static str {
        "team.remove_users"
    }
}

pub struct PermTeamManageRoles;
impl PermissionDef for PermTeamManageRoles {
    fn path() -> &'static str {
        "team.manage_roles"
    }
}

pub struct PermBillingManage;
impl PermissionDef for PermBillingManage {
    fn path() -> &'static str {
        "billing.manage"
    }
}
