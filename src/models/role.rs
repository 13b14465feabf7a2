// src/models/role.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

// Matriz booleana de permissões: categoria -> ação -> permitido.
pub type PermissionMatrix = BTreeMap<String, BTreeMap<String, bool>>;

// Um cargo: pacote nomeado de permissões com nível numérico.
// Cargos de sistema são globais (contract_id = NULL); cargos customizados
// pertencem a um contrato.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: Uuid,

    #[schema(ignore)]
    pub contract_id: Option<Uuid>,

    #[schema(example = "manager")]
    pub name: String,

    #[schema(example = "Manager")]
    pub display_name: String,

    pub description: String,

    #[schema(example = 60)]
    pub level: i32,

    pub is_system: bool,

    #[schema(value_type = Object)]
    pub permissions: Json<PermissionMatrix>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Role {
    // Consulta a matriz por um caminho "categoria.acao".
    // Caminho desconhecido ou célula ausente contam como negado.
    pub fn allows(&self, path: &str) -> bool {
        let Some((category, action)) = path.split_once('.') else {
            return false;
        };
        self.permissions
            .get(category)
            .and_then(|actions| actions.get(action))
            .copied()
            .unwrap_or(false)
    }
}

// O payload para criar um cargo customizado de contrato.
#[derive(Debug, Deserialize, validator::Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRolePayload {
    #[validate(length(min = 1, message = "O nome do cargo é obrigatório."))]
    #[schema(example = "analyst")]
    pub name: String,

    #[validate(length(min = 1, message = "O nome de exibição é obrigatório."))]
    #[schema(example = "Analyst")]
    pub display_name: String,

    pub description: Option<String>,

    // Cargos customizados ficam sempre abaixo de "owner" (100)
    #[validate(range(min = 0, max = 99, message = "O nível deve estar entre 0 e 99."))]
    #[schema(example = 30)]
    pub level: i32,

    // Matriz categoria -> ação -> bool
    #[schema(value_type = Object)]
    pub permissions: PermissionMatrix,
}

// Resultado da resolução: o que o usuário efetivamente pode numa loja.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSnapshot {
    #[schema(example = "manager")]
    pub role: String,

    #[schema(example = 60)]
    pub role_level: i32,

    // Mapa no formato legado: nome camelCase -> permitido
    #[schema(value_type = Object)]
    pub permissions: std::collections::BTreeMap<String, bool>,

    pub granted_by: Option<Uuid>,
    pub granted_at: Option<DateTime<Utc>>,

    // Snapshot sintético de superusuário
    pub is_super: bool,
    // Resolvido pelo caminho legado (geração 2)
    pub is_legacy: bool,
}

// Entrada do catálogo de permissões exibido ao frontend.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionCatalogEntry {
    #[schema(example = "canEditStore")]
    pub legacy_name: String,

    #[schema(example = json!(["stores.edit"]))]
    pub paths: Vec<String>,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn role_with(paths: &[&str], level: i32) -> Role {
        let mut matrix: PermissionMatrix = BTreeMap::new();
        for path in paths {
            let (category, action) = path.split_once('.').unwrap();
            matrix
                .entry(category.to_string())
                .or_default()
                .insert(action.to_string(), true);
        }
        Role {
            id: Uuid::new_v4(),
            contract_id: None,
            name: "test".into(),
            display_name: "Test".into(),
            description: String::new(),
            level,
            is_system: true,
            permissions: Json(matrix),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn allows_checks_the_matrix() {
        let role = role_with(&["stores.edit", "analytics.view_own"], 60);
        assert!(role.allows("stores.edit"));
        assert!(role.allows("analytics.view_own"));
        assert!(!role.allows("stores.delete"));
        assert!(!role.allows("billing.manage"));
    }

    #[test]
    fn malformed_path_is_denied() {
        let role = role_with(&["stores.edit"], 60);
        assert!(!role.allows("stores"));
        assert!(!role.allows(""));
    }
}
