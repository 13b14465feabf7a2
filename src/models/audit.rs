// src/models/audit.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

// Eventos registrados quando o núcleo de autorização muda acesso.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditEvent {
    PermissionGranted,
    PermissionRevoked,
    RoleAssigned,
    RoleRemoved,
}

impl AuditEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditEvent::PermissionGranted => "permission.granted",
            AuditEvent::PermissionRevoked => "permission.revoked",
            AuditEvent::RoleAssigned => "role.assigned",
            AuditEvent::RoleRemoved => "role.removed",
        }
    }
}

// Uma linha da trilha de auditoria.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id: Uuid,
    pub actor_id: Option<Uuid>,
    pub contract_id: Option<Uuid>,
    pub store_id: Option<Uuid>,
    #[schema(example = "permission.granted")]
    pub event: String,
    #[schema(value_type = Object)]
    pub detail: serde_json::Value,
    pub created_at: DateTime<Utc>,
}
