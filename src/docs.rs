// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,
        handlers::auth::get_my_contracts,

        // --- Contracts ---
        handlers::contract::create_contract,
        handlers::contract::list_my_contracts,
        handlers::contract::consume_credits,
        handlers::contract::add_credits,
        handlers::contract::list_credit_usage,

        // --- Seats ---
        handlers::seats::list_seats,
        handlers::seats::invite_seat,
        handlers::seats::update_seat_role,
        handlers::seats::revoke_seat,

        // --- RBAC ---
        handlers::role::create_role,
        handlers::role::list_roles,
        handlers::role::list_permissions,

        // --- Stores ---
        handlers::store::create_store,
        handlers::store::list_stores,
        handlers::store::delete_store,

        // --- Permissions ---
        handlers::permissions::get_my_permissions,
        handlers::permissions::grant_access,
        handlers::permissions::update_role,
        handlers::permissions::revoke_access,
        handlers::permissions::check_permissions,

        // --- Settings ---
        handlers::settings::get_settings,
        handlers::settings::update_settings,

        // --- Analytics ---
        handlers::analytics::get_summary,
        handlers::analytics::get_revenue_series,
        handlers::analytics::get_campaigns,
        handlers::analytics::get_flows,
        handlers::analytics::get_segments,
        handlers::analytics::get_forms,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::ActiveSeatRef,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Contracts ---
            models::contract::Contract,
            models::contract::AiCreditUsage,
            models::contract::CreateContractPayload,
            models::contract::ConsumeCreditsPayload,
            handlers::contract::AddCreditsPayload,

            // --- Seats ---
            models::seat::SeatStatus,
            models::seat::ContractSeat,
            models::seat::StoreAccess,
            models::seat::SeatWithUser,
            models::seat::SeatDetail,
            models::seat::InviteSeatPayload,
            models::seat::UpdateSeatRolePayload,

            // --- RBAC ---
            models::role::Role,
            models::role::CreateRolePayload,
            models::role::PermissionSnapshot,
            models::role::PermissionCatalogEntry,

            // --- Stores ---
            models::store::Store,
            models::store::TeamMember,
            models::store::StoreSettings,
            models::store::CreateStorePayload,
            models::store::UpdateSettingsPayload,

            // --- Permissions (payloads) ---
            handlers::permissions::GrantAccessPayload,
            handlers::permissions::UpdateRolePayload,
            handlers::permissions::CheckPermissionsPayload,

            // --- Analytics ---
            models::analytics::AccountSummary,
            models::analytics::RevenueSeriesEntry,
            models::analytics::CampaignStat,
            models::analytics::FlowStat,
            models::analytics::SegmentStat,
            models::analytics::FormStat,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Dados do Usuário e Perfil"),
        (name = "Contracts", description = "Contratos, Planos e Créditos de IA"),
        (name = "Seats", description = "Assentos do Contrato (Equipe)"),
        (name = "RBAC", description = "Controle de Acesso (Cargos e Permissões)"),
        (name = "Stores", description = "Gestão de Lojas"),
        (name = "Permissions", description = "Resolução e Concessão de Acesso por Loja"),
        (name = "Settings", description = "Configurações da Loja"),
        (name = "Analytics", description = "Métricas de Campanhas, Fluxos e Segmentos")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
