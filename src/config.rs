// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::common::i18n::I18nStore;
use crate::db::{
    AnalyticsRepository, AuditRepository, ContractRepository, RoleRepository, SeatRepository,
    SettingsRepository, StoreRepository, UserRepository,
};
use crate::services::{
    analytics_service::AnalyticsService, auth::AuthService, contract_service::ContractService,
    permission_service::PermissionService, role_service::RoleService, store_service::StoreService,
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    pub i18n_store: I18nStore,

    // O guardião de tenancy consulta assentos direto no repositório
    pub seat_repo: SeatRepository,

    pub auth_service: AuthService,
    pub permission_service: PermissionService,
    pub contract_service: ContractService,
    pub store_service: StoreService,
    pub role_service: RoleService,
    pub analytics_service: AnalyticsService,
}

impl AppState {
    // A assinatura retorna um Result: se a configuração falhar, a
    // aplicação não deve iniciar.
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let contract_repo = ContractRepository::new(db_pool.clone());
        let seat_repo = SeatRepository::new(db_pool.clone());
        let store_repo = StoreRepository::new(db_pool.clone());
        let role_repo = RoleRepository::new(db_pool.clone());
        let settings_repo = SettingsRepository::new(db_pool.clone());
        let analytics_repo = AnalyticsRepository::new(db_pool.clone());
        let audit_repo = AuditRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo.clone(), jwt_secret.clone(), db_pool.clone());

        let permission_service = PermissionService::new(
            user_repo.clone(),
            store_repo.clone(),
            seat_repo.clone(),
            role_repo.clone(),
            contract_repo.clone(),
            audit_repo.clone(),
            db_pool.clone(),
        );

        let contract_service = ContractService::new(
            contract_repo.clone(),
            seat_repo.clone(),
            user_repo.clone(),
            role_repo.clone(),
            audit_repo.clone(),
            permission_service.clone(),
            store_repo.clone(),
            db_pool.clone(),
        );

        let store_service = StoreService::new(
            store_repo.clone(),
            contract_repo.clone(),
            seat_repo.clone(),
            settings_repo.clone(),
            permission_service.clone(),
            db_pool.clone(),
        );

        let role_service = RoleService::new(role_repo.clone(), db_pool.clone());

        let analytics_service = AnalyticsService::new(
            analytics_repo.clone(),
            store_repo.clone(),
            permission_service.clone(),
        );

        Ok(Self {
            db_pool,
            jwt_secret,
            i18n_store: I18nStore::new(),
            seat_repo,
            auth_service,
            permission_service,
            contract_service,
            store_service,
            role_service,
            analytics_service,
        })
    }
}
