// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;
use crate::middleware::tenancy::contract_guard;

#[tokio::main]
async fn main() {
    // Inicializa o logger.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas de usuário (protegidas pelo middleware)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route("/me/contracts", get(handlers::auth::get_my_contracts))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Contratos: criação e listagem só exigem autenticação
    let contract_routes = Router::new()
        .route(
            "/",
            post(handlers::contract::create_contract).get(handlers::contract::list_my_contracts),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Operações dentro de um contrato exigem o cabeçalho x-contract-id
    // e um assento ativo (contract_guard)
    let contract_scoped_routes = Router::new()
        .route(
            "/seats",
            get(handlers::seats::list_seats).post(handlers::seats::invite_seat),
        )
        .route(
            "/seats/{seat_id}",
            axum::routing::put(handlers::seats::update_seat_role)
                .delete(handlers::seats::revoke_seat),
        )
        .route(
            "/roles",
            post(handlers::role::create_role).get(handlers::role::list_roles),
        )
        .route("/credits", post(handlers::contract::add_credits))
        .route(
            "/credits/consume",
            post(handlers::contract::consume_credits),
        )
        .route(
            "/credits/usage",
            get(handlers::contract::list_credit_usage),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            contract_guard,
        ));

    let store_routes = Router::new()
        .route(
            "/",
            post(handlers::store::create_store).get(handlers::store::list_stores),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            contract_guard,
        ));

    // O contexto dessas rotas vem da própria loja, então basta autenticar
    let store_scoped_routes = Router::new()
        .route(
            "/{store_public_id}",
            axum::routing::delete(handlers::store::delete_store),
        )
        .route(
            "/{store_public_id}/permissions",
            get(handlers::permissions::get_my_permissions)
                .post(handlers::permissions::grant_access),
        )
        .route(
            "/{store_public_id}/permissions/check",
            post(handlers::permissions::check_permissions),
        )
        .route(
            "/{store_public_id}/permissions/{user_id}",
            axum::routing::put(handlers::permissions::update_role)
                .delete(handlers::permissions::revoke_access),
        )
        .route(
            "/{store_public_id}/settings",
            get(handlers::settings::get_settings).put(handlers::settings::update_settings),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let analytics_routes = Router::new()
        .route("/summary", get(handlers::analytics::get_summary))
        .route("/revenue", get(handlers::analytics::get_revenue_series))
        .route("/campaigns", get(handlers::analytics::get_campaigns))
        .route("/flows", get(handlers::analytics::get_flows))
        .route("/segments", get(handlers::analytics::get_segments))
        .route("/forms", get(handlers::analytics::get_forms))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/permissions", get(handlers::role::list_permissions))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/contracts", contract_routes)
        .nest("/api/contracts", contract_scoped_routes)
        .nest("/api/stores", store_routes)
        .nest("/api/stores", store_scoped_routes)
        .nest("/api/analytics", analytics_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
