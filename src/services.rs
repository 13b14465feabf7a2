pub mod analytics_service;
pub mod auth;
pub mod contract_service;
pub mod permission_service;
pub mod role_service;
pub mod store_service;
