pub mod user_repo;
pub use user_repo::UserRepository;
pub mod contract_repo;
pub use contract_repo::ContractRepository;
pub mod seat_repo;
pub use seat_repo::SeatRepository;
pub mod store_repo;
pub use store_repo::StoreRepository;
pub mod role_repo;
pub use role_repo::RoleRepository;
pub mod settings_repo;
pub use settings_repo::SettingsRepository;
pub mod analytics_repo;
pub use analytics_repo::AnalyticsRepository;
pub mod audit_repo;
pub use audit_repo::AuditRepository;
