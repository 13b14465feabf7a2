pub mod analytics;
pub mod audit;
pub mod auth;
pub mod contract;
pub mod role;
pub mod seat;
pub mod store;
