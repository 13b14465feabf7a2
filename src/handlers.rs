pub mod analytics;
pub mod auth;
pub mod contract;
pub mod permissions;
pub mod role;
pub mod seats;
pub mod settings;
pub mod store;
