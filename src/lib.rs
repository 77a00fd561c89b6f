pub mod configuration;
pub mod database;
pub mod server;

pub use configuration::*;
pub use database::*;

// Re-export specific items from server
pub use server::services;
