pub mod database;
pub mod error;
pub mod server;
pub mod services;
