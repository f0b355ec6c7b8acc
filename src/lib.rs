pub mod config;
pub mod database;
pub mod errors;
pub mod filters;
pub mod handlers;
pub mod routes;
pub mod services;
