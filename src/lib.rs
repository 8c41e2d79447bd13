pub mod app_state;
pub mod auth;
pub mod config;
pub mod constants;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod services;
pub mod store;
