// src/web/mod.rs
pub mod auth_handlers;
pub mod dashboard_handlers;
pub mod mw_auth;
pub mod mw_sector;
pub mod requisicao_handlers;
pub mod routes;
