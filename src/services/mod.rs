// src/services/mod.rs
pub mod auth_service;
pub mod requisicao_service;
pub mod sector_service;
pub mod user_service;
