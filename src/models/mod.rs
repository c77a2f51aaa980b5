// src/models/mod.rs
pub mod requisicao;
pub mod sector;
pub mod user;
