// src/state.rs
use crate::web::mw_sector::SectorAllowList;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    // Setores que podem submeter requisições (lido da tabela `setores` no arranque)
    pub request_sectors: SectorAllowList,
}

// Permite extrair o pool da DB diretamente
impl axum::extract::FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> SqlitePool {
        state.db_pool.clone()
    }
}
