// src/services/sector_service.rs
use crate::models::sector::{Sector, FALLBACK_SECTORS};
use sqlx::SqlitePool;

/// Lê todos os setores da tabela `setores`. Se a query falhar, usa a lista fixa.
pub async fn list_all_sectors(db_pool: &SqlitePool) -> Vec<Sector> {
    let rows = sqlx::query_scalar::<_, Option<String>>("SELECT nome_setor FROM setores")
        .fetch_all(db_pool)
        .await;

    match rows {
        Ok(names) => {
            let sectors: Vec<Sector> = names
                .into_iter()
                .flatten()
                .map(|name| Sector::parse(&name))
                .collect();
            tracing::debug!("Setores carregados da DB: {:?}", sectors);
            sectors
        }
        Err(e) => {
            tracing::warn!(
                "ATENÇÃO: Não foi possível carregar setores da DB. Usando fallback. Erro: {}",
                e
            );
            FALLBACK_SECTORS.to_vec()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;

    #[tokio::test]
    async fn reads_seeded_sectors() {
        let pool = create_test_pool().await;
        sqlx::query("INSERT INTO setores (nome_setor) VALUES ('logistica')")
            .execute(&pool)
            .await
            .unwrap();

        let sectors = list_all_sectors(&pool).await;
        for expected in FALLBACK_SECTORS {
            assert!(sectors.contains(expected), "falta {:?}", expected);
        }
        assert!(sectors.contains(&Sector::Unrecognized("LOGISTICA".to_string())));
        assert!(!sectors.contains(&Sector::Admin));
    }

    #[tokio::test]
    async fn falls_back_when_table_is_missing() {
        let pool = create_test_pool().await;
        sqlx::query("DROP TABLE setores").execute(&pool).await.unwrap();

        assert_eq!(list_all_sectors(&pool).await, FALLBACK_SECTORS.to_vec());
    }
}
