// src/services/requisicao_service.rs
use crate::{
    error::AppResult,
    models::{
        requisicao::{NovaRequisicao, Requisicao},
        sector::Sector,
    },
};
use sqlx::SqlitePool;

/// Nome usado quando a sessão não tem `user_name`.
pub const UNKNOWN_USER: &str = "DESCONHECIDO";

const SELECT_COLUMNS: &str = r#"
    SELECT id_req, itinerario, data, hora, qtd_pass, obs, usuario, status_daf, status_gstr
    FROM requisicoes
"#;

/// Requisições do utilizador, mais recentes primeiro.
/// Erros de DB ficam no log e devolvem lista vazia.
pub async fn list_by_user(db_pool: &SqlitePool, user_name: &str) -> Vec<Requisicao> {
    let owner = user_name.trim().to_uppercase();
    if owner.is_empty() || owner == UNKNOWN_USER {
        return Vec::new();
    }

    let sql = format!("{SELECT_COLUMNS} WHERE usuario = ?1 ORDER BY data DESC, hora DESC");
    match sqlx::query_as::<_, Requisicao>(&sql)
        .bind(&owner)
        .fetch_all(db_pool)
        .await
    {
        Ok(rows) => {
            tracing::debug!("{} requisições encontradas para {}", rows.len(), owner);
            rows
        }
        Err(e) => {
            tracing::error!("ERRO DE CONSULTA NO BD: {}", e);
            Vec::new()
        }
    }
}

/// Fila de trabalho de cada dashboard de setor.
/// DAF aprova primeiro, GSTR depois; ADMIN vê tudo.
fn queue_filter(sector: &Sector) -> Option<&'static str> {
    match sector {
        Sector::Daf => Some("WHERE status_daf = 0"),
        Sector::Gstr => Some("WHERE status_daf = 1 AND status_gstr = 0"),
        Sector::Admin => Some(""),
        _ => None,
    }
}

pub async fn list_queue_for_sector(db_pool: &SqlitePool, sector: &Sector) -> Vec<Requisicao> {
    let Some(filter) = queue_filter(sector) else {
        return Vec::new();
    };

    let sql = format!("{SELECT_COLUMNS} {filter} ORDER BY data DESC, hora DESC");
    sqlx::query_as::<_, Requisicao>(&sql)
        .fetch_all(db_pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("ERRO DE CONSULTA NO BD (fila {}): {}", sector, e);
            Vec::new()
        })
}

/// Insere uma requisição nova, pendente nos dois setores (status 0/0).
pub async fn insert(db_pool: &SqlitePool, nova: &NovaRequisicao, owner: &str) -> AppResult<i64> {
    let owner = owner.trim().to_uppercase();
    let result = sqlx::query(
        r#"
        INSERT INTO requisicoes (itinerario, data, hora, qtd_pass, obs, usuario, status_daf, status_gstr)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, 0)
        "#,
    )
    .bind(&nova.itinerario)
    .bind(nova.data.format("%Y-%m-%d").to_string())
    .bind(nova.hora.format("%H:%M").to_string())
    .bind(nova.qtd_pass)
    .bind(nova.obs.as_deref())
    .bind(&owner)
    .execute(db_pool)
    .await?;

    let id = result.last_insert_rowid();
    tracing::info!("Requisição {} criada por {}", id, owner);
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;
    use chrono::{NaiveDate, NaiveTime};

    fn nova(day: u32, hour: u32) -> NovaRequisicao {
        NovaRequisicao {
            itinerario: format!("Viagem {day}/{hour}"),
            data: NaiveDate::from_ymd_opt(2025, 10, day).unwrap(),
            hora: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            qtd_pass: 2,
            obs: None,
        }
    }

    #[tokio::test]
    async fn list_by_user_matches_uppercased_owner_newest_first() {
        let pool = create_test_pool().await;
        insert(&pool, &nova(1, 9), "Maria").await.unwrap();
        insert(&pool, &nova(2, 8), "maria").await.unwrap();
        insert(&pool, &nova(2, 14), "MARIA").await.unwrap();
        insert(&pool, &nova(3, 10), "Joao").await.unwrap();

        let rows = list_by_user(&pool, "maria").await;
        let order: Vec<(&str, &str)> = rows.iter().map(|r| (r.data.as_str(), r.hora.as_str())).collect();
        assert_eq!(
            order,
            vec![("2025-10-02", "14:00"), ("2025-10-02", "08:00"), ("2025-10-01", "09:00")]
        );
        assert!(rows.iter().all(|r| r.usuario == "MARIA" && !r.status_daf && !r.status_gstr));
    }

    #[tokio::test]
    async fn unknown_user_gets_nothing() {
        let pool = create_test_pool().await;
        insert(&pool, &nova(1, 9), UNKNOWN_USER).await.unwrap();
        assert!(list_by_user(&pool, "desconhecido").await.is_empty());
        assert!(list_by_user(&pool, "  ").await.is_empty());
    }

    #[tokio::test]
    async fn read_failure_degrades_to_empty_list() {
        let pool = create_test_pool().await;
        insert(&pool, &nova(1, 9), "Maria").await.unwrap();
        sqlx::query("DROP TABLE requisicoes").execute(&pool).await.unwrap();

        assert!(list_by_user(&pool, "Maria").await.is_empty());
        assert!(list_queue_for_sector(&pool, &Sector::Admin).await.is_empty());
        assert!(insert(&pool, &nova(1, 9), "Maria").await.is_err());
    }

    #[tokio::test]
    async fn sector_queues_follow_approval_chain() {
        let pool = create_test_pool().await;
        let pendente = insert(&pool, &nova(1, 9), "A").await.unwrap();
        let aprovada_daf = insert(&pool, &nova(2, 9), "A").await.unwrap();
        let aprovada = insert(&pool, &nova(3, 9), "A").await.unwrap();
        sqlx::query("UPDATE requisicoes SET status_daf = 1 WHERE id_req IN (?1, ?2)")
            .bind(aprovada_daf)
            .bind(aprovada)
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("UPDATE requisicoes SET status_gstr = 1 WHERE id_req = ?1")
            .bind(aprovada)
            .execute(&pool)
            .await
            .unwrap();

        let ids = |rows: Vec<Requisicao>| rows.into_iter().map(|r| r.id_req).collect::<Vec<_>>();
        assert_eq!(ids(list_queue_for_sector(&pool, &Sector::Daf).await), vec![pendente]);
        assert_eq!(ids(list_queue_for_sector(&pool, &Sector::Gstr).await), vec![aprovada_daf]);
        assert_eq!(
            ids(list_queue_for_sector(&pool, &Sector::Admin).await),
            vec![aprovada, aprovada_daf, pendente]
        );
        assert!(list_queue_for_sector(&pool, &Sector::Geai).await.is_empty());
    }
}
