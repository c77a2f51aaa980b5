// src/services/user_service.rs
use crate::{
    error::{AppError, AppResult},
    models::user::User,
    services::auth_service,
};
use sqlx::SqlitePool;

/// Busca um utilizador pelo email (comparação sem distinção de maiúsculas).
pub async fn find_user_by_email(db_pool: &SqlitePool, email: &str) -> AppResult<Option<User>> {
    tracing::debug!("Buscando utilizador por email: {}", email);
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id_user, nome, email, senha, setor
        FROM "user"
        WHERE email = ?1
        "#,
    )
    .bind(email)
    .fetch_optional(db_pool)
    .await?;

    if user.is_none() {
        tracing::debug!("Nenhum utilizador com email '{}'.", email);
    }
    Ok(user)
}

/// Cria um utilizador com a senha em hash bcrypt. Devolve o `id_user` novo.
pub async fn create_user(
    db_pool: &SqlitePool,
    nome: &str,
    email: &str,
    raw_password: &str,
    setor: &str,
) -> AppResult<i64> {
    tracing::info!("Tentando criar utilizador: {}", email);
    let senha = auth_service::hash_password(raw_password).await?;
    insert_user(db_pool, nome, email, &senha, setor).await
}

/// Mesmo que `create_user`, com custo bcrypt baixo para os testes.
#[cfg(test)]
pub(crate) async fn insert_user_with_cost(
    db_pool: &SqlitePool,
    nome: &str,
    email: &str,
    raw_password: &str,
    setor: &str,
    cost: u32,
) -> AppResult<i64> {
    let senha = auth_service::hash_password_with_cost(raw_password, cost).await?;
    insert_user(db_pool, nome, email, &senha, setor).await
}

async fn insert_user(
    db_pool: &SqlitePool,
    nome: &str,
    email: &str,
    senha: &str,
    setor: &str,
) -> AppResult<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO "user" (nome, senha, email, setor)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(nome)
    .bind(senha)
    .bind(email.trim())
    .bind(setor.trim().to_uppercase())
    .execute(db_pool)
    .await;

    match result {
        Ok(done) => {
            tracing::info!("✅ Utilizador '{}' criado com sucesso.", email);
            Ok(done.last_insert_rowid())
        }
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            tracing::warn!("Falha ao criar user: email '{}' já existe.", email);
            Err(AppError::EmailAlreadyExists(email.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::create_test_pool, models::sector::Sector};

    #[tokio::test]
    async fn created_user_is_found_by_email() {
        let pool = create_test_pool().await;
        let id = insert_user_with_cost(&pool, "Bruno", "bruno@intra.local", "pw", " daf ", 4)
            .await
            .unwrap();

        let user = find_user_by_email(&pool, "BRUNO@intra.local").await.unwrap().unwrap();
        assert_eq!(user.id_user, id);
        assert_eq!(user.nome, "Bruno");
        assert_eq!(user.setor.as_deref(), Some("DAF"));
        assert_eq!(user.sector(), Some(Sector::Daf));
        assert_ne!(user.senha, "pw");
    }

    #[tokio::test]
    async fn create_user_stores_a_bcrypt_hash() {
        let pool = create_test_pool().await;
        create_user(&pool, "Rita", "rita@intra.local", "segredo", "GSTR").await.unwrap();

        let user = find_user_by_email(&pool, "rita@intra.local").await.unwrap().unwrap();
        assert!(user.senha.starts_with("$2"));
        assert!(auth_service::verify_password("segredo", &user.senha).await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let pool = create_test_pool().await;
        insert_user_with_cost(&pool, "C", "c@intra.local", "pw", "GEAI", 4).await.unwrap();
        let err = insert_user_with_cost(&pool, "C2", "c@intra.local", "pw", "GEAI", 4)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmailAlreadyExists(_)));
    }
}
