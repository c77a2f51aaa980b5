// src/services/auth_service.rs
use crate::{
    error::{AppError, AppResult},
    models::user::User,
    services::user_service,
};
use sqlx::SqlitePool;

/// Verifica email + password. `Ok(None)` quando o email não existe ou a
/// password não confere (o chamador não distingue os dois casos).
pub async fn authenticate(
    db_pool: &SqlitePool,
    email: &str,
    password: &str,
) -> AppResult<Option<User>> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Ok(None);
    }

    let Some(user) = user_service::find_user_by_email(db_pool, email).await? else {
        tracing::warn!("Utilizador não encontrado: {}", email);
        return Ok(None);
    };

    match verify_password(password, &user.senha).await {
        Ok(true) => Ok(Some(user)),
        Ok(false) => {
            tracing::warn!("Senha incorreta para: {}", email);
            Ok(None)
        }
        // Senha guardada que não é um hash bcrypt (ex.: linhas antigas em texto plano)
        Err(AppError::PasswordHashingError) => {
            tracing::warn!("Hash de senha inválido na DB para: {}. Login recusado.", email);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Verifica se a senha fornecida corresponde ao hash guardado.
pub async fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let password = password.to_string();
    let stored_hash = stored_hash.to_string();
    tokio::task::spawn_blocking(move || {
        tracing::debug!("Verificando hash bcrypt...");
        bcrypt::verify(&password, &stored_hash)
    })
    .await
    .map_err(|e| {
        tracing::error!("Erro na task spawn_blocking (verify_password): {:?}", e);
        AppError::InternalServerError
    })?
    .map_err(|e| {
        tracing::warn!("Erro bcrypt ao verificar senha: {:?}", e);
        AppError::PasswordHashingError
    })
}

/// Gera um hash bcrypt para uma senha.
pub async fn hash_password(password: &str) -> AppResult<String> {
    hash_password_with_cost(password, bcrypt::DEFAULT_COST).await
}

pub(crate) async fn hash_password_with_cost(password: &str, cost: u32) -> AppResult<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || {
        tracing::debug!("Gerando hash bcrypt...");
        bcrypt::hash(&password, cost)
    })
    .await
    .map_err(|e| {
        tracing::error!("Erro na task spawn_blocking (hash_password): {:?}", e);
        AppError::InternalServerError
    })?
    .map_err(|e| {
        tracing::error!("Erro bcrypt ao gerar hash: {:?}", e);
        AppError::PasswordHashingError
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;

    #[tokio::test]
    async fn hash_then_verify() {
        let hash = hash_password_with_cost("segredo", 4).await.unwrap();
        assert_ne!(hash, "segredo");
        assert!(verify_password("segredo", &hash).await.unwrap());
        assert!(!verify_password("outra", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn authenticate_checks_email_and_password() {
        let pool = create_test_pool().await;
        user_service::insert_user_with_cost(&pool, "Ana", "ana@intra.local", "segredo", "GSTR", 4)
            .await
            .unwrap();

        let user = authenticate(&pool, "ana@intra.local", "segredo").await.unwrap();
        assert_eq!(user.map(|u| u.nome), Some("Ana".to_string()));

        assert!(authenticate(&pool, "ana@intra.local", "errada").await.unwrap().is_none());
        assert!(authenticate(&pool, "ninguem@intra.local", "segredo").await.unwrap().is_none());
        assert!(authenticate(&pool, "", "").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn stored_plaintext_password_is_a_failed_match() {
        let pool = create_test_pool().await;
        sqlx::query(r#"INSERT INTO "user" (nome, senha, email, setor) VALUES ('Leo', 'segredo', 'leo@intra.local', 'GEAI')"#)
            .execute(&pool)
            .await
            .unwrap();

        assert!(authenticate(&pool, "leo@intra.local", "segredo").await.unwrap().is_none());
    }
}
