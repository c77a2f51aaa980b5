// src/error.rs
use axum::{http::StatusCode, response::Html, response::IntoResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro na base de dados: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Erro de migração da base de dados: {0}")]
    SqlxMigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Configuração inválida: {0}")]
    Config(String),

    #[error("Erro ao processar password")]
    PasswordHashingError,

    #[error("Já existe um utilizador com o email {0}")]
    EmailAlreadyExists(String),

    #[error("Erro na sessão: {0}")]
    SessionError(String),

    #[error("Erro ao renderizar template: {0}")]
    TemplateError(#[from] askama::Error),

    #[error("Erro interno inesperado")]
    InternalServerError,
}

// Como converter AppError numa resposta HTTP
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // Detalhe fica no log, o utilizador só vê a mensagem genérica
        tracing::error!("Erro processado: {:?}", self);

        let (status, user_message) = match self {
            AppError::SqlxError(_) | AppError::SqlxMigrateError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao aceder aos dados.")
            }
            AppError::Config(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro de configuração.")
            }
            AppError::PasswordHashingError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao processar credenciais.")
            }
            AppError::EmailAlreadyExists(_) => {
                (StatusCode::CONFLICT, "Email já registado.")
            }
            AppError::SessionError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro na gestão da sua sessão.")
            }
            AppError::TemplateError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao carregar a página.")
            }
            AppError::InternalServerError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        (status, Html(format!(r#"
            <!DOCTYPE html><html><head><title>Erro</title><style>body{{font-family:sans-serif;}}</style></head>
            <body><h1>Erro {status_code}</h1><p>{message}</p><a href="/login/">Voltar</a></body></html>
         "#, status_code=status.as_u16(), message=user_message))).into_response()
    }
}

impl From<tower_sessions::session::Error> for AppError {
    fn from(e: tower_sessions::session::Error) -> Self {
        AppError::SessionError(e.to_string())
    }
}

// Tipo Result padrão para a aplicação
pub type AppResult<T = ()> = Result<T, AppError>;
