// src/models/user.rs
use serde::Deserialize;
use sqlx::FromRow;

use super::sector::Sector;

// Linha da tabela `user`. `senha` é um hash bcrypt.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id_user: i64,
    pub nome: String,
    pub email: String,
    pub senha: String,
    pub setor: Option<String>,
}

impl User {
    /// Setor validado; `None` se a coluna estiver vazia.
    pub fn sector(&self) -> Option<Sector> {
        self.setor
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(Sector::parse)
    }
}

// Struct para dados do formulário de login
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}
