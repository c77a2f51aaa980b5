// src/config.rs
use crate::error::{AppError, AppResult};
use std::{env, net::SocketAddr};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const MIN_SECRET_LEN: usize = 64;

/// Configuração lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub session_secret: Option<String>,
    pub session_secure: bool,
}

impl Config {
    /// Lê a configuração das variáveis de ambiente. O `.env` é carregado em `main`.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| AppError::Config("DATABASE_URL não definida".to_string()))?;

        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("BIND_ADDR inválido '{}': {}", bind_raw, e)))?;

        let session_secure = match lookup("SESSION_SECURE") {
            Some(v) => parse_bool(&v)
                .ok_or_else(|| AppError::Config(format!("SESSION_SECURE inválido: '{}'", v)))?,
            None => false,
        };

        Ok(Config {
            database_url,
            bind_addr,
            session_secret: lookup("SESSION_SECRET"),
            session_secure,
        })
    }

    /// Segredo para assinar o cookie de sessão. Obrigatório para o servidor.
    pub fn require_session_secret(&self) -> AppResult<&str> {
        let secret = self
            .session_secret
            .as_deref()
            .ok_or_else(|| AppError::Config("SESSION_SECRET não definida".to_string()))?;
        if secret.len() < MIN_SECRET_LEN {
            return Err(AppError::Config(format!(
                "SESSION_SECRET deve ter pelo menos {} bytes",
                MIN_SECRET_LEN
            )));
        }
        Ok(secret)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn config(secret: Option<&str>) -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            bind_addr: DEFAULT_BIND_ADDR.parse().unwrap(),
            session_secret: secret.map(str::to_string),
            session_secure: false,
        }
    }

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" off "), Some(false));
        assert_eq!(parse_bool("talvez"), None);
    }

    #[test]
    fn session_secret_must_be_long_enough() {
        assert!(config(None).require_session_secret().is_err());
        assert!(config(Some("curta")).require_session_secret().is_err());
        let long = "x".repeat(MIN_SECRET_LEN);
        assert_eq!(config(Some(long.as_str())).require_session_secret().unwrap(), long);
    }

    #[test]
    fn missing_database_url_is_a_named_config_error() {
        let err = Config::from_lookup(lookup_in(&[("BIND_ADDR", "127.0.0.1:8000")])).unwrap_err();
        match err {
            AppError::Config(msg) => assert!(msg.contains("DATABASE_URL"), "msg = {}", msg),
            other => panic!("erro inesperado: {:?}", other),
        }
    }

    #[test]
    fn reads_values_and_defaults() {
        let config = Config::from_lookup(lookup_in(&[
            ("DATABASE_URL", "sqlite://transporte.db"),
            ("SESSION_SECURE", "true"),
        ]))
        .unwrap();
        assert_eq!(config.database_url, "sqlite://transporte.db");
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse::<SocketAddr>().unwrap());
        assert!(config.session_secure);
        assert!(config.session_secret.is_none());

        let err = Config::from_lookup(lookup_in(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("SESSION_SECURE", "talvez"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
