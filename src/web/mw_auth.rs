// src/web/mw_auth.rs
use crate::{
    error::AppError,
    models::sector::Sector,
    services::requisicao_service::UNKNOWN_USER,
    web::routes::LOGIN_ROUTE,
};
use axum::{
    extract::{OriginalUri, Request},
    http::header::HOST,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

// Chaves guardadas na sessão depois do login
pub const IS_AUTHENTICATED: &str = "is_authenticated";
pub const USER_ID: &str = "user_id";
pub const USER_NAME: &str = "user_name";
pub const USER_SETOR: &str = "user_setor";

/// Utilizador da sessão, posto nas extensões da requisição pelos middlewares.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: i64,
    pub name: String,
    pub sector: Option<Sector>,
}

impl CurrentUser {
    pub fn sector_label(&self) -> String {
        self.sector
            .as_ref()
            .map(Sector::to_string)
            .unwrap_or_default()
    }
}

/// Esquema público do site, posto como extensão em `main`. Com cookies
/// `Secure` o site só é servido por https (normalmente atrás de um proxy TLS).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicScheme(pub &'static str);

impl PublicScheme {
    pub fn from_secure(secure: bool) -> Self {
        PublicScheme(if secure { "https" } else { "http" })
    }
}

/// Lê o utilizador da sessão. `None` se `is_authenticated` não estiver a `true`.
pub async fn current_user(session: &Session) -> Result<Option<CurrentUser>, AppError> {
    let logged_in = session.get::<bool>(IS_AUTHENTICATED).await?.unwrap_or(false);
    if !logged_in {
        return Ok(None);
    }

    let id = session.get::<i64>(USER_ID).await?.unwrap_or_default();
    let name = session
        .get::<Option<String>>(USER_NAME)
        .await?
        .flatten()
        .unwrap_or_else(|| UNKNOWN_USER.to_string());
    // Setor nulo ou vazio fica como None (nunca passa numa allow-list)
    let sector = session
        .get::<Option<String>>(USER_SETOR)
        .await?
        .flatten()
        .filter(|s| !s.trim().is_empty())
        .map(|s| Sector::parse(&s));

    Ok(Some(CurrentUser { id, name, sector }))
}

/// Redireciona para o login com `next` = URL absoluta da requisição atual.
pub fn login_redirect(request: &Request) -> Response {
    let uri = request
        .extensions()
        .get::<OriginalUri>()
        .map(|original| original.0.clone())
        .unwrap_or_else(|| request.uri().clone());
    let path = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    let next = match request.headers().get(HOST).and_then(|h| h.to_str().ok()) {
        Some(host) => format!("{}://{}{}", request_scheme(request, &uri), host, path),
        None => path.to_string(),
    };

    let target = format!("{}?next={}", LOGIN_ROUTE, urlencoding::encode(&next));
    Redirect::to(&target).into_response()
}

// X-Forwarded-Proto do proxy > esquema configurado > esquema do URI > http
fn request_scheme<'a>(request: &'a Request, uri: &'a axum::http::Uri) -> &'a str {
    let forwarded = request
        .headers()
        .get("x-forwarded-proto")
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .and_then(|proto| {
            if proto.eq_ignore_ascii_case("https") {
                Some("https")
            } else if proto.eq_ignore_ascii_case("http") {
                Some("http")
            } else {
                None
            }
        });

    forwarded
        .or_else(|| request.extensions().get::<PublicScheme>().map(|s| s.0))
        .or_else(|| uri.scheme_str())
        .unwrap_or("http")
}

// Middleware que verifica se o utilizador está logado
pub async fn require_login(
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match current_user(&session).await {
        Ok(Some(user)) => {
            tracing::debug!("Autenticação MW: '{}' (id {}) autenticado. Prosseguindo...", user.name, user.id);
            request.extensions_mut().insert(user);
            Ok(next.run(request).await)
        }
        Ok(None) => {
            tracing::debug!("Autenticação MW: Não autenticado. Redirecionando para o login");
            Ok(login_redirect(&request))
        }
        Err(e) => {
            tracing::error!("Autenticação MW: Erro ao ler sessão: {:?}", e);
            Err(e)
        }
    }
}
