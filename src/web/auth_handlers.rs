// src/web/auth_handlers.rs
use crate::{
    error::AppResult,
    models::{sector::Sector, user::LoginForm},
    services::auth_service,
    state::AppState,
    templates::{render, LoginPage},
    web::{
        mw_auth::{current_user, IS_AUTHENTICATED, USER_ID, USER_NAME, USER_SETOR},
        routes::{HOME_ROUTE, LOGIN_ROUTE},
    },
};
use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

pub const INVALID_CREDENTIALS: &str = "Credenciais inválidas.";

fn landing_route(sector: Option<&Sector>) -> &'static str {
    sector.map(Sector::landing_route).unwrap_or(HOME_ROUTE)
}

// GET / e GET /login/
pub async fn show_login_form(session: Session) -> AppResult<Response> {
    if let Some(user) = current_user(&session).await? {
        tracing::debug!("GET /login/: '{}' já logado, redirecionando", user.name);
        return Ok(Redirect::to(landing_route(user.sector.as_ref())).into_response());
    }

    Ok(render(&LoginPage { error: None })?.into_response())
}

// POST / e POST /login/
pub async fn handle_login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    tracing::info!("Tentativa de login para: {}", form.email);

    let Some(user) = auth_service::authenticate(&state.db_pool, &form.email, &form.password).await? else {
        let page = LoginPage { error: Some(INVALID_CREDENTIALS.to_string()) };
        return Ok(render(&page)?.into_response());
    };

    // Novo ID de sessão antes de guardar a identidade
    session.cycle_id().await?;
    session.insert(USER_ID, user.id_user).await?;
    session.insert(IS_AUTHENTICATED, true).await?;
    session.insert(USER_NAME, &user.nome).await?;
    session.insert(USER_SETOR, &user.setor).await?;

    let sector = user.sector();
    tracing::info!(
        "✅ Login bem-sucedido para: {} (setor {})",
        user.email,
        sector.as_ref().map(Sector::as_str).unwrap_or("-")
    );
    Ok(Redirect::to(landing_route(sector.as_ref())).into_response())
}

// GET /logout/
pub async fn handle_logout(session: Session) -> AppResult<Redirect> {
    let user_name: Option<String> = session.get::<Option<String>>(USER_NAME).await.ok().flatten().flatten();

    // Apaga todos os dados da sessão atual
    session.delete().await?;

    match user_name {
        Some(name) => tracing::info!("🚪 Utilizador '{}' desligado.", name),
        None => tracing::info!("🚪 Sessão anónima desligada."),
    }

    Ok(Redirect::to(LOGIN_ROUTE))
}
