// src/web/requisicao_handlers.rs
use crate::{
    error::AppResult,
    models::requisicao::RequisicaoForm,
    pagination::{Page, PAGE_SIZE},
    services::requisicao_service,
    state::AppState,
    templates::{render, UserHomePage},
    web::{dashboard_handlers::PageQuery, mw_auth::CurrentUser, routes::HOME_ROUTE},
};
use axum::{
    extract::{Extension, Form, Query, State},
    response::{IntoResponse, Redirect, Response},
};

pub const INSERT_FAILED: &str = "Erro ao salvar a requisição. Tente novamente.";

/// Página do utilizador com o formulário; `error` aparece por cima.
async fn user_page(state: &AppState, user: &CurrentUser, error: Option<String>) -> AppResult<Response> {
    let total = requisicao_service::list_by_user(&state.db_pool, &user.name).await.len();
    let template = UserHomePage {
        user_name: user.name.clone(),
        setor: user.sector_label(),
        can_submit: true,
        total_requisicoes: total,
        page: None,
        error,
    };
    Ok(render(&template)?.into_response())
}

// GET /requerimento/novo/
pub async fn show_form(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Response> {
    user_page(&state, &user, None).await
}

// POST /requerimento/novo/
pub async fn handle_insert(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Form(form): Form<RequisicaoForm>,
) -> AppResult<Response> {
    let nova = match form.validate() {
        Ok(nova) => nova,
        Err(msg) => {
            tracing::warn!("Requisição inválida de '{}': {}", user.name, msg);
            return user_page(&state, &user, Some(msg)).await;
        }
    };

    match requisicao_service::insert(&state.db_pool, &nova, &user.name).await {
        Ok(_) => Ok(Redirect::to(HOME_ROUTE).into_response()),
        Err(e) => {
            tracing::error!("ERRO DE INSERÇÃO NO BD: {}", e);
            user_page(&state, &user, Some(INSERT_FAILED.to_string())).await
        }
    }
}

// GET /requisicoes?page=N
pub async fn list_user_requisicoes(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<PageQuery>,
) -> AppResult<Response> {
    let todas = requisicao_service::list_by_user(&state.db_pool, &user.name).await;
    let total = todas.len();

    let template = UserHomePage {
        user_name: user.name.clone(),
        setor: user.sector_label(),
        can_submit: state.request_sectors.permits(user.sector.as_ref()),
        total_requisicoes: total,
        page: Some(Page::paginate(todas, params.page.as_deref(), PAGE_SIZE)),
        error: None,
    };
    Ok(render(&template)?.into_response())
}
