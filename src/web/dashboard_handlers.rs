// src/web/dashboard_handlers.rs
use crate::{
    error::AppResult,
    models::sector::Sector,
    pagination::{Page, PAGE_SIZE},
    services::requisicao_service,
    state::AppState,
    templates::{render, DashboardPage, UserHomePage},
    web::mw_auth::CurrentUser,
};
use axum::{
    extract::{Extension, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

// ?page=N (valor cru; a validação fica com o Pager)
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

async fn sector_dashboard(
    state: &AppState,
    user: &CurrentUser,
    sector: Sector,
    queue_title: &'static str,
    params: &PageQuery,
) -> AppResult<Response> {
    tracing::debug!("Painel {}: acesso de '{}'", sector, user.name);
    let fila = requisicao_service::list_queue_for_sector(&state.db_pool, &sector).await;

    let template = DashboardPage {
        setor: sector.to_string(),
        user_name: user.name.clone(),
        queue_title,
        page: Page::paginate(fila, params.page.as_deref(), PAGE_SIZE),
    };
    Ok(render(&template)?.into_response())
}

// GET /dashboard/daf/
pub async fn daf_dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<PageQuery>,
) -> AppResult<Response> {
    sector_dashboard(&state, &user, Sector::Daf, "Aguardando aprovação DAF", &params).await
}

// GET /dashboard/gstr/
pub async fn gstr_dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<PageQuery>,
) -> AppResult<Response> {
    sector_dashboard(&state, &user, Sector::Gstr, "Aguardando aprovação GSTR", &params).await
}

// GET /dashboard/admin/
pub async fn admin_dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<PageQuery>,
) -> AppResult<Response> {
    sector_dashboard(&state, &user, Sector::Admin, "Todas as requisições", &params).await
}

/// GET /dashboard/home/ — só exige login.
pub async fn home(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Response> {
    let total = requisicao_service::list_by_user(&state.db_pool, &user.name).await.len();

    let template = UserHomePage {
        user_name: user.name.clone(),
        setor: user.sector_label(),
        can_submit: state.request_sectors.permits(user.sector.as_ref()),
        total_requisicoes: total,
        page: None,
        error: None,
    };
    Ok(render(&template)?.into_response())
}
