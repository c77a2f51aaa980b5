// src/web/routes.rs
use crate::{
    models::sector::Sector,
    state::AppState,
    web::{
        auth_handlers, dashboard_handlers, mw_auth,
        mw_sector::{self, SectorAllowList},
        requisicao_handlers,
    },
};
use axum::{middleware, routing::get, Router};

pub const LOGIN_ROUTE: &str = "/login/";
pub const HOME_ROUTE: &str = "/dashboard/home/";

/// Rotas restritas a uma allow-list de setores (login + setor).
fn sector_routes(routes: Router<AppState>, allowed: SectorAllowList) -> Router<AppState> {
    routes.route_layer(middleware::from_fn_with_state(allowed, mw_sector::require_sector))
}

pub fn create_router(app_state: AppState) -> Router {
    // --- Rotas Públicas ---
    let public_routes = Router::new()
        .route("/", get(auth_handlers::show_login_form).post(auth_handlers::handle_login))
        .route(LOGIN_ROUTE, get(auth_handlers::show_login_form).post(auth_handlers::handle_login))
        .route("/logout/", get(auth_handlers::handle_logout));

    // --- Painéis por setor ---
    let daf_routes = sector_routes(
        Router::new().route("/dashboard/daf/", get(dashboard_handlers::daf_dashboard)),
        SectorAllowList::only(Sector::Daf),
    );
    let gstr_routes = sector_routes(
        Router::new().route("/dashboard/gstr/", get(dashboard_handlers::gstr_dashboard)),
        SectorAllowList::only(Sector::Gstr),
    );
    let admin_routes = sector_routes(
        Router::new().route("/dashboard/admin/", get(dashboard_handlers::admin_dashboard)),
        SectorAllowList::only(Sector::Admin),
    );

    // Submissão: qualquer setor do catálogo carregado no arranque
    let request_routes = sector_routes(
        Router::new().route(
            "/requerimento/novo/",
            get(requisicao_handlers::show_form).post(requisicao_handlers::handle_insert),
        ),
        app_state.request_sectors.clone(),
    );

    // --- Rotas que só exigem login ---
    let authenticated_routes = Router::new()
        .route(HOME_ROUTE, get(dashboard_handlers::home))
        .route("/requisicoes", get(requisicao_handlers::list_user_requisicoes))
        .route_layer(middleware::from_fn(mw_auth::require_login));

    Router::new()
        .merge(public_routes)
        .merge(daf_routes)
        .merge(gstr_routes)
        .merge(admin_routes)
        .merge(request_routes)
        .merge(authenticated_routes)
        .with_state(app_state)
}
