// src/templates.rs
use crate::{error::AppResult, models::requisicao::Requisicao, pagination::Page};
use askama::Template;
use axum::response::Html;

// Struct para o template `login.html`
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub error: Option<String>,
}

/// Home do utilizador: formulário de nova requisição e, em `/requisicoes`,
/// a lista paginada das suas requisições.
#[derive(Template)]
#[template(path = "home_user.html")]
pub struct UserHomePage {
    pub user_name: String,
    pub setor: String,
    pub can_submit: bool,
    pub total_requisicoes: usize,
    pub page: Option<Page<Requisicao>>,
    pub error: Option<String>,
}

// Dashboards de setor (DAF, GSTR, ADMIN)
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub setor: String,
    pub user_name: String,
    pub queue_title: &'static str,
    pub page: Page<Requisicao>,
}

/// Renderiza um template; o erro fica no log e segue como `AppError`.
pub fn render<T: Template>(template: &T) -> AppResult<Html<String>> {
    template.render().map(Html).map_err(|e| {
        tracing::error!("Falha ao renderizar template: {}", e);
        e.into()
    })
}
