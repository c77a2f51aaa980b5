// src/web/mw_sector.rs
use crate::{
    error::AppError,
    models::sector::Sector,
    web::{
        mw_auth::{current_user, login_redirect},
        routes::HOME_ROUTE,
    },
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tower_sessions::Session;

/// Lista de setores com acesso a um grupo de rotas.
/// Construída no arranque e passada ao middleware no registo das rotas.
#[derive(Debug, Clone)]
pub struct SectorAllowList(Arc<[Sector]>);

impl SectorAllowList {
    pub fn new(sectors: impl IntoIterator<Item = Sector>) -> Self {
        SectorAllowList(sectors.into_iter().collect())
    }

    pub fn only(sector: Sector) -> Self {
        Self::new([sector])
    }

    /// `Sector::parse` já normaliza maiúsculas, então a comparação é case-insensitive.
    pub fn permits(&self, sector: Option<&Sector>) -> bool {
        sector.is_some_and(|s| self.0.contains(s))
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.0
    }
}

/// Login obrigatório + setor da sessão na allow-list.
/// Sem permissão: regista no log e redireciona para a home.
pub async fn require_sector(
    State(allowed): State<SectorAllowList>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(user) = current_user(&session).await? else {
        tracing::debug!("Setor MW: Não autenticado. Redirecionando para o login");
        return Ok(login_redirect(&request));
    };

    if allowed.permits(user.sector.as_ref()) {
        tracing::debug!("Setor MW: Acesso concedido para '{}' ({})", user.name, user.sector_label());
        request.extensions_mut().insert(user);
        Ok(next.run(request).await)
    } else {
        tracing::warn!(
            "ACESSO NEGADO: Utilizador '{}' de setor '{}' tentou aceder a {} (permitidos: {:?})",
            user.name,
            user.sector_label(),
            request.uri().path(),
            allowed.sectors()
        );
        Ok(Redirect::to(HOME_ROUTE).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_membership() {
        let allowed = SectorAllowList::new([Sector::Daf, Sector::parse("logistica")]);
        assert!(allowed.permits(Some(&Sector::parse("daf"))));
        assert!(allowed.permits(Some(&Sector::parse("Logistica"))));
        assert!(!allowed.permits(Some(&Sector::Gstr)));
        assert!(!allowed.permits(Some(&Sector::parse("outro"))));
        assert!(!allowed.permits(None));
    }

    #[test]
    fn only_allows_a_single_sector() {
        let admin = SectorAllowList::only(Sector::Admin);
        assert!(admin.permits(Some(&Sector::Admin)));
        assert!(!admin.permits(Some(&Sector::Daf)));
        assert_eq!(admin.sectors(), &[Sector::Admin]);
    }
}
