// src/models/sector.rs
use std::fmt;

/// Setores usados quando a tabela `setores` não pode ser lida.
pub const FALLBACK_SECTORS: &[Sector] = &[
    Sector::Daf,
    Sector::Gstr,
    Sector::Padrao,
    Sector::Financeiro,
    Sector::Geai,
];

/// Setor de um utilizador, validado à entrada (DB ou sessão).
/// Valores desconhecidos ficam em `Unrecognized`, com o nome em maiúsculas.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Sector {
    Daf,
    Gstr,
    Admin,
    Padrao,
    Financeiro,
    Geai,
    Unrecognized(String),
}

impl Sector {
    /// Converte o texto guardado (case-insensitive, ignora espaços nas pontas).
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_uppercase();
        match normalized.as_str() {
            "DAF" => Sector::Daf,
            "GSTR" => Sector::Gstr,
            "ADMIN" => Sector::Admin,
            "PADRAO" => Sector::Padrao,
            "FINANCEIRO" => Sector::Financeiro,
            "GEAI" => Sector::Geai,
            _ => {
                tracing::debug!("Setor não reconhecido: '{}'", raw);
                Sector::Unrecognized(normalized)
            }
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Sector::Daf => "DAF",
            Sector::Gstr => "GSTR",
            Sector::Admin => "ADMIN",
            Sector::Padrao => "PADRAO",
            Sector::Financeiro => "FINANCEIRO",
            Sector::Geai => "GEAI",
            Sector::Unrecognized(name) => name,
        }
    }

    /// Rota para onde o utilizador vai depois do login.
    pub fn landing_route(&self) -> &'static str {
        match self {
            Sector::Daf => "/dashboard/daf/",
            Sector::Gstr => "/dashboard/gstr/",
            Sector::Admin => "/dashboard/admin/",
            _ => "/dashboard/home/",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Sector::parse("daf"), Sector::Daf);
        assert_eq!(Sector::parse(" Gstr "), Sector::Gstr);
        assert_eq!(Sector::parse("ADMIN"), Sector::Admin);
    }

    #[test]
    fn unknown_sector_keeps_its_name() {
        let sector = Sector::parse("logistica");
        assert_eq!(sector, Sector::Unrecognized("LOGISTICA".to_string()));
        assert_eq!(sector, Sector::parse("LOGISTICA"));
        assert_ne!(sector, Sector::parse("outro"));
        assert_eq!(sector.to_string(), "LOGISTICA");
    }

    #[test]
    fn landing_route_by_sector() {
        assert_eq!(Sector::Daf.landing_route(), "/dashboard/daf/");
        assert_eq!(Sector::Gstr.landing_route(), "/dashboard/gstr/");
        assert_eq!(Sector::Admin.landing_route(), "/dashboard/admin/");
        assert_eq!(Sector::Financeiro.landing_route(), "/dashboard/home/");
        assert_eq!(Sector::parse("xyz").landing_route(), "/dashboard/home/");
    }
}
