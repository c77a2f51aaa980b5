// src/models/requisicao.rs
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use sqlx::FromRow;

/// Linha da tabela `requisicoes`.
#[derive(Debug, Clone, FromRow)]
pub struct Requisicao {
    pub id_req: i64,
    pub itinerario: String,
    pub data: String, // YYYY-MM-DD
    pub hora: String, // HH:MM
    pub qtd_pass: i64,
    pub obs: Option<String>,
    pub usuario: String,
    pub status_daf: bool,
    pub status_gstr: bool,
}

impl Requisicao {
    pub fn status_label(&self) -> &'static str {
        match (self.status_daf, self.status_gstr) {
            (true, true) => "Aprovada",
            (true, false) => "Aguardando GSTR",
            _ => "Aguardando DAF",
        }
    }
}

/// Dados validados de uma nova requisição (antes de ir para a DB).
#[derive(Debug, Clone, PartialEq)]
pub struct NovaRequisicao {
    pub itinerario: String,
    pub data: NaiveDate,
    pub hora: NaiveTime,
    pub qtd_pass: i64,
    pub obs: Option<String>,
}

// Campos do formulário HTML. Todos opcionais para que um campo em falta
// volte ao formulário com mensagem em vez de um 422 do extrator.
#[derive(Debug, Default, Deserialize)]
pub struct RequisicaoForm {
    pub itinerario: Option<String>,
    pub data_requisicao: Option<String>,
    pub hora_requisicao: Option<String>,
    pub passageiros: Option<String>,
    pub info_adicional: Option<String>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl RequisicaoForm {
    /// Valida o formulário. O erro é a mensagem mostrada ao utilizador.
    pub fn validate(&self) -> Result<NovaRequisicao, String> {
        let itinerario = non_empty(self.itinerario.as_deref())
            .ok_or_else(|| "Informe o itinerário.".to_string())?;

        let data = non_empty(self.data_requisicao.as_deref())
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .ok_or_else(|| "Data inválida (use AAAA-MM-DD).".to_string())?;

        // Aceita HH:MM (input type=time) e HH:MM:SS
        let hora = non_empty(self.hora_requisicao.as_deref())
            .and_then(|h| {
                NaiveTime::parse_from_str(h, "%H:%M")
                    .or_else(|_| NaiveTime::parse_from_str(h, "%H:%M:%S"))
                    .ok()
            })
            .ok_or_else(|| "Hora inválida (use HH:MM).".to_string())?;

        let qtd_pass = non_empty(self.passageiros.as_deref())
            .and_then(|p| p.parse::<i64>().ok())
            .filter(|p| *p > 0)
            .ok_or_else(|| "Número de passageiros inválido.".to_string())?;

        Ok(NovaRequisicao {
            itinerario: itinerario.to_string(),
            data,
            hora,
            qtd_pass,
            obs: non_empty(self.info_adicional.as_deref()).map(str::to_string),
        })
    }
}
