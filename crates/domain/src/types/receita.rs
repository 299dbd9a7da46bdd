//! Income types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Income for a pay period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receita {
    pub id: i64,
    pub usuario_id: i64,
    pub usuario_nome: String,
    pub periodo_inicio: NaiveDate,
    pub periodo_fim: NaiveDate,
    #[serde(default)]
    pub dias_uteis: Option<u32>,
    pub salario: f64,
    pub auxilios: f64,
    pub servicos_extras: f64,
    pub total_receitas: f64,
    pub total_despesas: f64,
    pub saldo: f64,
    #[serde(default)]
    pub observacoes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceitaRequest {
    pub periodo_inicio: NaiveDate,
    pub periodo_fim: NaiveDate,
    pub dias_uteis: Option<u32>,
    pub salario: f64,
    pub auxilios: f64,
    pub servicos_extras: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
}

impl ReceitaRequest {
    /// Sum of every income component
    #[must_use]
    pub fn total(&self) -> f64 {
        self.salario + self.auxilios + self.servicos_extras
    }
}
