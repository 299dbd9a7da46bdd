//! Savings goal types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::impl_wire_enum_conversions;
use crate::types::page::PageRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusMeta {
    #[default]
    EmAndamento,
    Concluida,
    Cancelada,
    Pausada,
}

impl_wire_enum_conversions!(StatusMeta {
    EmAndamento => "EM_ANDAMENTO",
    Concluida => "CONCLUIDA",
    Cancelada => "CANCELADA",
    Pausada => "PAUSADA",
});

impl StatusMeta {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::EmAndamento => "Em Andamento",
            Self::Concluida => "Concluída",
            Self::Cancelada => "Cancelada",
            Self::Pausada => "Pausada",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TipoMeta {
    Economia,
    Investimento,
    Compra,
}

impl_wire_enum_conversions!(TipoMeta {
    Economia => "ECONOMIA",
    Investimento => "INVESTIMENTO",
    Compra => "COMPRA",
});

/// Direction of a goal transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TipoTransacaoMeta {
    /// Contribution into the goal
    Aporte,
    /// Withdrawal from the goal
    Resgate,
}

impl_wire_enum_conversions!(TipoTransacaoMeta {
    Aporte => "APORTE",
    Resgate => "RESGATE",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaTransacao {
    pub id: i64,
    pub meta_id: i64,
    pub tipo: TipoTransacaoMeta,
    pub valor: f64,
    pub data: NaiveDate,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub id: i64,
    pub usuario_id: i64,
    pub usuario_nome: String,
    pub nome: String,
    #[serde(default)]
    pub descricao: Option<String>,
    pub tipo: TipoMeta,
    pub valor_objetivo: f64,
    pub valor_atual: f64,
    pub valor_restante: f64,
    #[serde(default)]
    pub prazo: Option<NaiveDate>,
    pub status: StatusMeta,
    /// Percentage in the 0-100 range
    pub progresso: f64,
    #[serde(default)]
    pub observacoes: Option<String>,
    #[serde(default)]
    pub concluida: bool,
    #[serde(default)]
    pub vencida: bool,
    #[serde(default)]
    pub transacoes: Option<Vec<MetaTransacao>>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaRequest {
    pub nome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    pub tipo: TipoMeta,
    pub valor_objetivo: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prazo: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
}

/// Body of contribution and withdrawal calls; `data` defaults to today
/// server-side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransacaoRequest {
    pub valor: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
}

/// Filters accepted by the goal listing
///
/// Precedence: status (paged), type, deadline window, plain listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaFilter {
    pub page: PageRequest,
    pub status: Option<StatusMeta>,
    pub tipo: Option<TipoMeta>,
    pub prazo: Option<(NaiveDate, NaiveDate)>,
}

impl Default for MetaFilter {
    fn default() -> Self {
        Self { page: PageRequest::sorted_by("createdAt"), status: None, tipo: None, prazo: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaResumo {
    pub total_metas: u64,
    pub em_andamento: u64,
    pub concluidas: u64,
    pub canceladas: u64,
    pub pausadas: u64,
    pub total_valor_objetivo: f64,
    pub total_valor_atual: f64,
    pub total_valor_restante: f64,
    pub progresso_geral: f64,
    pub metas_vencidas: u64,
    pub metas_proximas_vencimento: u64,
}
