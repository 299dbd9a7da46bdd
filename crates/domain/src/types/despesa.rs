//! Expense types

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::impl_wire_enum_conversions;
use crate::types::page::PageRequest;

/// Payment status of an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatusPagamento {
    #[default]
    Pendente,
    Pago,
    Vencido,
}

impl_wire_enum_conversions!(StatusPagamento {
    Pendente => "PENDENTE",
    Pago => "PAGO",
    Vencido => "VENCIDO",
});

impl StatusPagamento {
    /// Label shown in status badges
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pendente => "Pendente",
            Self::Pago => "Pago",
            Self::Vencido => "Vencido",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Despesa {
    pub id: i64,
    pub usuario_id: i64,
    pub usuario_nome: String,
    #[serde(default)]
    pub receita_id: Option<i64>,
    #[serde(default)]
    pub categoria_id: Option<i64>,
    #[serde(default)]
    pub categoria_nome: Option<String>,
    pub data: NaiveDate,
    pub descricao: String,
    pub valor: f64,
    pub status: StatusPagamento,
    pub parcela_atual: u32,
    pub parcela_total: u32,
    #[serde(default)]
    pub status_parcela: Option<String>,
    #[serde(default)]
    pub fim_pagamento: Option<NaiveDate>,
    #[serde(default)]
    pub observacoes: Option<String>,
    #[serde(default)]
    pub parcelado: bool,
    #[serde(default)]
    pub vencido: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DespesaRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receita_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria_id: Option<i64>,
    pub data: NaiveDate,
    pub descricao: String,
    pub valor: f64,
    pub status: StatusPagamento,
    pub parcela_atual: u32,
    pub parcela_total: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fim_pagamento: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
}

impl DespesaRequest {
    /// Single-installment pending expense
    pub fn new(data: NaiveDate, descricao: impl Into<String>, valor: f64) -> Self {
        Self {
            receita_id: None,
            categoria_id: None,
            data,
            descricao: descricao.into(),
            valor,
            status: StatusPagamento::Pendente,
            parcela_atual: 1,
            parcela_total: 1,
            fim_pagamento: None,
            observacoes: None,
        }
    }
}

/// Filters accepted by the expense listing
///
/// Only one filter is applied per request, in this order of precedence:
/// category, status, income. The period is sent alongside the plain listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DespesaFilter {
    pub page: PageRequest,
    pub periodo: Option<(NaiveDate, NaiveDate)>,
    pub categoria_id: Option<i64>,
    pub status: Option<StatusPagamento>,
    pub receita_id: Option<i64>,
}

impl Default for DespesaFilter {
    fn default() -> Self {
        Self {
            page: PageRequest::sorted_by("data"),
            periodo: None,
            categoria_id: None,
            status: None,
            receita_id: None,
        }
    }
}

/// Monthly aggregate from `/despesas/resumo-mensal/{ano}/{mes}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DespesaResumoMensal {
    pub total_despesas: f64,
    pub total_pago: f64,
    pub total_pendente: f64,
    pub total_vencido: f64,
    pub count_total: u64,
    pub count_pagas: u64,
    pub count_pendentes: u64,
    pub count_vencidas: u64,
    pub media_mensal: f64,
    #[serde(default)]
    pub por_categoria: HashMap<String, f64>,
}
