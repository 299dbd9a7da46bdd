//! Dashboard aggregate types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Category share inside the monthly dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoriaTotal {
    pub nome: String,
    pub valor: f64,
    pub percentual: f64,
}

/// Monthly overview returned by `/dashboard`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub mes: u32,
    pub ano: i32,
    pub periodo: String,

    pub total_receitas: f64,
    pub media_receitas_mensal: f64,

    pub total_despesas: f64,
    pub total_despesas_pagas: f64,
    pub total_despesas_pendentes: f64,
    pub media_despesas_mensal: f64,
    pub count_despesas_pagas: u64,
    pub count_despesas_pendentes: u64,

    pub saldo: f64,
    pub saldo_disponivel: f64,

    pub percentual_gasto: f64,
    pub percentual_economizado: f64,
    pub taxa_pagamento: f64,

    #[serde(default)]
    pub despesas_por_categoria: HashMap<String, f64>,
    #[serde(default)]
    pub top_categorias: Vec<CategoriaTotal>,

    #[serde(default)]
    pub valor_objetivo_metas: f64,
    #[serde(default)]
    pub valor_atual_metas: f64,
    #[serde(default)]
    pub valor_restante_metas: f64,
    #[serde(default)]
    pub total_economizado: f64,
    #[serde(default)]
    pub progresso_medio_metas: f64,
    #[serde(default)]
    pub count_metas_em_andamento: u64,
    #[serde(default)]
    pub count_metas_concluidas: u64,
    #[serde(default)]
    pub count_metas_vencidas: u64,

    #[serde(default)]
    pub total_categorias: u64,
    #[serde(default)]
    pub categorias_ativas: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolucaoMensal {
    pub mes: u32,
    pub ano: i32,
    pub periodo: String,
    pub receitas: f64,
    pub despesas: f64,
    pub saldo: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCategoria {
    pub nome: String,
    pub valor: f64,
    pub percentual: f64,
    pub count: u64,
}

/// Overall financial health classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaudeFinanceira {
    Excelente,
    Boa,
    Regular,
    Ruim,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Indicadores {
    pub taxa_pagamento: f64,
    pub capacidade_poupanca: f64,
    pub endividamento: f64,
    // The frontend contract carries the misspelt name; accept both.
    #[serde(rename = "saudeFinalceira", alias = "saudeFinanceira")]
    pub saude_financeira: SaudeFinanceira,
    #[serde(default)]
    pub recomendacoes: Vec<String>,
}

/// Current-month balance from `/dashboard/saldo`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaldoResponse {
    pub receitas: f64,
    pub despesas: f64,
    pub saldo: f64,
    pub despesas_pagas: f64,
    pub despesas_pendentes: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodoComparado {
    pub mes: u32,
    pub ano: i32,
    pub receitas: f64,
    pub despesas: f64,
    pub saldo: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariacaoPeriodos {
    pub receitas: f64,
    pub receitas_percentual: f64,
    pub despesas: f64,
    pub despesas_percentual: f64,
    pub saldo: f64,
    pub saldo_percentual: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparativoResponse {
    pub periodo1: PeriodoComparado,
    pub periodo2: PeriodoComparado,
    pub diferencas: VariacaoPeriodos,
}
