//! Category types

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::impl_wire_enum_conversions;

/// Whether a category groups incomes or expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TipoCategoria {
    Receita,
    Despesa,
}

impl_wire_enum_conversions!(TipoCategoria {
    Receita => "RECEITA",
    Despesa => "DESPESA",
});

/// Short expense entry embedded in `/categorias/{id}/despesas`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DespesaResumo {
    pub id: i64,
    pub descricao: String,
    pub valor: f64,
    pub data: NaiveDate,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Categoria {
    pub id: i64,
    pub usuario_id: i64,
    pub usuario_nome: String,
    pub nome: String,
    pub tipo: TipoCategoria,
    #[serde(default)]
    pub tipo_descricao: Option<String>,
    pub ativa: bool,
    #[serde(default)]
    pub is_receita: bool,
    #[serde(default)]
    pub is_despesa: bool,
    #[serde(default)]
    pub total_despesas: Option<f64>,
    #[serde(default)]
    pub despesas: Option<Vec<DespesaResumo>>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoriaRequest {
    pub nome: String,
    pub tipo: TipoCategoria,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ativa: Option<bool>,
}

/// Aggregate returned by `/categorias/resumo`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriaResumo {
    pub total: u64,
    pub ativas: u64,
    pub inativas: u64,
    #[serde(default)]
    pub por_tipo: HashMap<String, u64>,
}
