//! System parameter (key-value) types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::impl_wire_enum_conversions;

/// Declared type of a parameter value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TipoParametro {
    String,
    Number,
    Boolean,
    Json,
}

impl_wire_enum_conversions!(TipoParametro {
    String => "STRING",
    Number => "NUMBER",
    Boolean => "BOOLEAN",
    Json => "JSON",
});

impl TipoParametro {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Number => "Number",
            Self::Boolean => "Boolean",
            Self::Json => "JSON",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parametro {
    pub id: i64,
    pub usuario_id: i64,
    pub usuario_nome: String,
    pub chave: String,
    #[serde(default)]
    pub descricao: Option<String>,
    pub valor: String,
    pub tipo: TipoParametro,
    #[serde(default)]
    pub tipo_descricao: Option<String>,
    #[serde(default)]
    pub valor_string: Option<String>,
    #[serde(default)]
    pub valor_numerico: Option<i64>,
    #[serde(default)]
    pub valor_booleano: Option<bool>,
    #[serde(default)]
    pub valor_decimal: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParametroRequest {
    pub chave: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    pub valor: String,
    pub tipo: TipoParametro,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParametroResumo {
    pub total: u64,
    #[serde(default)]
    pub por_tipo: HashMap<String, u64>,
    #[serde(default)]
    pub recentemente_atualizados: u64,
}
