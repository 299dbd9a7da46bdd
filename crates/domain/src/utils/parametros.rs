//! Parameter value helpers

use crate::types::TipoParametro;

/// Whether `value` is well-formed JSON
#[must_use]
pub fn validate_json(value: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(value).is_ok()
}

/// Human-readable rendering of a stored parameter value
///
/// Booleans become `Verdadeiro`/`Falso`, JSON is pretty-printed (or shown
/// verbatim when malformed), everything else is returned as-is.
#[must_use]
pub fn format_parametro_value(tipo: TipoParametro, valor: &str) -> String {
    match tipo {
        TipoParametro::Boolean => {
            if valor == "true" { "Verdadeiro" } else { "Falso" }.to_string()
        }
        TipoParametro::Json => serde_json::from_str::<serde_json::Value>(valor)
            .ok()
            .and_then(|parsed| serde_json::to_string_pretty(&parsed).ok())
            .unwrap_or_else(|| valor.to_string()),
        TipoParametro::String | TipoParametro::Number => valor.to_string(),
    }
}
