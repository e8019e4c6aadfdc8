//! Decodificação do formato JSON alternativo
//!
//! O decodificador de planilha binária é um colaborador externo: ele entrega
//! linhas já rotuladas por cabeçalho. Este módulo aceita a forma JSON
//! equivalente (array de objetos cabeçalho → valor), usada como fallback
//! pelo painel quando o .xlsx não está disponível.

use tracing::debug;

use crate::error::PlanilhaError;
use crate::types::{CellValue, RawRow};

/// Converte um payload JSON (array de objetos) em linhas brutas.
///
/// Linhas totalmente vazias são descartadas.
pub fn rows_from_json(payload: &str) -> Result<Vec<RawRow>, PlanilhaError> {
    let value: serde_json::Value = serde_json::from_str(payload)?;
    let serde_json::Value::Array(items) = value else {
        return Err(PlanilhaError::UnexpectedPayload(
            "expected a JSON array of row objects".to_string(),
        ));
    };

    let mut rows = Vec::with_capacity(items.len());
    let mut skipped = 0usize;
    for item in &items {
        let serde_json::Value::Object(object) = item else {
            return Err(PlanilhaError::UnexpectedPayload(format!(
                "expected row objects, found {}",
                json_kind(item)
            )));
        };
        let row: RawRow = object
            .iter()
            .filter(|(key, _)| !key.trim().is_empty())
            .map(|(key, value)| (key.trim().to_string(), CellValue::from_json(value)))
            .collect();
        if row.values().all(CellValue::is_empty) {
            skipped += 1;
            continue;
        }
        rows.push(row);
    }
    if skipped > 0 {
        debug!(skipped, "Linhas vazias descartadas");
    }
    Ok(rows)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
