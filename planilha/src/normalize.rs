//! Normalização de linhas heterogêneas para o esquema canônico
//!
//! Duas etapas: (1) coerção célula a célula para um mapa canônico
//! (cabeçalho → [`CellValue`]), (2) montagem do [`TabularRecord`] tipado,
//! com derivação das séries mensais e recuperação dos campos propensos a
//! mapeamento errado. Nenhuma etapa falha: o resultado é sempre o melhor
//! esforço, com defaults nomeados.

use std::collections::HashMap;

use tracing::debug;

use crate::error::PlanilhaError;
use crate::header::{canonical_header, strip_diacritics};
use crate::number::{parse_int_prefix, parse_lenient_number, parse_ptbr_number};
use crate::types::{CellValue, RawRow, TabularRecord, MESES};

/// Campos candidatos a identificador, em ordem de prioridade
pub const ID_CANDIDATES: [&str; 9] = [
    "OBJECTID",
    "ObjectID",
    "objectid",
    "OBJECT_ID",
    "FID",
    "FID_1",
    "fid",
    "ID",
    "id",
];

/// Campos métricos canônicos (todos f64, default 0.0)
const CAMPOS_NUMERICOS: [&str; 11] = [
    "area_edificacao",
    "producao_telhado",
    "capacidade_por_m2",
    "radiacao_max",
    "quantidade_placas",
    "capacidade_placas_dia",
    "capacidade_placas_mes",
    "potencial_medio_dia",
    "renda_total",
    "renda_per_capita",
    "renda_domiciliar_per_capita",
];

fn is_numeric_field(name: &str) -> bool {
    CAMPOS_NUMERICOS.contains(&name)
        || name.starts_with("producao_")
        || name.starts_with("radiacao_")
        || name == "objectid"
}

/// Extrai o identificador de uma linha bruta.
///
/// Tenta os campos candidatos em ordem; o primeiro que parseia como inteiro
/// vence. `None` significa registro não vinculável (o linker trata).
pub fn extract_object_id(row: &RawRow) -> Option<i64> {
    for field in ID_CANDIDATES {
        if let Some(value) = row.get(field) {
            let parsed = match value {
                CellValue::Number(n) if n.is_finite() => Some(n.trunc() as i64),
                CellValue::Text(s) => parse_int_prefix(s),
                _ => None,
            };
            if parsed.is_some() {
                return parsed;
            }
        }
    }
    None
}

/// Normaliza uma linha bruta. Nunca falha.
pub fn normalize_row(row: &RawRow) -> TabularRecord {
    // Etapa 1: coerção por célula para o mapa canônico
    let mut canonical: HashMap<String, CellValue> = HashMap::with_capacity(row.len());
    for (key, value) in row {
        let name = canonical_header(key);
        let coerced = match value {
            CellValue::Number(n) => CellValue::Number(*n),
            CellValue::Text(s) => match parse_ptbr_number(s) {
                Some(n) => CellValue::Number(n),
                // Texto não numérico passa intacto (nomes, códigos)
                None => CellValue::Text(s.clone()),
            },
            CellValue::Empty => {
                if is_numeric_field(&name) {
                    CellValue::Number(0.0)
                } else {
                    CellValue::Empty
                }
            }
        };
        canonical.insert(name, coerced);
    }

    // Etapa 2: montagem do registro tipado
    let mut record = TabularRecord {
        objectid: extract_object_id(row),
        ..TabularRecord::default()
    };
    canonical.remove("objectid");

    record.bairro = match canonical.remove("bairro") {
        Some(CellValue::Text(s)) => Some(s),
        Some(CellValue::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    for (i, mes) in MESES.iter().enumerate() {
        record.dados_mensais_producao[i] =
            take_number(&mut canonical, &format!("producao_{mes}"));
        record.dados_mensais_radiacao[i] =
            take_number(&mut canonical, &format!("radiacao_{mes}"));
    }

    record.area_edificacao = take_number(&mut canonical, "area_edificacao");
    record.producao_telhado = take_number(&mut canonical, "producao_telhado");
    record.capacidade_por_m2 = take_number(&mut canonical, "capacidade_por_m2");
    record.radiacao_max = take_number(&mut canonical, "radiacao_max");
    record.quantidade_placas = take_number(&mut canonical, "quantidade_placas");
    record.capacidade_placas_dia = take_number(&mut canonical, "capacidade_placas_dia");
    record.capacidade_placas_mes = take_number(&mut canonical, "capacidade_placas_mes");
    record.potencial_medio_dia = take_number(&mut canonical, "potencial_medio_dia");
    record.renda_total = take_number(&mut canonical, "renda_total");
    record.renda_per_capita = take_number(&mut canonical, "renda_per_capita");
    record.renda_domiciliar_per_capita =
        take_number(&mut canonical, "renda_domiciliar_per_capita");

    // Recuperação de campos propensos a mapeamento errado: se o valor
    // mapeado é zero, varre os cabeçalhos originais por substring temática
    // e adota o primeiro valor positivo encontrado.
    if record.radiacao_max == 0.0 {
        if let Some((header, value)) = recover_field(row, &["radiacao", "radiation", "solar"]) {
            debug!(header, value, "radiacao_max recuperado de campo alternativo");
            record.radiacao_max = value;
        }
    }
    if record.quantidade_placas == 0.0 {
        if let Some((header, value)) = recover_field(row, &["placa", "panel", "quantidade"]) {
            debug!(header, value, "quantidade_placas recuperado de campo alternativo");
            record.quantidade_placas = value;
        }
    }

    // O que sobrou no mapa canônico: cabeçalhos não mapeados e texto que
    // não virou número em campo numérico
    record.extras = canonical;
    record
}

/// Remove um campo numérico do mapa canônico.
///
/// Texto que não parseou como número volta para o mapa (vai parar em
/// `extras`) e o campo fica com o default 0.0. O valor de origem nunca é
/// silenciosamente descartado.
fn take_number(canonical: &mut HashMap<String, CellValue>, name: &str) -> f64 {
    match canonical.remove(name) {
        Some(CellValue::Number(n)) => n,
        Some(text @ CellValue::Text(_)) => {
            canonical.insert(name.to_string(), text);
            0.0
        }
        _ => 0.0,
    }
}

/// Primeiro valor positivo sob um cabeçalho que contém uma das substrings
/// (comparação sem diacríticos, minúsculas). A varredura segue a ordem das
/// colunas da planilha.
fn recover_field<'a>(row: &'a RawRow, substrings: &[&str]) -> Option<(&'a str, f64)> {
    for (header, value) in row {
        let folded = strip_diacritics(header).to_lowercase();
        if !substrings.iter().any(|s| folded.contains(s)) {
            continue;
        }
        let parsed = match value {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => parse_lenient_number(s),
            CellValue::Empty => None,
        };
        if let Some(v) = parsed {
            if v > 0.0 {
                return Some((header.as_str(), v));
            }
        }
    }
    None
}

/// Porta de sanidade de nível de dataset, rodada uma vez após a
/// normalização em lote.
///
/// Falha (com motivo nomeado) quando o dataset está vazio, quando o
/// primeiro registro não tem identificador, ou quando nenhum registro tem
/// valor positivo nos campos significativos.
pub fn validate_dataset(records: &[TabularRecord]) -> Result<(), PlanilhaError> {
    if records.is_empty() {
        return Err(PlanilhaError::validation("no records after normalization"));
    }
    if records[0].objectid.is_none() {
        return Err(PlanilhaError::validation(
            "first record has no identifier (objectid)",
        ));
    }
    let meaningful = records.iter().any(|r| {
        r.area_edificacao > 0.0
            || r.producao_telhado > 0.0
            || r.radiacao_max > 0.0
            || r.quantidade_placas > 0.0
    });
    if !meaningful {
        return Err(PlanilhaError::validation(
            "no record has meaningful numeric data (area, producao, radiacao, placas)",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, CellValue)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_normalize_locale_numbers() {
        let raw = row(&[
            ("Bairros", CellValue::Text("Centro".to_string())),
            (
                "Área em metros quadrados da edificação",
                CellValue::Text("1.234,56".to_string()),
            ),
        ]);
        let record = normalize_row(&raw);
        assert_eq!(record.bairro.as_deref(), Some("Centro"));
        assert_eq!(record.area_edificacao, 1234.56);
    }

    #[test]
    fn test_default_zero_invariant() {
        let record = normalize_row(&row(&[("OBJECTID", CellValue::Number(7.0))]));
        assert_eq!(record.objectid, Some(7));
        assert_eq!(record.area_edificacao, 0.0);
        assert_eq!(record.renda_total, 0.0);
        assert_eq!(record.dados_mensais_producao, [0.0; 12]);
        assert_eq!(record.dados_mensais_radiacao, [0.0; 12]);
    }

    #[test]
    fn test_idempotent() {
        let raw = row(&[
            ("OBJECTID", CellValue::Text("15".to_string())),
            ("Bairros", CellValue::Text("Cohama".to_string())),
            ("Renda Total", CellValue::Text("2.500,00".to_string())),
            ("Campo Livre", CellValue::Text("observação".to_string())),
        ]);
        assert_eq!(normalize_row(&raw), normalize_row(&raw));
    }

    #[test]
    fn test_numeric_with_trailing_unit() {
        let raw = row(&[
            ("OBJECTID", CellValue::Number(1.0)),
            (
                "Produção de energia kW do telhado do edifício",
                CellValue::Text("310,5 kW".to_string()),
            ),
        ]);
        let record = normalize_row(&raw);
        assert_eq!(record.producao_telhado, 310.5);
        assert!(record.extras.is_empty());
    }

    #[test]
    fn test_unparseable_text_preserved() {
        let raw = row(&[(
            "Área em metros quadrados da edificação",
            CellValue::Text("não medido".to_string()),
        )]);
        let record = normalize_row(&raw);
        assert_eq!(record.area_edificacao, 0.0);
        assert_eq!(
            record.extras.get("area_edificacao"),
            Some(&CellValue::Text("não medido".to_string()))
        );
    }

    #[test]
    fn test_monthly_series() {
        let raw = row(&[
            (
                "Produção de energia no mês de janeiro kW do telhado do edifício",
                CellValue::Text("10,5".to_string()),
            ),
            (
                "Produção de energia no mês de dezembro kW do telhado do edifício",
                CellValue::Number(8.0),
            ),
            (
                "Quantidade de Radiação Solar no mês de junho (kW.m²)",
                CellValue::Text("5,25".to_string()),
            ),
        ]);
        let record = normalize_row(&raw);
        assert_eq!(record.dados_mensais_producao[0], 10.5);
        assert_eq!(record.dados_mensais_producao[11], 8.0);
        assert_eq!(record.dados_mensais_producao[5], 0.0);
        assert_eq!(record.dados_mensais_radiacao[5], 5.25);
    }

    #[test]
    fn test_fallback_recovery() {
        // radiacao_max ausente, mas existe uma coluna alternativa com
        // substring "solar" e valor positivo
        let raw = row(&[
            ("OBJECTID", CellValue::Number(1.0)),
            ("Índice Solar Anual", CellValue::Text("4,8".to_string())),
            ("Total de Placas Instaladas", CellValue::Number(12.0)),
        ]);
        let record = normalize_row(&raw);
        assert_eq!(record.radiacao_max, 4.8);
        assert_eq!(record.quantidade_placas, 12.0);
    }

    #[test]
    fn test_fallback_uses_column_order() {
        // Duas colunas temáticas positivas: vence a primeira na ordem das
        // colunas da planilha, não a primeira em ordem alfabética
        let raw = row(&[
            ("Radiação medida no local", CellValue::Number(7.0)),
            ("Radiação alternativa", CellValue::Number(5.0)),
        ]);
        let record = normalize_row(&raw);
        assert_eq!(record.radiacao_max, 7.0);
    }

    #[test]
    fn test_fallback_ignores_non_positive() {
        let raw = row(&[("Radiacao alternativa", CellValue::Number(0.0))]);
        let record = normalize_row(&raw);
        assert_eq!(record.radiacao_max, 0.0);
    }

    #[test]
    fn test_extract_object_id_priority() {
        let raw = row(&[
            ("FID", CellValue::Number(99.0)),
            ("OBJECTID", CellValue::Text("15".to_string())),
        ]);
        // OBJECTID vem antes de FID na lista de candidatos
        assert_eq!(extract_object_id(&raw), Some(15));

        let raw = row(&[("fid", CellValue::Text("8x".to_string()))]);
        assert_eq!(extract_object_id(&raw), Some(8));

        let raw = row(&[("nome", CellValue::Text("abc".to_string()))]);
        assert_eq!(extract_object_id(&raw), None);
    }

    #[test]
    fn test_validate_dataset() {
        assert!(validate_dataset(&[]).is_err());

        let sem_id = TabularRecord::default();
        assert!(validate_dataset(&[sem_id]).is_err());

        let sem_dados = TabularRecord {
            objectid: Some(1),
            ..TabularRecord::default()
        };
        assert!(validate_dataset(std::slice::from_ref(&sem_dados)).is_err());

        let ok = TabularRecord {
            objectid: Some(1),
            area_edificacao: 120.0,
            ..TabularRecord::default()
        };
        assert!(validate_dataset(&[ok]).is_ok());
    }
}
