//! Dicionário de cabeçalhos conhecidos e normalização heurística
//!
//! Os cabeçalhos da planilha de origem são frases completas em português,
//! com acentos e unidades. O dicionário mapeia os cabeçalhos conhecidos
//! (texto verbatim) para os nomes canônicos; qualquer cabeçalho fora do
//! dicionário passa pela heurística: minúsculas, sem diacríticos, blocos
//! não alfanuméricos colapsados em `_`.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Cabeçalho verbatim → nome canônico
pub static FIELD_MAPPING: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("OBJECTID", "objectid"),
        ("Bairros", "bairro"),
        ("Bairro", "bairro"),
        (
            "Área em metros quadrados da edificação",
            "area_edificacao",
        ),
        (
            "Produção de energia kW do telhado do edifício",
            "producao_telhado",
        ),
        (
            "Capacidade de Produção de energia em kW por m²",
            "capacidade_por_m2",
        ),
        (
            "Quantidade de Radiação Máxima Solar nos mêses (kW.m²)",
            "radiacao_max",
        ),
        (
            "Quantidade de Placas Fotovoltaicas capaz de gerar a energia gerada do imóvel",
            "quantidade_placas",
        ),
        (
            "Capacidade de Produção de energia em Placas Fotovoltaicas em kW.h.dia",
            "capacidade_placas_dia",
        ),
        (
            "Capacidade de Produção de energia em Placas Fotovoltaicas em kW.h.mês",
            "capacidade_placas_mes",
        ),
        (
            "Potencial médio de geração FV em um dia (kW.dia.m²)",
            "potencial_medio_dia",
        ),
        ("Renda Total", "renda_total"),
        ("Renda per capita", "renda_per_capita"),
        ("Renda domiciliar per capita", "renda_domiciliar_per_capita"),
        // Produção mensal
        (
            "Produção de energia no mês de janeiro kW do telhado do edifício",
            "producao_janeiro",
        ),
        (
            "Produção de energia no mês de fevereiro kW do telhado do edifício",
            "producao_fevereiro",
        ),
        (
            "Produção de energia no mês de março kW do telhado do edifício",
            "producao_marco",
        ),
        (
            "Produção de energia no mês de abril kW do telhado do edifício",
            "producao_abril",
        ),
        (
            "Produção de energia no mês de maio kW do telhado do edifício",
            "producao_maio",
        ),
        (
            "Produção de energia no mês de junho kW do telhado do edifício",
            "producao_junho",
        ),
        (
            "Produção de energia no mês de julho kW do telhado do edifício",
            "producao_julho",
        ),
        (
            "Produção de energia no mês de agosto kW do telhado do edifício",
            "producao_agosto",
        ),
        (
            "Produção de energia no mês de setembro kW do telhado do edifício",
            "producao_setembro",
        ),
        (
            "Produção de energia no mês de outubro kW do telhado do edifício",
            "producao_outubro",
        ),
        (
            "Produção de energia no mês de novembro kW do telhado do edifício",
            "producao_novembro",
        ),
        (
            "Produção de energia no mês de dezembro kW do telhado do edifício",
            "producao_dezembro",
        ),
        // Radiação mensal
        (
            "Quantidade de Radiação Solar no mês de janeiro (kW.m²)",
            "radiacao_janeiro",
        ),
        (
            "Quantidade de Radiação Solar no mês de fevereiro (kW.m²)",
            "radiacao_fevereiro",
        ),
        (
            "Quantidade de Radiação Solar no mês de março (kW.m²)",
            "radiacao_marco",
        ),
        (
            "Quantidade de Radiação Solar no mês de abril (kW.m²)",
            "radiacao_abril",
        ),
        (
            "Quantidade de Radiação Solar no mês de maio (kW.m²)",
            "radiacao_maio",
        ),
        (
            "Quantidade de Radiação Solar no mês de junho (kW.m²)",
            "radiacao_junho",
        ),
        (
            "Quantidade de Radiação Solar no mês de julho (kW.m²)",
            "radiacao_julho",
        ),
        (
            "Quantidade de Radiação Solar no mês de agosto (kW.m²)",
            "radiacao_agosto",
        ),
        (
            "Quantidade de Radiação Solar no mês de setembro (kW.m²)",
            "radiacao_setembro",
        ),
        (
            "Quantidade de Radiação Solar no mês de outubro (kW.m²)",
            "radiacao_outubro",
        ),
        (
            "Quantidade de Radiação Solar no mês de novembro (kW.m²)",
            "radiacao_novembro",
        ),
        (
            "Quantidade de Radiação Solar no mês de dezembro (kW.m²)",
            "radiacao_dezembro",
        ),
    ])
});

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Nome canônico de um cabeçalho: dicionário primeiro, heurística depois
pub fn canonical_header(raw: &str) -> String {
    if let Some(name) = FIELD_MAPPING.get(raw.trim()) {
        return (*name).to_string();
    }
    normalize_header(raw)
}

/// Heurística para cabeçalhos desconhecidos
pub fn normalize_header(raw: &str) -> String {
    let folded = strip_diacritics(raw.trim()).to_lowercase();
    NON_ALNUM
        .replace_all(&folded, "_")
        .trim_matches('_')
        .to_string()
}

/// Remove os diacríticos do português (suficiente para os cabeçalhos e
/// nomes de bairro deste dataset; não é uma decomposição Unicode geral).
pub fn strip_diacritics(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
            'ç' => 'c',
            'Ç' => 'C',
            'ñ' => 'n',
            'Ñ' => 'N',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_headers() {
        assert_eq!(canonical_header("Bairros"), "bairro");
        assert_eq!(
            canonical_header("Área em metros quadrados da edificação"),
            "area_edificacao"
        );
        assert_eq!(
            canonical_header("Quantidade de Radiação Solar no mês de março (kW.m²)"),
            "radiacao_marco"
        );
        // Espaço ao redor não invalida o lookup
        assert_eq!(canonical_header(" Renda Total "), "renda_total");
    }

    #[test]
    fn test_heuristic_fallback() {
        assert_eq!(
            canonical_header("Coluna Nova (kW/m²)"),
            "coluna_nova_kw_m"
        );
        assert_eq!(canonical_header("Região de Expansão"), "regiao_de_expansao");
        assert_eq!(normalize_header("__a  b__"), "a_b");
    }

    #[test]
    fn test_strip_diacritics() {
        assert_eq!(strip_diacritics("Produção São João"), "Producao Sao Joao");
        assert_eq!(strip_diacritics("sem acento"), "sem acento");
    }
}
