//! Tipos de dados do crate planilha

use std::collections::HashMap;

use serde::Serialize;

/// Valor bruto de uma célula da planilha.
///
/// Soma explícita no lugar da forma frouxa do arquivo de origem: toda célula
/// é número, texto ou vazia, e a coerção para o esquema canônico acontece em
/// um único ponto ([`crate::normalize::normalize_row`]).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Valor numérico nativo
    Number(f64),
    /// Texto (inclui números ainda não convertidos)
    Text(String),
    /// Célula vazia / ausente / nula
    Empty,
}

impl CellValue {
    /// Converte um valor JSON em célula. Strings são aparadas; string vazia
    /// conta como célula vazia.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Empty,
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(v) => Self::Number(v),
                None => Self::Text(n.to_string()),
            },
            serde_json::Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Self::Empty
                } else {
                    Self::Text(trimmed.to_string())
                }
            }
            serde_json::Value::Bool(b) => Self::Text(b.to_string()),
            other => Self::Text(other.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Valor numérico da célula, se houver
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Linha bruta da planilha: pares (cabeçalho original, célula), na ordem
/// das colunas do arquivo.
///
/// A ordem importa: a recuperação de campos alternativos varre os
/// cabeçalhos na ordem das colunas e adota o primeiro valor positivo.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: Vec<(String, CellValue)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insere uma célula. Cabeçalho repetido substitui o valor, mantendo
    /// a posição original da coluna.
    pub fn insert(&mut self, header: String, value: CellValue) {
        match self.cells.iter_mut().find(|(h, _)| *h == header) {
            Some((_, v)) => *v = value,
            None => self.cells.push((header, value)),
        }
    }

    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Itera os pares (cabeçalho, célula) na ordem das colunas
    pub fn iter(&self) -> std::slice::Iter<'_, (String, CellValue)> {
        self.cells.iter()
    }

    /// Itera as células na ordem das colunas
    pub fn values(&self) -> impl Iterator<Item = &CellValue> {
        self.cells.iter().map(|(_, v)| v)
    }
}

impl FromIterator<(String, CellValue)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (String, CellValue)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (header, value) in iter {
            row.insert(header, value);
        }
        row
    }
}

impl<'a> IntoIterator for &'a RawRow {
    type Item = &'a (String, CellValue);
    type IntoIter = std::slice::Iter<'a, (String, CellValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// Nomes dos 12 meses nas chaves canônicas (sem diacríticos)
pub const MESES: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "marco",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Registro tabular canônico: uma linha normalizada da planilha.
///
/// Todo campo numérico está sempre presente (default `0.0`) mesmo quando o
/// cabeçalho não existe na linha de origem. Valores que não parseiam como
/// número nunca são descartados: ficam em `extras` sob a chave canônica.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TabularRecord {
    /// Identificador compartilhado com o GeoJSON (ausente ⇒ não vinculável)
    pub objectid: Option<i64>,
    /// Nome do bairro
    pub bairro: Option<String>,
    /// Área em m² da edificação
    pub area_edificacao: f64,
    /// Produção de energia (kW) do telhado
    pub producao_telhado: f64,
    /// Capacidade de produção em kW por m²
    pub capacidade_por_m2: f64,
    /// Radiação solar máxima nos meses (kW/m²)
    pub radiacao_max: f64,
    /// Quantidade de placas fotovoltaicas estimada
    pub quantidade_placas: f64,
    /// Capacidade de produção em placas, kWh/dia
    pub capacidade_placas_dia: f64,
    /// Capacidade de produção em placas, kWh/mês
    pub capacidade_placas_mes: f64,
    /// Potencial médio de geração FV em um dia (kW·dia/m²)
    pub potencial_medio_dia: f64,
    /// Renda total da região
    pub renda_total: f64,
    /// Renda per capita
    pub renda_per_capita: f64,
    /// Renda domiciliar per capita
    pub renda_domiciliar_per_capita: f64,
    /// Produção mensal (janeiro..dezembro), 0.0 quando ausente
    pub dados_mensais_producao: [f64; 12],
    /// Radiação mensal (janeiro..dezembro), 0.0 quando ausente
    pub dados_mensais_radiacao: [f64; 12],
    /// Cabeçalhos não mapeados (chave heurística) e valores canônicos que
    /// falharam a coerção numérica (texto original preservado)
    pub extras: HashMap<String, CellValue>,
}
