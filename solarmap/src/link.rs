//! Vinculação geometria ↔ dataset tabular
//!
//! Cada edificação do GeoJSON é casada com o registro tabular de mesmo
//! identificador. Geometrias sem par seguem no resultado com propriedades
//! zeradas; o único erro fatal é o resultado sair vazio.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::geometry::{process_geometry, GeometryKind, GeometryRecord};
use crate::reproject::{GeoPoint, Transformer};
use planilha::TabularRecord;

/// Bairro atribuído quando o registro tabular não informa um
pub const BAIRRO_NAO_INFORMADO: &str = "Não informado";

/// Falha fatal da vinculação
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error(
        "Nenhuma entidade válida após a vinculação ({invalid} geometrias inválidas, {out_of_region} fora da região)"
    )]
    NoValidEntities { invalid: u64, out_of_region: u64 },
}

/// Propriedades consolidadas de uma entidade vinculada
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityProperties {
    pub id: i64,
    pub objectid: Option<i64>,
    pub bairro: String,
    pub area_edificacao: f64,
    pub producao_telhado: f64,
    pub capacidade_por_m2: f64,
    pub radiacao_max: f64,
    pub quantidade_placas: f64,
    pub capacidade_placas_dia: f64,
    pub capacidade_placas_mes: f64,
    pub potencial_medio_dia: f64,
    pub renda_total: f64,
    pub renda_per_capita: f64,
    pub renda_domiciliar_per_capita: f64,
    pub dados_mensais_producao: [f64; 12],
    pub dados_mensais_radiacao: [f64; 12],
}

impl EntityProperties {
    /// Consolida as propriedades: com registro tabular, copia os campos
    /// canônicos; sem, tudo vale zero e o bairro é o de fallback.
    pub fn merge(id: i64, record: Option<&TabularRecord>) -> Self {
        match record {
            Some(r) => Self {
                id,
                objectid: r.objectid,
                bairro: r
                    .bairro
                    .clone()
                    .unwrap_or_else(|| BAIRRO_NAO_INFORMADO.to_string()),
                area_edificacao: r.area_edificacao,
                producao_telhado: r.producao_telhado,
                capacidade_por_m2: r.capacidade_por_m2,
                radiacao_max: r.radiacao_max,
                quantidade_placas: r.quantidade_placas,
                capacidade_placas_dia: r.capacidade_placas_dia,
                capacidade_placas_mes: r.capacidade_placas_mes,
                potencial_medio_dia: r.potencial_medio_dia,
                renda_total: r.renda_total,
                renda_per_capita: r.renda_per_capita,
                renda_domiciliar_per_capita: r.renda_domiciliar_per_capita,
                dados_mensais_producao: r.dados_mensais_producao,
                dados_mensais_radiacao: r.dados_mensais_radiacao,
            },
            None => Self {
                id,
                objectid: None,
                bairro: BAIRRO_NAO_INFORMADO.to_string(),
                area_edificacao: 0.0,
                producao_telhado: 0.0,
                capacidade_por_m2: 0.0,
                radiacao_max: 0.0,
                quantidade_placas: 0.0,
                capacidade_placas_dia: 0.0,
                capacidade_placas_mes: 0.0,
                potencial_medio_dia: 0.0,
                renda_total: 0.0,
                renda_per_capita: 0.0,
                renda_domiciliar_per_capita: 0.0,
                dados_mensais_producao: [0.0; 12],
                dados_mensais_radiacao: [0.0; 12],
            },
        }
    }
}

/// Entidade final do pipeline: geometria reprojetada + propriedades
#[derive(Debug, Clone, Serialize)]
pub struct CombinedEntity {
    pub id: i64,
    pub coordinates: Vec<GeoPoint>,
    pub centroid: GeoPoint,
    pub kind: GeometryKind,
    pub properties: EntityProperties,
    pub is_linked: bool,
    /// Registro tabular original, para os painéis de detalhe
    #[serde(skip)]
    pub excel: Option<TabularRecord>,
}

/// Contadores da vinculação
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LinkCounters {
    pub linked: u64,
    pub sem_dados_excel: u64,
    pub coordenadas_invalidas: u64,
    pub fora_da_regiao: u64,
}

impl LinkCounters {
    /// Percentual de geometrias vinculadas sobre o total processado
    pub fn taxa_vinculacao(&self, total: u64) -> f64 {
        if total == 0 {
            return 0.0;
        }
        self.linked as f64 / total as f64 * 100.0
    }
}

/// Resultado da vinculação
#[derive(Debug)]
pub struct LinkResult {
    pub entities: Vec<CombinedEntity>,
    pub counters: LinkCounters,
}

/// Indexa os registros tabulares por identificador.
///
/// Em caso de colisão de id o último registro vence, preservando a ordem
/// do arquivo de origem.
pub fn build_index(records: &[TabularRecord]) -> HashMap<i64, &TabularRecord> {
    let mut index: HashMap<i64, &TabularRecord> = HashMap::with_capacity(records.len());
    for record in records {
        if let Some(id) = record.objectid {
            if index.insert(id, record).is_some() {
                debug!(id, "Identificador duplicado no dataset tabular, último vence");
            }
        }
    }
    index
}

/// Vincula as geometrias ao dataset tabular.
///
/// A ausência de par tabular é contada antes do processamento geométrico,
/// de modo que `sem_dados_excel` reflete o dataset e não apenas as
/// geometrias que sobreviveram à reprojeção.
pub fn link(
    transformer: &Transformer,
    geometries: &[GeometryRecord],
    records: &[TabularRecord],
) -> Result<LinkResult, LinkError> {
    let index = build_index(records);
    info!(
        geometrias = geometries.len(),
        registros = records.len(),
        indexados = index.len(),
        "Iniciando vinculação"
    );

    let mut counters = LinkCounters::default();
    let mut entities = Vec::with_capacity(geometries.len());

    for geometry in geometries {
        let record = index.get(&geometry.id).copied();
        if record.is_none() {
            counters.sem_dados_excel += 1;
        }

        let Some(processed) = process_geometry(transformer, &geometry.geometry) else {
            counters.coordenadas_invalidas += 1;
            continue;
        };

        if !transformer.is_valid_region(&processed.centroid) {
            counters.fora_da_regiao += 1;
            continue;
        }

        let is_linked = record.is_some();
        if is_linked {
            counters.linked += 1;
        }

        entities.push(CombinedEntity {
            id: geometry.id,
            coordinates: processed.coordinates,
            centroid: processed.centroid,
            kind: geometry.kind,
            properties: EntityProperties::merge(geometry.id, record),
            is_linked,
            excel: record.cloned(),
        });
    }

    if entities.is_empty() {
        warn!(
            invalidas = counters.coordenadas_invalidas,
            fora = counters.fora_da_regiao,
            "Vinculação não produziu entidades"
        );
        return Err(LinkError::NoValidEntities {
            invalid: counters.coordenadas_invalidas,
            out_of_region: counters.fora_da_regiao,
        });
    }

    info!(
        entidades = entities.len(),
        vinculadas = counters.linked,
        sem_dados = counters.sem_dados_excel,
        "Vinculação concluída"
    );
    Ok(LinkResult { entities, counters })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reproject::{GeoBounds, UtmParams};
    use geo::polygon;

    fn transformer() -> Transformer {
        Transformer::new(UtmParams::SIRGAS2000_UTM_23S, GeoBounds::SAO_LUIS)
    }

    fn geometry(id: i64) -> GeometryRecord {
        GeometryRecord {
            id,
            geometry: geo::Geometry::Polygon(polygon![
                (x: 590_000.0, y: 9_720_000.0),
                (x: 590_100.0, y: 9_720_000.0),
                (x: 590_100.0, y: 9_720_100.0),
                (x: 590_000.0, y: 9_720_000.0),
            ]),
            kind: GeometryKind::Polygon,
            properties: serde_json::Map::new(),
        }
    }

    fn record(id: i64, bairro: &str, producao: f64) -> TabularRecord {
        TabularRecord {
            objectid: Some(id),
            bairro: Some(bairro.to_string()),
            producao_telhado: producao,
            ..TabularRecord::default()
        }
    }

    #[test]
    fn test_link_matches_by_id() {
        let geometries = vec![geometry(1), geometry(2)];
        let records = vec![record(1, "Centro", 310.0)];

        let result = link(&transformer(), &geometries, &records).unwrap();
        assert_eq!(result.entities.len(), 2);
        assert_eq!(result.counters.linked, 1);
        assert_eq!(result.counters.sem_dados_excel, 1);

        let linked = &result.entities[0];
        assert!(linked.is_linked);
        assert_eq!(linked.properties.bairro, "Centro");
        assert_eq!(linked.properties.producao_telhado, 310.0);
        assert!(linked.excel.is_some());

        let unlinked = &result.entities[1];
        assert!(!unlinked.is_linked);
        assert!(unlinked.excel.is_none());
        assert_eq!(unlinked.properties.bairro, BAIRRO_NAO_INFORMADO);
        assert_eq!(unlinked.properties.producao_telhado, 0.0);
    }

    #[test]
    fn test_non_polygon_counts_as_invalid() {
        let point = GeometryRecord {
            id: 9,
            geometry: geo::Geometry::Point(geo::Point::new(590_000.0, 9_720_000.0)),
            kind: GeometryKind::Other,
            properties: serde_json::Map::new(),
        };
        let records = vec![record(1, "Centro", 10.0)];

        let result = link(&transformer(), &[geometry(1), point], &records).unwrap();
        assert_eq!(result.entities.len(), 1);
        assert_eq!(result.counters.coordenadas_invalidas, 1);
        assert_eq!(result.counters.linked, 1);
    }

    #[test]
    fn test_index_last_write_wins() {
        let records = vec![record(5, "Centro", 1.0), record(5, "Cohama", 2.0)];
        let index = build_index(&records);
        assert_eq!(index.len(), 1);
        assert_eq!(index[&5].bairro.as_deref(), Some("Cohama"));
    }

    #[test]
    fn test_empty_result_is_fatal() {
        let mut bad = geometry(1);
        bad.geometry = geo::Geometry::Polygon(polygon![
            (x: 100_000.0, y: 1_000_000.0),
            (x: 100_100.0, y: 1_000_000.0),
            (x: 100_100.0, y: 1_000_100.0),
        ]);
        let err = link(&transformer(), &[bad], &[]).unwrap_err();
        assert!(matches!(
            err,
            LinkError::NoValidEntities { invalid: 1, .. }
        ));
    }

    #[test]
    fn test_taxa_vinculacao() {
        let counters = LinkCounters {
            linked: 3,
            ..LinkCounters::default()
        };
        assert_eq!(counters.taxa_vinculacao(4), 75.0);
        assert_eq!(counters.taxa_vinculacao(0), 0.0);
    }
}
