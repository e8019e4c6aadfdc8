//! Processamento de geometrias de edificação
//!
//! Extrai o anel externo de polígonos, reprojeta vértice a vértice e
//! calcula o centroide pela média aritmética dos vértices do anel.

use geo::{Geometry, LineString};
use serde::Serialize;
use tracing::debug;

use crate::reproject::{GeoPoint, Transformer};

/// Tipo de geometria de uma feição carregada.
///
/// Feições `Other` seguem no pipeline e caem como coordenada inválida na
/// vinculação; nunca chegam a uma entidade final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum GeometryKind {
    Polygon,
    MultiPolygon,
    Other,
}

/// Feição bruta carregada do GeoJSON, ainda em coordenadas projetadas
#[derive(Debug, Clone)]
pub struct GeometryRecord {
    pub id: i64,
    pub geometry: Geometry,
    pub kind: GeometryKind,
    pub properties: serde_json::Map<String, serde_json::Value>,
}

/// Geometria reprojetada e validada
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedGeometry {
    /// Anel externo em graus, na ordem original dos vértices
    pub coordinates: Vec<GeoPoint>,
    /// Média aritmética dos vértices do anel
    pub centroid: GeoPoint,
}

/// Extrai o anel externo de trabalho de uma geometria.
///
/// Para `MultiPolygon` apenas o primeiro polígono é considerado: as
/// edificações do cadastro têm um único corpo, os demais são artefatos
/// de digitalização.
pub fn outer_ring(geometry: &Geometry) -> Option<&LineString> {
    match geometry {
        Geometry::Polygon(poly) => Some(poly.exterior()),
        Geometry::MultiPolygon(mp) => mp.0.first().map(|poly| poly.exterior()),
        _ => None,
    }
}

/// Reprojeta o anel externo e calcula o centroide.
///
/// Vértices inválidos (não finitos ou fora da região) são descartados
/// individualmente; a geometria só é rejeitada quando nenhum vértice
/// sobrevive ou quando o centroide cai fora da região.
pub fn process_geometry(
    transformer: &Transformer,
    geometry: &Geometry,
) -> Option<ProcessedGeometry> {
    let ring = outer_ring(geometry)?;

    let coordinates: Vec<GeoPoint> = ring
        .coords()
        .filter_map(|c| transformer.to_geographic(c.x, c.y))
        .collect();

    if coordinates.is_empty() {
        return None;
    }

    let n = coordinates.len() as f64;
    let centroid = GeoPoint {
        lat: coordinates.iter().map(|p| p.lat).sum::<f64>() / n,
        lng: coordinates.iter().map(|p| p.lng).sum::<f64>() / n,
    };

    if !transformer.is_valid_region(&centroid) {
        debug!(
            lat = centroid.lat,
            lng = centroid.lng,
            "Centroide fora da região, geometria descartada"
        );
        return None;
    }

    Some(ProcessedGeometry {
        coordinates,
        centroid,
    })
}

/// Extrai o identificador de uma feição a partir das propriedades.
///
/// Tenta as chaves candidatas na ordem fixa usada também pelo dataset
/// tabular; na ausência de todas, cai no índice sequencial (1-based).
pub fn extract_feature_id(
    properties: &serde_json::Map<String, serde_json::Value>,
    index: usize,
) -> i64 {
    for key in planilha::ID_CANDIDATES {
        match properties.get(key) {
            Some(serde_json::Value::Number(n)) => {
                if let Some(id) = n.as_i64() {
                    return id;
                }
                if let Some(f) = n.as_f64() {
                    return f.trunc() as i64;
                }
            }
            Some(serde_json::Value::String(s)) => {
                if let Some(id) = planilha::number::parse_int_prefix(s) {
                    return id;
                }
            }
            _ => {}
        }
    }
    index as i64 + 1
}
