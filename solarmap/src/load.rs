//! Carregamento dos arquivos de entrada
//!
//! As entradas vêm de caminhos alternativos ordenados: o primeiro arquivo
//! legível vence, os demais são ignorados. É o mesmo contrato para o
//! GeoJSON de edificações e para o dataset tabular.

use anyhow::{bail, Context, Result};
use geojson::GeoJson;
use tracing::{debug, info, warn};

use crate::geometry::{extract_feature_id, GeometryKind, GeometryRecord};
use planilha::RawRow;

/// Lê o primeiro arquivo disponível entre os caminhos candidatos.
///
/// Falha apenas quando todos os caminhos falham, listando-os na mensagem.
pub async fn read_first_available(paths: &[String]) -> Result<(String, String)> {
    for path in paths {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => {
                info!(path = %path, bytes = content.len(), "Arquivo carregado");
                return Ok((path.clone(), content));
            }
            Err(e) => {
                debug!(path = %path, error = %e, "Caminho indisponível, tentando o próximo");
            }
        }
    }
    bail!(
        "Nenhum dos caminhos candidatos pôde ser lido: {}",
        paths.join(", ")
    )
}

/// Carrega e decodifica o GeoJSON de edificações.
///
/// Toda feição com geometria segue adiante, inclusive as não poligonais
/// (elas contam como coordenada inválida na vinculação). O identificador
/// vem das propriedades, ou do índice sequencial como último recurso.
pub async fn load_geometry(paths: &[String]) -> Result<Vec<GeometryRecord>> {
    let (path, content) = read_first_available(paths).await?;

    let geojson: GeoJson = content
        .parse()
        .with_context(|| format!("GeoJSON inválido: {}", path))?;

    let collection = match geojson {
        GeoJson::FeatureCollection(fc) => fc,
        _ => bail!("Esperava uma FeatureCollection em {}", path),
    };

    let total = collection.features.len();
    let mut records = Vec::with_capacity(total);

    for (index, feature) in collection.features.into_iter().enumerate() {
        let properties = feature.properties.unwrap_or_default();

        let Some(geometry) = feature.geometry else {
            warn!(index, "Feição sem geometria, pulada");
            continue;
        };

        let kind = match geometry.value {
            geojson::Value::Polygon(_) => GeometryKind::Polygon,
            geojson::Value::MultiPolygon(_) => GeometryKind::MultiPolygon,
            ref other => {
                warn!(index, tipo = %geometry_type_name(other), "Feição não poligonal");
                GeometryKind::Other
            }
        };

        let geometry = geo::Geometry::<f64>::try_from(geometry.value)
            .with_context(|| format!("Geometria malformada na feição {}", index))?;

        records.push(GeometryRecord {
            id: extract_feature_id(&properties, index),
            geometry,
            kind,
            properties,
        });
    }

    info!(
        total,
        feicoes = records.len(),
        "Feições geométricas carregadas"
    );
    Ok(records)
}

/// Carrega o dataset tabular (matriz JSON de objetos cabeçalho → célula)
pub async fn load_tabular(paths: &[String]) -> Result<Vec<RawRow>> {
    let (path, content) = read_first_available(paths).await?;

    let rows = planilha::decode::rows_from_json(&content)
        .with_context(|| format!("Dataset tabular inválido: {}", path))?;

    info!(linhas = rows.len(), "Dataset tabular carregado");
    Ok(rows)
}

fn geometry_type_name(value: &geojson::Value) -> &'static str {
    match value {
        geojson::Value::Point(_) => "Point",
        geojson::Value::MultiPoint(_) => "MultiPoint",
        geojson::Value::LineString(_) => "LineString",
        geojson::Value::MultiLineString(_) => "MultiLineString",
        geojson::Value::Polygon(_) => "Polygon",
        geojson::Value::MultiPolygon(_) => "MultiPolygon",
        geojson::Value::GeometryCollection(_) => "GeometryCollection",
    }
}
