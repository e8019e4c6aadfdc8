//! Exportação dos resultados (streaming)
//!
//! O GeoJSON de saída é escrito feição a feição, sem montar a coleção
//! inteira em memória. As coordenadas saem na ordem [lng, lat] do padrão
//! GeoJSON; o centroide nas propriedades fica em [lat, lng], a convenção
//! do painel.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::link::{CombinedEntity, EntityProperties};
use crate::stats::Statistics;

/// Propriedades de uma feição exportada
#[derive(Serialize)]
struct ExportProperties<'a> {
    #[serde(flatten)]
    properties: &'a EntityProperties,
    /// Centroide em [lat, lng]
    centroid: [f64; 2],
    is_linked: bool,
}

/// Exporta as entidades como uma FeatureCollection GeoJSON
pub fn export_entities(entities: &[CombinedEntity], output_path: &Path) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Falha ao criar o arquivo: {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);

    write!(
        writer,
        r#"{{"type":"FeatureCollection","crs":{{"type":"name","properties":{{"name":"urn:ogc:def:crs:OGC:1.3:CRS84"}}}},"features":["#
    )?;

    for (i, entity) in entities.iter().enumerate() {
        if i > 0 {
            write!(writer, ",")?;
        }
        write_entity(&mut writer, entity)?;
    }

    write!(writer, "]}}")?;
    writer.flush()?;

    Ok(())
}

/// Escreve uma entidade como Feature GeoJSON (anel externo único)
fn write_entity<W: Write>(writer: &mut W, entity: &CombinedEntity) -> Result<()> {
    write!(writer, r#"{{"type":"Feature","id":{},"#, entity.id)?;

    write!(writer, r#""geometry":{{"type":"Polygon","coordinates":[["#)?;
    for (i, point) in entity.coordinates.iter().enumerate() {
        if i > 0 {
            write!(writer, ",")?;
        }
        write!(writer, "[{},{}]", point.lng, point.lat)?;
    }
    write!(writer, "]]}},")?;

    write!(writer, r#""properties":"#)?;
    serde_json::to_writer(
        &mut *writer,
        &ExportProperties {
            properties: &entity.properties,
            centroid: [entity.centroid.lat, entity.centroid.lng],
            is_linked: entity.is_linked,
        },
    )?;
    write!(writer, "}}")?;

    Ok(())
}

/// Salva as estatísticas em JSON legível
pub fn export_statistics(statistics: &Statistics, output_path: &Path) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Falha ao criar o arquivo: {}", output_path.display()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, statistics)?;
    Ok(())
}
