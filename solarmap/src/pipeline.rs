//! Orquestração do pipeline completo
//!
//! Carrega as entradas, normaliza o dataset tabular, vincula, agrega e
//! consolida o relatório. A filtragem e a exportação ficam a cargo de
//! quem consome o resultado.

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::link::{self, CombinedEntity};
use crate::load;
use crate::report::LinkReport;
use crate::stats::{self, Statistics};

/// Resultado consolidado de uma execução
#[derive(Debug)]
pub struct PipelineOutput {
    pub entities: Vec<CombinedEntity>,
    pub statistics: Statistics,
    pub report: LinkReport,
}

/// Executa o pipeline de ponta a ponta
pub async fn run(config: &Config) -> Result<PipelineOutput> {
    let started = Instant::now();
    let transformer = config.transformer();

    let geometries = load::load_geometry(&config.geojson_paths)
        .await
        .context("Falha ao carregar as geometrias")?;
    let rows = load::load_tabular(&config.tabular_paths)
        .await
        .context("Falha ao carregar o dataset tabular")?;

    let records =
        planilha::normalize_dataset(&rows).context("Falha na normalização do dataset tabular")?;

    let result = link::link(&transformer, &geometries, &records)
        .context("Falha na vinculação das entidades")?;

    let statistics = stats::compute_statistics(&result.entities);

    let mut report = LinkReport::new(
        geometries.len() as u64,
        records.len() as u64,
        result.entities.len() as u64,
        result.counters,
    );
    report.set_duration(started.elapsed());

    info!(resumo = %report.summary(), "Pipeline concluído");

    Ok(PipelineOutput {
        entities: result.entities,
        statistics,
        report,
    })
}
