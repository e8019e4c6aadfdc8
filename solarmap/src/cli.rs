//! Definição e implementação dos comandos da CLI
//!
//! CLI enxuta:
//! - `build`: executa o pipeline e grava as saídas
//! - `check`: valida as entradas e diagnostica a interseção de ids

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::{info, warn};

use crate::config::Config;
use crate::export;
use crate::filter::{FilterCriteria, MetricField};
use crate::load;
use crate::pipeline;

#[derive(Subcommand)]
pub enum Commands {
    /// Executa o pipeline completo e grava as saídas
    Build {
        /// Nome de preset (sao-luis) ou caminho de um JSON de configuração
        #[arg(long, default_value = "sao-luis")]
        config: String,

        /// Caminho do GeoJSON de edificações (sobrepõe a configuração)
        #[arg(long)]
        geojson: Option<PathBuf>,

        /// Caminho do dataset tabular (sobrepõe a configuração)
        #[arg(long)]
        tabular: Option<PathBuf>,

        /// Diretório de saída
        #[arg(short, long, default_value = "saida")]
        output: PathBuf,

        /// Restringir a saída a um bairro (repetível)
        #[arg(long = "bairro")]
        bairros: Vec<String>,

        /// Métrica para o filtro por intervalo (ex.: producao_telhado)
        #[arg(long)]
        metric: Option<MetricField>,

        /// Valor mínimo da métrica
        #[arg(long)]
        min_value: Option<f64>,

        /// Valor máximo da métrica
        #[arg(long)]
        max_value: Option<f64>,
    },

    /// Valida as entradas sem gravar nada
    Check {
        /// Nome de preset (sao-luis) ou caminho de um JSON de configuração
        #[arg(long, default_value = "sao-luis")]
        config: String,

        /// Caminho do GeoJSON de edificações (sobrepõe a configuração)
        #[arg(long)]
        geojson: Option<PathBuf>,

        /// Caminho do dataset tabular (sobrepõe a configuração)
        #[arg(long)]
        tabular: Option<PathBuf>,
    },
}

/// Resolve a configuração efetiva: preset ou arquivo, depois variáveis de
/// ambiente (`SOLARMAP_GEOJSON`, `SOLARMAP_TABULAR`), depois os argumentos.
pub fn resolve_config(
    config_spec: &str,
    geojson: Option<&Path>,
    tabular: Option<&Path>,
) -> Result<Config> {
    let mut config = if Path::new(config_spec).is_file() {
        Config::load(Path::new(config_spec))?
    } else {
        Config::from_preset(config_spec)?
    };

    if let Ok(path) = std::env::var("SOLARMAP_GEOJSON") {
        config.geojson_paths = vec![path];
    }
    if let Ok(path) = std::env::var("SOLARMAP_TABULAR") {
        config.tabular_paths = vec![path];
    }

    if let Some(path) = geojson {
        config.geojson_paths = vec![path.to_string_lossy().to_string()];
    }
    if let Some(path) = tabular {
        config.tabular_paths = vec![path.to_string_lossy().to_string()];
    }

    Ok(config)
}

/// Executa o comando build
pub async fn cmd_build(
    config_spec: &str,
    geojson: Option<&Path>,
    tabular: Option<&Path>,
    output: &Path,
    criteria: &FilterCriteria,
) -> Result<()> {
    let config = resolve_config(config_spec, geojson, tabular)?;

    std::fs::create_dir_all(output)
        .with_context(|| format!("Falha ao criar o diretório de saída: {}", output.display()))?;

    let mut result = pipeline::run(&config).await?;

    let has_criteria = !criteria.bairros.is_empty() || criteria.metric.is_some();
    if has_criteria {
        let summary = crate::filter::summarize(criteria, &result.entities);
        info!(
            selecionadas = summary.selecionadas,
            descartadas = summary.descartadas,
            "Filtro aplicado às entidades"
        );
        result.entities.retain(|e| criteria.matches(e));
    }

    let entities_path = output.join("entidades.geojson");
    export::export_entities(&result.entities, &entities_path)?;
    info!(path = %entities_path.display(), "Entidades exportadas");

    let stats_path = output.join("estatisticas.json");
    export::export_statistics(&result.statistics, &stats_path)?;
    info!(path = %stats_path.display(), "Estatísticas exportadas");

    let report_path = output.join("relatorio.json");
    result.report.save_to_file(&report_path)?;
    info!(path = %report_path.display(), "Relatório salvo");

    result.report.display();

    Ok(())
}

/// Executa o comando check: valida as entradas e mede a interseção dos
/// identificadores entre as duas fontes.
pub async fn cmd_check(
    config_spec: &str,
    geojson: Option<&Path>,
    tabular: Option<&Path>,
) -> Result<()> {
    let config = resolve_config(config_spec, geojson, tabular)?;

    let geometries = load::load_geometry(&config.geojson_paths).await?;
    let rows = load::load_tabular(&config.tabular_paths).await?;
    let records = planilha::normalize_dataset(&rows)?;

    let geometry_ids: HashSet<i64> = geometries.iter().map(|g| g.id).collect();
    let tabular_ids: HashSet<i64> = records.iter().filter_map(|r| r.objectid).collect();
    let shared = geometry_ids.intersection(&tabular_ids).count();

    println!("\n--- DIAGNÓSTICO DAS ENTRADAS ---");
    println!("Geometrias: {} ({} ids distintos)", geometries.len(), geometry_ids.len());
    println!(
        "Registros tabulares: {} ({} ids distintos)",
        records.len(),
        tabular_ids.len()
    );
    println!(
        "Interseção de ids: {} ({:.1}% das geometrias)",
        shared,
        if geometry_ids.is_empty() {
            0.0
        } else {
            shared as f64 / geometry_ids.len() as f64 * 100.0
        }
    );

    if shared == 0 {
        warn!("Nenhum identificador em comum entre as duas fontes");
    }

    Ok(())
}
