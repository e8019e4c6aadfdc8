//! Configuração do pipeline

use serde::{Deserialize, Serialize};
use std::path::Path;

use anyhow::{Context, Result};

use crate::reproject::{GeoBounds, Transformer, UtmParams};

/// Configuração principal
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Caminhos candidatos do GeoJSON de edificações, em ordem de preferência
    pub geojson_paths: Vec<String>,

    /// Caminhos candidatos do dataset tabular, em ordem de preferência
    pub tabular_paths: Vec<String>,

    /// Parâmetros da projeção UTM de origem
    pub projecao: UtmParams,

    /// Caixa delimitadora da região de trabalho
    pub bounds: GeoBounds,
}

impl Config {
    /// Carrega uma configuração a partir de um arquivo
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Falha ao ler a configuração: {}", path.display()))?;

        serde_json::from_str(&content).context("Configuração JSON inválida")
    }

    /// Carrega uma configuração de um preset embutido
    pub fn from_preset(preset: &str) -> Result<Self> {
        match preset {
            "sao-luis" => Self::load_embedded(include_str!("presets/sao_luis.json")),
            _ => anyhow::bail!("Preset desconhecido: {}. Use: sao-luis", preset),
        }
    }

    fn load_embedded(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Preset embutido inválido")
    }

    /// Constrói o transformador de coordenadas desta configuração
    pub fn transformer(&self) -> Transformer {
        Transformer::new(self.projecao, self.bounds)
    }
}
