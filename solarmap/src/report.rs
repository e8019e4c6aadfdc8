//! Relatório de execução da vinculação
//!
//! Este módulo fornece as estruturas para consolidar e exibir o resultado
//! do pipeline, com os contadores de diagnóstico.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

use crate::link::LinkCounters;

/// Status global da vinculação
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LinkStatus {
    /// Todas as geometrias processadas foram vinculadas
    Success,
    /// Resultado produzido, mas com geometrias sem par ou descartadas
    PartialSuccess,
}

/// Relatório completo da execução
#[derive(Debug, Clone, Serialize)]
pub struct LinkReport {
    /// Status global
    pub status: LinkStatus,
    /// Duração da execução
    pub duration_secs: f64,

    // Contadores globais
    /// Feições geométricas carregadas
    pub geometrias: u64,
    /// Linhas do dataset tabular
    pub registros_tabulares: u64,
    /// Entidades produzidas
    pub entidades_validas: u64,

    /// Contadores detalhados da vinculação
    pub counters: LinkCounters,
    /// Percentual de vinculação sobre as entidades que sobreviveram
    pub taxa_vinculacao: f64,
}

impl LinkReport {
    pub fn new(geometrias: u64, registros_tabulares: u64, entidades_validas: u64, counters: LinkCounters) -> Self {
        let discarded = counters.coordenadas_invalidas + counters.fora_da_regiao;
        let status = if counters.linked == entidades_validas && discarded == 0 {
            LinkStatus::Success
        } else {
            LinkStatus::PartialSuccess
        };
        Self {
            status,
            duration_secs: 0.0,
            geometrias,
            registros_tabulares,
            entidades_validas,
            counters,
            taxa_vinculacao: counters.taxa_vinculacao(entidades_validas),
        }
    }

    /// Define a duração da execução
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs_f64();
    }

    /// Exibe o relatório no console
    pub fn display(&self) {
        println!("\n{}", "=".repeat(60));
        println!("RELATÓRIO DE VINCULAÇÃO");
        println!("{}", "=".repeat(60));

        println!("\nStatus: {:?}", self.status);
        println!("Duração: {:.2}s", self.duration_secs);

        println!("\n--- RESUMO ---");
        println!(
            "Entradas: {} geometrias, {} registros tabulares",
            self.geometrias, self.registros_tabulares
        );
        println!(
            "Entidades: {} válidas, {} vinculadas ({:.1}%)",
            self.entidades_validas, self.counters.linked, self.taxa_vinculacao
        );
        println!(
            "Descartes: {} sem dados tabulares, {} coordenadas inválidas, {} fora da região",
            self.counters.sem_dados_excel,
            self.counters.coordenadas_invalidas,
            self.counters.fora_da_regiao
        );

        println!("\n{}", "=".repeat(60));
    }

    /// Salva o relatório em JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Linha compacta para logs
    pub fn summary(&self) -> String {
        format!(
            "{} entidades ({} vinculadas, {:.1}%), {} inválidas, {} fora da região",
            self.entidades_validas,
            self.counters.linked,
            self.taxa_vinculacao,
            self.counters.coordenadas_invalidas,
            self.counters.fora_da_regiao
        )
    }
}
