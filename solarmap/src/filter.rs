//! Filtragem das entidades vinculadas
//!
//! Critérios combináveis: lista de bairros e intervalo sobre uma métrica
//! numérica. Critérios ausentes não restringem nada.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::link::{CombinedEntity, EntityProperties};

/// Métricas numéricas filtráveis de uma entidade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricField {
    AreaEdificacao,
    ProducaoTelhado,
    CapacidadePorM2,
    RadiacaoMax,
    QuantidadePlacas,
    CapacidadePlacasDia,
    CapacidadePlacasMes,
    PotencialMedioDia,
    RendaTotal,
    RendaPerCapita,
    RendaDomiciliarPerCapita,
}

impl MetricField {
    /// Valor da métrica nas propriedades de uma entidade
    pub fn value(&self, properties: &EntityProperties) -> f64 {
        match self {
            MetricField::AreaEdificacao => properties.area_edificacao,
            MetricField::ProducaoTelhado => properties.producao_telhado,
            MetricField::CapacidadePorM2 => properties.capacidade_por_m2,
            MetricField::RadiacaoMax => properties.radiacao_max,
            MetricField::QuantidadePlacas => properties.quantidade_placas,
            MetricField::CapacidadePlacasDia => properties.capacidade_placas_dia,
            MetricField::CapacidadePlacasMes => properties.capacidade_placas_mes,
            MetricField::PotencialMedioDia => properties.potencial_medio_dia,
            MetricField::RendaTotal => properties.renda_total,
            MetricField::RendaPerCapita => properties.renda_per_capita,
            MetricField::RendaDomiciliarPerCapita => properties.renda_domiciliar_per_capita,
        }
    }
}

impl FromStr for MetricField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "area_edificacao" => Ok(MetricField::AreaEdificacao),
            "producao_telhado" => Ok(MetricField::ProducaoTelhado),
            "capacidade_por_m2" => Ok(MetricField::CapacidadePorM2),
            "radiacao_max" => Ok(MetricField::RadiacaoMax),
            "quantidade_placas" => Ok(MetricField::QuantidadePlacas),
            "capacidade_placas_dia" => Ok(MetricField::CapacidadePlacasDia),
            "capacidade_placas_mes" => Ok(MetricField::CapacidadePlacasMes),
            "potencial_medio_dia" => Ok(MetricField::PotencialMedioDia),
            "renda_total" => Ok(MetricField::RendaTotal),
            "renda_per_capita" => Ok(MetricField::RendaPerCapita),
            "renda_domiciliar_per_capita" => Ok(MetricField::RendaDomiciliarPerCapita),
            other => Err(format!("Métrica desconhecida: {}", other)),
        }
    }
}

/// Critérios de filtragem combináveis
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FilterCriteria {
    /// Bairros aceitos; lista vazia ou ausente aceita todos
    #[serde(default)]
    pub bairros: Vec<String>,
    pub metric: Option<MetricField>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
}

impl FilterCriteria {
    /// Verifica se uma entidade satisfaz todos os critérios
    pub fn matches(&self, entity: &CombinedEntity) -> bool {
        if !self.bairros.is_empty() && !self.bairros.contains(&entity.properties.bairro) {
            return false;
        }
        if let Some(metric) = self.metric {
            let value = metric.value(&entity.properties);
            if let Some(min) = self.min_value {
                if value < min {
                    return false;
                }
            }
            if let Some(max) = self.max_value {
                if value > max {
                    return false;
                }
            }
        }
        true
    }

    /// Aplica os critérios, preservando a ordem das entidades
    pub fn apply<'a>(&self, entities: &'a [CombinedEntity]) -> Vec<&'a CombinedEntity> {
        entities.iter().filter(|e| self.matches(e)).collect()
    }
}

/// Resumo de uma filtragem, na forma dos cartões do painel:
/// contagem, produção total e média de `capacidade_placas_mes`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FilterSummary {
    pub total: u64,
    pub selecionadas: u64,
    pub descartadas: u64,
    pub producao_total: f64,
    pub media_producao: f64,
}

/// Aplica os critérios e contabiliza o resultado
pub fn summarize(criteria: &FilterCriteria, entities: &[CombinedEntity]) -> FilterSummary {
    let total = entities.len() as u64;
    let mut selecionadas = 0u64;
    let mut producao_total = 0.0;
    for entity in entities.iter().filter(|e| criteria.matches(e)) {
        selecionadas += 1;
        producao_total += entity.properties.capacidade_placas_mes;
    }
    let media_producao = if selecionadas > 0 {
        producao_total / selecionadas as f64
    } else {
        0.0
    };
    FilterSummary {
        total,
        selecionadas,
        descartadas: total - selecionadas,
        producao_total,
        media_producao,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GeometryKind;
    use crate::reproject::GeoPoint;

    fn entity(id: i64, bairro: &str, producao: f64) -> CombinedEntity {
        let mut properties = EntityProperties::merge(id, None);
        properties.bairro = bairro.to_string();
        properties.producao_telhado = producao;
        properties.capacidade_placas_mes = producao;
        CombinedEntity {
            id,
            coordinates: vec![GeoPoint { lat: -2.5, lng: -44.2 }],
            centroid: GeoPoint { lat: -2.5, lng: -44.2 },
            kind: GeometryKind::Polygon,
            properties,
            is_linked: true,
            excel: None,
        }
    }

    #[test]
    fn test_empty_criteria_accepts_all() {
        let entities = vec![entity(1, "Centro", 10.0), entity(2, "Cohama", 20.0)];
        let criteria = FilterCriteria::default();
        assert_eq!(criteria.apply(&entities).len(), 2);
    }

    #[test]
    fn test_bairro_filter() {
        let entities = vec![entity(1, "Centro", 10.0), entity(2, "Cohama", 20.0)];
        let criteria = FilterCriteria {
            bairros: vec!["Cohama".to_string()],
            ..FilterCriteria::default()
        };
        let filtered = criteria.apply(&entities);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 2);
    }

    #[test]
    fn test_metric_range() {
        let entities = vec![
            entity(1, "Centro", 10.0),
            entity(2, "Centro", 50.0),
            entity(3, "Centro", 90.0),
        ];
        let criteria = FilterCriteria {
            metric: Some(MetricField::ProducaoTelhado),
            min_value: Some(20.0),
            max_value: Some(80.0),
            ..FilterCriteria::default()
        };
        let filtered = criteria.apply(&entities);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 2);

        let summary = summarize(&criteria, &entities);
        assert_eq!(summary.selecionadas, 1);
        assert_eq!(summary.descartadas, 2);
        assert_eq!(summary.producao_total, 50.0);
        assert_eq!(summary.media_producao, 50.0);
    }

    #[test]
    fn test_metric_from_str() {
        assert_eq!(
            "renda_per_capita".parse::<MetricField>().unwrap(),
            MetricField::RendaPerCapita
        );
        assert!("inexistente".parse::<MetricField>().is_err());
    }
}
