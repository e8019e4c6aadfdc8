//! Agregação estatística das entidades vinculadas
//!
//! Produz o resumo global e a quebra por bairro consumidos pelo painel.
//! As séries mensais sintéticas são derivadas da média anual por fatores
//! sazonais fixos do regime de chuvas maranhense.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

use crate::link::CombinedEntity;

/// Fatores sazonais por mês (jan..dez), adimensionais
pub const SEASONAL_FACTORS: [f64; 12] = [
    1.1, 1.0, 0.9, 0.8, 0.7, 0.6, 0.7, 0.8, 0.9, 1.0, 1.1, 1.2,
];

/// Resumo global do conjunto de entidades
///
/// A produção agregada usa `capacidade_placas_mes`, a métrica dos cartões
/// de resumo do painel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GlobalStats {
    pub total_imoveis: u64,
    pub producao_total: f64,
    pub media_producao: f64,
}

/// Estatísticas de um bairro
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BairroStats {
    pub total_imoveis: u64,
    pub media_producao_mensal: [f64; 12],
    pub media_radiacao_mensal: [f64; 12],
}

/// Estatísticas completas do pipeline
#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    pub global: GlobalStats,
    /// Ordenado por nome de bairro para saída determinística
    pub por_bairro: BTreeMap<String, BairroStats>,
}

/// Sintetiza a série mensal a partir de uma média anual.
///
/// Cada mês recebe `base / 12` modulado pelo fator sazonal. Bases nulas
/// ou não finitas produzem a série zerada.
pub fn generate_monthly_averages(base: f64) -> [f64; 12] {
    if base == 0.0 || !base.is_finite() {
        return [0.0; 12];
    }
    let mut series = [0.0; 12];
    for (month, factor) in SEASONAL_FACTORS.iter().enumerate() {
        series[month] = base / 12.0 * factor;
    }
    series
}

/// Calcula o resumo global e a quebra por bairro
pub fn compute_statistics(entities: &[CombinedEntity]) -> Statistics {
    let total_imoveis = entities.len() as u64;
    let producao_total: f64 = entities
        .iter()
        .map(|e| e.properties.capacidade_placas_mes)
        .sum();
    let media_producao = if total_imoveis > 0 {
        producao_total / total_imoveis as f64
    } else {
        0.0
    };

    struct Acc {
        count: u64,
        producao: f64,
        radiacao: f64,
    }

    let mut por_bairro_acc: BTreeMap<String, Acc> = BTreeMap::new();
    for entity in entities {
        let acc = por_bairro_acc
            .entry(entity.properties.bairro.clone())
            .or_insert(Acc {
                count: 0,
                producao: 0.0,
                radiacao: 0.0,
            });
        acc.count += 1;
        acc.producao += entity.properties.producao_telhado;
        acc.radiacao += entity.properties.radiacao_max;
    }

    let por_bairro: BTreeMap<String, BairroStats> = por_bairro_acc
        .into_iter()
        .map(|(bairro, acc)| {
            let n = acc.count as f64;
            (
                bairro,
                BairroStats {
                    total_imoveis: acc.count,
                    media_producao_mensal: generate_monthly_averages(acc.producao / n),
                    media_radiacao_mensal: generate_monthly_averages(acc.radiacao / n),
                },
            )
        })
        .collect();

    info!(
        imoveis = total_imoveis,
        bairros = por_bairro.len(),
        producao_total,
        "Estatísticas calculadas"
    );

    Statistics {
        global: GlobalStats {
            total_imoveis,
            producao_total,
            media_producao,
        },
        por_bairro,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GeometryKind;
    use crate::link::EntityProperties;
    use crate::reproject::GeoPoint;

    fn entity(id: i64, bairro: &str, producao: f64, radiacao: f64) -> CombinedEntity {
        let mut properties = EntityProperties::merge(id, None);
        properties.bairro = bairro.to_string();
        properties.producao_telhado = producao;
        properties.capacidade_placas_mes = producao;
        properties.radiacao_max = radiacao;
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
    fn test_monthly_averages_seasonal_shape() {
        let series = generate_monthly_averages(120.0);
        assert_eq!(series[0], 11.0);
        assert_eq!(series[5], 6.0);
        assert_eq!(series[11], 12.0);
    }

    #[test]
    fn test_monthly_averages_degenerate_base() {
        assert_eq!(generate_monthly_averages(0.0), [0.0; 12]);
        assert_eq!(generate_monthly_averages(f64::NAN), [0.0; 12]);
        assert_eq!(generate_monthly_averages(f64::INFINITY), [0.0; 12]);
    }

    #[test]
    fn test_compute_statistics() {
        let entities = vec![
            entity(1, "Centro", 100.0, 5.0),
            entity(2, "Centro", 300.0, 7.0),
            entity(3, "Cohama", 60.0, 6.0),
        ];
        let stats = compute_statistics(&entities);

        assert_eq!(stats.global.total_imoveis, 3);
        assert_eq!(stats.global.producao_total, 460.0);
        assert!((stats.global.media_producao - 460.0 / 3.0).abs() < 1e-9);

        let centro = &stats.por_bairro["Centro"];
        assert_eq!(centro.total_imoveis, 2);
        // Média de produção do bairro é 200, janeiro recebe 200/12 * 1.1
        assert!((centro.media_producao_mensal[0] - 200.0 / 12.0 * 1.1).abs() < 1e-9);

        let cohama = &stats.por_bairro["Cohama"];
        assert_eq!(cohama.total_imoveis, 1);
        assert!((cohama.media_radiacao_mensal[11] - 6.0 / 12.0 * 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_compute_statistics_empty() {
        let stats = compute_statistics(&[]);
        assert_eq!(stats.global.total_imoveis, 0);
        assert_eq!(stats.global.media_producao, 0.0);
        assert!(stats.por_bairro.is_empty());
    }
}
