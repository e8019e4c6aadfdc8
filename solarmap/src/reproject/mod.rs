//! Reprojeção leve em Rust puro (sem dependências externas)
//!
//! Suporta a projeção do cadastro de São Luís:
//! - SIRGAS 2000 / UTM zona 23S (EPSG:31983)
//!
//! Alvo:
//! - Coordenadas geográficas SIRGAS 2000 (≈ WGS84, diferença < 0.1mm)

mod ellipsoid;
mod utm;

pub use ellipsoid::GRS80;
pub use utm::UtmParams;

use serde::{Deserialize, Serialize};

/// Ponto em coordenadas geográficas (graus)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Caixa delimitadora geográfica da região de trabalho
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct GeoBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl GeoBounds {
    /// Município de São Luís (MA)
    pub const SAO_LUIS: GeoBounds = GeoBounds {
        north: -2.200,
        south: -2.800,
        east: -43.900,
        west: -44.600,
    };

    /// Verifica se um ponto geográfico está dentro da caixa
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat <= self.north && lat >= self.south && lng <= self.east && lng >= self.west
    }
}

/// Transformador UTM → geográfico com validação de região
///
/// Combina a inversa pura da projeção com uma caixa delimitadora: pontos
/// não finitos ou fora da região viram `None` em vez de contaminar o
/// restante do pipeline.
#[derive(Debug, Clone, Copy)]
pub struct Transformer {
    params: UtmParams,
    bounds: GeoBounds,
}

impl Transformer {
    pub fn new(params: UtmParams, bounds: GeoBounds) -> Self {
        Self { params, bounds }
    }

    /// Transformador padrão de São Luís (EPSG:31983)
    pub fn sao_luis() -> Self {
        Self::new(UtmParams::SIRGAS2000_UTM_23S, GeoBounds::SAO_LUIS)
    }

    pub fn bounds(&self) -> GeoBounds {
        self.bounds
    }

    /// Converte (easting, northing) em graus, validando a região.
    ///
    /// Retorna `None` para entradas não finitas e para pontos que caem
    /// fora da caixa delimitadora.
    pub fn to_geographic(&self, easting: f64, northing: f64) -> Option<GeoPoint> {
        if !easting.is_finite() || !northing.is_finite() {
            return None;
        }
        let point = self.params.inverse(easting, northing);
        if !point.lat.is_finite() || !point.lng.is_finite() {
            return None;
        }
        if !self.bounds.contains(point.lat, point.lng) {
            return None;
        }
        Some(point)
    }

    /// Verifica se um ponto já geográfico pertence à região de trabalho
    pub fn is_valid_region(&self, point: &GeoPoint) -> bool {
        self.bounds.contains(point.lat, point.lng)
    }
}
