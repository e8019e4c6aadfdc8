//! Definições de elipsoides

/// Elipsoide GRS80 (datum SIRGAS 2000)
/// Note: quase idêntico ao WGS84, diferença < 0.1mm no semieixo menor
pub struct GRS80;

impl GRS80 {
    /// Semieixo maior (raio equatorial) em metros
    pub const A: f64 = 6378137.0;

    /// Achatamento
    pub const F: f64 = 1.0 / 298.257222101;

    /// Semieixo menor (raio polar) em metros
    pub const B: f64 = Self::A * (1.0 - Self::F);

    /// Primeira excentricidade ao quadrado
    pub const E2: f64 = 2.0 * Self::F - Self::F * Self::F;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert!((GRS80::B - 6356752.314140347).abs() < 1e-6);
        assert!((GRS80::E2 - 0.006694380022903416).abs() < 1e-12);
    }
}
