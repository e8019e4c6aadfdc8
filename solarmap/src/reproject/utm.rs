//! Inversa da projeção Mercator transversa (UTM), forma fechada
//!
//! Séries truncadas idênticas às usadas pelo painel consumidor: latitude
//! de pé em 4 termos, correção de 2ª ordem em latitude e de 3ª ordem em
//! longitude. Sem iteração.

use serde::{Deserialize, Serialize};

use super::ellipsoid::GRS80;
use super::GeoPoint;

/// Parâmetros de uma zona UTM sobre o elipsoide GRS80
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct UtmParams {
    /// Meridiano central da zona, em graus
    pub central_meridian: f64,
    /// Falso este, em metros
    pub false_easting: f64,
    /// Falso norte, em metros (10 000 000 no hemisfério sul)
    pub false_northing: f64,
    /// Fator de escala k0
    pub scale_factor: f64,
}

impl UtmParams {
    /// SIRGAS 2000 / UTM zona 23S (EPSG:31983) - São Luís
    pub const SIRGAS2000_UTM_23S: UtmParams = UtmParams {
        central_meridian: -45.0,
        false_easting: 500_000.0,
        false_northing: 10_000_000.0,
        scale_factor: 0.9996,
    };

    /// Converte (easting, northing) para graus geográficos.
    ///
    /// Puro, sem validação de região: a caixa delimitadora é aplicada pelo
    /// [`Transformer`](super::Transformer).
    pub fn inverse(&self, easting: f64, northing: f64) -> GeoPoint {
        let a = GRS80::A;
        let e2 = GRS80::E2;
        let k0 = self.scale_factor;
        let lon0 = self.central_meridian.to_radians();

        let x = easting - self.false_easting;
        let y = northing - self.false_northing;

        // Latitude de pé via arco meridional
        let m = y / k0;
        let mu = m / (a * (1.0 - e2 / 4.0 - 3.0 * e2 * e2 / 64.0 - 5.0 * e2 * e2 * e2 / 256.0));
        let e1 = (1.0 - (1.0 - e2).sqrt()) / (1.0 + (1.0 - e2).sqrt());

        let phi1 = mu
            + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
            + (21.0 * e1.powi(2) / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
            + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin()
            + (1097.0 * e1.powi(4) / 512.0) * (8.0 * mu).sin();

        let sin_phi1 = phi1.sin();
        let cos_phi1 = phi1.cos();
        let tan_phi1 = phi1.tan();

        // C1 com a primeira excentricidade, paridade numérica com o painel
        let c1 = e2 * cos_phi1 * cos_phi1;
        let t1 = tan_phi1 * tan_phi1;
        let n1 = a / (1.0 - e2 * sin_phi1 * sin_phi1).sqrt();
        let r1 = a * (1.0 - e2) / (1.0 - e2 * sin_phi1 * sin_phi1).powf(1.5);
        let d = x / (n1 * k0);

        let lat = phi1
            - (n1 * tan_phi1 / r1)
                * (d * d / 2.0
                    * (1.0
                        - d * d / 12.0
                            * (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * e2)));
        let lon = lon0 + (d - d.powi(3) / 6.0 * (1.0 + 2.0 * t1 + c1)) / cos_phi1;

        GeoPoint {
            lat: lat.to_degrees(),
            lng: lon.to_degrees(),
        }
    }
}
