//! # solarmap
//!
//! Pipeline de potencial solar por edificação para São Luís (MA).
//!
//! ## Features
//!
//! - Reprojeção SIRGAS 2000 / UTM 23S → coordenadas geográficas, em Rust puro
//! - Vinculação das geometrias de edificação ao dataset tabular de energia
//! - Estatísticas globais e por bairro, com séries mensais sintéticas
//! - Exportação GeoJSON em streaming
//! - CLI simples
//!
//! ## Usage CLI
//!
//! ```bash
//! # Pipeline completo com o preset de São Luís
//! solarmap build --output ./saida/
//!
//! # Entradas explícitas
//! solarmap build --geojson ./construcoes.geojson --tabular ./dados.json
//!
//! # Apenas validar as entradas
//! solarmap check
//! ```

pub mod cli;
pub mod config;
pub mod export;
pub mod filter;
pub mod geometry;
pub mod link;
pub mod load;
pub mod pipeline;
pub mod report;
pub mod reproject;
pub mod stats;

pub use config::Config;
pub use link::{CombinedEntity, EntityProperties, LinkCounters};
pub use report::{LinkReport, LinkStatus};
pub use reproject::{GeoBounds, GeoPoint, Transformer, UtmParams};
