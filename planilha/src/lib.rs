//! # planilha
//!
//! Normalização do dataset tabular de potencial solar por edificação.
//!
//! A planilha de origem é heterogênea: cabeçalhos longos em português (com
//! acentos e unidades), números em formato pt-BR ("1.234,56"), campos
//! ausentes e colunas renomeadas entre versões do arquivo. Este crate
//! converte cada linha bruta (`RawRow`, cabeçalho → célula) em um
//! [`TabularRecord`] com esquema canônico fixo.
//!
//! ## Garantias
//!
//! - [`normalize_row`](normalize::normalize_row) nunca falha: campos
//!   numéricos ausentes valem `0.0`, texto que não parseia como número é
//!   preservado como string original.
//! - As séries mensais têm sempre exatamente 12 posições.
//! - A normalização é pura e idempotente.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let rows = planilha::decode::rows_from_json(&payload)?;
//! let records = planilha::normalize_dataset(&rows)?;
//! for record in &records {
//!     println!("{:?}: {} m²", record.objectid, record.area_edificacao);
//! }
//! ```

pub mod decode;
pub mod error;
pub mod header;
pub mod normalize;
pub mod number;
pub mod types;

pub use error::PlanilhaError;
pub use normalize::{extract_object_id, normalize_row, validate_dataset, ID_CANDIDATES};
pub use types::{CellValue, RawRow, TabularRecord};

/// Normaliza todas as linhas e aplica a validação global do dataset.
///
/// A validação é a porta de sanidade de nível de dataset: ela roda uma vez
/// após a normalização em lote e é distinta da normalização por linha (que
/// nunca falha).
pub fn normalize_dataset(rows: &[RawRow]) -> Result<Vec<TabularRecord>, PlanilhaError> {
    let records: Vec<TabularRecord> = rows.iter().map(normalize_row).collect();
    validate_dataset(&records)?;
    tracing::debug!(records = records.len(), "Dataset normalizado e validado");
    Ok(records)
}
