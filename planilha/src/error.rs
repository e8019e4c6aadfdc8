//! Tipos de erro do crate planilha

use thiserror::Error;

/// Erros de decodificação e validação do dataset tabular
#[derive(Debug, Error)]
pub enum PlanilhaError {
    /// Payload JSON ilegível
    #[error("Invalid tabular JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// O payload não tem a forma esperada (array de objetos por cabeçalho)
    #[error("Unexpected tabular payload: {0}")]
    UnexpectedPayload(String),

    /// Dataset rejeitado pela validação global
    #[error("Dataset validation failed: {reason}")]
    Validation { reason: String },
}

impl PlanilhaError {
    /// Cria um erro de validação com motivo nomeado
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }
}
