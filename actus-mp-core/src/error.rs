//! Error types for the core crate

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Term not found: {0}")]
    TermNotFound(String),

    #[error("Contract not found: {0}")]
    ContractNotFound(String),

    #[error("State not found: {0}")]
    StateNotFound(String),

    #[error("Unknown scalar type: {0}")]
    UnknownScalarType(String),

    #[error("Unknown publication status: {0}")]
    UnknownPublicationStatus(String),

    #[error("Unknown function type: {0}")]
    UnknownFunctionType(String),
}
