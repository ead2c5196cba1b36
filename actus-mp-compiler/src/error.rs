//! Compiler error types

use std::path::PathBuf;

use actus_mp_core::CoreError;
use thiserror::Error;

/// Data-integrity faults; any of these aborts the whole compilation
#[derive(Error, Debug)]
pub enum CompilerError {
    #[error("Failed to read dictionary {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed dictionary document: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Schema error at {location}: {source}")]
    Schema {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value at {location}: {source}")]
    InvalidValue {
        location: String,
        #[source]
        source: CoreError,
    },

    #[error("Invalid version date: {0}")]
    InvalidDate(String),

    #[error("Contract type '{contract_type_id}' references unknown term '{term_id}'")]
    UnknownTerm {
        contract_type_id: String,
        term_id: String,
    },

    #[error("Applicability declared for unknown contract type '{0}'")]
    UnknownContractType(String),
}
