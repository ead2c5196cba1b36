//! Code generation error types

use std::path::PathBuf;

use actus_mp_core::ScalarType;
use thiserror::Error;

use crate::enums::{GeneratorKind, TargetLanguage};

#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("No {language} mapping for {scalar_type} (term '{term_id}')")]
    UnsupportedMapping {
        language: TargetLanguage,
        term_id: String,
        scalar_type: ScalarType,
    },

    #[error("Enum '{0}' declares no members")]
    EmptyEnum(String),

    #[error("{kind} generator cannot place {entity}")]
    EntityMismatch { kind: GeneratorKind, entity: String },

    #[error("Missing {language} template '{name}'")]
    MissingTemplate {
        language: TargetLanguage,
        name: String,
    },

    #[error("Template '{name}' failed to compile: {source}")]
    Template {
        name: String,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    #[error("Failed to render '{name}': {source}")]
    Render {
        name: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },

    #[error("Failed to build rendering context: {0}")]
    Context(#[from] serde_json::Error),

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
