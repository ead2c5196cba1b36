//! Dictionary compiler
//!
//! Decodes the dictionary document, normalizes it and builds the immutable
//! object model handed to the code generators.

use std::path::Path;

use tracing::{info, warn};

use crate::factory::{build_dictionary, Compilation};
use crate::normalize::normalize;
use crate::raw::RawDictionary;
use crate::CompilerError;

/// Compiler for dictionary documents
pub struct DictionaryCompiler;

impl DictionaryCompiler {
    pub fn new() -> Self {
        Self
    }

    /// Compile a dictionary document held in memory
    pub fn compile(&self, source: &str) -> Result<Compilation, CompilerError> {
        let mut raw = self.decode(source)?;
        normalize(&mut raw)?;
        let compilation = build_dictionary(&raw)?;

        let dictionary = &compilation.dictionary;
        info!(
            version = %dictionary.version,
            terms = dictionary.term_set.len(),
            states = dictionary.state_set.len(),
            contracts = dictionary.contract_set.len(),
            "Compiled dictionary"
        );
        for warning in &compilation.warnings {
            warn!("Data quality: {}", warning);
        }

        Ok(compilation)
    }

    /// Compile a dictionary document read from `path`
    pub fn compile_file(&self, path: &Path) -> Result<Compilation, CompilerError> {
        info!("Reading dictionary from {}", path.display());
        let source = std::fs::read_to_string(path).map_err(|source| CompilerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.compile(&source)
    }

    /// Schema-validated decoding without normalization
    pub fn decode(&self, source: &str) -> Result<RawDictionary, CompilerError> {
        Ok(serde_json::from_str(source)?)
    }
}

impl Default for DictionaryCompiler {
    fn default() -> Self {
        Self::new()
    }
}
