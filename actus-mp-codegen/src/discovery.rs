//! Discovery of algorithm functions in the reference implementation tree
//!
//! The reference tree holds one sub-directory per contract type, named by the
//! lower-cased acronym. Each function lives in its own file named
//! `{FunctionType}_{EventType}[_{Suffix}].<ext>`, e.g. `POF_IED_PAM.java`.

use std::path::Path;

use actus_mp_core::{Contract, ContractSet, Entity, FunctionType};
use tracing::debug;

use crate::CodegenError;

/// A function found in the reference tree for one contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionStub<'d> {
    pub contract: &'d Contract,
    pub function_type: FunctionType,
    /// Event type token as written in the file name, e.g. `IED`
    pub event_type: String,
    /// Trailing numeric disambiguator, empty when absent
    pub suffix: String,
}

impl FunctionStub<'_> {
    pub fn sort_key(&self) -> (&str, &str, &str) {
        (self.contract.acronym(), &self.event_type, &self.suffix)
    }
}

/// Functions of `function_type` declared for each contract under `reference`.
///
/// Contracts without a sub-directory contribute nothing. Results are sorted by
/// (contract acronym, event type, suffix) and de-duplicated, so directory
/// listing order never leaks into the output.
pub fn discover_function_stubs<'d>(
    contracts: &'d ContractSet,
    reference: &Path,
    function_type: FunctionType,
) -> Result<Vec<FunctionStub<'d>>, CodegenError> {
    let mut stubs = Vec::new();

    for contract in contracts {
        let dir = reference.join(contract.acronym().to_lowercase());
        if !dir.is_dir() {
            debug!(contract = contract.acronym(), "No reference functions");
            continue;
        }

        let entries = std::fs::read_dir(&dir).map_err(|source| CodegenError::Io {
            path: dir.clone(),
            source,
        })?;
        for entry in entries {
            let path = entry
                .map_err(|source| CodegenError::Io {
                    path: dir.clone(),
                    source,
                })?
                .path();
            if !path.is_file() {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match parse_stem(stem) {
                Some((found, event_type, suffix)) if found == function_type => {
                    stubs.push(FunctionStub {
                        contract,
                        function_type,
                        event_type,
                        suffix,
                    });
                }
                Some(_) => {}
                None => debug!(file = %path.display(), "Skipping non-function file"),
            }
        }
    }

    stubs.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    stubs.dedup_by(|a, b| a.sort_key() == b.sort_key());

    debug!(
        function_type = %function_type,
        count = stubs.len(),
        "Discovered reference functions"
    );
    Ok(stubs)
}

/// Splits `POF_IED_PAM2` into (POF, `IED`, `2`)
fn parse_stem(stem: &str) -> Option<(FunctionType, String, String)> {
    let mut tokens = stem.split('_');
    let function_type = tokens.next()?.parse::<FunctionType>().ok()?;
    let event_type = tokens.next().filter(|t| !t.is_empty())?;
    let remainder: Vec<&str> = tokens.collect();

    Some((
        function_type,
        event_type.to_string(),
        trailing_digits(&remainder.join("_")).to_string(),
    ))
}

fn trailing_digits(value: &str) -> &str {
    let start = value
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map_or(value.len(), |(idx, _)| idx);
    &value[start..]
}
