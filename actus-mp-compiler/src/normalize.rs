//! Normalization of the raw document ahead of object construction

use actus_mp_core::EXPERIMENTAL_CONTRACT_TYPE;
use serde_json::Value;
use tracing::{debug, info};

use crate::raw::{RawDictionary, RawEnumMember};
use crate::CompilerError;

/// Identifier assigned to the contract reference role enumeration
pub const REFERENCE_ROLE_ID: &str = "referenceRole";

/// Identifier assigned to the contract reference type enumeration
pub const REFERENCE_TYPE_ID: &str = "referenceType";

/// Term holding the canonical contract type enumeration
pub const CONTRACT_TYPE_TERM: &str = "contractType";

/// Term whose member acronyms were published with zeros in place of `O`
pub const SCALING_EFFECT_TERM: &str = "scalingEffect";

const SCALING_EFFECT_ACRONYMS: [(&str, &str); 4] =
    [("000", "OOO"), ("I00", "IOO"), ("0N0", "ONO"), ("IN0", "INO")];

/// Applies every normalization pass, in order
pub fn normalize(raw: &mut RawDictionary) -> Result<(), CompilerError> {
    assign_reference_identifiers(raw);
    backfill_contract_types(raw)?;
    normalize_term_defaults(raw);
    repair_scaling_effect(raw);
    Ok(())
}

/// The contract reference enums are declared without identifiers
fn assign_reference_identifiers(raw: &mut RawDictionary) {
    raw.contract_reference.role.identifier = Some(REFERENCE_ROLE_ID.to_string());
    raw.contract_reference.reference_type.identifier = Some(REFERENCE_TYPE_ID.to_string());
}

/// Appends a synthetic contract type member for every taxonomy entry missing
/// from the canonical enumeration.
///
/// Synthetic options are -1, -2, ... in acronym order, so they never collide
/// with native (non-negative) options and always sort before them.
fn backfill_contract_types(raw: &mut RawDictionary) -> Result<(), CompilerError> {
    let contract_type = raw
        .terms
        .get_mut(CONTRACT_TYPE_TERM)
        .ok_or_else(|| CompilerError::MissingField(format!("terms.{}", CONTRACT_TYPE_TERM)))?;

    let declared: Vec<String> = contract_type
        .allowed_values
        .iter()
        .filter_map(|v| v.get("acronym").and_then(Value::as_str))
        .map(str::to_string)
        .collect();

    let mut missing: Vec<_> = raw
        .taxonomy
        .values()
        .filter(|t| t.acronym != EXPERIMENTAL_CONTRACT_TYPE)
        .filter(|t| !declared.contains(&t.acronym))
        .collect();
    missing.sort_by(|a, b| a.acronym.cmp(&b.acronym));

    for (idx, item) in missing.iter().enumerate() {
        let member = RawEnumMember {
            option: -(idx as i64) - 1,
            identifier: item.identifier.clone(),
            name: item.name.clone(),
            acronym: item.acronym.to_uppercase(),
            description: item.description.clone(),
        };
        debug!(acronym = %member.acronym, option = member.option, "Backfilling contract type");
        contract_type.allowed_values.push(serde_json::to_value(member)?);
    }

    if !missing.is_empty() {
        info!("Backfilled {} contract types missing from the contract type enum", missing.len());
    }

    Ok(())
}

/// Trims defaults; empty defaults become absent
fn normalize_term_defaults(raw: &mut RawDictionary) {
    for term in raw.terms.values_mut() {
        term.default = term
            .default
            .take()
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
    }
}

fn repair_scaling_effect(raw: &mut RawDictionary) {
    let Some(term) = raw.terms.get_mut(SCALING_EFFECT_TERM) else {
        debug!("No {} term declared, skipping repair", SCALING_EFFECT_TERM);
        return;
    };

    for value in term.allowed_values.iter_mut() {
        let Some(acronym) = value.get_mut("acronym") else {
            continue;
        };
        if let Some(fixed) = acronym.as_str().and_then(corrected_acronym) {
            *acronym = Value::String(fixed.to_string());
        }
    }

    if let Some(fixed) = term.default.as_deref().and_then(corrected_acronym) {
        term.default = Some(fixed.to_string());
    }
}

fn corrected_acronym(acronym: &str) -> Option<&'static str> {
    SCALING_EFFECT_ACRONYMS
        .iter()
        .find(|(from, _)| *from == acronym)
        .map(|(_, to)| *to)
}
