//! Construction of the object model from a normalized raw document

use actus_mp_core::{
    AllowedValue, ApplicableTermInfo, ApplicableTermInfoSet, Contract, ContractSet,
    ContractTypeInfo, DataQualityWarning, Dictionary, Entity, EntityInfo, Enum, EnumMember,
    PublicationStatus, ScalarType, State, StateSet, Taxonomy, Term, TermDefault, TermSet,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use tracing::debug;

use crate::raw::{RawContractType, RawDictionary, RawEnum, RawEnumMember, RawState, RawTerm};
use crate::CompilerError;

/// Applicability key naming the contract itself rather than a term
pub const RESERVED_APPLICABILITY_KEY: &str = "contract";

/// A compiled dictionary plus the data-quality findings met on the way
#[derive(Debug, Clone)]
pub struct Compilation {
    pub dictionary: Dictionary,
    pub warnings: Vec<DataQualityWarning>,
}

/// Maps a normalized document onto the object model.
///
/// Sections are decoded in dependency order; the contract set comes last
/// because it projects applicability rows onto the global term set.
pub fn build_dictionary(raw: &RawDictionary) -> Result<Compilation, CompilerError> {
    let mut warnings = Vec::new();

    let contract_event_type = decode_raw_enum("event.eventType", &raw.event.event_type)?;
    let contract_performance = decode_term_enum(raw, "contractPerformance")?;
    let contract_role = decode_term_enum(raw, "contractRole")?;
    let contract_reference_role =
        decode_raw_enum("contractReference.role", &raw.contract_reference.role)?;
    let contract_reference_type =
        decode_raw_enum("contractReference.type", &raw.contract_reference.reference_type)?;
    let contract_type = decode_term_enum(raw, "contractType")?;

    let applicability = decode_applicability(raw);
    let term_set = decode_term_set(raw, &mut warnings)?;
    let state_set = decode_state_set(raw)?;
    let taxonomy = decode_taxonomy(raw)?;
    let contract_set = build_contract_set(&applicability, &taxonomy, &term_set)?;

    let dictionary = Dictionary {
        applicability,
        contract_event_type,
        contract_performance,
        contract_role,
        contract_reference_role,
        contract_reference_type,
        contract_set,
        contract_type,
        state_set,
        taxonomy,
        term_set,
        version: raw.version.version.clone(),
        version_date: parse_version_date(&raw.version.date)?,
    };

    Ok(Compilation { dictionary, warnings })
}

fn decode_raw_enum(location: &str, raw: &RawEnum) -> Result<Enum, CompilerError> {
    let identifier = raw
        .identifier
        .clone()
        .ok_or_else(|| CompilerError::MissingField(format!("{}.identifier", location)))?;
    let info = EntityInfo::new(&raw.acronym, &raw.description, identifier, &raw.name);
    let members = decode_members(location, &raw.allowed_values, None)?;

    Ok(Enum::new(info, members))
}

/// Decodes an enumeration declared as a term, e.g. `contractRole`
fn decode_term_enum(raw: &RawDictionary, term_id: &str) -> Result<Enum, CompilerError> {
    let term = raw
        .terms
        .get(term_id)
        .ok_or_else(|| CompilerError::MissingField(format!("terms.{}", term_id)))?;
    let info = EntityInfo::new(
        &term.acronym,
        term.description.as_deref().unwrap_or(&term.name),
        &term.identifier,
        &term.name,
    );
    let members = decode_members(&format!("terms.{}", term_id), &term.allowed_values, None)?;

    Ok(Enum::new(info, members))
}

fn decode_members(
    location: &str,
    values: &[Value],
    default: Option<&str>,
) -> Result<Vec<EnumMember>, CompilerError> {
    values
        .iter()
        .enumerate()
        .map(|(idx, value)| {
            let location = format!("{}.allowedValues[{}]", location, idx);
            decode_member(location, value, default)
        })
        .collect()
}

fn decode_member(
    location: String,
    value: &Value,
    default: Option<&str>,
) -> Result<EnumMember, CompilerError> {
    let raw: RawEnumMember = serde_json::from_value(value.clone())
        .map_err(|source| CompilerError::Schema { location, source })?;
    let is_default = default.map(|d| raw.acronym == d);
    let info = EntityInfo::new(raw.acronym, raw.description, raw.identifier, raw.name);

    Ok(EnumMember {
        info,
        is_default,
        option: raw.option,
    })
}

fn decode_applicability(raw: &RawDictionary) -> ApplicableTermInfoSet {
    let items = raw
        .applicability
        .iter()
        .flat_map(|(contract_type_id, terms)| {
            terms
                .iter()
                .filter(|(term_id, _)| term_id.as_str() != RESERVED_APPLICABILITY_KEY)
                .map(move |(term_id, instruction)| ApplicableTermInfo {
                    contract_type_id: contract_type_id.clone(),
                    term_id: term_id.clone(),
                    term_instruction: instruction.clone(),
                })
        })
        .collect();

    ApplicableTermInfoSet::new(items)
}

fn decode_term_set(
    raw: &RawDictionary,
    warnings: &mut Vec<DataQualityWarning>,
) -> Result<TermSet, CompilerError> {
    let terms = raw
        .terms
        .iter()
        .map(|(term_id, term)| decode_term(term_id, term, warnings))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TermSet::new(terms))
}

fn decode_term(
    term_id: &str,
    raw: &RawTerm,
    warnings: &mut Vec<DataQualityWarning>,
) -> Result<Term, CompilerError> {
    let location = format!("terms.{}", term_id);
    let (scalar_type, is_array) =
        ScalarType::from_declaration(&raw.type_name).map_err(|source| {
            CompilerError::InvalidValue {
                location: format!("{}.type", location),
                source,
            }
        })?;

    let default = raw
        .default
        .as_deref()
        .map(|value| resolve_default(&raw.identifier, scalar_type, value, warnings));

    let allowed_values = if scalar_type == ScalarType::Enum {
        let default_acronym = match &default {
            Some(TermDefault::Enum(acronym)) => Some(acronym.as_str()),
            _ => None,
        };
        decode_members(&location, &raw.allowed_values, Some(default_acronym.unwrap_or("")))?
            .into_iter()
            .map(AllowedValue::Member)
            .collect()
    } else {
        raw.allowed_values.iter().cloned().map(AllowedValue::Scalar).collect()
    };

    let description = raw.description.as_deref().unwrap_or(&raw.name).replace('\n', "");

    Ok(Term {
        info: EntityInfo::new(&raw.acronym, description, &raw.identifier, &raw.name),
        allowed_values,
        default,
        group_id: raw.group.clone(),
        is_array,
        scalar_type,
    })
}

fn resolve_default(
    term_id: &str,
    scalar_type: ScalarType,
    value: &str,
    warnings: &mut Vec<DataQualityWarning>,
) -> TermDefault {
    match scalar_type {
        ScalarType::Enum => TermDefault::Enum(value.to_uppercase()),
        ScalarType::Real => match value.parse::<f64>().ok().filter(|v| v.is_finite()) {
            Some(number) => TermDefault::Real(number),
            None => {
                warnings.push(DataQualityWarning::UnparsableReal {
                    term_id: term_id.to_string(),
                    value: value.to_string(),
                });
                TermDefault::Real(0.0)
            }
        },
        other => {
            debug!(term = term_id, scalar_type = %other, value, "Unmapped default passed through");
            TermDefault::Text(value.to_string())
        }
    }
}

fn decode_state_set(raw: &RawDictionary) -> Result<StateSet, CompilerError> {
    let states = raw
        .states
        .iter()
        .map(|(state_id, state)| decode_state(state_id, state))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(StateSet::new(states))
}

fn decode_state(state_id: &str, raw: &RawState) -> Result<State, CompilerError> {
    let location = format!("states.{}", state_id);
    let (scalar_type, is_array) =
        ScalarType::from_declaration(&raw.type_name).map_err(|source| {
            CompilerError::InvalidValue {
                location: format!("{}.type", location),
                source,
            }
        })?;

    let allowed_values = if scalar_type == ScalarType::Enum {
        decode_members(&location, &raw.allowed_values, None)?
            .into_iter()
            .map(AllowedValue::Member)
            .collect()
    } else {
        raw.allowed_values.iter().cloned().map(AllowedValue::Scalar).collect()
    };

    Ok(State {
        info: EntityInfo::new(&raw.acronym, &raw.description, &raw.identifier, &raw.name),
        allowed_values,
        is_array,
        scalar_type,
    })
}

fn decode_taxonomy(raw: &RawDictionary) -> Result<Taxonomy, CompilerError> {
    let items = raw
        .taxonomy
        .iter()
        .map(|(contract_type_id, item)| decode_contract_type(contract_type_id, item))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Taxonomy::new(items))
}

fn decode_contract_type(
    contract_type_id: &str,
    raw: &RawContractType,
) -> Result<ContractTypeInfo, CompilerError> {
    let publication_status = match raw.status.as_deref() {
        Some(status) => status.parse().map_err(|source| CompilerError::InvalidValue {
            location: format!("taxonomy.{}.status", contract_type_id),
            source,
        })?,
        None => PublicationStatus::Unknown,
    };

    Ok(ContractTypeInfo {
        info: EntityInfo::new(&raw.acronym, &raw.description, &raw.identifier, &raw.name),
        classification: raw.classification.clone(),
        coverage: raw.coverage.clone(),
        family: raw.family.clone(),
        publication_status,
    })
}

/// Resolves every non-experimental taxonomy entry into a contract.
///
/// Applicability rows must name a declared contract type and a declared term;
/// anything else is a broken reference in the document.
fn build_contract_set(
    applicability: &ApplicableTermInfoSet,
    taxonomy: &Taxonomy,
    term_set: &TermSet,
) -> Result<ContractSet, CompilerError> {
    if let Some(unknown) = applicability
        .contract_type_ids()
        .into_iter()
        .find(|id| taxonomy.get_by_identifier(id).is_none())
    {
        return Err(CompilerError::UnknownContractType(unknown.to_string()));
    }

    let contracts = taxonomy
        .iter()
        .filter(|type_info| !type_info.is_experimental())
        .map(|type_info| {
            let terms = applicability
                .get_applicable_termset(type_info)
                .map(|row| {
                    term_set.get_term(&row.term_id).cloned().ok_or_else(|| {
                        CompilerError::UnknownTerm {
                            contract_type_id: row.contract_type_id.clone(),
                            term_id: row.term_id.clone(),
                        }
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            debug!(contract = type_info.acronym(), terms = terms.len(), "Resolved contract term set");
            Ok(Contract {
                term_set: TermSet::new(terms),
                type_info: type_info.clone(),
            })
        })
        .collect::<Result<Vec<_>, CompilerError>>()?;

    Ok(ContractSet::new(contracts))
}

/// Accepts RFC 3339 timestamps, naive date-times and bare dates
fn parse_version_date(value: &str) -> Result<NaiveDateTime, CompilerError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_local());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| CompilerError::InvalidDate(value.to_string()))
}
