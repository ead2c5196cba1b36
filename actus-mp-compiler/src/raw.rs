//! Typed schema of the raw dictionary document
//!
//! Sections are keyed by identifier in the document; `BTreeMap` keeps the
//! decoded order content-derived rather than dependent on document layout.
//! Allowed values stay as JSON values until the factory knows the scalar
//! type they belong to.

use std::collections::BTreeMap;

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Root of the dictionary document
#[derive(Debug, Clone, Deserialize)]
pub struct RawDictionary {
    pub version: RawVersion,
    pub terms: BTreeMap<String, RawTerm>,
    pub states: BTreeMap<String, RawState>,
    pub taxonomy: BTreeMap<String, RawContractType>,
    /// contract type id -> term id -> instruction
    pub applicability: BTreeMap<String, BTreeMap<String, String>>,
    pub event: RawEventSection,
    #[serde(rename = "contractReference")]
    pub contract_reference: RawContractReference,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawVersion {
    #[serde(rename = "Version")]
    pub version: String,
    #[serde(rename = "Date")]
    pub date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTerm {
    pub identifier: String,
    pub name: String,
    pub acronym: String,
    /// Scalar type name, `[]`-suffixed for arrays
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, rename = "allowedValues")]
    pub allowed_values: Vec<Value>,
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawState {
    pub identifier: String,
    pub name: String,
    pub acronym: String,
    #[serde(default = "unknown_type", rename = "type")]
    pub type_name: String,
    #[serde(default, rename = "allowedValues")]
    pub allowed_values: Vec<Value>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawContractType {
    pub acronym: String,
    #[serde(rename = "class")]
    pub classification: String,
    #[serde(default)]
    pub coverage: Option<String>,
    #[serde(default)]
    pub description: String,
    pub family: String,
    pub identifier: String,
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEventSection {
    #[serde(rename = "eventType")]
    pub event_type: RawEnum,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawContractReference {
    pub role: RawEnum,
    #[serde(rename = "type")]
    pub reference_type: RawEnum,
}

/// Standalone enumeration declaration; the contract reference enums arrive
/// without an identifier, which normalization supplies
#[derive(Debug, Clone, Deserialize)]
pub struct RawEnum {
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub acronym: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "allowedValues")]
    pub allowed_values: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEnumMember {
    #[serde(deserialize_with = "deserialize_ordinal")]
    pub option: i64,
    pub identifier: String,
    pub name: String,
    pub acronym: String,
    #[serde(default)]
    pub description: String,
}

fn unknown_type() -> String {
    "Unknown".to_string()
}

/// Ordinals appear both as JSON numbers and as numeric strings
fn deserialize_ordinal<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Ordinal {
        Number(i64),
        Text(String),
    }

    match Ordinal::deserialize(deserializer)? {
        Ordinal::Number(n) => Ok(n),
        Ordinal::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid option ordinal '{}'", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_member_ordinal_accepts_number_and_string() {
        let a: RawEnumMember = serde_json::from_value(json!({
            "option": 3, "identifier": "a", "name": "A", "acronym": "A"
        }))
        .unwrap();
        let b: RawEnumMember = serde_json::from_value(json!({
            "option": "-2", "identifier": "b", "name": "B", "acronym": "B", "description": "d"
        }))
        .unwrap();
        assert_eq!(a.option, 3);
        assert_eq!(b.option, -2);
        assert_eq!(a.description, "");
    }

    #[test]
    fn test_member_ordinal_rejects_text() {
        let result: Result<RawEnumMember, _> = serde_json::from_value(json!({
            "option": "first", "identifier": "a", "name": "A", "acronym": "A"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_state_type_defaults_to_unknown() {
        let state: RawState = serde_json::from_value(json!({
            "identifier": "x", "name": "X", "acronym": "X"
        }))
        .unwrap();
        assert_eq!(state.type_name, "Unknown");
        assert!(state.allowed_values.is_empty());
    }
}
