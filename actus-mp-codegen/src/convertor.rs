//! Naming, casing and literal conversion per target language

use actus_mp_core::{
    DataQualityWarning, Entity, EnumMember, ScalarType, Term, TermDefault,
};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::enums::TargetLanguage;
use crate::CodegenError;

static WORD_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("valid regex"));
static LOWER_UPPER_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid regex"));

/// Splits `name` on `sep` and upper-cases the first character of each part
pub fn to_pascal_case(name: &str, sep: &str) -> String {
    name.split(sep)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}

/// As [`to_pascal_case`], with the very first character lower-cased
pub fn to_camel_case(name: &str, sep: &str) -> String {
    let pascal = to_pascal_case(name, sep);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Splits camel/Pascal word boundaries, joins with `sep` and lower-cases
pub fn to_separated_case(name: &str, sep: &str) -> String {
    let replacement = format!("${{1}}{}${{2}}", sep);
    let split = WORD_BOUNDARY.replace_all(name, replacement.as_str());
    let split = LOWER_UPPER_BOUNDARY.replace_all(&split, replacement.as_str());
    split.to_lowercase()
}

pub fn to_snake_case(name: &str) -> String {
    to_separated_case(name, "_")
}

/// Enum member name safe in every target, e.g. `30E360` -> `_30E360`
pub fn enum_member_name(member: &EnumMember) -> String {
    let name = member.acronym().to_uppercase();
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", name)
    } else {
        name
    }
}

/// Name of the generated enum type for an enum identifier
pub fn enum_type_name(identifier: &str) -> String {
    to_pascal_case(identifier, "_")
}

/// Type expression for a field of `scalar_type`
pub fn type_reference(
    language: TargetLanguage,
    identifier: &str,
    scalar_type: ScalarType,
    is_array: bool,
) -> Result<String, CodegenError> {
    let unsupported = || CodegenError::UnsupportedMapping {
        language,
        term_id: identifier.to_string(),
        scalar_type,
    };

    let scalar = match (language, scalar_type) {
        (_, ScalarType::Unknown) => return Err(unsupported()),
        (TargetLanguage::Python, ScalarType::ContractReference) => "core.ContractReference".into(),
        (TargetLanguage::Python, ScalarType::Cycle) => "core.Cycle".into(),
        (TargetLanguage::Python, ScalarType::Enum) => format!("enums.{}", enum_type_name(identifier)),
        (TargetLanguage::Python, ScalarType::Period) => "core.Period".into(),
        (TargetLanguage::Python, ScalarType::Real) => "float".into(),
        (TargetLanguage::Python, ScalarType::Timestamp) => "datetime.datetime".into(),
        (TargetLanguage::Python, ScalarType::Varchar) => "str".into(),
        (TargetLanguage::Rust, ScalarType::ContractReference) => "core::ContractReference".into(),
        (TargetLanguage::Rust, ScalarType::Cycle) => "core::Cycle".into(),
        (TargetLanguage::Rust, ScalarType::Enum) => format!("enums::{}", enum_type_name(identifier)),
        (TargetLanguage::Rust, ScalarType::Period) => "core::Period".into(),
        (TargetLanguage::Rust, ScalarType::Real) => "f64".into(),
        (TargetLanguage::Rust, ScalarType::Timestamp) => "core::Timestamp".into(),
        (TargetLanguage::Rust, ScalarType::Varchar) => "String".into(),
        (TargetLanguage::TypeScript, ScalarType::ContractReference) => "core.ContractReference".into(),
        (TargetLanguage::TypeScript, ScalarType::Cycle) => "core.Cycle".into(),
        (TargetLanguage::TypeScript, ScalarType::Enum) => format!("enums.{}", enum_type_name(identifier)),
        (TargetLanguage::TypeScript, ScalarType::Period) => "core.Period".into(),
        (TargetLanguage::TypeScript, ScalarType::Real) => "number".into(),
        (TargetLanguage::TypeScript, ScalarType::Timestamp) => "Date".into(),
        (TargetLanguage::TypeScript, ScalarType::Varchar) => "string".into(),
    };

    if !is_array {
        return Ok(scalar);
    }
    Ok(match language {
        TargetLanguage::Python => format!("typing.List[{}]", scalar),
        TargetLanguage::Rust => format!("Vec<{}>", scalar),
        TargetLanguage::TypeScript => format!("Array<{}>", scalar),
    })
}

/// A default value rendered as a target-language literal
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub text: String,
    /// Set when the literal was substituted for an unusable default
    pub warning: Option<DataQualityWarning>,
}

impl Literal {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            warning: None,
        }
    }

    /// Whether the literal is the language's absent sentinel
    pub fn is_absent(&self, language: TargetLanguage) -> bool {
        self.text == absent(language)
    }
}

fn absent(language: TargetLanguage) -> &'static str {
    match language {
        TargetLanguage::Python | TargetLanguage::Rust => "None",
        TargetLanguage::TypeScript => "null",
    }
}

fn empty_sequence(language: TargetLanguage) -> &'static str {
    match language {
        TargetLanguage::Python | TargetLanguage::TypeScript => "[]",
        TargetLanguage::Rust => "Vec::new()",
    }
}

/// Literal for the default value of `term`
pub fn default_literal(language: TargetLanguage, term: &Term) -> Result<Literal, CodegenError> {
    if term.is_array {
        return Ok(Literal::plain(empty_sequence(language)));
    }
    let Some(default) = term.default.as_ref().filter(|_| term.has_default()) else {
        return Ok(Literal::plain(absent(language)));
    };

    match (term.scalar_type, default) {
        (ScalarType::Enum, TermDefault::Enum(token) | TermDefault::Text(token)) => {
            enum_literal(language, term, token)
        }
        (ScalarType::Real, TermDefault::Real(value)) => {
            Ok(real_default(term, Some(*value), || value.to_string()))
        }
        (ScalarType::Real, TermDefault::Text(value) | TermDefault::Enum(value)) => {
            Ok(real_default(term, value.trim().parse().ok(), || value.clone()))
        }
        (ScalarType::Varchar, TermDefault::Text(value) | TermDefault::Enum(value)) => {
            Ok(Literal::plain(string_literal(language, value)))
        }
        (scalar_type, _) => Err(CodegenError::UnsupportedMapping {
            language,
            term_id: term.identifier().to_string(),
            scalar_type,
        }),
    }
}

fn enum_literal(language: TargetLanguage, term: &Term, token: &str) -> Result<Literal, CodegenError> {
    let mut members = term.members().peekable();
    let first = *members
        .peek()
        .ok_or_else(|| CodegenError::EmptyEnum(term.identifier().to_string()))?;

    let (member, warning) = match members.find(|m| m.is_match(token)) {
        Some(member) => (member, None),
        None => (
            first,
            Some(DataQualityWarning::UnmatchedEnumDefault {
                term_id: term.identifier().to_string(),
                default: token.to_string(),
                fallback: first.acronym().to_string(),
            }),
        ),
    };

    let type_name = enum_type_name(term.identifier());
    let member_name = enum_member_name(member);
    let text = match language {
        TargetLanguage::Python | TargetLanguage::TypeScript => {
            format!("enums.{}.{}", type_name, member_name)
        }
        TargetLanguage::Rust => format!("enums::{}::{}", type_name, member_name),
    };

    Ok(Literal { text, warning })
}

/// Non-finite values have no literal in the targets and revert to zero
fn real_default(term: &Term, parsed: Option<f64>, raw: impl FnOnce() -> String) -> Literal {
    match parsed.filter(|v| v.is_finite()) {
        Some(value) => Literal::plain(real_literal(value)),
        None => Literal {
            text: real_literal(0.0),
            warning: Some(DataQualityWarning::UnparsableReal {
                term_id: term.identifier().to_string(),
                value: raw(),
            }),
        },
    }
}

/// Float literal valid in every target, always carrying a decimal point
fn real_literal(value: f64) -> String {
    format!("{:?}", value)
}

fn string_literal(language: TargetLanguage, value: &str) -> String {
    let quoted = format!("\"{}\"", value.escape_default());
    match language {
        TargetLanguage::Rust => format!("String::from({})", quoted),
        TargetLanguage::Python | TargetLanguage::TypeScript => quoted,
    }
}

/// TypeScript optionality marker for a term field
pub fn optional_flag(term: &Term) -> &'static str {
    if term.has_default() {
        ""
    } else {
        "?"
    }
}
