//! Rendering contexts handed to the templates
//!
//! Everything language specific (type references, literals, module and field
//! names) is computed here so templates only lay text out. Every field is
//! always present, which keeps strict-mode rendering total.

use actus_mp_core::{
    Contract, DataQualityWarning, Dictionary, Entity, Enum, State, Term,
};
use serde::Serialize;
use serde_json::Value;

use crate::convertor::{
    default_literal, enum_member_name, enum_type_name, optional_flag, to_pascal_case,
    to_snake_case, type_reference,
};
use crate::discovery::FunctionStub;
use crate::enums::{GeneratorKind, TargetLanguage};
use crate::generator::UnitEntity;
use crate::paths::{contract_module, enum_module, function_module, stub_module};
use crate::CodegenError;

/// A serialized context plus the data-quality findings met building it
#[derive(Debug)]
pub struct Rendering {
    pub value: Value,
    pub warnings: Vec<DataQualityWarning>,
}

#[derive(Debug, Serialize)]
struct Envelope<T> {
    version: String,
    version_date: String,
    #[serde(flatten)]
    body: T,
}

#[derive(Debug, Serialize)]
pub struct MemberView {
    pub name: String,
    pub acronym: String,
    pub identifier: String,
    pub option: i64,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct EnumView {
    pub identifier: String,
    pub name: String,
    pub description: String,
    pub type_name: String,
    pub module: String,
    pub members: Vec<MemberView>,
}

#[derive(Debug, Serialize)]
pub struct ContractView {
    pub acronym: String,
    pub identifier: String,
    pub name: String,
    pub description: String,
    pub family: String,
    pub classification: String,
    pub status: String,
    pub type_name: String,
    pub module: String,
}

#[derive(Debug, Serialize)]
pub struct TermView {
    pub identifier: String,
    pub name: String,
    pub acronym: String,
    pub description: String,
    pub scalar_type: String,
    pub is_array: bool,
    /// Field name in the target language
    pub field: String,
    /// Type of the declared field, optionality included
    pub field_type: String,
    /// Expression the field is initialised with
    pub initializer: String,
    pub optional_flag: String,
}

#[derive(Debug, Serialize)]
pub struct StateView {
    pub identifier: String,
    pub name: String,
    pub description: String,
    pub field: String,
    pub field_type: String,
}

#[derive(Debug, Serialize)]
pub struct FunctionView {
    pub function_type: String,
    pub event_type: String,
    pub suffix: String,
    /// Module and function name, e.g. `pof_ied`
    pub module: String,
}

#[derive(Debug, Serialize)]
struct IndexView {
    enums: Vec<EnumView>,
    contracts: Vec<ContractView>,
    execute_step_module: String,
    schedule_module: String,
}

#[derive(Debug, Serialize)]
struct StateSpaceView {
    states: Vec<StateView>,
}

#[derive(Debug, Serialize)]
struct TermSetView {
    contract: ContractView,
    terms: Vec<TermView>,
}

#[derive(Debug, Serialize)]
struct AlgorithmView {
    contract: ContractView,
    functions: Vec<FunctionView>,
    execute_step_module: String,
    schedule_module: String,
}

#[derive(Debug, Serialize)]
struct FunctionStubView {
    contract: ContractView,
    function: FunctionView,
}

/// Builds the context `kind` renders `entity` with
pub fn build(
    language: TargetLanguage,
    kind: GeneratorKind,
    dictionary: &Dictionary,
    entity: &UnitEntity<'_>,
    functions: &[&FunctionStub<'_>],
) -> Result<Rendering, CodegenError> {
    let mut warnings = Vec::new();

    let value = match (kind, entity) {
        (GeneratorKind::Enum, UnitEntity::Enum(e)) => envelope(dictionary, enum_view(language, e))?,
        (
            GeneratorKind::EnumIndex | GeneratorKind::FuncIndex | GeneratorKind::TermSetIndex,
            UnitEntity::Dictionary,
        ) => envelope(
            dictionary,
            IndexView {
                enums: dictionary.enum_set().iter().map(|e| enum_view(language, e)).collect(),
                contracts: dictionary.contract_set.iter().map(contract_view).collect(),
                execute_step_module: function_module(language, "do_execute_step"),
                schedule_module: function_module(language, "do_get_schedule"),
            },
        )?,
        (GeneratorKind::StateSpace, UnitEntity::Dictionary) => envelope(
            dictionary,
            StateSpaceView {
                states: dictionary
                    .state_set
                    .iter()
                    .map(|s| state_view(language, s))
                    .collect::<Result<_, _>>()?,
            },
        )?,
        (GeneratorKind::TermSet, UnitEntity::Contract(c)) => envelope(
            dictionary,
            TermSetView {
                contract: contract_view(c),
                terms: c
                    .term_set
                    .iter()
                    .map(|t| term_view(language, t, &mut warnings))
                    .collect::<Result<_, _>>()?,
            },
        )?,
        (
            GeneratorKind::AlgorithmStubIndex
            | GeneratorKind::ScheduleStub
            | GeneratorKind::ExecuteStepStub,
            UnitEntity::Contract(c),
        ) => envelope(
            dictionary,
            AlgorithmView {
                contract: contract_view(c),
                functions: functions.iter().map(|f| function_view(language, f)).collect(),
                execute_step_module: function_module(language, "do_execute_step"),
                schedule_module: function_module(language, "do_get_schedule"),
            },
        )?,
        (
            GeneratorKind::PayoffStub | GeneratorKind::StateTransitionStub,
            UnitEntity::FunctionStub(stub),
        ) => envelope(
            dictionary,
            FunctionStubView {
                contract: contract_view(stub.contract),
                function: function_view(language, stub),
            },
        )?,
        _ => {
            return Err(CodegenError::EntityMismatch {
                kind,
                entity: entity.describe(),
            })
        }
    };

    Ok(Rendering { value, warnings })
}

fn envelope<T: Serialize>(dictionary: &Dictionary, body: T) -> Result<Value, CodegenError> {
    Ok(serde_json::to_value(Envelope {
        version: dictionary.version.clone(),
        version_date: dictionary.version_date.format("%Y-%m-%d").to_string(),
        body,
    })?)
}

fn enum_view(language: TargetLanguage, e: &Enum) -> EnumView {
    EnumView {
        identifier: e.identifier().to_string(),
        name: e.name().to_string(),
        description: e.description().to_string(),
        type_name: enum_type_name(e.identifier()),
        module: enum_module(language, e.identifier()),
        members: e
            .members()
            .map(|m| MemberView {
                name: enum_member_name(m),
                acronym: m.acronym().to_string(),
                identifier: m.identifier().to_string(),
                option: m.option,
                description: m.description().to_string(),
            })
            .collect(),
    }
}

fn contract_view(contract: &Contract) -> ContractView {
    let info = &contract.type_info;
    ContractView {
        acronym: contract.acronym().to_string(),
        identifier: contract.identifier().to_string(),
        name: contract.name().to_string(),
        description: contract.description().to_string(),
        family: info.family.clone(),
        classification: info.classification.clone(),
        status: info.publication_status.to_string(),
        type_name: to_pascal_case(contract.identifier(), "_"),
        module: contract_module(contract.acronym()),
    }
}

fn field_name(language: TargetLanguage, identifier: &str) -> String {
    match language {
        TargetLanguage::Python | TargetLanguage::Rust => to_snake_case(identifier),
        TargetLanguage::TypeScript => identifier.to_string(),
    }
}

fn term_view(
    language: TargetLanguage,
    term: &Term,
    warnings: &mut Vec<DataQualityWarning>,
) -> Result<TermView, CodegenError> {
    let type_ref = type_reference(language, term.identifier(), term.scalar_type, term.is_array)?;
    let literal = default_literal(language, term)?;
    warnings.extend(literal.warning.clone());

    let (field_type, initializer) = match language {
        TargetLanguage::Rust if term.is_array => (type_ref, literal.text),
        TargetLanguage::Rust if literal.is_absent(language) => {
            (format!("Option<{}>", type_ref), literal.text)
        }
        TargetLanguage::Rust => (format!("Option<{}>", type_ref), format!("Some({})", literal.text)),
        TargetLanguage::Python if literal.is_absent(language) => {
            (format!("typing.Optional[{}]", type_ref), literal.text)
        }
        TargetLanguage::Python | TargetLanguage::TypeScript => (type_ref, literal.text),
    };

    Ok(TermView {
        identifier: term.identifier().to_string(),
        name: term.name().to_string(),
        acronym: term.acronym().to_string(),
        description: term.description().to_string(),
        scalar_type: term.scalar_type.to_string(),
        is_array: term.is_array,
        field: field_name(language, term.identifier()),
        field_type,
        initializer,
        optional_flag: optional_flag(term).to_string(),
    })
}

fn state_view(language: TargetLanguage, state: &State) -> Result<StateView, CodegenError> {
    let type_ref = type_reference(language, state.identifier(), state.scalar_type, state.is_array)?;
    let field_type = match language {
        TargetLanguage::Rust if !state.is_array => format!("Option<{}>", type_ref),
        TargetLanguage::Python if !state.is_array => format!("typing.Optional[{}]", type_ref),
        _ => type_ref,
    };

    Ok(StateView {
        identifier: state.identifier().to_string(),
        name: state.name().to_string(),
        description: state.short_description(),
        field: field_name(language, state.identifier()),
        field_type,
    })
}

fn function_view(language: TargetLanguage, stub: &FunctionStub<'_>) -> FunctionView {
    FunctionView {
        function_type: stub.function_type.token().to_string(),
        event_type: stub.event_type.clone(),
        suffix: stub.suffix.clone(),
        module: stub_module(language, stub),
    }
}
