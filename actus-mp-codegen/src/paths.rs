//! Output locations of generated units, relative to the output directory

use std::path::PathBuf;

use actus_mp_core::Entity;

use crate::convertor::{to_camel_case, to_snake_case};
use crate::discovery::FunctionStub;
use crate::enums::{GeneratorKind, Strategy, TargetLanguage};
use crate::generator::UnitEntity;
use crate::CodegenError;

const ALGOS_DIR: &str = "algos";
const TYPES_DIR: &str = "types";

/// Relative path of the file a unit is written to
pub fn resolve(
    language: TargetLanguage,
    kind: GeneratorKind,
    entity: &UnitEntity<'_>,
) -> Result<PathBuf, CodegenError> {
    let ext = language.extension();
    let types = PathBuf::from(TYPES_DIR);
    let algos = PathBuf::from(ALGOS_DIR);

    let path = match (kind, entity) {
        (GeneratorKind::Enum, UnitEntity::Enum(e)) => types
            .join("enums")
            .join(format!("{}.{}", enum_module(language, e.identifier()), ext)),
        (GeneratorKind::EnumIndex, UnitEntity::Dictionary) => {
            types.join("enums").join(language.index_file())
        }
        (GeneratorKind::FuncIndex, UnitEntity::Dictionary) => match language {
            TargetLanguage::Python => algos.join("executor.py"),
            TargetLanguage::Rust | TargetLanguage::TypeScript => algos.join(language.index_file()),
        },
        (GeneratorKind::StateSpace, UnitEntity::Dictionary) => {
            types.join("core").join(format!("states.{}", ext))
        }
        (GeneratorKind::TermSetIndex, UnitEntity::Dictionary) => {
            types.join("terms").join(language.index_file())
        }
        (GeneratorKind::TermSet, UnitEntity::Contract(c)) => types
            .join("terms")
            .join(format!("{}.{}", contract_module(c.acronym()), ext)),
        (GeneratorKind::AlgorithmStubIndex, UnitEntity::Contract(c)) => algos
            .join(contract_module(c.acronym()))
            .join(language.index_file()),
        (GeneratorKind::ScheduleStub, UnitEntity::Contract(c)) => algos
            .join(contract_module(c.acronym()))
            .join(format!("{}.{}", function_module(language, "do_get_schedule"), ext)),
        (GeneratorKind::ExecuteStepStub, UnitEntity::Contract(c)) => algos
            .join(contract_module(c.acronym()))
            .join(format!("{}.{}", function_module(language, "do_execute_step"), ext)),
        (GeneratorKind::PayoffStub | GeneratorKind::StateTransitionStub, UnitEntity::FunctionStub(stub))
            if kind.strategy() == Strategy::FunctionStubs(stub.function_type) =>
        {
            algos
                .join(contract_module(stub.contract.acronym()))
                .join(format!("{}.{}", stub_module(language, stub), ext))
        }
        _ => {
            return Err(CodegenError::EntityMismatch {
                kind,
                entity: entity.describe(),
            })
        }
    };

    Ok(path)
}

/// Module (file stem) of a generated enum
pub fn enum_module(language: TargetLanguage, identifier: &str) -> String {
    match language {
        TargetLanguage::Python | TargetLanguage::Rust => to_snake_case(identifier),
        TargetLanguage::TypeScript => to_camel_case(identifier, "_"),
    }
}

/// Module of a contract's term set or algorithm package
pub fn contract_module(acronym: &str) -> String {
    acronym.to_lowercase()
}

/// Module of a fixed algorithm entry point given in snake case
pub fn function_module(language: TargetLanguage, name: &str) -> String {
    match language {
        TargetLanguage::Python | TargetLanguage::Rust => name.to_string(),
        TargetLanguage::TypeScript => to_camel_case(name, "_"),
    }
}

/// Module of a discovered function, e.g. `pof_ied_2`; TypeScript keeps the
/// event type as discovered
pub fn stub_module(language: TargetLanguage, stub: &FunctionStub<'_>) -> String {
    let mut stem = format!("{}_{}", stub.function_type.token().to_lowercase(), stub.event_type);
    if !stub.suffix.is_empty() {
        stem.push('_');
        stem.push_str(&stub.suffix);
    }
    match language {
        TargetLanguage::Python | TargetLanguage::Rust => stem.to_lowercase(),
        TargetLanguage::TypeScript => stem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actus_mp_core::{
        Contract, ContractTypeInfo, EntityInfo, Enum, FunctionType, PublicationStatus, TermSet,
    };
    use rstest::rstest;

    fn pam() -> Contract {
        Contract {
            term_set: TermSet::default(),
            type_info: ContractTypeInfo {
                info: EntityInfo::new("PAM", "", "PrincipalAtMaturity", "Principal at Maturity"),
                classification: "Fixed Income".to_string(),
                coverage: None,
                family: "Basic".to_string(),
                publication_status: PublicationStatus::Released,
            },
        }
    }

    fn contract_role() -> Enum {
        Enum::new(EntityInfo::new("CNTRL", "", "contractRole", "Contract Role"), Vec::new())
    }

    fn stub<'a>(contract: &'a Contract, function_type: FunctionType, suffix: &str) -> FunctionStub<'a> {
        FunctionStub {
            contract,
            function_type,
            event_type: "IED".to_string(),
            suffix: suffix.to_string(),
        }
    }

    fn entity_for(kind: GeneratorKind, contract: &Contract) -> UnitEntity<'_> {
        match kind.strategy() {
            Strategy::WholeDictionary => UnitEntity::Dictionary,
            Strategy::PerEntity(crate::enums::EntitySource::EnumSet) => UnitEntity::Enum(contract_role()),
            Strategy::PerEntity(crate::enums::EntitySource::ContractSet) => UnitEntity::Contract(contract),
            Strategy::FunctionStubs(function_type) => {
                UnitEntity::FunctionStub(stub(contract, function_type, ""))
            }
        }
    }

    #[test]
    fn test_resolution_is_total() {
        let contract = pam();
        for language in TargetLanguage::ALL {
            for kind in GeneratorKind::ALL {
                let path = resolve(language, kind, &entity_for(kind, &contract)).unwrap();
                assert!(path.is_relative(), "{} {}", language, kind);
                assert_eq!(
                    path.extension().and_then(|e| e.to_str()),
                    Some(language.extension()),
                    "{} {}",
                    language,
                    kind
                );
            }
        }
    }

    #[test]
    fn test_all_kinds_listed() {
        for kind in GeneratorKind::ALL {
            // Adding a variant breaks this match until ALL is extended.
            let listed = match kind {
                GeneratorKind::Enum
                | GeneratorKind::EnumIndex
                | GeneratorKind::FuncIndex
                | GeneratorKind::PayoffStub
                | GeneratorKind::StateTransitionStub
                | GeneratorKind::AlgorithmStubIndex
                | GeneratorKind::ScheduleStub
                | GeneratorKind::ExecuteStepStub
                | GeneratorKind::StateSpace
                | GeneratorKind::TermSet
                | GeneratorKind::TermSetIndex => true,
            };
            assert!(listed);
        }
        let distinct: std::collections::BTreeSet<_> = GeneratorKind::ALL.into_iter().collect();
        assert_eq!(distinct.len(), 11);
        for language in TargetLanguage::ALL {
            match language {
                TargetLanguage::Python | TargetLanguage::Rust | TargetLanguage::TypeScript => {}
            }
        }
        assert_eq!(TargetLanguage::ALL.len(), 3);
    }

    #[rstest]
    #[case(TargetLanguage::Python, GeneratorKind::Enum, "types/enums/contract_role.py")]
    #[case(TargetLanguage::Rust, GeneratorKind::Enum, "types/enums/contract_role.rs")]
    #[case(TargetLanguage::TypeScript, GeneratorKind::Enum, "types/enums/contractRole.ts")]
    #[case(TargetLanguage::Python, GeneratorKind::FuncIndex, "algos/executor.py")]
    #[case(TargetLanguage::Rust, GeneratorKind::FuncIndex, "algos/mod.rs")]
    #[case(TargetLanguage::Python, GeneratorKind::EnumIndex, "types/enums/__init__.py")]
    #[case(TargetLanguage::TypeScript, GeneratorKind::TermSetIndex, "types/terms/index.ts")]
    #[case(TargetLanguage::Rust, GeneratorKind::StateSpace, "types/core/states.rs")]
    #[case(TargetLanguage::Python, GeneratorKind::TermSet, "types/terms/pam.py")]
    #[case(TargetLanguage::TypeScript, GeneratorKind::TermSet, "types/terms/pam.ts")]
    #[case(TargetLanguage::Python, GeneratorKind::AlgorithmStubIndex, "algos/pam/__init__.py")]
    #[case(TargetLanguage::Rust, GeneratorKind::ExecuteStepStub, "algos/pam/do_execute_step.rs")]
    #[case(TargetLanguage::TypeScript, GeneratorKind::ExecuteStepStub, "algos/pam/doExecuteStep.ts")]
    #[case(TargetLanguage::TypeScript, GeneratorKind::ScheduleStub, "algos/pam/doGetSchedule.ts")]
    #[case(TargetLanguage::Python, GeneratorKind::PayoffStub, "algos/pam/pof_ied.py")]
    #[case(TargetLanguage::TypeScript, GeneratorKind::StateTransitionStub, "algos/pam/stf_IED.ts")]
    fn test_resolved_locations(
        #[case] language: TargetLanguage,
        #[case] kind: GeneratorKind,
        #[case] expected: &str,
    ) {
        let contract = pam();
        let path = resolve(language, kind, &entity_for(kind, &contract)).unwrap();
        assert_eq!(path, PathBuf::from(expected));
    }

    #[test]
    fn test_stub_suffix_in_file_name() {
        let contract = pam();
        let entity = UnitEntity::FunctionStub(stub(&contract, FunctionType::Pof, "2"));
        assert_eq!(
            resolve(TargetLanguage::Rust, GeneratorKind::PayoffStub, &entity).unwrap(),
            PathBuf::from("algos/pam/pof_ied_2.rs")
        );
        assert_eq!(
            resolve(TargetLanguage::TypeScript, GeneratorKind::PayoffStub, &entity).unwrap(),
            PathBuf::from("algos/pam/pof_IED_2.ts")
        );
    }

    #[test]
    fn test_wrong_entity_shape_is_rejected() {
        let contract = pam();
        let result = resolve(
            TargetLanguage::Python,
            GeneratorKind::TermSet,
            &UnitEntity::Dictionary,
        );
        assert!(matches!(result, Err(CodegenError::EntityMismatch { .. })));

        let stf = UnitEntity::FunctionStub(stub(&contract, FunctionType::Stf, ""));
        let result = resolve(TargetLanguage::Python, GeneratorKind::PayoffStub, &stf);
        assert!(matches!(result, Err(CodegenError::EntityMismatch { .. })));
    }
}
