use std::path::{Path, PathBuf};

use actus_mp_codegen::{
    discover_function_stubs, generate_all, write, CodegenError, Dispatcher, GeneratorKind,
    MemorySink, TargetLanguage, TemplateCache,
};
use actus_mp_compiler::DictionaryCompiler;
use actus_mp_core::{DataQualityWarning, Dictionary, Entity, FunctionType};
use rstest::rstest;
use serde_json::Value;
use tempfile::TempDir;

const FIXTURE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../fixtures/actus-dictionary.json"
));

fn dictionary() -> Dictionary {
    DictionaryCompiler::new().compile(FIXTURE).unwrap().dictionary
}

/// Reference tree with files created in deliberately unsorted order
fn reference_tree() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let pam = dir.path().join("pam");
    let ann = dir.path().join("ann");
    std::fs::create_dir_all(&pam).unwrap();
    std::fs::create_dir_all(&ann).unwrap();
    for name in [
        "STF_IED_PAM.java",
        "POF_MD_PAM.java",
        "POF_IP_PAM2.java",
        "POF_IED_PAM.java",
        "POF_IED_PAM.class",
        "POF_IP_PAM.java",
        "package-info.java",
    ] {
        std::fs::write(pam.join(name), "").unwrap();
    }
    std::fs::write(ann.join("POF_PR_ANN.java"), "").unwrap();
    dir
}

fn templates() -> TemplateCache {
    TemplateCache::embedded(&TargetLanguage::ALL).unwrap()
}

#[test]
fn test_discovery_is_sorted_and_deduplicated() {
    let dictionary = dictionary();
    let reference = reference_tree();

    let stubs = discover_function_stubs(&dictionary.contract_set, reference.path(), FunctionType::Pof).unwrap();
    let found: Vec<_> = stubs
        .iter()
        .map(|s| (s.contract.acronym(), s.event_type.as_str(), s.suffix.as_str()))
        .collect();
    assert_eq!(
        found,
        vec![
            ("ANN", "PR", ""),
            ("PAM", "IED", ""),
            ("PAM", "IP", ""),
            ("PAM", "IP", "2"),
            ("PAM", "MD", ""),
        ]
    );

    let stf = discover_function_stubs(&dictionary.contract_set, reference.path(), FunctionType::Stf).unwrap();
    assert_eq!(stf.len(), 1);
    assert_eq!(stf[0].event_type, "IED");
}

#[rstest]
#[case(TargetLanguage::Python, "contract_role: enums.ContractRole = enums.ContractRole.RPA")]
#[case(TargetLanguage::Rust, "contract_role: Some(enums::ContractRole::RPA)")]
#[case(TargetLanguage::TypeScript, "contractRole: enums.ContractRole = enums.ContractRole.RPA;")]
fn test_contract_role_defaults_to_rpa(#[case] language: TargetLanguage, #[case] expected: &str) {
    let dictionary = dictionary();
    let templates = templates();
    let dispatch = Dispatcher::new(language, &dictionary, &templates)
        .dispatch(GeneratorKind::TermSet)
        .unwrap();

    let pam = dispatch
        .units
        .iter()
        .find(|u| u.entity.describe() == "contract PAM")
        .unwrap();
    assert!(pam.content.contains(expected), "{}", pam.content);
    assert!(pam.content.contains("PrincipalAtMaturityTerms"));
}

#[test]
fn test_unmatched_enum_default_is_reported() {
    let dictionary = dictionary();
    let templates = templates();
    let dispatch = Dispatcher::new(TargetLanguage::Python, &dictionary, &templates)
        .dispatch(GeneratorKind::TermSet)
        .unwrap();

    assert!(dispatch.failures.is_empty());
    assert_eq!(
        dispatch.warnings,
        vec![DataQualityWarning::UnmatchedEnumDefault {
            term_id: "dayCountConvention".to_string(),
            default: "ACT".to_string(),
            fallback: "AA".to_string(),
        }]
    );
}

#[test]
fn test_enum_members_render_with_safe_names() {
    let dictionary = dictionary();
    let templates = templates();
    let dispatch = Dispatcher::new(TargetLanguage::Rust, &dictionary, &templates)
        .dispatch(GeneratorKind::Enum)
        .unwrap();

    assert_eq!(dispatch.units.len(), 9);
    let scaling = dispatch
        .units
        .iter()
        .find(|u| u.path == PathBuf::from("types/enums/scaling_effect.rs"))
        .unwrap();
    assert!(scaling.content.contains("pub enum ScalingEffect"));
    assert!(scaling.content.contains("OOO = 0,"));

    let day_count = dispatch
        .units
        .iter()
        .find(|u| u.path == PathBuf::from("types/enums/day_count_convention.rs"))
        .unwrap();
    assert!(day_count.content.contains("_30E360 = 2,"));

    let contract_type = dispatch
        .units
        .iter()
        .find(|u| u.path == PathBuf::from("types/enums/contract_type.rs"))
        .unwrap();
    assert!(contract_type.content.contains("FUTUR = -2,"));
    assert!(!contract_type.content.contains("EXOTI"));
}

#[test]
fn test_failed_units_do_not_abort_others() {
    let mut doc: Value = serde_json::from_str(FIXTURE).unwrap();
    doc["terms"]["statusDate"]["default"] = Value::from("2021-01-01T00:00:00");
    let dictionary = DictionaryCompiler::new()
        .compile(&doc.to_string())
        .unwrap()
        .dictionary;
    let templates = templates();

    let dispatch = Dispatcher::new(TargetLanguage::TypeScript, &dictionary, &templates)
        .dispatch(GeneratorKind::TermSet)
        .unwrap();

    let failed: Vec<_> = dispatch.failures.iter().map(|f| f.entity.as_str()).collect();
    assert_eq!(failed, vec!["contract ANN", "contract CEG", "contract PAM"]);
    assert!(dispatch
        .failures
        .iter()
        .all(|f| matches!(f.error, CodegenError::UnsupportedMapping { .. })));

    let rendered: Vec<_> = dispatch.units.iter().map(|u| u.entity.describe()).collect();
    assert_eq!(rendered, vec!["contract FUTUR"]);
}

#[rstest]
fn test_stub_kinds_require_reference(
    #[values(
        GeneratorKind::PayoffStub,
        GeneratorKind::StateTransitionStub,
        GeneratorKind::AlgorithmStubIndex,
        GeneratorKind::ScheduleStub,
        GeneratorKind::ExecuteStepStub
    )]
    kind: GeneratorKind,
) {
    let dictionary = dictionary();
    let templates = templates();
    let result = Dispatcher::new(TargetLanguage::Python, &dictionary, &templates).dispatch(kind);
    assert!(matches!(result, Err(CodegenError::Precondition(_))));
}

#[test]
fn test_algorithm_index_lists_discovered_functions() {
    let dictionary = dictionary();
    let templates = templates();
    let reference = reference_tree();

    let dispatch = Dispatcher::new(TargetLanguage::Python, &dictionary, &templates)
        .with_reference(reference.path())
        .dispatch(GeneratorKind::AlgorithmStubIndex)
        .unwrap();

    let pam = dispatch
        .units
        .iter()
        .find(|u| u.path == PathBuf::from("algos/pam/__init__.py"))
        .unwrap();
    assert!(pam.content.contains("from .pof_ip_2 import pof_ip_2"));
    assert!(pam.content.contains("from .stf_ied import stf_ied"));
    assert!(pam.content.contains("from .do_execute_step import do_execute_step"));
    assert!(!pam.content.contains("pof_pr"));
}

#[test]
fn test_shared_term_warning_reported_once() {
    let mut doc: Value = serde_json::from_str(FIXTURE).unwrap();
    doc["applicability"]["Annuity"]["dayCountConvention"] = Value::from("x");
    let dictionary = DictionaryCompiler::new()
        .compile(&doc.to_string())
        .unwrap()
        .dictionary;
    let templates = templates();
    let reference = reference_tree();

    let per_contract = Dispatcher::new(TargetLanguage::Python, &dictionary, &templates)
        .dispatch(GeneratorKind::TermSet)
        .unwrap();
    assert_eq!(per_contract.warnings.len(), 2);

    let mut sink = MemorySink::new();
    let report =
        generate_all(TargetLanguage::Python, &dictionary, &templates, reference.path(), &mut sink).unwrap();
    assert_eq!(
        report.warnings,
        vec![DataQualityWarning::UnmatchedEnumDefault {
            term_id: "dayCountConvention".to_string(),
            default: "ACT".to_string(),
            fallback: "AA".to_string(),
        }]
    );
}

#[test]
fn test_generation_is_deterministic() {
    let dictionary = dictionary();
    let templates = templates();
    let reference = reference_tree();

    for language in TargetLanguage::ALL {
        let mut first = MemorySink::new();
        let mut second = MemorySink::new();
        let a = generate_all(language, &dictionary, &templates, reference.path(), &mut first).unwrap();
        let b = generate_all(language, &dictionary, &templates, reference.path(), &mut second).unwrap();

        assert!(a.is_success());
        assert_eq!(a.written, b.written);
        assert_eq!(first.files, second.files);
    }
}

#[test]
fn test_write_python_tree() {
    let dictionary = dictionary();
    let templates = templates();
    let reference = reference_tree();
    let dest = tempfile::tempdir().unwrap();

    let report = write(
        TargetLanguage::Python,
        dest.path(),
        reference.path(),
        &dictionary,
        &templates,
    )
    .unwrap();
    assert!(report.is_success());
    assert_eq!(report.warnings.len(), 1);

    for expected in [
        "types/enums/__init__.py",
        "types/enums/contract_role.py",
        "types/enums/reference_role.py",
        "types/terms/__init__.py",
        "types/terms/pam.py",
        "types/terms/futur.py",
        "types/core/states.py",
        "algos/executor.py",
        "algos/pam/__init__.py",
        "algos/pam/do_get_schedule.py",
        "algos/pam/do_execute_step.py",
        "algos/pam/pof_ied.py",
        "algos/pam/pof_ip_2.py",
        "algos/pam/stf_ied.py",
        "algos/ann/pof_pr.py",
    ] {
        assert!(dest.path().join(expected).is_file(), "missing {}", expected);
    }
    assert!(!dest.path().join("types/terms/exoti.py").exists());
}

#[test]
fn test_typescript_stub_keeps_event_case() {
    let dictionary = dictionary();
    let templates = templates();
    let reference = reference_tree();
    let mut sink = MemorySink::new();

    generate_all(TargetLanguage::TypeScript, &dictionary, &templates, reference.path(), &mut sink).unwrap();

    let stub = sink.files.get(Path::new("algos/pam/pof_IP_2.ts")).unwrap();
    assert!(stub.contains("export function pof_IP_2("));
    assert!(sink.files.contains_key(Path::new("algos/pam/doExecuteStep.ts")));
    assert!(sink.files.contains_key(Path::new("types/enums/contractRole.ts")));
}

#[test]
fn test_preconditions_checked_before_output() {
    let dictionary = dictionary();
    let templates = templates();
    let dest = tempfile::tempdir().unwrap();
    let missing = dest.path().join("no-core");

    let result = write(TargetLanguage::Rust, dest.path(), &missing, &dictionary, &templates);
    assert!(matches!(result, Err(CodegenError::Precondition(_))));
    assert_eq!(std::fs::read_dir(dest.path()).unwrap().count(), 0);
}
