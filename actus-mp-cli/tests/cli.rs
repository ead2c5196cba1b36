use std::path::Path;

use actus_mp_cli::{run, Cli, Language};
use clap::Parser;
use rstest::rstest;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../fixtures/actus-dictionary.json");

fn args(lang: &str, dest: &Path, core: &Path) -> Vec<String> {
    vec![
        "actus-mp".to_string(),
        "--lang".to_string(),
        lang.to_string(),
        "--dest".to_string(),
        dest.display().to_string(),
        "--core".to_string(),
        core.display().to_string(),
        "--dictionary".to_string(),
        FIXTURE.to_string(),
    ]
}

#[rstest]
#[case("python", Language::Python)]
#[case("rust", Language::Rust)]
#[case("typescript", Language::TypeScript)]
fn test_language_values(#[case] value: &str, #[case] expected: Language) {
    let cli = Cli::try_parse_from(args(value, Path::new("out"), Path::new("core"))).unwrap();
    assert_eq!(cli.lang, expected);
    assert!(cli.templates.is_none());
}

#[test]
fn test_unknown_language_rejected() {
    let result = Cli::try_parse_from(args("java", Path::new("out"), Path::new("core")));
    assert!(result.is_err());
}

#[test]
fn test_log_level_flag_wins() {
    let mut argv = args("rust", Path::new("out"), Path::new("core"));
    argv.extend(["--log-level".to_string(), "debug".to_string()]);
    let cli = Cli::try_parse_from(argv).unwrap();
    assert_eq!(cli.log_filter(), "debug");
}

#[test]
fn test_run_writes_rust_tree() {
    let dest = tempfile::tempdir().unwrap();
    let core = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(core.path().join("pam")).unwrap();
    std::fs::write(core.path().join("pam/POF_IED_PAM.java"), "").unwrap();

    let cli = Cli::try_parse_from(args("rust", dest.path(), core.path())).unwrap();
    let report = run(&cli).unwrap();

    assert!(report.is_success());
    assert!(dest.path().join("types/enums/mod.rs").is_file());
    assert!(dest.path().join("types/terms/pam.rs").is_file());
    assert!(dest.path().join("algos/pam/pof_ied.rs").is_file());
    let index = std::fs::read_to_string(dest.path().join("algos/pam/mod.rs")).unwrap();
    assert!(index.contains("pub use pof_ied::pof_ied;"));
}

#[test]
fn test_run_fails_on_missing_core() {
    let dest = tempfile::tempdir().unwrap();
    let missing = dest.path().join("actus-core");

    let cli = Cli::try_parse_from(args("python", dest.path(), &missing)).unwrap();
    let err = run(&cli).unwrap_err();
    assert!(err.to_string().contains("Precondition failed"));
    assert_eq!(std::fs::read_dir(dest.path()).unwrap().count(), 0);
}

#[test]
fn test_run_fails_on_incomplete_template_dir() {
    let dest = tempfile::tempdir().unwrap();
    let templates = tempfile::tempdir().unwrap();

    let mut argv = args("typescript", dest.path(), dest.path());
    argv.extend(["--templates".to_string(), templates.path().display().to_string()]);
    let cli = Cli::try_parse_from(argv).unwrap();

    let err = run(&cli).unwrap_err();
    assert_eq!(err.to_string(), "Failed to load templates");
}
