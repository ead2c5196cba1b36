//! Writing generated units to the file system

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use actus_mp_core::{DataQualityWarning, Dictionary};
use tracing::{info, warn};

use crate::enums::{GeneratorKind, TargetLanguage};
use crate::generator::{Dispatcher, UnitFailure};
use crate::templates::TemplateCache;
use crate::CodegenError;

/// Destination of rendered units
pub trait FileSink {
    /// Writes `content` to `path`, relative to the sink's root
    fn write(&mut self, path: &Path, content: &str) -> Result<(), CodegenError>;
}

/// Writes under a root directory, creating parent directories as needed
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FileSink for FsSink {
    fn write(&mut self, path: &Path, content: &str) -> Result<(), CodegenError> {
        let target = self.root.join(path);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|source| CodegenError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&target, content).map_err(|source| CodegenError::Io {
            path: target,
            source,
        })
    }
}

/// Keeps written files in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    pub files: BTreeMap<PathBuf, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FileSink for MemorySink {
    fn write(&mut self, path: &Path, content: &str) -> Result<(), CodegenError> {
        self.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}

/// Summary of a generation run
#[derive(Debug, Default)]
pub struct RunReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<UnitFailure>,
    pub warnings: Vec<DataQualityWarning>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Output and reference directories must exist before anything is generated
pub fn check_preconditions(dest: &Path, reference: &Path) -> Result<(), CodegenError> {
    if !dest.is_dir() {
        return Err(CodegenError::Precondition(format!(
            "output directory {} does not exist or is not a directory",
            dest.display()
        )));
    }
    if !reference.is_dir() {
        return Err(CodegenError::Precondition(format!(
            "reference implementation {} does not exist or is not a directory",
            reference.display()
        )));
    }
    Ok(())
}

/// Runs every generator kind for `language` and hands the units to `sink`
pub fn generate_all(
    language: TargetLanguage,
    dictionary: &Dictionary,
    templates: &TemplateCache,
    reference: &Path,
    sink: &mut dyn FileSink,
) -> Result<RunReport, CodegenError> {
    let dispatcher = Dispatcher::new(language, dictionary, templates).with_reference(reference);
    let mut report = RunReport::default();

    for kind in GeneratorKind::ALL {
        let dispatch = dispatcher.dispatch(kind)?;
        info!(
            language = %language,
            kind = %kind,
            units = dispatch.units.len(),
            failures = dispatch.failures.len(),
            "Generated"
        );

        for unit in dispatch.units {
            sink.write(&unit.path, &unit.content)?;
            report.written.push(unit.path);
        }
        report.failures.extend(dispatch.failures);
        report.warnings.extend(dispatch.warnings);
    }

    // Shared terms raise the same warning once per contract
    report.warnings.sort();
    report.warnings.dedup();
    for warning in &report.warnings {
        warn!("Data quality: {}", warning);
    }
    Ok(report)
}

/// Checks preconditions, then writes every generated unit under `dest`
pub fn write(
    language: TargetLanguage,
    dest: &Path,
    reference: &Path,
    dictionary: &Dictionary,
    templates: &TemplateCache,
) -> Result<RunReport, CodegenError> {
    check_preconditions(dest, reference)?;
    let mut sink = FsSink::new(dest);
    generate_all(language, dictionary, templates, reference, &mut sink)
}
