//! ACTUS code generator command line
//!
//! Compiles the dictionary document and writes generated code for one target
//! language into an output directory.

use std::path::PathBuf;

use actus_mp_codegen::{write, RunReport, TargetLanguage, TemplateCache};
use actus_mp_compiler::DictionaryCompiler;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Language {
    Python,
    Rust,
    #[value(name = "typescript")]
    TypeScript,
}

impl From<Language> for TargetLanguage {
    fn from(language: Language) -> Self {
        match language {
            Language::Python => TargetLanguage::Python,
            Language::Rust => TargetLanguage::Rust,
            Language::TypeScript => TargetLanguage::TypeScript,
        }
    }
}

/// Writes code generated from the ACTUS dictionary to the file system
#[derive(Debug, Parser)]
#[command(name = "actus-mp", version)]
pub struct Cli {
    /// Target programming language
    #[arg(long, value_enum)]
    pub lang: Language,

    /// Directory into which code is written
    #[arg(long)]
    pub dest: PathBuf,

    /// Reference implementation function tree (actus-core)
    #[arg(long)]
    pub core: PathBuf,

    /// Dictionary document
    #[arg(long, env = "ACTUS_DICTIONARY")]
    pub dictionary: PathBuf,

    /// Directory of template overrides
    #[arg(long)]
    pub templates: Option<PathBuf>,

    /// Log filter, overrides RUST_LOG
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Log filter: `--log-level`, then `RUST_LOG`, then `info`
    pub fn log_filter(&self) -> String {
        self.log_level
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| "info".to_string())
    }
}

/// Loads templates, compiles the dictionary and writes every generated unit
pub fn run(cli: &Cli) -> Result<RunReport> {
    let language = TargetLanguage::from(cli.lang);

    let templates = match &cli.templates {
        Some(dir) => TemplateCache::from_dir(dir, &[language]),
        None => TemplateCache::embedded(&[language]),
    }
    .context("Failed to load templates")?;

    let compilation = DictionaryCompiler::new()
        .compile_file(&cli.dictionary)
        .with_context(|| format!("Failed to compile {}", cli.dictionary.display()))?;

    info!(
        language = %language,
        dest = %cli.dest.display(),
        "Generating code"
    );
    let report = write(
        language,
        &cli.dest,
        &cli.core,
        &compilation.dictionary,
        &templates,
    )?;

    info!(
        written = report.written.len(),
        failures = report.failures.len(),
        warnings = report.warnings.len() + compilation.warnings.len(),
        "Generation finished"
    );
    Ok(report)
}
