//! Generation dispatch: which entities each generator kind renders

use std::path::{Path, PathBuf};

use actus_mp_core::{Contract, DataQualityWarning, Dictionary, Entity, Enum, FunctionType};
use tracing::{debug, warn};

use crate::context;
use crate::discovery::{discover_function_stubs, FunctionStub};
use crate::enums::{EntitySource, GeneratorKind, Strategy, TargetLanguage};
use crate::paths;
use crate::templates::TemplateCache;
use crate::CodegenError;

/// The domain entity a single unit is generated from
#[derive(Debug, Clone)]
pub enum UnitEntity<'d> {
    Dictionary,
    Enum(Enum),
    Contract(&'d Contract),
    FunctionStub(FunctionStub<'d>),
}

impl UnitEntity<'_> {
    pub fn describe(&self) -> String {
        match self {
            UnitEntity::Dictionary => "dictionary".to_string(),
            UnitEntity::Enum(e) => format!("enum {}", e.identifier()),
            UnitEntity::Contract(c) => format!("contract {}", c.acronym()),
            UnitEntity::FunctionStub(s) => format!(
                "{} {}{} of {}",
                s.function_type,
                s.event_type,
                s.suffix,
                s.contract.acronym()
            ),
        }
    }
}

/// One rendered artifact, not yet written
#[derive(Debug)]
pub struct Unit<'d> {
    pub kind: GeneratorKind,
    pub entity: UnitEntity<'d>,
    /// Relative to the output directory
    pub path: PathBuf,
    pub content: String,
}

/// A unit that could not be generated
#[derive(Debug)]
pub struct UnitFailure {
    pub kind: GeneratorKind,
    pub entity: String,
    pub error: CodegenError,
}

/// Outcome of dispatching one generator kind
#[derive(Debug, Default)]
pub struct Dispatch<'d> {
    pub units: Vec<Unit<'d>>,
    pub failures: Vec<UnitFailure>,
    pub warnings: Vec<DataQualityWarning>,
}

/// Drives the generators of one target language over a compiled dictionary
pub struct Dispatcher<'d> {
    language: TargetLanguage,
    dictionary: &'d Dictionary,
    templates: &'d TemplateCache,
    reference: Option<&'d Path>,
}

impl<'d> Dispatcher<'d> {
    pub fn new(
        language: TargetLanguage,
        dictionary: &'d Dictionary,
        templates: &'d TemplateCache,
    ) -> Self {
        Self {
            language,
            dictionary,
            templates,
            reference: None,
        }
    }

    /// Root of the reference implementation's per-contract function tree
    pub fn with_reference(mut self, reference: &'d Path) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn language(&self) -> TargetLanguage {
        self.language
    }

    /// Renders every unit of `kind`.
    ///
    /// A unit whose rendering context cannot be built is reported in
    /// `failures` and the remaining units are still produced. Errors returned
    /// here fail the kind as a whole.
    pub fn dispatch(&self, kind: GeneratorKind) -> Result<Dispatch<'d>, CodegenError> {
        let mut dispatch = Dispatch::default();
        let functions = self.algorithm_functions(kind)?;

        for entity in self.entities(kind)? {
            match self.render(kind, &entity, &functions) {
                Ok((path, content, warnings)) => {
                    debug!(kind = %kind, path = %path.display(), "Rendered unit");
                    dispatch.warnings.extend(warnings);
                    dispatch.units.push(Unit {
                        kind,
                        entity,
                        path,
                        content,
                    });
                }
                Err(error) => {
                    warn!(kind = %kind, entity = %entity.describe(), "Unit failed: {}", error);
                    dispatch.failures.push(UnitFailure {
                        kind,
                        entity: entity.describe(),
                        error,
                    });
                }
            }
        }

        Ok(dispatch)
    }

    fn entities(&self, kind: GeneratorKind) -> Result<Vec<UnitEntity<'d>>, CodegenError> {
        let entities = match kind.strategy() {
            Strategy::WholeDictionary => vec![UnitEntity::Dictionary],
            Strategy::PerEntity(EntitySource::EnumSet) => self
                .dictionary
                .enum_set()
                .into_iter()
                .map(UnitEntity::Enum)
                .collect(),
            Strategy::PerEntity(EntitySource::ContractSet) => self
                .dictionary
                .contract_set
                .iter()
                .map(UnitEntity::Contract)
                .collect(),
            Strategy::FunctionStubs(function_type) => {
                let reference = self.require_reference(kind)?;
                discover_function_stubs(&self.dictionary.contract_set, reference, function_type)?
                    .into_iter()
                    .map(UnitEntity::FunctionStub)
                    .collect()
            }
        };
        Ok(entities)
    }

    fn render(
        &self,
        kind: GeneratorKind,
        entity: &UnitEntity<'d>,
        functions: &[FunctionStub<'d>],
    ) -> Result<(PathBuf, String, Vec<DataQualityWarning>), CodegenError> {
        let path = paths::resolve(self.language, kind, entity)?;
        let functions: Vec<&FunctionStub<'d>> = match entity {
            UnitEntity::Contract(contract) => functions
                .iter()
                .filter(|stub| stub.contract == *contract)
                .collect(),
            _ => Vec::new(),
        };

        let rendering =
            context::build(self.language, kind, self.dictionary, entity, &functions)?;
        let content = self.templates.render(self.language, kind, &rendering.value)?;

        Ok((path, content, rendering.warnings))
    }

    fn require_reference(&self, kind: GeneratorKind) -> Result<&'d Path, CodegenError> {
        self.reference.ok_or_else(|| {
            CodegenError::Precondition(format!(
                "{} generation requires a reference implementation path",
                kind
            ))
        })
    }

    /// Discovered functions listed by the per-contract algorithm modules,
    /// payoffs first; empty for other kinds
    fn algorithm_functions(
        &self,
        kind: GeneratorKind,
    ) -> Result<Vec<FunctionStub<'d>>, CodegenError> {
        let lists_functions = matches!(
            kind,
            GeneratorKind::AlgorithmStubIndex
                | GeneratorKind::ScheduleStub
                | GeneratorKind::ExecuteStepStub
        );
        if !lists_functions {
            return Ok(Vec::new());
        }
        let reference = self.require_reference(kind)?;

        let mut functions = Vec::new();
        for function_type in FunctionType::ALL {
            functions.extend(discover_function_stubs(
                &self.dictionary.contract_set,
                reference,
                function_type,
            )?);
        }
        Ok(functions)
    }
}
