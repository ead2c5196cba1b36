//! Target languages, generator kinds and the dispatch table between them

use std::fmt;

use actus_mp_core::FunctionType;

/// Supported language targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TargetLanguage {
    Python,
    Rust,
    TypeScript,
}

impl TargetLanguage {
    pub const ALL: [TargetLanguage; 3] = [
        TargetLanguage::Python,
        TargetLanguage::Rust,
        TargetLanguage::TypeScript,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetLanguage::Python => "python",
            TargetLanguage::Rust => "rust",
            TargetLanguage::TypeScript => "typescript",
        }
    }

    /// Template sub-folder, also the template file name prefix
    pub fn template_folder(&self) -> &'static str {
        match self {
            TargetLanguage::Python => "py",
            TargetLanguage::Rust => "rs",
            TargetLanguage::TypeScript => "ts",
        }
    }

    pub fn extension(&self) -> &'static str {
        self.template_folder()
    }

    /// Module index file name, e.g. `mod.rs`
    pub fn index_file(&self) -> &'static str {
        match self {
            TargetLanguage::Python => "__init__.py",
            TargetLanguage::Rust => "mod.rs",
            TargetLanguage::TypeScript => "index.ts",
        }
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of artifact produced by one generation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GeneratorKind {
    Enum,
    EnumIndex,
    FuncIndex,
    PayoffStub,
    StateTransitionStub,
    AlgorithmStubIndex,
    ScheduleStub,
    ExecuteStepStub,
    StateSpace,
    TermSet,
    TermSetIndex,
}

/// Collection a per-entity generator iterates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntitySource {
    EnumSet,
    ContractSet,
}

/// How a generator kind obtains the entities it renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// One unit for the whole dictionary
    WholeDictionary,
    /// One unit per member of the source collection
    PerEntity(EntitySource),
    /// One unit per function discovered in the reference tree
    FunctionStubs(FunctionType),
}

impl GeneratorKind {
    /// Every kind, in generation order
    pub const ALL: [GeneratorKind; 11] = [
        GeneratorKind::Enum,
        GeneratorKind::EnumIndex,
        GeneratorKind::FuncIndex,
        GeneratorKind::PayoffStub,
        GeneratorKind::StateTransitionStub,
        GeneratorKind::AlgorithmStubIndex,
        GeneratorKind::ScheduleStub,
        GeneratorKind::ExecuteStepStub,
        GeneratorKind::StateSpace,
        GeneratorKind::TermSet,
        GeneratorKind::TermSetIndex,
    ];

    pub fn strategy(&self) -> Strategy {
        match self {
            GeneratorKind::EnumIndex
            | GeneratorKind::FuncIndex
            | GeneratorKind::StateSpace
            | GeneratorKind::TermSetIndex => Strategy::WholeDictionary,
            GeneratorKind::Enum => Strategy::PerEntity(EntitySource::EnumSet),
            GeneratorKind::TermSet
            | GeneratorKind::AlgorithmStubIndex
            | GeneratorKind::ScheduleStub
            | GeneratorKind::ExecuteStepStub => Strategy::PerEntity(EntitySource::ContractSet),
            GeneratorKind::PayoffStub => Strategy::FunctionStubs(FunctionType::Pof),
            GeneratorKind::StateTransitionStub => Strategy::FunctionStubs(FunctionType::Stf),
        }
    }

    /// Template base name, e.g. `term_set_index`
    pub fn template_name(&self) -> &'static str {
        match self {
            GeneratorKind::Enum => "enum",
            GeneratorKind::EnumIndex => "enum_index",
            GeneratorKind::FuncIndex => "func_index",
            GeneratorKind::PayoffStub => "payoff_stub",
            GeneratorKind::StateTransitionStub => "state_transition_stub",
            GeneratorKind::AlgorithmStubIndex => "algorithm_stub_index",
            GeneratorKind::ScheduleStub => "schedule_stub",
            GeneratorKind::ExecuteStepStub => "execute_step_stub",
            GeneratorKind::StateSpace => "state_space",
            GeneratorKind::TermSet => "term_set",
            GeneratorKind::TermSetIndex => "term_set_index",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_kinds_carry_function_type() {
        assert_eq!(
            GeneratorKind::PayoffStub.strategy(),
            Strategy::FunctionStubs(FunctionType::Pof)
        );
        assert_eq!(
            GeneratorKind::StateTransitionStub.strategy(),
            Strategy::FunctionStubs(FunctionType::Stf)
        );
    }

    #[test]
    fn test_template_names_are_unique() {
        let mut names: Vec<_> = GeneratorKind::ALL.iter().map(|k| k.template_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), GeneratorKind::ALL.len());
    }
}
