//! Multi-language code generation from a compiled ACTUS dictionary
//!
//! Dispatches each generator kind over the dictionary, resolves per-language
//! output paths and literals, renders through embedded handlebars templates
//! and writes the results.

pub mod context;
pub mod convertor;
pub mod discovery;
pub mod enums;
pub mod error;
pub mod generator;
pub mod paths;
pub mod templates;
pub mod writer;

pub use discovery::{discover_function_stubs, FunctionStub};
pub use enums::{EntitySource, GeneratorKind, Strategy, TargetLanguage};
pub use error::CodegenError;
pub use generator::{Dispatch, Dispatcher, Unit, UnitEntity, UnitFailure};
pub use templates::TemplateCache;
pub use writer::{
    check_preconditions, generate_all, write, FileSink, FsSink, MemorySink, RunReport,
};
