//! Compiler for ACTUS dictionary documents
//!
//! This crate turns the raw dictionary document into the object model of
//! `actus-mp-core`: schema-validated decoding, normalization passes, then
//! factory construction.

pub mod compiler;
pub mod error;
pub mod factory;
pub mod normalize;
pub mod raw;

pub use compiler::DictionaryCompiler;
pub use error::CompilerError;
pub use factory::{build_dictionary, Compilation};
pub use normalize::normalize;
pub use raw::RawDictionary;
