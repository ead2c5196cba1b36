//! Object model of the ACTUS dictionary
//!
//! Entities (terms, enumerations, states, taxonomy entries), the ordered
//! collections over them, applicability resolution and the `Dictionary`
//! aggregate produced by the compiler and consumed by the code generators.

pub mod applicability;
pub mod contract;
pub mod diagnostics;
pub mod dictionary;
pub mod entity;
pub mod enumeration;
pub mod error;
pub mod funcs;
pub mod scalar_type;
pub mod state;
pub mod taxonomy;
pub mod term;

pub use applicability::{ApplicableTermInfo, ApplicableTermInfoSet};
pub use contract::{Contract, ContractSet};
pub use diagnostics::DataQualityWarning;
pub use dictionary::Dictionary;
pub use entity::{Entity, EntityInfo, EntitySet};
pub use enumeration::{Enum, EnumMember};
pub use error::CoreError;
pub use funcs::FunctionType;
pub use scalar_type::ScalarType;
pub use state::{State, StateSet};
pub use taxonomy::{ContractTypeInfo, PublicationStatus, Taxonomy, EXPERIMENTAL_CONTRACT_TYPE};
pub use term::{AllowedValue, Term, TermDefault, TermSet};
