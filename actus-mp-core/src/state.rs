//! Contract lifecycle states

use crate::entity::{impl_entity, EntityInfo, EntitySet};
use crate::term::AllowedValue;
use crate::{CoreError, ScalarType};

/// A state field assigned during contract execution
#[derive(Debug, Clone)]
pub struct State {
    pub info: EntityInfo,
    /// Constraint over the set of allowed values
    pub allowed_values: Vec<AllowedValue>,
    pub is_array: bool,
    pub scalar_type: ScalarType,
}

impl_entity!(State, info);

impl State {
    /// Description with line breaks removed, for single-line doc comments
    pub fn short_description(&self) -> String {
        self.info.description.replace(['\n', '\r'], "")
    }
}

/// Set of states, ordered by identifier
pub type StateSet = EntitySet<State>;

impl EntitySet<State> {
    pub fn get_state(&self, identifier: &str) -> Option<&State> {
        self.get(identifier)
    }

    pub fn require_state(&self, identifier: &str) -> Result<&State, CoreError> {
        self.get_state(identifier)
            .ok_or_else(|| CoreError::StateNotFound(identifier.to_string()))
    }
}
