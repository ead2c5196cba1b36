//! Contracts: taxonomy entries paired with their resolved term sets

use std::slice;

use crate::entity::{Entity, EntityInfo};
use crate::taxonomy::{ContractTypeInfo, EXPERIMENTAL_CONTRACT_TYPE};
use crate::term::TermSet;
use crate::{CoreError, ScalarType};

/// A contract type together with the terms applicable to it
#[derive(Debug, Clone)]
pub struct Contract {
    pub term_set: TermSet,
    pub type_info: ContractTypeInfo,
}

impl Entity for Contract {
    fn info(&self) -> &EntityInfo {
        &self.type_info.info
    }
}

impl PartialEq for Contract {
    fn eq(&self, other: &Self) -> bool {
        self.acronym() == other.acronym() && self.identifier() == other.identifier()
    }
}

impl Eq for Contract {}

impl Contract {
    /// Whether any applicable term is declared with `scalar_type`
    pub fn uses_scalar_type(&self, scalar_type: ScalarType) -> bool {
        self.term_set.iter().any(|t| t.scalar_type == scalar_type)
    }
}

/// Set of contracts, ordered by acronym.
///
/// The experimental placeholder type is dropped on construction.
#[derive(Debug, Clone, Default)]
pub struct ContractSet {
    items: Vec<Contract>,
}

impl ContractSet {
    pub fn new(items: Vec<Contract>) -> Self {
        let mut items: Vec<Contract> = items
            .into_iter()
            .filter(|c| c.acronym() != EXPERIMENTAL_CONTRACT_TYPE)
            .collect();
        items.sort_by(|a, b| a.acronym().cmp(b.acronym()));
        Self { items }
    }

    pub fn iter(&self) -> slice::Iter<'_, Contract> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get_contract(&self, identifier: &str) -> Option<&Contract> {
        self.items.iter().find(|c| c.identifier() == identifier)
    }

    pub fn require_contract(&self, identifier: &str) -> Result<&Contract, CoreError> {
        self.get_contract(identifier)
            .ok_or_else(|| CoreError::ContractNotFound(identifier.to_string()))
    }
}

impl<'a> IntoIterator for &'a ContractSet {
    type Item = &'a Contract;
    type IntoIter = slice::Iter<'a, Contract>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
