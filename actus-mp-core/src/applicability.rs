//! Which terms apply to which contract types

use std::slice;

use crate::entity::Entity;
use crate::taxonomy::ContractTypeInfo;

/// One applicability row: a term that applies to a contract type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicableTermInfo {
    pub contract_type_id: String,
    pub term_id: String,
    /// Upstream processing directive associated with the term, e.g. `NN`
    pub term_instruction: String,
}

impl ApplicableTermInfo {
    pub fn sort_key(&self) -> String {
        format!("{}|{}", self.contract_type_id, self.term_id)
    }
}

/// Global set of applicability rows, ordered by `contract_type_id|term_id`
#[derive(Debug, Clone, Default)]
pub struct ApplicableTermInfoSet {
    items: Vec<ApplicableTermInfo>,
}

impl ApplicableTermInfoSet {
    pub fn new(mut items: Vec<ApplicableTermInfo>) -> Self {
        items.sort_by_cached_key(ApplicableTermInfo::sort_key);
        Self { items }
    }

    pub fn iter(&self) -> slice::Iter<'_, ApplicableTermInfo> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Rows applicable to `type_info`, in sort-key order
    pub fn get_applicable_termset<'a>(
        &'a self,
        type_info: &'a ContractTypeInfo,
    ) -> impl Iterator<Item = &'a ApplicableTermInfo> + 'a {
        self.items
            .iter()
            .filter(move |i| i.contract_type_id == type_info.identifier())
    }

    /// Distinct contract type identifiers referenced by the set, in order
    pub fn contract_type_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.items.iter().map(|i| i.contract_type_id.as_str()).collect();
        ids.dedup();
        ids
    }
}

impl<'a> IntoIterator for &'a ApplicableTermInfoSet {
    type Item = &'a ApplicableTermInfo;
    type IntoIter = slice::Iter<'a, ApplicableTermInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
