//! The compiled dictionary: aggregate root of the object model

use chrono::NaiveDateTime;

use crate::applicability::ApplicableTermInfoSet;
use crate::contract::ContractSet;
use crate::entity::Entity;
use crate::enumeration::Enum;
use crate::state::StateSet;
use crate::taxonomy::Taxonomy;
use crate::term::TermSet;

/// Information set by which the standard is declared
#[derive(Debug, Clone)]
pub struct Dictionary {
    pub applicability: ApplicableTermInfoSet,
    pub contract_event_type: Enum,
    pub contract_performance: Enum,
    pub contract_role: Enum,
    pub contract_reference_role: Enum,
    pub contract_reference_type: Enum,
    pub contract_set: ContractSet,
    pub contract_type: Enum,
    pub state_set: StateSet,
    pub taxonomy: Taxonomy,
    pub term_set: TermSet,
    /// Semantic version, e.g. `1.1`
    pub version: String,
    pub version_date: NaiveDateTime,
}

impl Dictionary {
    /// Every enumeration emitted as a standalone type, ordered by identifier.
    ///
    /// Enum-typed terms plus the reference-role, reference-type and event-type
    /// enumerations.
    pub fn enum_set(&self) -> Vec<Enum> {
        let mut targets: Vec<Enum> = self.term_set.iter().filter_map(|t| t.as_enum()).collect();
        targets.push(self.contract_event_type.clone());
        targets.push(self.contract_reference_role.clone());
        targets.push(self.contract_reference_type.clone());
        targets.sort_by(|a, b| a.identifier().cmp(b.identifier()));
        targets
    }
}
