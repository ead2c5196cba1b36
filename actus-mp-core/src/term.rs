//! Contractual terms

use serde_json::Value;

use crate::entity::{impl_entity, Entity, EntityInfo, EntitySet};
use crate::enumeration::{Enum, EnumMember};
use crate::{CoreError, ScalarType};

/// A value a term or state declares as allowed
#[derive(Debug, Clone)]
pub enum AllowedValue {
    /// Member of an enumerated term
    Member(EnumMember),
    /// Free-form constraint, e.g. `ISO8601 Datetime`
    Scalar(Value),
}

impl AllowedValue {
    pub fn as_member(&self) -> Option<&EnumMember> {
        match self {
            AllowedValue::Member(m) => Some(m),
            AllowedValue::Scalar(_) => None,
        }
    }
}

/// Default value of a term, resolved against its scalar type
#[derive(Debug, Clone, PartialEq)]
pub enum TermDefault {
    /// Upper-cased member acronym
    Enum(String),
    Real(f64),
    /// Passed through unmapped
    Text(String),
}

/// A contractual term associated with one or more contract types
#[derive(Debug, Clone)]
pub struct Term {
    pub info: EntityInfo,
    /// Declared allowed values, in document order
    pub allowed_values: Vec<AllowedValue>,
    pub default: Option<TermDefault>,
    /// Identifier of the associated group, e.g. `Interest`
    pub group_id: String,
    pub is_array: bool,
    pub scalar_type: ScalarType,
}

impl_entity!(Term, info);

impl Term {
    /// Cycle and period terms are structural and never carry a literal default
    pub fn has_default(&self) -> bool {
        match self.scalar_type {
            ScalarType::Cycle | ScalarType::Period => false,
            _ => self.default.is_some(),
        }
    }

    pub fn is_enum(&self) -> bool {
        self.scalar_type == ScalarType::Enum
    }

    /// Enum members in declaration order; empty for non-enum terms
    pub fn members(&self) -> impl Iterator<Item = &EnumMember> {
        let is_enum = self.is_enum();
        self.allowed_values
            .iter()
            .filter(move |_| is_enum)
            .filter_map(AllowedValue::as_member)
    }

    /// Views an enum term as a standalone enumeration
    pub fn as_enum(&self) -> Option<Enum> {
        if !self.is_enum() {
            return None;
        }
        Some(Enum::new(self.info.clone(), self.members().cloned().collect()))
    }
}

/// Set of terms, ordered by identifier
pub type TermSet = EntitySet<Term>;

impl EntitySet<Term> {
    pub fn get_term(&self, identifier: &str) -> Option<&Term> {
        self.get(identifier)
    }

    pub fn require_term(&self, identifier: &str) -> Result<&Term, CoreError> {
        self.get_term(identifier)
            .ok_or_else(|| CoreError::TermNotFound(identifier.to_string()))
    }

    pub fn get_by_group_id(&self, group_id: &str) -> TermSet {
        TermSet::new(self.iter().filter(|t| t.group_id == group_id).cloned().collect())
    }

    /// Sub-set of terms that are enumerations
    pub fn enum_set(&self) -> TermSet {
        TermSet::new(self.iter().filter(|t| t.is_enum()).cloned().collect())
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|t| t.identifier())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(identifier: &str, group_id: &str, scalar_type: ScalarType, default: Option<TermDefault>) -> Term {
        Term {
            info: EntityInfo::new(identifier.to_uppercase(), "", identifier, identifier),
            allowed_values: Vec::new(),
            default,
            group_id: group_id.to_string(),
            is_array: false,
            scalar_type,
        }
    }

    #[test]
    fn test_cycle_and_period_never_have_defaults() {
        let cycle = term("cycleOfInterestPayment", "Interest", ScalarType::Cycle, Some(TermDefault::Text("P1YL1".into())));
        let period = term("gracePeriod", "Notional", ScalarType::Period, Some(TermDefault::Text("P0D".into())));
        let real = term("nominalInterestRate", "Interest", ScalarType::Real, Some(TermDefault::Real(0.0)));
        assert!(!cycle.has_default());
        assert!(!period.has_default());
        assert!(real.has_default());
    }

    #[test]
    fn test_group_and_enum_selection() {
        let mut role = term("contractRole", "Contract identification", ScalarType::Enum, None);
        role.allowed_values = vec![
            AllowedValue::Member(EnumMember::new(EntityInfo::new("RPL", "", "realPositionLiability", "RPL"), 1)),
            AllowedValue::Member(EnumMember::new(EntityInfo::new("RPA", "", "realPositionAsset", "RPA"), 0)),
        ];
        let set = TermSet::new(vec![
            term("nominalInterestRate", "Interest", ScalarType::Real, None),
            role,
            term("accruedInterest", "Interest", ScalarType::Real, None),
        ]);

        let interest: Vec<_> = set.get_by_group_id("Interest").identifiers().map(String::from).collect();
        assert_eq!(interest, vec!["accruedInterest", "nominalInterestRate"]);

        let enums = set.enum_set();
        assert_eq!(enums.len(), 1);

        let as_enum = enums.require_term("contractRole").unwrap().as_enum().unwrap();
        let ordered: Vec<_> = as_enum.members().map(|m| m.acronym()).collect();
        assert_eq!(ordered, vec!["RPA", "RPL"]);
    }

    #[test]
    fn test_require_term_miss_is_an_error() {
        let set = TermSet::new(Vec::new());
        assert_eq!(
            set.require_term("notionalPrincipal").unwrap_err(),
            CoreError::TermNotFound("notionalPrincipal".to_string())
        );
    }
}
