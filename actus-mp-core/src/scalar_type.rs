//! Scalar field types

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Suffix marking an array declaration, e.g. `Real[]`
const ARRAY_SUFFIX: &str = "[]";

/// Set of scalar field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScalarType {
    ContractReference,
    Cycle,
    Enum,
    Period,
    Real,
    Timestamp,
    Unknown,
    Varchar,
}

impl ScalarType {
    pub const ALL: [ScalarType; 8] = [
        ScalarType::ContractReference,
        ScalarType::Cycle,
        ScalarType::Enum,
        ScalarType::Period,
        ScalarType::Real,
        ScalarType::Timestamp,
        ScalarType::Unknown,
        ScalarType::Varchar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarType::ContractReference => "ContractReference",
            ScalarType::Cycle => "Cycle",
            ScalarType::Enum => "Enum",
            ScalarType::Period => "Period",
            ScalarType::Real => "Real",
            ScalarType::Timestamp => "Timestamp",
            ScalarType::Unknown => "Unknown",
            ScalarType::Varchar => "Varchar",
        }
    }

    /// Parses a declared field type such as `Timestamp` or `Real[]`.
    ///
    /// Returns the scalar type and whether the declaration is an array.
    pub fn from_declaration(declared: &str) -> Result<(ScalarType, bool), CoreError> {
        match declared.strip_suffix(ARRAY_SUFFIX) {
            Some(scalar) => Ok((scalar.parse()?, true)),
            None => Ok((declared.parse()?, false)),
        }
    }
}

impl FromStr for ScalarType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScalarType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::UnknownScalarType(s.to_string()))
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Timestamp[]", ScalarType::Timestamp, true)]
    #[case("Real[]", ScalarType::Real, true)]
    #[case("Enum", ScalarType::Enum, false)]
    #[case("ContractReference", ScalarType::ContractReference, false)]
    fn test_declaration(#[case] declared: &str, #[case] scalar_type: ScalarType, #[case] is_array: bool) {
        assert_eq!(ScalarType::from_declaration(declared).unwrap(), (scalar_type, is_array));
    }

    #[test]
    fn test_unknown_declaration_fails() {
        assert_eq!(
            ScalarType::from_declaration("Decimal"),
            Err(CoreError::UnknownScalarType("Decimal".to_string()))
        );
    }
}
