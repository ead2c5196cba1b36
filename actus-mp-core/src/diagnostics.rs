//! Non-fatal data-quality findings

use std::fmt;

/// A data-quality anomaly that does not stop compilation or generation
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum DataQualityWarning {
    /// An enum default matched no member; the first declared member is used
    UnmatchedEnumDefault {
        term_id: String,
        default: String,
        fallback: String,
    },
    /// A numeric default could not be parsed; zero is used
    UnparsableReal { term_id: String, value: String },
}

impl DataQualityWarning {
    pub fn term_id(&self) -> &str {
        match self {
            DataQualityWarning::UnmatchedEnumDefault { term_id, .. } => term_id,
            DataQualityWarning::UnparsableReal { term_id, .. } => term_id,
        }
    }
}

impl fmt::Display for DataQualityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataQualityWarning::UnmatchedEnumDefault {
                term_id,
                default,
                fallback,
            } => write!(
                f,
                "enum default '{}' of term '{}' matches no member, reverting to '{}'",
                default, term_id, fallback
            ),
            DataQualityWarning::UnparsableReal { term_id, value } => write!(
                f,
                "numeric default '{}' of term '{}' is not a number, reverting to 0",
                value, term_id
            ),
        }
    }
}
