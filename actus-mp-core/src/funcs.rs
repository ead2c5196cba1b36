//! Algorithm function categories of the reference implementation

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Category of a per-event contract algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FunctionType {
    /// Payoff function
    Pof,
    /// State transition function
    Stf,
}

impl FunctionType {
    pub const ALL: [FunctionType; 2] = [FunctionType::Pof, FunctionType::Stf];

    /// Token used in reference implementation file names, e.g. `POF`
    pub fn token(&self) -> &'static str {
        match self {
            FunctionType::Pof => "POF",
            FunctionType::Stf => "STF",
        }
    }
}

impl FromStr for FunctionType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FunctionType::ALL
            .into_iter()
            .find(|f| f.token() == s)
            .ok_or_else(|| CoreError::UnknownFunctionType(s.to_string()))
    }
}

impl fmt::Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
