//! Contract type taxonomy

use std::fmt;
use std::slice;
use std::str::FromStr;

use crate::entity::{impl_entity, Entity, EntityInfo};
use crate::CoreError;

/// Acronym of the experimental placeholder type that never becomes a contract
pub const EXPERIMENTAL_CONTRACT_TYPE: &str = "EXOTi";

/// Current publication status of a contract type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublicationStatus {
    Implemented,
    Planned,
    Released,
    #[default]
    Unknown,
}

impl PublicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublicationStatus::Implemented => "Implemented",
            PublicationStatus::Planned => "Planned",
            PublicationStatus::Released => "Released",
            PublicationStatus::Unknown => "Unknown",
        }
    }
}

impl FromStr for PublicationStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Implemented" => Ok(PublicationStatus::Implemented),
            "Planned" => Ok(PublicationStatus::Planned),
            "Released" => Ok(PublicationStatus::Released),
            "Unknown" => Ok(PublicationStatus::Unknown),
            other => Err(CoreError::UnknownPublicationStatus(other.to_string())),
        }
    }
}

impl fmt::Display for PublicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node within the taxonomy describing one type of financial contract
#[derive(Debug, Clone)]
pub struct ContractTypeInfo {
    pub info: EntityInfo,
    /// Economic classification, e.g. `Fixed Income`
    pub classification: String,
    /// Economic coverage, e.g. `classical level payment mortgages`
    pub coverage: Option<String>,
    /// Instrument family, e.g. `Basic`
    pub family: String,
    pub publication_status: PublicationStatus,
}

impl_entity!(ContractTypeInfo, info);

impl ContractTypeInfo {
    pub fn is_experimental(&self) -> bool {
        self.acronym() == EXPERIMENTAL_CONTRACT_TYPE
    }
}

/// Every declared contract type, ordered by acronym
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    items: Vec<ContractTypeInfo>,
}

impl Taxonomy {
    pub fn new(mut items: Vec<ContractTypeInfo>) -> Self {
        items.sort_by(|a, b| a.acronym().cmp(b.acronym()));
        Self { items }
    }

    pub fn iter(&self) -> slice::Iter<'_, ContractTypeInfo> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get_by_identifier(&self, identifier: &str) -> Option<&ContractTypeInfo> {
        self.items.iter().find(|i| i.identifier() == identifier)
    }
}

impl<'a> IntoIterator for &'a Taxonomy {
    type Item = &'a ContractTypeInfo;
    type IntoIter = slice::Iter<'a, ContractTypeInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
