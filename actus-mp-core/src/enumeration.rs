//! Enumerated types and their members

use std::slice;

use crate::entity::{impl_entity, Entity, EntityInfo};

/// Member of an enumerated type
#[derive(Debug, Clone)]
pub struct EnumMember {
    pub info: EntityInfo,
    /// Whether the member is the enumeration scope default
    pub is_default: Option<bool>,
    /// Ordinal position within enumeration scope
    pub option: i64,
}

impl_entity!(EnumMember, info);

impl EnumMember {
    pub fn new(info: EntityInfo, option: i64) -> Self {
        Self {
            info,
            is_default: None,
            option,
        }
    }
}

/// An enumerated type enclosing a constrained set of members
#[derive(Debug, Clone)]
pub struct Enum {
    pub info: EntityInfo,
    members: Vec<EnumMember>,
}

impl_entity!(Enum, info);

impl Enum {
    /// Members are held in option order regardless of declaration order
    pub fn new(info: EntityInfo, mut members: Vec<EnumMember>) -> Self {
        members.sort_by_key(|m| m.option);
        Self { info, members }
    }

    pub fn members(&self) -> slice::Iter<'_, EnumMember> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// First member matched case-insensitively by acronym or identifier
    pub fn find_member(&self, token: &str) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.is_match(token))
    }
}

impl<'a> IntoIterator for &'a Enum {
    type Item = &'a EnumMember;
    type IntoIter = slice::Iter<'a, EnumMember>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}
