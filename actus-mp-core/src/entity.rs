//! Base entity record and the identifier-ordered collection built over it

use std::slice;

/// Naming information shared by every uniquely identifiable dictionary entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityInfo {
    /// A short identifier, e.g. `SCF`
    pub acronym: String,
    /// A long text description
    pub description: String,
    /// Canonical identifier within enumeration scope, e.g. `contractRole`
    pub identifier: String,
    /// Formal name within enumeration scope
    pub name: String,
}

impl EntityInfo {
    pub fn new(
        acronym: impl Into<String>,
        description: impl Into<String>,
        identifier: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            acronym: acronym.into(),
            description: description.into(),
            identifier: identifier.into(),
            name: name.into(),
        }
    }
}

/// A uniquely identifiable entity within the type system
pub trait Entity {
    fn info(&self) -> &EntityInfo;

    fn acronym(&self) -> &str {
        &self.info().acronym
    }

    fn description(&self) -> &str {
        &self.info().description
    }

    fn identifier(&self) -> &str {
        &self.info().identifier
    }

    fn name(&self) -> &str {
        &self.info().name
    }

    /// Case-insensitive match of `token` against acronym or identifier
    fn is_match(&self, token: &str) -> bool {
        let info = self.info();
        info.acronym.to_uppercase() == token.to_uppercase()
            || info.identifier.to_uppercase() == token.to_uppercase()
    }
}

/// Implements [`Entity`] plus identity-based equality and hashing.
///
/// Identity is (type, identifier, acronym); the type component comes for free
/// because each impl is per concrete type.
macro_rules! impl_entity {
    ($ty:ty, $($field:ident).+) => {
        impl $crate::entity::Entity for $ty {
            fn info(&self) -> &$crate::entity::EntityInfo {
                &self.$($field).+
            }
        }

        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                use $crate::entity::Entity;
                self.identifier() == other.identifier() && self.acronym() == other.acronym()
            }
        }

        impl Eq for $ty {}

        impl std::hash::Hash for $ty {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                use $crate::entity::Entity;
                self.identifier().hash(state);
                self.acronym().hash(state);
            }
        }
    };
}

pub(crate) use impl_entity;

/// Collection of entities iterated in identifier order.
///
/// Sorting happens once at construction; the set is never mutated afterwards.
#[derive(Debug, Clone)]
pub struct EntitySet<T> {
    items: Vec<T>,
}

impl<T: Entity> EntitySet<T> {
    pub fn new(mut items: Vec<T>) -> Self {
        items.sort_by(|a, b| a.identifier().cmp(b.identifier()));
        Self { items }
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First item whose identifier equals `identifier`
    pub fn get(&self, identifier: &str) -> Option<&T> {
        self.items.iter().find(|i| i.identifier() == identifier)
    }
}

impl<T: Entity> Default for EntitySet<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<'a, T> IntoIterator for &'a EntitySet<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
