use std::fmt::Debug;
use std::hash::Hash;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// An identifier in an external knowledge base that an ontology entity can
/// be bound to.
///
/// Mapped values are opaque to the registry. It only needs to compare them
/// for collisions, order them for stable output, and pass them through the
/// document unchanged.
pub trait OntologyMapping:
    Clone + Debug + Eq + Hash + Ord + Serialize + DeserializeOwned + 'static
{
}

impl<T> OntologyMapping for T where
    T: Clone + Debug + Eq + Hash + Ord + Serialize + DeserializeOwned + 'static
{
}

/// The external mapping types used for each kind of entity.
///
/// Kinds may share a mapping type (a knowledge base may use the same kind of
/// item for classes and individuals); a value of a shared type can then only
/// be bound to one entity across all of those kinds.
pub trait OntologyMappings {
    type Class: OntologyMapping;
    type Property: OntologyMapping;
    type Individual: OntologyMapping;
}
