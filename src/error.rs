//! Errors raised while building and decoding ontologies.
use std::collections::BTreeSet;

use thiserror::Error;

use crate::EntityKind;

/// Error raised when a definition call would break a registry invariant.
///
/// These indicate a bug in the code authoring the ontology rather than bad
/// external input. The registry is left unchanged whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// The identifier is already used by an entity of some kind.
    #[error(
        "invalid definition: {identifier}: already defined as {}",
        .existing.with_article()
    )]
    DuplicateIdentifier {
        identifier: String,
        existing: EntityKind,
    },

    /// A builder call referenced an entity that is not defined.
    #[error("undefined {kind}: {identifier}")]
    Undefined { kind: EntityKind, identifier: String },

    /// The external value is already bound to another entity.
    #[error(
        "invalid mapping: {mapped}: already mapped to {}: {identifier}",
        .kind.with_article()
    )]
    MappingInUse {
        mapped: String,
        kind: EntityKind,
        identifier: String,
    },

    /// The entity is already bound to a different external value.
    #[error("invalid mapping: {kind} {identifier} already mapped to {existing}")]
    AlreadyMapped {
        kind: EntityKind,
        identifier: String,
        existing: String,
    },

    /// A pattern without a statically known length was attached.
    #[error("invalid pattern for {identifier}: pattern does not have a defined length")]
    UndefinedPatternLength { identifier: String },
}

/// Error raised while decoding an ontology document.
///
/// Structural errors abort the first pass as soon as they are found.
/// Referential errors are reported once, after the whole document has been
/// read, and carry every unresolved identifier of their kind.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Decoding was attempted without an installed ontology binding.
    #[error("the decoder was not prepared; use DecodeContext::prepared")]
    NotPrepared,

    /// An object lacks a property its variant requires.
    #[error("the object is missing the required property: {0}")]
    MissingProperty(&'static str),

    /// A tagged object carries none of the keys naming its variants.
    #[error(
        "the object is missing one of the required properties: {}",
        .0.join(", ")
    )]
    MissingPropertyOneOf(Vec<&'static str>),

    #[error("the ontology references the undefined classes: {}", join(.0))]
    UndefinedClasses(BTreeSet<String>),

    #[error("the ontology references the undefined properties: {}", join(.0))]
    UndefinedProperties(BTreeSet<String>),

    #[error("the ontology references the undefined individuals: {}", join(.0))]
    UndefinedIndividuals(BTreeSet<String>),

    /// The document defines an identifier more than once.
    #[error(
        "the ontology defines {identifier} more than once, first as {}",
        .existing.with_article()
    )]
    DuplicateIdentifier {
        identifier: String,
        existing: EntityKind,
    },

    /// A mapping table binds one external value to two identifiers.
    #[error("the {kind} mapping binds {mapped} to both {first} and {second}")]
    ConflictingMapping {
        kind: EntityKind,
        mapped: String,
        first: String,
        second: String,
    },

    /// Installing a decoded entity broke a registry invariant.
    #[error("invalid ontology: {0}")]
    Definition(#[from] DefinitionError),

    /// The underlying document could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn join(identifiers: &BTreeSet<String>) -> String {
    identifiers
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
