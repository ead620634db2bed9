//! Question Ontology: a registry of classes, properties and individuals for
//! question answering, with validated, deterministic serialization.
//!
//! An [`Ontology`] holds named entities in a single identifier namespace and
//! binds them to an external knowledge base through bijective mapping
//! tables. Entities carry equivalence expressions, which define them in terms
//! of paths through the graph, and linguistic patterns describing how they
//! show up in text.
//!
//! # Basic Usage
//!
//! ```rust
//! use question_ontology::{
//!     ClassPattern, Equivalent, Ontology, Segment, Tag, WikidataMappings,
//!     WikidataPropertyMapping, pattern, wikidata,
//! };
//!
//! let mut ontology = Ontology::<WikidataMappings>::new();
//!
//! ontology
//!     .define_class("Person")
//!     .unwrap()
//!     .map(wikidata::HUMAN)
//!     .unwrap()
//!     .has_pattern(ClassPattern::named(pattern("person", Tag::AnyNoun)))
//!     .unwrap();
//! ontology
//!     .define_property("hasGender")
//!     .unwrap()
//!     .map(WikidataPropertyMapping::property(wikidata::SEX_OR_GENDER))
//!     .unwrap();
//! ontology
//!     .define_individual("female")
//!     .unwrap()
//!     .map(wikidata::FEMALE)
//!     .unwrap();
//! ontology
//!     .define_class("Woman")
//!     .unwrap()
//!     .is_sub_class_of(["Person"])
//!     .unwrap()
//!     .has_equivalent(Equivalent::segments([
//!         Segment::outgoing("hasGender"),
//!         Segment::individual("female"),
//!     ]))
//!     .unwrap();
//! ontology.set_person_class("Person").unwrap();
//!
//! // Encoding is deterministic, and decoding validates every reference.
//! let json = ontology.to_json_string().unwrap();
//! let decoded = Ontology::<WikidataMappings>::from_json_str(&json).unwrap();
//! assert_eq!(decoded, ontology);
//! assert_eq!(decoded.to_json_string().unwrap(), json);
//! ```
//!
//! # Decoding
//!
//! Documents are decoded in two passes through a [`DecodeContext`]: entities
//! may reference ones defined later in the same document, and every
//! unresolved identifier of a kind is reported together.
//!
//! ```rust
//! use question_ontology::{DecodeError, Ontology, WikidataMappings};
//!
//! let error = Ontology::<WikidataMappings>::from_json_str(
//!     r#"{"individuals": [{"identifier": "paris", "types": ["City", "Capital"]}]}"#,
//! )
//! .unwrap_err();
//! assert_eq!(
//!     error.to_string(),
//!     "the ontology references the undefined classes: Capital, City"
//! );
//! # assert!(matches!(error, DecodeError::UndefinedClasses(_)));
//! ```
//!
//! # Directory Loading Feature
//!
//! When the `directory-loading` feature is enabled (default), ontology
//! documents can be read from and written to JSON files, and loaded from a
//! list of search directories (by default `~/.question-ontology/`). See
//! [`DirectoryConfig`].
//!
//! To disable at compile time:
//!
//! ```toml
//! [dependencies]
//! question-ontology = { version = "0.4", default-features = false }
//! ```

mod entity_kind;
pub use entity_kind::EntityKind;

mod error;
pub use error::{DecodeError, DefinitionError};

mod keyed;

mod two_way_map;
pub use two_way_map::{Conflict, TwoWayMap};

mod equivalent;
pub use equivalent::{Equivalent, Segment};

mod pattern;
pub use pattern::{Condition, HasDefinedLength, LabelOp, Pattern, Tag, pattern};

mod entity_pattern;
pub use entity_pattern::{ClassPattern, Comparison, FilterPattern, Order, PropertyPattern};

mod relation;
pub use relation::{Direction, Relation};

mod mapping;
pub use mapping::{OntologyMapping, OntologyMappings};

mod entity;
pub use entity::{Class, Individual, Property};

mod ontology;
pub use ontology::Ontology;

mod builder;
pub use builder::{ClassBuilder, IndividualBuilder, PropertyBuilder};

mod document;
pub use document::{
    ClassDocument, EquivalentDocument, IndividualDocument, OntologyDocument, PropertyDocument,
    SegmentDocument,
};

mod codec;
pub use codec::{DecodeContext, ReferenceLedger};

pub mod wikidata;
pub use wikidata::{
    WikidataError, WikidataItem, WikidataMappings, WikidataOperation, WikidataProperty,
    WikidataPropertyMapping,
};

#[cfg(feature = "directory-loading")]
mod directory_loader;

#[cfg(feature = "directory-loading")]
pub use directory_loader::{
    DirectoryConfig, LoadError, LoadResult, load_from_config, load_from_directory,
    load_from_file, save_to_file,
};

#[doc(hidden)]
pub use paste::paste;
