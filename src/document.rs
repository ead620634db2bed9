//! The serialized form of an [`Ontology`](crate::Ontology).
//!
//! Entities refer to each other by identifier only. Lists are written in
//! sorted order and empty collections are omitted, so that encoding the same
//! registry twice gives byte-identical output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::keyed::keyed_serde;
use crate::{ClassPattern, Equivalent, OntologyMappings, PropertyPattern, Relation, Segment};

/// Top-level ontology document.
///
/// Mapping tables are keyed by entity identifier and ordered by it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "", remote = "Self")]
pub struct OntologyDocument<M: OntologyMappings> {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<ClassDocument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyDocument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub individuals: Vec<IndividualDocument>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub class_mapping: BTreeMap<String, M::Class>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub property_mapping: BTreeMap<String, M::Property>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub individual_mapping: BTreeMap<String, M::Individual>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_property: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_property: Option<String>,
}

keyed_serde!(OntologyDocument<M: OntologyMappings>, "an ontology document object");

impl<M: OntologyMappings> Default for OntologyDocument<M> {
    fn default() -> Self {
        Self {
            classes: Vec::new(),
            properties: Vec::new(),
            individuals: Vec::new(),
            class_mapping: BTreeMap::new(),
            property_mapping: BTreeMap::new(),
            individual_mapping: BTreeMap::new(),
            person_class: None,
            instance_property: None,
            label_property: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct ClassDocument {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub superclasses: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub equivalents: Vec<EquivalentDocument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<ClassPattern>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relations: Vec<Relation>,
}

keyed_serde!(ClassDocument, "a class object");

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct PropertyDocument {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub superproperties: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub symmetric: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub transitive: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub equivalents: Vec<EquivalentDocument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<PropertyPattern>,
}

keyed_serde!(PropertyDocument, "a property object");

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct IndividualDocument {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
}

keyed_serde!(IndividualDocument, "an individual object");

/// An [`Equivalent`] on the wire: exactly one of `segments`, `or` or `and`
/// is written. When reading, the first present key in that order wins.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct EquivalentDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<SegmentDocument>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub or: Option<Vec<EquivalentDocument>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub and: Option<Vec<EquivalentDocument>>,
}

keyed_serde!(EquivalentDocument, "an equivalent object");

impl EquivalentDocument {
    pub const KEYS: [&'static str; 3] = ["segments", "or", "and"];
}

/// A [`Segment`] on the wire: exactly one of `incoming`, `outgoing` or
/// `individual` is written.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct SegmentDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incoming: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outgoing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub individual: Option<String>,
}

keyed_serde!(SegmentDocument, "a segment object");

impl SegmentDocument {
    pub const KEYS: [&'static str; 3] = ["incoming", "outgoing", "individual"];
}

impl From<&Equivalent> for EquivalentDocument {
    fn from(equivalent: &Equivalent) -> Self {
        match equivalent {
            Equivalent::Segments(segments) => EquivalentDocument {
                segments: Some(segments.iter().map(SegmentDocument::from).collect()),
                ..Default::default()
            },
            Equivalent::Or(equivalents) => EquivalentDocument {
                or: Some(equivalents.iter().map(EquivalentDocument::from).collect()),
                ..Default::default()
            },
            Equivalent::And(equivalents) => EquivalentDocument {
                and: Some(equivalents.iter().map(EquivalentDocument::from).collect()),
                ..Default::default()
            },
        }
    }
}

impl From<&Segment> for SegmentDocument {
    fn from(segment: &Segment) -> Self {
        match segment {
            Segment::Incoming(property) => SegmentDocument {
                incoming: Some(property.clone()),
                ..Default::default()
            },
            Segment::Outgoing(property) => SegmentDocument {
                outgoing: Some(property.clone()),
                ..Default::default()
            },
            Segment::Individual(individual) => SegmentDocument {
                individual: Some(individual.clone()),
                ..Default::default()
            },
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
