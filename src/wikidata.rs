//! Bindings of ontology entities to Wikidata.
//!
//! Classes and individuals map to Wikidata items (`Q…`), properties to direct
//! Wikidata properties (`P…`), to a derived operation, or to the item label.
//! On the wire every item and property is written as its entity URL:
//!
//! ```json
//! {"identifier": "http://www.wikidata.org/entity/Q5"}
//! ```
//!
//! Frequently used items and properties are available as constants, declared
//! with [`const_wikidata_item!`](crate::const_wikidata_item) and
//! [`const_wikidata_property!`](crate::const_wikidata_property).

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::keyed::keyed_serde;
use crate::{DecodeError, OntologyMappings};

pub const ITEM_PREFIX: &str = "http://www.wikidata.org/entity/Q";
pub const PROPERTY_PREFIX: &str = "http://www.wikidata.org/prop/direct/P";

/// Error raised when a URL does not name a Wikidata item or property.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WikidataError {
    #[error("not a Wikidata item URL: {0}")]
    InvalidItem(String),
    #[error("not a Wikidata property URL: {0}")]
    InvalidProperty(String),
}

/// The wire form shared by items and properties.
#[derive(Serialize, Deserialize)]
#[serde(remote = "Self")]
struct EntityReference {
    identifier: String,
}

keyed_serde!(EntityReference, "an entity reference object");

fn parse_numeric_id(url: &str, prefix: &str) -> Option<u64> {
    url.strip_prefix(prefix)
        .filter(|id| id.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|id| id.parse().ok())
}

/// A Wikidata item such as `Q5` (human).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "EntityReference", into = "EntityReference")]
pub struct WikidataItem(pub u64);

impl WikidataItem {
    pub fn url(&self) -> String {
        format!("{ITEM_PREFIX}{}", self.0)
    }

    pub fn from_url(url: &str) -> Result<Self, WikidataError> {
        parse_numeric_id(url, ITEM_PREFIX)
            .map(Self)
            .ok_or_else(|| WikidataError::InvalidItem(url.to_string()))
    }
}

impl fmt::Display for WikidataItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.0)
    }
}

impl TryFrom<EntityReference> for WikidataItem {
    type Error = WikidataError;

    fn try_from(reference: EntityReference) -> Result<Self, Self::Error> {
        Self::from_url(&reference.identifier)
    }
}

impl From<WikidataItem> for EntityReference {
    fn from(item: WikidataItem) -> Self {
        EntityReference {
            identifier: item.url(),
        }
    }
}

/// A direct Wikidata property such as `P31` (instance of).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "EntityReference", into = "EntityReference")]
pub struct WikidataProperty(pub u64);

impl WikidataProperty {
    pub fn url(&self) -> String {
        format!("{PROPERTY_PREFIX}{}", self.0)
    }

    pub fn from_url(url: &str) -> Result<Self, WikidataError> {
        parse_numeric_id(url, PROPERTY_PREFIX)
            .map(Self)
            .ok_or_else(|| WikidataError::InvalidProperty(url.to_string()))
    }
}

impl fmt::Display for WikidataProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

impl TryFrom<EntityReference> for WikidataProperty {
    type Error = WikidataError;

    fn try_from(reference: EntityReference) -> Result<Self, Self::Error> {
        Self::from_url(&reference.identifier)
    }
}

impl From<WikidataProperty> for EntityReference {
    fn from(property: WikidataProperty) -> Self {
        EntityReference {
            identifier: property.url(),
        }
    }
}

/// A value computed from other properties rather than stored in Wikidata.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", remote = "Self")]
pub enum WikidataOperation {
    /// Age from the birth date, up to the death date if there is one.
    Age {
        #[serde(rename = "birthDateProperty")]
        birth_date_property: String,
        #[serde(rename = "deathDateProperty")]
        death_date_property: String,
    },
}

keyed_serde!(WikidataOperation, "an operation object");

impl WikidataOperation {
    pub fn age(
        birth_date_property: impl Into<String>,
        death_date_property: impl Into<String>,
    ) -> Self {
        WikidataOperation::Age {
            birth_date_property: birth_date_property.into(),
            death_date_property: death_date_property.into(),
        }
    }
}

/// How an ontology property is answered from Wikidata.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(
    try_from = "WikidataPropertyMappingRepr",
    into = "WikidataPropertyMappingRepr"
)]
pub enum WikidataPropertyMapping {
    Property(WikidataProperty),
    Operation(WikidataOperation),
    /// The item's label.
    Label,
}

impl WikidataPropertyMapping {
    pub const KEYS: [&'static str; 3] = ["property", "operation", "label"];

    pub fn property(property: WikidataProperty) -> Self {
        WikidataPropertyMapping::Property(property)
    }

    pub fn operation(operation: WikidataOperation) -> Self {
        WikidataPropertyMapping::Operation(operation)
    }
}

impl From<WikidataProperty> for WikidataPropertyMapping {
    fn from(property: WikidataProperty) -> Self {
        WikidataPropertyMapping::Property(property)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "Self")]
struct WikidataPropertyMappingRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    property: Option<WikidataProperty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    operation: Option<WikidataOperation>,
    // `{"label": null}` selects the label, so presence is what counts.
    #[serde(
        default,
        deserialize_with = "key_present",
        serialize_with = "unit",
        skip_serializing_if = "is_false"
    )]
    label: bool,
}

keyed_serde!(WikidataPropertyMappingRepr, "a property mapping object");

fn key_present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    serde::de::IgnoredAny::deserialize(deserializer).map(|_| true)
}

fn unit<S: Serializer>(_: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_unit()
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl TryFrom<WikidataPropertyMappingRepr> for WikidataPropertyMapping {
    type Error = DecodeError;

    fn try_from(repr: WikidataPropertyMappingRepr) -> Result<Self, Self::Error> {
        if let Some(property) = repr.property {
            return Ok(WikidataPropertyMapping::Property(property));
        }
        if let Some(operation) = repr.operation {
            return Ok(WikidataPropertyMapping::Operation(operation));
        }
        if repr.label {
            return Ok(WikidataPropertyMapping::Label);
        }
        Err(DecodeError::MissingPropertyOneOf(
            WikidataPropertyMapping::KEYS.to_vec(),
        ))
    }
}

impl From<WikidataPropertyMapping> for WikidataPropertyMappingRepr {
    fn from(mapping: WikidataPropertyMapping) -> Self {
        let mut repr = WikidataPropertyMappingRepr {
            property: None,
            operation: None,
            label: false,
        };
        match mapping {
            WikidataPropertyMapping::Property(property) => repr.property = Some(property),
            WikidataPropertyMapping::Operation(operation) => repr.operation = Some(operation),
            WikidataPropertyMapping::Label => repr.label = true,
        }
        repr
    }
}

/// Classes and individuals map to items, properties to
/// [`WikidataPropertyMapping`]s.
///
/// Because classes and individuals share [`WikidataItem`], an item can be
/// bound to at most one of them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct WikidataMappings;

impl OntologyMappings for WikidataMappings {
    type Class = WikidataItem;
    type Property = WikidataPropertyMapping;
    type Individual = WikidataItem;
}

/// A macro that declares a Wikidata item constant.
///
/// This macro creates two constants:
/// - A raw u64 id constant with the suffix `_RAW`
/// - A [`WikidataItem`] constant with the given name
///
/// # Examples
///
/// ```
/// use question_ontology::{WikidataItem, const_wikidata_item};
///
/// const_wikidata_item!(146, HOUSE_CAT);
///
/// assert_eq!(HOUSE_CAT, WikidataItem(146));
/// assert_eq!(HOUSE_CAT_RAW, 146);
/// ```
#[macro_export]
macro_rules! const_wikidata_item {
    ($value:expr, $const_name:ident) => {
        $crate::paste! {
            pub const [<$const_name _RAW>]: u64 = $value;
        }
        pub const $const_name: $crate::WikidataItem = $crate::WikidataItem($value);
    };
}

/// A macro that declares a Wikidata property constant, with a `_RAW`
/// companion like [`const_wikidata_item!`](crate::const_wikidata_item).
#[macro_export]
macro_rules! const_wikidata_property {
    ($value:expr, $const_name:ident) => {
        $crate::paste! {
            pub const [<$const_name _RAW>]: u64 = $value;
        }
        pub const $const_name: $crate::WikidataProperty = $crate::WikidataProperty($value);
    };
}

//
// Items
//

const_wikidata_item!(5, HUMAN);
const_wikidata_item!(515, CITY);
const_wikidata_item!(188830, WIFE);
const_wikidata_item!(212878, HUSBAND);
const_wikidata_item!(6581072, FEMALE);
const_wikidata_item!(6581097, MALE);

//
// Properties
//

const_wikidata_property!(7, BROTHER);
const_wikidata_property!(9, SISTER);
const_wikidata_property!(19, PLACE_OF_BIRTH);
const_wikidata_property!(20, PLACE_OF_DEATH);
const_wikidata_property!(21, SEX_OR_GENDER);
const_wikidata_property!(22, FATHER);
const_wikidata_property!(25, MOTHER);
const_wikidata_property!(26, SPOUSE);
const_wikidata_property!(31, INSTANCE_OF);
const_wikidata_property!(276, LOCATION);
const_wikidata_property!(279, SUBCLASS_OF);
const_wikidata_property!(569, DATE_OF_BIRTH);
const_wikidata_property!(570, DATE_OF_DEATH);
const_wikidata_property!(1082, POPULATION);
const_wikidata_property!(3373, SIBLING);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_url_roundtrip() {
        assert_eq!(HUMAN.url(), "http://www.wikidata.org/entity/Q5");
        assert_eq!(WikidataItem::from_url(&HUMAN.url()), Ok(HUMAN));
        assert_eq!(HUMAN.to_string(), "Q5");
        assert_eq!(HUMAN_RAW, 5);
    }

    #[test]
    fn test_invalid_urls_are_rejected() {
        assert!(WikidataItem::from_url("http://www.wikidata.org/entity/Qx").is_err());
        assert!(WikidataItem::from_url("http://www.wikidata.org/entity/Q").is_err());
        assert!(WikidataItem::from_url(&SPOUSE.url()).is_err());
        assert!(WikidataProperty::from_url(&HUMAN.url()).is_err());

        let error =
            serde_json::from_value::<WikidataItem>(json!({"identifier": "Q5"})).unwrap_err();
        assert!(error.to_string().contains("not a Wikidata item URL"));
    }

    #[test]
    fn test_property_mapping_json_shape() {
        assert_eq!(
            serde_json::to_value(WikidataPropertyMapping::property(SPOUSE)).unwrap(),
            json!({"property": {"identifier": "http://www.wikidata.org/prop/direct/P26"}})
        );
        assert_eq!(
            serde_json::to_value(WikidataPropertyMapping::operation(
                WikidataOperation::age("hasDateOfBirth", "hasDateOfDeath")
            ))
            .unwrap(),
            json!({"operation": {
                "type": "age",
                "birthDateProperty": "hasDateOfBirth",
                "deathDateProperty": "hasDateOfDeath"
            }})
        );
        assert_eq!(
            serde_json::to_value(WikidataPropertyMapping::Label).unwrap(),
            json!({"label": null})
        );
    }

    #[test]
    fn test_label_is_selected_by_key_presence() {
        let mapping: WikidataPropertyMapping =
            serde_json::from_value(json!({"label": null})).unwrap();
        assert_eq!(mapping, WikidataPropertyMapping::Label);

        let error = serde_json::from_value::<WikidataPropertyMapping>(json!({})).unwrap_err();
        assert!(
            error
                .to_string()
                .contains("property, operation, label")
        );
    }

    #[test]
    fn test_references_must_be_objects() {
        let item: WikidataItem =
            serde_json::from_value(json!({"identifier": HUMAN.url()})).unwrap();
        assert_eq!(item, HUMAN);

        let positional = json!(["http://www.wikidata.org/entity/Q5"]);
        assert!(serde_json::from_value::<WikidataItem>(positional).is_err());
        assert!(serde_json::from_value::<WikidataPropertyMapping>(json!([null, null])).is_err());
        assert!(serde_json::from_value::<WikidataOperation>(json!(["age", "a", "b"])).is_err());
    }
}
