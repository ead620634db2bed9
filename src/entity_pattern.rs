//! Patterns attached to classes and properties.
//!
//! Each of these is a tagged object on the wire: the first key found, in the
//! declared order, names the variant, and unknown keys are ignored.
//! Secondary keys such as `filter` or `order` never select a variant.

use serde::{Deserialize, Serialize};

use crate::keyed::keyed_serde;
use crate::{DecodeError, HasDefinedLength, Pattern};

/// How a class is named in text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "ClassPatternRepr", into = "ClassPatternRepr")]
pub enum ClassPattern {
    Named(Pattern),
}

impl ClassPattern {
    pub const KEYS: [&'static str; 1] = ["named"];

    pub fn named(pattern: Pattern) -> Self {
        ClassPattern::Named(pattern)
    }

    pub fn pattern(&self) -> &Pattern {
        match self {
            ClassPattern::Named(pattern) => pattern,
        }
    }
}

impl HasDefinedLength for ClassPattern {
    fn has_defined_length(&self) -> bool {
        self.pattern().has_defined_length()
    }
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "Self")]
struct ClassPatternRepr {
    #[serde(skip_serializing_if = "Option::is_none")]
    named: Option<Pattern>,
}

keyed_serde!(ClassPatternRepr, "a class pattern object");

impl TryFrom<ClassPatternRepr> for ClassPattern {
    type Error = DecodeError;

    fn try_from(repr: ClassPatternRepr) -> Result<Self, Self::Error> {
        match repr.named {
            Some(pattern) => Ok(ClassPattern::Named(pattern)),
            None => Err(DecodeError::MissingPropertyOneOf(ClassPattern::KEYS.to_vec())),
        }
    }
}

impl From<ClassPattern> for ClassPatternRepr {
    fn from(pattern: ClassPattern) -> Self {
        match pattern {
            ClassPattern::Named(pattern) => ClassPatternRepr {
                named: Some(pattern),
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    LessThan,
    GreaterThan,
    EqualTo,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    Ascending,
    Descending,
}

/// A restriction on the value of a property, e.g. "larger than".
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "FilterPatternRepr", into = "FilterPatternRepr")]
pub enum FilterPattern {
    Named(Pattern),
    Comparative(Pattern, Comparison),
}

impl FilterPattern {
    pub const KEYS: [&'static str; 2] = ["named", "comparative"];

    pub fn named(pattern: Pattern) -> Self {
        FilterPattern::Named(pattern)
    }

    pub fn comparative(pattern: Pattern, comparison: Comparison) -> Self {
        FilterPattern::Comparative(pattern, comparison)
    }

    pub fn pattern(&self) -> &Pattern {
        match self {
            FilterPattern::Named(pattern) | FilterPattern::Comparative(pattern, _) => pattern,
        }
    }
}

impl HasDefinedLength for FilterPattern {
    fn has_defined_length(&self) -> bool {
        self.pattern().has_defined_length()
    }
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "Self")]
struct FilterPatternRepr {
    #[serde(skip_serializing_if = "Option::is_none")]
    named: Option<Pattern>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comparative: Option<Pattern>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comparison: Option<Comparison>,
}

keyed_serde!(FilterPatternRepr, "a filter pattern object");

impl TryFrom<FilterPatternRepr> for FilterPattern {
    type Error = DecodeError;

    fn try_from(repr: FilterPatternRepr) -> Result<Self, Self::Error> {
        if let Some(pattern) = repr.named {
            return Ok(FilterPattern::Named(pattern));
        }
        if let Some(pattern) = repr.comparative {
            let comparison = repr
                .comparison
                .ok_or(DecodeError::MissingProperty("comparison"))?;
            return Ok(FilterPattern::Comparative(pattern, comparison));
        }
        Err(DecodeError::MissingPropertyOneOf(FilterPattern::KEYS.to_vec()))
    }
}

impl From<FilterPattern> for FilterPatternRepr {
    fn from(pattern: FilterPattern) -> Self {
        let mut repr = FilterPatternRepr {
            named: None,
            comparative: None,
            comparison: None,
        };
        match pattern {
            FilterPattern::Named(pattern) => repr.named = Some(pattern),
            FilterPattern::Comparative(pattern, comparison) => {
                repr.comparative = Some(pattern);
                repr.comparison = Some(comparison);
            }
        }
        repr
    }
}

/// How a property shows up in text.
///
/// # Examples
///
/// ```
/// use question_ontology::{
///     Comparison, FilterPattern, HasDefinedLength, PropertyPattern, Tag, pattern,
/// };
///
/// let older_than = PropertyPattern::adjective(
///     "old",
///     Some(FilterPattern::comparative(
///         pattern("more", Tag::ComparativeAdjective).then(pattern("than", Tag::Preposition)),
///         Comparison::GreaterThan,
///     )),
/// );
/// assert!(older_than.has_defined_length());
///
/// let json = serde_json::to_value(&older_than).unwrap();
/// assert_eq!(json["adjective"], "old");
/// assert_eq!(json["filter"]["comparison"], "greater_than");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "PropertyPatternRepr", into = "PropertyPatternRepr")]
pub enum PropertyPattern {
    /// The property is named directly, e.g. "population".
    Named(Pattern),
    /// The object is mentioned before the subject, e.g. "lives in".
    Inverse(Pattern, Option<FilterPattern>),
    /// The subject is mentioned before the value, e.g. "was born".
    Value(Pattern, Option<FilterPattern>),
    /// An adjective describes the value, e.g. "old".
    Adjective {
        lemma: String,
        filter: Option<FilterPattern>,
    },
    /// A superlative selects by value, e.g. "largest".
    SuperlativeAdjective { lemma: String, order: Order },
}

impl PropertyPattern {
    pub const KEYS: [&'static str; 5] = [
        "named",
        "inverse",
        "value",
        "adjective",
        "superlative_adjective",
    ];

    pub fn named(pattern: Pattern) -> Self {
        PropertyPattern::Named(pattern)
    }

    pub fn inverse(pattern: Pattern, filter: Option<FilterPattern>) -> Self {
        PropertyPattern::Inverse(pattern, filter)
    }

    pub fn value(pattern: Pattern, filter: Option<FilterPattern>) -> Self {
        PropertyPattern::Value(pattern, filter)
    }

    pub fn adjective(lemma: impl Into<String>, filter: Option<FilterPattern>) -> Self {
        PropertyPattern::Adjective {
            lemma: lemma.into(),
            filter,
        }
    }

    pub fn superlative_adjective(lemma: impl Into<String>, order: Order) -> Self {
        PropertyPattern::SuperlativeAdjective {
            lemma: lemma.into(),
            order,
        }
    }
}

impl HasDefinedLength for PropertyPattern {
    fn has_defined_length(&self) -> bool {
        let filter_defined = |filter: &Option<FilterPattern>| {
            filter
                .as_ref()
                .is_none_or(FilterPattern::has_defined_length)
        };
        match self {
            PropertyPattern::Named(pattern) => pattern.has_defined_length(),
            PropertyPattern::Inverse(pattern, filter)
            | PropertyPattern::Value(pattern, filter) => {
                pattern.has_defined_length() && filter_defined(filter)
            }
            PropertyPattern::Adjective { filter, .. } => filter_defined(filter),
            PropertyPattern::SuperlativeAdjective { .. } => true,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "Self")]
struct PropertyPatternRepr {
    #[serde(skip_serializing_if = "Option::is_none")]
    named: Option<Pattern>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inverse: Option<Pattern>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<Pattern>,
    #[serde(skip_serializing_if = "Option::is_none")]
    adjective: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    superlative_adjective: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<Order>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<FilterPattern>,
}

keyed_serde!(PropertyPatternRepr, "a property pattern object");

impl TryFrom<PropertyPatternRepr> for PropertyPattern {
    type Error = DecodeError;

    fn try_from(repr: PropertyPatternRepr) -> Result<Self, Self::Error> {
        let PropertyPatternRepr {
            named,
            inverse,
            value,
            adjective,
            superlative_adjective,
            order,
            filter,
        } = repr;

        if let Some(pattern) = named {
            return Ok(PropertyPattern::Named(pattern));
        }
        if let Some(pattern) = inverse {
            return Ok(PropertyPattern::Inverse(pattern, filter));
        }
        if let Some(pattern) = value {
            return Ok(PropertyPattern::Value(pattern, filter));
        }
        if let Some(lemma) = adjective {
            return Ok(PropertyPattern::Adjective { lemma, filter });
        }
        if let Some(lemma) = superlative_adjective {
            let order = order.ok_or(DecodeError::MissingProperty("order"))?;
            return Ok(PropertyPattern::SuperlativeAdjective { lemma, order });
        }
        Err(DecodeError::MissingPropertyOneOf(PropertyPattern::KEYS.to_vec()))
    }
}

impl From<PropertyPattern> for PropertyPatternRepr {
    fn from(pattern: PropertyPattern) -> Self {
        let mut repr = PropertyPatternRepr {
            named: None,
            inverse: None,
            value: None,
            adjective: None,
            superlative_adjective: None,
            order: None,
            filter: None,
        };
        match pattern {
            PropertyPattern::Named(pattern) => repr.named = Some(pattern),
            PropertyPattern::Inverse(pattern, filter) => {
                repr.inverse = Some(pattern);
                repr.filter = filter;
            }
            PropertyPattern::Value(pattern, filter) => {
                repr.value = Some(pattern);
                repr.filter = filter;
            }
            PropertyPattern::Adjective { lemma, filter } => {
                repr.adjective = Some(lemma);
                repr.filter = filter;
            }
            PropertyPattern::SuperlativeAdjective { lemma, order } => {
                repr.superlative_adjective = Some(lemma);
                repr.order = Some(order);
            }
        }
        repr
    }
}
