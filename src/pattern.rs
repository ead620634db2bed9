//! Descriptions of linguistic surface patterns.
//!
//! A [`Pattern`] describes how an entity shows up in a tagged token stream.
//! The registry never matches these against text; it stores them, checks
//! that their length is statically known, and writes them out unchanged.

use serde::{Deserialize, Serialize};

use crate::keyed::keyed_serde;

/// Values whose matched length can be known without looking at any input.
pub trait HasDefinedLength {
    /// Whether every match has a statically known, bounded number of tokens.
    fn has_defined_length(&self) -> bool;
}

/// A pattern over a stream of tagged tokens.
///
/// # Examples
///
/// ```
/// use question_ontology::{HasDefinedLength, Tag, pattern};
///
/// let be = pattern("be", Tag::AnyVerb);
/// let located_in = be
///     .opt()
///     .then(pattern("locate", Tag::AnyVerb))
///     .then(pattern("in", Tag::Preposition));
/// assert!(located_in.has_defined_length());
///
/// let any_number_of_nouns = pattern("thing", Tag::AnyNoun).zero_or_more();
/// assert!(!any_number_of_nouns.has_defined_length());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", remote = "Self")]
pub enum Pattern {
    /// Exactly one token satisfying the condition.
    Token { condition: Condition },
    /// Each pattern in turn.
    Sequence { patterns: Vec<Pattern> },
    /// Any one of the patterns.
    Or { patterns: Vec<Pattern> },
    /// The pattern repeated between `min` and `max` times.
    Repetition {
        pattern: Box<Pattern>,
        min: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<usize>,
    },
}

keyed_serde!(Pattern, "a pattern object");

impl Pattern {
    pub fn token(condition: Condition) -> Self {
        Pattern::Token { condition }
    }

    /// This pattern followed by `next`, flattening nested sequences.
    pub fn then(self, next: Pattern) -> Self {
        let mut patterns = match self {
            Pattern::Sequence { patterns } => patterns,
            pattern => vec![pattern],
        };
        match next {
            Pattern::Sequence { patterns: more } => patterns.extend(more),
            pattern => patterns.push(pattern),
        }
        Pattern::Sequence { patterns }
    }

    /// Either this pattern or `other`, flattening nested alternations.
    pub fn or(self, other: Pattern) -> Self {
        let mut patterns = match self {
            Pattern::Or { patterns } => patterns,
            pattern => vec![pattern],
        };
        match other {
            Pattern::Or { patterns: more } => patterns.extend(more),
            pattern => patterns.push(pattern),
        }
        Pattern::Or { patterns }
    }

    /// This pattern zero or one time.
    pub fn opt(self) -> Self {
        self.repeat(0, Some(1))
    }

    /// This pattern any number of times. Never has a defined length.
    pub fn zero_or_more(self) -> Self {
        self.repeat(0, None)
    }

    pub fn repeat(self, min: usize, max: Option<usize>) -> Self {
        Pattern::Repetition {
            pattern: Box::new(self),
            min,
            max,
        }
    }
}

impl HasDefinedLength for Pattern {
    fn has_defined_length(&self) -> bool {
        match self {
            Pattern::Token { .. } => true,
            Pattern::Sequence { patterns } | Pattern::Or { patterns } => {
                patterns.iter().all(Pattern::has_defined_length)
            }
            Pattern::Repetition { pattern, max, .. } => {
                max.is_some() && pattern.has_defined_length()
            }
        }
    }
}

/// A condition on a single token's labels.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", remote = "Self")]
pub enum Condition {
    Label {
        label: String,
        op: LabelOp,
        input: String,
    },
    And { conditions: Vec<Condition> },
    Or { conditions: Vec<Condition> },
}

keyed_serde!(Condition, "a condition object");

impl Condition {
    pub fn label(label: impl Into<String>, op: LabelOp, input: impl Into<String>) -> Self {
        Condition::Label {
            label: label.into(),
            op,
            input: input.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LabelOp {
    #[serde(rename = "=")]
    IsEqualTo,
    #[serde(rename = "!=")]
    IsNotEqualTo,
    #[serde(rename = "prefix")]
    HasPrefix,
    #[serde(rename = "suffix")]
    HasSuffix,
}

/// Part-of-speech tags used by [`pattern`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    AnyNoun,
    AnyVerb,
    Adjective,
    ComparativeAdjective,
    Preposition,
}

impl Tag {
    fn condition(&self) -> (LabelOp, &'static str) {
        match self {
            Tag::AnyNoun => (LabelOp::HasPrefix, "N"),
            Tag::AnyVerb => (LabelOp::HasPrefix, "V"),
            Tag::Adjective => (LabelOp::IsEqualTo, "JJ"),
            Tag::ComparativeAdjective => (LabelOp::IsEqualTo, "JJR"),
            Tag::Preposition => (LabelOp::IsEqualTo, "IN"),
        }
    }
}

/// A single-token pattern matching `lemma` with the given tag.
pub fn pattern(lemma: &str, tag: Tag) -> Pattern {
    let (op, input) = tag.condition();
    Pattern::token(Condition::And {
        conditions: vec![
            Condition::label("lemma", LabelOp::IsEqualTo, lemma),
            Condition::label("tag", op, input),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_has_defined_length() {
        assert!(pattern("person", Tag::AnyNoun).has_defined_length());
    }

    #[test]
    fn test_sequence_and_alternation_need_all_parts_defined() {
        let noun = pattern("size", Tag::AnyNoun);
        let unbounded = pattern("very", Tag::Adjective).zero_or_more();

        assert!(noun.clone().then(noun.clone()).has_defined_length());
        assert!(!noun.clone().then(unbounded.clone()).has_defined_length());
        assert!(noun.clone().or(noun.clone()).has_defined_length());
        assert!(!unbounded.or(noun).has_defined_length());
    }

    #[test]
    fn test_bounded_repetition_of_defined_pattern() {
        let noun = pattern("size", Tag::AnyNoun);
        assert!(noun.clone().opt().has_defined_length());
        assert!(noun.clone().repeat(1, Some(3)).has_defined_length());
        assert!(!noun.clone().repeat(1, None).has_defined_length());
        assert!(!noun.zero_or_more().repeat(0, Some(2)).has_defined_length());
    }

    #[test]
    fn test_then_flattens_sequences() {
        let a = pattern("a", Tag::AnyNoun);
        let b = pattern("b", Tag::AnyNoun);
        let c = pattern("c", Tag::AnyNoun);
        let sequence = a.clone().then(b.clone()).then(c.clone());
        assert_eq!(
            sequence,
            Pattern::Sequence {
                patterns: vec![a, b, c]
            }
        );
    }

    #[test]
    fn test_token_json_shape() {
        let json = serde_json::to_value(pattern("child", Tag::AnyNoun)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "token",
                "condition": {
                    "type": "and",
                    "conditions": [
                        {"type": "label", "label": "lemma", "op": "=", "input": "child"},
                        {"type": "label", "label": "tag", "op": "prefix", "input": "N"}
                    ]
                }
            })
        );
    }

    #[test]
    fn test_unbounded_repetition_omits_max() {
        let json = serde_json::to_value(pattern("x", Tag::AnyNoun).zero_or_more()).unwrap();
        assert_eq!(json["type"], "repetition");
        assert_eq!(json["min"], 0);
        assert!(json.get("max").is_none());
    }

    #[test]
    fn test_tagged_patterns_must_be_objects() {
        let token: Pattern = serde_json::from_value(serde_json::json!({
            "condition": {"type": "label", "label": "lemma", "op": "=", "input": "x"},
            "type": "token"
        }))
        .unwrap();
        assert_eq!(token, Pattern::token(Condition::label("lemma", LabelOp::IsEqualTo, "x")));

        let positional = r#"["token", ["label", "lemma", "=", "x"]]"#;
        assert!(serde_json::from_str::<Pattern>(positional).is_err());
        assert!(serde_json::from_str::<Condition>(r#"["label", "lemma", "=", "x"]"#).is_err());
    }
}
