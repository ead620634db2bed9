use serde::{Deserialize, Serialize};

use crate::Pattern;
use crate::keyed::keyed_serde;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Incoming,
    Outgoing,
}

/// A relation a class takes part in, and optionally the connective that
/// introduces it in text ("place *of* birth", "cities *in* France").
///
/// Relations order by direction, then property, then pattern, which is the
/// order they are written out in.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct Relation {
    pub direction: Direction,
    pub property: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<Pattern>,
}

keyed_serde!(Relation, "a relation object");

impl Relation {
    pub fn incoming(property: impl Into<String>, pattern: Option<Pattern>) -> Self {
        Self {
            direction: Direction::Incoming,
            property: property.into(),
            pattern,
        }
    }

    pub fn outgoing(property: impl Into<String>, pattern: Option<Pattern>) -> Self {
        Self {
            direction: Direction::Outgoing,
            property: property.into(),
            pattern,
        }
    }
}
