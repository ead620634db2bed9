use std::cmp::Ordering;

use crate::EntityKind;

/// One directed hop in an equivalence path.
///
/// Segments order by kind first (`Incoming` < `Outgoing` < `Individual`) and
/// then by the identifier they carry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    /// Follow a property backwards, from object to subject.
    Incoming(String),
    /// Follow a property forwards, from subject to object.
    Outgoing(String),
    /// Anchor the path at an individual.
    Individual(String),
}

impl Segment {
    pub fn incoming(property: impl Into<String>) -> Self {
        Segment::Incoming(property.into())
    }

    pub fn outgoing(property: impl Into<String>) -> Self {
        Segment::Outgoing(property.into())
    }

    pub fn individual(individual: impl Into<String>) -> Self {
        Segment::Individual(individual.into())
    }

    /// The identifier this segment refers to.
    pub fn identifier(&self) -> &str {
        match self {
            Segment::Incoming(identifier)
            | Segment::Outgoing(identifier)
            | Segment::Individual(identifier) => identifier,
        }
    }

    /// The kind of entity [`identifier`](Self::identifier) must resolve to.
    pub fn referenced_kind(&self) -> EntityKind {
        match self {
            Segment::Incoming(_) | Segment::Outgoing(_) => EntityKind::Property,
            Segment::Individual(_) => EntityKind::Individual,
        }
    }
}

/// A declared equivalence between an entity and a path or boolean
/// combination of paths through the ontology graph.
///
/// Equivalents are plain values: two expressions are equal when they have the
/// same structure. They also carry a total order, which only exists so that
/// sets of equivalents can be written out in a stable order.
///
/// # Examples
///
/// ```
/// use question_ontology::{Equivalent, Segment};
///
/// // "the subjects whose hasGender is female"
/// let female = Equivalent::segments([
///     Segment::outgoing("hasGender"),
///     Segment::individual("female"),
/// ]);
///
/// let mut equivalents = vec![
///     Equivalent::and([female.clone()]),
///     Equivalent::outgoing("p"),
///     Equivalent::incoming("p"),
/// ];
/// equivalents.sort();
///
/// assert_eq!(equivalents[0], Equivalent::incoming("p"));
/// assert_eq!(equivalents[2], Equivalent::and([female]));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Equivalent {
    /// A chain of hops, followed left to right.
    Segments(Vec<Segment>),
    /// Any one of the expressions holds.
    Or(Vec<Equivalent>),
    /// All of the expressions hold.
    And(Vec<Equivalent>),
}

impl Equivalent {
    pub fn segments(segments: impl IntoIterator<Item = Segment>) -> Self {
        Equivalent::Segments(segments.into_iter().collect())
    }

    pub fn and(equivalents: impl IntoIterator<Item = Equivalent>) -> Self {
        Equivalent::And(equivalents.into_iter().collect())
    }

    pub fn or(equivalents: impl IntoIterator<Item = Equivalent>) -> Self {
        Equivalent::Or(equivalents.into_iter().collect())
    }

    /// A single hop following `property` backwards.
    pub fn incoming(property: impl Into<String>) -> Self {
        Equivalent::Segments(vec![Segment::incoming(property)])
    }

    /// A single hop following `property` forwards.
    pub fn outgoing(property: impl Into<String>) -> Self {
        Equivalent::Segments(vec![Segment::outgoing(property)])
    }

    /// Every segment in this expression, including those of nested
    /// expressions, in document order.
    pub fn all_segments(&self) -> Vec<&Segment> {
        let mut segments = Vec::new();
        self.collect_segments(&mut segments);
        segments
    }

    fn collect_segments<'a>(&'a self, segments: &mut Vec<&'a Segment>) {
        match self {
            Equivalent::Segments(own) => segments.extend(own.iter()),
            Equivalent::Or(equivalents) | Equivalent::And(equivalents) => {
                for equivalent in equivalents {
                    equivalent.collect_segments(segments);
                }
            }
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Equivalent::Segments(_) => 0,
            Equivalent::Or(_) => 1,
            Equivalent::And(_) => 2,
        }
    }
}

impl Ord for Equivalent {
    fn cmp(&self, other: &Self) -> Ordering {
        // Vec ordering is pairwise, with a shorter prefix sorting first.
        match (self, other) {
            (Equivalent::Segments(left), Equivalent::Segments(right)) => left.cmp(right),
            (Equivalent::Or(left), Equivalent::Or(right))
            | (Equivalent::And(left), Equivalent::And(right)) => left.cmp(right),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Equivalent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incoming_sorts_before_outgoing() {
        let mut equivalents = vec![Equivalent::outgoing("p"), Equivalent::incoming("p")];
        equivalents.sort();
        assert_eq!(
            equivalents,
            vec![Equivalent::incoming("p"), Equivalent::outgoing("p")]
        );
    }

    #[test]
    fn test_segment_order_is_kind_then_identifier() {
        let mut segments = vec![
            Segment::individual("a"),
            Segment::outgoing("b"),
            Segment::outgoing("a"),
            Segment::incoming("z"),
        ];
        segments.sort();
        assert_eq!(
            segments,
            vec![
                Segment::incoming("z"),
                Segment::outgoing("a"),
                Segment::outgoing("b"),
                Segment::individual("a"),
            ]
        );
    }

    #[test]
    fn test_shorter_prefix_sorts_first() {
        let short = Equivalent::segments([Segment::incoming("hasChild")]);
        let long = Equivalent::segments([
            Segment::incoming("hasChild"),
            Segment::incoming("hasChild"),
        ]);
        assert!(short < long);
    }

    #[test]
    fn test_variant_rank() {
        let segments = Equivalent::outgoing("z");
        let or = Equivalent::or([Equivalent::incoming("a")]);
        let and = Equivalent::and([Equivalent::incoming("a")]);
        assert!(segments < or);
        assert!(or < and);
        assert!(segments < and);
    }

    #[test]
    fn test_all_segments_walks_nested_expressions() {
        let equivalent = Equivalent::and([
            Equivalent::outgoing("hasParent"),
            Equivalent::or([Equivalent::segments([
                Segment::outgoing("hasGender"),
                Segment::individual("male"),
            ])]),
        ]);
        let identifiers: Vec<_> = equivalent
            .all_segments()
            .into_iter()
            .map(Segment::identifier)
            .collect();
        assert_eq!(identifiers, vec!["hasParent", "hasGender", "male"]);
    }

    #[test]
    fn test_structural_equality_dedups_in_sets() {
        let mut set = std::collections::HashSet::new();
        set.insert(Equivalent::outgoing("p"));
        set.insert(Equivalent::segments([Segment::outgoing("p")]));
        assert_eq!(set.len(), 1);
    }
}
