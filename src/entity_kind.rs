use std::fmt;

/// The partition of the shared identifier namespace an entity lives in.
///
/// Every identifier in an [`Ontology`](crate::Ontology) names exactly one
/// class, property, or individual. The kind is reported back by definition
/// errors so callers can see which existing entity an identifier clashed with.
///
/// # Examples
///
/// ```
/// use question_ontology::{EntityKind, Ontology, WikidataMappings};
///
/// let mut ontology = Ontology::<WikidataMappings>::new();
/// ontology.define_class("Person").unwrap();
/// assert_eq!(ontology.kind_of("Person"), Some(EntityKind::Class));
/// assert_eq!(EntityKind::Class.to_string(), "class");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Class,
    Property,
    Individual,
}

impl EntityKind {
    /// The kind name preceded by its indefinite article, for messages.
    pub fn with_article(&self) -> &'static str {
        match self {
            EntityKind::Class => "a class",
            EntityKind::Property => "a property",
            EntityKind::Individual => "an individual",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Class => "class",
            EntityKind::Property => "property",
            EntityKind::Individual => "individual",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_article() {
        assert_eq!(EntityKind::Property.to_string(), "property");
        assert_eq!(EntityKind::Individual.with_article(), "an individual");
        assert_eq!(EntityKind::Class.with_article(), "a class");
    }
}
