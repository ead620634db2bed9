use std::collections::HashSet;

use crate::{
    ClassPattern, Equivalent, Ontology, OntologyMappings, PropertyPattern, Relation,
};

/// A named class of things, e.g. `Person` or `City`.
///
/// A class only stores the identifiers of its superclasses. They are resolved
/// through the owning [`Ontology`], which is passed in explicitly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Class {
    identifier: String,
    pub(crate) superclass_identifiers: HashSet<String>,
    pub(crate) equivalents: HashSet<Equivalent>,
    pub(crate) patterns: Vec<ClassPattern>,
    pub(crate) relations: HashSet<Relation>,
}

impl Class {
    pub(crate) fn new(identifier: String) -> Self {
        Self {
            identifier,
            superclass_identifiers: HashSet::new(),
            equivalents: HashSet::new(),
            patterns: Vec::new(),
            relations: HashSet::new(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn superclass_identifiers(&self) -> &HashSet<String> {
        &self.superclass_identifiers
    }

    pub fn equivalents(&self) -> &HashSet<Equivalent> {
        &self.equivalents
    }

    /// Patterns in the order they were attached.
    pub fn patterns(&self) -> &[ClassPattern] {
        &self.patterns
    }

    pub fn relations(&self) -> &HashSet<Relation> {
        &self.relations
    }

    /// Resolves the superclasses against `ontology`, sorted by identifier.
    pub fn super_classes<'a, M: OntologyMappings>(
        &self,
        ontology: &'a Ontology<M>,
    ) -> Vec<&'a Class> {
        resolve(&self.superclass_identifiers, |identifier| {
            ontology.class(identifier)
        })
    }
}

/// A named relation between two things, e.g. `hasParent`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Property {
    identifier: String,
    pub(crate) superproperty_identifiers: HashSet<String>,
    pub(crate) symmetric: bool,
    pub(crate) transitive: bool,
    pub(crate) equivalents: HashSet<Equivalent>,
    pub(crate) patterns: Vec<PropertyPattern>,
}

impl Property {
    pub(crate) fn new(identifier: String) -> Self {
        Self {
            identifier,
            superproperty_identifiers: HashSet::new(),
            symmetric: false,
            transitive: false,
            equivalents: HashSet::new(),
            patterns: Vec::new(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn superproperty_identifiers(&self) -> &HashSet<String> {
        &self.superproperty_identifiers
    }

    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    pub fn is_transitive(&self) -> bool {
        self.transitive
    }

    pub fn equivalents(&self) -> &HashSet<Equivalent> {
        &self.equivalents
    }

    /// Patterns in the order they were attached.
    pub fn patterns(&self) -> &[PropertyPattern] {
        &self.patterns
    }

    /// Resolves the superproperties against `ontology`, sorted by identifier.
    pub fn super_properties<'a, M: OntologyMappings>(
        &self,
        ontology: &'a Ontology<M>,
    ) -> Vec<&'a Property> {
        resolve(&self.superproperty_identifiers, |identifier| {
            ontology.property(identifier)
        })
    }
}

/// A single named thing, e.g. the gender `female`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Individual {
    identifier: String,
    pub(crate) type_identifiers: HashSet<String>,
}

impl Individual {
    pub(crate) fn new(identifier: String) -> Self {
        Self {
            identifier,
            type_identifiers: HashSet::new(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Identifiers of the classes this individual is an instance of.
    pub fn type_identifiers(&self) -> &HashSet<String> {
        &self.type_identifiers
    }

    /// Resolves the types against `ontology`, sorted by identifier.
    pub fn types<'a, M: OntologyMappings>(&self, ontology: &'a Ontology<M>) -> Vec<&'a Class> {
        resolve(&self.type_identifiers, |identifier| ontology.class(identifier))
    }
}

fn resolve<'a, T>(
    identifiers: &HashSet<String>,
    lookup: impl Fn(&str) -> Option<&'a T>,
) -> Vec<&'a T> {
    let mut identifiers: Vec<&String> = identifiers.iter().collect();
    identifiers.sort();
    identifiers
        .into_iter()
        .filter_map(|identifier| lookup(identifier))
        .collect()
}

/// Sorted copy of an identifier set, for output.
pub(crate) fn sorted(identifiers: &HashSet<String>) -> Vec<String> {
    let mut identifiers: Vec<String> = identifiers.iter().cloned().collect();
    identifiers.sort();
    identifiers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WikidataMappings;

    #[test]
    fn test_super_classes_resolve_through_ontology() {
        let mut ontology = Ontology::<WikidataMappings>::new();
        ontology.define_class("Person").unwrap();
        ontology.define_class("Female").unwrap();
        ontology
            .define_class("Mother")
            .unwrap()
            .is_sub_class_of(["Person", "Female"])
            .unwrap();

        let mother = ontology.class("Mother").unwrap();
        let identifiers: Vec<_> = mother
            .super_classes(&ontology)
            .into_iter()
            .map(Class::identifier)
            .collect();
        assert_eq!(identifiers, vec!["Female", "Person"]);
    }

    #[test]
    fn test_individual_types_resolve_through_ontology() {
        let mut ontology = Ontology::<WikidataMappings>::new();
        ontology.define_class("Gender").unwrap();
        ontology
            .define_individual("female")
            .unwrap()
            .is_a(["Gender"])
            .unwrap();

        let female = ontology.individual("female").unwrap();
        assert_eq!(female.types(&ontology)[0].identifier(), "Gender");
    }

    #[test]
    fn test_sorted_identifiers() {
        let set: HashSet<String> = ["b", "c", "a"].iter().map(|s| s.to_string()).collect();
        assert_eq!(sorted(&set), vec!["a", "b", "c"]);
    }
}
