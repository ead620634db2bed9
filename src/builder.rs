//! Chainable builders returned by the `define_*` methods of [`Ontology`].
//!
//! Each builder holds the registry mutably for as long as it lives, so the
//! entity can be refined right after it is defined:
//!
//! ```
//! use question_ontology::{
//!     ClassPattern, Ontology, Tag, WikidataMappings, pattern, wikidata,
//! };
//!
//! let mut ontology = Ontology::<WikidataMappings>::new();
//! ontology
//!     .define_class("Person")
//!     .unwrap()
//!     .map(wikidata::HUMAN)
//!     .unwrap()
//!     .has_pattern(ClassPattern::named(pattern("person", Tag::AnyNoun)))
//!     .unwrap();
//! ```
//!
//! Every fallible call leaves the registry unchanged when it fails.

use crate::{
    ClassPattern, DefinitionError, EntityKind, Equivalent, HasDefinedLength, Ontology,
    OntologyMappings, PropertyPattern, Relation,
};

/// Refines a class defined with [`Ontology::define_class`] or reopened with
/// [`Ontology::class_builder`].
pub struct ClassBuilder<'a, M: OntologyMappings> {
    ontology: &'a mut Ontology<M>,
    identifier: String,
}

impl<'a, M: OntologyMappings> ClassBuilder<'a, M> {
    pub(crate) fn new(ontology: &'a mut Ontology<M>, identifier: String) -> Self {
        Self {
            ontology,
            identifier,
        }
    }

    /// The identifier of the entity being built.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Binds the class to an external value. See [`Ontology::map_class`].
    ///
    /// # Examples
    ///
    /// ```
    /// use question_ontology::{Ontology, WikidataMappings, wikidata};
    ///
    /// let mut ontology = Ontology::<WikidataMappings>::new();
    /// ontology.define_class("Human").unwrap().map(wikidata::HUMAN).unwrap();
    ///
    /// // Q5 now belongs to Human.
    /// let person = ontology.define_class("Person").unwrap();
    /// assert!(person.map(wikidata::HUMAN).is_err());
    /// ```
    pub fn map(self, mapped: M::Class) -> Result<Self, DefinitionError> {
        self.ontology.map_class(&self.identifier, mapped)?;
        Ok(self)
    }

    /// Adds superclasses. Each must already be defined as a class.
    pub fn is_sub_class_of<I, S>(self, superclasses: I) -> Result<Self, DefinitionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let superclasses = require_all(self.ontology, EntityKind::Class, superclasses)?;
        if let Some(class) = self.ontology.classes.get_mut(&self.identifier) {
            class.superclass_identifiers.extend(superclasses);
        }
        Ok(self)
    }

    /// Adds an equivalent expression. Every segment must reference a
    /// defined entity of the kind it names.
    pub fn has_equivalent(self, equivalent: Equivalent) -> Result<Self, DefinitionError> {
        require_segments(self.ontology, &equivalent)?;
        if let Some(class) = self.ontology.classes.get_mut(&self.identifier) {
            class.equivalents.insert(equivalent);
        }
        Ok(self)
    }

    /// Appends a pattern. Fails if its length is not statically known.
    pub fn has_pattern(self, pattern: ClassPattern) -> Result<Self, DefinitionError> {
        self.has_patterns([pattern])
    }

    /// Appends patterns in order. Fails without adding any of them if one
    /// lacks a defined length.
    pub fn has_patterns<I>(self, patterns: I) -> Result<Self, DefinitionError>
    where
        I: IntoIterator<Item = ClassPattern>,
    {
        let patterns = defined_length(&self.identifier, patterns)?;
        if let Some(class) = self.ontology.classes.get_mut(&self.identifier) {
            class.patterns.extend(patterns);
        }
        Ok(self)
    }

    /// Adds a relation. Its property must already be defined.
    pub fn has_relation(self, relation: Relation) -> Result<Self, DefinitionError> {
        self.ontology
            .require(EntityKind::Property, &relation.property)?;
        if let Some(pattern) = &relation.pattern {
            if !pattern.has_defined_length() {
                return Err(DefinitionError::UndefinedPatternLength {
                    identifier: self.identifier,
                });
            }
        }
        if let Some(class) = self.ontology.classes.get_mut(&self.identifier) {
            class.relations.insert(relation);
        }
        Ok(self)
    }
}

/// Refines a property defined with [`Ontology::define_property`] or reopened
/// with [`Ontology::property_builder`].
pub struct PropertyBuilder<'a, M: OntologyMappings> {
    ontology: &'a mut Ontology<M>,
    identifier: String,
}

impl<'a, M: OntologyMappings> PropertyBuilder<'a, M> {
    pub(crate) fn new(ontology: &'a mut Ontology<M>, identifier: String) -> Self {
        Self {
            ontology,
            identifier,
        }
    }

    /// The identifier of the entity being built.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Binds the property to an external value. See [`Ontology::map_class`].
    pub fn map(self, mapped: M::Property) -> Result<Self, DefinitionError> {
        self.ontology.map_property(&self.identifier, mapped)?;
        Ok(self)
    }

    /// Adds superproperties. Each must already be defined as a property.
    pub fn is_sub_property_of<I, S>(self, superproperties: I) -> Result<Self, DefinitionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let superproperties = require_all(self.ontology, EntityKind::Property, superproperties)?;
        if let Some(property) = self.ontology.properties.get_mut(&self.identifier) {
            property.superproperty_identifiers.extend(superproperties);
        }
        Ok(self)
    }

    /// Marks the property as symmetric: `a p b` implies `b p a`.
    pub fn make_symmetric(self) -> Self {
        if let Some(property) = self.ontology.properties.get_mut(&self.identifier) {
            property.symmetric = true;
        }
        self
    }

    /// Marks the property as transitive: `a p b` and `b p c` imply `a p c`.
    pub fn make_transitive(self) -> Self {
        if let Some(property) = self.ontology.properties.get_mut(&self.identifier) {
            property.transitive = true;
        }
        self
    }

    /// Adds an equivalent expression. See [`ClassBuilder::has_equivalent`].
    pub fn has_equivalent(self, equivalent: Equivalent) -> Result<Self, DefinitionError> {
        require_segments(self.ontology, &equivalent)?;
        if let Some(property) = self.ontology.properties.get_mut(&self.identifier) {
            property.equivalents.insert(equivalent);
        }
        Ok(self)
    }

    /// Appends a pattern. Fails if its length is not statically known.
    pub fn has_pattern(self, pattern: PropertyPattern) -> Result<Self, DefinitionError> {
        self.has_patterns([pattern])
    }

    /// Appends patterns in order. Fails without adding any of them if one
    /// lacks a defined length.
    pub fn has_patterns<I>(self, patterns: I) -> Result<Self, DefinitionError>
    where
        I: IntoIterator<Item = PropertyPattern>,
    {
        let patterns = defined_length(&self.identifier, patterns)?;
        if let Some(property) = self.ontology.properties.get_mut(&self.identifier) {
            property.patterns.extend(patterns);
        }
        Ok(self)
    }
}

/// Refines an individual defined with [`Ontology::define_individual`] or
/// reopened with [`Ontology::individual_builder`].
pub struct IndividualBuilder<'a, M: OntologyMappings> {
    ontology: &'a mut Ontology<M>,
    identifier: String,
}

impl<'a, M: OntologyMappings> IndividualBuilder<'a, M> {
    pub(crate) fn new(ontology: &'a mut Ontology<M>, identifier: String) -> Self {
        Self {
            ontology,
            identifier,
        }
    }

    /// The identifier of the entity being built.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Binds the individual to an external value. See [`Ontology::map_class`].
    pub fn map(self, mapped: M::Individual) -> Result<Self, DefinitionError> {
        self.ontology.map_individual(&self.identifier, mapped)?;
        Ok(self)
    }

    /// Adds types. Each must already be defined as a class.
    pub fn is_a<I, S>(self, types: I) -> Result<Self, DefinitionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let types = require_all(self.ontology, EntityKind::Class, types)?;
        if let Some(individual) = self.ontology.individuals.get_mut(&self.identifier) {
            individual.type_identifiers.extend(types);
        }
        Ok(self)
    }
}

fn require_all<M, I, S>(
    ontology: &Ontology<M>,
    kind: EntityKind,
    identifiers: I,
) -> Result<Vec<String>, DefinitionError>
where
    M: OntologyMappings,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    identifiers
        .into_iter()
        .map(|identifier| {
            let identifier = identifier.as_ref();
            ontology.require(kind, identifier)?;
            Ok(identifier.to_string())
        })
        .collect()
}

fn require_segments<M: OntologyMappings>(
    ontology: &Ontology<M>,
    equivalent: &Equivalent,
) -> Result<(), DefinitionError> {
    for segment in equivalent.all_segments() {
        ontology.require(segment.referenced_kind(), segment.identifier())?;
    }
    Ok(())
}

fn defined_length<T, I>(identifier: &str, patterns: I) -> Result<Vec<T>, DefinitionError>
where
    T: HasDefinedLength,
    I: IntoIterator<Item = T>,
{
    let patterns: Vec<T> = patterns.into_iter().collect();
    if patterns.iter().all(HasDefinedLength::has_defined_length) {
        Ok(patterns)
    } else {
        Err(DefinitionError::UndefinedPatternLength {
            identifier: identifier.to_string(),
        })
    }
}
