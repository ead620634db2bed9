use std::any::Any;
use std::collections::HashMap;

use crate::{
    Class, ClassBuilder, Conflict, DefinitionError, EntityKind, Individual, IndividualBuilder,
    OntologyMapping, OntologyMappings, Property, PropertyBuilder, TwoWayMap,
};

/// A registry of classes, properties and individuals, together with their
/// bindings to an external knowledge base.
///
/// Every identifier names at most one entity across all three kinds, and each
/// mapping table is a bijection between identifiers and external values.
/// Entities are defined through the `define_*` methods, which hand back a
/// builder for attaching superclasses, equivalences, patterns and mappings.
///
/// # Examples
///
/// ```
/// use question_ontology::{Ontology, WikidataMappings, wikidata};
///
/// let mut ontology = Ontology::<WikidataMappings>::new();
/// ontology
///     .define_class("Person")
///     .unwrap()
///     .map(wikidata::HUMAN)
///     .unwrap();
/// ontology
///     .define_class("Mother")
///     .unwrap()
///     .is_sub_class_of(["Person"])
///     .unwrap();
///
/// assert_eq!(
///     ontology.class_for_mapping(&wikidata::HUMAN).map(|c| c.identifier()),
///     Some("Person")
/// );
///
/// // Identifiers are unique across all kinds.
/// assert!(ontology.define_individual("Person").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ontology<M: OntologyMappings> {
    pub(crate) classes: HashMap<String, Class>,
    pub(crate) properties: HashMap<String, Property>,
    pub(crate) individuals: HashMap<String, Individual>,
    pub(crate) class_mapping: TwoWayMap<String, M::Class>,
    pub(crate) property_mapping: TwoWayMap<String, M::Property>,
    pub(crate) individual_mapping: TwoWayMap<String, M::Individual>,
    person_class: Option<String>,
    instance_property: Option<String>,
    label_property: Option<String>,
}

impl<M: OntologyMappings> Ontology<M> {
    /// Creates an empty registry with no entities, mappings or roles.
    ///
    /// # Examples
    ///
    /// ```
    /// use question_ontology::{Ontology, WikidataMappings};
    ///
    /// let ontology = Ontology::<WikidataMappings>::new();
    /// assert!(ontology.is_empty());
    /// assert!(ontology.person_class().is_none());
    /// ```
    pub fn new() -> Self {
        Self {
            classes: HashMap::new(),
            properties: HashMap::new(),
            individuals: HashMap::new(),
            class_mapping: TwoWayMap::new(),
            property_mapping: TwoWayMap::new(),
            individual_mapping: TwoWayMap::new(),
            person_class: None,
            instance_property: None,
            label_property: None,
        }
    }

    /// The kind of entity `identifier` names, if any.
    pub fn kind_of(&self, identifier: &str) -> Option<EntityKind> {
        if self.individuals.contains_key(identifier) {
            Some(EntityKind::Individual)
        } else if self.properties.contains_key(identifier) {
            Some(EntityKind::Property)
        } else if self.classes.contains_key(identifier) {
            Some(EntityKind::Class)
        } else {
            None
        }
    }

    /// Whether no class, property or individual has been defined.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.properties.is_empty() && self.individuals.is_empty()
    }

    fn ensure_new_definition(&self, identifier: &str) -> Result<(), DefinitionError> {
        match self.kind_of(identifier) {
            Some(existing) => Err(DefinitionError::DuplicateIdentifier {
                identifier: identifier.to_string(),
                existing,
            }),
            None => Ok(()),
        }
    }

    /// Fails with [`DefinitionError::Undefined`] unless `identifier` names an
    /// entity of the given kind.
    pub(crate) fn require(
        &self,
        kind: EntityKind,
        identifier: &str,
    ) -> Result<(), DefinitionError> {
        let defined = match kind {
            EntityKind::Class => self.classes.contains_key(identifier),
            EntityKind::Property => self.properties.contains_key(identifier),
            EntityKind::Individual => self.individuals.contains_key(identifier),
        };
        if defined {
            Ok(())
        } else {
            Err(DefinitionError::Undefined {
                kind,
                identifier: identifier.to_string(),
            })
        }
    }

    //
    // Definitions
    //

    /// Defines a new class and returns a builder for it.
    pub fn define_class(
        &mut self,
        identifier: impl Into<String>,
    ) -> Result<ClassBuilder<'_, M>, DefinitionError> {
        let identifier = identifier.into();
        self.insert_class(Class::new(identifier.clone()))?;
        Ok(ClassBuilder::new(self, identifier))
    }

    /// Defines a new property and returns a builder for it.
    pub fn define_property(
        &mut self,
        identifier: impl Into<String>,
    ) -> Result<PropertyBuilder<'_, M>, DefinitionError> {
        let identifier = identifier.into();
        self.insert_property(Property::new(identifier.clone()))?;
        Ok(PropertyBuilder::new(self, identifier))
    }

    /// Defines a new individual and returns a builder for it.
    pub fn define_individual(
        &mut self,
        identifier: impl Into<String>,
    ) -> Result<IndividualBuilder<'_, M>, DefinitionError> {
        let identifier = identifier.into();
        self.insert_individual(Individual::new(identifier.clone()))?;
        Ok(IndividualBuilder::new(self, identifier))
    }

    pub(crate) fn insert_class(&mut self, class: Class) -> Result<(), DefinitionError> {
        self.ensure_new_definition(class.identifier())?;
        self.classes.insert(class.identifier().to_string(), class);
        Ok(())
    }

    pub(crate) fn insert_property(&mut self, property: Property) -> Result<(), DefinitionError> {
        self.ensure_new_definition(property.identifier())?;
        self.properties
            .insert(property.identifier().to_string(), property);
        Ok(())
    }

    pub(crate) fn insert_individual(
        &mut self,
        individual: Individual,
    ) -> Result<(), DefinitionError> {
        self.ensure_new_definition(individual.identifier())?;
        self.individuals
            .insert(individual.identifier().to_string(), individual);
        Ok(())
    }

    /// Reopens an existing class for further building.
    pub fn class_builder(
        &mut self,
        identifier: &str,
    ) -> Result<ClassBuilder<'_, M>, DefinitionError> {
        self.require(EntityKind::Class, identifier)?;
        Ok(ClassBuilder::new(self, identifier.to_string()))
    }

    /// Reopens an existing property for further building.
    pub fn property_builder(
        &mut self,
        identifier: &str,
    ) -> Result<PropertyBuilder<'_, M>, DefinitionError> {
        self.require(EntityKind::Property, identifier)?;
        Ok(PropertyBuilder::new(self, identifier.to_string()))
    }

    /// Reopens an existing individual for further building.
    pub fn individual_builder(
        &mut self,
        identifier: &str,
    ) -> Result<IndividualBuilder<'_, M>, DefinitionError> {
        self.require(EntityKind::Individual, identifier)?;
        Ok(IndividualBuilder::new(self, identifier.to_string()))
    }

    //
    // Lookups
    //

    /// Looks up a class by identifier.
    ///
    /// Returns `None` when `identifier` is undefined or names an entity of
    /// another kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use question_ontology::{Ontology, WikidataMappings};
    ///
    /// let mut ontology = Ontology::<WikidataMappings>::new();
    /// ontology.define_class("City").unwrap();
    /// ontology.define_property("hasMayor").unwrap();
    ///
    /// assert_eq!(ontology.class("City").unwrap().identifier(), "City");
    /// assert!(ontology.class("hasMayor").is_none());
    /// ```
    pub fn class(&self, identifier: &str) -> Option<&Class> {
        self.classes.get(identifier)
    }

    /// Looks up a property by identifier. See [`Ontology::class`].
    pub fn property(&self, identifier: &str) -> Option<&Property> {
        self.properties.get(identifier)
    }

    /// Looks up an individual by identifier. See [`Ontology::class`].
    pub fn individual(&self, identifier: &str) -> Option<&Individual> {
        self.individuals.get(identifier)
    }

    /// All classes, sorted by identifier.
    pub fn classes(&self) -> Vec<&Class> {
        sorted_values(&self.classes)
    }

    /// All properties, sorted by identifier.
    pub fn properties(&self) -> Vec<&Property> {
        sorted_values(&self.properties)
    }

    /// All individuals, sorted by identifier.
    pub fn individuals(&self) -> Vec<&Individual> {
        sorted_values(&self.individuals)
    }

    //
    // Mappings
    //

    /// The bindings of class identifiers to external values.
    pub fn class_mapping(&self) -> &TwoWayMap<String, M::Class> {
        &self.class_mapping
    }

    /// The bindings of property identifiers to external values.
    pub fn property_mapping(&self) -> &TwoWayMap<String, M::Property> {
        &self.property_mapping
    }

    /// The bindings of individual identifiers to external values.
    pub fn individual_mapping(&self) -> &TwoWayMap<String, M::Individual> {
        &self.individual_mapping
    }

    /// Binds a class to an external value.
    ///
    /// Binding the same pair again is a no-op. Fails if the class is bound
    /// to a different value, or if the value is already bound to any entity.
    pub fn map_class(&mut self, identifier: &str, mapped: M::Class) -> Result<(), DefinitionError> {
        self.bind(EntityKind::Class, identifier, mapped, Self::class_table)
    }

    /// Binds a property to an external value. See [`Ontology::map_class`].
    pub fn map_property(
        &mut self,
        identifier: &str,
        mapped: M::Property,
    ) -> Result<(), DefinitionError> {
        self.bind(EntityKind::Property, identifier, mapped, Self::property_table)
    }

    /// Binds an individual to an external value. See [`Ontology::map_class`].
    pub fn map_individual(
        &mut self,
        identifier: &str,
        mapped: M::Individual,
    ) -> Result<(), DefinitionError> {
        self.bind(
            EntityKind::Individual,
            identifier,
            mapped,
            Self::individual_table,
        )
    }

    /// Finds the class bound to an external value.
    ///
    /// # Examples
    ///
    /// ```
    /// use question_ontology::{Ontology, WikidataMappings, wikidata};
    ///
    /// let mut ontology = Ontology::<WikidataMappings>::new();
    /// ontology.define_class("City").unwrap().map(wikidata::CITY).unwrap();
    ///
    /// let city = ontology.class_for_mapping(&wikidata::CITY).unwrap();
    /// assert_eq!(city.identifier(), "City");
    /// assert!(ontology.class_for_mapping(&wikidata::HUMAN).is_none());
    /// ```
    pub fn class_for_mapping(&self, mapped: &M::Class) -> Option<&Class> {
        self.class_mapping
            .get_by_right(mapped)
            .and_then(|identifier| self.class(identifier))
    }

    /// Finds the property bound to an external value.
    pub fn property_for_mapping(&self, mapped: &M::Property) -> Option<&Property> {
        self.property_mapping
            .get_by_right(mapped)
            .and_then(|identifier| self.property(identifier))
    }

    /// Finds the individual bound to an external value.
    pub fn individual_for_mapping(&self, mapped: &M::Individual) -> Option<&Individual> {
        self.individual_mapping
            .get_by_right(mapped)
            .and_then(|identifier| self.individual(identifier))
    }

    fn class_table(&mut self) -> &mut TwoWayMap<String, M::Class> {
        &mut self.class_mapping
    }

    fn property_table(&mut self) -> &mut TwoWayMap<String, M::Property> {
        &mut self.property_mapping
    }

    fn individual_table(&mut self) -> &mut TwoWayMap<String, M::Individual> {
        &mut self.individual_mapping
    }

    fn bind<T: OntologyMapping>(
        &mut self,
        kind: EntityKind,
        identifier: &str,
        mapped: T,
        table: fn(&mut Self) -> &mut TwoWayMap<String, T>,
    ) -> Result<(), DefinitionError> {
        self.require(kind, identifier)?;
        if table(self).get_by_left(identifier) == Some(&mapped) {
            return Ok(());
        }
        self.ensure_new_mapping(&mapped)?;
        let description = format!("{mapped:?}");
        table(self)
            .try_insert(identifier.to_string(), mapped)
            .map_err(|conflict| match conflict {
                Conflict::Left(existing) => DefinitionError::AlreadyMapped {
                    kind,
                    identifier: identifier.to_string(),
                    existing: format!("{existing:?}"),
                },
                Conflict::Right(holder) => DefinitionError::MappingInUse {
                    mapped: description,
                    kind,
                    identifier: holder,
                },
            })
    }

    /// Fails if `mapped` is bound in any table whose value type is `T`.
    fn ensure_new_mapping<T: OntologyMapping>(&self, mapped: &T) -> Result<(), DefinitionError> {
        let value = mapped as &dyn Any;
        let holder = value
            .downcast_ref::<M::Individual>()
            .and_then(|v| self.individual_mapping.get_by_right(v))
            .map(|identifier| (EntityKind::Individual, identifier))
            .or_else(|| {
                value
                    .downcast_ref::<M::Property>()
                    .and_then(|v| self.property_mapping.get_by_right(v))
                    .map(|identifier| (EntityKind::Property, identifier))
            })
            .or_else(|| {
                value
                    .downcast_ref::<M::Class>()
                    .and_then(|v| self.class_mapping.get_by_right(v))
                    .map(|identifier| (EntityKind::Class, identifier))
            });
        match holder {
            Some((kind, identifier)) => Err(DefinitionError::MappingInUse {
                mapped: format!("{mapped:?}"),
                kind,
                identifier: identifier.clone(),
            }),
            None => Ok(()),
        }
    }

    //
    // Roles
    //

    /// Designates the class of people, used to resolve "who" questions.
    pub fn set_person_class(&mut self, identifier: &str) -> Result<(), DefinitionError> {
        self.require(EntityKind::Class, identifier)?;
        self.person_class = Some(identifier.to_string());
        Ok(())
    }

    /// Designates the property linking an entity to its class.
    pub fn set_instance_property(&mut self, identifier: &str) -> Result<(), DefinitionError> {
        self.require(EntityKind::Property, identifier)?;
        self.instance_property = Some(identifier.to_string());
        Ok(())
    }

    /// Designates the property holding an entity's name.
    pub fn set_label_property(&mut self, identifier: &str) -> Result<(), DefinitionError> {
        self.require(EntityKind::Property, identifier)?;
        self.label_property = Some(identifier.to_string());
        Ok(())
    }

    /// The class designated with [`Ontology::set_person_class`], if any.
    pub fn person_class(&self) -> Option<&Class> {
        self.person_class
            .as_deref()
            .and_then(|identifier| self.class(identifier))
    }

    /// The property designated with [`Ontology::set_instance_property`].
    pub fn instance_property(&self) -> Option<&Property> {
        self.instance_property
            .as_deref()
            .and_then(|identifier| self.property(identifier))
    }

    /// The property designated with [`Ontology::set_label_property`].
    pub fn label_property(&self) -> Option<&Property> {
        self.label_property
            .as_deref()
            .and_then(|identifier| self.property(identifier))
    }

    pub(crate) fn person_class_identifier(&self) -> Option<&str> {
        self.person_class.as_deref()
    }

    pub(crate) fn instance_property_identifier(&self) -> Option<&str> {
        self.instance_property.as_deref()
    }

    pub(crate) fn label_property_identifier(&self) -> Option<&str> {
        self.label_property.as_deref()
    }
}

impl<M: OntologyMappings> Default for Ontology<M> {
    fn default() -> Self {
        Self::new()
    }
}

fn sorted_values<T>(entities: &HashMap<String, T>) -> Vec<&T> {
    let mut entries: Vec<(&String, &T)> = entities.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries.into_iter().map(|(_, entity)| entity).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{WikidataItem, WikidataMappings, WikidataProperty, WikidataPropertyMapping};

    fn ontology() -> Ontology<WikidataMappings> {
        Ontology::new()
    }

    #[test]
    fn test_identifiers_are_unique_across_kinds() {
        let mut ontology = ontology();
        ontology.define_class("X").unwrap();

        assert_eq!(
            ontology.define_property("X").err(),
            Some(DefinitionError::DuplicateIdentifier {
                identifier: "X".to_string(),
                existing: EntityKind::Class,
            })
        );
        assert!(ontology.define_individual("X").is_err());
        assert!(ontology.define_class("X").is_err());
        assert_eq!(ontology.kind_of("X"), Some(EntityKind::Class));
        assert_eq!(ontology.classes().len(), 1);
        assert!(ontology.properties().is_empty());
    }

    #[test]
    fn test_sorted_iteration() {
        let mut ontology = ontology();
        for identifier in ["b", "c", "a"] {
            ontology.define_class(identifier).unwrap();
        }
        let identifiers: Vec<_> = ontology.classes().into_iter().map(Class::identifier).collect();
        assert_eq!(identifiers, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_mapping_is_a_bijection() {
        let mut ontology = ontology();
        ontology.define_class("Person").unwrap();
        ontology.define_class("Human").unwrap();
        ontology.map_class("Person", WikidataItem(5)).unwrap();

        // Idempotent.
        ontology.map_class("Person", WikidataItem(5)).unwrap();

        assert_eq!(
            ontology.map_class("Human", WikidataItem(5)),
            Err(DefinitionError::MappingInUse {
                mapped: format!("{:?}", WikidataItem(5)),
                kind: EntityKind::Class,
                identifier: "Person".to_string(),
            })
        );
        assert!(matches!(
            ontology.map_class("Person", WikidataItem(6)),
            Err(DefinitionError::AlreadyMapped { .. })
        ));
        assert_eq!(ontology.class_mapping().len(), 1);
        assert_eq!(
            ontology.class_mapping().get_by_left("Person"),
            Some(&WikidataItem(5))
        );
    }

    #[test]
    fn test_shared_mapping_type_is_checked_across_kinds() {
        let mut ontology = ontology();
        ontology.define_class("Female").unwrap();
        ontology.define_individual("female").unwrap();
        ontology.map_individual("female", WikidataItem(6581072)).unwrap();

        assert!(matches!(
            ontology.map_class("Female", WikidataItem(6581072)),
            Err(DefinitionError::MappingInUse {
                kind: EntityKind::Individual,
                ..
            })
        ));
        assert!(ontology.class_mapping().is_empty());
    }

    #[test]
    fn test_mapping_requires_definition() {
        let mut ontology = ontology();
        assert_eq!(
            ontology.map_property(
                "hasAge",
                WikidataPropertyMapping::property(WikidataProperty(1))
            ),
            Err(DefinitionError::Undefined {
                kind: EntityKind::Property,
                identifier: "hasAge".to_string(),
            })
        );
    }

    #[test]
    fn test_reverse_lookup() {
        let mut ontology = ontology();
        ontology
            .define_individual("male")
            .unwrap()
            .map(WikidataItem(6581097))
            .unwrap();
        assert_eq!(
            ontology
                .individual_for_mapping(&WikidataItem(6581097))
                .map(Individual::identifier),
            Some("male")
        );
        assert!(ontology.individual_for_mapping(&WikidataItem(1)).is_none());
    }

    #[test]
    fn test_roles_require_matching_kind() {
        let mut ontology = ontology();
        ontology.define_class("Person").unwrap();
        ontology.define_property("instanceOf").unwrap();

        assert!(ontology.set_person_class("instanceOf").is_err());
        assert!(ontology.set_instance_property("Person").is_err());
        ontology.set_person_class("Person").unwrap();
        ontology.set_instance_property("instanceOf").unwrap();

        assert_eq!(ontology.person_class().map(Class::identifier), Some("Person"));
        assert_eq!(
            ontology.instance_property().map(Property::identifier),
            Some("instanceOf")
        );
        assert!(ontology.label_property().is_none());
    }

    #[test]
    fn test_reopened_builder() {
        let mut ontology = ontology();
        ontology.define_class("Person").unwrap();
        ontology.define_class("Parent").unwrap();
        ontology
            .class_builder("Parent")
            .unwrap()
            .is_sub_class_of(["Person"])
            .unwrap();
        assert!(
            ontology
                .class("Parent")
                .unwrap()
                .superclass_identifiers()
                .contains("Person")
        );
        assert!(ontology.class_builder("Missing").is_err());
    }
}
