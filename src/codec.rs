//! Encoding and validating decoding of ontologies.
//!
//! Decoding runs in two passes. The first reads every entity in document
//! order, records each identifier it references in a [`ReferenceLedger`],
//! and defines the entity. Entities may therefore refer forward to ones
//! defined later in the document. The second pass checks the ledger against
//! what was defined and reports all unresolved identifiers of a kind at once.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use log::{debug, trace};

use crate::entity::sorted;
use crate::{
    Class, ClassDocument, DecodeError, DefinitionError, EntityKind, Equivalent,
    EquivalentDocument, HasDefinedLength, Individual, IndividualDocument, Ontology,
    OntologyDocument, OntologyMapping, OntologyMappings, Property, PropertyDocument, Segment,
    SegmentDocument,
};

/// Identifiers referenced while decoding, grouped by the kind they must
/// resolve to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReferenceLedger {
    pub classes: BTreeSet<String>,
    pub properties: BTreeSet<String>,
    pub individuals: BTreeSet<String>,
}

impl ReferenceLedger {
    /// Records that `identifier` must name an entity of `kind`.
    pub fn reference(&mut self, kind: EntityKind, identifier: &str) {
        let references = match kind {
            EntityKind::Class => &mut self.classes,
            EntityKind::Property => &mut self.properties,
            EntityKind::Individual => &mut self.individuals,
        };
        if !references.contains(identifier) {
            trace!("recorded reference to {kind} {identifier}");
            references.insert(identifier.to_string());
        }
    }

    /// Whether nothing has been referenced yet.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.properties.is_empty() && self.individuals.is_empty()
    }

    /// Fails with the first kind, in the order classes, properties,
    /// individuals, that has identifiers `ontology` does not define.
    pub fn validate<M: OntologyMappings>(&self, ontology: &Ontology<M>) -> Result<(), DecodeError> {
        let undefined = |references: &BTreeSet<String>, kind: EntityKind| -> BTreeSet<String> {
            references
                .iter()
                .filter(|identifier| ontology.require(kind, identifier).is_err())
                .cloned()
                .collect()
        };

        let classes = undefined(&self.classes, EntityKind::Class);
        if !classes.is_empty() {
            return Err(DecodeError::UndefinedClasses(classes));
        }
        let properties = undefined(&self.properties, EntityKind::Property);
        if !properties.is_empty() {
            return Err(DecodeError::UndefinedProperties(properties));
        }
        let individuals = undefined(&self.individuals, EntityKind::Individual);
        if !individuals.is_empty() {
            return Err(DecodeError::UndefinedIndividuals(individuals));
        }
        Ok(())
    }
}

/// State for a single decode.
///
/// A context starts out unprepared. [`DecodeContext::prepared`] installs a
/// fresh ontology for entities to be defined into; decoding through an
/// unprepared context fails with [`DecodeError::NotPrepared`].
///
/// # Examples
///
/// ```
/// use question_ontology::{DecodeContext, DecodeError, OntologyDocument, WikidataMappings};
///
/// let document: OntologyDocument<WikidataMappings> = serde_json::from_str(
///     r#"{"classes": [{"identifier": "Mother", "superclasses": ["Parent"]}]}"#,
/// )
/// .unwrap();
///
/// let error = DecodeContext::prepared().decode(document.clone()).unwrap_err();
/// assert!(matches!(error, DecodeError::UndefinedClasses(ref ids) if ids.contains("Parent")));
///
/// let error = DecodeContext::new().decode(document).unwrap_err();
/// assert!(matches!(error, DecodeError::NotPrepared));
/// ```
#[derive(Debug)]
pub struct DecodeContext<M: OntologyMappings> {
    ontology: Option<Ontology<M>>,
    references: ReferenceLedger,
}

impl<M: OntologyMappings> DecodeContext<M> {
    /// An unprepared context.
    pub fn new() -> Self {
        Self {
            ontology: None,
            references: ReferenceLedger::default(),
        }
    }

    /// A context with a fresh ontology installed.
    pub fn prepared() -> Self {
        let mut context = Self::new();
        context.prepare();
        context
    }

    /// Installs a fresh ontology and clears the ledger.
    pub fn prepare(&mut self) {
        self.ontology = Some(Ontology::new());
        self.references = ReferenceLedger::default();
    }

    /// Whether [`DecodeContext::decode`] can run. A context is prepared by
    /// [`DecodeContext::prepared`] or [`DecodeContext::prepare`], and
    /// [`DecodeContext::new`] leaves it unprepared.
    pub fn is_prepared(&self) -> bool {
        self.ontology.is_some()
    }

    /// Decodes `document` into a validated ontology.
    pub fn decode(mut self, document: OntologyDocument<M>) -> Result<Ontology<M>, DecodeError> {
        if !self.is_prepared() {
            return Err(DecodeError::NotPrepared);
        }
        let OntologyDocument {
            classes,
            properties,
            individuals,
            class_mapping,
            property_mapping,
            individual_mapping,
            person_class,
            instance_property,
            label_property,
        } = document;
        debug!(
            "decoding ontology: {} classes, {} properties, {} individuals",
            classes.len(),
            properties.len(),
            individuals.len()
        );

        for class in classes {
            self.decode_class(class)?;
        }
        for property in properties {
            self.decode_property(property)?;
        }
        for individual in individuals {
            self.decode_individual(individual)?;
        }
        for identifier in class_mapping.keys() {
            self.references.reference(EntityKind::Class, identifier);
        }
        for identifier in property_mapping.keys() {
            self.references.reference(EntityKind::Property, identifier);
        }
        for identifier in individual_mapping.keys() {
            self.references.reference(EntityKind::Individual, identifier);
        }
        if let Some(identifier) = &person_class {
            self.references.reference(EntityKind::Class, identifier);
        }
        for identifier in instance_property.iter().chain(label_property.iter()) {
            self.references.reference(EntityKind::Property, identifier);
        }

        let mut ontology = self.ontology.take().ok_or(DecodeError::NotPrepared)?;
        debug!(
            "validating references: {} classes, {} properties, {} individuals",
            self.references.classes.len(),
            self.references.properties.len(),
            self.references.individuals.len()
        );
        self.references.validate(&ontology)?;

        install(&mut ontology, class_mapping, Ontology::map_class)?;
        install(&mut ontology, property_mapping, Ontology::map_property)?;
        install(&mut ontology, individual_mapping, Ontology::map_individual)?;

        if let Some(identifier) = &person_class {
            ontology.set_person_class(identifier)?;
        }
        if let Some(identifier) = &instance_property {
            ontology.set_instance_property(identifier)?;
        }
        if let Some(identifier) = &label_property {
            ontology.set_label_property(identifier)?;
        }
        Ok(ontology)
    }

    fn ontology_mut(&mut self) -> Result<&mut Ontology<M>, DecodeError> {
        self.ontology.as_mut().ok_or(DecodeError::NotPrepared)
    }

    fn decode_class(&mut self, document: ClassDocument) -> Result<(), DecodeError> {
        trace!("decoding class {}", document.identifier);
        let mut class = Class::new(document.identifier);
        for superclass in document.superclasses {
            self.references.reference(EntityKind::Class, &superclass);
            class.superclass_identifiers.insert(superclass);
        }
        for equivalent in document.equivalents {
            let equivalent = self.decode_equivalent(equivalent)?;
            class.equivalents.insert(equivalent);
        }
        ensure_defined_length(class.identifier(), &document.patterns)?;
        class.patterns = document.patterns;
        for relation in document.relations {
            self.references
                .reference(EntityKind::Property, &relation.property);
            if let Some(pattern) = &relation.pattern {
                ensure_defined_length(class.identifier(), std::slice::from_ref(pattern))?;
            }
            class.relations.insert(relation);
        }
        self.ontology_mut()?
            .insert_class(class)
            .map_err(duplicate)
    }

    fn decode_property(&mut self, document: PropertyDocument) -> Result<(), DecodeError> {
        trace!("decoding property {}", document.identifier);
        let mut property = Property::new(document.identifier);
        for superproperty in document.superproperties {
            self.references
                .reference(EntityKind::Property, &superproperty);
            property.superproperty_identifiers.insert(superproperty);
        }
        property.symmetric = document.symmetric;
        property.transitive = document.transitive;
        for equivalent in document.equivalents {
            let equivalent = self.decode_equivalent(equivalent)?;
            property.equivalents.insert(equivalent);
        }
        ensure_defined_length(property.identifier(), &document.patterns)?;
        property.patterns = document.patterns;
        self.ontology_mut()?
            .insert_property(property)
            .map_err(duplicate)
    }

    fn decode_individual(&mut self, document: IndividualDocument) -> Result<(), DecodeError> {
        trace!("decoding individual {}", document.identifier);
        let mut individual = Individual::new(document.identifier);
        for type_identifier in document.types {
            self.references.reference(EntityKind::Class, &type_identifier);
            individual.type_identifiers.insert(type_identifier);
        }
        self.ontology_mut()?
            .insert_individual(individual)
            .map_err(duplicate)
    }

    fn decode_equivalent(
        &mut self,
        document: EquivalentDocument,
    ) -> Result<Equivalent, DecodeError> {
        let EquivalentDocument { segments, or, and } = document;
        if let Some(segments) = segments {
            let segments = segments
                .into_iter()
                .map(|segment| self.decode_segment(segment))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Equivalent::Segments(segments));
        }
        if let Some(equivalents) = or {
            let equivalents = equivalents
                .into_iter()
                .map(|equivalent| self.decode_equivalent(equivalent))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Equivalent::Or(equivalents));
        }
        if let Some(equivalents) = and {
            let equivalents = equivalents
                .into_iter()
                .map(|equivalent| self.decode_equivalent(equivalent))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Equivalent::And(equivalents));
        }
        Err(DecodeError::MissingPropertyOneOf(
            EquivalentDocument::KEYS.to_vec(),
        ))
    }

    fn decode_segment(&mut self, document: SegmentDocument) -> Result<Segment, DecodeError> {
        let segment = if let Some(property) = document.incoming {
            Segment::Incoming(property)
        } else if let Some(property) = document.outgoing {
            Segment::Outgoing(property)
        } else if let Some(individual) = document.individual {
            Segment::Individual(individual)
        } else {
            return Err(DecodeError::MissingPropertyOneOf(
                SegmentDocument::KEYS.to_vec(),
            ));
        };
        self.references
            .reference(segment.referenced_kind(), segment.identifier());
        Ok(segment)
    }
}

impl<M: OntologyMappings> Default for DecodeContext<M> {
    fn default() -> Self {
        Self::new()
    }
}

fn duplicate(error: DefinitionError) -> DecodeError {
    match error {
        DefinitionError::DuplicateIdentifier {
            identifier,
            existing,
        } => DecodeError::DuplicateIdentifier {
            identifier,
            existing,
        },
        error => DecodeError::Definition(error),
    }
}

fn ensure_defined_length<T: HasDefinedLength>(
    identifier: &str,
    patterns: &[T],
) -> Result<(), DecodeError> {
    if patterns.iter().all(HasDefinedLength::has_defined_length) {
        Ok(())
    } else {
        Err(DecodeError::Definition(
            DefinitionError::UndefinedPatternLength {
                identifier: identifier.to_string(),
            },
        ))
    }
}

fn install<M, T>(
    ontology: &mut Ontology<M>,
    mapping: BTreeMap<String, T>,
    bind: fn(&mut Ontology<M>, &str, T) -> Result<(), DefinitionError>,
) -> Result<(), DecodeError>
where
    M: OntologyMappings,
    T: OntologyMapping,
{
    for (identifier, mapped) in mapping {
        bind(ontology, &identifier, mapped).map_err(|error| match error {
            DefinitionError::MappingInUse {
                mapped,
                kind,
                identifier: first,
            } => DecodeError::ConflictingMapping {
                kind,
                mapped,
                first,
                second: identifier.clone(),
            },
            error => DecodeError::Definition(error),
        })?;
    }
    Ok(())
}

impl<M: OntologyMappings> Ontology<M> {
    /// The document form of this ontology.
    ///
    /// Entities are sorted by identifier, and so are superclass, type and
    /// equivalent lists. Patterns keep the order they were attached in.
    pub fn to_document(&self) -> OntologyDocument<M> {
        let classes = self
            .classes()
            .into_iter()
            .map(|class| ClassDocument {
                identifier: class.identifier().to_string(),
                superclasses: sorted(class.superclass_identifiers()),
                equivalents: sorted_equivalents(class.equivalents()),
                patterns: class.patterns().to_vec(),
                relations: {
                    let mut relations: Vec<_> = class.relations().iter().cloned().collect();
                    relations.sort();
                    relations
                },
            })
            .collect();
        let properties = self
            .properties()
            .into_iter()
            .map(|property| PropertyDocument {
                identifier: property.identifier().to_string(),
                superproperties: sorted(property.superproperty_identifiers()),
                symmetric: property.is_symmetric(),
                transitive: property.is_transitive(),
                equivalents: sorted_equivalents(property.equivalents()),
                patterns: property.patterns().to_vec(),
            })
            .collect();
        let individuals = self
            .individuals()
            .into_iter()
            .map(|individual| IndividualDocument {
                identifier: individual.identifier().to_string(),
                types: sorted(individual.type_identifiers()),
            })
            .collect();

        OntologyDocument {
            classes,
            properties,
            individuals,
            class_mapping: self.class_mapping.to_sorted(),
            property_mapping: self.property_mapping.to_sorted(),
            individual_mapping: self.individual_mapping.to_sorted(),
            person_class: self.person_class_identifier().map(str::to_string),
            instance_property: self.instance_property_identifier().map(str::to_string),
            label_property: self.label_property_identifier().map(str::to_string),
        }
    }

    /// Decodes and validates `document` with a freshly prepared context.
    pub fn from_document(document: OntologyDocument<M>) -> Result<Self, DecodeError> {
        DecodeContext::prepared().decode(document)
    }

    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.to_document())
    }

    pub fn to_json_string_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.to_document())
    }

    pub fn from_json_str(json: &str) -> Result<Self, DecodeError> {
        let document: OntologyDocument<M> = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    pub fn from_json_slice(json: &[u8]) -> Result<Self, DecodeError> {
        let document: OntologyDocument<M> = serde_json::from_slice(json)?;
        Self::from_document(document)
    }
}

fn sorted_equivalents(equivalents: &HashSet<Equivalent>) -> Vec<EquivalentDocument> {
    let mut equivalents: Vec<&Equivalent> = equivalents.iter().collect();
    equivalents.sort();
    equivalents.into_iter().map(EquivalentDocument::from).collect()
}
