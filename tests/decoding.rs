//! Validation performed while decoding ontology documents.

use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use question_ontology::{
    DecodeContext, DecodeError, DefinitionError, EntityKind, Equivalent, Ontology,
    OntologyDocument, Segment, WikidataMappings,
};

type WikidataOntology = Ontology<WikidataMappings>;

fn decode(json: &str) -> Result<WikidataOntology, DecodeError> {
    WikidataOntology::from_json_str(json)
}

fn set(identifiers: &[&str]) -> BTreeSet<String> {
    identifiers.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_references_resolve_in_any_order() {
    let ontology = decode(
        r#"{
            "individuals": [{"identifier": "paris", "types": ["City"]}],
            "classes": [
                {"identifier": "City", "relations": [{"direction": "incoming", "property": "hasLocation"}]}
            ],
            "properties": [{"identifier": "hasLocation", "transitive": true}]
        }"#,
    )
    .unwrap();

    assert_eq!(ontology.individual("paris").unwrap().types(&ontology)[0].identifier(), "City");
    assert!(ontology.property("hasLocation").unwrap().is_transitive());
    assert_eq!(ontology.class("City").unwrap().relations().len(), 1);
}

#[test]
fn test_undefined_properties_are_aggregated() {
    let error = decode(
        r#"{
            "classes": [
                {"identifier": "City", "relations": [{"direction": "incoming", "property": "hasLocation"}]},
                {"identifier": "Country", "equivalents": [{"segments": [{"incoming": "hasCapital"}]}]}
            ],
            "properties": [{"identifier": "hasMayor", "superproperties": ["hasLeader"]}]
        }"#,
    )
    .unwrap_err();

    match error {
        DecodeError::UndefinedProperties(identifiers) => {
            assert_eq!(identifiers, set(&["hasCapital", "hasLeader", "hasLocation"]));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_undefined_individuals_in_nested_equivalents() {
    let error = decode(
        r#"{
            "properties": [{"identifier": "hasGender"}, {"identifier": "hasParent"}],
            "classes": [{"identifier": "Son", "equivalents": [{"and": [
                {"segments": [{"outgoing": "hasParent"}]},
                {"or": [
                    {"segments": [{"outgoing": "hasGender"}, {"individual": "male"}]},
                    {"segments": [{"outgoing": "hasGender"}, {"individual": "boy"}]}
                ]}
            ]}]}]
        }"#,
    )
    .unwrap_err();

    match error {
        DecodeError::UndefinedIndividuals(identifiers) => {
            assert_eq!(identifiers, set(&["boy", "male"]));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_or_equivalent_roundtrip() {
    let mut ontology = WikidataOntology::new();
    ontology.define_property("hasMother").unwrap();
    ontology.define_property("hasFather").unwrap();
    ontology
        .define_class("Parent")
        .unwrap()
        .has_equivalent(Equivalent::or([
            Equivalent::incoming("hasMother"),
            Equivalent::incoming("hasFather"),
        ]))
        .unwrap();

    let json = ontology.to_json_string().unwrap();
    assert!(json.contains(r#""or":[{"segments":[{"incoming":"hasMother"}]}"#));

    let decoded = decode(&json).unwrap();
    assert!(decoded.class("Parent").unwrap().equivalents().contains(&Equivalent::or([
        Equivalent::segments([Segment::incoming("hasMother")]),
        Equivalent::segments([Segment::incoming("hasFather")]),
    ])));
}

#[test]
fn test_segment_needs_a_variant_key() {
    let error = decode(
        r#"{"classes": [{"identifier": "A", "equivalents": [{"segments": [{"sideways": "x"}]}]}]}"#,
    )
    .unwrap_err();

    match error {
        DecodeError::MissingPropertyOneOf(keys) => {
            assert_eq!(keys, vec!["incoming", "outgoing", "individual"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_structural_errors_come_from_json() {
    assert!(matches!(
        decode(r#"{"classes": [{"superclasses": []}]}"#),
        Err(DecodeError::Json(_))
    ));
    assert!(matches!(
        decode(r#"{"classes": [{"identifier": "A", "patterns": [{}]}]}"#),
        Err(DecodeError::Json(_))
    ));
    assert!(matches!(decode("[]"), Err(DecodeError::Json(_))));
}

#[test]
fn test_positional_entities_are_rejected() {
    assert!(matches!(
        decode(r#"[[["A", ["B"]], ["B"]]]"#),
        Err(DecodeError::Json(_))
    ));
    assert!(matches!(
        decode(r#"{"classes": [["A", ["B"]], {"identifier": "B"}]}"#),
        Err(DecodeError::Json(_))
    ));
    assert!(matches!(
        decode(r#"{"properties": [{"identifier": "p", "equivalents": [[[["p"]]]]}]}"#),
        Err(DecodeError::Json(_))
    ));
}

#[test]
fn test_first_equivalent_key_wins() {
    let ontology = decode(
        r#"{
            "properties": [{"identifier": "hasParent"}, {"identifier": "hasChild"}],
            "classes": [{"identifier": "Child", "equivalents": [{
                "and": [{"segments": [{"outgoing": "hasChild"}]}],
                "segments": [{"outgoing": "hasParent"}]
            }]}]
        }"#,
    )
    .unwrap();

    let child = ontology.class("Child").unwrap();
    assert_eq!(child.equivalents().len(), 1);
    assert!(child.equivalents().contains(&Equivalent::outgoing("hasParent")));
}

#[test]
fn test_first_segment_key_wins() {
    let ontology = decode(
        r#"{
            "individuals": [{"identifier": "i"}],
            "properties": [{"identifier": "p"}],
            "classes": [{"identifier": "C", "equivalents": [{"segments": [
                {"outgoing": "p", "individual": "i", "x": 1}
            ]}]}]
        }"#,
    )
    .unwrap();

    let class = ontology.class("C").unwrap();
    assert!(class.equivalents().contains(&Equivalent::segments([Segment::outgoing("p")])));
    assert!(!class.equivalents().contains(&Equivalent::segments([Segment::individual("i")])));
}

#[test]
fn test_mapping_keys_must_be_defined() {
    let error = decode(
        r#"{"class_mapping": {"Person": {"identifier": "http://www.wikidata.org/entity/Q5"}}}"#,
    )
    .unwrap_err();
    assert!(matches!(error, DecodeError::UndefinedClasses(ref ids) if ids.contains("Person")));
}

#[test]
fn test_invalid_mapping_value() {
    let error = decode(
        r#"{
            "classes": [{"identifier": "Person"}],
            "class_mapping": {"Person": {"identifier": "https://example.com/Q5"}}
        }"#,
    )
    .unwrap_err();
    assert!(matches!(error, DecodeError::Json(_)));
}

#[test]
fn test_conflicting_mapping() {
    let error = decode(
        r#"{
            "classes": [{"identifier": "Human"}, {"identifier": "Person"}],
            "class_mapping": {
                "Human": {"identifier": "http://www.wikidata.org/entity/Q5"},
                "Person": {"identifier": "http://www.wikidata.org/entity/Q5"}
            }
        }"#,
    )
    .unwrap_err();

    match error {
        DecodeError::ConflictingMapping {
            kind,
            first,
            second,
            ..
        } => {
            assert_eq!(kind, EntityKind::Class);
            assert_eq!(first, "Human");
            assert_eq!(second, "Person");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_conflicting_mapping_across_kinds() {
    let error = decode(
        r#"{
            "classes": [{"identifier": "Female"}],
            "individuals": [{"identifier": "female"}],
            "class_mapping": {"Female": {"identifier": "http://www.wikidata.org/entity/Q6581072"}},
            "individual_mapping": {"female": {"identifier": "http://www.wikidata.org/entity/Q6581072"}}
        }"#,
    )
    .unwrap_err();

    assert!(matches!(
        error,
        DecodeError::ConflictingMapping {
            kind: EntityKind::Class,
            ..
        }
    ));
}

#[test]
fn test_duplicate_identifier_within_kind() {
    let error = decode(r#"{"properties": [{"identifier": "p"}, {"identifier": "p"}]}"#)
        .unwrap_err();
    assert!(matches!(
        error,
        DecodeError::DuplicateIdentifier {
            existing: EntityKind::Property,
            ..
        }
    ));
}

#[test]
fn test_patterns_without_defined_length_are_rejected() {
    let error = decode(
        r#"{"classes": [{"identifier": "Thing", "patterns": [{"named": {
            "type": "repetition",
            "min": 1,
            "pattern": {"type": "token", "condition": {
                "type": "label", "label": "lemma", "op": "=", "input": "thing"
            }}
        }}]}]}"#,
    )
    .unwrap_err();

    match error {
        DecodeError::Definition(DefinitionError::UndefinedPatternLength { identifier }) => {
            assert_eq!(identifier, "Thing");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_roles_are_decoded() {
    let ontology = decode(
        r#"{
            "classes": [{"identifier": "Person"}],
            "properties": [{"identifier": "instanceOf"}, {"identifier": "label"}],
            "property_mapping": {"label": {"label": null}},
            "person_class": "Person",
            "instance_property": "instanceOf",
            "label_property": "label"
        }"#,
    )
    .unwrap();

    assert_eq!(ontology.person_class().unwrap().identifier(), "Person");
    assert_eq!(ontology.instance_property().unwrap().identifier(), "instanceOf");
    assert_eq!(ontology.label_property().unwrap().identifier(), "label");
}

#[test]
fn test_role_of_the_wrong_kind() {
    let error = decode(
        r#"{
            "classes": [{"identifier": "Person"}],
            "label_property": "Person"
        }"#,
    )
    .unwrap_err();
    assert!(matches!(error, DecodeError::UndefinedProperties(ref ids) if ids.contains("Person")));
}

#[test]
fn test_decode_context_must_be_prepared() {
    let document: OntologyDocument<WikidataMappings> =
        serde_json::from_str(r#"{"classes": [{"identifier": "Person"}]}"#).unwrap();

    let context = DecodeContext::<WikidataMappings>::default();
    assert!(!context.is_prepared());
    assert!(matches!(
        context.decode(document.clone()),
        Err(DecodeError::NotPrepared)
    ));

    let ontology = DecodeContext::prepared().decode(document).unwrap();
    assert!(ontology.class("Person").is_some());
}

#[test]
fn test_unknown_keys_are_ignored() {
    let ontology = decode(
        r#"{
            "version": 2,
            "classes": [{"identifier": "Person", "comment": "a human being"}]
        }"#,
    )
    .unwrap();
    assert_eq!(ontology.classes().len(), 1);
}
