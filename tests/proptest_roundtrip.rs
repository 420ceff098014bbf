//! Property-based round-trip tests for the line-oriented formats

use proptest::prelude::*;

use rdf_mem::format::{NQuadsParser, NQuadsSerializer, NTriplesParser, NTriplesSerializer};
use rdf_mem::model::{BlankNode, Literal, NamedNode, Object, Subject, Triple};
use rdf_mem::{Dataset, Graph};

/// Generate valid IRI strings
fn iri_strategy() -> impl Strategy<Value = NamedNode> {
    prop::string::string_regex("[a-zA-Z0-9._~-]{1,12}")
        .unwrap()
        .prop_map(|s| NamedNode::new(format!("http://example.org/{s}")).unwrap())
}

/// Generate literal values including characters that need escaping
fn literal_strategy() -> impl Strategy<Value = Literal> {
    prop::string::string_regex("[a-zA-Z0-9 .,!?;:'\"\\\\\n\t-]{0,24}")
        .unwrap()
        .prop_map(Literal::new_simple_literal)
}

/// Generate valid blank node labels
fn blank_node_strategy() -> impl Strategy<Value = BlankNode> {
    prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_-]{0,8}")
        .unwrap()
        .prop_map(|s| BlankNode::new(s).unwrap())
}

fn subject_strategy() -> impl Strategy<Value = Subject> {
    prop_oneof![
        iri_strategy().prop_map(Subject::NamedNode),
        blank_node_strategy().prop_map(Subject::BlankNode),
    ]
}

fn object_strategy() -> impl Strategy<Value = Object> {
    prop_oneof![
        iri_strategy().prop_map(Object::NamedNode),
        blank_node_strategy().prop_map(Object::BlankNode),
        literal_strategy().prop_map(Object::Literal),
    ]
}

fn triple_strategy() -> impl Strategy<Value = Triple> {
    (subject_strategy(), iri_strategy(), object_strategy())
        .prop_map(|(s, p, o)| Triple::new(s, p, o))
}

proptest! {
    #[test]
    fn ntriples_roundtrip(triples in prop::collection::vec(triple_strategy(), 0..20)) {
        let graph: Graph = triples.into_iter().collect();
        let text = NTriplesSerializer::new().serialize_graph(&graph);
        let reparsed = NTriplesParser::new().parse_str(&text).unwrap();
        prop_assert_eq!(reparsed, graph);
    }

    #[test]
    fn nquads_roundtrip(
        default_triples in prop::collection::vec(triple_strategy(), 0..8),
        named_triples in prop::collection::vec(triple_strategy(), 0..8),
        graph_iri in iri_strategy(),
    ) {
        let mut dataset = Dataset::new();
        for triple in default_triples {
            dataset.insert(triple.into());
        }
        for triple in named_triples {
            dataset.insert(triple.in_graph(graph_iri.clone()));
        }
        let text = NQuadsSerializer::new().serialize_dataset(&dataset);
        let reparsed = NQuadsParser::new().parse_str(&text).unwrap();
        prop_assert_eq!(reparsed, dataset);
    }

    #[test]
    fn sorted_ntriples_is_deterministic(triples in prop::collection::vec(triple_strategy(), 0..12)) {
        let graph: Graph = triples.into_iter().collect();
        let first = NTriplesSerializer::new().sorted().serialize_graph(&graph);
        let second = NTriplesSerializer::new().sorted().serialize_graph(&graph.clone());
        prop_assert_eq!(first, second);
    }
}
