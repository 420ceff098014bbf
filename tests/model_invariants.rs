//! Algebraic invariants of the container levels

use rdf_mem::model::{NamedNode, Object, Subject, Triple};
use rdf_mem::{Description, Graph, Literal, RdfData};

fn node(iri: &str) -> NamedNode {
    NamedNode::new(iri).unwrap()
}

fn triple(s: &str, p: &str, o: &str) -> Triple {
    Triple::new(node(s), node(p), node(o))
}

#[test]
fn add_is_idempotent() {
    let mut graph = Graph::new();
    let t = triple("http://ex/s", "http://ex/p", "http://ex/o");
    graph.add(t.clone()).unwrap();
    let once = graph.clone();
    graph.add(t).unwrap();
    assert_eq!(graph, once);
}

#[test]
fn delete_undoes_add() {
    let mut base = Graph::new();
    base.add(triple("http://ex/a", "http://ex/p", "http://ex/b"))
        .unwrap();

    let extra = triple("http://ex/x", "http://ex/p", "http://ex/y");
    let mut modified = base.clone();
    modified.add(extra.clone()).unwrap();
    modified.delete(extra).unwrap();
    assert_eq!(modified, base);
}

#[test]
fn delete_of_preexisting_triple_removes_the_single_copy() {
    // Sets collapse duplicates, so adding an existing triple and deleting
    // it removes the statement entirely
    let t = triple("http://ex/a", "http://ex/p", "http://ex/b");
    let mut graph = Graph::new();
    graph.add(t.clone()).unwrap();
    graph.add(t.clone()).unwrap();
    graph.delete(t.clone()).unwrap();
    assert!(!graph.contains(&t));
}

#[test]
fn put_leaves_exactly_the_given_objects() {
    let mut graph = Graph::new();
    graph.add(("http://ex/s", "http://ex/p", "old1")).unwrap();
    graph.add(("http://ex/s", "http://ex/p", "old2")).unwrap();

    graph
        .put(vec![
            ("http://ex/s", "http://ex/p", "new1"),
            ("http://ex/s", "http://ex/p", "new2"),
        ])
        .unwrap();

    let subject = Subject::NamedNode(node("http://ex/s"));
    let objects = graph
        .description(&subject)
        .unwrap()
        .get(&node("http://ex/p"))
        .unwrap()
        .clone();
    let expected: std::collections::BTreeSet<Object> = [
        Object::Literal(Literal::new_simple_literal("new1")),
        Object::Literal(Literal::new_simple_literal("new2")),
    ]
    .into_iter()
    .collect();
    assert_eq!(objects, expected);
}

#[test]
fn equality_depends_on_name_and_triples_only() {
    let mut g1 = Graph::new();
    g1.add(triple("http://ex/s", "http://ex/p", "http://ex/o"))
        .unwrap();

    let mut g2 = g1.clone();
    g2.add_prefixes([("ex", "http://ex/")]);
    g2.set_base_iri("http://ex/").unwrap();
    assert_eq!(g1, g2);

    let g3 = g1.clone().with_name("http://ex/graph").unwrap();
    assert_ne!(g1, g3);

    let mut g4 = g1.clone();
    g4.add(triple("http://ex/s2", "http://ex/p", "http://ex/o"))
        .unwrap();
    assert_ne!(g1, g4);
}

#[test]
fn implicit_merge_keeps_first_prefix_binding() {
    let mut g1 = Graph::new();
    g1.add_prefixes([("ex", "http://a/")]);
    let mut g2 = Graph::new();
    g2.add_prefixes([("ex", "http://b/")]);
    g2.add(("http://b/s", "http://b/p", "x")).unwrap();

    g1.add(&g2).unwrap();
    assert_eq!(g1.prefixes().unwrap().get("ex"), Some("http://a/"));
}

#[test]
fn description_put_replaces_single_predicate_only() {
    let mut description = Description::new("http://ex/s").unwrap();
    description.add("http://ex/p1", "o1").unwrap();
    description.add("http://ex/p2", "o2").unwrap();

    description.put("http://ex/p1", "o3").unwrap();

    assert_eq!(
        description.get(&node("http://ex/p1")).unwrap().len(),
        1
    );
    assert!(description.contains(
        &node("http://ex/p1"),
        &Object::Literal(Literal::new_simple_literal("o3"))
    ));
    assert!(description.contains(
        &node("http://ex/p2"),
        &Object::Literal(Literal::new_simple_literal("o2"))
    ));
}

#[test]
fn failed_bulk_mutation_leaves_value_unchanged() {
    let mut graph = Graph::new();
    graph.add(("http://ex/s", "http://ex/p", "keep")).unwrap();
    let before = graph.clone();

    let result = graph.add(vec![
        ("http://ex/s", "http://ex/p", "fine"),
        ("http://ex/s", "no scheme here", "bad"),
    ]);
    assert!(result.is_err());
    assert_eq!(graph, before);
}

#[test]
fn uniform_protocol_counts_agree() {
    let mut graph = Graph::new();
    graph.add(("http://ex/s", "http://ex/p", "x")).unwrap();
    graph
        .add(("http://ex/s", "http://ex/q", node("http://ex/o")))
        .unwrap();

    let from_trait: Vec<Triple> = RdfData::triples(&graph).collect();
    assert_eq!(from_trait.len(), RdfData::triple_count(&graph));

    let subject = Subject::NamedNode(node("http://ex/s"));
    let description = RdfData::description_of(&graph, &subject).unwrap();
    assert_eq!(description.triple_count(), 2);
}
