//! End-to-end checks of the two BGP engines

use rdf_mem::model::{NamedNode, Term, Variable};
use rdf_mem::query::{BasicGraphPattern, Solution};
use rdf_mem::{Graph, RdfError};

fn node(iri: &str) -> NamedNode {
    NamedNode::new(iri).unwrap()
}

fn var(name: &str) -> Variable {
    Variable::new(name).unwrap()
}

fn multiset(mut solutions: Vec<Solution>) -> Vec<Solution> {
    solutions.sort();
    solutions
}

#[test]
fn self_join_only_matches_reflexive_triples() {
    let mut graph = Graph::new();
    graph
        .add(("http://ex/a", "http://ex/p", node("http://ex/a")))
        .unwrap();
    graph
        .add(("http://ex/a", "http://ex/p", node("http://ex/b")))
        .unwrap();

    let bgp = BasicGraphPattern::new()
        .pattern(var("x"), "http://ex/p", var("x"))
        .unwrap();

    for solutions in [graph.query(&bgp), graph.stream_query(&bgp).collect()] {
        assert_eq!(solutions.len(), 1);
        assert_eq!(
            solutions[0].get(&var("x")),
            Some(&Term::NamedNode(node("http://ex/a")))
        );
    }
}

#[test]
fn both_strategies_emit_the_same_multiset() {
    let mut graph = Graph::new();
    for i in 0..20 {
        graph
            .add((
                format!("http://ex/person{i}").as_str(),
                "http://ex/knows",
                node(&format!("http://ex/person{}", (i + 3) % 20)),
            ))
            .unwrap();
        graph
            .add((
                format!("http://ex/person{i}").as_str(),
                "http://ex/age",
                (20 + i) as i64,
            ))
            .unwrap();
    }

    let bgp = BasicGraphPattern::new()
        .pattern(var("a"), "http://ex/knows", var("b"))
        .unwrap()
        .pattern(var("b"), "http://ex/knows", var("c"))
        .unwrap()
        .pattern(var("a"), "http://ex/age", var("age"))
        .unwrap();

    let materialized = multiset(graph.query(&bgp));
    let streamed = multiset(graph.stream_query(&bgp).collect());
    assert_eq!(materialized, streamed);
    assert_eq!(materialized.len(), 20);
}

#[test]
fn streamed_prefix_matches_materialized_prefix() {
    let mut graph = Graph::new();
    for i in 0..30 {
        graph
            .add((
                format!("http://ex/s{i:02}").as_str(),
                "http://ex/p",
                i as i64,
            ))
            .unwrap();
    }
    let bgp = BasicGraphPattern::new()
        .pattern(var("s"), "http://ex/p", var("o"))
        .unwrap();

    let materialized = graph.query(&bgp);
    for k in [0, 1, 7, 30] {
        let streamed: Vec<Solution> = graph.stream_query(&bgp).take(k).collect();
        assert_eq!(streamed.as_slice(), &materialized[..k]);
    }
}

#[test]
fn taking_one_solution_is_cheap_on_a_large_graph() {
    let mut graph = Graph::new();
    for i in 0..200_000u32 {
        graph
            .add((
                format!("http://ex/s{i}").as_str(),
                "http://ex/p",
                node(&format!("http://ex/o{i}")),
            ))
            .unwrap();
    }
    let bgp = BasicGraphPattern::new()
        .pattern(var("s"), var("p"), var("o"))
        .unwrap();

    // Pulling a single solution must not materialize the result set
    let started = std::time::Instant::now();
    let first = graph.stream_query(&bgp).next();
    assert!(first.is_some());
    assert!(started.elapsed() < std::time::Duration::from_secs(1));
}

#[test]
fn zero_pattern_query_yields_one_empty_solution() {
    let mut graph = Graph::new();
    graph.add(("http://ex/s", "http://ex/p", "x")).unwrap();

    let bgp = BasicGraphPattern::new();
    assert_eq!(graph.query(&bgp), vec![Solution::new()]);
    let streamed: Vec<Solution> = graph.stream_query(&bgp).collect();
    assert_eq!(streamed, vec![Solution::new()]);
}

#[test]
fn literal_in_subject_position_is_rejected_at_build_time() {
    let result = BasicGraphPattern::new().pattern(
        rdf_mem::Literal::new_simple_literal("nope"),
        "http://ex/p",
        var("o"),
    );
    assert!(matches!(result, Err(RdfError::InvalidQuery(_))));
}

#[test]
fn path_builder_hides_intermediate_bindings() {
    let mut graph = Graph::new();
    graph
        .add(("http://ex/a", "http://ex/p", node("http://ex/mid")))
        .unwrap();
    graph
        .add(("http://ex/mid", "http://ex/q", node("http://ex/z")))
        .unwrap();

    let bgp = BasicGraphPattern::new()
        .path(var("s"), ["http://ex/p", "http://ex/q"], var("o"))
        .unwrap();

    let solutions = graph.query(&bgp);
    assert_eq!(solutions.len(), 1);
    let solution = &solutions[0];
    assert_eq!(solution.len(), 2);
    assert_eq!(
        solution.get(&var("o")),
        Some(&Term::NamedNode(node("http://ex/z")))
    );
}

#[test]
fn fan_out_constrains_all_objects() {
    let mut graph = Graph::new();
    graph
        .add(("http://ex/both", "http://ex/p", node("http://ex/one")))
        .unwrap();
    graph
        .add(("http://ex/both", "http://ex/p", node("http://ex/two")))
        .unwrap();
    graph
        .add(("http://ex/only", "http://ex/p", node("http://ex/one")))
        .unwrap();

    let bgp = BasicGraphPattern::new()
        .fan_out(
            var("s"),
            "http://ex/p",
            [node("http://ex/one"), node("http://ex/two")],
        )
        .unwrap();

    let solutions = graph.query(&bgp);
    assert_eq!(solutions.len(), 1);
    assert_eq!(
        solutions[0].get(&var("s")),
        Some(&Term::NamedNode(node("http://ex/both")))
    );
}

#[test]
fn bound_predicate_variables_join() {
    let mut graph = Graph::new();
    graph
        .add(("http://ex/a", "http://ex/p", node("http://ex/b")))
        .unwrap();
    graph
        .add(("http://ex/b", "http://ex/p", node("http://ex/c")))
        .unwrap();
    graph
        .add(("http://ex/b", "http://ex/q", node("http://ex/d")))
        .unwrap();

    // ?pred joins across both patterns
    let bgp = BasicGraphPattern::new()
        .pattern(node("http://ex/a"), var("pred"), var("m"))
        .unwrap()
        .pattern(var("m"), var("pred"), var("end"))
        .unwrap();

    let solutions = graph.query(&bgp);
    assert_eq!(solutions.len(), 1);
    assert_eq!(
        solutions[0].get(&var("end")),
        Some(&Term::NamedNode(node("http://ex/c")))
    );
}
