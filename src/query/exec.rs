//! Materializing BGP evaluation
//!
//! Produces the full solution list eagerly. Candidate enumeration walks
//! the graph's subject index and each description's predicate index, so a
//! pattern with a concrete (or bound) subject never scans the whole
//! graph.

use std::collections::BTreeSet;

use crate::description::Description;
use crate::graph::Graph;
use crate::model::{
    NamedNode, Object, ObjectPattern, PredicatePattern, Subject, SubjectPattern, Term,
    TriplePattern,
};
use crate::query::pattern::BasicGraphPattern;
use crate::query::{plan, Solution};

/// Evaluates a BGP against a graph, materializing all solutions
pub fn evaluate(graph: &Graph, bgp: &BasicGraphPattern) -> Vec<Solution> {
    if bgp.is_empty() {
        return vec![Solution::new()];
    }

    let planned = plan::plan(bgp.patterns());
    let free = bgp.free_variables();

    let mut partials = vec![Solution::new()];
    for pattern in &planned {
        let mut extended = Vec::new();
        for binding in &partials {
            extended.extend(match_pattern(graph, pattern, binding));
        }
        partials = extended;
        if partials.is_empty() {
            break;
        }
    }

    partials.iter().map(|s| s.project(&free)).collect()
}

/// Replaces variables that the binding already maps by their terms
///
/// Returns `None` when a bound term cannot occupy its position (a literal
/// in subject or predicate position): no triple can match, so the partial
/// solution is dead.
fn substitute(pattern: &TriplePattern, binding: &Solution) -> Option<TriplePattern> {
    let subject = match &pattern.subject {
        SubjectPattern::Variable(v) => match binding.get(v) {
            Some(Term::NamedNode(n)) => SubjectPattern::NamedNode(n.clone()),
            Some(Term::BlankNode(b)) => SubjectPattern::BlankNode(b.clone()),
            Some(Term::Literal(_)) => return None,
            None => pattern.subject.clone(),
        },
        concrete => concrete.clone(),
    };
    let predicate = match &pattern.predicate {
        PredicatePattern::Variable(v) => match binding.get(v) {
            Some(Term::NamedNode(n)) => PredicatePattern::NamedNode(n.clone()),
            Some(_) => return None,
            None => pattern.predicate.clone(),
        },
        concrete => concrete.clone(),
    };
    let object = match &pattern.object {
        ObjectPattern::Variable(v) => match binding.get(v) {
            Some(term) => Object::from(term.clone()).into(),
            None => pattern.object.clone(),
        },
        concrete => concrete.clone(),
    };
    Some(TriplePattern {
        subject,
        predicate,
        object,
    })
}

fn extend_binding(
    binding: &Solution,
    pattern: &TriplePattern,
    subject: &Subject,
    predicate: &NamedNode,
    object: &Object,
) -> Option<Solution> {
    let mut solution = binding.clone();
    if let SubjectPattern::Variable(v) = &pattern.subject {
        if !solution.try_bind(v, Term::from(subject.clone())) {
            return None;
        }
    }
    if let PredicatePattern::Variable(v) = &pattern.predicate {
        if !solution.try_bind(v, Term::NamedNode(predicate.clone())) {
            return None;
        }
    }
    if let ObjectPattern::Variable(v) = &pattern.object {
        if !solution.try_bind(v, Term::from(object.clone())) {
            return None;
        }
    }
    Some(solution)
}

/// Matches one pattern under a partial binding, lazily
///
/// Index use: a concrete subject looks up only that description, a
/// concrete predicate only that object set, a concrete object is a
/// membership test. The returned iterator borrows only the graph, so the
/// streaming engine can hold many of them at once.
pub(crate) fn match_pattern<'g>(
    graph: &'g Graph,
    pattern: &TriplePattern,
    binding: &Solution,
) -> Box<dyn Iterator<Item = Solution> + 'g> {
    let Some(resolved) = substitute(pattern, binding) else {
        return Box::new(std::iter::empty());
    };
    let binding = binding.clone();

    let descriptions: Box<dyn Iterator<Item = &'g Description> + 'g> =
        match resolved.subject.as_subject() {
            Some(subject) => match graph.description(&subject) {
                Some(description) => Box::new(std::iter::once(description)),
                None => Box::new(std::iter::empty()),
            },
            None => Box::new(graph.descriptions()),
        };

    Box::new(descriptions.flat_map(move |description| {
        let pattern = resolved.clone();
        let binding = binding.clone();

        let predications: Box<dyn Iterator<Item = (NamedNode, &'g BTreeSet<Object>)> + 'g> =
            match pattern.predicate.as_predicate() {
                Some(predicate) => match description.get(predicate) {
                    Some(objects) => Box::new(std::iter::once((predicate.clone(), objects))),
                    None => Box::new(std::iter::empty()),
                },
                None => Box::new(
                    description
                        .predications()
                        .map(|(p, objects)| (p.clone(), objects)),
                ),
            };

        predications.flat_map(move |(predicate, objects)| {
            let pattern = pattern.clone();
            let binding = binding.clone();
            let subject = description.subject().clone();

            let candidates: Box<dyn Iterator<Item = Object> + 'g> =
                match pattern.object.as_object() {
                    Some(object) => {
                        if objects.contains(&object) {
                            Box::new(std::iter::once(object))
                        } else {
                            Box::new(std::iter::empty())
                        }
                    }
                    None => Box::new(objects.iter().cloned()),
                };

            candidates.filter_map(move |object| {
                extend_binding(&binding, &pattern, &subject, &predicate, &object)
            })
        })
    }))
}
