//! Selectivity-based pattern reordering
//!
//! Patterns whose positions are all concrete, or whose variables are
//! already bound by a preceding pattern, are the cheapest to evaluate:
//! they hit the subject and predicate indexes instead of scanning. The
//! planner greedily picks the most-bound remaining pattern at each step.
//! Reordering affects performance only; the solution multiset is
//! independent of it.

use std::collections::BTreeSet;

use crate::model::{TriplePattern, Variable};

/// Number of positions that are concrete or already bound
fn bound_positions(pattern: &TriplePattern, bound: &BTreeSet<Variable>) -> usize {
    let mut score = 0;
    let subject_bound = match pattern.subject.as_variable() {
        Some(v) => bound.contains(v),
        None => true,
    };
    if subject_bound {
        // A bound subject is worth more: it selects a single description
        score += 2;
    }
    if match pattern.predicate.as_variable() {
        Some(v) => bound.contains(v),
        None => true,
    } {
        score += 1;
    }
    if match pattern.object.as_variable() {
        Some(v) => bound.contains(v),
        None => true,
    } {
        score += 1;
    }
    score
}

fn unbound_variable_count(pattern: &TriplePattern, bound: &BTreeSet<Variable>) -> usize {
    pattern
        .variables()
        .into_iter()
        .filter(|v| !bound.contains(*v))
        .collect::<BTreeSet<_>>()
        .len()
}

/// Reorders patterns for selectivity
pub fn plan(patterns: &[TriplePattern]) -> Vec<TriplePattern> {
    let mut remaining: Vec<&TriplePattern> = patterns.iter().collect();
    let mut bound: BTreeSet<Variable> = BTreeSet::new();
    let mut ordered = Vec::with_capacity(patterns.len());

    while !remaining.is_empty() {
        // Greedy pick: most bound positions, then fewest fresh variables,
        // then declaration order
        let best = remaining
            .iter()
            .enumerate()
            .min_by_key(|(_, p)| {
                (
                    std::cmp::Reverse(bound_positions(p, &bound)),
                    unbound_variable_count(p, &bound),
                )
            })
            .map(|(i, _)| i)
            .expect("remaining is non-empty");

        let picked = remaining.remove(best);
        for variable in picked.variables() {
            bound.insert(variable.clone());
        }
        ordered.push(picked.clone());
    }

    ordered
}
