//! Basic graph pattern matching
//!
//! A basic graph pattern (BGP) is an ordered conjunction of triple
//! patterns. Evaluating one against a graph yields the multiset of
//! variable bindings satisfying every pattern under a single shared
//! mapping. Two engines are provided: the materializing engine in
//! [`exec`] produces the full solution list eagerly, the streaming engine
//! in [`stream`] produces a lazy single-consumer iterator. Both emit the
//! same multiset in the same deterministic order.

pub mod exec;
pub mod pattern;
pub mod plan;
pub mod stream;

pub use pattern::{BasicGraphPattern, A};
pub use stream::SolutionStream;

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;

use crate::graph::Graph;
use crate::model::{Term, Variable};

/// A solution mapping: bindings of variables to terms
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Solution {
    bindings: BTreeMap<Variable, Term>,
}

impl Solution {
    /// Creates a new empty solution
    pub fn new() -> Self {
        Solution::default()
    }

    /// Binds a variable, checking consistency
    ///
    /// Returns false if the variable is already bound to a different term;
    /// the solution is unchanged in that case.
    pub fn try_bind(&mut self, var: &Variable, value: Term) -> bool {
        match self.bindings.get(var) {
            Some(existing) => *existing == value,
            None => {
                self.bindings.insert(var.clone(), value);
                true
            }
        }
    }

    /// Gets the term bound to a variable
    pub fn get(&self, var: &Variable) -> Option<&Term> {
        self.bindings.get(var)
    }

    /// Returns true if the variable is bound
    pub fn is_bound(&self, var: &Variable) -> bool {
        self.bindings.contains_key(var)
    }

    /// Iterates over the bindings in variable order
    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Term)> {
        self.bindings.iter()
    }

    /// Number of bound variables
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if nothing is bound
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Merges two solutions, `None` on incompatible bindings
    pub fn merge(&self, other: &Solution) -> Option<Solution> {
        let mut merged = self.clone();
        for (var, value) in &other.bindings {
            if !merged.try_bind(var, value.clone()) {
                return None;
            }
        }
        Some(merged)
    }

    /// Restricts the solution to the given variables
    pub fn project(&self, vars: &BTreeSet<Variable>) -> Solution {
        Solution {
            bindings: self
                .bindings
                .iter()
                .filter(|(var, _)| vars.contains(*var))
                .map(|(var, term)| (var.clone(), term.clone()))
                .collect(),
        }
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (var, term)) in self.bindings.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{var} -> {term}")?;
        }
        write!(f, "}}")
    }
}

impl Graph {
    /// Evaluates a basic graph pattern, materializing all solutions
    pub fn query(&self, bgp: &BasicGraphPattern) -> Vec<Solution> {
        exec::evaluate(self, bgp)
    }

    /// Evaluates a basic graph pattern as a lazy solution stream
    ///
    /// The stream is single-consumer and does bounded work per pull;
    /// dropping it abandons all remaining work.
    pub fn stream_query<'g>(&'g self, bgp: &BasicGraphPattern) -> SolutionStream<'g> {
        stream::evaluate(self, bgp)
    }
}
