//! Streaming BGP evaluation
//!
//! A lazy depth-first join over the planned patterns. Each stack level
//! holds the candidate iterator for one pattern under the bindings of the
//! levels below it, so pulling one solution does only the work needed to
//! reach the next match. Dropping the stream drops the stack and with it
//! all interior state.
//!
//! Both engines walk the same indexes in the same order, so the first k
//! streamed solutions equal the first k materialized ones.

use std::collections::BTreeSet;

use crate::graph::Graph;
use crate::model::{TriplePattern, Variable};
use crate::query::exec::match_pattern;
use crate::query::pattern::BasicGraphPattern;
use crate::query::{plan, Solution};

/// A lazy, finite, single-consumer sequence of solutions
pub struct SolutionStream<'g> {
    graph: &'g Graph,
    patterns: Vec<TriplePattern>,
    free: BTreeSet<Variable>,
    stack: Vec<Box<dyn Iterator<Item = Solution> + 'g>>,
    empty_emitted: bool,
}

/// Evaluates a BGP against a graph as a lazy stream
pub fn evaluate<'g>(graph: &'g Graph, bgp: &BasicGraphPattern) -> SolutionStream<'g> {
    let patterns = plan::plan(bgp.patterns());
    let mut stream = SolutionStream {
        graph,
        free: bgp.free_variables(),
        stack: Vec::with_capacity(patterns.len()),
        patterns,
        empty_emitted: false,
    };
    if let Some(first) = stream.patterns.first() {
        stream
            .stack
            .push(match_pattern(graph, first, &Solution::new()));
    }
    stream
}

impl<'g> Iterator for SolutionStream<'g> {
    type Item = Solution;

    fn next(&mut self) -> Option<Solution> {
        if self.patterns.is_empty() {
            // A zero-pattern query has exactly the empty solution
            if self.empty_emitted {
                return None;
            }
            self.empty_emitted = true;
            return Some(Solution::new());
        }

        loop {
            let depth = self.stack.len();
            if depth == 0 {
                return None;
            }
            match self.stack[depth - 1].next() {
                Some(binding) => {
                    if depth == self.patterns.len() {
                        return Some(binding.project(&self.free));
                    }
                    let next_level = match_pattern(self.graph, &self.patterns[depth], &binding);
                    self.stack.push(next_level);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
