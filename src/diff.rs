//! Structural diff between graphs

use std::collections::BTreeSet;
use std::fmt;

use crate::description::Description;
use crate::graph::Graph;
use crate::model::{Subject, Triple};

/// The difference between two graphs, expressed as a pair of patch graphs
///
/// `deletions` holds the statements only the first graph carries,
/// `additions` the statements only the second one does. Applying the diff
/// to the first graph yields the second (up to name and metadata, which
/// take no part in the comparison).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphDiff {
    additions: Graph,
    deletions: Graph,
}

impl GraphDiff {
    /// Computes the difference from `before` to `after`
    ///
    /// Descriptions are compared subject by subject and predicate by
    /// predicate, so the work is proportional to the descriptions that
    /// actually differ plus one index walk.
    pub fn between(before: &Graph, after: &Graph) -> Self {
        let mut diff = GraphDiff::default();

        let before_subjects = before.subjects();
        let after_subjects = after.subjects();
        for subject in before_subjects.union(&after_subjects) {
            match (before.description(subject), after.description(subject)) {
                (Some(old), Some(new)) => {
                    if old != new {
                        diff.diff_descriptions(old, new);
                    }
                }
                (Some(removed), None) => {
                    for triple in removed.triples() {
                        diff.deletions.insert(triple);
                    }
                }
                (None, Some(added)) => {
                    for triple in added.triples() {
                        diff.additions.insert(triple);
                    }
                }
                (None, None) => {}
            }
        }

        diff
    }

    /// Records the statement-level difference of two descriptions of the
    /// same subject
    fn diff_descriptions(&mut self, old: &Description, new: &Description) {
        for (predicate, objects) in old.predications() {
            let kept = new.get(predicate);
            for object in objects {
                if !kept.is_some_and(|set| set.contains(object)) {
                    self.deletions.insert(Triple::new(
                        old.subject().clone(),
                        predicate.clone(),
                        object.clone(),
                    ));
                }
            }
        }
        for (predicate, objects) in new.predications() {
            let kept = old.get(predicate);
            for object in objects {
                if !kept.is_some_and(|set| set.contains(object)) {
                    self.additions.insert(Triple::new(
                        new.subject().clone(),
                        predicate.clone(),
                        object.clone(),
                    ));
                }
            }
        }
    }

    /// Statements present only in the second graph
    pub fn additions(&self) -> &Graph {
        &self.additions
    }

    /// Statements present only in the first graph
    pub fn deletions(&self) -> &Graph {
        &self.deletions
    }

    /// Returns true if both graphs hold the same statements
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.deletions.is_empty()
    }

    /// Total number of differing statements
    pub fn change_count(&self) -> usize {
        self.additions.triple_count() + self.deletions.triple_count()
    }

    /// The subjects whose descriptions differ
    pub fn changed_subjects(&self) -> BTreeSet<Subject> {
        let mut subjects = self.additions.subjects();
        subjects.extend(self.deletions.subjects());
        subjects
    }

    /// Applies the diff to a graph, producing the patched value
    ///
    /// The input's name and metadata are preserved.
    pub fn apply_to(&self, graph: &Graph) -> Graph {
        let mut patched = graph.clone();
        for triple in self.deletions.triples() {
            patched.remove(&triple);
        }
        for triple in self.additions.triples() {
            patched.insert(triple);
        }
        patched
    }

    /// The reverse patch: applying it undoes this diff
    pub fn inverted(&self) -> GraphDiff {
        GraphDiff {
            additions: self.deletions.clone(),
            deletions: self.additions.clone(),
        }
    }
}

impl fmt::Display for GraphDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "+{} -{} across {} subjects",
            self.additions.triple_count(),
            self.deletions.triple_count(),
            self.changed_subjects().len()
        )
    }
}
