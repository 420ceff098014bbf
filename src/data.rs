//! Uniform read protocol over descriptions, graphs, and datasets

use std::collections::BTreeSet;

use crate::dataset::Dataset;
use crate::description::Description;
use crate::graph::Graph;
use crate::model::{NamedNode, Object, Subject, Term, Triple};

/// The capability set shared by the three statement containers
///
/// Exposed as a trait so generic code can query any level of the data
/// model without caring which one it holds. Datasets answer over the
/// union of all their graphs.
pub trait RdfData {
    /// Number of triples
    fn triple_count(&self) -> usize;

    /// Iterates over all triples
    fn triples(&self) -> Box<dyn Iterator<Item = Triple> + '_>;

    /// The set of subjects
    fn subjects(&self) -> BTreeSet<Subject>;

    /// The set of predicates
    fn predicates(&self) -> BTreeSet<NamedNode>;

    /// The set of resource objects (literals are excluded)
    fn objects(&self) -> BTreeSet<Object>;

    /// The set of all resources appearing in the data
    fn resources(&self) -> BTreeSet<Term>;

    /// Membership test for a triple
    fn contains_triple(&self, triple: &Triple) -> bool;

    /// The description of a subject, if present
    fn description_of(&self, subject: &Subject) -> Option<Description>;

    /// Returns true if no statements are present
    fn is_empty(&self) -> bool {
        self.triple_count() == 0
    }
}

impl RdfData for Description {
    fn triple_count(&self) -> usize {
        Description::triple_count(self)
    }

    fn triples(&self) -> Box<dyn Iterator<Item = Triple> + '_> {
        Box::new(Description::triples(self))
    }

    fn subjects(&self) -> BTreeSet<Subject> {
        if Description::is_empty(self) {
            BTreeSet::new()
        } else {
            BTreeSet::from([self.subject().clone()])
        }
    }

    fn predicates(&self) -> BTreeSet<NamedNode> {
        Description::predicates(self)
    }

    fn objects(&self) -> BTreeSet<Object> {
        Description::objects(self)
    }

    fn resources(&self) -> BTreeSet<Term> {
        Description::resources(self)
    }

    fn contains_triple(&self, triple: &Triple) -> bool {
        self.describes(triple.subject()) && self.contains(triple.predicate(), triple.object())
    }

    fn description_of(&self, subject: &Subject) -> Option<Description> {
        self.describes(subject).then(|| self.clone())
    }
}

impl RdfData for Graph {
    fn triple_count(&self) -> usize {
        Graph::triple_count(self)
    }

    fn triples(&self) -> Box<dyn Iterator<Item = Triple> + '_> {
        Box::new(Graph::triples(self))
    }

    fn subjects(&self) -> BTreeSet<Subject> {
        Graph::subjects(self)
    }

    fn predicates(&self) -> BTreeSet<NamedNode> {
        Graph::predicates(self)
    }

    fn objects(&self) -> BTreeSet<Object> {
        Graph::objects(self)
    }

    fn resources(&self) -> BTreeSet<Term> {
        Graph::resources(self)
    }

    fn contains_triple(&self, triple: &Triple) -> bool {
        self.contains(triple)
    }

    fn description_of(&self, subject: &Subject) -> Option<Description> {
        self.description(subject).cloned()
    }
}

impl RdfData for Dataset {
    fn triple_count(&self) -> usize {
        self.quad_count()
    }

    fn triples(&self) -> Box<dyn Iterator<Item = Triple> + '_> {
        Box::new(self.quads().map(|q| q.to_triple()))
    }

    fn subjects(&self) -> BTreeSet<Subject> {
        self.all_graphs().flat_map(Graph::subjects).collect()
    }

    fn predicates(&self) -> BTreeSet<NamedNode> {
        self.all_graphs().flat_map(Graph::predicates).collect()
    }

    fn objects(&self) -> BTreeSet<Object> {
        self.all_graphs().flat_map(Graph::objects).collect()
    }

    fn resources(&self) -> BTreeSet<Term> {
        self.all_graphs().flat_map(Graph::resources).collect()
    }

    fn contains_triple(&self, triple: &Triple) -> bool {
        self.all_graphs().any(|g| g.contains(triple))
    }

    fn description_of(&self, subject: &Subject) -> Option<Description> {
        let mut result: Option<Description> = None;
        for graph in self.all_graphs() {
            if let Some(description) = graph.description(subject) {
                match &mut result {
                    Some(combined) => {
                        combined.add_description(description);
                    }
                    none => *none = Some(description.clone()),
                }
            }
        }
        result
    }
}

impl Dataset {
    /// Iterates over the default graph and all named graphs
    pub fn all_graphs(&self) -> impl Iterator<Item = &Graph> {
        std::iter::once(self.default_graph()).chain(self.named_graphs())
    }
}
