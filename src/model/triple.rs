//! Triples, quads, and graph names

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{NamedNode, Object, Predicate, Subject};

/// A subject-predicate-object statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    subject: Subject,
    predicate: Predicate,
    object: Object,
}

impl Triple {
    /// Creates a new triple
    pub fn new(
        subject: impl Into<Subject>,
        predicate: impl Into<Predicate>,
        object: impl Into<Object>,
    ) -> Self {
        Triple {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// Returns the subject
    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    /// Returns the predicate
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// Returns the object
    pub fn object(&self) -> &Object {
        &self.object
    }

    /// Destructures the triple into its components
    pub fn into_parts(self) -> (Subject, Predicate, Object) {
        (self.subject, self.predicate, self.object)
    }

    /// Attaches a graph name, turning the triple into a quad
    pub fn in_graph(self, graph_name: impl Into<GraphName>) -> Quad {
        Quad {
            subject: self.subject,
            predicate: self.predicate,
            object: self.object,
            graph_name: graph_name.into(),
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

/// The graph component of a quad
///
/// `DefaultGraph` is the sentinel for statements in the unnamed default
/// graph of a dataset.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum GraphName {
    NamedNode(NamedNode),
    BlankNode(crate::model::BlankNode),
    #[default]
    DefaultGraph,
}

impl GraphName {
    /// Returns true if this is the default graph sentinel
    pub fn is_default_graph(&self) -> bool {
        matches!(self, GraphName::DefaultGraph)
    }
}

impl fmt::Display for GraphName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphName::NamedNode(n) => write!(f, "{n}"),
            GraphName::BlankNode(b) => write!(f, "{b}"),
            GraphName::DefaultGraph => write!(f, "DEFAULT"),
        }
    }
}

impl From<NamedNode> for GraphName {
    fn from(node: NamedNode) -> Self {
        GraphName::NamedNode(node)
    }
}

impl From<crate::model::BlankNode> for GraphName {
    fn from(node: crate::model::BlankNode) -> Self {
        GraphName::BlankNode(node)
    }
}

impl From<Subject> for GraphName {
    fn from(subject: Subject) -> Self {
        match subject {
            Subject::NamedNode(nn) => GraphName::NamedNode(nn),
            Subject::BlankNode(bn) => GraphName::BlankNode(bn),
        }
    }
}

/// A triple together with the name of the graph holding it
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Quad {
    subject: Subject,
    predicate: Predicate,
    object: Object,
    graph_name: GraphName,
}

impl Quad {
    /// Creates a new quad
    pub fn new(
        subject: impl Into<Subject>,
        predicate: impl Into<Predicate>,
        object: impl Into<Object>,
        graph_name: impl Into<GraphName>,
    ) -> Self {
        Quad {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            graph_name: graph_name.into(),
        }
    }

    /// Returns the subject
    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    /// Returns the predicate
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// Returns the object
    pub fn object(&self) -> &Object {
        &self.object
    }

    /// Returns the graph name
    pub fn graph_name(&self) -> &GraphName {
        &self.graph_name
    }

    /// Drops the graph name, returning the bare triple
    pub fn to_triple(&self) -> Triple {
        Triple {
            subject: self.subject.clone(),
            predicate: self.predicate.clone(),
            object: self.object.clone(),
        }
    }

    /// Destructures the quad into its components
    pub fn into_parts(self) -> (Subject, Predicate, Object, GraphName) {
        (self.subject, self.predicate, self.object, self.graph_name)
    }
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.graph_name {
            GraphName::DefaultGraph => {
                write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
            }
            name => write!(
                f,
                "{} {} {} {} .",
                self.subject, self.predicate, self.object, name
            ),
        }
    }
}

impl From<Triple> for Quad {
    fn from(triple: Triple) -> Self {
        triple.in_graph(GraphName::DefaultGraph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlankNode, Literal};

    fn node(iri: &str) -> NamedNode {
        NamedNode::new(iri).unwrap()
    }

    #[test]
    fn test_triple_accessors() {
        let triple = Triple::new(
            node("http://example.org/s"),
            node("http://example.org/p"),
            Literal::new_simple_literal("o"),
        );
        assert_eq!(triple.subject().as_named_node().unwrap().as_str(), "http://example.org/s");
        assert_eq!(triple.predicate().as_str(), "http://example.org/p");
        assert!(triple.object().as_literal().is_some());
    }

    #[test]
    fn test_quad_default_graph() {
        let quad: Quad = Triple::new(
            BlankNode::new("s").unwrap(),
            node("http://example.org/p"),
            node("http://example.org/o"),
        )
        .into();
        assert!(quad.graph_name().is_default_graph());
        assert_eq!(format!("{quad}"), "_:s <http://example.org/p> <http://example.org/o> .");
    }

    #[test]
    fn test_quad_roundtrip_to_triple() {
        let triple = Triple::new(
            node("http://example.org/s"),
            node("http://example.org/p"),
            node("http://example.org/o"),
        );
        let quad = triple.clone().in_graph(node("http://example.org/g"));
        assert_eq!(quad.to_triple(), triple);
    }
}
