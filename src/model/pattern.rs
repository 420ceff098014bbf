//! Triple patterns: triples whose positions may be variables
//!
//! A pattern element is a tagged variant of either a concrete term or a
//! named variable. Strings are never overloaded as variables; the query
//! builder normalizes inputs before a pattern is constructed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{BlankNode, Literal, NamedNode, Object, Subject, Term, Variable};

/// Pattern for the subject position
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SubjectPattern {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
    Variable(Variable),
}

impl SubjectPattern {
    /// Returns the concrete subject if this pattern is not a variable
    pub fn as_subject(&self) -> Option<Subject> {
        match self {
            SubjectPattern::NamedNode(n) => Some(Subject::NamedNode(n.clone())),
            SubjectPattern::BlankNode(b) => Some(Subject::BlankNode(b.clone())),
            SubjectPattern::Variable(_) => None,
        }
    }

    /// Returns the variable if this pattern is one
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            SubjectPattern::Variable(v) => Some(v),
            _ => None,
        }
    }
}

impl From<Subject> for SubjectPattern {
    fn from(subject: Subject) -> Self {
        match subject {
            Subject::NamedNode(n) => SubjectPattern::NamedNode(n),
            Subject::BlankNode(b) => SubjectPattern::BlankNode(b),
        }
    }
}

impl From<Variable> for SubjectPattern {
    fn from(variable: Variable) -> Self {
        SubjectPattern::Variable(variable)
    }
}

impl fmt::Display for SubjectPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubjectPattern::NamedNode(n) => write!(f, "{n}"),
            SubjectPattern::BlankNode(b) => write!(f, "{b}"),
            SubjectPattern::Variable(v) => write!(f, "{v}"),
        }
    }
}

/// Pattern for the predicate position
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PredicatePattern {
    NamedNode(NamedNode),
    Variable(Variable),
}

impl PredicatePattern {
    /// Returns the concrete predicate if this pattern is not a variable
    pub fn as_predicate(&self) -> Option<&NamedNode> {
        match self {
            PredicatePattern::NamedNode(n) => Some(n),
            PredicatePattern::Variable(_) => None,
        }
    }

    /// Returns the variable if this pattern is one
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            PredicatePattern::Variable(v) => Some(v),
            _ => None,
        }
    }
}

impl From<NamedNode> for PredicatePattern {
    fn from(node: NamedNode) -> Self {
        PredicatePattern::NamedNode(node)
    }
}

impl From<Variable> for PredicatePattern {
    fn from(variable: Variable) -> Self {
        PredicatePattern::Variable(variable)
    }
}

impl fmt::Display for PredicatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredicatePattern::NamedNode(n) => write!(f, "{n}"),
            PredicatePattern::Variable(v) => write!(f, "{v}"),
        }
    }
}

/// Pattern for the object position
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObjectPattern {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
    Literal(Literal),
    Variable(Variable),
}

impl ObjectPattern {
    /// Returns the concrete object if this pattern is not a variable
    pub fn as_object(&self) -> Option<Object> {
        match self {
            ObjectPattern::NamedNode(n) => Some(Object::NamedNode(n.clone())),
            ObjectPattern::BlankNode(b) => Some(Object::BlankNode(b.clone())),
            ObjectPattern::Literal(l) => Some(Object::Literal(l.clone())),
            ObjectPattern::Variable(_) => None,
        }
    }

    /// Returns the variable if this pattern is one
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            ObjectPattern::Variable(v) => Some(v),
            _ => None,
        }
    }
}

impl From<Object> for ObjectPattern {
    fn from(object: Object) -> Self {
        match object {
            Object::NamedNode(n) => ObjectPattern::NamedNode(n),
            Object::BlankNode(b) => ObjectPattern::BlankNode(b),
            Object::Literal(l) => ObjectPattern::Literal(l),
        }
    }
}

impl From<Term> for ObjectPattern {
    fn from(term: Term) -> Self {
        Object::from(term).into()
    }
}

impl From<Variable> for ObjectPattern {
    fn from(variable: Variable) -> Self {
        ObjectPattern::Variable(variable)
    }
}

impl fmt::Display for ObjectPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectPattern::NamedNode(n) => write!(f, "{n}"),
            ObjectPattern::BlankNode(b) => write!(f, "{b}"),
            ObjectPattern::Literal(l) => write!(f, "{l}"),
            ObjectPattern::Variable(v) => write!(f, "{v}"),
        }
    }
}

/// A triple whose positions may be variables
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TriplePattern {
    pub subject: SubjectPattern,
    pub predicate: PredicatePattern,
    pub object: ObjectPattern,
}

impl TriplePattern {
    /// Creates a new triple pattern
    pub fn new(
        subject: impl Into<SubjectPattern>,
        predicate: impl Into<PredicatePattern>,
        object: impl Into<ObjectPattern>,
    ) -> Self {
        TriplePattern {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// Returns the variables occurring in this pattern, in position order
    pub fn variables(&self) -> Vec<&Variable> {
        let mut vars = Vec::new();
        if let Some(v) = self.subject.as_variable() {
            vars.push(v);
        }
        if let Some(v) = self.predicate.as_variable() {
            vars.push(v);
        }
        if let Some(v) = self.object.as_variable() {
            vars.push(v);
        }
        vars
    }

    /// Returns true if the pattern contains no variables
    pub fn is_ground(&self) -> bool {
        self.variables().is_empty()
    }
}

impl fmt::Display for TriplePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)
    }
}
