//! Core RDF term types and implementations

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::Literal;
use crate::RdfError;

lazy_static! {
    /// Regex for validating blank node labels according to Turtle/N-Triples rules
    static ref BLANK_NODE_REGEX: Regex =
        Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_.-]*$").expect("Blank node regex compilation failed");

    /// Regex for validating variable names
    static ref VARIABLE_REGEX: Regex =
        Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").expect("Variable regex compilation failed");
}

/// Global counter for unique blank node generation
static BLANK_NODE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Validates a blank node label
fn validate_blank_node_label(label: &str) -> Result<(), RdfError> {
    if label.is_empty() {
        return Err(RdfError::InvalidTerm(
            "blank node label cannot be empty".to_string(),
        ));
    }
    if label.ends_with('.') || !BLANK_NODE_REGEX.is_match(label) {
        return Err(RdfError::InvalidTerm(format!(
            "invalid blank node label '{label}'"
        )));
    }
    Ok(())
}

/// Validates a variable name
fn validate_variable_name(name: &str) -> Result<(), RdfError> {
    if name.is_empty() {
        return Err(RdfError::InvalidTerm(
            "variable name cannot be empty".to_string(),
        ));
    }
    if !VARIABLE_REGEX.is_match(name) {
        return Err(RdfError::InvalidTerm(format!(
            "invalid variable name '{name}'"
        )));
    }
    Ok(())
}

/// An absolute IRI
///
/// Equality is byte-exact on the stored string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NamedNode {
    iri: String,
}

impl NamedNode {
    /// Creates a new named node from an absolute IRI
    ///
    /// # Errors
    /// Returns [`RdfError::InvalidIri`] if the string is not an absolute IRI.
    pub fn new(iri: impl Into<String>) -> Result<Self, RdfError> {
        let iri = iri.into();
        oxiri::Iri::parse(iri.as_str()).map_err(|_| RdfError::InvalidIri(iri.clone()))?;
        Ok(NamedNode { iri })
    }

    /// Creates a new named node without validation
    ///
    /// The caller must ensure the IRI is absolute and well-formed.
    pub fn new_unchecked(iri: impl Into<String>) -> Self {
        NamedNode { iri: iri.into() }
    }

    /// Returns the IRI as a string slice
    pub fn as_str(&self) -> &str {
        &self.iri
    }

    /// Consumes the node and returns the IRI string
    pub fn into_string(self) -> String {
        self.iri
    }
}

impl fmt::Display for NamedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.iri)
    }
}

/// A blank node identifier
///
/// Blank nodes are local identifiers without global meaning. Two blank
/// nodes with the same label are equal within one process.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlankNode {
    id: String,
}

impl Default for BlankNode {
    fn default() -> Self {
        Self::new_unique()
    }
}

impl BlankNode {
    /// Creates a new blank node with the given label
    ///
    /// A leading `_:` prefix is accepted and stripped.
    ///
    /// # Errors
    /// Returns an error if the label format is invalid.
    pub fn new(id: impl Into<String>) -> Result<Self, RdfError> {
        let id = id.into();
        let label = id.strip_prefix("_:").unwrap_or(&id);
        validate_blank_node_label(label)?;
        Ok(BlankNode {
            id: label.to_string(),
        })
    }

    /// Creates a new blank node without validation
    pub fn new_unchecked(id: impl Into<String>) -> Self {
        BlankNode { id: id.into() }
    }

    /// Generates a fresh blank node with a process-unique label
    pub fn new_unique() -> Self {
        let counter = BLANK_NODE_COUNTER.fetch_add(1, Ordering::Relaxed);
        BlankNode {
            id: format!("b{counter}"),
        }
    }

    /// Generates a fresh blank node with a custom label prefix
    pub fn new_unique_with_prefix(prefix: &str) -> Result<Self, RdfError> {
        validate_blank_node_label(prefix)?;
        let counter = BLANK_NODE_COUNTER.fetch_add(1, Ordering::Relaxed);
        Ok(BlankNode {
            id: format!("{prefix}{counter}"),
        })
    }

    /// Returns the label without the `_:` prefix
    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.id)
    }
}

/// A query variable
///
/// Variables are named placeholders in basic graph patterns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Variable {
    name: String,
}

impl Variable {
    /// Creates a new variable with the given name
    ///
    /// A leading `?` or `$` prefix is accepted and stripped.
    ///
    /// # Errors
    /// Returns an error if the name format is invalid.
    pub fn new(name: impl Into<String>) -> Result<Self, RdfError> {
        let name = name.into();
        let clean = name
            .strip_prefix('?')
            .or_else(|| name.strip_prefix('$'))
            .unwrap_or(&name);
        validate_variable_name(clean)?;
        Ok(Variable {
            name: clean.to_string(),
        })
    }

    /// Creates a new variable without validation
    pub fn new_unchecked(name: impl Into<String>) -> Self {
        Variable { name: name.into() }
    }

    /// Returns the variable name (without prefix)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the variable name as a string slice
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.name)
    }
}

/// Union type for all RDF terms
///
/// This enum can hold any term position value and is used when the
/// specific kind is not known at compile time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Term {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
    Literal(Literal),
}

impl Term {
    /// Returns true if this is a named node
    pub fn is_named_node(&self) -> bool {
        matches!(self, Term::NamedNode(_))
    }

    /// Returns true if this is a blank node
    pub fn is_blank_node(&self) -> bool {
        matches!(self, Term::BlankNode(_))
    }

    /// Returns true if this is a literal
    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }

    /// Returns true if this is a resource (named or blank node)
    pub fn is_resource(&self) -> bool {
        !self.is_literal()
    }

    /// Returns the named node if this term is a named node
    pub fn as_named_node(&self) -> Option<&NamedNode> {
        match self {
            Term::NamedNode(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the blank node if this term is a blank node
    pub fn as_blank_node(&self) -> Option<&BlankNode> {
        match self {
            Term::BlankNode(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the literal if this term is a literal
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(l) => Some(l),
            _ => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::NamedNode(n) => write!(f, "{n}"),
            Term::BlankNode(b) => write!(f, "{b}"),
            Term::Literal(l) => write!(f, "{l}"),
        }
    }
}

impl From<NamedNode> for Term {
    fn from(node: NamedNode) -> Self {
        Term::NamedNode(node)
    }
}

impl From<BlankNode> for Term {
    fn from(node: BlankNode) -> Self {
        Term::BlankNode(node)
    }
}

impl From<Literal> for Term {
    fn from(literal: Literal) -> Self {
        Term::Literal(literal)
    }
}

impl From<Subject> for Term {
    fn from(subject: Subject) -> Self {
        match subject {
            Subject::NamedNode(nn) => Term::NamedNode(nn),
            Subject::BlankNode(bn) => Term::BlankNode(bn),
        }
    }
}

impl From<Object> for Term {
    fn from(object: Object) -> Self {
        match object {
            Object::NamedNode(nn) => Term::NamedNode(nn),
            Object::BlankNode(bn) => Term::BlankNode(bn),
            Object::Literal(l) => Term::Literal(l),
        }
    }
}

/// Union type for terms admitted in the subject position
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Subject {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
}

impl Subject {
    /// Returns true if this subject is a blank node
    pub fn is_blank_node(&self) -> bool {
        matches!(self, Subject::BlankNode(_))
    }

    /// Returns the named node if this subject is a named node
    pub fn as_named_node(&self) -> Option<&NamedNode> {
        match self {
            Subject::NamedNode(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the blank node if this subject is a blank node
    pub fn as_blank_node(&self) -> Option<&BlankNode> {
        match self {
            Subject::BlankNode(b) => Some(b),
            _ => None,
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::NamedNode(n) => write!(f, "{n}"),
            Subject::BlankNode(b) => write!(f, "{b}"),
        }
    }
}

impl From<NamedNode> for Subject {
    fn from(node: NamedNode) -> Self {
        Subject::NamedNode(node)
    }
}

impl From<BlankNode> for Subject {
    fn from(node: BlankNode) -> Self {
        Subject::BlankNode(node)
    }
}

/// The predicate position only admits IRIs
pub type Predicate = NamedNode;

/// Union type for terms admitted in the object position
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Object {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
    Literal(Literal),
}

impl Object {
    /// Returns true if this object is a resource (named or blank node)
    pub fn is_resource(&self) -> bool {
        !matches!(self, Object::Literal(_))
    }

    /// Returns the named node if this object is a named node
    pub fn as_named_node(&self) -> Option<&NamedNode> {
        match self {
            Object::NamedNode(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the blank node if this object is a blank node
    pub fn as_blank_node(&self) -> Option<&BlankNode> {
        match self {
            Object::BlankNode(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the literal if this object is a literal
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Object::Literal(l) => Some(l),
            _ => None,
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::NamedNode(n) => write!(f, "{n}"),
            Object::BlankNode(b) => write!(f, "{b}"),
            Object::Literal(l) => write!(f, "{l}"),
        }
    }
}

impl From<NamedNode> for Object {
    fn from(node: NamedNode) -> Self {
        Object::NamedNode(node)
    }
}

impl From<BlankNode> for Object {
    fn from(node: BlankNode) -> Self {
        Object::BlankNode(node)
    }
}

impl From<Literal> for Object {
    fn from(literal: Literal) -> Self {
        Object::Literal(literal)
    }
}

impl From<Subject> for Object {
    fn from(subject: Subject) -> Self {
        match subject {
            Subject::NamedNode(nn) => Object::NamedNode(nn),
            Subject::BlankNode(bn) => Object::BlankNode(bn),
        }
    }
}

impl TryFrom<Term> for Subject {
    type Error = RdfError;

    fn try_from(term: Term) -> Result<Self, Self::Error> {
        match term {
            Term::NamedNode(n) => Ok(Subject::NamedNode(n)),
            Term::BlankNode(b) => Ok(Subject::BlankNode(b)),
            Term::Literal(l) => Err(RdfError::InvalidTerm(format!(
                "literal {l} cannot be used as a subject"
            ))),
        }
    }
}

impl TryFrom<Term> for Predicate {
    type Error = RdfError;

    fn try_from(term: Term) -> Result<Self, Self::Error> {
        match term {
            Term::NamedNode(n) => Ok(n),
            other => Err(RdfError::InvalidTerm(format!(
                "{other} cannot be used as a predicate"
            ))),
        }
    }
}

impl From<Term> for Object {
    fn from(term: Term) -> Self {
        match term {
            Term::NamedNode(n) => Object::NamedNode(n),
            Term::BlankNode(b) => Object::BlankNode(b),
            Term::Literal(l) => Object::Literal(l),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_node() {
        let node = NamedNode::new("http://example.org/s").unwrap();
        assert_eq!(node.as_str(), "http://example.org/s");
        assert_eq!(format!("{node}"), "<http://example.org/s>");
    }

    #[test]
    fn test_named_node_rejects_relative() {
        assert!(NamedNode::new("not an iri").is_err());
        assert!(NamedNode::new("/relative/path").is_err());
        assert!(NamedNode::new("").is_err());
    }

    #[test]
    fn test_blank_node() {
        let blank = BlankNode::new("b1").unwrap();
        assert_eq!(blank.as_str(), "b1");
        assert_eq!(format!("{blank}"), "_:b1");
    }

    #[test]
    fn test_blank_node_with_prefix() {
        let blank = BlankNode::new("_:test").unwrap();
        assert_eq!(blank.as_str(), "test");
    }

    #[test]
    fn test_blank_node_unique() {
        let blank1 = BlankNode::new_unique();
        let blank2 = BlankNode::new_unique();
        assert_ne!(blank1, blank2);
    }

    #[test]
    fn test_blank_node_validation() {
        assert!(BlankNode::new("test123").is_ok());
        assert!(BlankNode::new("Test_Node").is_ok());
        assert!(BlankNode::new("node-1.2").is_ok());

        assert!(BlankNode::new("").is_err());
        assert!(BlankNode::new("_:").is_err());
        assert!(BlankNode::new("123invalid").is_err());
        assert!(BlankNode::new("invalid space").is_err());
        assert!(BlankNode::new("ends.with.dot.").is_err());
    }

    #[test]
    fn test_variable() {
        let var = Variable::new("x").unwrap();
        assert_eq!(var.name(), "x");
        assert_eq!(format!("{var}"), "?x");

        let var1 = Variable::new("?test").unwrap();
        let var2 = Variable::new("$test").unwrap();
        assert_eq!(var1, var2);
    }

    #[test]
    fn test_variable_validation() {
        assert!(Variable::new("_underscore").is_ok());
        assert!(Variable::new("").is_err());
        assert!(Variable::new("?").is_err());
        assert!(Variable::new("123invalid").is_err());
        assert!(Variable::new("invalid-char").is_err());
    }

    #[test]
    fn test_subject_rejects_literal() {
        let term = Term::Literal(Literal::new_simple_literal("x"));
        assert!(Subject::try_from(term).is_err());
    }

    #[test]
    fn test_term_serde() {
        let term = Term::NamedNode(NamedNode::new("http://example.org/s").unwrap());
        let json = serde_json::to_string(&term).unwrap();
        let back: Term = serde_json::from_str(&json).unwrap();
        assert_eq!(term, back);
    }
}
