//! Term coercion for the public construction surface
//!
//! Every public mutator accepts "coercible" inputs through the traits in
//! this module, so parsing and validation happen in exactly one place per
//! term position. The rules:
//!
//! - subject, predicate, and graph-name positions: `&str`/`String` parse
//!   as IRIs (a `_:` prefix in subject or graph-name position yields a
//!   blank node);
//! - object position: `&str`/`String` become plain literals, and values of
//!   registered native types (`bool`, integers, `f64`) become datatyped
//!   literals;
//! - model types pass through unchanged.
//!
//! Anything else fails with [`RdfError::InvalidTerm`] (or
//! [`RdfError::InvalidIri`] for malformed IRI strings).

use crate::model::{BlankNode, GraphName, Literal, NamedNode, Object, Predicate, Subject, Term};
use crate::{RdfError, Result};

/// Conversion into a subject position term
pub trait TryIntoSubject {
    fn try_into_subject(self) -> Result<Subject>;
}

/// Conversion into a predicate position term
pub trait TryIntoPredicate {
    fn try_into_predicate(self) -> Result<Predicate>;
}

/// Conversion into an object position term
pub trait TryIntoObject {
    fn try_into_object(self) -> Result<Object>;
}

/// Conversion into a graph name
pub trait TryIntoGraphName {
    fn try_into_graph_name(self) -> Result<GraphName>;
}

fn resource_from_str(s: &str) -> Result<Subject> {
    if let Some(label) = s.strip_prefix("_:") {
        Ok(Subject::BlankNode(BlankNode::new(label)?))
    } else {
        Ok(Subject::NamedNode(NamedNode::new(s)?))
    }
}

// --- Subject ---

impl TryIntoSubject for Subject {
    fn try_into_subject(self) -> Result<Subject> {
        Ok(self)
    }
}

impl TryIntoSubject for &Subject {
    fn try_into_subject(self) -> Result<Subject> {
        Ok(self.clone())
    }
}

impl TryIntoSubject for NamedNode {
    fn try_into_subject(self) -> Result<Subject> {
        Ok(Subject::NamedNode(self))
    }
}

impl TryIntoSubject for &NamedNode {
    fn try_into_subject(self) -> Result<Subject> {
        Ok(Subject::NamedNode(self.clone()))
    }
}

impl TryIntoSubject for BlankNode {
    fn try_into_subject(self) -> Result<Subject> {
        Ok(Subject::BlankNode(self))
    }
}

impl TryIntoSubject for &BlankNode {
    fn try_into_subject(self) -> Result<Subject> {
        Ok(Subject::BlankNode(self.clone()))
    }
}

impl TryIntoSubject for &str {
    fn try_into_subject(self) -> Result<Subject> {
        resource_from_str(self)
    }
}

impl TryIntoSubject for String {
    fn try_into_subject(self) -> Result<Subject> {
        resource_from_str(&self)
    }
}

impl TryIntoSubject for Term {
    fn try_into_subject(self) -> Result<Subject> {
        Subject::try_from(self)
    }
}

// --- Predicate ---

impl TryIntoPredicate for Predicate {
    fn try_into_predicate(self) -> Result<Predicate> {
        Ok(self)
    }
}

impl TryIntoPredicate for &Predicate {
    fn try_into_predicate(self) -> Result<Predicate> {
        Ok(self.clone())
    }
}

impl TryIntoPredicate for &str {
    fn try_into_predicate(self) -> Result<Predicate> {
        NamedNode::new(self)
    }
}

impl TryIntoPredicate for String {
    fn try_into_predicate(self) -> Result<Predicate> {
        NamedNode::new(self)
    }
}

impl TryIntoPredicate for Term {
    fn try_into_predicate(self) -> Result<Predicate> {
        Predicate::try_from(self)
    }
}

// --- Object ---

impl TryIntoObject for Object {
    fn try_into_object(self) -> Result<Object> {
        Ok(self)
    }
}

impl TryIntoObject for &Object {
    fn try_into_object(self) -> Result<Object> {
        Ok(self.clone())
    }
}

impl TryIntoObject for NamedNode {
    fn try_into_object(self) -> Result<Object> {
        Ok(Object::NamedNode(self))
    }
}

impl TryIntoObject for &NamedNode {
    fn try_into_object(self) -> Result<Object> {
        Ok(Object::NamedNode(self.clone()))
    }
}

impl TryIntoObject for BlankNode {
    fn try_into_object(self) -> Result<Object> {
        Ok(Object::BlankNode(self))
    }
}

impl TryIntoObject for &BlankNode {
    fn try_into_object(self) -> Result<Object> {
        Ok(Object::BlankNode(self.clone()))
    }
}

impl TryIntoObject for Literal {
    fn try_into_object(self) -> Result<Object> {
        Ok(Object::Literal(self))
    }
}

impl TryIntoObject for &Literal {
    fn try_into_object(self) -> Result<Object> {
        Ok(Object::Literal(self.clone()))
    }
}

impl TryIntoObject for Subject {
    fn try_into_object(self) -> Result<Object> {
        Ok(self.into())
    }
}

impl TryIntoObject for Term {
    fn try_into_object(self) -> Result<Object> {
        Ok(self.into())
    }
}

impl TryIntoObject for &str {
    fn try_into_object(self) -> Result<Object> {
        Ok(Object::Literal(Literal::new_simple_literal(self)))
    }
}

impl TryIntoObject for String {
    fn try_into_object(self) -> Result<Object> {
        Ok(Object::Literal(Literal::new_simple_literal(self)))
    }
}

impl TryIntoObject for bool {
    fn try_into_object(self) -> Result<Object> {
        Ok(Object::Literal(self.into()))
    }
}

impl TryIntoObject for i64 {
    fn try_into_object(self) -> Result<Object> {
        Ok(Object::Literal(self.into()))
    }
}

impl TryIntoObject for i32 {
    fn try_into_object(self) -> Result<Object> {
        Ok(Object::Literal(self.into()))
    }
}

impl TryIntoObject for f64 {
    fn try_into_object(self) -> Result<Object> {
        Ok(Object::Literal(self.into()))
    }
}

// --- GraphName ---

impl TryIntoGraphName for GraphName {
    fn try_into_graph_name(self) -> Result<GraphName> {
        Ok(self)
    }
}

impl TryIntoGraphName for &GraphName {
    fn try_into_graph_name(self) -> Result<GraphName> {
        Ok(self.clone())
    }
}

impl TryIntoGraphName for NamedNode {
    fn try_into_graph_name(self) -> Result<GraphName> {
        Ok(GraphName::NamedNode(self))
    }
}

impl TryIntoGraphName for BlankNode {
    fn try_into_graph_name(self) -> Result<GraphName> {
        Ok(GraphName::BlankNode(self))
    }
}

impl TryIntoGraphName for &str {
    fn try_into_graph_name(self) -> Result<GraphName> {
        Ok(resource_from_str(self)?.into())
    }
}

impl TryIntoGraphName for String {
    fn try_into_graph_name(self) -> Result<GraphName> {
        Ok(resource_from_str(&self)?.into())
    }
}

/// Absent graph name routes to the default graph
impl<T: TryIntoGraphName> TryIntoGraphName for Option<T> {
    fn try_into_graph_name(self) -> Result<GraphName> {
        match self {
            Some(name) => name.try_into_graph_name(),
            None => Ok(GraphName::DefaultGraph),
        }
    }
}

/// Coerces a whole (subject, predicate, object) tuple
pub(crate) fn coerce_triple<S, P, O>(s: S, p: P, o: O) -> Result<crate::model::Triple>
where
    S: TryIntoSubject,
    P: TryIntoPredicate,
    O: TryIntoObject,
{
    Ok(crate::model::Triple::new(
        s.try_into_subject()?,
        p.try_into_predicate()?,
        o.try_into_object()?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_from_str() {
        let s = "http://example.org/s".try_into_subject().unwrap();
        assert_eq!(s.as_named_node().unwrap().as_str(), "http://example.org/s");

        let b = "_:b0".try_into_subject().unwrap();
        assert_eq!(b.as_blank_node().unwrap().as_str(), "b0");

        assert!(matches!(
            "not an iri".try_into_subject(),
            Err(RdfError::InvalidIri(_))
        ));
    }

    #[test]
    fn test_object_str_is_literal() {
        let o = "hello".try_into_object().unwrap();
        assert_eq!(o.as_literal().unwrap().value(), "hello");
    }

    #[test]
    fn test_object_native_types() {
        assert!(42i64.try_into_object().unwrap().as_literal().is_some());
        assert!(true.try_into_object().unwrap().as_literal().is_some());
        assert!(1.5f64.try_into_object().unwrap().as_literal().is_some());
    }

    #[test]
    fn test_graph_name_option() {
        let default = None::<&str>.try_into_graph_name().unwrap();
        assert!(default.is_default_graph());
        let named = Some("http://example.org/g").try_into_graph_name().unwrap();
        assert!(!named.is_default_graph());
    }
}
