//! Basic graph pattern construction
//!
//! The builder normalizes every position into a tagged pattern element
//! before a pattern enters the BGP, and rejects structurally invalid
//! patterns (a literal in subject or predicate position, an empty path)
//! with [`RdfError::InvalidQuery`] at build time.

use std::collections::BTreeSet;

use crate::model::{
    BlankNode, Literal, NamedNode, Object, ObjectPattern, PredicatePattern, Subject,
    SubjectPattern, Term, TriplePattern, Variable,
};
use crate::vocab;
use crate::{RdfError, Result};

/// The `rdf:type` keyword for the predicate position
///
/// Mirrors Turtle's `a`: `bgp.pattern(s, A, o)` expands to a pattern on
/// `rdf:type`.
#[derive(Debug, Clone, Copy, Default)]
pub struct A;

/// Conversion into a subject pattern position
pub trait IntoSubjectPattern {
    fn into_subject_pattern(self) -> Result<SubjectPattern>;
}

/// Conversion into a predicate pattern position
pub trait IntoPredicatePattern {
    fn into_predicate_pattern(self) -> Result<PredicatePattern>;
}

/// Conversion into an object pattern position
pub trait IntoObjectPattern {
    fn into_object_pattern(self) -> Result<ObjectPattern>;
}

impl IntoSubjectPattern for SubjectPattern {
    fn into_subject_pattern(self) -> Result<SubjectPattern> {
        Ok(self)
    }
}

impl IntoSubjectPattern for Variable {
    fn into_subject_pattern(self) -> Result<SubjectPattern> {
        Ok(SubjectPattern::Variable(self))
    }
}

impl IntoSubjectPattern for &Variable {
    fn into_subject_pattern(self) -> Result<SubjectPattern> {
        Ok(SubjectPattern::Variable(self.clone()))
    }
}

impl IntoSubjectPattern for Subject {
    fn into_subject_pattern(self) -> Result<SubjectPattern> {
        Ok(self.into())
    }
}

impl IntoSubjectPattern for NamedNode {
    fn into_subject_pattern(self) -> Result<SubjectPattern> {
        Ok(SubjectPattern::NamedNode(self))
    }
}

impl IntoSubjectPattern for &NamedNode {
    fn into_subject_pattern(self) -> Result<SubjectPattern> {
        Ok(SubjectPattern::NamedNode(self.clone()))
    }
}

impl IntoSubjectPattern for BlankNode {
    fn into_subject_pattern(self) -> Result<SubjectPattern> {
        Ok(SubjectPattern::BlankNode(self))
    }
}

impl IntoSubjectPattern for &str {
    fn into_subject_pattern(self) -> Result<SubjectPattern> {
        use crate::model::coerce::TryIntoSubject;
        Ok(self.try_into_subject()?.into())
    }
}

impl IntoSubjectPattern for Literal {
    fn into_subject_pattern(self) -> Result<SubjectPattern> {
        Err(RdfError::InvalidQuery(format!(
            "literal {self} in subject position"
        )))
    }
}

impl IntoSubjectPattern for Term {
    fn into_subject_pattern(self) -> Result<SubjectPattern> {
        match self {
            Term::NamedNode(n) => Ok(SubjectPattern::NamedNode(n)),
            Term::BlankNode(b) => Ok(SubjectPattern::BlankNode(b)),
            Term::Literal(l) => l.into_subject_pattern(),
        }
    }
}

impl IntoPredicatePattern for PredicatePattern {
    fn into_predicate_pattern(self) -> Result<PredicatePattern> {
        Ok(self)
    }
}

impl IntoPredicatePattern for Variable {
    fn into_predicate_pattern(self) -> Result<PredicatePattern> {
        Ok(PredicatePattern::Variable(self))
    }
}

impl IntoPredicatePattern for &Variable {
    fn into_predicate_pattern(self) -> Result<PredicatePattern> {
        Ok(PredicatePattern::Variable(self.clone()))
    }
}

impl IntoPredicatePattern for NamedNode {
    fn into_predicate_pattern(self) -> Result<PredicatePattern> {
        Ok(PredicatePattern::NamedNode(self))
    }
}

impl IntoPredicatePattern for &NamedNode {
    fn into_predicate_pattern(self) -> Result<PredicatePattern> {
        Ok(PredicatePattern::NamedNode(self.clone()))
    }
}

impl IntoPredicatePattern for &str {
    fn into_predicate_pattern(self) -> Result<PredicatePattern> {
        Ok(PredicatePattern::NamedNode(NamedNode::new(self)?))
    }
}

impl IntoPredicatePattern for A {
    fn into_predicate_pattern(self) -> Result<PredicatePattern> {
        Ok(PredicatePattern::NamedNode(vocab::rdf::TYPE.clone()))
    }
}

impl IntoPredicatePattern for Literal {
    fn into_predicate_pattern(self) -> Result<PredicatePattern> {
        Err(RdfError::InvalidQuery(format!(
            "literal {self} in predicate position"
        )))
    }
}

impl IntoPredicatePattern for Term {
    fn into_predicate_pattern(self) -> Result<PredicatePattern> {
        match self {
            Term::NamedNode(n) => Ok(PredicatePattern::NamedNode(n)),
            Term::Literal(l) => l.into_predicate_pattern(),
            Term::BlankNode(b) => Err(RdfError::InvalidQuery(format!(
                "blank node {b} in predicate position"
            ))),
        }
    }
}

impl IntoObjectPattern for ObjectPattern {
    fn into_object_pattern(self) -> Result<ObjectPattern> {
        Ok(self)
    }
}

impl IntoObjectPattern for Variable {
    fn into_object_pattern(self) -> Result<ObjectPattern> {
        Ok(ObjectPattern::Variable(self))
    }
}

impl IntoObjectPattern for &Variable {
    fn into_object_pattern(self) -> Result<ObjectPattern> {
        Ok(ObjectPattern::Variable(self.clone()))
    }
}

impl IntoObjectPattern for Object {
    fn into_object_pattern(self) -> Result<ObjectPattern> {
        Ok(self.into())
    }
}

impl IntoObjectPattern for Term {
    fn into_object_pattern(self) -> Result<ObjectPattern> {
        Ok(self.into())
    }
}

impl IntoObjectPattern for NamedNode {
    fn into_object_pattern(self) -> Result<ObjectPattern> {
        Ok(ObjectPattern::NamedNode(self))
    }
}

impl IntoObjectPattern for &NamedNode {
    fn into_object_pattern(self) -> Result<ObjectPattern> {
        Ok(ObjectPattern::NamedNode(self.clone()))
    }
}

impl IntoObjectPattern for BlankNode {
    fn into_object_pattern(self) -> Result<ObjectPattern> {
        Ok(ObjectPattern::BlankNode(self))
    }
}

impl IntoObjectPattern for Literal {
    fn into_object_pattern(self) -> Result<ObjectPattern> {
        Ok(ObjectPattern::Literal(self))
    }
}

impl IntoObjectPattern for &str {
    fn into_object_pattern(self) -> Result<ObjectPattern> {
        Ok(ObjectPattern::Literal(Literal::new_simple_literal(self)))
    }
}

impl IntoObjectPattern for i64 {
    fn into_object_pattern(self) -> Result<ObjectPattern> {
        Ok(ObjectPattern::Literal(self.into()))
    }
}

impl IntoObjectPattern for bool {
    fn into_object_pattern(self) -> Result<ObjectPattern> {
        Ok(ObjectPattern::Literal(self.into()))
    }
}

/// An ordered conjunction of triple patterns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasicGraphPattern {
    patterns: Vec<TriplePattern>,
    hidden: BTreeSet<Variable>,
    placeholder_counter: usize,
}

impl BasicGraphPattern {
    /// Creates an empty pattern
    ///
    /// Evaluating an empty pattern yields the single empty solution.
    pub fn new() -> Self {
        BasicGraphPattern::default()
    }

    /// Appends one triple pattern
    pub fn pattern(
        mut self,
        subject: impl IntoSubjectPattern,
        predicate: impl IntoPredicatePattern,
        object: impl IntoObjectPattern,
    ) -> Result<Self> {
        self.patterns.push(TriplePattern {
            subject: subject.into_subject_pattern()?,
            predicate: predicate.into_predicate_pattern()?,
            object: object.into_object_pattern()?,
        });
        Ok(self)
    }

    /// Appends one pattern per object: `(s, p, o1, o2, …)` fans out to
    /// `(s, p, o1), (s, p, o2), …`
    pub fn fan_out<I>(
        mut self,
        subject: impl IntoSubjectPattern,
        predicate: impl IntoPredicatePattern,
        objects: I,
    ) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: IntoObjectPattern,
    {
        let subject = subject.into_subject_pattern()?;
        let predicate = predicate.into_predicate_pattern()?;
        let objects = objects
            .into_iter()
            .map(IntoObjectPattern::into_object_pattern)
            .collect::<Result<Vec<_>>>()?;
        if objects.is_empty() {
            return Err(RdfError::InvalidQuery(
                "fan-out requires at least one object".to_string(),
            ));
        }
        for object in objects {
            self.patterns.push(TriplePattern {
                subject: subject.clone(),
                predicate: predicate.clone(),
                object,
            });
        }
        Ok(self)
    }

    /// Appends a property path `[s, p1, p2, …, pn, o]` as a chain of
    /// patterns through fresh non-projected placeholders:
    /// `(s, p1, _b1), (_b1, p2, _b2), …, (_b_{n-1}, pn, o)`
    pub fn path<I>(
        mut self,
        start: impl IntoSubjectPattern,
        predicates: I,
        end: impl IntoObjectPattern,
    ) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: IntoPredicatePattern,
    {
        let predicates = predicates
            .into_iter()
            .map(IntoPredicatePattern::into_predicate_pattern)
            .collect::<Result<Vec<_>>>()?;
        if predicates.is_empty() {
            return Err(RdfError::InvalidQuery(
                "path requires at least three elements".to_string(),
            ));
        }

        let mut subject = start.into_subject_pattern()?;
        let chain_len = predicates.len() - 1;
        let mut predicates = predicates.into_iter();
        for _ in 0..chain_len {
            let predicate = predicates.next().expect("chain is shorter than the list");
            let placeholder = self.fresh_placeholder();
            self.patterns.push(TriplePattern {
                subject,
                predicate,
                object: ObjectPattern::Variable(placeholder.clone()),
            });
            subject = SubjectPattern::Variable(placeholder);
        }
        let predicate = predicates.next().expect("the list is non-empty");
        self.patterns.push(TriplePattern {
            subject,
            predicate,
            object: end.into_object_pattern()?,
        });
        Ok(self)
    }

    fn fresh_placeholder(&mut self) -> Variable {
        let placeholder = Variable::new_unchecked(format!("_b{}", self.placeholder_counter));
        self.placeholder_counter += 1;
        self.hidden.insert(placeholder.clone());
        placeholder
    }

    /// The triple patterns in declaration order
    pub fn patterns(&self) -> &[TriplePattern] {
        &self.patterns
    }

    /// Number of triple patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns true if no patterns are present
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// The query's free variables: all named variables except generated
    /// path placeholders
    pub fn free_variables(&self) -> BTreeSet<Variable> {
        self.patterns
            .iter()
            .flat_map(|p| p.variables().into_iter().cloned())
            .filter(|v| !self.hidden.contains(v))
            .collect()
    }
}
