//! Core RDF data model: terms, literals, triples, quads, and patterns

pub mod coerce;
pub mod literal;
pub mod pattern;
pub mod term;
pub mod triple;

pub use coerce::{TryIntoGraphName, TryIntoObject, TryIntoPredicate, TryIntoSubject};
pub use literal::Literal;
pub use pattern::{ObjectPattern, PredicatePattern, SubjectPattern, TriplePattern};
pub use term::{BlankNode, NamedNode, Object, Predicate, Subject, Term, Variable};
pub use triple::{GraphName, Quad, Triple};
