//! # rdf-mem
//!
//! An in-memory implementation of the RDF 1.1 data model built around
//! immutable values: terms, triples and quads, subject-scoped descriptions,
//! graphs, and datasets, together with a basic-graph-pattern matcher and
//! readers/writers for N-Triples, N-Quads, and Turtle.
//!
//! The container levels (`Description`, `Graph`, `Dataset` and the terms
//! they hold) are plain owned values: cloning yields an independent copy,
//! a shared reference is read-only, and every mutation requires unique
//! ownership. There is no interior mutability and no background machinery;
//! the only lazy construct in the crate is the solution iterator returned
//! by the streaming query engine.
//!
//! ## Examples
//!
//! ```rust
//! use rdf_mem::Graph;
//!
//! # fn main() -> rdf_mem::Result<()> {
//! let mut graph = Graph::new();
//! graph.add(("http://example.org/s", "http://example.org/p", "o"))?;
//! assert_eq!(graph.triple_count(), 1);
//! # Ok(())
//! # }
//! ```

pub mod data;
pub mod dataset;
pub mod description;
pub mod diff;
pub mod format;
pub mod graph;
pub mod model;
pub mod prefix;
pub mod query;
pub mod vocab;
pub mod xsd;

// Re-export core types for convenience
pub use data::RdfData;
pub use dataset::Dataset;
pub use description::Description;
pub use diff::GraphDiff;
pub use graph::Graph;
pub use model::*;
pub use prefix::PrefixMap;

/// Core error type for all operations in this crate
#[derive(Debug, thiserror::Error)]
pub enum RdfError {
    /// A string could not be parsed as an absolute IRI
    #[error("invalid IRI <{0}>")]
    InvalidIri(String),
    /// A literal's lexical form is not valid for its datatype
    #[error("invalid literal \"{value}\": {reason}")]
    InvalidLiteral { value: String, reason: String },
    /// A value supplied where a term is required could not be coerced
    #[error("invalid term: {0}")]
    InvalidTerm(String),
    /// A basic graph pattern violates a structural constraint
    #[error("invalid query: {0}")]
    InvalidQuery(String),
    /// A parser encountered a syntax violation
    #[error("syntax error: {0}")]
    Format(#[from] format::SyntaxError),
    /// An underlying file operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for operations in this crate
pub type Result<T> = std::result::Result<T, RdfError>;
