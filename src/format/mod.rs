//! Serialization formats: N-Triples, N-Quads, and Turtle
//!
//! Format selection for file I/O goes by explicit option first, file
//! extension second.

pub mod error;
mod lexer;
pub mod nquads;
pub mod ntriples;
pub mod turtle;
pub mod turtle_writer;

pub use error::{SyntaxError, TextPosition};
pub use nquads::{NQuadsParser, NQuadsSerializer};
pub use ntriples::{NTriplesParser, NTriplesSerializer};
pub use turtle::TurtleParser;
pub use turtle_writer::{TurtleConfig, TurtleSerializer};

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::dataset::Dataset;
use crate::graph::Graph;
use crate::model::GraphName;
use crate::prefix::PrefixMap;
use crate::{RdfError, Result};

/// A supported serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RdfFormat {
    NTriples,
    NQuads,
    Turtle,
}

impl RdfFormat {
    /// The usual file extension
    pub fn file_extension(&self) -> &'static str {
        match self {
            RdfFormat::NTriples => "nt",
            RdfFormat::NQuads => "nq",
            RdfFormat::Turtle => "ttl",
        }
    }

    /// The registered media type
    pub fn media_type(&self) -> &'static str {
        match self {
            RdfFormat::NTriples => "application/n-triples",
            RdfFormat::NQuads => "application/n-quads",
            RdfFormat::Turtle => "text/turtle",
        }
    }

    /// Looks a format up by file extension
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "nt" | "ntriples" => Some(RdfFormat::NTriples),
            "nq" | "nquads" => Some(RdfFormat::NQuads),
            "ttl" | "turtle" => Some(RdfFormat::Turtle),
            _ => None,
        }
    }

    /// Picks the format implied by a file path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Options for reading a file
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Explicit format; otherwise chosen by file extension
    pub format: Option<RdfFormat>,
    /// Base IRI for resolving relative IRIs (Turtle)
    pub base_iri: Option<String>,
    /// Prefixes known before parsing starts (Turtle)
    pub prefixes: Option<PrefixMap>,
    /// Name given to the resulting graph
    pub name: Option<GraphName>,
}

/// Options for writing a file
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Explicit format; otherwise chosen by file extension
    pub format: Option<RdfFormat>,
    /// Base IRI override (Turtle)
    pub base_iri: Option<String>,
    /// Prefix map override (Turtle)
    pub prefixes: Option<PrefixMap>,
}

fn pick_format(explicit: Option<RdfFormat>, path: &Path) -> Result<RdfFormat> {
    explicit.or_else(|| RdfFormat::from_path(path)).ok_or_else(|| {
        RdfError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("cannot determine RDF format of {}", path.display()),
        ))
    })
}

/// Reads a graph from a file
///
/// An N-Quads file is accepted when all its statements address the
/// default graph.
pub fn read_graph_from_file(path: impl AsRef<Path>, options: ReadOptions) -> Result<Graph> {
    let path = path.as_ref();
    let format = pick_format(options.format, path)?;
    let reader = BufReader::new(File::open(path)?);

    let mut graph = match format {
        RdfFormat::NTriples => NTriplesParser::new().parse_reader(reader)?,
        RdfFormat::Turtle => {
            let mut parser = TurtleParser::new();
            if let Some(base) = &options.base_iri {
                parser = parser.with_base_iri(base.clone());
            }
            if let Some(prefixes) = &options.prefixes {
                parser = parser.with_prefixes(prefixes);
            }
            parser.parse_reader(reader)?
        }
        RdfFormat::NQuads => {
            let dataset = NQuadsParser::new().parse_reader(reader)?;
            if dataset.named_graphs().next().is_some() {
                return Err(RdfError::InvalidTerm(
                    "N-Quads file contains named graphs; read it as a dataset".to_string(),
                ));
            }
            dataset.default_graph().clone()
        }
    };

    if let Some(name) = options.name {
        graph.set_name(name)?;
    }
    Ok(graph)
}

/// Reads a dataset from a file
///
/// Triple-based formats land in the default graph, or in the graph named
/// by `options.name`.
pub fn read_dataset_from_file(path: impl AsRef<Path>, options: ReadOptions) -> Result<Dataset> {
    let path = path.as_ref();
    let format = pick_format(options.format, path)?;
    match format {
        RdfFormat::NQuads => {
            let reader = BufReader::new(File::open(path)?);
            NQuadsParser::new().parse_reader(reader)
        }
        _ => {
            let graph = read_graph_from_file(path, options)?;
            Dataset::from_data(&graph)
        }
    }
}

/// Writes a graph to a file
pub fn write_graph_to_file(
    graph: &Graph,
    path: impl AsRef<Path>,
    options: WriteOptions,
) -> Result<()> {
    let path = path.as_ref();
    let format = pick_format(options.format, path)?;
    let writer = BufWriter::new(File::create(path)?);

    match format {
        RdfFormat::NTriples => NTriplesSerializer::new().to_writer(graph, writer),
        RdfFormat::Turtle => {
            let mut serializer = TurtleSerializer::new();
            if let Some(base) = options.base_iri {
                serializer = serializer.with_base_iri(base);
            }
            if let Some(prefixes) = options.prefixes {
                serializer = serializer.with_prefixes(prefixes);
            }
            serializer.to_writer(graph, writer)
        }
        RdfFormat::NQuads => {
            let dataset = Dataset::from_data(graph)?;
            NQuadsSerializer::new().to_writer(&dataset, writer)
        }
    }
}

/// Writes a dataset to a file
///
/// Triple-based formats serialize the default graph only.
pub fn write_dataset_to_file(
    dataset: &Dataset,
    path: impl AsRef<Path>,
    options: WriteOptions,
) -> Result<()> {
    let path = path.as_ref();
    let format = pick_format(options.format, path)?;
    match format {
        RdfFormat::NQuads => {
            let writer = BufWriter::new(File::create(path)?);
            NQuadsSerializer::new().to_writer(dataset, writer)
        }
        _ => write_graph_to_file(dataset.default_graph(), path, options),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_dispatch() {
        assert_eq!(
            RdfFormat::from_path(Path::new("data/things.ttl")),
            Some(RdfFormat::Turtle)
        );
        assert_eq!(
            RdfFormat::from_path(Path::new("dump.NT")),
            Some(RdfFormat::NTriples)
        );
        assert_eq!(RdfFormat::from_path(Path::new("noext")), None);
        assert_eq!(RdfFormat::Turtle.media_type(), "text/turtle");
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = std::env::temp_dir().join("rdf_mem_format_tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("roundtrip.nt");

        let mut graph = Graph::new();
        graph.add(("http://ex/s", "http://ex/p", "value")).unwrap();
        write_graph_to_file(&graph, &path, WriteOptions::default()).unwrap();

        let back = read_graph_from_file(&path, ReadOptions::default()).unwrap();
        assert_eq!(back, graph);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_named_read() {
        let dir = std::env::temp_dir().join("rdf_mem_format_tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("named.nt");
        std::fs::write(&path, "<http://ex/s> <http://ex/p> \"x\" .\n").unwrap();

        let options = ReadOptions {
            name: Some(GraphName::NamedNode(
                crate::model::NamedNode::new("http://ex/g").unwrap(),
            )),
            ..ReadOptions::default()
        };
        let graph = read_graph_from_file(&path, options).unwrap();
        assert!(graph.name().is_some());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_unknown_extension_is_io_error() {
        let result = read_graph_from_file("data.xyz", ReadOptions::default());
        assert!(matches!(result, Err(RdfError::Io(_))));
    }
}
