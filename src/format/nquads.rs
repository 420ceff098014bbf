//! N-Quads reader and writer
//!
//! N-Triples plus an optional fourth term (IRI or blank node) before the
//! period; an absent fourth term addresses the default graph.

use std::io::{Read, Write};

use crate::dataset::Dataset;
use crate::format::error::SyntaxError;
use crate::format::lexer::TermScanner;
use crate::format::ntriples::{scan_predicate, scan_subject};
use crate::model::{GraphName, Quad};
use crate::Result;

/// N-Quads parser
#[derive(Debug, Clone, Default)]
pub struct NQuadsParser {
    lenient: bool,
}

impl NQuadsParser {
    /// Creates a new N-Quads parser
    pub fn new() -> Self {
        NQuadsParser::default()
    }

    /// Enables lenient parsing: malformed lines are skipped
    pub fn lenient(mut self) -> Self {
        self.lenient = true;
        self
    }

    /// Parses a complete N-Quads document into a dataset
    pub fn parse_str(&self, input: &str) -> Result<Dataset> {
        let mut dataset = Dataset::new();
        for (index, line) in input.lines().enumerate() {
            match parse_line(line, index + 1) {
                Ok(Some(quad)) => {
                    dataset.insert(quad);
                }
                Ok(None) => {}
                Err(error) => {
                    if self.lenient {
                        tracing::debug!(line = index + 1, %error, "skipping malformed line");
                    } else {
                        return Err(error.into());
                    }
                }
            }
        }
        Ok(dataset)
    }

    /// Parses an N-Quads document from a reader
    pub fn parse_reader<R: Read>(&self, mut reader: R) -> Result<Dataset> {
        let mut buffer = String::new();
        reader.read_to_string(&mut buffer)?;
        self.parse_str(&buffer)
    }
}

fn parse_line(line: &str, line_number: usize) -> std::result::Result<Option<Quad>, SyntaxError> {
    let mut scanner = TermScanner::new(line, line_number);
    if scanner.at_end() {
        return Ok(None);
    }

    let subject = scan_subject(&mut scanner)?;
    let predicate = scan_predicate(&mut scanner)?;
    let object = scanner.scan_term()?;

    scanner.skip_whitespace();
    let graph_name = if scanner.peeks_term_start() {
        scanner.scan_graph_name()?
    } else {
        GraphName::DefaultGraph
    };

    scanner.expect_dot()?;
    if !scanner.at_end() {
        return Err(SyntaxError::msg(
            "trailing content after statement",
            scanner.position(),
        ));
    }

    Ok(Some(Quad::new(subject, predicate, object, graph_name)))
}

/// N-Quads serializer
#[derive(Debug, Clone, Default)]
pub struct NQuadsSerializer {
    sorted: bool,
}

impl NQuadsSerializer {
    /// Creates a new N-Quads serializer
    pub fn new() -> Self {
        NQuadsSerializer::default()
    }

    /// Emits statements in sorted order, for reproducible output
    pub fn sorted(mut self) -> Self {
        self.sorted = true;
        self
    }

    /// Serializes a dataset to a string
    pub fn serialize_dataset(&self, dataset: &Dataset) -> String {
        let mut quads: Vec<Quad> = dataset.quads().collect();
        if self.sorted {
            quads.sort();
        }
        let mut out = String::new();
        for quad in &quads {
            // Quad `Display` already renders the optional graph term
            out.push_str(&quad.to_string());
            out.push('\n');
        }
        out
    }

    /// Serializes a dataset to a writer
    pub fn to_writer<W: Write>(&self, dataset: &Dataset, mut writer: W) -> Result<()> {
        writer.write_all(self.serialize_dataset(dataset).as_bytes())?;
        Ok(())
    }
}
