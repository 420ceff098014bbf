//! N-Triples reader and writer
//!
//! One triple per line, `<IRI> <IRI> (<IRI> | _:label | literal) .`, with
//! `#` comments. The writer emits the canonical escaped term forms; with
//! sorting enabled the output is usable for textual graph comparison.

use std::io::{Read, Write};

use crate::format::error::SyntaxError;
use crate::format::lexer::TermScanner;
use crate::graph::Graph;
use crate::model::{Subject, Term, Triple};
use crate::Result;

/// N-Triples parser
#[derive(Debug, Clone, Default)]
pub struct NTriplesParser {
    lenient: bool,
}

impl NTriplesParser {
    /// Creates a new N-Triples parser
    pub fn new() -> Self {
        NTriplesParser::default()
    }

    /// Enables lenient parsing: malformed lines are skipped
    pub fn lenient(mut self) -> Self {
        self.lenient = true;
        self
    }

    /// Parses a complete N-Triples document into a graph
    pub fn parse_str(&self, input: &str) -> Result<Graph> {
        let mut graph = Graph::new();
        for (index, line) in input.lines().enumerate() {
            match parse_line(line, index + 1) {
                Ok(Some(triple)) => {
                    graph.insert(triple);
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
        Ok(graph)
    }

    /// Parses an N-Triples document from a reader
    pub fn parse_reader<R: Read>(&self, mut reader: R) -> Result<Graph> {
        let mut buffer = String::new();
        reader.read_to_string(&mut buffer)?;
        self.parse_str(&buffer)
    }
}

/// Parses one statement line; comments and blank lines yield `None`
pub(crate) fn parse_line(line: &str, line_number: usize) -> std::result::Result<Option<Triple>, SyntaxError> {
    let mut scanner = TermScanner::new(line, line_number);
    if scanner.at_end() {
        return Ok(None);
    }

    let subject = scan_subject(&mut scanner)?;
    let predicate = scan_predicate(&mut scanner)?;
    let object = scanner.scan_term()?;
    scanner.expect_dot()?;
    if !scanner.at_end() {
        return Err(SyntaxError::msg(
            "trailing content after statement",
            scanner.position(),
        ));
    }

    Ok(Some(Triple::new(subject, predicate, object)))
}

pub(crate) fn scan_subject(scanner: &mut TermScanner<'_>) -> std::result::Result<Subject, SyntaxError> {
    let position = scanner.position();
    match scanner.scan_term()? {
        Term::NamedNode(n) => Ok(Subject::NamedNode(n)),
        Term::BlankNode(b) => Ok(Subject::BlankNode(b)),
        Term::Literal(_) => Err(SyntaxError::msg("literal in subject position", position)),
    }
}

pub(crate) fn scan_predicate(
    scanner: &mut TermScanner<'_>,
) -> std::result::Result<crate::model::NamedNode, SyntaxError> {
    let position = scanner.position();
    match scanner.scan_term()? {
        Term::NamedNode(n) => Ok(n),
        _ => Err(SyntaxError::msg(
            "predicate must be an IRI",
            position,
        )),
    }
}

/// N-Triples serializer
#[derive(Debug, Clone, Default)]
pub struct NTriplesSerializer {
    sorted: bool,
}

impl NTriplesSerializer {
    /// Creates a new N-Triples serializer
    pub fn new() -> Self {
        NTriplesSerializer::default()
    }

    /// Emits statements in sorted order, for reproducible output
    pub fn sorted(mut self) -> Self {
        self.sorted = true;
        self
    }

    /// Serializes a graph to a string
    pub fn serialize_graph(&self, graph: &Graph) -> String {
        let mut out = String::new();
        let write_one = |out: &mut String, triple: &Triple| {
            out.push_str(&format_triple(triple));
            out.push('\n');
        };
        if self.sorted {
            let mut triples: Vec<Triple> = graph.triples().collect();
            triples.sort();
            for triple in &triples {
                write_one(&mut out, triple);
            }
        } else {
            for triple in graph.triples() {
                write_one(&mut out, &triple);
            }
        }
        out
    }

    /// Serializes a graph to a writer
    pub fn to_writer<W: Write>(&self, graph: &Graph, mut writer: W) -> Result<()> {
        writer.write_all(self.serialize_graph(graph).as_bytes())?;
        Ok(())
    }
}

/// The canonical single-line form of a triple
pub(crate) fn format_triple(triple: &Triple) -> String {
    // Term `Display` implementations already produce N-Triples syntax
    format!(
        "{} {} {} .",
        triple.subject(),
        triple.predicate(),
        triple.object()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Literal, NamedNode};
    use crate::vocab;

    #[test]
    fn test_parse_typed_literal_statement() {
        let input = "<http://ex/s> <http://ex/p> \"42\"^^<http://www.w3.org/2001/XMLSchema#integer> .";
        let graph = NTriplesParser::new().parse_str(input).unwrap();
        assert_eq!(graph.triple_count(), 1);

        let triple = graph.triples().next().unwrap();
        assert_eq!(triple.subject().as_named_node().unwrap().as_str(), "http://ex/s");
        assert_eq!(triple.predicate().as_str(), "http://ex/p");
        let literal = triple.object().as_literal().unwrap();
        assert_eq!(literal.value(), "42");
        assert_eq!(literal.datatype().as_str(), vocab::xsd::INTEGER.as_str());
        assert_eq!(
            literal.to_value(),
            Some(crate::xsd::XsdValue::Integer(42))
        );
    }

    #[test]
    fn test_parse_comments_and_blank_lines() {
        let input = "# a comment\n\n<http://ex/s> <http://ex/p> \"x\" . # trailing\n";
        let graph = NTriplesParser::new().parse_str(input).unwrap();
        assert_eq!(graph.triple_count(), 1);
    }

    #[test]
    fn test_parse_error_carries_line() {
        let input = "<http://ex/s> <http://ex/p> \"x\" .\nnot a statement\n";
        let error = NTriplesParser::new().parse_str(input).unwrap_err();
        let crate::RdfError::Format(syntax) = error else {
            panic!("expected format error");
        };
        assert_eq!(syntax.position().line, 2);
    }

    #[test]
    fn test_lenient_mode_skips_bad_lines() {
        let input = "<http://ex/s> <http://ex/p> \"x\" .\nbroken\n<http://ex/s> <http://ex/p> \"y\" .";
        let graph = NTriplesParser::new().lenient().parse_str(input).unwrap();
        assert_eq!(graph.triple_count(), 2);
    }

    #[test]
    fn test_roundtrip() {
        let mut graph = Graph::new();
        graph
            .add((
                "http://ex/s",
                "http://ex/p",
                Literal::new_simple_literal("line\nbreak \"quoted\""),
            ))
            .unwrap();
        graph
            .add(("_:b0", "http://ex/p", NamedNode::new("http://ex/o").unwrap()))
            .unwrap();

        let text = NTriplesSerializer::new().serialize_graph(&graph);
        let back = NTriplesParser::new().parse_str(&text).unwrap();
        assert_eq!(back, graph);
    }

    #[test]
    fn test_sorted_output_is_stable() {
        let mut graph = Graph::new();
        graph.add(("http://ex/b", "http://ex/p", "2")).unwrap();
        graph.add(("http://ex/a", "http://ex/p", "1")).unwrap();

        let text = NTriplesSerializer::new().sorted().serialize_graph(&graph);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("<http://ex/a>"));
        assert!(lines[1].starts_with("<http://ex/b>"));
    }
}
