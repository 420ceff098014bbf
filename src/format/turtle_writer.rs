//! Turtle pretty-printer
//!
//! Emits a Turtle document that round-trips to an isomorphic graph. The
//! writer runs in phases: a preprocessing pass counts blank node
//! references and reconstructs well-formed RDF lists, directives are
//! emitted, then descriptions are ordered and rendered with prefix,
//! base-relative, list, and blank-node-property-list sugar.

use std::collections::{BTreeSet, HashMap};
use std::io::Write;

use crate::description::Description;
use crate::format::ntriples::NTriplesSerializer;
use crate::graph::Graph;
use crate::model::{BlankNode, Literal, NamedNode, Object, Subject};
use crate::prefix::PrefixMap;
use crate::vocab;
use crate::Result;

/// Serializer configuration
#[derive(Debug, Clone)]
pub struct TurtleConfig {
    /// Continuation indent in spaces
    pub indent: usize,
    /// Classes whose instances are grouped right after the base subject
    pub top_classes: Vec<NamedNode>,
}

impl Default for TurtleConfig {
    fn default() -> Self {
        TurtleConfig {
            indent: 4,
            top_classes: vec![vocab::rdfs::CLASS.clone()],
        }
    }
}

/// Turtle serializer
///
/// Prefixes and base IRI default to the graph's own annotations; the
/// builder methods override them.
#[derive(Debug, Clone, Default)]
pub struct TurtleSerializer {
    config: TurtleConfig,
    base_iri: Option<String>,
    prefixes: Option<PrefixMap>,
}

impl TurtleSerializer {
    /// Creates a new Turtle serializer
    pub fn new() -> Self {
        TurtleSerializer::default()
    }

    /// Uses a custom configuration
    pub fn with_config(mut self, config: TurtleConfig) -> Self {
        self.config = config;
        self
    }

    /// Overrides the base IRI
    pub fn with_base_iri(mut self, base_iri: impl Into<String>) -> Self {
        self.base_iri = Some(base_iri.into());
        self
    }

    /// Overrides the prefix map
    pub fn with_prefixes(mut self, prefixes: PrefixMap) -> Self {
        self.prefixes = Some(prefixes);
        self
    }

    /// Serializes a graph to a Turtle string
    pub fn serialize_graph(&self, graph: &Graph) -> String {
        let prefixes = self
            .prefixes
            .clone()
            .or_else(|| graph.prefixes().cloned())
            .unwrap_or_default();
        let base = self
            .base_iri
            .clone()
            .or_else(|| graph.base_iri().map(|b| b.as_str().to_string()));

        Pretty::new(graph, &self.config, prefixes, base).run()
    }

    /// Serializes a graph to a writer
    pub fn to_writer<W: Write>(&self, graph: &Graph, mut writer: W) -> Result<()> {
        writer.write_all(self.serialize_graph(graph).as_bytes())?;
        Ok(())
    }
}

struct Pretty<'a> {
    graph: &'a Graph,
    config: &'a TurtleConfig,
    prefixes: PrefixMap,
    base: Option<String>,
    /// Object-position reference counts per blank node
    object_refs: HashMap<BlankNode, usize>,
    /// Well-formed list heads and their items
    lists: HashMap<BlankNode, Vec<Object>>,
    /// Blank nodes whose descriptions are rendered inside another
    /// statement (list chain members, inlined heads)
    consumed: BTreeSet<BlankNode>,
    /// Heads with extra predicates, rendered as `( … )` subjects
    subject_sugar: BTreeSet<BlankNode>,
    /// Blank nodes whose descriptions have been rendered somewhere
    rendered: BTreeSet<BlankNode>,
    /// Blank nodes currently being rendered inline (cycle guard)
    stack: Vec<BlankNode>,
    out: String,
}

impl<'a> Pretty<'a> {
    fn new(
        graph: &'a Graph,
        config: &'a TurtleConfig,
        prefixes: PrefixMap,
        base: Option<String>,
    ) -> Self {
        let mut pretty = Pretty {
            graph,
            config,
            prefixes,
            base,
            object_refs: HashMap::new(),
            lists: HashMap::new(),
            consumed: BTreeSet::new(),
            subject_sugar: BTreeSet::new(),
            rendered: BTreeSet::new(),
            stack: Vec::new(),
            out: String::new(),
        };
        pretty.count_object_refs();
        pretty.detect_lists();
        pretty
    }

    fn object_refs(&self, node: &BlankNode) -> usize {
        self.object_refs.get(node).copied().unwrap_or(0)
    }

    fn count_object_refs(&mut self) {
        for triple in self.graph.triples() {
            if let Object::BlankNode(node) = triple.object() {
                *self.object_refs.entry(node.clone()).or_insert(0) += 1;
            }
        }
    }

    /// A list chain node carries exactly one `rdf:first` and one
    /// `rdf:rest`; the head may carry extra predicates
    fn list_shape(description: &Description) -> Option<(Object, Object, bool)> {
        let first = description.get(&vocab::rdf::FIRST)?;
        let rest = description.get(&vocab::rdf::REST)?;
        if first.len() != 1 || rest.len() != 1 {
            return None;
        }
        let extras = description.predicate_count() > 2;
        Some((
            first.iter().next().expect("length checked").clone(),
            rest.iter().next().expect("length checked").clone(),
            extras,
        ))
    }

    fn detect_lists(&mut self) {
        // Nodes referenced via rdf:rest are chain tails, not heads
        let mut tails: BTreeSet<BlankNode> = BTreeSet::new();
        for description in self.graph.descriptions() {
            if let Subject::BlankNode(_) = description.subject() {
                if let Some((_, Object::BlankNode(rest), _)) = Self::list_shape(description) {
                    tails.insert(rest);
                }
            }
        }

        for description in self.graph.descriptions() {
            let Subject::BlankNode(head) = description.subject() else {
                continue;
            };
            if tails.contains(head) {
                continue;
            }
            let Some((first, rest, extras)) = Self::list_shape(description) else {
                continue;
            };

            let head_refs = self.object_refs(head);
            // A pure head inlines at its single reference; a head with
            // extra predicates can only take subject sugar, and only as
            // a root
            if extras && head_refs > 0 {
                continue;
            }
            if !extras && head_refs > 1 {
                continue;
            }
            if !extras && head_refs == 0 {
                // An orphan pure list has no position to show sugar at
                continue;
            }

            // Walk the chain; every tail node must be pure and
            // referenced exactly once
            let mut items = vec![first];
            let mut members = Vec::new();
            let mut cursor = rest;
            let mut well_formed = false;
            let mut seen: BTreeSet<BlankNode> = BTreeSet::from([head.clone()]);
            loop {
                match cursor {
                    Object::NamedNode(n) if n == *vocab::rdf::NIL => {
                        well_formed = true;
                        break;
                    }
                    Object::BlankNode(node) => {
                        if seen.contains(&node) || self.object_refs(&node) != 1 {
                            break;
                        }
                        let Some(description) = self
                            .graph
                            .description(&Subject::BlankNode(node.clone()))
                        else {
                            break;
                        };
                        let Some((first, rest, tail_extras)) = Self::list_shape(description)
                        else {
                            break;
                        };
                        if tail_extras {
                            break;
                        }
                        seen.insert(node.clone());
                        members.push(node);
                        items.push(first);
                        cursor = rest;
                    }
                    _ => break,
                }
            }

            if !well_formed {
                continue;
            }

            self.lists.insert(head.clone(), items);
            self.consumed.extend(members);
            if extras {
                self.subject_sugar.insert(head.clone());
            } else {
                // Inlined at its single reference
                self.consumed.insert(head.clone());
            }
        }
    }

    fn run(mut self) -> String {
        self.emit_directives();

        for subject in self.ordered_subjects() {
            self.emit_statement(&subject);
        }

        // Blank node descriptions skipped for inlining but never reached
        // (reference cycles) still have to appear
        loop {
            let missing: Vec<Subject> = self
                .graph
                .descriptions()
                .filter_map(|d| match d.subject() {
                    Subject::BlankNode(b) if !self.rendered.contains(b) => {
                        Some(d.subject().clone())
                    }
                    _ => None,
                })
                .collect();
            if missing.is_empty() {
                break;
            }
            for subject in missing {
                // Emitting one leftover can inline others
                if let Subject::BlankNode(node) = &subject {
                    if self.rendered.contains(node) {
                        continue;
                    }
                }
                self.emit_statement(&subject);
            }
        }

        self.out
    }

    fn emit_directives(&mut self) {
        if let Some(base) = &self.base {
            if !base.ends_with('/') && !base.ends_with('#') {
                tracing::warn!(base = %base, "base IRI does not end in '/' or '#'");
            }
            self.out.push_str(&format!("@base <{base}> .\n"));
        }
        let directives: Vec<String> = self
            .prefixes
            .iter()
            .map(|(prefix, namespace)| format!("@prefix {prefix}: <{namespace}> .\n"))
            .collect();
        for directive in directives {
            self.out.push_str(&directive);
        }
        if self.base.is_some() || !self.prefixes.is_empty() {
            self.out.push('\n');
        }
    }

    /// Top-level emission order: the base subject, then instances of the
    /// configured top classes, then everything else. Each bucket keeps
    /// the subject index order, which already sorts IRI subjects before
    /// blank node subjects and lexically within each kind.
    fn ordered_subjects(&self) -> Vec<Subject> {
        let mut order = Vec::new();
        let mut placed: BTreeSet<Subject> = BTreeSet::new();

        for description in self.graph.descriptions() {
            if self.skipped_at_top_level(description.subject()) {
                placed.insert(description.subject().clone());
            }
        }

        if let Some(base) = &self.base {
            let base_subject = Subject::NamedNode(NamedNode::new_unchecked(base.clone()));
            if self.graph.description(&base_subject).is_some() && !placed.contains(&base_subject) {
                placed.insert(base_subject.clone());
                order.push(base_subject);
            }
        }

        for class in &self.config.top_classes {
            let class_object = Object::NamedNode(class.clone());
            for description in self.graph.descriptions() {
                let subject = description.subject();
                if placed.contains(subject) {
                    continue;
                }
                if description.contains(&vocab::rdf::TYPE, &class_object) {
                    placed.insert(subject.clone());
                    order.push(subject.clone());
                }
            }
        }

        for description in self.graph.descriptions() {
            let subject = description.subject();
            if !placed.contains(subject) {
                order.push(subject.clone());
            }
        }

        order
    }

    fn skipped_at_top_level(&self, subject: &Subject) -> bool {
        match subject {
            Subject::BlankNode(node) => {
                self.consumed.contains(node) || self.object_refs(node) == 1
            }
            Subject::NamedNode(_) => false,
        }
    }

    fn emit_statement(&mut self, subject: &Subject) {
        let Some(description) = self.graph.description(subject) else {
            return;
        };
        let description = description.clone();

        match subject {
            Subject::NamedNode(node) => {
                let rendered = self.render_iri(node);
                self.emit_predications(&rendered, &description);
            }
            Subject::BlankNode(node) => {
                self.rendered.insert(node.clone());
                if self.subject_sugar.contains(node) {
                    // List sugar in subject position; the chain triples
                    // are consumed by it
                    let items = self.lists.get(node).cloned().unwrap_or_default();
                    let rendered = self.render_list(&items);
                    let mut remaining = description.clone();
                    let _ = remaining
                        .delete_predicates([vocab::rdf::FIRST.clone(), vocab::rdf::REST.clone()]);
                    self.emit_predications(&rendered, &remaining);
                } else if self.object_refs(node) == 0 {
                    // A root: anonymous property list form
                    self.stack.push(node.clone());
                    let rendered = self.render_anon(&description);
                    self.stack.pop();
                    self.out.push_str(&rendered);
                    self.out.push_str(" .\n\n");
                } else {
                    let rendered = format!("_:{}", node.as_str());
                    // Objects reaching back to this subject must render as
                    // labels, not fresh inline nodes
                    self.stack.push(node.clone());
                    self.emit_predications(&rendered, &description);
                    self.stack.pop();
                }
            }
        }
    }

    /// Renders `subject predicate objects (; predicate objects)* .`
    fn emit_predications(&mut self, subject: &str, description: &Description) {
        if description.is_empty() {
            return;
        }
        let indent = " ".repeat(self.config.indent);
        let mut parts: Vec<String> = Vec::new();
        for (predicate, objects) in ordered_predications(description) {
            let predicate_str = self.render_predicate(&predicate);
            let objects_str = objects
                .iter()
                .map(|o| self.render_object(o))
                .collect::<Vec<_>>()
                .join(", ");
            parts.push(format!("{predicate_str} {objects_str}"));
        }
        let body = parts.join(&format!(" ;\n{indent}"));
        self.out.push_str(&format!("{subject} {body} .\n\n"));
    }

    /// Renders a description as `[ p o ; q r ]`
    fn render_anon(&mut self, description: &Description) -> String {
        if description.is_empty() {
            return "[]".to_string();
        }
        let mut parts: Vec<String> = Vec::new();
        for (predicate, objects) in ordered_predications(description) {
            let predicate_str = self.render_predicate(&predicate);
            let objects_str = objects
                .iter()
                .map(|o| self.render_object(o))
                .collect::<Vec<_>>()
                .join(", ");
            parts.push(format!("{predicate_str} {objects_str}"));
        }
        format!("[ {} ]", parts.join(" ; "))
    }

    fn render_list(&mut self, items: &[Object]) -> String {
        let rendered: Vec<String> = items.iter().map(|o| self.render_object(o)).collect();
        format!("( {} )", rendered.join(" "))
    }

    fn render_predicate(&self, predicate: &NamedNode) -> String {
        if *predicate == *vocab::rdf::TYPE {
            "a".to_string()
        } else {
            self.render_iri(predicate)
        }
    }

    fn render_object(&mut self, object: &Object) -> String {
        match object {
            Object::NamedNode(node) => {
                if *node == *vocab::rdf::NIL {
                    "()".to_string()
                } else {
                    self.render_iri(node)
                }
            }
            Object::Literal(literal) => self.render_literal(literal),
            Object::BlankNode(node) => self.render_blank_object(node),
        }
    }

    fn render_blank_object(&mut self, node: &BlankNode) -> String {
        if self.stack.contains(node) {
            // Cycle: fall back to a label; the description is emitted at
            // top level by the leftover pass
            return format!("_:{}", node.as_str());
        }
        if let Some(items) = self.lists.get(node).cloned() {
            if self.consumed.contains(node) {
                self.mark_chain_rendered(node);
                self.stack.push(node.clone());
                let rendered = self.render_list(&items);
                self.stack.pop();
                return rendered;
            }
        }
        if self.object_refs(node) == 1 {
            let subject = Subject::BlankNode(node.clone());
            match self.graph.description(&subject) {
                Some(description) => {
                    let description = description.clone();
                    self.rendered.insert(node.clone());
                    self.stack.push(node.clone());
                    let rendered = self.render_anon(&description);
                    self.stack.pop();
                    return rendered;
                }
                None => return "[]".to_string(),
            }
        }
        format!("_:{}", node.as_str())
    }

    /// Marks every chain node of an inlined list as rendered
    fn mark_chain_rendered(&mut self, head: &BlankNode) {
        let mut cursor = Some(head.clone());
        while let Some(node) = cursor {
            self.rendered.insert(node.clone());
            cursor = self
                .graph
                .description(&Subject::BlankNode(node))
                .and_then(|d| d.first(&vocab::rdf::REST))
                .and_then(|rest| rest.as_blank_node().cloned());
        }
    }

    fn render_iri(&self, node: &NamedNode) -> String {
        let iri = node.as_str();
        if let Some((prefix, local)) = self.prefixes.shrink(iri) {
            if is_valid_local_name(local) {
                return format!("{prefix}:{local}");
            }
        }
        if let Some(base) = &self.base {
            if let Some(relative) = iri.strip_prefix(base.as_str()) {
                if !relative.contains(':') && !relative.starts_with('/') {
                    return format!("<{relative}>");
                }
            }
        }
        format!("<{iri}>")
    }

    fn render_literal(&self, literal: &Literal) -> String {
        if let Some(language) = literal.language() {
            return format!("{}@{}", quoted(literal.value()), language);
        }

        let datatype = literal.datatype();
        let shorthand = *datatype == *vocab::xsd::BOOLEAN
            || *datatype == *vocab::xsd::INTEGER
            || *datatype == *vocab::xsd::DECIMAL
            || *datatype == *vocab::xsd::DOUBLE;
        if shorthand {
            if let Some(canonical) = literal.canonical_lexical() {
                return canonical;
            }
            // Invalid lexical form: fall back to the typed rendering
        }

        if *datatype == *vocab::xsd::STRING {
            quoted(literal.value())
        } else {
            format!("{}^^{}", quoted(literal.value()), self.render_iri(datatype))
        }
    }
}

/// Predicate order: `rdf:type`, `rdfs:label`, `dc:title`, then the
/// remaining predicates lexicographically
fn ordered_predications(
    description: &Description,
) -> Vec<(NamedNode, Vec<Object>)> {
    let front = [
        vocab::rdf::TYPE.clone(),
        vocab::rdfs::LABEL.clone(),
        vocab::dc::TITLE.clone(),
    ];
    let mut ordered = Vec::new();
    for predicate in &front {
        if let Some(objects) = description.get(predicate) {
            ordered.push((predicate.clone(), objects.iter().cloned().collect()));
        }
    }
    for (predicate, objects) in description.predications() {
        if front.contains(predicate) {
            continue;
        }
        ordered.push((predicate.clone(), objects.iter().cloned().collect()));
    }
    ordered
}

/// Quotes a string value, using the long form when it spans lines
fn quoted(value: &str) -> String {
    if value.contains('\n') || value.contains('\r') {
        let mut escaped = String::with_capacity(value.len() + 6);
        for ch in value.chars() {
            match ch {
                '\\' => escaped.push_str("\\\\"),
                '"' => escaped.push_str("\\\""),
                other => escaped.push(other),
            }
        }
        format!("\"\"\"{escaped}\"\"\"")
    } else {
        let mut escaped = String::with_capacity(value.len() + 2);
        for ch in value.chars() {
            match ch {
                '\\' => escaped.push_str("\\\\"),
                '"' => escaped.push_str("\\\""),
                '\u{0008}' => escaped.push_str("\\b"),
                '\u{000C}' => escaped.push_str("\\f"),
                '\t' => escaped.push_str("\\t"),
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                other => escaped.push(other),
            }
        }
        format!("\"{escaped}\"")
    }
}

/// Check if a string is a valid local name for Turtle prefixed names
fn is_valid_local_name(local: &str) -> bool {
    if local.is_empty() {
        return true;
    }

    let first_char = local
        .chars()
        .next()
        .expect("local name validated to be non-empty");
    if !is_pn_chars_base(first_char) && first_char != '_' && !first_char.is_ascii_digit() {
        return false;
    }

    for ch in local.chars().skip(1) {
        if !is_pn_chars(ch) && ch != '.' {
            return false;
        }
    }

    !local.ends_with('.')
}

/// Check if character is a PN_CHARS_BASE (per Turtle grammar)
fn is_pn_chars_base(ch: char) -> bool {
    ch.is_ascii_alphabetic()
        || ('\u{00C0}'..='\u{00D6}').contains(&ch)
        || ('\u{00D8}'..='\u{00F6}').contains(&ch)
        || ('\u{00F8}'..='\u{02FF}').contains(&ch)
        || ('\u{0370}'..='\u{037D}').contains(&ch)
        || ('\u{037F}'..='\u{1FFF}').contains(&ch)
        || ('\u{200C}'..='\u{200D}').contains(&ch)
        || ('\u{2070}'..='\u{218F}').contains(&ch)
        || ('\u{2C00}'..='\u{2FEF}').contains(&ch)
        || ('\u{3001}'..='\u{D7FF}').contains(&ch)
        || ('\u{F900}'..='\u{FDCF}').contains(&ch)
        || ('\u{FDF0}'..='\u{FFFD}').contains(&ch)
}

/// Check if character is a PN_CHARS (per Turtle grammar)
fn is_pn_chars(ch: char) -> bool {
    is_pn_chars_base(ch)
        || ch == '_'
        || ch == '-'
        || ch.is_ascii_digit()
        || ch == '\u{00B7}'
        || ('\u{0300}'..='\u{036F}').contains(&ch)
        || ('\u{203F}'..='\u{2040}').contains(&ch)
}

/// Canonical sorted N-Triples rendering, used by tests to compare graphs
/// textually
pub fn canonical_ntriples(graph: &Graph) -> String {
    NTriplesSerializer::new().sorted().serialize_graph(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::turtle::TurtleParser;

    fn ex(local: &str) -> NamedNode {
        NamedNode::new(format!("http://example.org/{local}")).unwrap()
    }

    fn prefixed_graph() -> Graph {
        let mut graph = Graph::new();
        graph.add_prefixes([("ex", "http://example.org/")]);
        graph
    }

    #[test]
    fn test_simple_statement_uses_prefixes() {
        let mut graph = prefixed_graph();
        graph.add((ex("s"), ex("p"), "hello")).unwrap();

        let text = TurtleSerializer::new().serialize_graph(&graph);
        assert!(text.contains("@prefix ex: <http://example.org/> ."));
        assert!(text.contains("ex:s ex:p \"hello\" ."));
    }

    #[test]
    fn test_rdf_type_renders_as_a_and_comes_first() {
        let mut graph = prefixed_graph();
        graph.add((ex("s"), ex("p"), "x")).unwrap();
        graph
            .add((ex("s"), vocab::rdf::TYPE.clone(), ex("Widget")))
            .unwrap();

        let text = TurtleSerializer::new().serialize_graph(&graph);
        let statement = text
            .lines()
            .find(|l| l.starts_with("ex:s"))
            .expect("statement line");
        assert!(statement.starts_with("ex:s a ex:Widget ;"));
    }

    #[test]
    fn test_multiple_objects_are_comma_separated() {
        let mut graph = prefixed_graph();
        graph.add((ex("s"), ex("p"), "a")).unwrap();
        graph.add((ex("s"), ex("p"), "b")).unwrap();

        let text = TurtleSerializer::new().serialize_graph(&graph);
        assert!(text.contains("ex:s ex:p \"a\", \"b\" ."));
    }

    #[test]
    fn test_list_sugar() {
        let mut graph = prefixed_graph();
        let b0 = BlankNode::new("b0").unwrap();
        let b1 = BlankNode::new("b1").unwrap();
        graph.add((ex("s"), ex("p"), b0.clone())).unwrap();
        graph
            .add((b0.clone(), vocab::rdf::FIRST.clone(), "a"))
            .unwrap();
        graph
            .add((b0.clone(), vocab::rdf::REST.clone(), b1.clone()))
            .unwrap();
        graph
            .add((b1.clone(), vocab::rdf::FIRST.clone(), "b"))
            .unwrap();
        graph
            .add((b1.clone(), vocab::rdf::REST.clone(), vocab::rdf::NIL.clone()))
            .unwrap();

        let text = TurtleSerializer::new().serialize_graph(&graph);
        assert!(
            text.contains("ex:s ex:p ( \"a\" \"b\" ) ."),
            "expected list sugar in:\n{text}"
        );
        assert!(!text.contains("rdf:first"));
        assert!(!text.contains("22-rdf-syntax-ns#first"));
    }

    #[test]
    fn test_nil_renders_as_empty_list() {
        let mut graph = prefixed_graph();
        graph
            .add((ex("s"), ex("p"), vocab::rdf::NIL.clone()))
            .unwrap();
        let text = TurtleSerializer::new().serialize_graph(&graph);
        assert!(text.contains("ex:s ex:p () ."));
    }

    #[test]
    fn test_single_reference_bnode_inlines() {
        let mut graph = prefixed_graph();
        let b = BlankNode::new("inner").unwrap();
        graph.add((ex("s"), ex("p"), b.clone())).unwrap();
        graph.add((b.clone(), ex("q"), "nested")).unwrap();

        let text = TurtleSerializer::new().serialize_graph(&graph);
        assert!(text.contains("ex:s ex:p [ ex:q \"nested\" ] ."));
        assert!(!text.contains("_:inner"));
    }

    #[test]
    fn test_multi_reference_bnode_keeps_label() {
        let mut graph = prefixed_graph();
        let b = BlankNode::new("shared").unwrap();
        graph.add((ex("s1"), ex("p"), b.clone())).unwrap();
        graph.add((ex("s2"), ex("p"), b.clone())).unwrap();
        graph.add((b.clone(), ex("q"), "v")).unwrap();

        let text = TurtleSerializer::new().serialize_graph(&graph);
        assert!(text.contains("ex:s1 ex:p _:shared ."));
        assert!(text.contains("_:shared ex:q \"v\" ."));
    }

    #[test]
    fn test_base_relative_rendering_and_base_subject_first() {
        let mut graph = Graph::new();
        graph.set_base_iri("http://example.org/").unwrap();
        graph
            .add((
                "http://example.org/",
                "http://example.org/about",
                NamedNode::new("http://example.org/doc").unwrap(),
            ))
            .unwrap();
        graph
            .add(("http://example.org/alpha", "http://example.org/p", "x"))
            .unwrap();

        let text = TurtleSerializer::new().serialize_graph(&graph);
        assert!(text.starts_with("@base <http://example.org/> ."));
        // The base subject is emitted before other statements
        let first_statement = text
            .lines()
            .find(|l| !l.starts_with('@') && !l.is_empty())
            .unwrap();
        assert!(first_statement.starts_with("<> <about> <doc> ."));
    }

    #[test]
    fn test_top_class_grouping() {
        let mut graph = prefixed_graph();
        graph.add((ex("zzz"), ex("p"), "plain")).unwrap();
        graph
            .add((ex("AClass"), vocab::rdf::TYPE.clone(), vocab::rdfs::CLASS.clone()))
            .unwrap();

        let text = TurtleSerializer::new().serialize_graph(&graph);
        let class_position = text.find("ex:AClass").unwrap();
        let plain_position = text.find("ex:zzz").unwrap();
        assert!(class_position < plain_position);
    }

    #[test]
    fn test_canonical_numeric_shorthand() {
        let mut graph = prefixed_graph();
        graph.add((ex("s"), ex("int"), 42i64)).unwrap();
        graph.add((ex("s"), ex("flag"), true)).unwrap();
        graph
            .add((
                ex("s"),
                ex("dec"),
                Literal::new_typed_literal("1.50", vocab::xsd::DECIMAL.clone()),
            ))
            .unwrap();
        graph
            .add((
                ex("s"),
                ex("bad"),
                Literal::new_typed_literal("four", vocab::xsd::INTEGER.clone()),
            ))
            .unwrap();

        let text = TurtleSerializer::new().serialize_graph(&graph);
        assert!(text.contains("ex:int 42"));
        assert!(text.contains("ex:flag true"));
        assert!(text.contains("ex:dec 1.5"));
        // Invalid lexical forms keep the full typed rendering
        assert!(text.contains("\"four\"^^"));
    }

    #[test]
    fn test_long_string_for_multiline_values() {
        let mut graph = prefixed_graph();
        graph.add((ex("s"), ex("p"), "line one\nline two")).unwrap();
        let text = TurtleSerializer::new().serialize_graph(&graph);
        assert!(text.contains("\"\"\"line one\nline two\"\"\""));
    }

    #[test]
    fn test_language_tag_rendering() {
        let mut graph = prefixed_graph();
        graph
            .add((
                ex("s"),
                ex("p"),
                Literal::new_language_tagged_literal("Hallo", "de").unwrap(),
            ))
            .unwrap();
        let text = TurtleSerializer::new().serialize_graph(&graph);
        assert!(text.contains("\"Hallo\"@de"));
    }

    #[test]
    fn test_predicate_ordering() {
        let mut graph = prefixed_graph();
        graph.add_prefixes([
            ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
            ("dc", "http://purl.org/dc/elements/1.1/"),
        ]);
        graph.add((ex("s"), ex("aaa"), "later")).unwrap();
        graph
            .add((ex("s"), vocab::dc::TITLE.clone(), "The Title"))
            .unwrap();
        graph
            .add((ex("s"), vocab::rdfs::LABEL.clone(), "The Label"))
            .unwrap();
        graph
            .add((ex("s"), vocab::rdf::TYPE.clone(), ex("T")))
            .unwrap();

        let text = TurtleSerializer::new().serialize_graph(&graph);
        let type_pos = text.find(" a ex:T").unwrap();
        let label_pos = text.find("rdfs:label").unwrap();
        let title_pos = text.find("dc:title").unwrap();
        let other_pos = text.find("ex:aaa").unwrap();
        assert!(type_pos < label_pos);
        assert!(label_pos < title_pos);
        assert!(title_pos < other_pos);
    }

    #[test]
    fn test_cyclic_blank_nodes_fall_back_to_labels() {
        let mut graph = prefixed_graph();
        let b1 = BlankNode::new("c1").unwrap();
        let b2 = BlankNode::new("c2").unwrap();
        graph.add((b1.clone(), ex("p"), b2.clone())).unwrap();
        graph.add((b2.clone(), ex("p"), b1.clone())).unwrap();

        let text = TurtleSerializer::new().serialize_graph(&graph);
        let reparsed = TurtleParser::new().parse_str(&text).unwrap();
        assert_eq!(reparsed.triple_count(), 2);
    }

    #[test]
    fn test_roundtrip_through_parser() {
        let mut graph = prefixed_graph();
        graph
            .add((ex("s"), vocab::rdf::TYPE.clone(), ex("Widget")))
            .unwrap();
        graph.add((ex("s"), ex("count"), 3i64)).unwrap();
        let inner = BlankNode::new("n").unwrap();
        graph.add((ex("s"), ex("nested"), inner.clone())).unwrap();
        graph.add((inner, ex("q"), "deep")).unwrap();

        let text = TurtleSerializer::new().serialize_graph(&graph);
        let reparsed = TurtleParser::new().parse_str(&text).unwrap();

        // Isomorphic modulo blank node labels; compare everything except
        // the blank labels via the canonical form with labels scrubbed
        let scrub = |s: &str| {
            s.lines()
                .map(|l| {
                    l.split_whitespace()
                        .map(|t| if t.starts_with("_:") { "_:x" } else { t })
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .collect::<std::collections::BTreeSet<_>>()
        };
        assert_eq!(
            scrub(&canonical_ntriples(&graph)),
            scrub(&canonical_ntriples(&reparsed))
        );
    }
}
