//! Turtle reader
//!
//! Tokenizer and recursive-descent parser for Turtle 1.1: prefix and base
//! directives (both `@`-style and SPARQL-style), the `a` keyword,
//! semicolon and comma lists, anonymous blank node property lists `[...]`,
//! collections `(...)`, numeric and boolean literal sugar, and long
//! (triple-quoted) strings. Relative IRIs resolve against the base IRI.

use std::io::Read;

use crate::format::error::{SyntaxError, TextPosition};
use crate::graph::Graph;
use crate::model::{BlankNode, Literal, NamedNode, Object, Subject, Triple};
use crate::prefix::PrefixMap;
use crate::vocab;
use crate::Result;

/// Turtle parser
#[derive(Debug, Clone, Default)]
pub struct TurtleParser {
    lenient: bool,
    base_iri: Option<String>,
    prefixes: PrefixMap,
}

impl TurtleParser {
    /// Creates a new Turtle parser
    pub fn new() -> Self {
        TurtleParser::default()
    }

    /// Enables lenient parsing: statements that fail to parse are skipped
    pub fn lenient(mut self) -> Self {
        self.lenient = true;
        self
    }

    /// Sets the base IRI for resolving relative IRIs
    pub fn with_base_iri(mut self, base_iri: impl Into<String>) -> Self {
        self.base_iri = Some(base_iri.into());
        self
    }

    /// Adds a namespace prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        self.prefixes.insert(prefix, iri);
        self
    }

    /// Adds several namespace prefixes
    pub fn with_prefixes(mut self, prefixes: &PrefixMap) -> Self {
        self.prefixes.merge(prefixes);
        self
    }

    /// Parses a Turtle document into a graph
    ///
    /// The returned graph carries the prefix map and base IRI in effect at
    /// the end of the document.
    pub fn parse_str(&self, input: &str) -> Result<Graph> {
        let mut tokenizer = Tokenizer::new(input);
        let mut state = ParserState {
            prefixes: self.prefixes.clone(),
            base: match &self.base_iri {
                Some(base) => Some(oxiri::Iri::parse(base.clone()).map_err(|_| {
                    crate::RdfError::InvalidIri(base.clone())
                })?),
                None => None,
            },
            bnode_counter: 0,
            triples: Vec::new(),
        };

        loop {
            if matches!(tokenizer.peek()?, Token::Eof) {
                break;
            }
            match parse_statement(&mut tokenizer, &mut state) {
                Ok(()) => {}
                Err(error) => {
                    if self.lenient {
                        tracing::debug!(%error, "skipping malformed statement");
                        recover(&mut tokenizer);
                    } else {
                        return Err(error.into());
                    }
                }
            }
        }

        let mut graph = Graph::new();
        for triple in state.triples {
            graph.insert(triple);
        }
        if !state.prefixes.is_empty() {
            graph = graph.with_prefixes(state.prefixes);
        }
        if let Some(base) = state.base {
            graph = graph.with_base_iri(base.as_str())?;
        }
        Ok(graph)
    }

    /// Parses a Turtle document from a reader
    pub fn parse_reader<R: Read>(&self, mut reader: R) -> Result<Graph> {
        let mut buffer = String::new();
        reader.read_to_string(&mut buffer)?;
        self.parse_str(&buffer)
    }
}

struct ParserState {
    prefixes: PrefixMap,
    base: Option<oxiri::Iri<String>>,
    bnode_counter: usize,
    triples: Vec<Triple>,
}

impl ParserState {
    fn fresh_bnode(&mut self) -> BlankNode {
        let node = BlankNode::new_unchecked(format!("tb{}", self.bnode_counter));
        self.bnode_counter += 1;
        node
    }

    fn resolve_iri(&self, raw: &str, position: TextPosition) -> std::result::Result<NamedNode, SyntaxError> {
        if oxiri::Iri::parse(raw).is_ok() {
            return Ok(NamedNode::new_unchecked(raw));
        }
        match &self.base {
            Some(base) => base
                .resolve(raw)
                .map(|iri| NamedNode::new_unchecked(iri.into_inner()))
                .map_err(|_| SyntaxError::InvalidIri {
                    iri: raw.to_string(),
                    position,
                }),
            None => Err(SyntaxError::NoBase {
                iri: raw.to_string(),
                position,
            }),
        }
    }

    fn expand_prefixed(
        &self,
        prefix: &str,
        local: &str,
        position: TextPosition,
    ) -> std::result::Result<NamedNode, SyntaxError> {
        let namespace = self
            .prefixes
            .get(prefix)
            .ok_or_else(|| SyntaxError::UndefinedPrefix {
                prefix: prefix.to_string(),
                position,
            })?;
        Ok(NamedNode::new_unchecked(format!("{namespace}{local}")))
    }
}

fn recover(tokenizer: &mut Tokenizer<'_>) {
    loop {
        match tokenizer.next_token() {
            Ok((Token::Dot, _)) | Ok((Token::Eof, _)) => break,
            Ok(_) => {}
            Err(_) => break,
        }
    }
}

fn parse_statement(
    tokenizer: &mut Tokenizer<'_>,
    state: &mut ParserState,
) -> std::result::Result<(), SyntaxError> {
    match tokenizer.peek()? {
        Token::PrefixKeyword { sparql_style } => {
            let sparql_style = *sparql_style;
            tokenizer.next_token()?;
            let (token, position) = tokenizer.next_token()?;
            let prefix = match token {
                Token::PrefixedName { prefix, local } if local.is_empty() => prefix,
                other => {
                    return Err(SyntaxError::msg(
                        format!("expected prefix declaration, found {other:?}"),
                        position,
                    ))
                }
            };
            let (token, position) = tokenizer.next_token()?;
            let namespace = match token {
                Token::Iri(raw) => state.resolve_iri(&raw, position)?,
                other => {
                    return Err(SyntaxError::msg(
                        format!("expected namespace IRI, found {other:?}"),
                        position,
                    ))
                }
            };
            state.prefixes.insert(prefix, namespace.into_string());
            if !sparql_style {
                expect_token(tokenizer, &Token::Dot)?;
            }
            Ok(())
        }
        Token::BaseKeyword { sparql_style } => {
            let sparql_style = *sparql_style;
            tokenizer.next_token()?;
            let (token, position) = tokenizer.next_token()?;
            let base = match token {
                Token::Iri(raw) => state.resolve_iri(&raw, position)?,
                other => {
                    return Err(SyntaxError::msg(
                        format!("expected base IRI, found {other:?}"),
                        position,
                    ))
                }
            };
            state.base = Some(
                oxiri::Iri::parse(base.into_string()).map_err(|_| SyntaxError::InvalidIri {
                    iri: "invalid base".to_string(),
                    position,
                })?,
            );
            if !sparql_style {
                expect_token(tokenizer, &Token::Dot)?;
            }
            Ok(())
        }
        _ => {
            parse_triples(tokenizer, state)?;
            expect_token(tokenizer, &Token::Dot)
        }
    }
}

fn parse_triples(
    tokenizer: &mut Tokenizer<'_>,
    state: &mut ParserState,
) -> std::result::Result<(), SyntaxError> {
    match tokenizer.peek()? {
        Token::LBracket => {
            let (_, _) = tokenizer.next_token()?;
            let node = state.fresh_bnode();
            let subject = Subject::BlankNode(node);
            if !matches!(tokenizer.peek()?, Token::RBracket) {
                parse_predicate_object_list(tokenizer, state, &subject)?;
            }
            expect_token(tokenizer, &Token::RBracket)?;
            // The outer predicate list is optional after a property list
            if starts_verb(tokenizer.peek()?) {
                parse_predicate_object_list(tokenizer, state, &subject)?;
            }
            Ok(())
        }
        Token::LParen => {
            tokenizer.next_token()?;
            let head = parse_collection(tokenizer, state)?;
            let subject = match head {
                Object::NamedNode(n) => Subject::NamedNode(n),
                Object::BlankNode(b) => Subject::BlankNode(b),
                Object::Literal(_) => unreachable!("collections are resources"),
            };
            parse_predicate_object_list(tokenizer, state, &subject)
        }
        _ => {
            let subject = parse_subject(tokenizer, state)?;
            parse_predicate_object_list(tokenizer, state, &subject)
        }
    }
}

fn parse_subject(
    tokenizer: &mut Tokenizer<'_>,
    state: &mut ParserState,
) -> std::result::Result<Subject, SyntaxError> {
    let (token, position) = tokenizer.next_token()?;
    match token {
        Token::Iri(raw) => Ok(Subject::NamedNode(state.resolve_iri(&raw, position)?)),
        Token::PrefixedName { prefix, local } => Ok(Subject::NamedNode(
            state.expand_prefixed(&prefix, &local, position)?,
        )),
        Token::BlankNodeLabel(label) => {
            Ok(Subject::BlankNode(BlankNode::new(label).map_err(|_| {
                SyntaxError::InvalidBlankNode {
                    label: "invalid label".to_string(),
                    position,
                }
            })?))
        }
        other => Err(SyntaxError::msg(
            format!("expected subject, found {other:?}"),
            position,
        )),
    }
}

fn starts_verb(token: &Token) -> bool {
    matches!(
        token,
        Token::A | Token::Iri(_) | Token::PrefixedName { .. }
    )
}

fn parse_verb(
    tokenizer: &mut Tokenizer<'_>,
    state: &mut ParserState,
) -> std::result::Result<NamedNode, SyntaxError> {
    let (token, position) = tokenizer.next_token()?;
    match token {
        Token::A => Ok(vocab::rdf::TYPE.clone()),
        Token::Iri(raw) => state.resolve_iri(&raw, position),
        Token::PrefixedName { prefix, local } => state.expand_prefixed(&prefix, &local, position),
        other => Err(SyntaxError::msg(
            format!("expected predicate, found {other:?}"),
            position,
        )),
    }
}

fn parse_predicate_object_list(
    tokenizer: &mut Tokenizer<'_>,
    state: &mut ParserState,
    subject: &Subject,
) -> std::result::Result<(), SyntaxError> {
    loop {
        let predicate = parse_verb(tokenizer, state)?;
        loop {
            let object = parse_object_value(tokenizer, state)?;
            state
                .triples
                .push(Triple::new(subject.clone(), predicate.clone(), object));
            if matches!(tokenizer.peek()?, Token::Comma) {
                tokenizer.next_token()?;
            } else {
                break;
            }
        }
        // A semicolon may be followed by another verb, a further
        // semicolon, or nothing (trailing semicolon is allowed)
        if matches!(tokenizer.peek()?, Token::Semicolon) {
            while matches!(tokenizer.peek()?, Token::Semicolon) {
                tokenizer.next_token()?;
            }
            if starts_verb(tokenizer.peek()?) {
                continue;
            }
        }
        return Ok(());
    }
}

/// Parses one object, emitting any triples a nested structure implies
fn parse_object_value(
    tokenizer: &mut Tokenizer<'_>,
    state: &mut ParserState,
) -> std::result::Result<Object, SyntaxError> {
    let (token, position) = tokenizer.next_token()?;
    match token {
        Token::Iri(raw) => Ok(Object::NamedNode(state.resolve_iri(&raw, position)?)),
        Token::PrefixedName { prefix, local } => Ok(Object::NamedNode(
            state.expand_prefixed(&prefix, &local, position)?,
        )),
        Token::BlankNodeLabel(label) => {
            Ok(Object::BlankNode(BlankNode::new(&label).map_err(|_| {
                SyntaxError::InvalidBlankNode { label, position }
            })?))
        }
        Token::LBracket => {
            let node = state.fresh_bnode();
            if !matches!(tokenizer.peek()?, Token::RBracket) {
                parse_predicate_object_list(tokenizer, state, &Subject::BlankNode(node.clone()))?;
            }
            expect_token(tokenizer, &Token::RBracket)?;
            Ok(Object::BlankNode(node))
        }
        Token::LParen => parse_collection(tokenizer, state),
        Token::StringLiteral(value) => match tokenizer.peek()? {
            Token::LangTag(_) => {
                let (token, position) = tokenizer.next_token()?;
                let Token::LangTag(tag) = token else {
                    unreachable!("peeked a language tag")
                };
                Literal::new_language_tagged_literal(value, &tag)
                    .map(Object::Literal)
                    .map_err(|_| SyntaxError::InvalidLanguageTag { tag, position })
            }
            Token::DatatypeMarker => {
                tokenizer.next_token()?;
                let (token, position) = tokenizer.next_token()?;
                let datatype = match token {
                    Token::Iri(raw) => state.resolve_iri(&raw, position)?,
                    Token::PrefixedName { prefix, local } => {
                        state.expand_prefixed(&prefix, &local, position)?
                    }
                    other => {
                        return Err(SyntaxError::msg(
                            format!("expected datatype IRI, found {other:?}"),
                            position,
                        ))
                    }
                };
                Ok(Object::Literal(Literal::new_typed_literal(value, datatype)))
            }
            _ => Ok(Object::Literal(Literal::new_simple_literal(value))),
        },
        Token::IntegerLiteral(lexical) => Ok(Object::Literal(Literal::new_typed_literal(
            lexical,
            vocab::xsd::INTEGER.clone(),
        ))),
        Token::DecimalLiteral(lexical) => Ok(Object::Literal(Literal::new_typed_literal(
            lexical,
            vocab::xsd::DECIMAL.clone(),
        ))),
        Token::DoubleLiteral(lexical) => Ok(Object::Literal(Literal::new_typed_literal(
            lexical,
            vocab::xsd::DOUBLE.clone(),
        ))),
        Token::BooleanLiteral(value) => Ok(Object::Literal(Literal::new_typed_literal(
            if value { "true" } else { "false" },
            vocab::xsd::BOOLEAN.clone(),
        ))),
        other => Err(SyntaxError::msg(
            format!("expected object, found {other:?}"),
            position,
        )),
    }
}

/// Parses a collection after its opening parenthesis, emitting the
/// `rdf:first`/`rdf:rest` chain; an empty collection is `rdf:nil`
fn parse_collection(
    tokenizer: &mut Tokenizer<'_>,
    state: &mut ParserState,
) -> std::result::Result<Object, SyntaxError> {
    let mut items = Vec::new();
    loop {
        if matches!(tokenizer.peek()?, Token::RParen) {
            tokenizer.next_token()?;
            break;
        }
        items.push(parse_object_value(tokenizer, state)?);
    }

    if items.is_empty() {
        return Ok(Object::NamedNode(vocab::rdf::NIL.clone()));
    }

    let nodes: Vec<BlankNode> = items.iter().map(|_| state.fresh_bnode()).collect();
    for (i, (node, item)) in nodes.iter().zip(items).enumerate() {
        state.triples.push(Triple::new(
            Subject::BlankNode(node.clone()),
            vocab::rdf::FIRST.clone(),
            item,
        ));
        let rest: Object = match nodes.get(i + 1) {
            Some(next) => Object::BlankNode(next.clone()),
            None => Object::NamedNode(vocab::rdf::NIL.clone()),
        };
        state.triples.push(Triple::new(
            Subject::BlankNode(node.clone()),
            vocab::rdf::REST.clone(),
            rest,
        ));
    }
    Ok(Object::BlankNode(nodes[0].clone()))
}

fn expect_token(
    tokenizer: &mut Tokenizer<'_>,
    expected: &Token,
) -> std::result::Result<(), SyntaxError> {
    let (token, position) = tokenizer.next_token()?;
    if std::mem::discriminant(&token) == std::mem::discriminant(expected) {
        Ok(())
    } else {
        Err(SyntaxError::msg(
            format!("expected {expected:?}, found {token:?}"),
            position,
        ))
    }
}

/// Token types for Turtle lexing
#[derive(Debug, Clone, PartialEq)]
enum Token {
    PrefixKeyword { sparql_style: bool },
    BaseKeyword { sparql_style: bool },
    A,
    Dot,
    Semicolon,
    Comma,
    LBracket,
    RBracket,
    LParen,
    RParen,
    DatatypeMarker,
    Iri(String),
    PrefixedName { prefix: String, local: String },
    BlankNodeLabel(String),
    StringLiteral(String),
    LangTag(String),
    IntegerLiteral(String),
    DecimalLiteral(String),
    DoubleLiteral(String),
    BooleanLiteral(bool),
    Eof,
}

struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    column: usize,
    peeked: Option<(Token, TextPosition)>,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Tokenizer {
            input,
            pos: 0,
            line: 1,
            column: 1,
            peeked: None,
        }
    }

    fn position(&self) -> TextPosition {
        TextPosition::new(self.line, self.column, self.pos)
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn peek(&mut self) -> std::result::Result<&Token, SyntaxError> {
        if self.peeked.is_none() {
            self.peeked = Some(self.read_token()?);
        }
        Ok(&self.peeked.as_ref().expect("just filled").0)
    }

    fn next_token(&mut self) -> std::result::Result<(Token, TextPosition), SyntaxError> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.read_token(),
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.bump();
            } else if ch == '#' {
                while let Some(ch) = self.bump() {
                    if ch == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn read_token(&mut self) -> std::result::Result<(Token, TextPosition), SyntaxError> {
        self.skip_whitespace_and_comments();
        let position = self.position();

        let Some(ch) = self.peek_char() else {
            return Ok((Token::Eof, position));
        };

        let token = match ch {
            ';' => {
                self.bump();
                Token::Semicolon
            }
            ',' => {
                self.bump();
                Token::Comma
            }
            '[' => {
                self.bump();
                Token::LBracket
            }
            ']' => {
                self.bump();
                Token::RBracket
            }
            '(' => {
                self.bump();
                Token::LParen
            }
            ')' => {
                self.bump();
                Token::RParen
            }
            '.' => {
                // A dot starts a decimal only when a digit follows
                if self.rest()[1..].starts_with(|c: char| c.is_ascii_digit()) {
                    self.read_number(position)?
                } else {
                    self.bump();
                    Token::Dot
                }
            }
            '^' => {
                if self.rest().starts_with("^^") {
                    self.bump();
                    self.bump();
                    Token::DatatypeMarker
                } else {
                    return Err(SyntaxError::UnexpectedCharacter {
                        character: '^',
                        position,
                    });
                }
            }
            '<' => self.read_iri(position)?,
            '"' | '\'' => self.read_string(position)?,
            '@' => self.read_at_keyword_or_lang_tag(position)?,
            '_' => self.read_blank_node_label(position)?,
            '+' | '-' => self.read_number(position)?,
            c if c.is_ascii_digit() => self.read_number(position)?,
            _ => self.read_word(position)?,
        };

        Ok((token, position))
    }

    fn read_iri(&mut self, position: TextPosition) -> std::result::Result<Token, SyntaxError> {
        self.bump(); // <
        let mut raw = String::new();
        loop {
            match self.bump() {
                Some('>') => break,
                Some('\\') => match self.bump() {
                    Some('u') => raw.push(self.read_hex_escape(4, position)?),
                    Some('U') => raw.push(self.read_hex_escape(8, position)?),
                    Some(other) => {
                        return Err(SyntaxError::InvalidEscape {
                            sequence: other.to_string(),
                            position,
                        })
                    }
                    None => return Err(SyntaxError::UnexpectedEof { position }),
                },
                Some('\n') | None => return Err(SyntaxError::UnexpectedEof { position }),
                Some(ch) => raw.push(ch),
            }
        }
        Ok(Token::Iri(raw))
    }

    fn read_hex_escape(
        &mut self,
        digits: usize,
        position: TextPosition,
    ) -> std::result::Result<char, SyntaxError> {
        let mut hex = String::with_capacity(digits);
        for _ in 0..digits {
            match self.bump() {
                Some(ch) if ch.is_ascii_hexdigit() => hex.push(ch),
                Some(ch) => {
                    return Err(SyntaxError::InvalidEscape {
                        sequence: ch.to_string(),
                        position,
                    })
                }
                None => return Err(SyntaxError::UnexpectedEof { position }),
            }
        }
        let code = u32::from_str_radix(&hex, 16).expect("hex digits only");
        char::from_u32(code).ok_or(SyntaxError::InvalidEscape {
            sequence: hex,
            position,
        })
    }

    fn read_string(&mut self, position: TextPosition) -> std::result::Result<Token, SyntaxError> {
        let quote = self.peek_char().expect("caller checked");
        let long_delimiter = [quote; 3].iter().collect::<String>();
        let long = self.rest().starts_with(&long_delimiter);

        if long {
            self.bump();
            self.bump();
            self.bump();
        } else {
            self.bump();
        }

        let mut value = String::new();
        loop {
            if long && self.rest().starts_with(&long_delimiter) {
                // The last three quotes of a run close the string; any
                // preceding ones belong to the value
                let mut run = 0;
                while self.peek_char() == Some(quote) {
                    self.bump();
                    run += 1;
                }
                for _ in 0..run - 3 {
                    value.push(quote);
                }
                break;
            }
            match self.bump() {
                Some('\\') => value.push(self.read_string_escape(position)?),
                Some(ch) if !long && ch == quote => break,
                Some('\n') if !long => {
                    return Err(SyntaxError::msg("newline in single-line string", position))
                }
                Some(ch) => value.push(ch),
                None => return Err(SyntaxError::UnexpectedEof { position }),
            }
        }
        Ok(Token::StringLiteral(value))
    }

    fn read_string_escape(
        &mut self,
        position: TextPosition,
    ) -> std::result::Result<char, SyntaxError> {
        match self.bump() {
            Some('t') => Ok('\t'),
            Some('b') => Ok('\u{0008}'),
            Some('n') => Ok('\n'),
            Some('r') => Ok('\r'),
            Some('f') => Ok('\u{000C}'),
            Some('"') => Ok('"'),
            Some('\'') => Ok('\''),
            Some('\\') => Ok('\\'),
            Some('u') => self.read_hex_escape(4, position),
            Some('U') => self.read_hex_escape(8, position),
            Some(other) => Err(SyntaxError::InvalidEscape {
                sequence: other.to_string(),
                position,
            }),
            None => Err(SyntaxError::UnexpectedEof { position }),
        }
    }

    fn read_at_keyword_or_lang_tag(
        &mut self,
        position: TextPosition,
    ) -> std::result::Result<Token, SyntaxError> {
        self.bump(); // @
        let rest = self.rest();
        let end = rest
            .find(|c: char| !c.is_ascii_alphanumeric() && c != '-')
            .unwrap_or(rest.len());
        let word = &rest[..end];
        match word {
            "prefix" => {
                self.advance_bytes(end);
                Ok(Token::PrefixKeyword { sparql_style: false })
            }
            "base" => {
                self.advance_bytes(end);
                Ok(Token::BaseKeyword { sparql_style: false })
            }
            "" => Err(SyntaxError::msg("empty language tag", position)),
            tag => {
                self.advance_bytes(end);
                Ok(Token::LangTag(tag.to_string()))
            }
        }
    }

    fn advance_bytes(&mut self, count: usize) {
        let target = self.pos + count;
        while self.pos < target && self.bump().is_some() {}
    }

    fn read_blank_node_label(
        &mut self,
        position: TextPosition,
    ) -> std::result::Result<Token, SyntaxError> {
        if !self.rest().starts_with("_:") {
            return Err(SyntaxError::UnexpectedCharacter {
                character: '_',
                position,
            });
        }
        self.bump();
        self.bump();
        let rest = self.rest();
        let end = rest
            .find(|c: char| !c.is_alphanumeric() && c != '_' && c != '-' && c != '.')
            .unwrap_or(rest.len());
        // A trailing dot terminates the statement, not the label
        let mut label = &rest[..end];
        let mut consumed = end;
        while label.ends_with('.') {
            label = &label[..label.len() - 1];
            consumed -= 1;
        }
        if label.is_empty() {
            return Err(SyntaxError::InvalidBlankNode {
                label: String::new(),
                position,
            });
        }
        let label = label.to_string();
        self.advance_bytes(consumed);
        Ok(Token::BlankNodeLabel(label))
    }

    fn read_number(&mut self, position: TextPosition) -> std::result::Result<Token, SyntaxError> {
        let start = self.pos;
        if matches!(self.peek_char(), Some('+') | Some('-')) {
            self.bump();
        }
        while matches!(self.peek_char(), Some(c) if c.is_ascii_digit()) {
            self.bump();
        }
        let mut decimal = false;
        if self.peek_char() == Some('.')
            && self.rest()[1..].starts_with(|c: char| c.is_ascii_digit())
        {
            decimal = true;
            self.bump();
            while matches!(self.peek_char(), Some(c) if c.is_ascii_digit()) {
                self.bump();
            }
        }
        let mut double = false;
        if matches!(self.peek_char(), Some('e') | Some('E')) {
            double = true;
            self.bump();
            if matches!(self.peek_char(), Some('+') | Some('-')) {
                self.bump();
            }
            let mut exponent_digits = 0;
            while matches!(self.peek_char(), Some(c) if c.is_ascii_digit()) {
                self.bump();
                exponent_digits += 1;
            }
            if exponent_digits == 0 {
                return Err(SyntaxError::msg("missing exponent digits", position));
            }
        }

        let lexical = &self.input[start..self.pos];
        if lexical.is_empty() || lexical == "+" || lexical == "-" {
            return Err(SyntaxError::msg("malformed number", position));
        }
        Ok(if double {
            Token::DoubleLiteral(lexical.to_string())
        } else if decimal {
            Token::DecimalLiteral(lexical.to_string())
        } else {
            Token::IntegerLiteral(lexical.to_string())
        })
    }

    fn read_word(&mut self, position: TextPosition) -> std::result::Result<Token, SyntaxError> {
        let rest = self.rest();
        let end = rest
            .find(|c: char| {
                !c.is_alphanumeric() && c != '_' && c != '-' && c != '.' && c != ':'
            })
            .unwrap_or(rest.len());
        let mut word = &rest[..end];
        let mut consumed = end;
        // Trailing dots terminate the statement, not the name
        while word.ends_with('.') {
            word = &word[..word.len() - 1];
            consumed -= 1;
        }
        if word.is_empty() {
            return Err(SyntaxError::UnexpectedCharacter {
                character: rest.chars().next().unwrap_or(' '),
                position,
            });
        }

        let token = if let Some(colon) = word.find(':') {
            Token::PrefixedName {
                prefix: word[..colon].to_string(),
                local: word[colon + 1..].to_string(),
            }
        } else {
            match word {
                "a" => Token::A,
                "true" => Token::BooleanLiteral(true),
                "false" => Token::BooleanLiteral(false),
                w if w.eq_ignore_ascii_case("prefix") => Token::PrefixKeyword { sparql_style: true },
                w if w.eq_ignore_ascii_case("base") => Token::BaseKeyword { sparql_style: true },
                other => {
                    return Err(SyntaxError::msg(
                        format!("unexpected token '{other}'"),
                        position,
                    ))
                }
            }
        };
        self.advance_bytes(consumed);
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_triple() {
        let input = r#"
            @prefix ex: <http://example.org/> .
            ex:subject ex:predicate "object" .
        "#;
        let graph = TurtleParser::new().parse_str(input).unwrap();
        assert_eq!(graph.triple_count(), 1);
        let triple = graph.triples().next().unwrap();
        assert_eq!(
            triple.subject().as_named_node().unwrap().as_str(),
            "http://example.org/subject"
        );
        assert_eq!(graph.prefixes().unwrap().get("ex"), Some("http://example.org/"));
    }

    #[test]
    fn test_parse_a_keyword() {
        let input = r#"
            @prefix ex: <http://example.org/> .
            ex:thing a ex:Class .
        "#;
        let graph = TurtleParser::new().parse_str(input).unwrap();
        let triple = graph.triples().next().unwrap();
        assert_eq!(triple.predicate().as_str(), vocab::rdf::TYPE.as_str());
    }

    #[test]
    fn test_parse_semicolons_and_commas() {
        let input = r#"
            @prefix ex: <http://example.org/> .
            ex:s ex:p1 "a", "b" ;
                 ex:p2 "c" ;
                 .
        "#;
        let graph = TurtleParser::new().parse_str(input).unwrap();
        assert_eq!(graph.triple_count(), 3);
    }

    #[test]
    fn test_parse_base_and_relative_iris() {
        let input = r#"
            @base <http://example.org/dir/> .
            <thing> <other> <../up> .
        "#;
        let graph = TurtleParser::new().parse_str(input).unwrap();
        let triple = graph.triples().next().unwrap();
        assert_eq!(
            triple.subject().as_named_node().unwrap().as_str(),
            "http://example.org/dir/thing"
        );
        assert_eq!(
            triple.object().as_named_node().unwrap().as_str(),
            "http://example.org/up"
        );
        assert_eq!(graph.base_iri().unwrap().as_str(), "http://example.org/dir/");
    }

    #[test]
    fn test_relative_iri_without_base_fails() {
        let result = TurtleParser::new().parse_str("<s> <p> <o> .");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_sparql_style_directives() {
        let input = r#"
            PREFIX ex: <http://example.org/>
            BASE <http://example.org/>
            ex:s ex:p <o> .
        "#;
        let graph = TurtleParser::new().parse_str(input).unwrap();
        assert_eq!(graph.triple_count(), 1);
    }

    #[test]
    fn test_undefined_prefix_is_error_with_position() {
        let error = TurtleParser::new()
            .parse_str("unknown:s unknown:p unknown:o .")
            .unwrap_err();
        let crate::RdfError::Format(syntax) = error else {
            panic!("expected format error");
        };
        assert!(matches!(syntax, SyntaxError::UndefinedPrefix { .. }));
    }

    #[test]
    fn test_parse_anonymous_property_list() {
        let input = r#"
            @prefix ex: <http://example.org/> .
            ex:s ex:p [ ex:q "nested" ; ex:r "more" ] .
        "#;
        let graph = TurtleParser::new().parse_str(input).unwrap();
        assert_eq!(graph.triple_count(), 3);
    }

    #[test]
    fn test_parse_property_list_as_subject() {
        let input = r#"
            @prefix ex: <http://example.org/> .
            [ ex:p "x" ] ex:q "y" .
        "#;
        let graph = TurtleParser::new().parse_str(input).unwrap();
        assert_eq!(graph.triple_count(), 2);
    }

    #[test]
    fn test_parse_collection() {
        let input = r#"
            @prefix ex: <http://example.org/> .
            ex:s ex:p ( "a" "b" ) .
        "#;
        let graph = TurtleParser::new().parse_str(input).unwrap();
        // One statement plus two first/rest pairs
        assert_eq!(graph.triple_count(), 5);
        let firsts: Vec<Triple> = graph
            .triples()
            .filter(|t| t.predicate().as_str() == vocab::rdf::FIRST.as_str())
            .collect();
        assert_eq!(firsts.len(), 2);
    }

    #[test]
    fn test_parse_empty_collection_is_nil() {
        let input = r#"
            @prefix ex: <http://example.org/> .
            ex:s ex:p () .
        "#;
        let graph = TurtleParser::new().parse_str(input).unwrap();
        let triple = graph.triples().next().unwrap();
        assert_eq!(
            triple.object().as_named_node().unwrap().as_str(),
            vocab::rdf::NIL.as_str()
        );
    }

    #[test]
    fn test_parse_numeric_and_boolean_sugar() {
        let input = r#"
            @prefix ex: <http://example.org/> .
            ex:s ex:int 42 ;
                 ex:neg -7 ;
                 ex:dec 3.14 ;
                 ex:dbl 1.0E0 ;
                 ex:flag true .
        "#;
        let graph = TurtleParser::new().parse_str(input).unwrap();
        assert_eq!(graph.triple_count(), 5);

        let datatype_of = |p: &str| -> String {
            graph
                .triples()
                .find(|t| t.predicate().as_str() == format!("http://example.org/{p}"))
                .map(|t| t.object().as_literal().unwrap().datatype().as_str().to_string())
                .unwrap()
        };
        assert_eq!(datatype_of("int"), vocab::xsd::INTEGER.as_str());
        assert_eq!(datatype_of("neg"), vocab::xsd::INTEGER.as_str());
        assert_eq!(datatype_of("dec"), vocab::xsd::DECIMAL.as_str());
        assert_eq!(datatype_of("dbl"), vocab::xsd::DOUBLE.as_str());
        assert_eq!(datatype_of("flag"), vocab::xsd::BOOLEAN.as_str());
    }

    #[test]
    fn test_parse_long_string() {
        let input = "@prefix ex: <http://example.org/> .\nex:s ex:p \"\"\"line one\nline \"two\"\"\"\" .";
        let graph = TurtleParser::new().parse_str(input).unwrap();
        let triple = graph.triples().next().unwrap();
        assert_eq!(
            triple.object().as_literal().unwrap().value(),
            "line one\nline \"two\""
        );
    }

    #[test]
    fn test_parse_language_tagged() {
        let input = r#"
            @prefix ex: <http://example.org/> .
            ex:s ex:p "Hallo"@de .
        "#;
        let graph = TurtleParser::new().parse_str(input).unwrap();
        let triple = graph.triples().next().unwrap();
        assert_eq!(triple.object().as_literal().unwrap().language(), Some("de"));
    }

    #[test]
    fn test_parse_datatyped_with_prefixed_name() {
        let input = r#"
            @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
            <http://ex/s> <http://ex/p> "42"^^xsd:integer .
        "#;
        let graph = TurtleParser::new().parse_str(input).unwrap();
        let triple = graph.triples().next().unwrap();
        assert_eq!(
            triple.object().as_literal().unwrap().datatype().as_str(),
            vocab::xsd::INTEGER.as_str()
        );
    }

    #[test]
    fn test_lenient_recovers_after_error() {
        let input = r#"
            @prefix ex: <http://example.org/> .
            ex:s ex:p missing:prefix .
            ex:s ex:q "ok" .
        "#;
        let graph = TurtleParser::new().lenient().parse_str(input).unwrap();
        assert_eq!(graph.triple_count(), 1);
    }

    #[test]
    fn test_blank_node_label_subject() {
        let input = r#"
            @prefix ex: <http://example.org/> .
            _:b1 ex:p "v" .
            _:b1 ex:q "w" .
        "#;
        let graph = TurtleParser::new().parse_str(input).unwrap();
        assert_eq!(graph.triple_count(), 2);
        assert_eq!(graph.subject_count(), 1);
    }

    #[test]
    fn test_comments_are_skipped() {
        let input = "# top comment\n<http://ex/s> <http://ex/p> \"x\" . # trailing\n";
        let graph = TurtleParser::new().parse_str(input).unwrap();
        assert_eq!(graph.triple_count(), 1);
    }

    #[test]
    fn test_configured_prefix_and_base() {
        let graph = TurtleParser::new()
            .with_prefix("ex", "http://example.org/")
            .with_base_iri("http://example.org/")
            .parse_str("ex:s ex:p <o> .")
            .unwrap();
        let triple = graph.triples().next().unwrap();
        assert_eq!(
            triple.object().as_named_node().unwrap().as_str(),
            "http://example.org/o"
        );
    }
}
