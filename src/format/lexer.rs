//! Term scanner shared by the N-Triples and N-Quads readers
//!
//! Both formats carry the same term grammar; N-Quads adds an optional
//! fourth term. The scanner works on one statement line at a time and
//! reports positions relative to the whole document.

use memchr::memchr;

use crate::format::error::{SyntaxError, TextPosition};
use crate::model::{BlankNode, GraphName, Literal, NamedNode, Term};

pub(crate) struct TermScanner<'a> {
    line: &'a str,
    line_number: usize,
    pos: usize, // byte offset within the line
}

impl<'a> TermScanner<'a> {
    pub fn new(line: &'a str, line_number: usize) -> Self {
        TermScanner {
            line,
            line_number,
            pos: 0,
        }
    }

    pub fn position(&self) -> TextPosition {
        TextPosition::new(self.line_number, self.pos + 1, self.pos)
    }

    fn rest(&self) -> &'a str {
        &self.line[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    pub fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ') | Some('\t')) {
            self.pos += 1;
        }
    }

    /// True once only whitespace or a comment remains
    pub fn at_end(&mut self) -> bool {
        self.skip_whitespace();
        matches!(self.peek(), None | Some('#'))
    }

    /// True if the next non-whitespace character starts a resource term
    pub fn peeks_term_start(&mut self) -> bool {
        self.skip_whitespace();
        matches!(self.peek(), Some('<') | Some('_'))
    }

    /// Consumes the statement terminator
    pub fn expect_dot(&mut self) -> Result<(), SyntaxError> {
        self.skip_whitespace();
        match self.peek() {
            Some('.') => {
                self.pos += 1;
                Ok(())
            }
            Some(ch) => Err(SyntaxError::UnexpectedCharacter {
                character: ch,
                position: self.position(),
            }),
            None => Err(SyntaxError::UnexpectedEof {
                position: self.position(),
            }),
        }
    }

    /// Scans one term: an IRI, a blank node label, or a literal
    pub fn scan_term(&mut self) -> Result<Term, SyntaxError> {
        self.skip_whitespace();
        match self.peek() {
            Some('<') => Ok(Term::NamedNode(self.scan_iri()?)),
            Some('_') => Ok(Term::BlankNode(self.scan_blank_node()?)),
            Some('"') => Ok(Term::Literal(self.scan_literal()?)),
            Some(ch) => Err(SyntaxError::UnexpectedCharacter {
                character: ch,
                position: self.position(),
            }),
            None => Err(SyntaxError::UnexpectedEof {
                position: self.position(),
            }),
        }
    }

    /// Scans the optional graph term of an N-Quads statement
    pub fn scan_graph_name(&mut self) -> Result<GraphName, SyntaxError> {
        self.skip_whitespace();
        match self.peek() {
            Some('<') => Ok(GraphName::NamedNode(self.scan_iri()?)),
            Some('_') => Ok(GraphName::BlankNode(self.scan_blank_node()?)),
            Some(ch) => Err(SyntaxError::UnexpectedCharacter {
                character: ch,
                position: self.position(),
            }),
            None => Err(SyntaxError::UnexpectedEof {
                position: self.position(),
            }),
        }
    }

    fn scan_iri(&mut self) -> Result<NamedNode, SyntaxError> {
        let start = self.position();
        debug_assert_eq!(self.peek(), Some('<'));
        self.pos += 1;
        let rest = self.rest();
        let end = memchr(b'>', rest.as_bytes()).ok_or(SyntaxError::UnexpectedEof {
            position: self.position(),
        })?;
        let raw = &rest[..end];
        self.pos += end + 1;
        let iri = if raw.contains('\\') {
            unescape_numeric(raw, start)?
        } else {
            raw.to_string()
        };
        NamedNode::new(&iri).map_err(|_| SyntaxError::InvalidIri {
            iri,
            position: start,
        })
    }

    fn scan_blank_node(&mut self) -> Result<BlankNode, SyntaxError> {
        let start = self.position();
        if !self.rest().starts_with("_:") {
            return Err(SyntaxError::UnexpectedCharacter {
                character: '_',
                position: start,
            });
        }
        self.pos += 2;
        let rest = self.rest();
        let end = rest
            .find(|c: char| !c.is_ascii_alphanumeric() && c != '_' && c != '-' && c != '.')
            .unwrap_or(rest.len());
        // A trailing dot terminates the statement, not the label
        let mut label = &rest[..end];
        let mut consumed = end;
        while label.ends_with('.') {
            label = &label[..label.len() - 1];
            consumed -= 1;
        }
        self.pos += consumed;
        BlankNode::new(label).map_err(|_| SyntaxError::InvalidBlankNode {
            label: label.to_string(),
            position: start,
        })
    }

    fn scan_literal(&mut self) -> Result<Literal, SyntaxError> {
        let start = self.position();
        debug_assert_eq!(self.peek(), Some('"'));
        self.pos += 1;

        let mut value = String::new();
        loop {
            match self.bump() {
                Some('"') => break,
                Some('\\') => {
                    let unescaped = self.scan_escape()?;
                    value.push(unescaped);
                }
                Some(ch) => value.push(ch),
                None => {
                    return Err(SyntaxError::UnexpectedEof {
                        position: self.position(),
                    })
                }
            }
        }

        match self.peek() {
            Some('@') => {
                self.pos += 1;
                let rest = self.rest();
                let end = rest
                    .find(|c: char| !c.is_ascii_alphanumeric() && c != '-')
                    .unwrap_or(rest.len());
                let tag = &rest[..end];
                self.pos += end;
                Literal::new_language_tagged_literal(value, tag).map_err(|_| {
                    SyntaxError::InvalidLanguageTag {
                        tag: tag.to_string(),
                        position: start,
                    }
                })
            }
            Some('^') => {
                if !self.rest().starts_with("^^") {
                    return Err(SyntaxError::UnexpectedCharacter {
                        character: '^',
                        position: self.position(),
                    });
                }
                self.pos += 2;
                self.skip_whitespace();
                if self.peek() != Some('<') {
                    return Err(SyntaxError::msg(
                        "expected datatype IRI after '^^'",
                        self.position(),
                    ));
                }
                let datatype = self.scan_iri()?;
                Ok(Literal::new_typed_literal(value, datatype))
            }
            _ => Ok(Literal::new_simple_literal(value)),
        }
    }

    fn scan_escape(&mut self) -> Result<char, SyntaxError> {
        let position = self.position();
        match self.bump() {
            Some('t') => Ok('\t'),
            Some('b') => Ok('\u{0008}'),
            Some('n') => Ok('\n'),
            Some('r') => Ok('\r'),
            Some('f') => Ok('\u{000C}'),
            Some('"') => Ok('"'),
            Some('\'') => Ok('\''),
            Some('\\') => Ok('\\'),
            Some('u') => self.scan_unicode_escape(4, position),
            Some('U') => self.scan_unicode_escape(8, position),
            Some(other) => Err(SyntaxError::InvalidEscape {
                sequence: other.to_string(),
                position,
            }),
            None => Err(SyntaxError::UnexpectedEof { position }),
        }
    }

    fn scan_unicode_escape(
        &mut self,
        digits: usize,
        position: TextPosition,
    ) -> Result<char, SyntaxError> {
        let rest = self.rest();
        let Some(hex) = rest.get(..digits) else {
            return Err(SyntaxError::UnexpectedEof {
                position: self.position(),
            });
        };
        let code = u32::from_str_radix(hex, 16).map_err(|_| SyntaxError::InvalidEscape {
            sequence: format!("u{hex}"),
            position,
        })?;
        self.pos += digits;
        char::from_u32(code).ok_or(SyntaxError::InvalidEscape {
            sequence: format!("u{hex}"),
            position,
        })
    }
}

/// Resolves `\uXXXX` and `\UXXXXXXXX` escapes inside an IRI reference
fn unescape_numeric(raw: &str, position: TextPosition) -> Result<String, SyntaxError> {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        let kind = chars.next().ok_or(SyntaxError::UnexpectedEof { position })?;
        let digits = match kind {
            'u' => 4,
            'U' => 8,
            other => {
                return Err(SyntaxError::InvalidEscape {
                    sequence: other.to_string(),
                    position,
                })
            }
        };
        let hex: String = chars.by_ref().take(digits).collect();
        if hex.len() < digits {
            return Err(SyntaxError::UnexpectedEof { position });
        }
        let code = u32::from_str_radix(&hex, 16).map_err(|_| SyntaxError::InvalidEscape {
            sequence: format!("{kind}{hex}"),
            position,
        })?;
        result.push(char::from_u32(code).ok_or(SyntaxError::InvalidEscape {
            sequence: format!("{kind}{hex}"),
            position,
        })?);
    }
    Ok(result)
}
