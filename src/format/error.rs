//! Parser error types with position tracking

use std::fmt;

use thiserror::Error;

/// Position in a text document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextPosition {
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
    /// Byte offset from start of document
    pub offset: usize,
}

impl Default for TextPosition {
    fn default() -> Self {
        Self::start()
    }
}

impl TextPosition {
    /// Create a new text position
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Initial position at start of document
    pub fn start() -> Self {
        Self::new(1, 1, 0)
    }

    /// Advance position by one character
    pub fn advance_char(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.offset += ch.len_utf8();
    }
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Syntax error in a serialization format
#[derive(Debug, Clone, Error)]
pub enum SyntaxError {
    /// Unexpected character
    #[error("Unexpected character '{character}' at {position}")]
    UnexpectedCharacter {
        character: char,
        position: TextPosition,
    },

    /// Unexpected end of input
    #[error("Unexpected end of input at {position}")]
    UnexpectedEof { position: TextPosition },

    /// Invalid IRI
    #[error("Invalid IRI <{iri}> at {position}")]
    InvalidIri { iri: String, position: TextPosition },

    /// Invalid escape sequence
    #[error("Invalid escape sequence '\\{sequence}' at {position}")]
    InvalidEscape {
        sequence: String,
        position: TextPosition,
    },

    /// Invalid language tag
    #[error("Invalid language tag '{tag}' at {position}")]
    InvalidLanguageTag { tag: String, position: TextPosition },

    /// Invalid blank node label
    #[error("Invalid blank node label '{label}' at {position}")]
    InvalidBlankNode {
        label: String,
        position: TextPosition,
    },

    /// Undefined prefix
    #[error("Undefined prefix '{prefix}' at {position}")]
    UndefinedPrefix {
        prefix: String,
        position: TextPosition,
    },

    /// Relative IRI without a base to resolve against
    #[error("Relative IRI <{iri}> without a base at {position}")]
    NoBase { iri: String, position: TextPosition },

    /// Generic syntax error
    #[error("{message} at {position}")]
    Generic {
        message: String,
        position: TextPosition,
    },
}

impl SyntaxError {
    /// Create a generic syntax error
    pub fn msg(message: impl Into<String>, position: TextPosition) -> Self {
        Self::Generic {
            message: message.into(),
            position,
        }
    }

    /// Get the position where this error occurred
    pub fn position(&self) -> TextPosition {
        match self {
            Self::UnexpectedCharacter { position, .. } => *position,
            Self::UnexpectedEof { position } => *position,
            Self::InvalidIri { position, .. } => *position,
            Self::InvalidEscape { position, .. } => *position,
            Self::InvalidLanguageTag { position, .. } => *position,
            Self::InvalidBlankNode { position, .. } => *position,
            Self::UndefinedPrefix { position, .. } => *position,
            Self::NoBase { position, .. } => *position,
            Self::Generic { position, .. } => *position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_advance() {
        let mut position = TextPosition::start();
        position.advance_char('a');
        position.advance_char('\n');
        position.advance_char('b');
        assert_eq!(position.line, 2);
        assert_eq!(position.column, 2);
        assert_eq!(position.offset, 3);
    }

    #[test]
    fn test_error_carries_position() {
        let error = SyntaxError::msg("oops", TextPosition::new(3, 7, 42));
        assert_eq!(error.position().line, 3);
        assert_eq!(error.position().column, 7);
        assert!(error.to_string().contains("line 3, column 7"));
    }
}
