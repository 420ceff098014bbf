//! RDF literal terms

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::NamedNode;
use crate::vocab;
use crate::xsd::{self, XsdValue};
use crate::RdfError;

lazy_static! {
    /// Regex for the well-formedness of BCP-47 language tags
    static ref LANGUAGE_TAG_REGEX: Regex =
        Regex::new(r"^[a-zA-Z]{1,8}(-[a-zA-Z0-9]{1,8})*$").expect("Language tag regex compilation failed");
}

/// An RDF literal: a lexical form with either a language tag or a datatype
///
/// A plain literal carries the implicit datatype `xsd:string`; a
/// language-tagged literal carries `rdf:langString`. Language tags are
/// lowercased on construction so that term equality matches the RDF 1.1
/// comparison rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    value: String,
    language: Option<String>,
    datatype: Option<NamedNode>,
}

impl Literal {
    /// Creates a plain literal with the implicit datatype `xsd:string`
    pub fn new_simple_literal(value: impl Into<String>) -> Self {
        Literal {
            value: value.into(),
            language: None,
            datatype: None,
        }
    }

    /// Creates a language-tagged literal
    ///
    /// # Errors
    /// Returns an error if the tag is not a well-formed BCP-47 tag.
    pub fn new_language_tagged_literal(
        value: impl Into<String>,
        language: impl Into<String>,
    ) -> Result<Self, RdfError> {
        let language = language.into();
        if !LANGUAGE_TAG_REGEX.is_match(&language) {
            return Err(RdfError::InvalidLiteral {
                value: value.into(),
                reason: format!("malformed language tag '{language}'"),
            });
        }
        Ok(Literal {
            value: value.into(),
            language: Some(language.to_lowercase()),
            datatype: None,
        })
    }

    /// Creates a datatyped literal
    ///
    /// An explicit `xsd:string` datatype is normalized away so that plain
    /// and explicitly-typed string literals compare equal.
    pub fn new_typed_literal(value: impl Into<String>, datatype: NamedNode) -> Self {
        let datatype = if datatype == *vocab::xsd::STRING {
            None
        } else {
            Some(datatype)
        };
        Literal {
            value: value.into(),
            language: None,
            datatype,
        }
    }

    /// Creates a datatyped literal, validating the lexical form against
    /// the registered datatype
    ///
    /// # Errors
    /// Returns [`RdfError::InvalidLiteral`] when the datatype is registered
    /// and rejects the lexical form. Unregistered datatypes are accepted
    /// as opaque.
    pub fn new_checked(value: impl Into<String>, datatype: NamedNode) -> Result<Self, RdfError> {
        let value = value.into();
        if let Some(dt) = xsd::registry().get(datatype.as_str()) {
            if !dt.is_valid(&value) {
                return Err(RdfError::InvalidLiteral {
                    value,
                    reason: format!("not a valid {}", dt.name()),
                });
            }
        }
        Ok(Self::new_typed_literal(value, datatype))
    }

    /// Returns the lexical form
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the language tag, if any (lowercased)
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Returns the datatype IRI
    ///
    /// Plain literals report `xsd:string`, language-tagged literals report
    /// `rdf:langString`.
    pub fn datatype(&self) -> &NamedNode {
        if self.language.is_some() {
            &vocab::rdf::LANG_STRING
        } else {
            match &self.datatype {
                Some(dt) => dt,
                None => &vocab::xsd::STRING,
            }
        }
    }

    /// Returns true if this is a plain `xsd:string` literal
    pub fn is_plain(&self) -> bool {
        self.language.is_none() && self.datatype.is_none()
    }

    /// Returns true if this literal carries a language tag
    pub fn is_language_tagged(&self) -> bool {
        self.language.is_some()
    }

    /// Returns true if the lexical form is valid for the datatype
    ///
    /// Literals with unregistered datatypes are considered valid.
    pub fn is_valid(&self) -> bool {
        match xsd::registry().get(self.datatype().as_str()) {
            Some(dt) => dt.is_valid(&self.value),
            None => true,
        }
    }

    /// Projects the literal into the value space of its datatype
    ///
    /// Returns `None` for unregistered datatypes or invalid lexical forms.
    pub fn to_value(&self) -> Option<XsdValue> {
        if self.language.is_some() {
            return Some(XsdValue::String(self.value.clone()));
        }
        xsd::registry()
            .get(self.datatype().as_str())
            .and_then(|dt| dt.parse(&self.value))
    }

    /// Returns the canonical lexical form per the datatype, if available
    pub fn canonical_lexical(&self) -> Option<String> {
        xsd::registry()
            .get(self.datatype().as_str())
            .and_then(|dt| dt.canonical_lexical(&self.value))
    }

    /// Rewrites the literal through its native value
    ///
    /// Returns `None` when the registry cannot project the literal.
    /// Language-tagged literals keep their tag.
    pub fn map_value<F>(&self, f: F) -> Option<Literal>
    where
        F: FnOnce(XsdValue) -> XsdValue,
    {
        let mapped = f(self.to_value()?);
        if let Some(language) = &self.language {
            return Literal::new_language_tagged_literal(mapped.to_string(), language).ok();
        }
        Some(Literal::new_typed_literal(
            mapped.to_string(),
            self.datatype().clone(),
        ))
    }

    /// Value-space equality
    ///
    /// Two literals are value-equal when the datatype registry projects
    /// both to the same value; literals outside the registry fall back to
    /// term equality.
    pub fn value_eq(&self, other: &Literal) -> bool {
        if self.language.is_some() || other.language.is_some() {
            return self == other;
        }
        match (self.to_value(), other.to_value()) {
            (Some(a), Some(b)) => a.equal_value(&b),
            _ => self == other,
        }
    }
}

fn escape_literal_value(input: &str, out: &mut fmt::Formatter<'_>) -> fmt::Result {
    for ch in input.chars() {
        match ch {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            '\u{0008}' => out.write_str("\\b")?,
            '\u{000C}' => out.write_str("\\f")?,
            c => fmt::Write::write_char(out, c)?,
        }
    }
    Ok(())
}

impl fmt::Display for Literal {
    /// Writes the N-Triples form of the literal
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        escape_literal_value(&self.value, f)?;
        f.write_str("\"")?;
        if let Some(lang) = &self.language {
            write!(f, "@{lang}")
        } else if let Some(dt) = &self.datatype {
            write!(f, "^^{dt}")
        } else {
            Ok(())
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::new_simple_literal(value)
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::new_simple_literal(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::new_typed_literal(value.to_string(), vocab::xsd::BOOLEAN.clone())
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::new_typed_literal(value.to_string(), vocab::xsd::INTEGER.clone())
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::from(i64::from(value))
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::new_typed_literal(
            xsd::canonical_double(value),
            vocab::xsd::DOUBLE.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_literal() {
        let lit = Literal::new_simple_literal("hello");
        assert_eq!(lit.value(), "hello");
        assert!(lit.is_plain());
        assert_eq!(lit.datatype().as_str(), vocab::xsd::STRING.as_str());
        assert_eq!(format!("{lit}"), "\"hello\"");
    }

    #[test]
    fn test_typed_string_normalizes() {
        let explicit = Literal::new_typed_literal("x", vocab::xsd::STRING.clone());
        assert_eq!(explicit, Literal::new_simple_literal("x"));
    }

    #[test]
    fn test_language_tag_lowercased() {
        let a = Literal::new_language_tagged_literal("Hallo", "DE").unwrap();
        let b = Literal::new_language_tagged_literal("Hallo", "de").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.language(), Some("de"));
        assert_eq!(a.datatype().as_str(), vocab::rdf::LANG_STRING.as_str());
    }

    #[test]
    fn test_language_tag_validation() {
        assert!(Literal::new_language_tagged_literal("x", "en-US").is_ok());
        assert!(Literal::new_language_tagged_literal("x", "").is_err());
        assert!(Literal::new_language_tagged_literal("x", "no spaces").is_err());
        assert!(Literal::new_language_tagged_literal("x", "-en").is_err());
    }

    #[test]
    fn test_value_equality() {
        let a = Literal::new_typed_literal("042", vocab::xsd::INTEGER.clone());
        let b = Literal::new_typed_literal("42", vocab::xsd::INTEGER.clone());
        assert_ne!(a, b);
        assert!(a.value_eq(&b));
    }

    #[test]
    fn test_checked_literal() {
        assert!(Literal::new_checked("42", vocab::xsd::INTEGER.clone()).is_ok());
        assert!(Literal::new_checked("four", vocab::xsd::INTEGER.clone()).is_err());
        // Unregistered datatypes pass through as opaque
        let custom = NamedNode::new("http://example.org/dt").unwrap();
        assert!(Literal::new_checked("anything", custom).is_ok());
    }

    #[test]
    fn test_display_escapes() {
        let lit = Literal::new_simple_literal("a\"b\\c\nd");
        assert_eq!(format!("{lit}"), "\"a\\\"b\\\\c\\nd\"");
    }

    #[test]
    fn test_map_value() {
        let count = Literal::from(41i64);
        let incremented = count
            .map_value(|v| match v {
                XsdValue::Integer(i) => XsdValue::Integer(i + 1),
                other => other,
            })
            .unwrap();
        assert_eq!(incremented, Literal::from(42i64));

        let greeting = Literal::new_language_tagged_literal("hallo", "de").unwrap();
        let shouted = greeting
            .map_value(|v| match v {
                XsdValue::String(s) => XsdValue::String(s.to_uppercase()),
                other => other,
            })
            .unwrap();
        assert_eq!(shouted.value(), "HALLO");
        assert_eq!(shouted.language(), Some("de"));
    }

    #[test]
    fn test_native_conversions() {
        assert_eq!(Literal::from(true).value(), "true");
        assert_eq!(
            Literal::from(42i64).datatype().as_str(),
            vocab::xsd::INTEGER.as_str()
        );
        assert_eq!(Literal::from(1.0f64).value(), "1.0E0");
    }
}
