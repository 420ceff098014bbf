//! XSD datatype registry
//!
//! Maps datatype IRIs to validation, canonicalization, and value-space
//! projection functions behind a uniform interface. The registry is
//! process-wide: it is populated with the standard datatypes at first use
//! and may be extended at initialization time via [`register_datatype`];
//! afterwards reads are the only traffic.

mod decimal;

pub use decimal::{Decimal, ParseDecimalError};

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock, RwLock, RwLockReadGuard};

use lazy_static::lazy_static;
use regex::Regex;

use crate::model::NamedNode;
use crate::vocab;

lazy_static! {
    static ref INTEGER_REGEX: Regex =
        Regex::new(r"^[+-]?[0-9]+$").expect("Integer regex compilation failed");
    static ref DECIMAL_REGEX: Regex =
        Regex::new(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)$").expect("Decimal regex compilation failed");
    static ref DOUBLE_REGEX: Regex = Regex::new(
        r"^([+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?|[+-]?INF|NaN)$"
    )
    .expect("Double regex compilation failed");
}

/// A native projection of a literal's value space
#[derive(Debug, Clone, PartialEq)]
pub enum XsdValue {
    String(String),
    Boolean(bool),
    Integer(i64),
    Decimal(Decimal),
    Double(f64),
}

impl XsdValue {
    fn as_decimal(&self) -> Option<Decimal> {
        match self {
            XsdValue::Integer(i) => Some(Decimal::from(*i)),
            XsdValue::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            XsdValue::Integer(i) => Some(*i as f64),
            XsdValue::Decimal(d) => Some(d.to_f64()),
            XsdValue::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Value-space equality with numeric promotion across
    /// integer/decimal/double
    pub fn equal_value(&self, other: &XsdValue) -> bool {
        match (self, other) {
            (XsdValue::String(a), XsdValue::String(b)) => a == b,
            (XsdValue::Boolean(a), XsdValue::Boolean(b)) => a == b,
            (XsdValue::Double(_), _) | (_, XsdValue::Double(_)) => {
                match (self.as_f64(), other.as_f64()) {
                    (Some(a), Some(b)) => a == b,
                    _ => false,
                }
            }
            _ => match (self.as_decimal(), other.as_decimal()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }

    /// Value-space comparison, `None` when the values are incomparable
    pub fn compare(&self, other: &XsdValue) -> Option<Ordering> {
        match (self, other) {
            (XsdValue::String(a), XsdValue::String(b)) => Some(a.cmp(b)),
            (XsdValue::Boolean(a), XsdValue::Boolean(b)) => Some(a.cmp(b)),
            (XsdValue::Double(_), _) | (_, XsdValue::Double(_)) => {
                self.as_f64()?.partial_cmp(&other.as_f64()?)
            }
            _ => Some(self.as_decimal()?.cmp(&other.as_decimal()?)),
        }
    }
}

impl fmt::Display for XsdValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XsdValue::String(s) => write!(f, "{s}"),
            XsdValue::Boolean(b) => write!(f, "{b}"),
            XsdValue::Integer(i) => write!(f, "{i}"),
            XsdValue::Decimal(d) => write!(f, "{d}"),
            XsdValue::Double(d) => write!(f, "{}", canonical_double(*d)),
        }
    }
}

/// Uniform interface over a datatype module
///
/// Implementations are registered process-wide; the core never needs to
/// know a datatype beyond this interface, so new datatypes can be added
/// without core changes.
pub trait XsdDatatype: Send + Sync {
    /// The datatype IRI
    fn iri(&self) -> &NamedNode;

    /// Short human-readable name, e.g. `xsd:integer`
    fn name(&self) -> &str;

    /// Whether the lexical form is in the datatype's lexical space
    fn is_valid(&self, lexical: &str) -> bool;

    /// The canonical lexical form, `None` when the input is invalid
    fn canonical_lexical(&self, lexical: &str) -> Option<String>;

    /// Projects a lexical form into the value space
    fn parse(&self, lexical: &str) -> Option<XsdValue>;

    /// Value equality of two lexical forms
    fn equal_value(&self, a: &str, b: &str) -> bool {
        match (self.parse(a), self.parse(b)) {
            (Some(a), Some(b)) => a.equal_value(&b),
            _ => false,
        }
    }

    /// Value comparison of two lexical forms
    fn compare(&self, a: &str, b: &str) -> Option<Ordering> {
        self.parse(a)?.compare(&self.parse(b)?)
    }

    /// Casts a literal into this datatype, `None` when its lexical form
    /// is outside this datatype's lexical space
    fn cast(&self, literal: &crate::model::Literal) -> Option<crate::model::Literal> {
        let canonical = self.canonical_lexical(literal.value())?;
        Some(crate::model::Literal::new_typed_literal(
            canonical,
            self.iri().clone(),
        ))
    }
}

/// xsd:string
struct XsdString;

impl XsdDatatype for XsdString {
    fn iri(&self) -> &NamedNode {
        &vocab::xsd::STRING
    }

    fn name(&self) -> &str {
        "xsd:string"
    }

    fn is_valid(&self, _lexical: &str) -> bool {
        true
    }

    fn canonical_lexical(&self, lexical: &str) -> Option<String> {
        Some(lexical.to_string())
    }

    fn parse(&self, lexical: &str) -> Option<XsdValue> {
        Some(XsdValue::String(lexical.to_string()))
    }
}

/// rdf:langString — handled like a string; the tag lives on the literal
struct RdfLangString;

impl XsdDatatype for RdfLangString {
    fn iri(&self) -> &NamedNode {
        &vocab::rdf::LANG_STRING
    }

    fn name(&self) -> &str {
        "rdf:langString"
    }

    fn is_valid(&self, _lexical: &str) -> bool {
        true
    }

    fn canonical_lexical(&self, lexical: &str) -> Option<String> {
        Some(lexical.to_string())
    }

    fn parse(&self, lexical: &str) -> Option<XsdValue> {
        Some(XsdValue::String(lexical.to_string()))
    }
}

/// xsd:boolean
struct XsdBoolean;

impl XsdDatatype for XsdBoolean {
    fn iri(&self) -> &NamedNode {
        &vocab::xsd::BOOLEAN
    }

    fn name(&self) -> &str {
        "xsd:boolean"
    }

    fn is_valid(&self, lexical: &str) -> bool {
        matches!(lexical, "true" | "false" | "1" | "0")
    }

    fn canonical_lexical(&self, lexical: &str) -> Option<String> {
        match lexical {
            "true" | "1" => Some("true".to_string()),
            "false" | "0" => Some("false".to_string()),
            _ => None,
        }
    }

    fn parse(&self, lexical: &str) -> Option<XsdValue> {
        match lexical {
            "true" | "1" => Some(XsdValue::Boolean(true)),
            "false" | "0" => Some(XsdValue::Boolean(false)),
            _ => None,
        }
    }
}

/// xsd:integer
struct XsdInteger;

impl XsdDatatype for XsdInteger {
    fn iri(&self) -> &NamedNode {
        &vocab::xsd::INTEGER
    }

    fn name(&self) -> &str {
        "xsd:integer"
    }

    fn is_valid(&self, lexical: &str) -> bool {
        INTEGER_REGEX.is_match(lexical)
    }

    fn canonical_lexical(&self, lexical: &str) -> Option<String> {
        if !self.is_valid(lexical) {
            return None;
        }
        // Textual normalization works for magnitudes beyond i64
        let negative = lexical.starts_with('-');
        let digits = lexical
            .trim_start_matches(['+', '-'])
            .trim_start_matches('0');
        let digits = if digits.is_empty() { "0" } else { digits };
        if negative && digits != "0" {
            Some(format!("-{digits}"))
        } else {
            Some(digits.to_string())
        }
    }

    fn parse(&self, lexical: &str) -> Option<XsdValue> {
        if !self.is_valid(lexical) {
            return None;
        }
        self.canonical_lexical(lexical)?
            .parse::<i64>()
            .ok()
            .map(XsdValue::Integer)
    }
}

/// xsd:decimal
struct XsdDecimal;

impl XsdDatatype for XsdDecimal {
    fn iri(&self) -> &NamedNode {
        &vocab::xsd::DECIMAL
    }

    fn name(&self) -> &str {
        "xsd:decimal"
    }

    fn is_valid(&self, lexical: &str) -> bool {
        DECIMAL_REGEX.is_match(lexical)
    }

    fn canonical_lexical(&self, lexical: &str) -> Option<String> {
        if !self.is_valid(lexical) {
            return None;
        }
        let decimal: Decimal = lexical.parse().ok()?;
        // Canonical decimals always carry a fractional part
        let formatted = decimal.to_string();
        if formatted.contains('.') {
            Some(formatted)
        } else {
            Some(format!("{formatted}.0"))
        }
    }

    fn parse(&self, lexical: &str) -> Option<XsdValue> {
        if !self.is_valid(lexical) {
            return None;
        }
        lexical.parse().ok().map(XsdValue::Decimal)
    }
}

/// xsd:double
struct XsdDouble;

impl XsdDatatype for XsdDouble {
    fn iri(&self) -> &NamedNode {
        &vocab::xsd::DOUBLE
    }

    fn name(&self) -> &str {
        "xsd:double"
    }

    fn is_valid(&self, lexical: &str) -> bool {
        DOUBLE_REGEX.is_match(lexical)
    }

    fn canonical_lexical(&self, lexical: &str) -> Option<String> {
        self.parse(lexical).map(|v| match v {
            XsdValue::Double(d) => canonical_double(d),
            _ => unreachable!(),
        })
    }

    fn parse(&self, lexical: &str) -> Option<XsdValue> {
        if !self.is_valid(lexical) {
            return None;
        }
        let value = match lexical {
            "INF" | "+INF" => f64::INFINITY,
            "-INF" => f64::NEG_INFINITY,
            "NaN" => f64::NAN,
            other => other.parse().ok()?,
        };
        Some(XsdValue::Double(value))
    }
}

/// The canonical XSD lexical form of a double, e.g. `1.0E0`
pub fn canonical_double(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    let formatted = format!("{value:E}");
    // Rust's {:E} omits the fractional part for integral mantissas;
    // XSD's canonical form requires one
    match formatted.split_once('E') {
        Some((mantissa, exponent)) if !mantissa.contains('.') => {
            format!("{mantissa}.0E{exponent}")
        }
        _ => formatted,
    }
}

/// The process-wide datatype registry
pub struct DatatypeRegistry {
    by_iri: HashMap<String, Arc<dyn XsdDatatype>>,
}

impl DatatypeRegistry {
    fn with_defaults() -> Self {
        let mut registry = DatatypeRegistry {
            by_iri: HashMap::new(),
        };
        registry.insert(Arc::new(XsdString));
        registry.insert(Arc::new(RdfLangString));
        registry.insert(Arc::new(XsdBoolean));
        registry.insert(Arc::new(XsdInteger));
        registry.insert(Arc::new(XsdDecimal));
        registry.insert(Arc::new(XsdDouble));
        registry
    }

    fn insert(&mut self, datatype: Arc<dyn XsdDatatype>) {
        self.by_iri
            .insert(datatype.iri().as_str().to_string(), datatype);
    }

    /// Looks up a datatype by IRI
    pub fn get(&self, iri: &str) -> Option<Arc<dyn XsdDatatype>> {
        self.by_iri.get(iri).cloned()
    }

    /// Returns true if the IRI names a registered datatype
    pub fn contains(&self, iri: &str) -> bool {
        self.by_iri.contains_key(iri)
    }
}

static REGISTRY: LazyLock<RwLock<DatatypeRegistry>> =
    LazyLock::new(|| RwLock::new(DatatypeRegistry::with_defaults()));

/// Read access to the process-wide registry
pub fn registry() -> RwLockReadGuard<'static, DatatypeRegistry> {
    REGISTRY.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Registers an additional datatype
///
/// Intended for initialization time; later registrations are visible to
/// subsequent reads but do not retroactively affect stored literals.
pub fn register_datatype(datatype: Arc<dyn XsdDatatype>) {
    let mut registry = REGISTRY
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    registry.insert(datatype);
}
