//! Fixed-point decimal arithmetic for `xsd:decimal`

use std::fmt;
use std::fmt::Write;
use std::str::FromStr;

const DECIMAL_PART_DIGITS: u32 = 18;
const DECIMAL_PART_POW: i128 = 1_000_000_000_000_000_000;

/// Error type for decimal parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDecimalError {
    kind: ParseDecimalErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParseDecimalErrorKind {
    InvalidFormat,
    Overflow,
}

impl ParseDecimalError {
    fn invalid() -> Self {
        ParseDecimalError {
            kind: ParseDecimalErrorKind::InvalidFormat,
        }
    }

    fn overflow() -> Self {
        ParseDecimalError {
            kind: ParseDecimalErrorKind::Overflow,
        }
    }
}

impl fmt::Display for ParseDecimalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseDecimalErrorKind::InvalidFormat => write!(f, "Invalid decimal format"),
            ParseDecimalErrorKind::Overflow => write!(f, "Decimal overflow"),
        }
    }
}

impl std::error::Error for ParseDecimalError {}

/// An `xsd:decimal` value
///
/// Stores the value in an [`i128`] after multiplying by 10¹⁸, allowing
/// nearly 18 digits on each side of the decimal point.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Copy, Hash, Default)]
pub struct Decimal {
    value: i128, // value * 10^18
}

impl Decimal {
    /// Constructs the decimal i / 10^n
    pub const fn new(i: i128, n: u32) -> Option<Self> {
        let Some(shift) = DECIMAL_PART_DIGITS.checked_sub(n) else {
            return None;
        };
        let Some(value) = i.checked_mul(10_i128.pow(shift)) else {
            return None;
        };
        Some(Self { value })
    }

    /// Checked addition, `None` on overflow
    pub fn checked_add(self, rhs: impl Into<Self>) -> Option<Self> {
        Some(Self {
            value: self.value.checked_add(rhs.into().value)?,
        })
    }

    /// Checked subtraction, `None` on overflow
    pub fn checked_sub(self, rhs: impl Into<Self>) -> Option<Self> {
        Some(Self {
            value: self.value.checked_sub(rhs.into().value)?,
        })
    }

    /// Checked negation, `None` on overflow
    pub fn checked_neg(self) -> Option<Self> {
        Some(Self {
            value: self.value.checked_neg()?,
        })
    }

    /// Approximates the decimal as a binary double
    pub fn to_f64(self) -> f64 {
        (self.value as f64) / (DECIMAL_PART_POW as f64)
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self {
            value: i128::from(value) * DECIMAL_PART_POW,
        }
    }
}

impl From<i32> for Decimal {
    fn from(value: i32) -> Self {
        Self::from(i64::from(value))
    }
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    /// Parses the XSD decimal lexical form: an optional sign, a digit run,
    /// and an optional fractional digit run after the point
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (negative, unsigned) = match input.bytes().next() {
            Some(b'-') => (true, &input[1..]),
            Some(b'+') => (false, &input[1..]),
            _ => (false, input),
        };

        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(ParseDecimalError::invalid());
        }
        if !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(ParseDecimalError::invalid());
        }

        // Both runs are now known to be plain digit strings, so std's
        // integer parser can only fail on overflow
        let whole_units: i128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| ParseDecimalError::overflow())?
        };

        // Fractional digits beyond the representable eighteen are dropped
        let kept = &fraction[..fraction.len().min(DECIMAL_PART_DIGITS as usize)];
        let fraction_units: i128 = if kept.is_empty() {
            0
        } else {
            let rescale = 10_i128.pow(DECIMAL_PART_DIGITS - kept.len() as u32);
            kept.parse::<i128>()
                .map_err(|_| ParseDecimalError::invalid())?
                * rescale
        };

        let magnitude = whole_units
            .checked_mul(DECIMAL_PART_POW)
            .and_then(|scaled| scaled.checked_add(fraction_units))
            .ok_or_else(ParseDecimalError::overflow)?;

        let value = if negative {
            magnitude
                .checked_neg()
                .ok_or_else(ParseDecimalError::overflow)?
        } else {
            magnitude
        };
        Ok(Self { value })
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value == 0 {
            return f.write_char('0');
        }

        let mut value = self.value;
        if value < 0 {
            f.write_char('-')?;
            value = -value;
        }

        let integer_part = value / DECIMAL_PART_POW;
        let fractional_part = value % DECIMAL_PART_POW;

        write!(f, "{integer_part}")?;

        if fractional_part != 0 {
            let mut fractional_str = format!("{fractional_part:018}");
            while fractional_str.ends_with('0') && fractional_str.len() > 1 {
                fractional_str.pop();
            }
            write!(f, ".{fractional_str}")?;
        }

        Ok(())
    }
}
