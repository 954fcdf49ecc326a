//! Splitting a literal into its number and unit suffix
//!
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{family::Units, table};

/// How to bring a value into its family's canonical unit
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Conversion {
    /// Multiply by a constant factor
    Scale(f64),
    /// Convert °F to °C, `(v - 32) * 100 / 180`
    FahrenheitToCelsius,
}

impl Conversion {
    /// The identity conversion
    pub const IDENTITY: Self = Conversion::Scale(1.0);

    /// Apply this conversion to a parsed value
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Conversion::Scale(scale) => value * scale,
            Conversion::FahrenheitToCelsius => (value - 32.0) * (100.0 / 180.0),
        }
    }
}

/// A problem found while splitting off a unit suffix
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnitIssue {
    /// The family is compulsory but the literal had no suffix
    MissingSuffix,
    /// The suffix is not known to any of the requested families
    UnknownSuffix(String),
}

impl UnitIssue {
    /// Human readable warning for a literal read with `units`
    pub fn describe(&self, units: Units) -> String {
        match self {
            UnitIssue::MissingSuffix => {
                format!("Missing a suffix for data expecting {units} units")
            }
            UnitIssue::UnknownSuffix(suffix) => {
                format!("Found a suffix '{suffix}' which could not be parsed as a {units} unit")
            }
        }
    }
}

/// Result of [`parse_unit_suffix`]
#[derive(Clone, Debug, PartialEq)]
pub struct UnitParse<'a> {
    /// Text to hand to the numeric parser
    pub number: &'a str,
    /// Conversion to apply to the parsed number
    pub conversion: Conversion,
    /// Set when the suffix was missing or not understood
    pub issue: Option<UnitIssue>,
}

impl<'a> UnitParse<'a> {
    fn unchanged(number: &'a str, issue: Option<UnitIssue>) -> Self {
        UnitParse {
            number,
            conversion: Conversion::IDENTITY,
            issue,
        }
    }
}

/// Split a literal like `60mph` or `1.2e3kN#est` into its numeric text and
/// the conversion for its suffix.
///
/// The numeric prefix is an optional sign, digits and commas, at most one
/// `.` and an exponent. Whatever follows, minus leading spaces and any `#` tail,
/// is the suffix, matched case-insensitively against every family in `units`.
///
/// An unknown suffix leaves `number` as the whole literal, so the caller's
/// numeric parse fails and its default is used.
///
/// ```
/// use stf_units::{parse_unit_suffix, Units};
///
/// let parsed = parse_unit_suffix("60mph", Units::SPEED);
/// assert_eq!(parsed.number, "60");
/// assert!((parsed.conversion.apply(60.0) - 26.8224).abs() < 1e-9);
/// ```
pub fn parse_unit_suffix(text: &str, units: Units) -> UnitParse<'_> {
    if units.is_empty() {
        return UnitParse::unchanged(text, None);
    }

    let (start, end) = numeric_prefix(text);
    if end == text.len() {
        let issue = units
            .contains(Units::COMPULSORY)
            .then_some(UnitIssue::MissingSuffix);
        return match table::lookup(units, "") {
            Some(conversion) => UnitParse {
                number: text,
                conversion,
                issue,
            },
            None => UnitParse::unchanged(text, issue),
        };
    }

    let suffix = text[end..].trim_start_matches(' ');
    let suffix = suffix.split('#').next().unwrap_or_default();
    let suffix = suffix.trim().to_lowercase();

    match table::lookup(units, &suffix) {
        Some(conversion) => UnitParse {
            number: &text[start..end],
            conversion,
            issue: None,
        },
        None => UnitParse::unchanged(text, Some(UnitIssue::UnknownSuffix(suffix))),
    }
}

/// Byte range of the numeric part of `text`, without a leading `+`
fn numeric_prefix(text: &str) -> (usize, usize) {
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut decimal_point = false;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'+' if i == 0 => start = 1,
            b'-' if i == 0 => {}
            b'.' if !decimal_point => decimal_point = true,
            b',' => {}
            b'0'..=b'9' => {}
            b'e' | b'E' => match bytes.get(i + 1) {
                Some(b'+' | b'-') => i += 1,
                Some(b'0'..=b'9') => {}
                _ => break,
            },
            _ => break,
        }
        i += 1;
    }

    (start, i)
}
