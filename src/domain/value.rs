//! Values entered into a rendered form

use serde::{Deserialize, Serialize};
use std::fmt;

/// A value held by one form field.
///
/// Text inputs, dropdowns, radios and dates produce `Text`; a standalone
/// checkbox produces `Bool`; a checkbox group produces `Multi`. `Number` is
/// accepted for callers that already hold a parsed number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Multi(Vec<String>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Whether the value counts as "nothing entered".
    ///
    /// An empty selection is not falsy: a cleared checkbox group still
    /// reaches the length rules.
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Number(n) => *n == 0.0 || n.is_nan(),
            Self::Bool(b) => !b,
            Self::Multi(_) => false,
        }
    }

    /// Whether the value reads as empty once rendered to text.
    pub fn is_blank(&self) -> bool {
        self.to_string().trim().is_empty()
    }

    /// Number of characters, or selected items for a group.
    pub fn length(&self) -> Option<usize> {
        match self {
            Self::Text(s) => Some(s.chars().count()),
            Self::Multi(items) => Some(items.len()),
            Self::Number(_) | Self::Bool(_) => None,
        }
    }

    /// Numeric reading used by number fields. `None` compares false against
    /// every bound.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            Self::Number(n) => *n,
            Self::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Text(s) => parse_numeric_text(s)?,
            Self::Multi(_) => return None,
        };
        (!n.is_nan()).then_some(n)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_selection(&self) -> Option<&[String]> {
        match self {
            Self::Multi(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Multi(items) => f.write_str(&items.join(",")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::Multi(value)
    }
}

/// Numeric reading of typed text: blank is 0, `Infinity` is signed,
/// `0x`/`0o`/`0b` prefixes are unsigned integers, anything else must be a
/// plain decimal literal.
fn parse_numeric_text(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    let (sign, unsigned) = match trimmed.as_bytes()[0] {
        b'-' => (-1.0, &trimmed[1..]),
        b'+' => (1.0, &trimmed[1..]),
        _ => (1.0, trimmed),
    };
    if unsigned == "Infinity" {
        return Some(sign * f64::INFINITY);
    }

    let radix = match trimmed.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&trimmed[2..], radix)
            .ok()
            .map(|n| n as f64);
    }

    // Rejects `inf`, `nan` and friends that `f64::from_str` would accept.
    if unsigned
        .chars()
        .any(|c| !(c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-')))
    {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Format a number the way users typed it: whole numbers lose the `.0`.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
