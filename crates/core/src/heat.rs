//! Heat number format and heat reference parsing.
//!
//! A heat number is `A` followed by exactly seven digits. Routes that accept
//! a heat take either that number or the internal numeric id, so both forms
//! are resolved through [`HeatRef`].

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Regex pattern every heat number must match. ASCII digits only.
pub const HEAT_NUMBER_PATTERN: &str = r"^A[0-9]{7}$";

/// Maximum length for the free-text `customer` and `alloy` fields.
pub const MAX_HEAT_TEXT_LENGTH: usize = 200;

static HEAT_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(HEAT_NUMBER_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Returns `true` if `value` is a well-formed heat number.
pub fn is_heat_number(value: &str) -> bool {
    HEAT_NUMBER_RE.is_match(value)
}

/// Validate a heat number against [`HEAT_NUMBER_PATTERN`].
pub fn validate_heat_number(value: &str) -> Result<(), CoreError> {
    if is_heat_number(value) {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Invalid heat number format. Must be 'A' followed by 7 digits.".to_string(),
        ))
    }
}

/// Validate an optional physical dimension (diameter, length, ...).
///
/// Absent values are allowed; present values must be finite and not negative.
pub fn validate_dimension(field: &str, value: Option<f64>) -> Result<(), CoreError> {
    match value {
        Some(v) if !v.is_finite() => Err(CoreError::Validation(format!(
            "{field} must be a finite number"
        ))),
        Some(v) if v < 0.0 => Err(CoreError::Validation(format!(
            "{field} must not be negative, got {v}"
        ))),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Heat references
// ---------------------------------------------------------------------------

/// How a caller addressed a heat in a URL path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeatRef {
    /// Internal `heats.id`.
    Id(DbId),
    /// Public heat number, already format-checked.
    Number(String),
}

impl HeatRef {
    /// Parse a path segment into a heat reference.
    ///
    /// Heat numbers are recognised first; a plain run of digits is an
    /// internal id. Anything else is rejected.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        if is_heat_number(raw) {
            return Ok(Self::Number(raw.to_string()));
        }
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            return raw.parse::<DbId>().map(Self::Id).map_err(|_| {
                CoreError::Validation(format!("Heat id '{raw}' is out of range"))
            });
        }
        Err(CoreError::Validation(format!(
            "'{raw}' is neither a heat number nor a heat id"
        )))
    }
}

impl fmt::Display for HeatRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Number(number) => f.write_str(number),
        }
    }
}
