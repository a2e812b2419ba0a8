//! # Error Types
//!
//! Structured error types for wall_core. Every expected bad input (a typo in
//! a numeric field, an area split that doesn't add up, an unknown material)
//! comes back as a [`WallError`] variant; the caller decides how to show it.
//!
//! Operations that fail leave the [`Assembly`](crate::assembly::Assembly)
//! untouched.
//!
//! ## Example
//!
//! ```rust
//! use wall_core::errors::{WallError, WallResult};
//!
//! fn validate_area(area_ft2: f64) -> WallResult<()> {
//!     if area_ft2 <= 0.0 {
//!         return Err(WallError::range(
//!             "area_ft2",
//!             area_ft2,
//!             "Wall area must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert_eq!(validate_area(-1.0).unwrap_err().error_code(), "RANGE_ERROR");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for wall_core operations
pub type WallResult<T> = Result<T, WallError>;

/// Structured error type for wall assembly operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum WallError {
    /// A field could not be read as a finite number
    #[error("Invalid number for '{field}': '{value}'")]
    Parse { field: String, value: String },

    /// A number parsed but lies outside its allowed range
    #[error("Out of range for '{field}': {value} - {reason}")]
    Range {
        field: String,
        value: f64,
        reason: String,
    },

    /// A parallel path's area does not close the layer at 100%
    #[error(
        "Last path must use exactly {remaining_percent:.2}% of the area, got {provided_percent:.2}%"
    )]
    AreaSum {
        remaining_percent: f64,
        provided_percent: f64,
    },

    /// Material key not present in the material table
    #[error("Material not found: {material_name}")]
    UnknownMaterial { material_name: String },

    /// Neither or both of typed R-value and material key were supplied
    #[error("Type an R-value or select a material ({reason} was given)")]
    AmbiguousSource { reason: String },

    /// Layer index out of range
    #[error("No layer at index {index} (assembly has {len} layers)")]
    NotFound { index: usize, len: usize },

    /// Remove-last on an assembly with no layers
    #[error("No layers to delete")]
    Empty,

    /// Total resistance is zero (or otherwise not positive)
    #[error("Total resistance is {r_total}; cannot divide by it")]
    DivisionByZero { r_total: f64 },

    /// More paths offered to a parallel layer than it was opened with
    #[error("Parallel layer already has all {path_count} paths")]
    PathCountExceeded { path_count: usize },

    /// Commit attempted before every path was accepted
    #[error("Parallel layer has {accepted} of {path_count} paths")]
    IncompleteLayer { accepted: usize, path_count: usize },

    /// Material table file could not be used
    #[error("Material table error: {reason}")]
    MaterialTable { reason: String },
}

impl WallError {
    /// Create a Parse error
    pub fn parse(field: impl Into<String>, value: impl Into<String>) -> Self {
        WallError::Parse {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a Range error
    pub fn range(field: impl Into<String>, value: f64, reason: impl Into<String>) -> Self {
        WallError::Range {
            field: field.into(),
            value,
            reason: reason.into(),
        }
    }

    /// Create an UnknownMaterial error
    pub fn unknown_material(material_name: impl Into<String>) -> Self {
        WallError::UnknownMaterial {
            material_name: material_name.into(),
        }
    }

    /// Create an AmbiguousSource error
    pub fn ambiguous_source(reason: impl Into<String>) -> Self {
        WallError::AmbiguousSource {
            reason: reason.into(),
        }
    }

    /// Create a MaterialTable error
    pub fn material_table(reason: impl Into<String>) -> Self {
        WallError::MaterialTable {
            reason: reason.into(),
        }
    }

    /// True for errors caused by what the user typed, as opposed to
    /// requests against the current assembly state.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            WallError::Parse { .. }
                | WallError::Range { .. }
                | WallError::AreaSum { .. }
                | WallError::UnknownMaterial { .. }
                | WallError::AmbiguousSource { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            WallError::Parse { .. } => "PARSE_ERROR",
            WallError::Range { .. } => "RANGE_ERROR",
            WallError::AreaSum { .. } => "AREA_SUM_ERROR",
            WallError::UnknownMaterial { .. } => "UNKNOWN_MATERIAL",
            WallError::AmbiguousSource { .. } => "AMBIGUOUS_SOURCE",
            WallError::NotFound { .. } => "NOT_FOUND",
            WallError::Empty => "EMPTY",
            WallError::DivisionByZero { .. } => "DIVISION_BY_ZERO",
            WallError::PathCountExceeded { .. } => "PATH_COUNT_EXCEEDED",
            WallError::IncompleteLayer { .. } => "INCOMPLETE_LAYER",
            WallError::MaterialTable { .. } => "MATERIAL_TABLE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = WallError::range("r_value", -5.0, "R-value must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"Range\""));
        let roundtrip: WallError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_unit_variant_serialization() {
        let json = serde_json::to_string(&WallError::Empty).unwrap();
        assert_eq!(json, r#"{"type":"Empty"}"#);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(WallError::parse("t_inside", "abc").error_code(), "PARSE_ERROR");
        assert_eq!(WallError::unknown_material("Brick").error_code(), "UNKNOWN_MATERIAL");
        assert_eq!(WallError::NotFound { index: 3, len: 1 }.error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_area_sum_message_reports_remaining() {
        let error = WallError::AreaSum {
            remaining_percent: 10.0,
            provided_percent: 5.0,
        };
        assert_eq!(
            error.to_string(),
            "Last path must use exactly 10.00% of the area, got 5.00%"
        );
    }

    #[test]
    fn test_input_vs_state_errors() {
        assert!(WallError::ambiguous_source("both").is_input_error());
        assert!(!WallError::Empty.is_input_error());
        assert!(!WallError::DivisionByZero { r_total: 0.0 }.is_input_error());
    }
}
