//! # Input Validation
//!
//! Checks shared by every way of adding a layer: reading numbers out of
//! text fields, and settling which single R-value source (typed number or
//! material table entry) a layer or path uses.

use crate::errors::{WallError, WallResult};
use crate::layers::MaterialLabel;
use crate::materials::MaterialTable;

/// Parse a required numeric field. Blank, non-numeric and non-finite text
/// (`"inf"`, `"NaN"`) are all parse errors.
pub fn parse_number(field: &str, raw: &str) -> WallResult<f64> {
    let text = raw.trim();
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(WallError::parse(field, text)),
    }
}

/// Parse an optional numeric field; blank means "not given".
pub fn parse_optional(field: &str, raw: &str) -> WallResult<Option<f64>> {
    if raw.trim().is_empty() {
        Ok(None)
    } else {
        parse_number(field, raw).map(Some)
    }
}

/// Fail unless `value` is finite and strictly positive.
pub fn require_positive(field: &str, value: f64) -> WallResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(WallError::range(field, value, format!("{field} must be positive")))
    }
}

/// Settle a layer's R-value from exactly one of a typed value or a
/// material key.
///
/// A blank key counts as absent.
pub fn resolve_r_value(
    typed: Option<f64>,
    material_key: Option<&str>,
    materials: &MaterialTable,
) -> WallResult<(f64, MaterialLabel)> {
    let key = material_key.map(str::trim).filter(|k| !k.is_empty());
    match (typed, key) {
        (Some(_), Some(_)) => Err(WallError::ambiguous_source("both")),
        (None, None) => Err(WallError::ambiguous_source("neither")),
        (Some(r_value), None) => {
            let r_value = require_positive("r_value", r_value)?;
            Ok((r_value, MaterialLabel::Custom))
        }
        (None, Some(name)) => {
            let material = materials
                .get(name)
                .ok_or_else(|| WallError::unknown_material(name))?;
            Ok((material.r_value, MaterialLabel::Named(material.name.clone())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("t_inside", " 70 ").unwrap(), 70.0);
        assert_eq!(parse_number("t_inside", "-12.5").unwrap(), -12.5);
    }

    #[test]
    fn test_parse_number_rejects_garbage() {
        assert_eq!(
            parse_number("area", "ten").unwrap_err(),
            WallError::parse("area", "ten")
        );
        assert!(parse_number("area", "").is_err());
        assert!(parse_number("area", "inf").is_err());
        assert!(parse_number("area", "NaN").is_err());
    }

    #[test]
    fn test_parse_optional() {
        assert_eq!(parse_optional("r_value", "   ").unwrap(), None);
        assert_eq!(parse_optional("r_value", "3.5").unwrap(), Some(3.5));
        assert!(parse_optional("r_value", "x").is_err());
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive("r_value", 0.01).is_ok());
        assert_eq!(require_positive("r_value", 0.0).unwrap_err().error_code(), "RANGE_ERROR");
        assert!(require_positive("r_value", -1.0).is_err());
        assert!(require_positive("r_value", f64::INFINITY).is_err());
    }

    #[test]
    fn test_resolve_typed_value() {
        let table = MaterialTable::builtin();
        let (r, label) = resolve_r_value(Some(2.5), None, &table).unwrap();
        assert_eq!(r, 2.5);
        assert_eq!(label, MaterialLabel::Custom);
    }

    #[test]
    fn test_resolve_material_key() {
        let table = MaterialTable::builtin();
        let (r, label) = resolve_r_value(None, Some("1/2-inch OSB"), &table).unwrap();
        assert_eq!(r, 0.5);
        assert_eq!(label, MaterialLabel::Named("1/2-inch OSB".into()));
    }

    #[test]
    fn test_resolve_listing_name_labels_with_table_name() {
        let table = MaterialTable::builtin();
        let (r, label) = resolve_r_value(None, Some("1/2-inch Drywall (R=0.45)"), &table).unwrap();
        assert_eq!(r, 0.45);
        assert_eq!(label, MaterialLabel::Named("1/2-inch Drywall".into()));
    }

    #[test]
    fn test_resolve_requires_exactly_one_source() {
        let table = MaterialTable::builtin();
        let both = resolve_r_value(Some(1.0), Some("1/2-inch OSB"), &table).unwrap_err();
        let neither = resolve_r_value(None, None, &table).unwrap_err();
        assert_eq!(both.error_code(), "AMBIGUOUS_SOURCE");
        assert_eq!(neither.error_code(), "AMBIGUOUS_SOURCE");
    }

    #[test]
    fn test_blank_key_counts_as_absent() {
        let table = MaterialTable::builtin();
        assert!(resolve_r_value(Some(1.0), Some("  "), &table).is_ok());
        assert!(resolve_r_value(None, Some(""), &table).is_err());
    }

    #[test]
    fn test_resolve_rejects_bad_inputs() {
        let table = MaterialTable::builtin();
        assert!(matches!(
            resolve_r_value(Some(0.0), None, &table),
            Err(WallError::Range { .. })
        ));
        assert!(matches!(
            resolve_r_value(None, Some("Unobtainium"), &table),
            Err(WallError::UnknownMaterial { .. })
        ));
    }
}
