//! # Heat-Transfer Calculator
//!
//! Turns a total resistance and the boundary conditions around the wall
//! into U-value and heat flow:
//!
//! ```text
//! U      = 1 / R_total
//! q/A    = (T_out - T_in) / R_total      (BTU/h·ft²)
//! Q      = q/A · A                       (BTU/h)
//! ```
//!
//! Flux keeps its sign: it is negative when the inside is warmer, i.e. heat
//! leaving the building.
//!
//! ## Example
//!
//! ```rust
//! use wall_core::heat_transfer::{calculate, BoundaryConditions};
//!
//! let bounds = BoundaryConditions::default(); // 70°F in, 20°F out, 100 ft²
//! let result = calculate(13.85, &bounds).unwrap();
//! assert!((result.flux_per_area + 3.61).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{WallError, WallResult};
use crate::validation::parse_number;

/// Conventional still-air inside film resistance
pub const DEFAULT_FILM_INSIDE_R: f64 = 0.68;

/// Conventional outside film resistance (15 mph wind)
pub const DEFAULT_FILM_OUTSIDE_R: f64 = 0.17;

/// Conditions on either side of the wall, re-read on every recompute.
///
/// ## JSON Example
///
/// ```json
/// {
///   "t_inside_f": 70.0,
///   "t_outside_f": 20.0,
///   "film_inside_r": 0.68,
///   "film_outside_r": 0.17,
///   "area_ft2": 100.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryConditions {
    /// Inside air temperature (°F)
    pub t_inside_f: f64,

    /// Outside air temperature (°F)
    pub t_outside_f: f64,

    /// Inside air film resistance (ft²·h·°F/BTU)
    pub film_inside_r: f64,

    /// Outside air film resistance (ft²·h·°F/BTU)
    pub film_outside_r: f64,

    /// Wall area (ft²)
    pub area_ft2: f64,
}

impl Default for BoundaryConditions {
    fn default() -> Self {
        BoundaryConditions {
            t_inside_f: 70.0,
            t_outside_f: 20.0,
            film_inside_r: DEFAULT_FILM_INSIDE_R,
            film_outside_r: DEFAULT_FILM_OUTSIDE_R,
            area_ft2: 100.0,
        }
    }
}

impl BoundaryConditions {
    /// Validate boundary values.
    ///
    /// Temperatures may be any finite number. Films may be zero but not
    /// negative. Area must be positive.
    pub fn validate(&self) -> WallResult<()> {
        for (field, value) in [("t_inside_f", self.t_inside_f), ("t_outside_f", self.t_outside_f)] {
            if !value.is_finite() {
                return Err(WallError::parse(field, value.to_string()));
            }
        }
        for (field, value) in [
            ("film_inside_r", self.film_inside_r),
            ("film_outside_r", self.film_outside_r),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(WallError::range(
                    field,
                    value,
                    "Film resistance cannot be negative",
                ));
            }
        }
        if !self.area_ft2.is_finite() || self.area_ft2 <= 0.0 {
            return Err(WallError::range(
                "area_ft2",
                self.area_ft2,
                "Wall area must be positive",
            ));
        }
        Ok(())
    }

    /// Parse and validate the five raw text fields as one unit.
    pub fn parse(input: &BoundaryInput) -> WallResult<Self> {
        let bounds = BoundaryConditions {
            t_inside_f: parse_number("t_inside_f", &input.t_inside)?,
            t_outside_f: parse_number("t_outside_f", &input.t_outside)?,
            film_inside_r: parse_number("film_inside_r", &input.film_inside)?,
            film_outside_r: parse_number("film_outside_r", &input.film_outside)?,
            area_ft2: parse_number("area_ft2", &input.area)?,
        };
        bounds.validate()?;
        Ok(bounds)
    }
}

/// Boundary values exactly as typed into the input fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryInput {
    pub t_inside: String,
    pub t_outside: String,
    pub film_inside: String,
    pub film_outside: String,
    pub area: String,
}

impl From<&BoundaryConditions> for BoundaryInput {
    fn from(bounds: &BoundaryConditions) -> Self {
        BoundaryInput {
            t_inside: bounds.t_inside_f.to_string(),
            t_outside: bounds.t_outside_f.to_string(),
            film_inside: bounds.film_inside_r.to_string(),
            film_outside: bounds.film_outside_r.to_string(),
            area: bounds.area_ft2.to_string(),
        }
    }
}

/// Results from a heat-transfer calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "r_total": 13.85,
///   "u_value": 0.0722,
///   "flux_per_area": -3.61,
///   "total_flow": -361.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatTransferResult {
    /// Overall R-value (ft²·h·°F/BTU)
    pub r_total: f64,

    /// Overall U-value (BTU/h·ft²·°F)
    pub u_value: f64,

    /// Heat flow per square foot (BTU/h·ft²), signed
    pub flux_per_area: f64,

    /// Heat flow through the whole wall (BTU/h), signed
    pub total_flow: f64,
}

impl HeatTransferResult {
    /// Four-line text block for a results panel
    pub fn summary(&self) -> String {
        format!(
            "Overall R-Value: {:.2} ft²·h·°F/BTU\n\
             Overall U-Value: {:.4} BTU/h·ft²·°F\n\
             Heat Flow Rate per ft²: {:.1} BTU/h·ft²\n\
             Total Heat Transfer: {:.1} BTU/h",
            self.r_total, self.u_value, self.flux_per_area, self.total_flow
        )
    }
}

/// Calculate heat transfer for a wall with total resistance `r_total`.
///
/// # Returns
///
/// * `Ok(HeatTransferResult)` - All four outputs
/// * `Err(WallError::DivisionByZero)` - If `r_total` is not positive
/// * `Err(WallError)` - If the boundary conditions are invalid
pub fn calculate(r_total: f64, bounds: &BoundaryConditions) -> WallResult<HeatTransferResult> {
    bounds.validate()?;
    if !(r_total.is_finite() && r_total > 0.0) {
        return Err(WallError::DivisionByZero { r_total });
    }

    let flux_per_area = (bounds.t_outside_f - bounds.t_inside_f) / r_total;

    Ok(HeatTransferResult {
        r_total,
        u_value: 1.0 / r_total,
        flux_per_area,
        total_flow: flux_per_area * bounds.area_ft2,
    })
}
