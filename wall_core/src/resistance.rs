//! # Resistance Model
//!
//! Accumulates the overall thermal resistance of a wall:
//!
//! ```text
//! R_total = R_film_in + R_film_out + Σ R_series + Σ 1 / Σ_paths (a_i / 100) / R_i
//! ```
//!
//! Parallel paths combine like conductances in parallel, each weighted by
//! the fraction of wall area it covers. Both sums are order independent.
//!
//! ## Example
//!
//! ```rust
//! use wall_core::assembly::Assembly;
//! use wall_core::materials::MaterialTable;
//! use wall_core::resistance::total_resistance;
//!
//! let mut wall = Assembly::new("Demo", MaterialTable::builtin());
//! wall.add_series_layer(Some(13.0), None).unwrap();
//!
//! let r = total_resistance(0.68, 0.17, wall.layers());
//! assert!((r - 13.85).abs() < 1e-9);
//! ```

use crate::layers::{Layer, ParallelPath};

/// Allowed slack when checking that parallel path areas total 100%
pub const AREA_TOLERANCE: f64 = 1e-6;

/// Effective resistance of one parallel layer.
///
/// # Panics
///
/// If `paths` is empty or its areas do not total 100%. Committed layers
/// always satisfy both, so hitting this means a layer was built without
/// going through validation.
pub fn parallel_resistance(paths: &[ParallelPath]) -> f64 {
    assert!(!paths.is_empty(), "parallel layer has no paths");
    let area: f64 = paths.iter().map(ParallelPath::area_percent).sum();
    assert!(
        (area - 100.0).abs() <= AREA_TOLERANCE,
        "parallel layer areas total {area}%, not 100%"
    );

    let conductance: f64 = paths.iter().map(ParallelPath::conductance).sum();
    1.0 / conductance
}

/// Total resistance of films plus layers, in ft²·h·°F/BTU.
pub fn total_resistance(film_inside_r: f64, film_outside_r: f64, layers: &[Layer]) -> f64 {
    layers
        .iter()
        .fold(film_inside_r + film_outside_r, |r, layer| r + layer.resistance())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::{MaterialLabel, ParallelLayer, SeriesLayer};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn series(r: f64) -> Layer {
        Layer::Series(SeriesLayer::new(r, MaterialLabel::Custom))
    }

    fn path(r: f64, area: f64) -> ParallelPath {
        ParallelPath::new(r, area, MaterialLabel::Custom)
    }

    #[test]
    fn test_films_only() {
        assert_relative_eq!(total_resistance(0.68, 0.17, &[]), 0.85);
    }

    #[test]
    fn test_single_series_layer() {
        let r = total_resistance(0.68, 0.17, &[series(13.0)]);
        assert_relative_eq!(r, 13.85, epsilon = 1e-12);
    }

    #[test]
    fn test_half_and_half_parallel() {
        for &(r1, r2) in &[(1.0, 1.0), (13.0, 1.11), (0.2, 25.0), (4.0, 8.0)] {
            let r = parallel_resistance(&[path(r1, 50.0), path(r2, 50.0)]);
            assert_relative_eq!(r, 1.0 / ((0.5 / r1) + (0.5 / r2)), max_relative = 1e-12);
        }
    }

    #[test]
    fn test_stud_cavity_parallel() {
        let paths = vec![path(13.0, 80.0), path(1.11, 20.0)];
        let r_parallel = parallel_resistance(&paths);
        assert_abs_diff_eq!(r_parallel, 4.14, epsilon = 0.005);

        let layers = vec![Layer::Parallel(ParallelLayer::new(paths))];
        assert_abs_diff_eq!(total_resistance(0.68, 0.17, &layers), 4.99, epsilon = 0.005);
    }

    #[test]
    fn test_single_path_parallel_equals_series() {
        assert_relative_eq!(parallel_resistance(&[path(7.5, 100.0)]), 7.5);
    }

    #[test]
    fn test_series_order_does_not_matter() {
        let forward = vec![series(0.45), series(13.0), series(0.63), series(5.0)];
        let mut reversed = forward.clone();
        reversed.reverse();
        let mut rotated = forward.clone();
        rotated.rotate_left(2);

        let r = total_resistance(0.68, 0.17, &forward);
        assert_relative_eq!(r, total_resistance(0.68, 0.17, &reversed), epsilon = 1e-12);
        assert_relative_eq!(r, total_resistance(0.68, 0.17, &rotated), epsilon = 1e-12);
    }

    #[test]
    fn test_mixed_layers() {
        let layers = vec![
            series(0.45),
            Layer::Parallel(ParallelLayer::new(vec![path(4.0, 50.0), path(4.0, 50.0)])),
            series(0.5),
        ];
        assert_relative_eq!(
            total_resistance(0.68, 0.17, &layers),
            0.68 + 0.17 + 0.45 + 4.0 + 0.5,
            epsilon = 1e-12
        );
    }

    #[test]
    #[should_panic(expected = "not 100%")]
    fn test_bad_area_sum_is_fatal() {
        parallel_resistance(&[path(1.0, 40.0), path(2.0, 40.0)]);
    }

    #[test]
    #[should_panic(expected = "no paths")]
    fn test_empty_parallel_is_fatal() {
        parallel_resistance(&[]);
    }
}
