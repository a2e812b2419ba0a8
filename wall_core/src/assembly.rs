//! # Wall Assembly
//!
//! The `Assembly` owns the ordered layer list and is the only way to add or
//! remove layers. Every operation either succeeds completely or returns an
//! error and leaves the assembly as it was.
//!
//! ## Structure
//!
//! ```text
//! Assembly
//! ├── meta: AssemblyMetadata (label, timestamps)
//! ├── materials: Arc<MaterialTable> (read-only)
//! └── layers: Vec<Layer> (inside → outside)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use wall_core::assembly::Assembly;
//! use wall_core::heat_transfer::BoundaryConditions;
//! use wall_core::materials::MaterialTable;
//!
//! let mut wall = Assembly::new("2x4 wall", MaterialTable::builtin());
//! wall.add_series_layer(None, Some("1/2-inch Drywall")).unwrap();
//!
//! // Studs at 20%, batts at 80%
//! let mut studs = wall.begin_parallel_layer(2).unwrap();
//! studs.add_path(None, Some("3.5-inch Fiberglass Batt"), 80.0).unwrap();
//! studs.add_path(Some(4.38), None, 20.0).unwrap();
//! studs.commit(&mut wall).unwrap();
//!
//! let result = wall.recompute(&BoundaryConditions::default()).unwrap();
//! assert!(result.r_total > 10.0);
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::{WallError, WallResult};
use crate::heat_transfer::{self, BoundaryConditions, HeatTransferResult};
use crate::layers::{Layer, LayerId, ParallelLayer, ParallelPath, SeriesLayer};
use crate::materials::MaterialTable;
use crate::resistance::{self, AREA_TOLERANCE};
use crate::validation::{require_positive, resolve_r_value};

/// Assembly metadata
#[derive(Debug, Clone, Serialize)]
pub struct AssemblyMetadata {
    /// User label for this wall (e.g., "North wall")
    pub label: String,

    /// When the assembly was created
    pub created: DateTime<Utc>,

    /// When a layer was last added or removed
    pub modified: DateTime<Utc>,
}

/// A composite wall: ordered layers plus the material table they draw on.
#[derive(Debug, Clone)]
pub struct Assembly {
    /// Label and timestamps
    pub meta: AssemblyMetadata,

    materials: Arc<MaterialTable>,
    layers: Vec<Layer>,
}

impl Assembly {
    /// Create an empty assembly.
    pub fn new(label: impl Into<String>, materials: Arc<MaterialTable>) -> Self {
        let now = Utc::now();
        Assembly {
            meta: AssemblyMetadata {
                label: label.into(),
                created: now,
                modified: now,
            },
            materials,
            layers: Vec::new(),
        }
    }

    /// The material table layers are looked up in
    pub fn materials(&self) -> &MaterialTable {
        &self.materials
    }

    /// Read-only view of the layers, inside to outside
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Get a layer by id.
    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id() == id)
    }

    /// Update the modified timestamp.
    fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    fn push(&mut self, layer: Layer) -> LayerId {
        let id = layer.id();
        tracing::debug!(
            assembly = %self.meta.label,
            layer_type = layer.layer_type(),
            r = layer.resistance(),
            "layer added"
        );
        self.layers.push(layer);
        self.touch();
        id
    }

    /// Add a full-area layer.
    ///
    /// Exactly one of `r_value` (typed) or `material_key` (table lookup)
    /// must be given.
    pub fn add_series_layer(
        &mut self,
        r_value: Option<f64>,
        material_key: Option<&str>,
    ) -> WallResult<LayerId> {
        let (r_value, material) = resolve_r_value(r_value, material_key, &self.materials)
            .inspect_err(|e| tracing::debug!(error = %e, "series layer rejected"))?;
        Ok(self.push(Layer::Series(SeriesLayer::new(r_value, material))))
    }

    /// Start collecting the paths of a parallel layer.
    ///
    /// Nothing is added to the assembly until
    /// [`ParallelLayerBuilder::commit`] succeeds.
    pub fn begin_parallel_layer(&self, path_count: usize) -> WallResult<ParallelLayerBuilder> {
        if path_count == 0 {
            return Err(WallError::range(
                "path_count",
                0.0,
                "A parallel layer needs at least one path",
            ));
        }
        Ok(ParallelLayerBuilder {
            materials: Arc::clone(&self.materials),
            path_count,
            paths: Vec::with_capacity(path_count),
        })
    }

    /// Remove the layer at `index` (0-based).
    ///
    /// Callers that want a confirmation step ask before calling this.
    pub fn remove_layer(&mut self, index: usize) -> WallResult<Layer> {
        if index >= self.layers.len() {
            return Err(WallError::NotFound {
                index,
                len: self.layers.len(),
            });
        }
        let layer = self.layers.remove(index);
        tracing::debug!(index, layer_type = layer.layer_type(), "layer removed");
        self.touch();
        Ok(layer)
    }

    /// Remove the most recently added layer.
    pub fn remove_last_layer(&mut self) -> WallResult<Layer> {
        let layer = self.layers.pop().ok_or(WallError::Empty)?;
        tracing::debug!(layer_type = layer.layer_type(), "last layer removed");
        self.touch();
        Ok(layer)
    }

    /// Total resistance including both air films.
    pub fn total_resistance(&self, bounds: &BoundaryConditions) -> f64 {
        resistance::total_resistance(bounds.film_inside_r, bounds.film_outside_r, &self.layers)
    }

    /// Calculate U-value and heat flow for the current layers.
    pub fn recompute(&self, bounds: &BoundaryConditions) -> WallResult<HeatTransferResult> {
        heat_transfer::calculate(self.total_resistance(bounds), bounds)
    }
}

/// Collects the paths of one parallel layer, one at a time.
///
/// Each [`add_path`](Self::add_path) is checked against the area still
/// unclaimed. The last path must claim exactly what is left, so a committed
/// layer always covers 100% of the wall.
///
/// ```rust
/// use wall_core::assembly::Assembly;
/// use wall_core::errors::WallError;
/// use wall_core::materials::MaterialTable;
///
/// let wall = Assembly::new("Demo", MaterialTable::builtin());
/// let mut builder = wall.begin_parallel_layer(3).unwrap();
/// builder.add_path(Some(13.0), None, 60.0).unwrap();
/// builder.add_path(Some(4.0), None, 30.0).unwrap();
///
/// let err = builder.add_path(Some(1.0), None, 5.0).unwrap_err();
/// assert!(matches!(err, WallError::AreaSum { remaining_percent, .. } if (remaining_percent - 10.0).abs() < 1e-9));
/// ```
#[derive(Debug, Clone)]
pub struct ParallelLayerBuilder {
    materials: Arc<MaterialTable>,
    path_count: usize,
    paths: Vec<ParallelPath>,
}

impl ParallelLayerBuilder {
    /// Number of paths the layer was opened with
    pub fn path_count(&self) -> usize {
        self.path_count
    }

    /// Paths accepted so far
    pub fn accepted_count(&self) -> usize {
        self.paths.len()
    }

    /// 1-based number of the path expected next
    pub fn next_path_number(&self) -> usize {
        self.paths.len() + 1
    }

    /// Whether the next path is the one that must close the layer
    pub fn is_next_last(&self) -> bool {
        self.paths.len() + 1 == self.path_count
    }

    pub fn is_complete(&self) -> bool {
        self.paths.len() == self.path_count
    }

    /// Area percent already claimed
    pub fn area_used(&self) -> f64 {
        self.paths
            .iter()
            .fold(0.0, |area, path| area + path.area_percent())
    }

    /// Area percent still unclaimed
    pub fn remaining_area(&self) -> f64 {
        100.0 - self.area_used()
    }

    pub fn paths(&self) -> &[ParallelPath] {
        &self.paths
    }

    /// Validate and accept the next path.
    ///
    /// A rejected path leaves the builder as it was, so the same path can
    /// be offered again.
    pub fn add_path(
        &mut self,
        r_value: Option<f64>,
        material_key: Option<&str>,
        area_percent: f64,
    ) -> WallResult<()> {
        match self.check_path(r_value, material_key, area_percent) {
            Ok(path) => {
                self.paths.push(path);
                Ok(())
            }
            Err(e) => {
                tracing::debug!(
                    path = self.next_path_number(),
                    of = self.path_count,
                    error = %e,
                    "parallel path rejected"
                );
                Err(e)
            }
        }
    }

    fn check_path(
        &self,
        r_value: Option<f64>,
        material_key: Option<&str>,
        area_percent: f64,
    ) -> WallResult<ParallelPath> {
        if self.is_complete() {
            return Err(WallError::PathCountExceeded {
                path_count: self.path_count,
            });
        }

        let (r_value, material) = resolve_r_value(r_value, material_key, &self.materials)?;
        let area_percent = require_positive("area_percent", area_percent)?;

        let remaining = self.remaining_area();
        if self.is_next_last() {
            if (area_percent - remaining).abs() > AREA_TOLERANCE {
                return Err(WallError::AreaSum {
                    remaining_percent: remaining,
                    provided_percent: area_percent,
                });
            }
        } else if area_percent > remaining + AREA_TOLERANCE {
            return Err(WallError::range(
                "area_percent",
                area_percent,
                format!("exceeds the remaining {remaining:.2}%"),
            ));
        }

        Ok(ParallelPath::new(r_value, area_percent, material))
    }

    /// Append the finished layer to `assembly`.
    ///
    /// Fails with `IncompleteLayer` if fewer than `path_count` paths were
    /// accepted; the assembly is not touched in that case.
    pub fn commit(self, assembly: &mut Assembly) -> WallResult<LayerId> {
        if !self.is_complete() {
            return Err(WallError::IncompleteLayer {
                accepted: self.paths.len(),
                path_count: self.path_count,
            });
        }
        Ok(assembly.push(Layer::Parallel(ParallelLayer::new(self.paths))))
    }
}
