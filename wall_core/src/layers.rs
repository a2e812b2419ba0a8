//! # Wall Layers
//!
//! The data model the resistance calculation runs over. A wall is an
//! ordered list of [`Layer`]s, each either a full-area series layer or a
//! parallel layer split into area-fraction paths (studs vs. cavity fill).
//!
//! Layers are only built through [`Assembly`](crate::assembly::Assembly)
//! operations, which validate every value first, so fields are read through
//! accessors.
//!
//! ## JSON Example
//!
//! ```json
//! { "type": "Series", "id": "…", "r_value": 13.0,
//!   "material": { "kind": "Named", "name": "3.5-inch Fiberglass Batt" } }
//! ```

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::resistance;

/// Identifier handed back when a layer is committed
pub type LayerId = Uuid;

/// Where a layer's R-value came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name")]
pub enum MaterialLabel {
    /// Typed directly as a number
    Custom,
    /// Looked up in the material table
    Named(String),
}

impl MaterialLabel {
    pub fn as_str(&self) -> &str {
        match self {
            MaterialLabel::Custom => "Custom R-value",
            MaterialLabel::Named(name) => name,
        }
    }
}

impl fmt::Display for MaterialLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A layer spanning the whole wall area
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesLayer {
    id: LayerId,
    r_value: f64,
    material: MaterialLabel,
}

impl SeriesLayer {
    pub(crate) fn new(r_value: f64, material: MaterialLabel) -> Self {
        SeriesLayer {
            id: Uuid::new_v4(),
            r_value,
            material,
        }
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    /// R-value in ft²·h·°F/BTU
    pub fn r_value(&self) -> f64 {
        self.r_value
    }

    pub fn material(&self) -> &MaterialLabel {
        &self.material
    }
}

/// One area-fraction path through a parallel layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParallelPath {
    r_value: f64,
    area_percent: f64,
    material: MaterialLabel,
}

impl ParallelPath {
    pub(crate) fn new(r_value: f64, area_percent: f64, material: MaterialLabel) -> Self {
        ParallelPath {
            r_value,
            area_percent,
            material,
        }
    }

    pub fn r_value(&self) -> f64 {
        self.r_value
    }

    /// Share of the wall area this path covers, 0-100
    pub fn area_percent(&self) -> f64 {
        self.area_percent
    }

    pub fn material(&self) -> &MaterialLabel {
        &self.material
    }

    /// Area-weighted conductance (area fraction / R)
    pub fn conductance(&self) -> f64 {
        (self.area_percent / 100.0) / self.r_value
    }
}

/// A layer split into side-by-side paths whose areas total 100%
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParallelLayer {
    id: LayerId,
    paths: Vec<ParallelPath>,
}

impl ParallelLayer {
    pub(crate) fn new(paths: Vec<ParallelPath>) -> Self {
        ParallelLayer {
            id: Uuid::new_v4(),
            paths,
        }
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn paths(&self) -> &[ParallelPath] {
        &self.paths
    }

    /// Sum of path areas; 100 for every committed layer
    pub fn total_area_percent(&self) -> f64 {
        self.paths
            .iter()
            .fold(0.0, |area, path| area + path.area_percent())
    }
}

/// A wall layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Layer {
    Series(SeriesLayer),
    Parallel(ParallelLayer),
}

impl Layer {
    pub fn id(&self) -> LayerId {
        match self {
            Layer::Series(layer) => layer.id(),
            Layer::Parallel(layer) => layer.id(),
        }
    }

    /// Get the layer type as a string
    pub fn layer_type(&self) -> &'static str {
        match self {
            Layer::Series(_) => "Series",
            Layer::Parallel(_) => "Parallel",
        }
    }

    /// This layer's contribution to the total resistance
    pub fn resistance(&self) -> f64 {
        match self {
            Layer::Series(layer) => layer.r_value(),
            Layer::Parallel(layer) => resistance::parallel_resistance(layer.paths()),
        }
    }

    /// One line per series layer or parallel path, for info popups and
    /// listings.
    pub fn describe(&self) -> Vec<String> {
        match self {
            Layer::Series(layer) => vec![format!(
                "Series Layer, R={:.2}, Material: {}",
                layer.r_value(),
                layer.material()
            )],
            Layer::Parallel(layer) => layer
                .paths()
                .iter()
                .map(|path| {
                    format!(
                        "Parallel Path, R={:.2}, Area={}%, Material: {}",
                        path.r_value(),
                        path.area_percent(),
                        path.material()
                    )
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_material_label_display() {
        assert_eq!(MaterialLabel::Custom.to_string(), "Custom R-value");
        assert_eq!(
            MaterialLabel::Named("1/2-inch OSB".into()).to_string(),
            "1/2-inch OSB"
        );
    }

    #[test]
    fn test_series_describe() {
        let layer = Layer::Series(SeriesLayer::new(13.0, MaterialLabel::Custom));
        assert_eq!(
            layer.describe(),
            vec!["Series Layer, R=13.00, Material: Custom R-value".to_string()]
        );
        assert_eq!(layer.layer_type(), "Series");
    }

    #[test]
    fn test_parallel_describe_lists_each_path() {
        let layer = Layer::Parallel(ParallelLayer::new(vec![
            ParallelPath::new(13.0, 80.0, MaterialLabel::Custom),
            ParallelPath::new(1.11, 20.0, MaterialLabel::Named("Block".into())),
        ]));
        let lines = layer.describe();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "Parallel Path, R=1.11, Area=20%, Material: Block");
    }

    #[test]
    fn test_path_conductance() {
        let path = ParallelPath::new(4.0, 50.0, MaterialLabel::Custom);
        assert_relative_eq!(path.conductance(), 0.125);
    }

    #[test]
    fn test_layer_ids_are_unique() {
        let a = SeriesLayer::new(1.0, MaterialLabel::Custom);
        let b = SeriesLayer::new(1.0, MaterialLabel::Custom);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_layer_serialization() {
        let layer = Layer::Series(SeriesLayer::new(
            0.45,
            MaterialLabel::Named("1/2-inch Drywall".into()),
        ));
        let json = serde_json::to_value(&layer).unwrap();
        assert_eq!(json["type"], "Series");
        assert_eq!(json["r_value"], 0.45);
        assert_eq!(json["material"]["kind"], "Named");
        assert_eq!(json["material"]["name"], "1/2-inch Drywall");
    }
}
