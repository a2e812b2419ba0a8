//! # Material Table
//!
//! Read-only lookup from material name to R-value. The table is loaded once,
//! either the built-in one shipped in `data/materials.toml` or a file the
//! user supplies, and is shared by every assembly through an `Arc`.
//!
//! ## File Format
//!
//! ```toml
//! [[material]]
//! name = "1/2-inch Drywall"
//! category = "Gypsum board"   # optional
//! r_value = 0.45
//! ```
//!
//! ## Example
//!
//! ```rust
//! use wall_core::materials::MaterialTable;
//!
//! let table = MaterialTable::builtin();
//! let drywall = table.get("1/2-inch Drywall").unwrap();
//! assert_eq!(drywall.r_value, 0.45);
//! assert_eq!(drywall.display_name(), "1/2-inch Drywall (R=0.45)");
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{WallError, WallResult};

const BUILTIN_TOML: &str = include_str!("../data/materials.toml");

static BUILTIN: Lazy<Arc<MaterialTable>> = Lazy::new(|| {
    let table = MaterialTable::from_toml_str(BUILTIN_TOML)
        .unwrap_or_else(|e| panic!("built-in material table is malformed: {e}"));
    Arc::new(table)
});

/// One named material and its R-value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Lookup key (e.g., "2-inch Polyiso Foam Board")
    pub name: String,

    /// Grouping for pick lists (e.g., "Insulation")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Thermal resistance in ft²·h·°F/BTU
    pub r_value: f64,
}

impl Material {
    /// Name with the R-value appended, as shown in pick lists
    pub fn display_name(&self) -> String {
        format!("{} (R={:.2})", self.name, self.r_value)
    }
}

#[derive(Deserialize)]
struct MaterialFile {
    #[serde(default)]
    material: Vec<Material>,
}

/// Immutable name → R-value mapping.
///
/// Entries keep the order they were listed in so pick lists read the same
/// way as the source file.
#[derive(Debug, Clone, Default)]
pub struct MaterialTable {
    entries: Vec<Material>,
    index: HashMap<String, usize>,
}

impl MaterialTable {
    /// The table shipped with the crate.
    pub fn builtin() -> Arc<MaterialTable> {
        Arc::clone(&*BUILTIN)
    }

    /// Build a table from already-parsed entries.
    ///
    /// Rejects blank or duplicate names and R-values that are not positive
    /// finite numbers.
    pub fn from_entries(entries: Vec<Material>) -> WallResult<Self> {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, material) in entries.iter().enumerate() {
            let name = material.name.trim();
            if name.is_empty() {
                return Err(WallError::material_table(format!(
                    "entry {} has an empty name",
                    i + 1
                )));
            }
            if !(material.r_value.is_finite() && material.r_value > 0.0) {
                return Err(WallError::material_table(format!(
                    "'{}' has R-value {}; R-values must be positive",
                    name, material.r_value
                )));
            }
            if index.insert(name.to_string(), i).is_some() {
                return Err(WallError::material_table(format!(
                    "'{}' is listed more than once",
                    name
                )));
            }
        }
        Ok(MaterialTable { entries, index })
    }

    /// Parse a table from TOML text.
    pub fn from_toml_str(text: &str) -> WallResult<Self> {
        let file: MaterialFile =
            toml::from_str(text).map_err(|e| WallError::material_table(e.to_string()))?;
        Self::from_entries(file.material)
    }

    /// Load a table from a TOML file on disk.
    pub fn load(path: &Path) -> WallResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            WallError::material_table(format!("cannot read '{}': {}", path.display(), e))
        })?;
        let table = Self::from_toml_str(&text)?;
        tracing::info!(
            path = %path.display(),
            materials = table.len(),
            "loaded material table"
        );
        Ok(table)
    }

    /// Look up a material by name. Surrounding whitespace is ignored.
    ///
    /// The listing form with the R-value appended ("1/2-inch Drywall
    /// (R=0.45)") is accepted as long as the appended value matches.
    pub fn get(&self, name: &str) -> Option<&Material> {
        let name = name.trim();
        if let Some(&i) = self.index.get(name) {
            return Some(&self.entries[i]);
        }
        let (base, _) = name.rsplit_once(" (R=")?;
        self.index
            .get(base.trim())
            .map(|&i| &self.entries[i])
            .filter(|material| material.display_name() == name)
    }

    /// Look up a material's R-value, failing with `UnknownMaterial`.
    pub fn r_value(&self, name: &str) -> WallResult<f64> {
        self.get(name)
            .map(|m| m.r_value)
            .ok_or_else(|| WallError::unknown_material(name.trim()))
    }

    /// All materials in listing order
    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.entries.iter()
    }

    /// Material at a 0-based listing position
    pub fn by_position(&self, position: usize) -> Option<&Material> {
        self.entries.get(position)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
