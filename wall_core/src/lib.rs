//! # wall_core - Composite Wall Heat Flow Engine
//!
//! `wall_core` computes steady-state heat flow through a layered wall. Layers
//! are either full-area (series) or split into side-by-side paths by area
//! (parallel, e.g. studs and cavity insulation). Their resistances are
//! accumulated together with the inside and outside air films into an
//! overall R-value, from which U-value and heat flow follow.
//!
//! ## Design Philosophy
//!
//! - **Validated construction**: layers only enter an [`Assembly`] through
//!   checked operations, so the calculation never sees bad data
//! - **All-or-nothing**: a rejected operation leaves the assembly untouched
//! - **Rich Errors**: structured [`WallError`] variants, JSON-serializable
//! - **No UI**: presentation code drives the core through [`Assembly`]
//!
//! ## Quick Start
//!
//! ```rust
//! use wall_core::{Assembly, BoundaryConditions, MaterialTable};
//!
//! let mut wall = Assembly::new("North wall", MaterialTable::builtin());
//! wall.add_series_layer(Some(13.0), None).unwrap();
//!
//! let result = wall.recompute(&BoundaryConditions::default()).unwrap();
//! println!("{}", result.summary());
//! ```
//!
//! ## Units
//!
//! US customary throughout: R in ft²·h·°F/BTU, temperatures in °F, area in
//! ft², heat flow in BTU/h.
//!
//! ## Modules
//!
//! - [`assembly`] - Layer list, add/remove operations, parallel layer builder
//! - [`layers`] - Series and parallel layer types
//! - [`resistance`] - Overall R-value accumulation
//! - [`heat_transfer`] - U-value, flux and total heat flow
//! - [`validation`] - Numeric parsing and R-value source checks
//! - [`materials`] - Material R-value table
//! - [`errors`] - Structured error types

pub mod assembly;
pub mod errors;
pub mod heat_transfer;
pub mod layers;
pub mod materials;
pub mod resistance;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use assembly::{Assembly, ParallelLayerBuilder};
pub use errors::{WallError, WallResult};
pub use heat_transfer::{BoundaryConditions, BoundaryInput, HeatTransferResult};
pub use layers::{Layer, LayerId, MaterialLabel};
pub use materials::{Material, MaterialTable};
