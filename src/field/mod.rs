//! Density field storage and analysis
//!
//! The field is the single source of truth for a clump. Regions, mass and
//! meshes are all derived from it after each edit and never stored back.

pub mod scalar_field;
pub mod region;
pub mod mass;
pub mod noise_fill;

pub use scalar_field::{ScalarField, ShiftResult};
pub use region::{Region, RegionAnalyzer};
pub use mass::{MassModel, MassProperties};
pub use noise_fill::NoiseFill;
