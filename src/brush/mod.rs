//! Circular brush edits on a density field
//!
//! A stroke either accretes material (positive radius) or carves it away
//! (negative radius) with a linear falloff from the brush center.

pub mod stroke;
pub mod falloff;

pub use stroke::{BrushMode, BrushStroke};
pub use falloff::{BrushEditor, EditReport};
