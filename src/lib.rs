//! Clump - destructible 2D density-field bodies
//!
//! A clump is a fixed-size grid of material density. Brush strokes add or
//! carve material, disconnected pieces split off into their own clumps, and
//! every surviving clump rebuilds its mass, marching-squares mesh and
//! collision outlines after each edit.

pub mod core;
pub mod math;
pub mod field;
pub mod brush;
pub mod mesh;
pub mod clump;
