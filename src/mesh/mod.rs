//! Marching-squares meshing and outline extraction
//!
//! `IsosurfaceMesher` turns a field into a vertex-colored triangle mesh;
//! `OutlineTracer` walks that mesh's boundary to produce collision polygons.

pub mod node;
pub mod grid;
pub mod marching;
pub mod outline;

pub use node::{ControlNode, EdgeDir, EdgeKey, Node, NodeArena, NodeId};
pub use grid::{Square, SquareGrid};
pub use marching::{ClumpMesh, IsosurfaceMesher, MeshVertex};
pub use outline::{collider_polygons, ColliderPolygon, OutlineTracer, Triangle};
