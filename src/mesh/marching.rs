//! Marching-squares triangulation of a density field.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::Serialize;

use crate::field::ScalarField;
use super::grid::SquareGrid;
use super::node::NodeId;

/// Interleaved vertex for GPU upload.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// Triangle mesh of one clump in local space.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ClumpMesh {
    pub positions: Vec<Vec2>,
    /// Grey level `weight / max_weight` in every channel
    pub colors: Vec<[f32; 4]>,
    /// Three indices per triangle
    pub indices: Vec<u32>,
}

impl ClumpMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Triangles as index triples, in emission order.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Vertices interleaved for a vertex buffer (z = 0).
    pub fn gpu_vertices(&self) -> Vec<MeshVertex> {
        self.positions
            .iter()
            .zip(&self.colors)
            .map(|(p, c)| MeshVertex { position: [p.x, p.y, 0.0], color: *c })
            .collect()
    }

    /// Raw bytes of the index buffer.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Builds a [`ClumpMesh`] from a field.
#[derive(Clone, Copy, Debug)]
pub struct IsosurfaceMesher {
    surface: f32,
    max_weight: f32,
    cell_size: f32,
}

impl IsosurfaceMesher {
    pub fn new(surface: f32, max_weight: f32, cell_size: f32) -> Self {
        Self { surface, max_weight, cell_size }
    }

    /// Triangulate every square of the field.
    pub fn build(&self, field: &ScalarField) -> ClumpMesh {
        let mut builder = MeshBuilder {
            grid: SquareGrid::new(field, self.cell_size, self.surface),
            max_weight: self.max_weight,
            mesh: ClumpMesh::default(),
        };

        for i in 0..builder.grid.squares.len() {
            let square = builder.grid.squares[i];
            let points: Vec<NodeId> = square.points().collect();
            builder.mesh_from_points(&points);
        }

        let mesh = builder.mesh;
        log::trace!(
            "Meshed {}x{} field: {} vertices, {} triangles",
            field.size(), field.size(), mesh.vertex_count(), mesh.triangle_count()
        );
        mesh
    }
}

struct MeshBuilder {
    grid: SquareGrid,
    max_weight: f32,
    mesh: ClumpMesh,
}

impl MeshBuilder {
    fn mesh_from_points(&mut self, points: &[NodeId]) {
        let indices: Vec<u32> = points.iter().map(|&id| self.assign_vertex(id)).collect();

        match indices.len() {
            0..=2 => {}
            6 => {
                self.push_triangle(indices[0], indices[1], indices[2]);
                self.push_triangle(indices[3], indices[4], indices[5]);
            }
            n => {
                // Fan around the first point
                for i in 1..n - 1 {
                    self.push_triangle(indices[0], indices[i], indices[i + 1]);
                }
            }
        }
    }

    /// Vertex index of a node, emitting it on first use.
    fn assign_vertex(&mut self, id: NodeId) -> u32 {
        let node = self.grid.nodes.get_mut(id);
        if let Some(index) = node.vertex_index {
            return index;
        }

        let index = self.mesh.positions.len() as u32;
        node.vertex_index = Some(index);
        self.mesh.positions.push(node.position);
        let shade = node.weight / self.max_weight;
        self.mesh.colors.push([shade; 4]);
        index
    }

    fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.mesh.indices.extend_from_slice(&[a, b, c]);
    }
}
