//! Boundary loops of a triangle mesh and the collision polygons built from them.

use glam::Vec2;
use serde::Serialize;

use super::marching::ClumpMesh;

/// Three vertex indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Triangle {
    pub vertices: [u32; 3],
}

impl Triangle {
    pub fn contains(&self, vertex: u32) -> bool {
        self.vertices.contains(&vertex)
    }
}

/// Closed polygon in clump-local space; the first point is repeated at the end.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ColliderPolygon {
    pub points: Vec<Vec2>,
}

/// Traces closed outline loops: sequences of vertices joined by edges that
/// belong to exactly one triangle.
pub struct OutlineTracer<'a> {
    triangles: Vec<Triangle>,
    /// Vertex -> triangles containing it, in emission order
    by_vertex: Vec<Vec<usize>>,
    checked: Vec<bool>,
    mesh: &'a ClumpMesh,
}

impl<'a> OutlineTracer<'a> {
    pub fn new(mesh: &'a ClumpMesh) -> Self {
        let triangles: Vec<Triangle> = mesh
            .triangles()
            .map(|vertices| Triangle { vertices })
            .collect();

        let mut by_vertex = vec![Vec::new(); mesh.vertex_count()];
        for (i, triangle) in triangles.iter().enumerate() {
            for &v in &triangle.vertices {
                by_vertex[v as usize].push(i);
            }
        }

        Self {
            triangles,
            by_vertex,
            checked: vec![false; mesh.vertex_count()],
            mesh,
        }
    }

    /// All outline loops, each closed by repeating its first vertex.
    pub fn trace(mut self) -> Vec<Vec<u32>> {
        let mut outlines = Vec::new();

        for start in 0..self.mesh.vertex_count() as u32 {
            if self.checked[start as usize] {
                continue;
            }
            let Some(mut next) = self.connected_outline_vertex(start) else {
                continue;
            };

            self.checked[start as usize] = true;
            let mut outline = vec![start];
            loop {
                outline.push(next);
                self.checked[next as usize] = true;
                match self.connected_outline_vertex(next) {
                    Some(v) => next = v,
                    None => break,
                }
            }
            outline.push(start);
            outlines.push(outline);
        }

        log::trace!("Traced {} outline loops", outlines.len());
        outlines
    }

    /// First unchecked vertex joined to `vertex` by an outline edge.
    fn connected_outline_vertex(&self, vertex: u32) -> Option<u32> {
        for &t in &self.by_vertex[vertex as usize] {
            for &other in &self.triangles[t].vertices {
                if other != vertex
                    && !self.checked[other as usize]
                    && self.is_outline_edge(vertex, other)
                {
                    return Some(other);
                }
            }
        }
        None
    }

    fn is_outline_edge(&self, a: u32, b: u32) -> bool {
        let shared = self.by_vertex[a as usize]
            .iter()
            .filter(|&&t| self.triangles[t].contains(b))
            .take(2)
            .count();
        shared == 1
    }
}

/// Turn outline loops into local-space collision polygons.
pub fn collider_polygons(mesh: &ClumpMesh, outlines: &[Vec<u32>]) -> Vec<ColliderPolygon> {
    outlines
        .iter()
        .map(|outline| ColliderPolygon {
            points: outline.iter().map(|&v| mesh.positions[v as usize]).collect(),
        })
        .collect()
}
