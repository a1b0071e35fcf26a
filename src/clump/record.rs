//! A single destructible body and everything derived from its field.

use glam::Vec2;

use crate::field::{MassProperties, ScalarField};
use crate::math::Transform2D;
use crate::mesh::{ClumpMesh, ColliderPolygon};

/// Opaque handle to a clump owned by a [`ClumpWorld`](super::ClumpWorld).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClumpId(pub u64);

/// Data handed to the physics collaborator after each rebuild.
#[derive(Clone, Copy, Debug)]
pub struct PhysicsHandoff<'a> {
    pub transform: Transform2D,
    pub mass: Option<MassProperties>,
    pub colliders: &'a [ColliderPolygon],
}

/// One clump: its field, placement and the derived mesh, mass and colliders.
#[derive(Clone, Debug)]
pub struct Clump {
    pub(crate) id: ClumpId,
    pub(crate) field: ScalarField,
    pub(crate) transform: Transform2D,
    pub(crate) mass: Option<MassProperties>,
    pub(crate) mesh: ClumpMesh,
    pub(crate) outlines: Vec<Vec<u32>>,
    pub(crate) colliders: Vec<ColliderPolygon>,
}

impl Clump {
    pub(crate) fn new(id: ClumpId, field: ScalarField, transform: Transform2D) -> Self {
        Self {
            id,
            field,
            transform,
            mass: None,
            mesh: ClumpMesh::default(),
            outlines: Vec::new(),
            colliders: Vec::new(),
        }
    }

    pub fn id(&self) -> ClumpId {
        self.id
    }

    pub fn field(&self) -> &ScalarField {
        &self.field
    }

    pub fn transform(&self) -> &Transform2D {
        &self.transform
    }

    /// Last computed mass; unchanged by passes that found no mass.
    pub fn mass(&self) -> Option<MassProperties> {
        self.mass
    }

    /// Center of mass in world space.
    pub fn world_center_of_mass(&self) -> Option<Vec2> {
        self.mass
            .map(|m| self.transform.transform_point(m.center_of_mass))
    }

    pub fn mesh(&self) -> &ClumpMesh {
        &self.mesh
    }

    /// Outline loops as mesh vertex indices.
    pub fn outlines(&self) -> &[Vec<u32>] {
        &self.outlines
    }

    pub fn colliders(&self) -> &[ColliderPolygon] {
        &self.colliders
    }

    pub fn physics(&self) -> PhysicsHandoff<'_> {
        PhysicsHandoff {
            transform: self.transform,
            mass: self.mass,
            colliders: &self.colliders,
        }
    }

    /// World position of grid cell `coord` (its corner node).
    pub fn cell_to_world(&self, coord: glam::IVec2, cell_size: f32) -> Vec2 {
        self.transform.transform_point(coord.as_vec2() * cell_size)
    }
}
