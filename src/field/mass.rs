//! Mass and center of mass from field density.

use glam::Vec2;

use super::scalar_field::ScalarField;

/// Values handed to the physics collaborator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MassProperties {
    /// Sum of solid cell densities
    pub mass: f32,
    /// Density-weighted mean position in local world units
    pub center_of_mass: Vec2,
}

/// Integrates solid cells of a field into mass properties.
#[derive(Clone, Copy, Debug)]
pub struct MassModel {
    surface: f32,
    cell_size: f32,
}

impl MassModel {
    pub fn new(surface: f32, cell_size: f32) -> Self {
        Self { surface, cell_size }
    }

    /// Returns `None` when no cell is above the surface threshold.
    pub fn calculate(&self, field: &ScalarField) -> Option<MassProperties> {
        let mut mass = 0.0f32;
        let mut moment = Vec2::ZERO;
        for (coord, density) in field.solid_cells(self.surface) {
            mass += density;
            moment += coord.as_vec2() * density;
        }

        if mass == 0.0 {
            return None;
        }

        Some(MassProperties {
            mass,
            center_of_mass: moment / mass * self.cell_size,
        })
    }
}
