//! Noise-based initial density generation

use noise::{NoiseFn, Perlin};

use crate::core::NoiseParams;
use super::scalar_field::ScalarField;

/// Fills a fresh field from smooth coherent noise.
pub struct NoiseFill {
    params: NoiseParams,
    noise: Perlin,
}

impl NoiseFill {
    pub fn new(params: NoiseParams) -> Self {
        let noise = Perlin::new(params.seed);
        Self { params, noise }
    }

    pub fn params(&self) -> &NoiseParams {
        &self.params
    }

    /// Noise sample remapped from [-1, 1] to [0, 1].
    fn sample01(&self, x: f32, y: f32) -> f32 {
        let v = self.noise.get([x as f64, y as f64]);
        ((v + 1.0) * 0.5).clamp(0.0, 1.0) as f32
    }

    /// Density for cell `(x, y)` of a `size`-wide grid, before clamping.
    pub fn density_at(&self, x: usize, y: usize, size: usize) -> f32 {
        let p = &self.params;
        let nx = x as f32 / size as f32 * p.scale + p.offset.x;
        let ny = y as f32 / size as f32 * p.scale + p.offset.y;
        self.sample01(nx, ny) * p.magnitude + p.fill
    }

    /// Generate a `size` x `size` field clamped to `[0, max_weight]`.
    pub fn generate(&self, size: usize, max_weight: f32) -> ScalarField {
        let field = ScalarField::from_fn(size, max_weight, |x, y| self.density_at(x, y, size));
        log::debug!(
            "Generated {}x{} field, total density {:.1}",
            size, size, field.total_density()
        );
        field
    }
}
