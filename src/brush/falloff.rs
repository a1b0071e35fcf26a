//! Falloff model and application of strokes to a field.

use glam::Vec2;

use crate::field::ScalarField;
use crate::math::{lerp, Transform2D};
use super::stroke::{BrushMode, BrushStroke};

/// Counts from one stroke application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditReport {
    /// In-range cells inside the stroke's bounding box
    pub cells_visited: usize,
    /// Cells whose density actually changed
    pub cells_changed: usize,
}

/// Applies add/cut falloff over a square block of cells.
#[derive(Debug, Clone, Copy)]
pub struct BrushEditor {
    max_weight: f32,
    cut_bias: f32,
}

impl BrushEditor {
    pub fn new(max_weight: f32, cut_bias: f32) -> Self {
        Self { max_weight, cut_bias }
    }

    /// New density for a cell holding `value` at `dist` cells from the brush center.
    ///
    /// Add pushes the value up toward `lerp(max, 0, t)`. Cut pushes it down toward
    /// `lerp(0, max, t) - cut_bias`, so carving bites harder near the center than
    /// adding builds up.
    pub fn falloff(&self, value: f32, dist: f32, radius: f32, rate: f32, mode: BrushMode) -> f32 {
        let t = dist / radius;
        let strength = lerp(self.max_weight, 0.0, t);

        let mut value = value;
        match mode {
            BrushMode::Add => {
                let target = lerp(self.max_weight, 0.0, t);
                if value < target {
                    value += strength * rate;
                }
            }
            BrushMode::Cut => {
                let target = (lerp(0.0, self.max_weight, t) - self.cut_bias)
                    .clamp(0.0, self.max_weight);
                if value > target {
                    value -= strength * rate;
                }
            }
        }
        value.clamp(0.0, self.max_weight)
    }

    /// Apply a stroke whose center is already in grid coordinates.
    pub fn apply(
        &self,
        field: &mut ScalarField,
        center: Vec2,
        radius: f32,
        rate: f32,
        mode: BrushMode,
    ) -> EditReport {
        let mut report = EditReport::default();
        if radius <= f32::EPSILON {
            log::warn!("Ignoring brush stroke with zero radius at {:?}", center);
            return report;
        }

        let (x_min, x_max) = box_span(center.x, radius, field.size());
        let (y_min, y_max) = box_span(center.y, radius, field.size());

        for x in x_min..x_max {
            for y in y_min..y_max {
                let Some(value) = field.get(x, y) else { continue };
                let dist = Vec2::new(x as f32, y as f32).distance(center);
                let updated = self.falloff(value, dist, radius, rate, mode);
                report.cells_visited += 1;
                if updated != value {
                    field.set(x, y, updated);
                    report.cells_changed += 1;
                }
            }
        }

        log::trace!(
            "Brush {:?} r={} at {:?}: {} visited, {} changed",
            mode, radius, center, report.cells_visited, report.cells_changed
        );
        report
    }

    /// Apply a world-space stroke to a field placed by `transform`.
    pub fn apply_stroke(
        &self,
        field: &mut ScalarField,
        stroke: &BrushStroke,
        transform: &Transform2D,
        cell_size: f32,
    ) -> EditReport {
        let local = transform.inverse_transform_point(stroke.center) / cell_size;
        self.apply(field, local, stroke.radius, stroke.rate, stroke.mode)
    }
}

/// Grid cells `[min, max)` covered by a brush along one axis.
///
/// The box starts at `trunc(p) - trunc(radius)` and takes every `i` with
/// `i < start + 2 * radius + 1`, clipped to `[0, size)`. Computed in f32 so a
/// huge radius clamps instead of overflowing.
fn box_span(p: f32, radius: f32, size: usize) -> (i32, i32) {
    let size = size as f32;
    let start = p.trunc() - radius.trunc();
    let end = start + radius * 2.0 + 1.0;
    let min = start.clamp(0.0, size);
    // First integer not below `end`
    let max = end.ceil().clamp(min, size);
    (min as i32, max as i32)
}
