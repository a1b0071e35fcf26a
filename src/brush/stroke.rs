//! Brush stroke representation

use glam::Vec2;

use crate::core::{Error, Result};

/// Whether a stroke adds or removes density
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrushMode {
    #[default]
    Add,
    Cut,
}

/// A single circular stroke in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushStroke {
    /// World-space center
    pub center: Vec2,
    /// Radius magnitude in grid cells
    pub radius: f32,
    /// Fraction of the falloff strength applied per stroke
    pub rate: f32,
    pub mode: BrushMode,
}

impl BrushStroke {
    /// Create a stroke from a signed radius: positive adds, negative cuts.
    pub fn from_signed(center: Vec2, radius: f32, rate: f32) -> Result<Self> {
        if !center.is_finite() {
            return Err(Error::InvalidBrush(format!("non-finite center {:?}", center)));
        }
        if !radius.is_finite() || !rate.is_finite() {
            return Err(Error::InvalidBrush(format!(
                "non-finite radius {} or rate {}",
                radius, rate
            )));
        }
        let mode = if radius < 0.0 { BrushMode::Cut } else { BrushMode::Add };
        Ok(Self {
            center,
            radius: radius.abs(),
            rate,
            mode,
        })
    }

    /// Create an additive stroke
    pub fn add(center: Vec2, radius: f32, rate: f32) -> Self {
        Self { center, radius: radius.abs(), rate, mode: BrushMode::Add }
    }

    /// Create a carving stroke
    pub fn cut(center: Vec2, radius: f32, rate: f32) -> Self {
        Self { center, radius: radius.abs(), rate, mode: BrushMode::Cut }
    }

    /// Radius with the mode folded back into its sign.
    pub fn signed_radius(&self) -> f32 {
        match self.mode {
            BrushMode::Add => self.radius,
            BrushMode::Cut => -self.radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_selects_mode() {
        let add = BrushStroke::from_signed(Vec2::ZERO, 4.0, 0.125).unwrap();
        assert_eq!(add.mode, BrushMode::Add);
        assert_eq!(add.radius, 4.0);

        let cut = BrushStroke::from_signed(Vec2::ZERO, -4.0, 0.125).unwrap();
        assert_eq!(cut.mode, BrushMode::Cut);
        assert_eq!(cut.radius, 4.0);
        assert_eq!(cut.signed_radius(), -4.0);
    }

    #[test]
    fn test_non_finite_input_rejected() {
        assert!(BrushStroke::from_signed(Vec2::new(f32::NAN, 0.0), 1.0, 1.0).is_err());
        assert!(BrushStroke::from_signed(Vec2::ZERO, f32::INFINITY, 1.0).is_err());
        assert!(BrushStroke::from_signed(Vec2::ZERO, 1.0, f32::NAN).is_err());
    }
}
