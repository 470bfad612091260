// File: crates/indicator-core/src/mapper.rs
// Summary: Pure value-to-angle and value-to-position mappers, clamped to the gauge range.

use std::f64::consts::PI;

use crate::spec::ValueRange;
use crate::types::clamp;

/// Maps `[min, max]` onto `[-PI/2, PI/2]`, the rotation of a half-circle
/// gauge needle/arc. Rebuilt fresh every render, never mutated.
#[derive(Clone, Copy, Debug)]
pub struct AngleMapper {
    min: f64,
    max: f64,
}

impl AngleMapper {
    pub fn new(range: ValueRange) -> Self {
        Self { min: range.min, max: range.max }
    }

    /// Rotation angle for `v`. Out-of-range input saturates at the boundary;
    /// a degenerate range maps everything to the midpoint.
    pub fn angle(&self, v: f64) -> f64 {
        self.fraction(v) * PI - PI / 2.0
    }

    /// Position of `v` along the gauge span as a fraction in [0, 1].
    pub fn fraction(&self, v: f64) -> f64 {
        let span = self.max - self.min;
        if span <= f64::EPSILON {
            return 0.5;
        }
        (clamp(v, self.min, self.max) - self.min) / span
    }
}

/// Linear value-to-pixel transform along a bullet gauge's axis span
/// (`c2p` in axis terms). Clamps like the angle mapper.
#[derive(Clone, Copy, Debug)]
pub struct PositionMapper {
    min: f64,
    max: f64,
    px0: f64,
    px1: f64,
}

impl PositionMapper {
    pub fn new(range: ValueRange, px0: f64, px1: f64) -> Self {
        Self { min: range.min, max: range.max, px0, px1 }
    }

    pub fn position(&self, v: f64) -> f64 {
        let span = self.max - self.min;
        if span <= f64::EPSILON {
            return (self.px0 + self.px1) / 2.0;
        }
        let f = (clamp(v, self.min, self.max) - self.min) / span;
        self.px0 + f * (self.px1 - self.px0)
    }

    pub fn span(&self) -> (f64, f64) {
        (self.px0, self.px1)
    }
}
