// File: crates/indicator-core/src/domain.rs
// Summary: Domain resolver mapping a fractional domain rectangle to absolute pixel bounds.

use crate::spec::Domain;
use crate::types::CanvasSize;

/// Absolute pixel sub-rectangle a trace occupies inside the canvas, expressed
/// the same way as the canvas itself (size plus surrounding margins).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotArea {
    pub w: f64,
    pub h: f64,
    pub l: f64,
    pub r: f64,
    pub t: f64,
    pub b: f64,
}

impl PlotArea {
    /// Resolve a fractional domain against the canvas. Pure; the domain is
    /// range-checked upstream, so no failure modes here.
    pub fn resolve(canvas: &CanvasSize, domain: &Domain) -> Self {
        let iw = canvas.inner_w();
        let ih = canvas.inner_h();
        let [x0, x1] = domain.x;
        let [y0, y1] = domain.y;
        Self {
            w: iw * (x1 - x0),
            h: ih * (y1 - y0),
            l: canvas.l + iw * x0,
            r: canvas.r + iw * (1.0 - x1),
            t: canvas.t + ih * (1.0 - y1),
            b: canvas.b + ih * y0,
        }
    }

    /// Horizontal center in pixels.
    pub fn cx(&self) -> f64 {
        self.l + self.w / 2.0
    }

    /// Vertical center in pixels.
    pub fn cy(&self) -> f64 {
        self.t + self.h / 2.0
    }

    /// True when the rectangle has no drawable extent.
    pub fn is_degenerate(&self) -> bool {
        self.w <= f64::EPSILON || self.h <= f64::EPSILON
    }
}
