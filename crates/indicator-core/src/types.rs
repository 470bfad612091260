// File: crates/indicator-core/src/types.rs
// Summary: Shared types and constants (canvas size, margins, anchors).

/// Default surface width in pixels.
pub const WIDTH: i32 = 1024;
/// Default surface height in pixels.
pub const HEIGHT: i32 = 640;

/// Full chart canvas: outer size plus the margins reserved around the plot
/// region. All indicator domains are fractions of the inner (margin-free)
/// width/height.
/// Contract: all fields are non-negative, `w > l + r`, `h > t + b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasSize {
    pub w: f64,
    pub h: f64,
    pub l: f64,
    pub r: f64,
    pub t: f64,
    pub b: f64,
}

impl CanvasSize {
    pub const fn new(w: f64, h: f64, l: f64, r: f64, t: f64, b: f64) -> Self {
        Self { w, h, l, r, t, b }
    }

    /// Canvas with no margins.
    pub const fn bare(w: f64, h: f64) -> Self {
        Self { w, h, l: 0.0, r: 0.0, t: 0.0, b: 0.0 }
    }

    /// Inner width available to trace domains.
    pub fn inner_w(&self) -> f64 {
        self.w - self.l - self.r
    }

    /// Inner height available to trace domains.
    pub fn inner_h(&self) -> f64 {
        self.h - self.t - self.b
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::bare(WIDTH as f64, HEIGHT as f64)
    }
}

/// Horizontal text anchor relative to the layout point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[inline]
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}
