// File: crates/indicator-core/src/axis.rs
// Summary: Synthetic gauge axis: nice-step tick calculation, label formatting,
//          and the linear/angular coordinate transforms ticks are drawn with.

use std::f64::consts::PI;

use crate::mapper::PositionMapper;
use crate::spec::{GaugeAxisOpts, ValueRange};
use crate::types::TextAnchor;

/// One calculated tick: data value plus its rendered label.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub text: String,
}

/// Throwaway axis descriptor rebuilt every render from gauge-axis options and
/// the trace range. Tick layout is cheap relative to a full redraw, so
/// recomputing beats tracking staleness.
#[derive(Clone, Debug)]
pub struct AxisDescriptor {
    pub range: ValueRange,
    pub opts: GaugeAxisOpts,
}

impl AxisDescriptor {
    pub fn new(range: ValueRange, opts: GaugeAxisOpts) -> Self {
        Self { range, opts }
    }

    /// Generate ticks at nice values covering the range. Returns an empty
    /// list for an invisible axis or a degenerate range.
    pub fn calc_ticks(&self) -> Vec<Tick> {
        if !self.opts.visible {
            return Vec::new();
        }
        let (min, max) = (self.range.min, self.range.max);
        let span = max - min;
        if span <= f64::EPSILON {
            return Vec::new();
        }
        let step = nice_step(span, self.opts.nticks.max(2));
        let decimals = self
            .opts
            .tickformat
            .decimals
            .unwrap_or_else(|| decimals_for_step(step));

        let mut ticks = Vec::new();
        let mut k = (min / step).ceil();
        // tolerate float drift at the far end
        let limit = max + step * 1e-9;
        loop {
            let v = k * step;
            if v > limit {
                break;
            }
            // snap -0.0 and drift like 0.30000000000000004
            let v = (v / step).round() * step;
            ticks.push(Tick {
                value: v,
                text: format!(
                    "{}{:.*}{}",
                    self.opts.tickformat.prefix, decimals, v, self.opts.tickformat.suffix
                ),
            });
            k += 1.0;
        }
        ticks
    }

    /// Linear value-to-pixel transform over `[px0, px1]` (bullet regime).
    pub fn c2p(&self, px0: f64, px1: f64) -> PositionMapper {
        PositionMapper::new(self.range, px0, px1)
    }
}

/// 1-2-5 step selection: the largest nice step producing at most `nticks`
/// intervals over `span`.
pub fn nice_step(span: f64, nticks: usize) -> f64 {
    let raw = span / nticks as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let residual = raw / mag;
    let nice = if residual > 5.0 {
        10.0
    } else if residual > 2.0 {
        5.0
    } else if residual > 1.0 {
        2.0
    } else {
        1.0
    };
    nice * mag
}

/// Decimal places that render a step of this magnitude without noise.
fn decimals_for_step(step: f64) -> usize {
    if step >= 1.0 {
        return 0;
    }
    let d = (-step.log10()).ceil() as i64;
    d.clamp(0, 10) as usize
}

/// Polar transform for the angular regime: the half-circle runs from theta=PI
/// (range min, left) to theta=0 (range max, right), measured y-up from the
/// gauge center.
#[derive(Clone, Copy, Debug)]
pub struct PolarTransform {
    pub cx: f64,
    pub cy: f64,
}

impl PolarTransform {
    pub fn new(cx: f64, cy: f64) -> Self {
        Self { cx, cy }
    }

    /// Angle for a span fraction in [0, 1].
    pub fn theta(&self, frac: f64) -> f64 {
        PI * (1.0 - frac)
    }

    /// Screen point at `(theta, radius)` from the center (screen y grows
    /// downward, hence the sign flip).
    pub fn point(&self, theta: f64, radius: f64) -> (f64, f64) {
        (self.cx + radius * theta.cos(), self.cy - radius * theta.sin())
    }
}

/// Label anchor for a tick at `theta`: labels on the left half anchor at
/// their end, on the right half at their start, so they point away from the
/// arc and flip sides smoothly as they travel around it.
pub fn polar_label_anchor(theta: f64) -> TextAnchor {
    let c = theta.cos();
    if c.abs() < 1e-6 {
        TextAnchor::Middle
    } else if c < 0.0 {
        TextAnchor::End
    } else {
        TextAnchor::Start
    }
}

/// Extra vertical shift for a tick label at `theta`, keeping labels near the
/// apex clear of the arc.
pub fn polar_label_shift(theta: f64, font_size: f64) -> f64 {
    let s = theta.sin();
    if s > 1e-6 {
        // above the center line: pull the label further up
        -0.25 * font_size * s
    } else {
        0.75 * font_size
    }
}
