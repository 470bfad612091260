// File: crates/indicator-core/src/layout.rs
// Summary: Layout planner: per-element position, anchor and font size, gauge
//          geometry, and the fit-to-box text scale.

use crate::axis::PolarTransform;
use crate::domain::PlotArea;
use crate::spec::{DeltaPosition, GaugeShape, IndicatorSpec};
use crate::text::TextMeasurer;
use crate::types::TextAnchor;

/// Minimum box extent before the fit pass treats it as collapsed.
const EPS: f64 = 1e-9;
/// Fraction of the outer radius occupied by the angular gauge band.
const ANGULAR_BAND_FRACTION: f64 = 0.25;
/// Fraction of the trace width reserved for the number block on bullet gauges.
const BULLET_NUMBER_FRACTION: f64 = 0.35;
/// Bullet bar height as a fraction of the content height.
const BULLET_BAR_FRACTION: f64 = 0.35;
/// Vertical room (in title font sizes) reserved above the content for a title.
const TITLE_RESERVE: f64 = 1.6;
/// Gap between an inline delta and the number, in delta font sizes.
const INLINE_DELTA_GAP: f64 = 0.4;

/// Positioned text element. `y` is the baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextBlock {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub anchor: TextAnchor,
}

/// Angular gauge geometry: half-circle centered on `transform`, band between
/// `inner` and `radius`.
#[derive(Clone, Copy, Debug)]
pub struct AngularGauge {
    pub transform: PolarTransform,
    pub radius: f64,
    pub inner: f64,
}

impl AngularGauge {
    pub fn band(&self) -> f64 {
        self.radius - self.inner
    }

    /// Radial extent of a shape with the given relative thickness, anchored
    /// at the inner edge of the band.
    pub fn band_radii(&self, thickness: f64) -> (f64, f64) {
        (self.inner, self.inner + self.band() * thickness.clamp(0.0, 1.0))
    }
}

/// Bullet gauge geometry: full band rectangle; the axis runs along the bottom
/// edge from `x0` to `x1`.
#[derive(Clone, Copy, Debug)]
pub struct BulletGauge {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

impl BulletGauge {
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Vertical extent of a shape with the given relative thickness, centered
    /// in the band.
    pub fn band_rect(&self, thickness: f64) -> (f64, f64) {
        let h = self.height() * thickness.clamp(0.0, 1.0);
        let mid = (self.y0 + self.y1) / 2.0;
        (mid - h / 2.0, mid + h / 2.0)
    }
}

#[derive(Clone, Copy, Debug)]
pub enum GaugeLayout {
    Angular(AngularGauge),
    Bullet(BulletGauge),
}

/// Everything the scene composer needs, recomputed every render and owned by
/// the current render pass only.
#[derive(Clone, Debug)]
pub struct ComputedLayout {
    pub area: PlotArea,
    pub title: Option<TextBlock>,
    pub number: Option<TextBlock>,
    pub delta: Option<TextBlock>,
    /// Uniform fit-to-box factor applied to the number/delta block, always <= 1.
    pub text_scale: f64,
    /// Point the fit scale is applied about.
    pub scale_origin: (f64, f64),
    pub gauge: Option<GaugeLayout>,
}

/// Plan the full layout for one trace. Pure over its inputs; a degenerate
/// area degrades to zero-sized, invisible elements rather than failing.
pub fn plan(spec: &IndicatorSpec, area: PlotArea, measurer: &dyn TextMeasurer) -> ComputedLayout {
    let shape = spec.gauge_shape();
    let is_bullet = shape == Some(GaugeShape::Bullet);

    // Title reservation shrinks the content box for everything else.
    let title_size = spec
        .title
        .as_ref()
        .and_then(|t| t.font.size)
        .unwrap_or((area.h * 0.10).max(8.0));
    let reserve = match &spec.title {
        Some(_) if !is_bullet => title_size * TITLE_RESERVE,
        _ => 0.0,
    };
    let content_t = area.t + reserve;
    let content_h = (area.h - reserve).max(0.0);

    let title = spec.title.as_ref().map(|_| {
        if is_bullet {
            TextBlock {
                x: area.l,
                y: area.t + area.h / 2.0 + title_size * 0.35,
                size: title_size,
                anchor: TextAnchor::Start,
            }
        } else {
            TextBlock {
                x: area.cx(),
                y: area.t + title_size,
                size: title_size,
                anchor: TextAnchor::Middle,
            }
        }
    });

    let gauge = match shape {
        Some(GaugeShape::Angular) => {
            let radius = (area.w / 2.0).min(content_h).max(0.0);
            Some(GaugeLayout::Angular(AngularGauge {
                transform: PolarTransform::new(area.cx(), content_t + content_h),
                radius,
                inner: radius * (1.0 - ANGULAR_BAND_FRACTION),
            }))
        }
        Some(GaugeShape::Bullet) => {
            let left = if spec.mode.number || spec.mode.delta {
                area.w * BULLET_NUMBER_FRACTION
            } else {
                0.0
            };
            let bar_h = content_h * BULLET_BAR_FRACTION;
            let mid = content_t + content_h / 2.0;
            Some(GaugeLayout::Bullet(BulletGauge {
                x0: area.l + left,
                x1: area.l + area.w,
                y0: mid - bar_h / 2.0,
                y1: mid + bar_h / 2.0,
            }))
        }
        None => None,
    };

    // Number font size and anchor depend on the gauge shape.
    let auto_number_size = match &gauge {
        None => {
            let digits = spec.number_text(spec.range.max).chars().count().max(1) as f64;
            (area.w / digits).max(content_h / 3.0)
        }
        Some(GaugeLayout::Angular(g)) => g.inner * 0.5,
        Some(GaugeLayout::Bullet(g)) => g.height() * 0.9,
    };
    let number_size = spec.number.font.size.unwrap_or(auto_number_size).max(0.0);
    let delta_size = spec
        .delta
        .font
        .size
        .unwrap_or(if spec.mode.number { number_size * 0.5 } else { number_size })
        .max(0.0);

    let number_pos = match &gauge {
        None => (area.cx(), content_t + content_h / 2.0 + number_size * 0.35),
        Some(GaugeLayout::Angular(g)) => (g.transform.cx, g.transform.cy),
        Some(GaugeLayout::Bullet(g)) => {
            let block_w = g.x0 - area.l;
            (area.l + block_w / 2.0, (g.y0 + g.y1) / 2.0 + number_size * 0.35)
        }
    };

    let number = spec.mode.number.then_some(TextBlock {
        x: number_pos.0,
        y: number_pos.1,
        size: number_size,
        anchor: TextAnchor::Middle,
    });

    let delta = spec.mode.delta.then(|| {
        place_delta(spec, number, number_pos, number_size, delta_size, measurer)
    });

    // Fit-to-box pass over the composed number/delta block.
    let (max_w, max_h) = match &gauge {
        None => (area.w, content_h),
        Some(GaugeLayout::Angular(g)) => (g.inner * 1.8, g.inner),
        Some(GaugeLayout::Bullet(g)) => ((g.x0 - area.l) * 0.9, content_h),
    };
    let (box_w, box_h) = text_block_extent(spec, number, delta, measurer);
    let text_scale = fit_scale(box_w, box_h, max_w, max_h);

    ComputedLayout {
        area,
        title,
        number,
        delta,
        text_scale,
        scale_origin: number_pos,
        gauge,
    }
}

/// Four placement policies keyed by `delta.position`: stacked above or below
/// the number, or inline to its left/right with a fixed gap. With no number
/// shown the delta takes the number's spot.
fn place_delta(
    spec: &IndicatorSpec,
    number: Option<TextBlock>,
    number_pos: (f64, f64),
    number_size: f64,
    delta_size: f64,
    measurer: &dyn TextMeasurer,
) -> TextBlock {
    let (nx, ny) = number_pos;
    let Some(num) = number else {
        return TextBlock { x: nx, y: ny, size: delta_size, anchor: TextAnchor::Middle };
    };
    let gap = delta_size * INLINE_DELTA_GAP;
    match spec.delta.position {
        DeltaPosition::Top => TextBlock {
            x: nx,
            y: num.y - number_size * 1.0,
            size: delta_size,
            anchor: TextAnchor::Middle,
        },
        DeltaPosition::Bottom => TextBlock {
            x: nx,
            y: num.y + delta_size * 1.2,
            size: delta_size,
            anchor: TextAnchor::Middle,
        },
        DeltaPosition::Left => {
            let (num_w, _) = measurer.measure(&spec.number_text(spec.value), number_size);
            TextBlock {
                x: nx - num_w / 2.0 - gap,
                y: num.y,
                size: delta_size,
                anchor: TextAnchor::End,
            }
        }
        DeltaPosition::Right => {
            let (num_w, _) = measurer.measure(&spec.number_text(spec.value), number_size);
            TextBlock {
                x: nx + num_w / 2.0 + gap,
                y: num.y,
                size: delta_size,
                anchor: TextAnchor::Start,
            }
        }
    }
}

/// Bounding extent of the rendered number/delta block, before scaling.
fn text_block_extent(
    spec: &IndicatorSpec,
    number: Option<TextBlock>,
    delta: Option<TextBlock>,
    measurer: &dyn TextMeasurer,
) -> (f64, f64) {
    let mut w: f64 = 0.0;
    let mut h: f64 = 0.0;
    let stacked = matches!(spec.delta.position, DeltaPosition::Top | DeltaPosition::Bottom);
    let num_ext = number.map(|b| measurer.measure(&spec.number_text(spec.value), b.size));
    let delta_ext = delta.map(|b| measurer.measure(&spec.delta.text_of(spec.value), b.size));
    match (num_ext, delta_ext) {
        (Some((nw, nh)), Some((dw, dh))) => {
            if stacked {
                w = nw.max(dw);
                h = nh + dh;
            } else {
                w = nw + dw;
                h = nh.max(dh);
            }
        }
        (Some((nw, nh)), None) | (None, Some((nw, nh))) => {
            w = nw;
            h = nh;
        }
        (None, None) => {}
    }
    (w, h)
}

/// Uniform shrink factor `min(max_w/box_w, max_h/box_h)`, capped at 1 (never
/// upscale). Collapsed target boxes yield 0 (invisible); an empty text block
/// yields 1 so absent text never zeroes the transform.
pub fn fit_scale(box_w: f64, box_h: f64, max_w: f64, max_h: f64) -> f64 {
    if box_w <= EPS || box_h <= EPS {
        return 1.0;
    }
    if max_w <= EPS || max_h <= EPS {
        return 0.0;
    }
    (max_w / box_w).min(max_h / box_h).min(1.0)
}
