// File: crates/indicator-core/src/spec.rs
// Summary: Fully-defaulted indicator trace model: mode flags, number/delta/gauge options.
// Notes:
// - The engine assumes every field is already resolved; `Default` impls plus
//   the builder-ish setters below stand in for the upstream configuration
//   resolver in demos and tests.

use skia_safe as skia;

/// Which sub-elements this trace shows. Parsed from a `+`-joined mode string
/// ("number", "delta", "gauge" in any combination).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mode {
    pub number: bool,
    pub delta: bool,
    pub gauge: bool,
}

impl Mode {
    pub const NUMBER: Mode = Mode { number: true, delta: false, gauge: false };

    pub fn parse(s: &str) -> Self {
        let mut m = Mode { number: false, delta: false, gauge: false };
        for part in s.split('+') {
            match part.trim() {
                "number" => m.number = true,
                "delta" => m.delta = true,
                "gauge" => m.gauge = true,
                _ => {}
            }
        }
        m
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::NUMBER
    }
}

/// Fractional placement of the trace within the canvas.
/// Contract: `0 <= x[0] < x[1] <= 1`, same for `y` (range-checked upstream).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl Default for Domain {
    fn default() -> Self {
        Self { x: [0.0, 1.0], y: [0.0, 1.0] }
    }
}

/// Data range mapped onto the gauge span.
/// Contract: `max > min` for a non-degenerate gauge; `max == min` degrades to
/// a midpoint mapping (see `mapper`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl Default for ValueRange {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

/// Font options for a text sub-element. `size: None` means the layout planner
/// picks an automatic size from the available box.
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    pub size: Option<f64>,
    pub color: skia::Color,
}

impl Default for Font {
    fn default() -> Self {
        Self { size: None, color: skia::Color::from_argb(255, 42, 63, 95) }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Title {
    pub text: String,
    pub font: Font,
}

/// Numeric formatting shared by the big number, delta, and axis tick labels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValueFormat {
    /// Fixed decimal count; `None` lets the caller pick (ticks derive it from
    /// the step magnitude, number/delta default to 0).
    pub decimals: Option<usize>,
    pub prefix: String,
    pub suffix: String,
}

impl ValueFormat {
    pub fn format(&self, v: f64, default_decimals: usize) -> String {
        let d = self.decimals.unwrap_or(default_decimals);
        format!("{}{:.*}{}", self.prefix, d, v, self.suffix)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NumberOpts {
    pub valueformat: ValueFormat,
    pub font: Font,
}

/// Where the delta sits relative to the big number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeltaPosition {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

/// Symbol and color used for one delta direction.
#[derive(Clone, Debug, PartialEq)]
pub struct DeltaDirection {
    pub symbol: String,
    pub color: skia::Color,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DeltaOpts {
    /// Value the delta is measured against.
    pub reference: f64,
    /// Show the delta as a ratio of the reference instead of a difference.
    pub relative: bool,
    pub valueformat: ValueFormat,
    pub increasing: DeltaDirection,
    pub decreasing: DeltaDirection,
    pub position: DeltaPosition,
    pub font: Font,
}

impl Default for DeltaOpts {
    fn default() -> Self {
        Self {
            reference: 0.0,
            relative: false,
            valueformat: ValueFormat::default(),
            increasing: DeltaDirection {
                symbol: "\u{25b2}".to_string(),
                color: skia::Color::from_argb(255, 62, 168, 105),
            },
            decreasing: DeltaDirection {
                symbol: "\u{25bc}".to_string(),
                color: skia::Color::from_argb(255, 221, 76, 76),
            },
            position: DeltaPosition::Bottom,
            font: Font::default(),
        }
    }
}

impl DeltaOpts {
    /// Signed delta of `value` against the reference, as shown to the user.
    pub fn delta_of(&self, value: f64) -> f64 {
        let diff = value - self.reference;
        if self.relative {
            if self.reference.abs() < f64::EPSILON {
                0.0
            } else {
                diff / self.reference
            }
        } else {
            diff
        }
    }

    /// Rendered text for a delta amount (direction symbol plus magnitude).
    /// Takes the amount rather than the trace value so an animation clock can
    /// feed interpolated deltas through the same path.
    pub fn text_from_delta(&self, d: f64) -> String {
        let dir = if d >= 0.0 { &self.increasing } else { &self.decreasing };
        let shown = if self.relative { d.abs() * 100.0 } else { d.abs() };
        let suffix = if self.relative { "%" } else { "" };
        format!(
            "{}{}{}",
            dir.symbol,
            self.valueformat.format(shown, if self.relative { 1 } else { 0 }),
            suffix
        )
    }

    pub fn color_from_delta(&self, d: f64) -> skia::Color {
        if d >= 0.0 {
            self.increasing.color
        } else {
            self.decreasing.color
        }
    }

    /// Rendered delta text for the trace value.
    pub fn text_of(&self, value: f64) -> String {
        self.text_from_delta(self.delta_of(value))
    }

    pub fn color_of(&self, value: f64) -> skia::Color {
        self.color_from_delta(self.delta_of(value))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GaugeShape {
    #[default]
    Angular,
    Bullet,
}

/// Stroke applied around a filled shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Outline {
    pub color: skia::Color,
    pub width: f64,
}

impl Default for Outline {
    fn default() -> Self {
        Self { color: skia::Color::from_argb(255, 68, 68, 68), width: 0.0 }
    }
}

/// Colored background band behind the gauge's value shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub range: [f64; 2],
    pub color: skia::Color,
    pub line: Outline,
    /// Band thickness relative to the gauge band, in (0, 1].
    pub thickness: f64,
}

/// Single-value marker overlaid on the gauge.
#[derive(Clone, Debug, PartialEq)]
pub struct Threshold {
    pub value: f64,
    pub line: Outline,
    /// Marker length relative to the gauge band, in (0, 1].
    pub thickness: f64,
}

impl Default for Threshold {
    fn default() -> Self {
        Self {
            value: 0.0,
            line: Outline { color: skia::Color::from_argb(255, 68, 68, 68), width: 1.0 },
            thickness: 0.85,
        }
    }
}

/// Gauge axis options; tick generation itself lives in `axis`.
#[derive(Clone, Debug, PartialEq)]
pub struct GaugeAxisOpts {
    pub visible: bool,
    /// Upper bound on generated ticks; the nice-step search may return fewer.
    pub nticks: usize,
    pub tickformat: ValueFormat,
    pub ticklen: f64,
    pub tickwidth: f64,
    pub tickcolor: skia::Color,
    pub tickfont: Font,
}

impl Default for GaugeAxisOpts {
    fn default() -> Self {
        Self {
            visible: true,
            nticks: 6,
            tickformat: ValueFormat::default(),
            ticklen: 6.0,
            tickwidth: 1.0,
            tickcolor: skia::Color::from_argb(255, 68, 68, 68),
            tickfont: Font::default(),
        }
    }
}

/// The moving value shape (arc for angular, bar for bullet).
#[derive(Clone, Debug, PartialEq)]
pub struct ValueBar {
    pub color: skia::Color,
    pub line: Outline,
    /// Shape thickness relative to the gauge band, in (0, 1].
    pub thickness: f64,
}

impl Default for ValueBar {
    fn default() -> Self {
        Self {
            color: skia::Color::from_argb(255, 51, 102, 204),
            line: Outline::default(),
            thickness: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GaugeOpts {
    pub shape: GaugeShape,
    pub bgcolor: skia::Color,
    pub border: Outline,
    pub axis: GaugeAxisOpts,
    pub bar: ValueBar,
    pub steps: Vec<Step>,
    pub threshold: Option<Threshold>,
}

impl Default for GaugeOpts {
    fn default() -> Self {
        Self {
            shape: GaugeShape::Angular,
            bgcolor: skia::Color::from_argb(0, 0, 0, 0),
            border: Outline { color: skia::Color::from_argb(255, 68, 68, 68), width: 1.0 },
            axis: GaugeAxisOpts::default(),
            bar: ValueBar::default(),
            steps: Vec::new(),
            threshold: None,
        }
    }
}

/// One fully-defaulted indicator trace, immutable per render call.
#[derive(Clone, Debug, PartialEq)]
pub struct IndicatorSpec {
    /// Stable identity across renders; keys the per-trace `RenderState`.
    pub uid: String,
    pub mode: Mode,
    pub value: f64,
    pub range: ValueRange,
    pub domain: Domain,
    pub title: Option<Title>,
    pub number: NumberOpts,
    pub delta: DeltaOpts,
    pub gauge: Option<GaugeOpts>,
}

impl IndicatorSpec {
    pub fn new(uid: impl Into<String>, value: f64) -> Self {
        Self {
            uid: uid.into(),
            mode: Mode::default(),
            value,
            range: ValueRange::default(),
            domain: Domain::default(),
            title: None,
            number: NumberOpts::default(),
            delta: DeltaOpts::default(),
            gauge: None,
        }
    }

    pub fn with_mode(mut self, mode: &str) -> Self {
        self.mode = Mode::parse(mode);
        self
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.range = ValueRange { min, max };
        self
    }

    pub fn with_domain(mut self, x: [f64; 2], y: [f64; 2]) -> Self {
        self.domain = Domain { x, y };
        self
    }

    pub fn with_title(mut self, text: impl Into<String>) -> Self {
        self.title = Some(Title { text: text.into(), font: Font::default() });
        self
    }

    pub fn with_gauge(mut self, gauge: GaugeOpts) -> Self {
        self.gauge = Some(gauge);
        if !self.mode.gauge {
            self.mode.gauge = true;
        }
        self
    }

    pub fn with_delta_reference(mut self, reference: f64) -> Self {
        self.delta.reference = reference;
        self
    }

    /// Effective flags: the gauge only shows when both the mode asks for it
    /// and gauge options are present.
    pub fn shows_gauge(&self) -> bool {
        self.mode.gauge && self.gauge.is_some()
    }

    pub fn gauge_shape(&self) -> Option<GaugeShape> {
        if self.shows_gauge() {
            self.gauge.as_ref().map(|g| g.shape)
        } else {
            None
        }
    }

    /// Rendered big-number text for a (possibly interpolated) value.
    pub fn number_text(&self, v: f64) -> String {
        self.number.valueformat.format(v, 0)
    }
}
