// File: crates/indicator-core/src/indicator.rs
// Summary: Engine facade: per-trace render state, scene composition for all
//          element categories, and animation-clock plumbing.

use std::collections::HashMap;

use crate::axis::{polar_label_anchor, polar_label_shift, AxisDescriptor};
use crate::domain::PlotArea;
use crate::layout::{self, AngularGauge, BulletGauge, ComputedLayout, GaugeLayout};
use crate::mapper::AngleMapper;
use crate::scene::{Category, Scene, SceneFragment, Shape, Stroke};
use crate::spec::{GaugeOpts, IndicatorSpec};
use crate::text::TextMeasurer;
use crate::transition::{
    CompletionCallback, Sample, Transition, TransitionGroup, TransitionOptions,
};
use crate::types::{CanvasSize, TextAnchor};

/// Values surviving across renders of one trace, mutated only at transition
/// commit points. Both start at 0 so the first animated render sweeps up
/// from zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderState {
    pub last_value: f64,
    pub last_delta_value: f64,
}

/// Snapshot the animation clock redraws animated nodes from. The spec and
/// layout of the render that started the transitions stay valid until the
/// next render supersedes them.
struct Snapshot {
    spec: IndicatorSpec,
    layout: ComputedLayout,
}

/// Engine instance for one indicator trace. Owns the trace's `RenderState`
/// and one transition state machine per animatable element group.
pub struct Indicator {
    state: RenderState,
    number_tr: Transition,
    delta_tr: Transition,
    gauge_tr: Transition,
    snapshot: Option<Snapshot>,
}

impl Indicator {
    pub fn new() -> Self {
        Self {
            state: RenderState::default(),
            number_tr: Transition::new(TransitionGroup::Number),
            delta_tr: Transition::new(TransitionGroup::Delta),
            gauge_tr: Transition::new(TransitionGroup::GaugeValue),
            snapshot: None,
        }
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn is_animating(&self) -> bool {
        self.number_tr.is_animating()
            || self.delta_tr.is_animating()
            || self.gauge_tr.is_animating()
    }

    /// Interrupt all in-flight transitions, firing their callbacks. Values
    /// are not committed.
    pub fn cancel(&mut self) {
        self.number_tr.cancel();
        self.delta_tr.cancel();
        self.gauge_tr.cancel();
    }

    /// Render one trace into a scene fragment. With a positive transition
    /// duration the animated elements are composed at their last committed
    /// values and transitions toward the new value are started; otherwise the
    /// final value renders synchronously and commits immediately.
    pub fn render(
        &mut self,
        spec: &IndicatorSpec,
        canvas: &CanvasSize,
        measurer: &dyn TextMeasurer,
        transition: Option<&TransitionOptions>,
        on_complete: Option<CompletionCallback>,
    ) -> SceneFragment {
        // A new render supersedes any in-flight transition before anything
        // else happens.
        self.cancel();

        let area = PlotArea::resolve(canvas, &spec.domain);
        if area.is_degenerate() {
            // Collapsed domain: no visible output, but state stays coherent.
            self.state.last_value = spec.value;
            self.state.last_delta_value = spec.delta.delta_of(spec.value);
            self.snapshot = None;
            return SceneFragment::new();
        }

        let layout = layout::plan(spec, area, measurer);
        let animation = transition.filter(|t| t.duration_ms > 0.0);
        let animate = animation.is_some();
        let new_delta = spec.delta.delta_of(spec.value);

        // Display values for this pass: the committed source when animating,
        // the final value otherwise.
        let (num_v, delta_v, gauge_v) = if animate {
            (self.state.last_value, self.state.last_delta_value, self.state.last_value)
        } else {
            (spec.value, new_delta, spec.value)
        };

        let mut frag = SceneFragment::new();
        compose_static(&mut frag, spec, &layout);
        if let Some(node) = number_node(spec, &layout, num_v) {
            frag.push(Category::Number, node.0, node.1);
        }
        if let Some(node) = delta_node(spec, &layout, delta_v) {
            frag.push(Category::Delta, node.0, node.1);
        }
        if let Some(node) = gauge_value_node(spec, &layout, gauge_v) {
            frag.push(Category::ValueShape, node.0, node.1);
        }

        if let Some(opts) = animation {
            if spec.mode.number {
                self.number_tr
                    .begin(self.state.last_value, spec.value, opts, on_complete.clone());
            }
            if spec.mode.delta {
                self.delta_tr
                    .begin(self.state.last_delta_value, new_delta, opts, on_complete.clone());
            }
            if spec.shows_gauge() {
                self.gauge_tr
                    .begin(self.state.last_value, spec.value, opts, on_complete);
            }
            self.snapshot = Some(Snapshot { spec: spec.clone(), layout });
        } else {
            self.state.last_value = spec.value;
            self.state.last_delta_value = new_delta;
            self.snapshot = None;
        }
        frag
    }

    /// One animation-clock tick: sample every live transition, redraw its
    /// node in place, and commit values on natural completion.
    pub fn advance(&mut self, scene: &mut Scene, now_ms: f64) {
        let Some(snap) = &self.snapshot else {
            return;
        };
        if let Some(Sample { value, done }) = self.number_tr.advance(now_ms) {
            if let Some((key, shape)) = number_node(&snap.spec, &snap.layout, value) {
                scene.update(Category::Number, &key, shape);
            }
            if done {
                self.state.last_value = value;
            }
        }
        if let Some(Sample { value, done }) = self.delta_tr.advance(now_ms) {
            if let Some((key, shape)) = delta_node(&snap.spec, &snap.layout, value) {
                scene.update(Category::Delta, &key, shape);
            }
            if done {
                self.state.last_delta_value = value;
            }
        }
        if let Some(Sample { value, done }) = self.gauge_tr.advance(now_ms) {
            if let Some((key, shape)) = gauge_value_node(&snap.spec, &snap.layout, value) {
                scene.update(Category::ValueShape, &key, shape);
            }
            if done {
                self.state.last_value = value;
            }
        }
        if !self.is_animating() {
            self.snapshot = None;
        }
    }
}

impl Default for Indicator {
    fn default() -> Self {
        Self::new()
    }
}

/// Chart-level entry point: batches every indicator trace sharing one canvas,
/// keyed by trace uid. Traces absent from a render call are dropped (their
/// transitions interrupted) and their scene nodes reconciled away.
#[derive(Default)]
pub struct IndicatorRenderer {
    traces: HashMap<String, Indicator>,
}

impl IndicatorRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trace_state(&self, uid: &str) -> Option<RenderState> {
        self.traces.get(uid).map(|t| t.state())
    }

    /// Full-canvas render pass over all instances.
    pub fn render(
        &mut self,
        scene: &mut Scene,
        canvas: &CanvasSize,
        specs: &[IndicatorSpec],
        measurer: &dyn TextMeasurer,
        transition: Option<&TransitionOptions>,
        on_complete: Option<CompletionCallback>,
    ) {
        // Interrupt and drop state for traces that vanished.
        let gone: Vec<String> = self
            .traces
            .keys()
            .filter(|uid| !specs.iter().any(|s| s.uid == **uid))
            .cloned()
            .collect();
        for uid in gone {
            if let Some(mut trace) = self.traces.remove(&uid) {
                trace.cancel();
            }
        }

        let mut frag = SceneFragment::new();
        for spec in specs {
            let trace = self.traces.entry(spec.uid.clone()).or_default();
            frag.merge(trace.render(spec, canvas, measurer, transition, on_complete.clone()));
        }
        frag.apply(scene);
    }

    /// Pump all animations; call once per frame with the clock time.
    pub fn advance(&mut self, scene: &mut Scene, now_ms: f64) {
        for trace in self.traces.values_mut() {
            trace.advance(scene, now_ms);
        }
    }

    pub fn is_animating(&self) -> bool {
        self.traces.values().any(|t| t.is_animating())
    }
}

// ---- node composition -------------------------------------------------------

fn number_node(spec: &IndicatorSpec, layout: &ComputedLayout, value: f64) -> Option<(String, Shape)> {
    let block = layout.number?;
    Some((
        spec.uid.clone(),
        Shape::Text {
            text: spec.number_text(value),
            x: block.x,
            y: block.y,
            size: block.size,
            anchor: block.anchor,
            color: spec.number.font.color,
            scale: layout.text_scale,
        },
    ))
}

fn delta_node(spec: &IndicatorSpec, layout: &ComputedLayout, delta: f64) -> Option<(String, Shape)> {
    let block = layout.delta?;
    Some((
        spec.uid.clone(),
        Shape::Text {
            text: spec.delta.text_from_delta(delta),
            x: block.x,
            y: block.y,
            size: block.size,
            anchor: block.anchor,
            color: spec.delta.color_from_delta(delta),
            scale: layout.text_scale,
        },
    ))
}

fn gauge_value_node(
    spec: &IndicatorSpec,
    layout: &ComputedLayout,
    value: f64,
) -> Option<(String, Shape)> {
    let gauge = spec.gauge.as_ref().filter(|_| spec.shows_gauge())?;
    let mapper = AngleMapper::new(spec.range);
    let shape = match layout.gauge? {
        GaugeLayout::Angular(g) => {
            let (inner, outer) = g.band_radii(gauge.bar.thickness);
            Shape::Sector {
                cx: g.transform.cx,
                cy: g.transform.cy,
                inner,
                outer,
                theta0: g.transform.theta(0.0),
                theta1: g.transform.theta(mapper.fraction(value)),
                fill: Some(gauge.bar.color),
                stroke: outline_stroke(&gauge.bar.line),
            }
        }
        GaugeLayout::Bullet(g) => {
            let c2p = AxisDescriptor::new(spec.range, gauge.axis.clone()).c2p(g.x0, g.x1);
            let (y0, y1) = g.band_rect(gauge.bar.thickness);
            Shape::Rect {
                x: g.x0,
                y: y0,
                w: c2p.position(value) - g.x0,
                h: y1 - y0,
                fill: Some(gauge.bar.color),
                stroke: outline_stroke(&gauge.bar.line),
            }
        }
    };
    Some((spec.uid.clone(), shape))
}

fn outline_stroke(line: &crate::spec::Outline) -> Option<Stroke> {
    (line.width > 0.0).then_some(Stroke { color: line.color, width: line.width })
}

/// Compose every non-animated category: title, gauge background, steps,
/// threshold, outline, and axis ticks.
fn compose_static(frag: &mut SceneFragment, spec: &IndicatorSpec, layout: &ComputedLayout) {
    if let (Some(title), Some(block)) = (&spec.title, layout.title) {
        frag.push(
            Category::Title,
            spec.uid.clone(),
            Shape::Text {
                text: title.text.clone(),
                x: block.x,
                y: block.y,
                size: block.size,
                anchor: block.anchor,
                color: title.font.color,
                scale: 1.0,
            },
        );
    }

    let Some(gauge) = spec.gauge.as_ref().filter(|_| spec.shows_gauge()) else {
        return;
    };
    match layout.gauge {
        Some(GaugeLayout::Angular(g)) => compose_angular(frag, spec, gauge, &g),
        Some(GaugeLayout::Bullet(g)) => compose_bullet(frag, spec, gauge, &g),
        None => {}
    }
}

fn compose_angular(
    frag: &mut SceneFragment,
    spec: &IndicatorSpec,
    gauge: &GaugeOpts,
    g: &AngularGauge,
) {
    let uid = &spec.uid;
    let mapper = AngleMapper::new(spec.range);
    let tr = g.transform;

    frag.push(
        Category::GaugeBg,
        uid.clone(),
        Shape::Sector {
            cx: tr.cx,
            cy: tr.cy,
            inner: g.inner,
            outer: g.radius,
            theta0: tr.theta(0.0),
            theta1: tr.theta(1.0),
            fill: Some(gauge.bgcolor),
            stroke: None,
        },
    );

    for (i, step) in gauge.steps.iter().enumerate() {
        let (inner, outer) = g.band_radii(step.thickness);
        frag.push(
            Category::Steps,
            format!("{uid}/step-{i}"),
            Shape::Sector {
                cx: tr.cx,
                cy: tr.cy,
                inner,
                outer,
                theta0: tr.theta(mapper.fraction(step.range[0])),
                theta1: tr.theta(mapper.fraction(step.range[1])),
                fill: Some(step.color),
                stroke: outline_stroke(&step.line),
            },
        );
    }

    if let Some(th) = &gauge.threshold {
        let theta = tr.theta(mapper.fraction(th.value));
        let (r0, r1) = g.band_radii(th.thickness);
        let (x0, y0) = tr.point(theta, r0);
        let (x1, y1) = tr.point(theta, r1);
        frag.push(
            Category::Threshold,
            uid.clone(),
            Shape::Line {
                x0,
                y0,
                x1,
                y1,
                stroke: Stroke { color: th.line.color, width: th.line.width },
            },
        );
    }

    if gauge.border.width > 0.0 {
        frag.push(
            Category::AxisOutline,
            uid.clone(),
            Shape::Sector {
                cx: tr.cx,
                cy: tr.cy,
                inner: g.inner,
                outer: g.radius,
                theta0: tr.theta(0.0),
                theta1: tr.theta(1.0),
                fill: None,
                stroke: Some(Stroke { color: gauge.border.color, width: gauge.border.width }),
            },
        );
    }

    let axis = AxisDescriptor::new(spec.range, gauge.axis.clone());
    let font_size = gauge.axis.tickfont.size.unwrap_or(12.0);
    for (i, tick) in axis.calc_ticks().iter().enumerate() {
        let theta = tr.theta(mapper.fraction(tick.value));
        let (x0, y0) = tr.point(theta, g.radius);
        let (x1, y1) = tr.point(theta, g.radius + gauge.axis.ticklen);
        frag.push(
            Category::AxisTicks,
            format!("{uid}/tick-{i}-mark"),
            Shape::Line {
                x0,
                y0,
                x1,
                y1,
                stroke: Stroke { color: gauge.axis.tickcolor, width: gauge.axis.tickwidth },
            },
        );
        let (lx, ly) = tr.point(theta, g.radius + gauge.axis.ticklen + font_size * 0.25);
        frag.push(
            Category::AxisTicks,
            format!("{uid}/tick-{i}-label"),
            Shape::Text {
                text: tick.text.clone(),
                x: lx,
                y: ly + polar_label_shift(theta, font_size),
                size: font_size,
                anchor: polar_label_anchor(theta),
                color: gauge.axis.tickfont.color,
                scale: 1.0,
            },
        );
    }
}

fn compose_bullet(
    frag: &mut SceneFragment,
    spec: &IndicatorSpec,
    gauge: &GaugeOpts,
    g: &BulletGauge,
) {
    let uid = &spec.uid;
    let axis = AxisDescriptor::new(spec.range, gauge.axis.clone());
    let c2p = axis.c2p(g.x0, g.x1);

    frag.push(
        Category::GaugeBg,
        uid.clone(),
        Shape::Rect {
            x: g.x0,
            y: g.y0,
            w: g.x1 - g.x0,
            h: g.height(),
            fill: Some(gauge.bgcolor),
            stroke: None,
        },
    );

    for (i, step) in gauge.steps.iter().enumerate() {
        let (y0, y1) = g.band_rect(step.thickness);
        let px0 = c2p.position(step.range[0]);
        let px1 = c2p.position(step.range[1]);
        frag.push(
            Category::Steps,
            format!("{uid}/step-{i}"),
            Shape::Rect {
                x: px0,
                y: y0,
                w: px1 - px0,
                h: y1 - y0,
                fill: Some(step.color),
                stroke: outline_stroke(&step.line),
            },
        );
    }

    if let Some(th) = &gauge.threshold {
        let px = c2p.position(th.value);
        let (y0, y1) = g.band_rect(th.thickness);
        frag.push(
            Category::Threshold,
            uid.clone(),
            Shape::Line {
                x0: px,
                y0,
                x1: px,
                y1,
                stroke: Stroke { color: th.line.color, width: th.line.width },
            },
        );
    }

    if gauge.border.width > 0.0 {
        frag.push(
            Category::AxisOutline,
            uid.clone(),
            Shape::Rect {
                x: g.x0,
                y: g.y0,
                w: g.x1 - g.x0,
                h: g.height(),
                fill: None,
                stroke: Some(Stroke { color: gauge.border.color, width: gauge.border.width }),
            },
        );
    }

    let font_size = gauge.axis.tickfont.size.unwrap_or(12.0);
    for (i, tick) in axis.calc_ticks().iter().enumerate() {
        let px = c2p.position(tick.value);
        frag.push(
            Category::AxisTicks,
            format!("{uid}/tick-{i}-mark"),
            Shape::Line {
                x0: px,
                y0: g.y1,
                x1: px,
                y1: g.y1 + gauge.axis.ticklen,
                stroke: Stroke { color: gauge.axis.tickcolor, width: gauge.axis.tickwidth },
            },
        );
        frag.push(
            Category::AxisTicks,
            format!("{uid}/tick-{i}-label"),
            Shape::Text {
                text: tick.text.clone(),
                x: px,
                y: g.y1 + gauge.axis.ticklen + font_size,
                size: font_size,
                anchor: TextAnchor::Middle,
                color: gauge.axis.tickfont.color,
                scale: 1.0,
            },
        );
    }
}
