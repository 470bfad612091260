// File: crates/indicator-core/tests/layout.rs
// Purpose: Validate layout planning: fit-to-box scaling, delta placement, and
//          gauge geometry reservations.

use indicator_core::layout::{self, fit_scale, GaugeLayout};
use indicator_core::spec::{DeltaPosition, GaugeOpts, GaugeShape};
use indicator_core::types::TextAnchor;
use indicator_core::{CanvasSize, HeuristicMeasurer, IndicatorSpec, PlotArea};

fn area(w: f64, h: f64) -> PlotArea {
    PlotArea::resolve(&CanvasSize::bare(w, h), &Default::default())
}

#[test]
fn fit_scale_never_upscales() {
    assert_eq!(fit_scale(100.0, 20.0, 100.0, 20.0), 1.0);
    assert_eq!(fit_scale(50.0, 10.0, 100.0, 20.0), 1.0);
    assert_eq!(fit_scale(200.0, 20.0, 100.0, 20.0), 0.5);
    assert_eq!(fit_scale(100.0, 40.0, 100.0, 20.0), 0.5);
}

#[test]
fn fit_scale_guards_degenerate_boxes() {
    // collapsed target box hides the text instead of producing NaN
    assert_eq!(fit_scale(100.0, 20.0, 0.0, 20.0), 0.0);
    assert_eq!(fit_scale(100.0, 20.0, 100.0, -5.0), 0.0);
    // empty text block never zeroes the transform
    assert_eq!(fit_scale(0.0, 0.0, 100.0, 20.0), 1.0);
}

#[test]
fn planned_scale_is_at_most_one() {
    let spec = IndicatorSpec::new("t", 123456.0)
        .with_mode("number+delta")
        .with_range(0.0, 1_000_000.0);
    let plan = layout::plan(&spec, area(200.0, 100.0), &HeuristicMeasurer);
    assert!(plan.text_scale > 0.0 && plan.text_scale <= 1.0);
}

#[test]
fn delta_stacks_below_by_default() {
    let spec = IndicatorSpec::new("t", 50.0).with_mode("number+delta");
    let plan = layout::plan(&spec, area(400.0, 300.0), &HeuristicMeasurer);
    let num = plan.number.unwrap();
    let delta = plan.delta.unwrap();
    assert!(delta.y > num.y);
    assert_eq!(delta.anchor, TextAnchor::Middle);
    assert!(delta.size < num.size);
}

#[test]
fn inline_delta_anchors_away_from_the_number() {
    let mut spec = IndicatorSpec::new("t", 50.0).with_mode("number+delta");
    spec.delta.position = DeltaPosition::Left;
    let plan = layout::plan(&spec, area(400.0, 300.0), &HeuristicMeasurer);
    let num = plan.number.unwrap();
    let delta = plan.delta.unwrap();
    assert_eq!(delta.anchor, TextAnchor::End);
    assert!(delta.x < num.x);
    assert_eq!(delta.y, num.y);

    spec.delta.position = DeltaPosition::Right;
    let plan = layout::plan(&spec, area(400.0, 300.0), &HeuristicMeasurer);
    let delta = plan.delta.unwrap();
    assert_eq!(delta.anchor, TextAnchor::Start);
    assert!(delta.x > num.x);
}

#[test]
fn delta_without_number_takes_the_number_spot() {
    let spec = IndicatorSpec::new("t", 50.0).with_mode("delta");
    let plan = layout::plan(&spec, area(400.0, 300.0), &HeuristicMeasurer);
    assert!(plan.number.is_none());
    let delta = plan.delta.unwrap();
    assert_eq!(delta.anchor, TextAnchor::Middle);
    assert_eq!((delta.x, delta.y), plan.scale_origin);
}

#[test]
fn angular_gauge_fits_the_content_box() {
    let spec = IndicatorSpec::new("t", 50.0)
        .with_mode("number+gauge")
        .with_range(0.0, 100.0)
        .with_gauge(GaugeOpts::default());
    let plan = layout::plan(&spec, area(400.0, 300.0), &HeuristicMeasurer);
    let Some(GaugeLayout::Angular(g)) = plan.gauge else {
        panic!("expected angular gauge layout");
    };
    assert!((g.radius - 200.0).abs() < 1e-9);
    assert!(g.inner < g.radius);
    assert!((g.transform.cx - 200.0).abs() < 1e-9);
    assert!((g.transform.cy - 300.0).abs() < 1e-9);
}

#[test]
fn bullet_reserves_a_number_block() {
    let gauge = GaugeOpts { shape: GaugeShape::Bullet, ..GaugeOpts::default() };
    let spec = IndicatorSpec::new("t", 50.0)
        .with_mode("number+gauge")
        .with_range(0.0, 100.0)
        .with_gauge(gauge);
    let plan = layout::plan(&spec, area(400.0, 100.0), &HeuristicMeasurer);
    let Some(GaugeLayout::Bullet(g)) = plan.gauge else {
        panic!("expected bullet gauge layout");
    };
    assert!(g.x0 > 0.0, "bar starts after the number block");
    assert!((g.x1 - 400.0).abs() < 1e-9);
    let num = plan.number.unwrap();
    assert!(num.x < g.x0);
}

#[test]
fn bullet_title_is_left_aligned() {
    let gauge = GaugeOpts { shape: GaugeShape::Bullet, ..GaugeOpts::default() };
    let spec = IndicatorSpec::new("t", 50.0)
        .with_mode("gauge")
        .with_gauge(gauge)
        .with_title("Throughput");
    let plan = layout::plan(&spec, area(400.0, 100.0), &HeuristicMeasurer);
    assert_eq!(plan.title.unwrap().anchor, TextAnchor::Start);

    let spec = IndicatorSpec::new("t", 50.0).with_title("Throughput");
    let plan = layout::plan(&spec, area(400.0, 100.0), &HeuristicMeasurer);
    assert_eq!(plan.title.unwrap().anchor, TextAnchor::Middle);
}
