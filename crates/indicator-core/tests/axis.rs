// File: crates/indicator-core/tests/axis.rs
// Purpose: Validate nice-step tick calculation, label text, and polar label placement.

use std::f64::consts::PI;

use indicator_core::axis::{nice_step, polar_label_anchor, AxisDescriptor, PolarTransform};
use indicator_core::spec::{GaugeAxisOpts, ValueFormat, ValueRange};
use indicator_core::types::TextAnchor;

#[test]
fn nice_steps_follow_1_2_5() {
    assert_eq!(nice_step(100.0, 6), 20.0);
    assert_eq!(nice_step(10.0, 10), 1.0);
    assert_eq!(nice_step(7.0, 2), 5.0);
    assert!((nice_step(1.0, 6) - 0.2).abs() < 1e-12);
}

#[test]
fn ticks_cover_the_range() {
    let axis = AxisDescriptor::new(
        ValueRange { min: 0.0, max: 100.0 },
        GaugeAxisOpts::default(),
    );
    let ticks = axis.calc_ticks();
    assert_eq!(ticks.len(), 6);
    assert_eq!(ticks[0].value, 0.0);
    assert_eq!(ticks[0].text, "0");
    assert_eq!(ticks[5].value, 100.0);
    assert_eq!(ticks[5].text, "100");
}

#[test]
fn fractional_steps_get_decimals() {
    let axis = AxisDescriptor::new(
        ValueRange { min: 0.0, max: 1.0 },
        GaugeAxisOpts::default(),
    );
    let ticks = axis.calc_ticks();
    assert!(!ticks.is_empty());
    assert_eq!(ticks[0].text, "0.0");
    assert_eq!(ticks.last().unwrap().text, "1.0");
}

#[test]
fn tick_prefix_suffix() {
    let opts = GaugeAxisOpts {
        tickformat: ValueFormat {
            decimals: Some(0),
            prefix: "$".to_string(),
            suffix: "k".to_string(),
        },
        ..GaugeAxisOpts::default()
    };
    let axis = AxisDescriptor::new(ValueRange { min: 0.0, max: 100.0 }, opts);
    assert_eq!(axis.calc_ticks()[0].text, "$0k");
}

#[test]
fn invisible_axis_and_degenerate_range_yield_no_ticks() {
    let mut opts = GaugeAxisOpts::default();
    opts.visible = false;
    let axis = AxisDescriptor::new(ValueRange { min: 0.0, max: 100.0 }, opts);
    assert!(axis.calc_ticks().is_empty());

    let axis = AxisDescriptor::new(ValueRange { min: 3.0, max: 3.0 }, GaugeAxisOpts::default());
    assert!(axis.calc_ticks().is_empty());
}

#[test]
fn polar_points_trace_the_half_circle() {
    let tr = PolarTransform::new(100.0, 100.0);
    // fraction 0 is the left end, 1 the right end, 0.5 the apex
    let (x, y) = tr.point(tr.theta(0.0), 50.0);
    assert!((x - 50.0).abs() < 1e-9 && (y - 100.0).abs() < 1e-9);
    let (x, y) = tr.point(tr.theta(1.0), 50.0);
    assert!((x - 150.0).abs() < 1e-9 && (y - 100.0).abs() < 1e-9);
    let (x, y) = tr.point(tr.theta(0.5), 50.0);
    assert!((x - 100.0).abs() < 1e-9 && (y - 50.0).abs() < 1e-9);
}

#[test]
fn labels_flip_sides_around_the_arc() {
    assert_eq!(polar_label_anchor(PI), TextAnchor::End);
    assert_eq!(polar_label_anchor(PI / 2.0), TextAnchor::Middle);
    assert_eq!(polar_label_anchor(0.0), TextAnchor::Start);
}
