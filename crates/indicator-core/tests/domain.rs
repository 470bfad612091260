// File: crates/indicator-core/tests/domain.rs
// Purpose: Validate fractional-domain to pixel-bounds resolution.

use indicator_core::spec::Domain;
use indicator_core::types::CanvasSize;
use indicator_core::PlotArea;

#[test]
fn half_width_domain() {
    let canvas = CanvasSize::bare(1000.0, 1000.0);
    let domain = Domain { x: [0.0, 0.5], y: [0.0, 1.0] };
    let area = PlotArea::resolve(&canvas, &domain);
    assert_eq!(area.w, 500.0);
    assert_eq!(area.l, 0.0);
    assert_eq!(area.r, 500.0);
    assert_eq!(area.h, 1000.0);
    assert_eq!(area.t, 0.0);
    assert_eq!(area.b, 0.0);
}

#[test]
fn margins_offset_the_subrect() {
    let canvas = CanvasSize::new(1000.0, 800.0, 100.0, 50.0, 20.0, 30.0);
    let domain = Domain { x: [0.25, 0.75], y: [0.5, 1.0] };
    let area = PlotArea::resolve(&canvas, &domain);
    // inner 850x750
    assert!((area.w - 425.0).abs() < 1e-9);
    assert!((area.l - (100.0 + 212.5)).abs() < 1e-9);
    assert!((area.h - 375.0).abs() < 1e-9);
    assert!((area.t - 20.0).abs() < 1e-9);
    assert!((area.b - (30.0 + 375.0)).abs() < 1e-9);
}

#[test]
fn collapsed_domain_is_degenerate() {
    let canvas = CanvasSize::bare(1000.0, 1000.0);
    let domain = Domain { x: [0.4, 0.4], y: [0.0, 1.0] };
    let area = PlotArea::resolve(&canvas, &domain);
    assert!(area.is_degenerate());
}
