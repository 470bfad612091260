// File: crates/indicator-core/tests/smoke.rs
// Purpose: Basic end-to-end render smoke test writing a PNG.

use indicator_core::spec::{GaugeOpts, GaugeShape, Step, Threshold};
use indicator_core::{
    CanvasSize, IndicatorRenderer, IndicatorSpec, Rasterizer, RenderOptions, Scene,
};
use skia_safe as skia;

#[test]
fn render_smoke_png() {
    let rasterizer = Rasterizer::new();
    let mut scene = Scene::new();
    let mut renderer = IndicatorRenderer::new();
    let canvas = CanvasSize::bare(800.0, 400.0);

    let angular = IndicatorSpec::new("speed", 72.0)
        .with_mode("number+delta+gauge")
        .with_range(0.0, 120.0)
        .with_domain([0.0, 0.5], [0.0, 1.0])
        .with_title("Speed")
        .with_delta_reference(60.0)
        .with_gauge(GaugeOpts {
            steps: vec![Step {
                range: [0.0, 80.0],
                color: skia::Color::from_argb(255, 220, 220, 220),
                line: Default::default(),
                thickness: 1.0,
            }],
            threshold: Some(Threshold { value: 100.0, ..Threshold::default() }),
            ..GaugeOpts::default()
        });

    let bullet = IndicatorSpec::new("load", 0.61)
        .with_mode("number+gauge")
        .with_range(0.0, 1.0)
        .with_domain([0.5, 1.0], [0.3, 0.7])
        .with_gauge(GaugeOpts { shape: GaugeShape::Bullet, ..GaugeOpts::default() });

    renderer.render(
        &mut scene,
        &canvas,
        &[angular, bullet],
        rasterizer.shaper(),
        None,
        None,
    );
    assert!(!scene.is_empty());

    let opts = RenderOptions { width: 800, height: 400, ..RenderOptions::default() };
    let out = std::path::PathBuf::from("target/test_out/smoke.png");
    rasterizer
        .render_to_png(&scene, &opts, &out)
        .expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    // Also verify in-memory API works
    let bytes = rasterizer
        .render_to_png_bytes(&scene, &opts)
        .expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
}
