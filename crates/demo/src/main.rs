// File: crates/demo/src/main.rs
// Summary: Demo renders a dashboard of indicator traces (angular gauge,
//          bullet gauge, big number with delta) to PNGs, then replays an
//          animated value change frame by frame.

use anyhow::Result;
use indicator_core::spec::{GaugeOpts, GaugeShape, Step, Threshold};
use indicator_core::transition::Easing;
use indicator_core::{
    CanvasSize, IndicatorRenderer, IndicatorSpec, Rasterizer, RenderOptions, Scene,
    TransitionOptions,
};
use skia_safe as skia;
use std::path::PathBuf;

fn dashboard(speed: f64, load: f64, revenue: f64) -> Vec<IndicatorSpec> {
    let speed_gauge = GaugeOpts {
        bgcolor: skia::Color::from_argb(255, 245, 245, 245),
        steps: vec![
            Step {
                range: [0.0, 80.0],
                color: skia::Color::from_argb(255, 214, 234, 248),
                line: Default::default(),
                thickness: 1.0,
            },
            Step {
                range: [80.0, 120.0],
                color: skia::Color::from_argb(255, 250, 226, 226),
                line: Default::default(),
                thickness: 1.0,
            },
        ],
        threshold: Some(Threshold { value: 110.0, ..Threshold::default() }),
        ..GaugeOpts::default()
    };
    let mut speed_spec = IndicatorSpec::new("speed", speed)
        .with_mode("number+delta+gauge")
        .with_range(0.0, 120.0)
        .with_domain([0.0, 0.5], [0.0, 1.0])
        .with_title("Speed")
        .with_delta_reference(60.0)
        .with_gauge(speed_gauge);
    speed_spec.number.valueformat.suffix = " km/h".to_string();

    let load_spec = IndicatorSpec::new("load", load)
        .with_mode("number+gauge")
        .with_range(0.0, 1.0)
        .with_domain([0.5, 1.0], [0.5, 1.0])
        .with_title("Load")
        .with_gauge(GaugeOpts { shape: GaugeShape::Bullet, ..GaugeOpts::default() });

    let mut revenue_spec = IndicatorSpec::new("revenue", revenue)
        .with_mode("number+delta")
        .with_range(0.0, 500_000.0)
        .with_domain([0.5, 1.0], [0.0, 0.5])
        .with_title("Revenue")
        .with_delta_reference(400_000.0);
    revenue_spec.number.valueformat.prefix = "$".to_string();
    revenue_spec.delta.relative = true;

    vec![speed_spec, load_spec, revenue_spec]
}

fn main() -> Result<()> {
    let rasterizer = Rasterizer::new();
    let mut scene = Scene::new();
    let mut renderer = IndicatorRenderer::new();
    let canvas = CanvasSize::new(1024.0, 640.0, 20.0, 20.0, 20.0, 20.0);
    let opts = RenderOptions { width: 1024, height: 640, ..RenderOptions::default() };
    let out_dir = PathBuf::from("target/demo_out");

    // Static render
    renderer.render(
        &mut scene,
        &canvas,
        &dashboard(72.0, 0.61, 438_500.0),
        rasterizer.shaper(),
        None,
        None,
    );
    let out = out_dir.join("indicators.png");
    rasterizer.render_to_png(&scene, &opts, &out)?;
    println!("Wrote {}", out.display());

    // Animated value change, replayed at 60 fps
    let transition = TransitionOptions { duration_ms: 500.0, easing: Easing::CubicInOut };
    renderer.render(
        &mut scene,
        &canvas,
        &dashboard(95.0, 0.83, 472_000.0),
        rasterizer.shaper(),
        Some(&transition),
        None,
    );
    let mut now = 0.0;
    let mut frame = 0;
    while renderer.is_animating() {
        renderer.advance(&mut scene, now);
        if frame % 10 == 0 {
            let out = out_dir.join(format!("frame_{frame:03}.png"));
            rasterizer.render_to_png(&scene, &opts, &out)?;
            println!("Wrote {}", out.display());
        }
        now += 1000.0 / 60.0;
        frame += 1;
    }
    Ok(())
}
