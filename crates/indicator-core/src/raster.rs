// File: crates/indicator-core/src/raster.rs
// Summary: Scene rasterizer: walks retained nodes in z-order and draws them to
//          a Skia CPU raster surface / PNG.

use std::f64::consts::PI;

use anyhow::{Context, Result};
use skia_safe as skia;
use thiserror::Error;

use crate::scene::{Scene, Shape, Stroke};
use crate::text::{TextMeasurer, TextShaper};
use crate::types::{TextAnchor, HEIGHT, WIDTH};

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("failed to create raster surface")]
    Surface,
    #[error("PNG encode failed")]
    Encode,
}

pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub background: skia::Color,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            background: skia::Color::from_argb(255, 255, 255, 255),
        }
    }
}

pub struct Rasterizer {
    shaper: TextShaper,
}

impl Rasterizer {
    pub fn new() -> Self {
        Self { shaper: TextShaper::new() }
    }

    /// The shaper doubles as the engine's text measurer so layout and drawing
    /// agree on extents.
    pub fn shaper(&self) -> &TextShaper {
        &self.shaper
    }

    /// Rasterize the scene and return encoded PNG bytes.
    pub fn render_to_png_bytes(
        &self,
        scene: &Scene,
        opts: &RenderOptions,
    ) -> std::result::Result<Vec<u8>, RasterError> {
        let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
            .ok_or(RasterError::Surface)?;
        let canvas = surface.canvas();
        canvas.clear(opts.background);
        self.draw(canvas, scene);

        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or(RasterError::Encode)?;
        Ok(data.as_bytes().to_vec())
    }

    /// Rasterize the scene to a PNG file, creating parent directories.
    pub fn render_to_png(
        &self,
        scene: &Scene,
        opts: &RenderOptions,
        output_png_path: impl AsRef<std::path::Path>,
    ) -> Result<()> {
        let bytes = self
            .render_to_png_bytes(scene, opts)
            .context("rasterizing indicator scene")?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, bytes)?;
        Ok(())
    }

    /// Draw all nodes back-to-front onto an existing canvas.
    pub fn draw(&self, canvas: &skia::Canvas, scene: &Scene) {
        for (_, shape) in scene.iter() {
            match shape {
                Shape::Rect { x, y, w, h, fill, stroke } => {
                    let rect = skia::Rect::from_xywh(*x as f32, *y as f32, *w as f32, *h as f32);
                    if let Some(color) = fill {
                        canvas.draw_rect(rect, &fill_paint(*color));
                    }
                    if let Some(s) = stroke {
                        canvas.draw_rect(rect, &stroke_paint(s));
                    }
                }
                Shape::Line { x0, y0, x1, y1, stroke } => {
                    canvas.draw_line(
                        (*x0 as f32, *y0 as f32),
                        (*x1 as f32, *y1 as f32),
                        &stroke_paint(stroke),
                    );
                }
                Shape::Sector { cx, cy, inner, outer, theta0, theta1, fill, stroke } => {
                    let path = sector_path(*cx, *cy, *inner, *outer, *theta0, *theta1);
                    if let Some(color) = fill {
                        canvas.draw_path(&path, &fill_paint(*color));
                    }
                    if let Some(s) = stroke {
                        canvas.draw_path(&path, &stroke_paint(s));
                    }
                }
                Shape::Text { text, x, y, size, anchor, color, scale } => {
                    self.draw_text(canvas, text, *x, *y, *size, *anchor, *color, *scale);
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_text(
        &self,
        canvas: &skia::Canvas,
        text: &str,
        x: f64,
        y: f64,
        size: f64,
        anchor: TextAnchor,
        color: skia::Color,
        scale: f64,
    ) {
        if scale <= 0.0 || size <= 0.0 || text.is_empty() {
            return;
        }
        let (w, _) = self.shaper.measure(text, size);
        let dx = match anchor {
            TextAnchor::Start => 0.0,
            TextAnchor::Middle => -w / 2.0,
            TextAnchor::End => -w,
        };
        canvas.save();
        canvas.translate((x as f32, y as f32));
        if scale < 1.0 {
            canvas.scale((scale as f32, scale as f32));
        }
        self.shaper
            .draw_left(canvas, text, dx as f32, 0.0, size as f32, color);
        canvas.restore();
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

fn fill_paint(color: skia::Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color);
    paint
}

fn stroke_paint(stroke: &Stroke) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(stroke.width as f32);
    paint.set_color(stroke.color);
    paint
}

/// Annular sector path between `theta0` and `theta1` (polar convention from
/// `axis`: radians, y-up). Skia sweeps degrees clockwise in screen space, so
/// angles negate on the way in.
fn sector_path(cx: f64, cy: f64, inner: f64, outer: f64, theta0: f64, theta1: f64) -> skia::Path {
    let to_deg = |t: f64| (-t * 180.0 / PI) as f32;
    let start = to_deg(theta0);
    let sweep = to_deg(theta1) - start;

    let outer_oval = skia::Rect::from_ltrb(
        (cx - outer) as f32,
        (cy - outer) as f32,
        (cx + outer) as f32,
        (cy + outer) as f32,
    );
    let mut path = skia::Path::new();
    path.arc_to(outer_oval, start, sweep, true);
    if inner > 0.0 {
        let inner_oval = skia::Rect::from_ltrb(
            (cx - inner) as f32,
            (cy - inner) as f32,
            (cx + inner) as f32,
            (cy + inner) as f32,
        );
        path.arc_to(inner_oval, start + sweep, -sweep, false);
    } else {
        path.line_to((cx as f32, cy as f32));
    }
    path.close();
    path
}
