// File: crates/indicator-core/src/text.rs
// Summary: Text measurement seam plus a Skia textlayout-backed shaper with sensible defaults.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

/// Measurement seam the layout planner calls through. Keeping it a trait lets
/// tests and benches swap in a deterministic measurer with no font stack.
pub trait TextMeasurer {
    /// Rendered extent of `text` at `size`, in pixels: (width, height).
    fn measure(&self, text: &str, size: f64) -> (f64, f64);
}

/// Font-free measurer: fixed advance per glyph. Extents are stable across
/// platforms, which is what layout tests need.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicMeasurer;

impl TextMeasurer for HeuristicMeasurer {
    fn measure(&self, text: &str, size: f64) -> (f64, f64) {
        let glyphs = text.chars().count() as f64;
        (glyphs * size * 0.6, size)
    }
}

pub struct TextShaper {
    fonts: FontCollection,
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(&[
            "Segoe UI",
            "Arial",
            "Helvetica",
            "Roboto",
            "DejaVu Sans",
            "sans-serif",
        ]);
        ts
    }

    pub fn layout(&self, text: &str, size: f32, color: skia::Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        let style = Self::make_style(size, color);
        builder.push_style(&style);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    /// Draw `text` with its left edge at `x` and baseline near `y`.
    pub fn draw_left(
        &self,
        canvas: &skia::Canvas,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        color: skia::Color,
    ) {
        let p = self.layout(text, size, color);
        // Paragraph draws from top-left; adjust baseline by glyph height approximation
        p.paint(canvas, (x, y - size * 0.8));
    }
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer for TextShaper {
    fn measure(&self, text: &str, size: f64) -> (f64, f64) {
        let p = self.layout(text, size as f32, skia::Color::from_argb(0, 0, 0, 0));
        (p.longest_line() as f64, p.height() as f64)
    }
}
