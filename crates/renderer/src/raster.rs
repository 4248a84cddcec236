//! Pixel surface.
//!
//! Geometry is drawn with tiny-skia directly into an opaque `RgbaImage`;
//! text goes through rusttype and imageproc when a font is available and
//! falls back to stroke glyphs otherwise.

use crate::fonts::SharedFont;
use crate::glyphs;
use crate::surface::{self, HAlign, Point, Rect, Stroke, Surface, TextStyle, VAlign};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use rusttype::Scale;
use tiny_skia::{FillRule, LineCap, LineJoin, Paint, Path, PathBuilder, PixmapMut, StrokeDash, Transform};
use zone_common::{PlotError, PlotResult};

/// Largest raster edge accepted, in pixels.
pub const MAX_DIMENSION: u32 = 16_384;

/// An opaque RGBA raster.
pub struct RasterSurface {
    image: RgbaImage,
    font: Option<SharedFont>,
}

impl RasterSurface {
    /// White `width` × `height` raster.
    pub fn new(width: u32, height: u32, font: Option<SharedFont>) -> PlotResult<Self> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(PlotError::Surface(format!(
                "unsupported raster size {}x{}",
                width, height
            )));
        }
        Ok(Self {
            image: RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255])),
            font,
        })
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    fn with_pixmap(&mut self, draw: impl FnOnce(&mut PixmapMut<'_>)) {
        let (width, height) = self.image.dimensions();
        let data: &mut [u8] = &mut self.image;
        // Opaque pixels are the same premultiplied or not
        if let Some(mut pixmap) = PixmapMut::from_bytes(data, width, height) {
            draw(&mut pixmap);
        }
    }

    fn fill_path(&mut self, path: Option<Path>, color: Rgba<u8>, anti_alias: bool) {
        let Some(path) = path else { return };
        let paint = paint_for(color, anti_alias);
        self.with_pixmap(|pixmap| {
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        });
    }

    fn stroke_path(&mut self, path: Option<Path>, stroke: &Stroke) {
        let Some(path) = path else { return };
        let paint = paint_for(stroke.color, true);
        let sk_stroke = to_sk_stroke(stroke);
        self.with_pixmap(|pixmap| {
            pixmap.stroke_path(&path, &paint, &sk_stroke, Transform::identity(), None);
        });
    }

    fn draw_stroke_text(&mut self, origin: Point, text: &str, size: f32, color: Rgba<u8>) {
        let advance = size * surface::CHAR_WIDTH_FACTOR;
        let glyph_w = advance * 0.7;
        let glyph_h = size * 0.7;
        let top = origin.y + size * 0.15;
        let stroke = tiny_skia::Stroke {
            width: (size * 0.09).max(1.0),
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };
        let paint = paint_for(color, true);

        let mut pb = PathBuilder::new();
        for (i, ch) in text.chars().enumerate() {
            let left = origin.x + i as f32 * advance + (advance - glyph_w) / 2.0;
            for &[x1, y1, x2, y2] in glyphs::glyph(ch) {
                pb.move_to(left + x1 * glyph_w, top + y1 * glyph_h);
                pb.line_to(left + x2 * glyph_w, top + y2 * glyph_h);
            }
        }
        if let Some(path) = pb.finish() {
            self.with_pixmap(|pixmap| {
                pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
            });
        }
    }
}

fn paint_for(color: Rgba<u8>, anti_alias: bool) -> Paint<'static> {
    let mut paint = Paint::default();
    let [r, g, b, a] = color.0;
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = anti_alias;
    paint
}

fn to_sk_stroke(stroke: &Stroke) -> tiny_skia::Stroke {
    tiny_skia::Stroke {
        width: stroke.width,
        line_cap: LineCap::Butt,
        line_join: LineJoin::Miter,
        dash: stroke
            .dash
            .and_then(|[on, off]| StrokeDash::new(vec![on, off], 0.0)),
        ..Default::default()
    }
}

fn rect_path(rect: Rect) -> Option<Path> {
    tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height).map(PathBuilder::from_rect)
}

fn rounded_rect_path(rect: Rect, radius: f32) -> Option<Path> {
    let r = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
    let (x, y, w, h) = (rect.x, rect.y, rect.width, rect.height);
    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(x + w - r, y);
    pb.quad_to(x + w, y, x + w, y + r);
    pb.line_to(x + w, y + h - r);
    pb.quad_to(x + w, y + h, x + w - r, y + h);
    pb.line_to(x + r, y + h);
    pb.quad_to(x, y + h, x, y + h - r);
    pb.line_to(x, y + r);
    pb.quad_to(x, y, x + r, y);
    pb.close();
    pb.finish()
}

fn line_path(from: Point, to: Point) -> Option<Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(from.x, from.y);
    pb.line_to(to.x, to.y);
    pb.finish()
}

/// Top-left corner for a block of `width` × `height` anchored per `style`.
fn aligned_origin(anchor: Point, width: f32, height: f32, style: &TextStyle) -> Point {
    let x = match style.h_align {
        HAlign::Left => anchor.x,
        HAlign::Center => anchor.x - width / 2.0,
        HAlign::Right => anchor.x - width,
    };
    let y = match style.v_align {
        VAlign::Top => anchor.y,
        VAlign::Middle => anchor.y - height / 2.0,
        VAlign::Bottom => anchor.y - height,
    };
    Point::new(x, y)
}

impl Surface for RasterSurface {
    fn size(&self) -> (f32, f32) {
        let (w, h) = self.image.dimensions();
        (w as f32, h as f32)
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba<u8>) {
        // Adjacent heatmap cells must not leave seams
        self.fill_path(rect_path(rect), color, false);
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) {
        self.stroke_path(rect_path(rect), stroke);
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Rgba<u8>) {
        self.fill_path(rounded_rect_path(rect, radius), color, true);
    }

    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f32, stroke: &Stroke) {
        self.stroke_path(rounded_rect_path(rect, radius), stroke);
    }

    fn line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        self.stroke_path(line_path(from, to), stroke);
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba<u8>) {
        self.fill_path(PathBuilder::from_circle(center.x, center.y, radius), color, true);
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, stroke: &Stroke) {
        self.stroke_path(PathBuilder::from_circle(center.x, center.y, radius), stroke);
    }

    fn text(&mut self, anchor: Point, text: &str, style: &TextStyle) {
        if text.is_empty() || style.size <= 0.0 {
            return;
        }
        match self.font.clone() {
            Some(font) => {
                let scale = Scale::uniform(style.size);
                let (w, _) = text_size(scale, &font, text);
                let origin = aligned_origin(anchor, w as f32, style.size, style);
                draw_text_mut(
                    &mut self.image,
                    style.color,
                    origin.x.round() as i32,
                    origin.y.round() as i32,
                    scale,
                    &font,
                    text,
                );
            }
            None => {
                let width = surface::estimate_text_width(text, style.size);
                let origin = aligned_origin(anchor, width, style.size, style);
                self.draw_stroke_text(origin, text, style.size, style.color);
            }
        }
    }
}
