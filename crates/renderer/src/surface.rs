//! Drawing surface abstraction.
//!
//! The plot is composed once against [`Surface`] in logical units. A
//! [`DisplayList`] records the calls, a raster surface turns them into
//! pixels and a [`ScaledSurface`] multiplies every coordinate and length so
//! the same composition can be produced at any resolution.

use image::Rgba;

/// Advance per character as a fraction of the font size. Layout never
/// depends on the actual font.
pub const CHAR_WIDTH_FACTOR: f32 = 0.6;

/// Estimated width of `text` at `size`.
pub fn estimate_text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * CHAR_WIDTH_FACTOR
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn scaled(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    fn scaled(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s, self.width * s, self.height * s)
    }
}

/// Line style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgba<u8>,
    pub width: f32,
    /// Dash and gap lengths
    pub dash: Option<[f32; 2]>,
}

impl Stroke {
    pub fn solid(color: Rgba<u8>, width: f32) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub fn dashed(color: Rgba<u8>, width: f32, dash: [f32; 2]) -> Self {
        Self {
            color,
            width,
            dash: Some(dash),
        }
    }

    fn scaled(self, s: f32) -> Self {
        Self {
            color: self.color,
            width: self.width * s,
            dash: self.dash.map(|[on, off]| [on * s, off * s]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub color: Rgba<u8>,
    pub h_align: HAlign,
    pub v_align: VAlign,
}

impl TextStyle {
    pub fn new(size: f32, color: Rgba<u8>) -> Self {
        Self {
            size,
            color,
            h_align: HAlign::Left,
            v_align: VAlign::Top,
        }
    }

    pub fn aligned(mut self, h_align: HAlign, v_align: VAlign) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }

    fn scaled(self, s: f32) -> Self {
        Self {
            size: self.size * s,
            ..self
        }
    }
}

/// Something the plot can be drawn onto.
pub trait Surface {
    /// Drawable size in this surface's units.
    fn size(&self) -> (f32, f32);

    fn fill_rect(&mut self, rect: Rect, color: Rgba<u8>);

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke);

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Rgba<u8>);

    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f32, stroke: &Stroke);

    fn line(&mut self, from: Point, to: Point, stroke: &Stroke);

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba<u8>);

    fn stroke_circle(&mut self, center: Point, radius: f32, stroke: &Stroke);

    /// Draw `text` anchored at `anchor` according to the style's alignment.
    fn text(&mut self, anchor: Point, text: &str, style: &TextStyle);
}

// ============================================================================
// Recorded drawing
// ============================================================================

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Rgba<u8>,
    },
    StrokeRect {
        rect: Rect,
        stroke: Stroke,
    },
    FillRoundedRect {
        rect: Rect,
        radius: f32,
        color: Rgba<u8>,
    },
    StrokeRoundedRect {
        rect: Rect,
        radius: f32,
        stroke: Stroke,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    FillCircle {
        center: Point,
        radius: f32,
        color: Rgba<u8>,
    },
    StrokeCircle {
        center: Point,
        radius: f32,
        stroke: Stroke,
    },
    Text {
        anchor: Point,
        text: String,
        style: TextStyle,
    },
}

impl DrawCommand {
    /// The same command with every geometric quantity multiplied by `s`.
    pub fn scaled(&self, s: f32) -> Self {
        match self {
            DrawCommand::FillRect { rect, color } => DrawCommand::FillRect {
                rect: rect.scaled(s),
                color: *color,
            },
            DrawCommand::StrokeRect { rect, stroke } => DrawCommand::StrokeRect {
                rect: rect.scaled(s),
                stroke: stroke.scaled(s),
            },
            DrawCommand::FillRoundedRect {
                rect,
                radius,
                color,
            } => DrawCommand::FillRoundedRect {
                rect: rect.scaled(s),
                radius: radius * s,
                color: *color,
            },
            DrawCommand::StrokeRoundedRect {
                rect,
                radius,
                stroke,
            } => DrawCommand::StrokeRoundedRect {
                rect: rect.scaled(s),
                radius: radius * s,
                stroke: stroke.scaled(s),
            },
            DrawCommand::Line { from, to, stroke } => DrawCommand::Line {
                from: from.scaled(s),
                to: to.scaled(s),
                stroke: stroke.scaled(s),
            },
            DrawCommand::FillCircle {
                center,
                radius,
                color,
            } => DrawCommand::FillCircle {
                center: center.scaled(s),
                radius: radius * s,
                color: *color,
            },
            DrawCommand::StrokeCircle {
                center,
                radius,
                stroke,
            } => DrawCommand::StrokeCircle {
                center: center.scaled(s),
                radius: radius * s,
                stroke: stroke.scaled(s),
            },
            DrawCommand::Text {
                anchor,
                text,
                style,
            } => DrawCommand::Text {
                anchor: anchor.scaled(s),
                text: text.clone(),
                style: style.scaled(s),
            },
        }
    }
}

/// A surface that records drawing calls instead of rasterising them.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayList {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Recorded text strings, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// A copy with every geometric quantity multiplied by `s`.
    pub fn scaled(&self, s: f32) -> Self {
        Self {
            width: self.width * s,
            height: self.height * s,
            commands: self.commands.iter().map(|c| c.scaled(s)).collect(),
        }
    }

    /// Draw the recorded commands onto another surface.
    pub fn replay<S: Surface + ?Sized>(&self, target: &mut S) {
        for command in &self.commands {
            match command {
                DrawCommand::FillRect { rect, color } => target.fill_rect(*rect, *color),
                DrawCommand::StrokeRect { rect, stroke } => target.stroke_rect(*rect, stroke),
                DrawCommand::FillRoundedRect {
                    rect,
                    radius,
                    color,
                } => target.fill_rounded_rect(*rect, *radius, *color),
                DrawCommand::StrokeRoundedRect {
                    rect,
                    radius,
                    stroke,
                } => target.stroke_rounded_rect(*rect, *radius, stroke),
                DrawCommand::Line { from, to, stroke } => target.line(*from, *to, stroke),
                DrawCommand::FillCircle {
                    center,
                    radius,
                    color,
                } => target.fill_circle(*center, *radius, *color),
                DrawCommand::StrokeCircle {
                    center,
                    radius,
                    stroke,
                } => target.stroke_circle(*center, *radius, stroke),
                DrawCommand::Text {
                    anchor,
                    text,
                    style,
                } => target.text(*anchor, text, style),
            }
        }
    }
}

impl Surface for DisplayList {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba<u8>) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            stroke: *stroke,
        });
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Rgba<u8>) {
        self.commands.push(DrawCommand::FillRoundedRect {
            rect,
            radius,
            color,
        });
    }

    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f32, stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokeRoundedRect {
            rect,
            radius,
            stroke: *stroke,
        });
    }

    fn line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            stroke: *stroke,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba<u8>) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            stroke: *stroke,
        });
    }

    fn text(&mut self, anchor: Point, text: &str, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            anchor,
            text: text.to_string(),
            style: *style,
        });
    }
}

// ============================================================================
// Scaling adapter
// ============================================================================

/// Presents a device surface in logical units by multiplying every
/// coordinate, length, stroke width and font size by `scale`.
pub struct ScaledSurface<'a, S: Surface + ?Sized> {
    inner: &'a mut S,
    scale: f32,
}

impl<'a, S: Surface + ?Sized> ScaledSurface<'a, S> {
    pub fn new(inner: &'a mut S, scale: f32) -> Self {
        Self { inner, scale }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }
}

impl<S: Surface + ?Sized> Surface for ScaledSurface<'_, S> {
    fn size(&self) -> (f32, f32) {
        let (w, h) = self.inner.size();
        (w / self.scale, h / self.scale)
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba<u8>) {
        self.inner.fill_rect(rect.scaled(self.scale), color);
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) {
        self.inner
            .stroke_rect(rect.scaled(self.scale), &stroke.scaled(self.scale));
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Rgba<u8>) {
        self.inner
            .fill_rounded_rect(rect.scaled(self.scale), radius * self.scale, color);
    }

    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f32, stroke: &Stroke) {
        self.inner.stroke_rounded_rect(
            rect.scaled(self.scale),
            radius * self.scale,
            &stroke.scaled(self.scale),
        );
    }

    fn line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        self.inner.line(
            from.scaled(self.scale),
            to.scaled(self.scale),
            &stroke.scaled(self.scale),
        );
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba<u8>) {
        self.inner
            .fill_circle(center.scaled(self.scale), radius * self.scale, color);
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, stroke: &Stroke) {
        self.inner.stroke_circle(
            center.scaled(self.scale),
            radius * self.scale,
            &stroke.scaled(self.scale),
        );
    }

    fn text(&mut self, anchor: Point, text: &str, style: &TextStyle) {
        self.inner
            .text(anchor.scaled(self.scale), text, &style.scaled(self.scale));
    }
}
