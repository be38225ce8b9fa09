//! Drawing surface abstraction.
//!
//! The pane renderers emit immediate-mode raster primitives through the
//! [`Surface`] trait instead of talking to a concrete backend, so the
//! same render code drives a GUI painter, a headless command recorder,
//! or any host-provided target. Backends are swappable per surface; the
//! engine never owns the surface's lifetime.

use super::base::{Color, Point, Rect, Stroke, TextStyle};

/// Immediate-mode draw-primitive sink backing one chart pane.
///
/// Coordinates are device pixels with the origin at the surface's
/// top-left corner. A renderer calling the same sequence of methods with
/// the same arguments must produce the same pixel output; the engine
/// relies on this for redraw-on-hover and redraw-on-resize.
pub trait Surface {
    /// Internal resolution of the surface in device pixels.
    fn device_size(&self) -> (f64, f64);

    /// Fill the whole surface with one color.
    fn clear(&mut self, color: Color);

    /// Stroke a single line segment.
    fn line(&mut self, from: Point, to: Point, stroke: Stroke);

    /// Stroke connected segments through `points` in order. Backends may
    /// ignore calls with fewer than two points.
    fn polyline(&mut self, points: &[Point], stroke: Stroke);

    /// Fill an axis-aligned rectangle.
    fn rect_filled(&mut self, rect: Rect, color: Color);

    /// Stroke an axis-aligned rectangle outline.
    fn rect_stroke(&mut self, rect: Rect, stroke: Stroke);

    /// Fill and stroke a circle.
    fn circle(&mut self, center: Point, radius: f64, fill: Color, stroke: Stroke);

    /// Fill a convex polygon.
    fn polygon(&mut self, points: &[Point], fill: Color);

    /// Draw a text run anchored at `pos` per the style's align/baseline.
    fn text(&mut self, pos: Point, text: &str, style: TextStyle);

    /// Measured width of `text` at `size`, device px. Used to size the
    /// floating reference-price tag to its content.
    fn text_width(&self, text: &str, size: f64) -> f64;
}

/// One recorded draw call, mirroring the [`Surface`] methods.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear(Color),
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Polyline {
        points: Vec<Point>,
        stroke: Stroke,
    },
    RectFilled {
        rect: Rect,
        color: Color,
    },
    RectStroke {
        rect: Rect,
        stroke: Stroke,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: Color,
        stroke: Stroke,
    },
    Polygon {
        points: Vec<Point>,
        fill: Color,
    },
    Text {
        pos: Point,
        text: String,
        style: TextStyle,
    },
}

/// Headless backend that records the draw-command stream.
///
/// Text width is approximated from the glyph count, which is enough for
/// layout-level assertions without a font stack.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    commands: Vec<DrawCmd>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// All commands recorded so far, in draw order.
    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    /// Drop the recorded commands, keeping the surface size.
    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl Surface for RecordingSurface {
    fn device_size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCmd::Clear(color));
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.commands.push(DrawCmd::Line { from, to, stroke });
    }

    fn polyline(&mut self, points: &[Point], stroke: Stroke) {
        self.commands.push(DrawCmd::Polyline {
            points: points.to_vec(),
            stroke,
        });
    }

    fn rect_filled(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCmd::RectFilled { rect, color });
    }

    fn rect_stroke(&mut self, rect: Rect, stroke: Stroke) {
        self.commands.push(DrawCmd::RectStroke { rect, stroke });
    }

    fn circle(&mut self, center: Point, radius: f64, fill: Color, stroke: Stroke) {
        self.commands.push(DrawCmd::Circle {
            center,
            radius,
            fill,
            stroke,
        });
    }

    fn polygon(&mut self, points: &[Point], fill: Color) {
        self.commands.push(DrawCmd::Polygon {
            points: points.to_vec(),
            fill,
        });
    }

    fn text(&mut self, pos: Point, text: &str, style: TextStyle) {
        self.commands.push(DrawCmd::Text {
            pos,
            text: text.to_string(),
            style,
        });
    }

    fn text_width(&self, text: &str, size: f64) -> f64 {
        text.chars().count() as f64 * size * 0.6
    }
}
