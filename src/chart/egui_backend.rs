//! egui painter backend for the chart surfaces.

use egui::{Align2, Color32, FontId, Painter, Pos2, Shape, StrokeKind};

use super::base::{Color, Point, Rect, Stroke, TextAlign, TextBaseline, TextStyle};
use super::surface::Surface;

/// [`Surface`] adapter over an `egui::Painter` clipped to a pane rect.
///
/// Device pixels map 1:1 onto egui points relative to the rect origin;
/// the host picks the rect size to match the engine's internal
/// resolution. Bold text renders in the default proportional font
/// (egui font ids carry no weight).
pub struct EguiSurface<'a> {
    painter: &'a Painter,
    rect: egui::Rect,
}

impl<'a> EguiSurface<'a> {
    pub fn new(painter: &'a Painter, rect: egui::Rect) -> Self {
        Self { painter, rect }
    }

    fn pos(&self, point: Point) -> Pos2 {
        Pos2::new(
            self.rect.min.x + point.x as f32,
            self.rect.min.y + point.y as f32,
        )
    }

    fn egui_rect(&self, rect: Rect) -> egui::Rect {
        egui::Rect::from_min_max(self.pos(rect.min), self.pos(rect.max))
    }

    fn color(color: Color) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
    }

    fn stroke(stroke: Stroke) -> egui::Stroke {
        egui::Stroke::new(stroke.width as f32, Self::color(stroke.color))
    }

    fn font(size: f64) -> FontId {
        FontId::proportional(size as f32)
    }

    fn anchor(style: &TextStyle) -> Align2 {
        match (style.align, style.baseline) {
            (TextAlign::Left, TextBaseline::Top) => Align2::LEFT_TOP,
            (TextAlign::Left, TextBaseline::Middle) => Align2::LEFT_CENTER,
            (TextAlign::Center, TextBaseline::Top) => Align2::CENTER_TOP,
            (TextAlign::Center, TextBaseline::Middle) => Align2::CENTER_CENTER,
            (TextAlign::Right, TextBaseline::Top) => Align2::RIGHT_TOP,
            (TextAlign::Right, TextBaseline::Middle) => Align2::RIGHT_CENTER,
        }
    }

    fn stroke_path(&mut self, points: Vec<Pos2>, stroke: Stroke) {
        if points.len() < 2 {
            return;
        }
        match stroke.dash {
            Some([dash, gap]) => {
                self.painter.extend(Shape::dashed_line(
                    &points,
                    Self::stroke(stroke),
                    dash as f32,
                    gap as f32,
                ));
            }
            None => {
                self.painter.add(Shape::line(points, Self::stroke(stroke)));
            }
        }
    }
}

impl Surface for EguiSurface<'_> {
    fn device_size(&self) -> (f64, f64) {
        (self.rect.width() as f64, self.rect.height() as f64)
    }

    fn clear(&mut self, color: Color) {
        self.painter.rect_filled(self.rect, 0.0, Self::color(color));
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.stroke_path(vec![self.pos(from), self.pos(to)], stroke);
    }

    fn polyline(&mut self, points: &[Point], stroke: Stroke) {
        let points: Vec<Pos2> = points.iter().map(|p| self.pos(*p)).collect();
        self.stroke_path(points, stroke);
    }

    fn rect_filled(&mut self, rect: Rect, color: Color) {
        self.painter
            .rect_filled(self.egui_rect(rect), 0.0, Self::color(color));
    }

    fn rect_stroke(&mut self, rect: Rect, stroke: Stroke) {
        self.painter.rect_stroke(
            self.egui_rect(rect),
            0.0,
            Self::stroke(stroke),
            StrokeKind::Inside,
        );
    }

    fn circle(&mut self, center: Point, radius: f64, fill: Color, stroke: Stroke) {
        self.painter.circle(
            self.pos(center),
            radius as f32,
            Self::color(fill),
            Self::stroke(stroke),
        );
    }

    fn polygon(&mut self, points: &[Point], fill: Color) {
        let points: Vec<Pos2> = points.iter().map(|p| self.pos(*p)).collect();
        self.painter.add(Shape::convex_polygon(
            points,
            Self::color(fill),
            egui::Stroke::NONE,
        ));
    }

    fn text(&mut self, pos: Point, text: &str, style: TextStyle) {
        self.painter.text(
            self.pos(pos),
            Self::anchor(&style),
            text,
            Self::font(style.size),
            Self::color(style.color),
        );
    }

    fn text_width(&self, text: &str, size: f64) -> f64 {
        let galley =
            self.painter
                .layout_no_wrap(text.to_string(), Self::font(size), Color32::WHITE);
        galley.size().x as f64
    }
}
