//! Price pane: grid, candlesticks, moving averages, reference line,
//! trade markers and the hover crosshair.

use super::base::{
    Color, Insets, Point, Rect, Stroke, TextAlign, TextBaseline, TextStyle, BACKGROUND_COLOR,
    BODY_WIDTH_RATIO, CONNECTOR_COLOR, CROSSHAIR_COLOR, DASH_PATTERN, DOWN_COLOR, GRID_COLOR,
    GRID_RATIOS, LABEL_COLOR, LABEL_FONT_SIZE, MA10_COLOR, MA20_COLOR, MA5_COLOR, MA60_COLOR,
    MARKER_FONT_SIZE, MARKER_OFFSET_RATIO, MARKER_RADIUS, MIN_BODY_HEIGHT, PRICE_PANE_INSETS,
    REFERENCE_COLOR, UP_COLOR,
};
use super::scale::{ChartView, PaneGeometry};
use super::surface::Surface;
use crate::object::{DailyBar, TradeExecution, TradeSide};
use crate::util::format_price_label;

/// Padding around the reference-tag text, device px.
const REFERENCE_TAG_PADDING: f64 = 4.0;
/// Arrowhead edge length for the marker connector, device px.
const ARROW_HEAD_SIZE: f64 = 5.0;
/// Right edge of the axis labels, inset from the surface edge.
const LABEL_RIGHT_MARGIN: f64 = 5.0;

/// Moving-average overlays in draw order: longest period first so the
/// faster lines sit on top.
const MA_SERIES: [(fn(&DailyBar) -> Option<f64>, Color); 4] = [
    (|bar| bar.ma60, MA60_COLOR),
    (|bar| bar.ma20, MA20_COLOR),
    (|bar| bar.ma10, MA10_COLOR),
    (|bar| bar.ma5, MA5_COLOR),
];

fn side_color(side: TradeSide) -> Color {
    match side {
        TradeSide::Buy => UP_COLOR,
        TradeSide::Sell => DOWN_COLOR,
    }
}

/// Renderer for the candlestick pane.
///
/// `render` is a pure function of its inputs: identical arguments
/// produce an identical draw-command stream, which the host relies on
/// for redraw-on-hover and redraw-on-resize. Trades sharing a date draw
/// at the same coordinates with no stacking; whether coincident trades
/// should be deduped or fanned out is an open product question, so the
/// overlap is preserved as-is.
#[derive(Debug, Clone)]
pub struct PricePane {
    insets: Insets,
}

impl Default for PricePane {
    fn default() -> Self {
        Self::new()
    }
}

impl PricePane {
    pub fn new() -> Self {
        Self {
            insets: PRICE_PANE_INSETS,
        }
    }

    /// Draw the full pane for one view.
    pub fn render(
        &self,
        surface: &mut dyn Surface,
        view: &ChartView,
        trades: &[TradeExecution],
        reference_price: Option<f64>,
        hover: Option<usize>,
    ) {
        let (width, height) = surface.device_size();
        surface.clear(BACKGROUND_COLOR);

        let geometry = PaneGeometry::new(width, height, self.insets, view.len());
        self.draw_grid(surface, &geometry, view, width);
        self.draw_candles(surface, &geometry, view);
        self.draw_ma_lines(surface, &geometry, view);
        if let Some(price) = reference_price {
            self.draw_reference_line(surface, &geometry, view, price, width);
        }
        self.draw_markers(surface, &geometry, view, trades);
        if let Some(index) = hover {
            self.draw_crosshair(surface, &geometry, view, index);
        }
    }

    /// Empty-state rendering when the calculator produced no view.
    pub fn render_placeholder(&self, surface: &mut dyn Surface) {
        let (width, height) = surface.device_size();
        surface.clear(BACKGROUND_COLOR);
        surface.text(
            Point::new(width * 0.5, height * 0.5),
            "No chart data",
            TextStyle::label(LABEL_COLOR, TextAlign::Center, TextBaseline::Middle),
        );
    }

    fn draw_grid(
        &self,
        surface: &mut dyn Surface,
        geometry: &PaneGeometry,
        view: &ChartView,
        width: f64,
    ) {
        let inner = geometry.inner();
        let range = view.price_max - view.price_min;
        for ratio in GRID_RATIOS {
            let price = view.price_min + range * ratio;
            let y = geometry.value_y(price, view.price_min, view.price_max);
            surface.line(
                Point::new(inner.left(), y),
                Point::new(inner.right(), y),
                Stroke::solid(1.0, GRID_COLOR),
            );
            surface.text(
                Point::new(width - LABEL_RIGHT_MARGIN, y),
                &format_price_label(price),
                TextStyle::label(LABEL_COLOR, TextAlign::Right, TextBaseline::Middle),
            );
        }
    }

    fn draw_candles(&self, surface: &mut dyn Surface, geometry: &PaneGeometry, view: &ChartView) {
        let body_width = geometry.slot_width() * BODY_WIDTH_RATIO;
        for (index, bar) in view.window.iter().enumerate() {
            let x = geometry.x(index);
            let color = if bar.is_up() { UP_COLOR } else { DOWN_COLOR };

            let y_high = geometry.value_y(bar.high, view.price_min, view.price_max);
            let y_low = geometry.value_y(bar.low, view.price_min, view.price_max);
            surface.line(
                Point::new(x, y_high),
                Point::new(x, y_low),
                Stroke::solid(1.0, color),
            );

            let y_open = geometry.value_y(bar.open, view.price_min, view.price_max);
            let y_close = geometry.value_y(bar.close, view.price_min, view.price_max);
            let body_top = y_open.min(y_close);
            let body_height = (y_open - y_close).abs().max(MIN_BODY_HEIGHT);
            surface.rect_filled(
                Rect::from_min_size(
                    Point::new(x - body_width * 0.5, body_top),
                    body_width,
                    body_height,
                ),
                color,
            );
        }
    }

    fn draw_ma_lines(&self, surface: &mut dyn Surface, geometry: &PaneGeometry, view: &ChartView) {
        for (select, color) in MA_SERIES {
            let stroke = Stroke::solid(1.5, color);
            let mut segment: Vec<Point> = Vec::new();
            for (index, bar) in view.window.iter().enumerate() {
                match select(bar) {
                    // A missing value breaks the line; it is a gap, not a zero.
                    None => {
                        if !segment.is_empty() {
                            surface.polyline(&segment, stroke);
                            segment.clear();
                        }
                    }
                    Some(value) => {
                        segment.push(Point::new(
                            geometry.x(index),
                            geometry.value_y(value, view.price_min, view.price_max),
                        ));
                    }
                }
            }
            if !segment.is_empty() {
                surface.polyline(&segment, stroke);
            }
        }
    }

    fn draw_reference_line(
        &self,
        surface: &mut dyn Surface,
        geometry: &PaneGeometry,
        view: &ChartView,
        price: f64,
        width: f64,
    ) {
        if price <= view.price_min || price >= view.price_max {
            return;
        }
        let inner = geometry.inner();
        let y = geometry.value_y(price, view.price_min, view.price_max);
        surface.line(
            Point::new(inner.left(), y),
            Point::new(inner.right(), y),
            Stroke::dashed(1.0, REFERENCE_COLOR, DASH_PATTERN),
        );

        // Floating tag sized to its text, right edge shared with the
        // grid labels.
        let text = format_price_label(price);
        let text_width = surface.text_width(&text, LABEL_FONT_SIZE);
        let text_right = width - LABEL_RIGHT_MARGIN;
        let half_height = LABEL_FONT_SIZE * 0.5 + REFERENCE_TAG_PADDING;
        let tag = Rect::from_min_max(
            Point::new(
                text_right - text_width - REFERENCE_TAG_PADDING,
                y - half_height,
            ),
            Point::new(text_right + REFERENCE_TAG_PADDING, y + half_height),
        );
        surface.rect_filled(tag, BACKGROUND_COLOR);
        surface.rect_stroke(tag, Stroke::solid(1.0, REFERENCE_COLOR));
        surface.text(
            Point::new(text_right, y),
            &text,
            TextStyle::label(REFERENCE_COLOR, TextAlign::Right, TextBaseline::Middle),
        );
    }

    fn draw_markers(
        &self,
        surface: &mut dyn Surface,
        geometry: &PaneGeometry,
        view: &ChartView,
        trades: &[TradeExecution],
    ) {
        let slot = geometry.slot_width();
        for trade in trades {
            let date = match trade.bar_date() {
                Ok(date) => date,
                Err(err) => {
                    tracing::debug!(trade_id = trade.id, %err, "skipping marker");
                    continue;
                }
            };
            let Some(index) = view.index_of_date(date) else {
                // Most trades fall outside the visible window.
                tracing::debug!(trade_id = trade.id, %date, "marker outside window");
                continue;
            };

            let candle_x = geometry.x(index);
            let price_y = geometry.value_y(trade.price, view.price_min, view.price_max);
            let center = Point::new(candle_x - slot * MARKER_OFFSET_RATIO, price_y);
            let color = side_color(trade.side);

            surface.circle(
                center,
                MARKER_RADIUS,
                BACKGROUND_COLOR,
                Stroke::solid(1.0, color),
            );
            surface.text(
                center,
                trade.side.glyph(),
                TextStyle {
                    size: MARKER_FONT_SIZE,
                    bold: true,
                    color,
                    align: TextAlign::Center,
                    baseline: TextBaseline::Middle,
                },
            );

            // Elbow connector from the circle's right edge toward the candle.
            let arrow_start = Point::new(center.x + MARKER_RADIUS, price_y);
            let arrow_length = (candle_x - 5.0 - arrow_start.x) / 4.0;
            let head = Point::new(arrow_start.x + arrow_length, price_y);
            surface.line(arrow_start, head, Stroke::solid(1.5, CONNECTOR_COLOR));
            surface.polygon(
                &[
                    head,
                    Point::new(head.x - ARROW_HEAD_SIZE, head.y - ARROW_HEAD_SIZE * 0.5),
                    Point::new(head.x - ARROW_HEAD_SIZE, head.y + ARROW_HEAD_SIZE * 0.5),
                ],
                CONNECTOR_COLOR,
            );
        }
    }

    fn draw_crosshair(
        &self,
        surface: &mut dyn Surface,
        geometry: &PaneGeometry,
        view: &ChartView,
        index: usize,
    ) {
        if index >= view.len() {
            return;
        }
        let inner = geometry.inner();
        let x = geometry.x(index);
        surface.line(
            Point::new(x, inner.top()),
            Point::new(x, inner.bottom()),
            Stroke::dashed(1.0, CROSSHAIR_COLOR, DASH_PATTERN),
        );
    }
}
