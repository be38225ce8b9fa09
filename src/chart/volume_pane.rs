//! Volume pane: grid, day-over-day colored histogram bars, date tick
//! labels and the hover crosshair.

use super::base::{
    Point, Rect, Stroke, TextAlign, TextBaseline, TextStyle, BACKGROUND_COLOR, BODY_WIDTH_RATIO,
    CROSSHAIR_COLOR, DASH_PATTERN, DOWN_COLOR, GRID_COLOR, GRID_RATIOS, Insets, LABEL_COLOR,
    UP_COLOR, VOLUME_PANE_INSETS,
};
use super::scale::{ChartView, PaneGeometry};
use super::surface::Surface;
use crate::util::{format_date_label, format_volume};

/// Right edge of the axis labels, inset from the surface edge.
const LABEL_RIGHT_MARGIN: f64 = 5.0;
/// Gap between the pane bottom and the date tick labels.
const DATE_LABEL_GAP: f64 = 5.0;
/// Date labels are drawn every this many bars (plus the last bar).
const DATE_LABEL_STEP: usize = 5;

/// Renderer for the volume histogram pane.
///
/// Shares the horizontal layout of [`super::price_pane::PricePane`] so
/// the crosshair lines up across both panes. Bar color tracks volume
/// momentum (more volume than yesterday = up color), not the candle
/// direction; the first bar has no yesterday and falls back to its own
/// candle direction.
#[derive(Debug, Clone)]
pub struct VolumePane {
    insets: Insets,
}

impl Default for VolumePane {
    fn default() -> Self {
        Self::new()
    }
}

impl VolumePane {
    pub fn new() -> Self {
        Self {
            insets: VOLUME_PANE_INSETS,
        }
    }

    /// Draw the full pane for one view.
    pub fn render(&self, surface: &mut dyn Surface, view: &ChartView, hover: Option<usize>) {
        let (width, height) = surface.device_size();
        surface.clear(BACKGROUND_COLOR);

        let geometry = PaneGeometry::new(width, height, self.insets, view.len());
        self.draw_grid(surface, &geometry, view, width);
        self.draw_bars(surface, &geometry, view);
        self.draw_date_labels(surface, &geometry, view, height);
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
        let volume_max = view.volume_max as f64;
        for ratio in GRID_RATIOS {
            let volume = volume_max * ratio;
            let y = geometry.value_y(volume, 0.0, volume_max);
            surface.line(
                Point::new(inner.left(), y),
                Point::new(inner.right(), y),
                Stroke::solid(1.0, GRID_COLOR),
            );
            surface.text(
                Point::new(width - LABEL_RIGHT_MARGIN, y),
                &format_volume(volume),
                TextStyle::label(LABEL_COLOR, TextAlign::Right, TextBaseline::Middle),
            );
        }
    }

    fn draw_bars(&self, surface: &mut dyn Surface, geometry: &PaneGeometry, view: &ChartView) {
        if view.volume_max == 0 {
            return;
        }
        let inner = geometry.inner();
        let bar_width = geometry.slot_width() * BODY_WIDTH_RATIO;
        for (index, bar) in view.window.iter().enumerate() {
            let x = geometry.x(index);
            let bar_height = inner.height() * bar.volume as f64 / view.volume_max as f64;

            let color = if index == 0 {
                // No previous day: fall back to the candle direction.
                if bar.is_up() {
                    UP_COLOR
                } else {
                    DOWN_COLOR
                }
            } else if bar.volume > view.window[index - 1].volume {
                UP_COLOR
            } else {
                DOWN_COLOR
            };

            surface.rect_filled(
                Rect::from_min_size(
                    Point::new(x - bar_width * 0.5, inner.bottom() - bar_height),
                    bar_width,
                    bar_height,
                ),
                color,
            );
        }
    }

    fn draw_date_labels(
        &self,
        surface: &mut dyn Surface,
        geometry: &PaneGeometry,
        view: &ChartView,
        height: f64,
    ) {
        let y = height - self.insets.bottom + DATE_LABEL_GAP;
        let last = view.len().saturating_sub(1);
        for (index, bar) in view.window.iter().enumerate() {
            if index % DATE_LABEL_STEP == 0 || index == last {
                surface.text(
                    Point::new(geometry.x(index), y),
                    &format_date_label(bar.date),
                    TextStyle::label(LABEL_COLOR, TextAlign::Center, TextBaseline::Top),
                );
            }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::price_pane::PricePane;
    use crate::chart::surface::{DrawCmd, RecordingSurface};
    use crate::object::DailyBar;

    fn bar(date: &str, open: f64, close: f64, volume: u64) -> DailyBar {
        DailyBar {
            date: date.parse().unwrap(),
            open,
            high: open.max(close) + 1.0,
            low: open.min(close) - 1.0,
            close,
            volume,
            trade_amount: 0.0,
            change_rate: None,
            ma5: None,
            ma10: None,
            ma20: None,
            ma60: None,
        }
    }

    fn view_of(window: Vec<DailyBar>) -> ChartView {
        let mut descending = window;
        descending.reverse();
        ChartView::compute(&descending, 50).unwrap()
    }

    fn bar_fills(commands: &[DrawCmd]) -> Vec<(Rect, crate::chart::base::Color)> {
        commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::RectFilled { rect, color } => Some((*rect, *color)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_momentum_color_rule() {
        let view = view_of(vec![
            bar("2024-03-11", 100.0, 99.0, 100),
            bar("2024-03-12", 99.0, 101.0, 200),
            bar("2024-03-13", 101.0, 102.0, 150),
        ]);
        let mut surface = RecordingSurface::new(1000.0, 130.0);
        VolumePane::new().render(&mut surface, &view, None);

        let fills = bar_fills(surface.commands());
        assert_eq!(fills.len(), 3);
        // First bar: its own candle fell, so down color.
        assert_eq!(fills[0].1, DOWN_COLOR);
        // Volume rose, then fell.
        assert_eq!(fills[1].1, UP_COLOR);
        assert_eq!(fills[2].1, DOWN_COLOR);
    }

    #[test]
    fn test_bar_heights_scale_to_max() {
        let view = view_of(vec![
            bar("2024-03-11", 100.0, 101.0, 500),
            bar("2024-03-12", 101.0, 102.0, 1_000),
        ]);
        let mut surface = RecordingSurface::new(1000.0, 130.0);
        VolumePane::new().render(&mut surface, &view, None);

        let fills = bar_fills(surface.commands());
        let inner_height = 130.0 - VOLUME_PANE_INSETS.top - VOLUME_PANE_INSETS.bottom;
        assert!((fills[0].0.height() - inner_height * 0.5).abs() < 1e-9);
        assert!((fills[1].0.height() - inner_height).abs() < 1e-9);
    }

    #[test]
    fn test_all_zero_volume_draws_no_bars() {
        let view = view_of(vec![
            bar("2024-03-11", 100.0, 101.0, 0),
            bar("2024-03-12", 101.0, 102.0, 0),
        ]);
        let mut surface = RecordingSurface::new(1000.0, 130.0);
        VolumePane::new().render(&mut surface, &view, None);

        assert!(bar_fills(surface.commands()).is_empty());
    }

    #[test]
    fn test_date_label_cadence() {
        let window: Vec<DailyBar> = (0..12)
            .map(|i| bar(&format!("2024-03-{:02}", i + 1), 100.0, 101.0, 100 + i as u64))
            .collect();
        let view = view_of(window);

        let mut surface = RecordingSurface::new(1000.0, 130.0);
        VolumePane::new().render(&mut surface, &view, None);

        let date_labels: Vec<&str> = surface
            .commands()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::Text { text, style, .. }
                    if style.baseline == TextBaseline::Top =>
                {
                    Some(text.as_str())
                }
                _ => None,
            })
            .collect();

        // Every 5th bar plus the last one.
        assert_eq!(date_labels, vec!["3/1", "3/6", "3/11", "3/12"]);
    }

    #[test]
    fn test_crosshair_aligns_with_price_pane() {
        let window: Vec<DailyBar> = (0..10)
            .map(|i| bar(&format!("2024-03-{:02}", i + 1), 100.0, 101.0, 100 + i as u64))
            .collect();
        let view = view_of(window);

        let crosshair_x = |commands: &[DrawCmd]| -> f64 {
            commands
                .iter()
                .find_map(|cmd| match cmd {
                    DrawCmd::Line { from, stroke, .. } if stroke.color == CROSSHAIR_COLOR => {
                        Some(from.x)
                    }
                    _ => None,
                })
                .unwrap()
        };

        // The panes have different heights but identical horizontal layout.
        let mut price_surface = RecordingSurface::new(1000.0, 430.0);
        PricePane::new().render(&mut price_surface, &view, &[], None, Some(4));
        let mut volume_surface = RecordingSurface::new(1000.0, 130.0);
        VolumePane::new().render(&mut volume_surface, &view, Some(4));

        assert_eq!(
            crosshair_x(price_surface.commands()),
            crosshair_x(volume_surface.commands())
        );
    }
}
