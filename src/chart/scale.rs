//! Derived view model: visible window, axis domains, pixel mapping.
//!
//! One [`ChartView`] is computed per data change and passed by value to
//! both pane renderers and the hit-tester. The panes never derive their
//! own window; rounding drift between two independently computed windows
//! would desynchronize the crosshair.

use chrono::NaiveDate;

use super::base::{Insets, Point, Rect};
use crate::object::DailyBar;

/// Default number of most-recent bars shown.
pub const DEFAULT_WINDOW_SIZE: usize = 50;

/// Price-margin fraction applied on each side of the candle range.
const PRICE_MARGIN_RATIO: f64 = 0.1;

/// The visible window and its axis domains, immutable per render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    /// Visible bars in ascending date order; index 0 is the oldest.
    pub window: Vec<DailyBar>,
    /// Lower price bound after margin expansion.
    pub price_min: f64,
    /// Upper price bound after margin expansion.
    pub price_max: f64,
    /// Largest single-day volume in the window.
    pub volume_max: u64,
}

impl ChartView {
    /// Derive the view from the host's bar list.
    ///
    /// `bars` follows the caller convention of descending date order;
    /// the first `window_size` entries are reversed into chronological
    /// order. Returns `None` when there is nothing to show, which is the
    /// engine's "no data" signal rather than an error.
    pub fn compute(bars: &[DailyBar], window_size: usize) -> Option<Self> {
        let take = window_size.min(bars.len());
        if take == 0 {
            return None;
        }

        let mut window: Vec<DailyBar> = bars[..take].to_vec();
        window.reverse();

        let mut price_min = f64::INFINITY;
        let mut price_max = f64::NEG_INFINITY;
        let mut volume_max = 0u64;
        for bar in &window {
            for price in [bar.open, bar.high, bar.low, bar.close] {
                price_min = price_min.min(price);
                price_max = price_max.max(price);
            }
            volume_max = volume_max.max(bar.volume);
        }

        // 10% margin on each side; zero for a flat window, in which case
        // the y mapping degrades to a centered flat line downstream.
        let margin = (price_max - price_min) * PRICE_MARGIN_RATIO;
        if price_max == price_min {
            tracing::debug!(price = price_min, "flat price window, zero margin");
        }

        Some(Self {
            window,
            price_min: price_min - margin,
            price_max: price_max + margin,
            volume_max,
        })
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Window index of the bar with the given date key, if visible.
    pub fn index_of_date(&self, date: NaiveDate) -> Option<usize> {
        self.window.iter().position(|bar| bar.date == date)
    }
}

/// Pixel mapping for one pane: inset layout plus the slot-based x axis
/// and the value-based y axis.
///
/// Both pane renderers and the pointer controller construct their
/// geometry through this type, so "where was it drawn" and "what is
/// under the pointer" can never drift apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneGeometry {
    inner: Rect,
    slots: usize,
}

impl PaneGeometry {
    pub fn new(device_width: f64, device_height: f64, insets: Insets, slots: usize) -> Self {
        let inner = Rect::from_min_max(
            Point::new(insets.left, insets.top),
            Point::new(device_width - insets.right, device_height - insets.bottom),
        );
        Self { inner, slots }
    }

    /// Inner plotting area (insets applied).
    pub fn inner(&self) -> Rect {
        self.inner
    }

    /// Width of one bar slot. The window of `n` bars divides the inner
    /// width into `n + 1` slots, centering bars between half-slot gutters.
    pub fn slot_width(&self) -> f64 {
        self.inner.width() / (self.slots + 1) as f64
    }

    /// Center x of the bar at `index`.
    pub fn x(&self, index: usize) -> f64 {
        self.inner.left() + self.slot_width() * (index as f64 + 0.5)
    }

    /// Inverse of [`PaneGeometry::x`]: the bar index under a device-space
    /// x coordinate, or `None` left of the pane or past the last bar.
    pub fn index_at(&self, device_x: f64) -> Option<usize> {
        let slot = self.slot_width();
        if slot <= 0.0 {
            return None;
        }
        let relative_x = device_x - self.inner.left();
        if relative_x < 0.0 {
            return None;
        }
        let index = (relative_x / slot - 0.5).floor();
        if index < 0.0 || index >= self.slots as f64 {
            None
        } else {
            Some(index as usize)
        }
    }

    /// Map a value in `[min, max]` to a device y, top = max. A degenerate
    /// range collapses to the vertical center of the pane so flat data
    /// draws as one horizontal line instead of dividing by zero.
    pub fn value_y(&self, value: f64, min: f64, max: f64) -> f64 {
        let range = max - min;
        if range == 0.0 {
            return self.inner.center().y;
        }
        self.inner.top() + self.inner.height() * (1.0 - (value - min) / range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::base::PRICE_PANE_INSETS;

    fn bar(date: &str, open: f64, high: f64, low: f64, close: f64, volume: u64) -> DailyBar {
        DailyBar {
            date: date.parse().unwrap(),
            open,
            high,
            low,
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

    fn descending_bars(count: usize) -> Vec<DailyBar> {
        // Most recent first, like the API delivers them.
        (0..count)
            .map(|i| {
                let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Duration::days((count - 1 - i) as i64);
                let base = 100.0 + (count - 1 - i) as f64;
                bar(
                    &date.to_string(),
                    base,
                    base + 5.0,
                    base - 5.0,
                    base + 2.0,
                    1_000 + (count - 1 - i) as u64,
                )
            })
            .collect()
    }

    #[test]
    fn test_empty_input_yields_no_view() {
        assert!(ChartView::compute(&[], DEFAULT_WINDOW_SIZE).is_none());
        assert!(ChartView::compute(&descending_bars(10), 0).is_none());
    }

    #[test]
    fn test_window_truncation_and_order() {
        let bars = descending_bars(200);
        let view = ChartView::compute(&bars, 50).unwrap();

        assert_eq!(view.len(), 50);
        // Index 0 is the 50th-most-recent bar, the window ascends from there.
        assert_eq!(view.window[0].date, bars[49].date);
        assert_eq!(view.window[49].date, bars[0].date);
        assert!(view
            .window
            .windows(2)
            .all(|pair| pair[0].date < pair[1].date));
    }

    #[test]
    fn test_price_margin_is_strict() {
        let view = ChartView::compute(&descending_bars(20), 50).unwrap();
        let low = view
            .window
            .iter()
            .map(|b| b.low)
            .fold(f64::INFINITY, f64::min);
        let high = view
            .window
            .iter()
            .map(|b| b.high)
            .fold(f64::NEG_INFINITY, f64::max);

        assert!(view.price_min < low);
        assert!(view.price_max > high);
        let raw_range = high - low;
        assert!((view.price_max - view.price_min - raw_range * 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_flat_window_has_zero_margin() {
        let bars = vec![bar("2024-01-02", 100.0, 100.0, 100.0, 100.0, 500)];
        let view = ChartView::compute(&bars, 50).unwrap();
        assert_eq!(view.price_min, 100.0);
        assert_eq!(view.price_max, 100.0);
    }

    #[test]
    fn test_volume_max() {
        let view = ChartView::compute(&descending_bars(10), 50).unwrap();
        assert_eq!(view.volume_max, 1_009);

        let silent = vec![
            bar("2024-01-02", 100.0, 101.0, 99.0, 100.0, 0),
            bar("2024-01-01", 100.0, 101.0, 99.0, 100.0, 0),
        ];
        assert_eq!(ChartView::compute(&silent, 50).unwrap().volume_max, 0);
    }

    #[test]
    fn test_index_of_date() {
        let view = ChartView::compute(&descending_bars(10), 50).unwrap();
        let first = view.window[0].date;
        assert_eq!(view.index_of_date(first), Some(0));
        assert_eq!(
            view.index_of_date(NaiveDate::from_ymd_opt(1999, 1, 1).unwrap()),
            None
        );
    }

    #[test]
    fn test_x_index_round_trip() {
        let geometry = PaneGeometry::new(1000.0, 430.0, PRICE_PANE_INSETS, 50);
        for index in 0..50 {
            assert_eq!(geometry.index_at(geometry.x(index)), Some(index));
        }
    }

    #[test]
    fn test_index_at_bounds() {
        let geometry = PaneGeometry::new(1000.0, 430.0, PRICE_PANE_INSETS, 50);
        // Left of the pane.
        assert_eq!(geometry.index_at(0.0), None);
        assert_eq!(geometry.index_at(19.9), None);
        // Inside the leading half-slot gutter.
        assert_eq!(geometry.index_at(20.1), None);
        // Past the last bar.
        assert_eq!(geometry.index_at(999.0), None);

        let empty = PaneGeometry::new(1000.0, 430.0, PRICE_PANE_INSETS, 0);
        assert_eq!(empty.index_at(500.0), None);
    }

    #[test]
    fn test_value_y_mapping() {
        let geometry = PaneGeometry::new(1000.0, 430.0, PRICE_PANE_INSETS, 50);
        let inner = geometry.inner();

        assert_eq!(geometry.value_y(100.0, 0.0, 100.0), inner.top());
        assert_eq!(geometry.value_y(0.0, 0.0, 100.0), inner.bottom());
        assert_eq!(geometry.value_y(50.0, 0.0, 100.0), inner.center().y);

        // Degenerate range pins everything to the center line.
        assert_eq!(geometry.value_y(123.0, 123.0, 123.0), inner.center().y);
    }
}
