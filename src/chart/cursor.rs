//! Pointer resolution: display-space to device-space conversion, bar
//! index lookup under the cursor, trade-marker hit-testing and the
//! host-facing hover/tooltip text.
//!
//! Everything here is pure computation; no drawing happens. The host
//! wires the results to its hover state and to the annotation form it
//! opens on marker click.

use chrono::NaiveDateTime;

use super::base::{Point, MARKER_OFFSET_RATIO, MARKER_RADIUS, PRICE_PANE_INSETS};
use super::scale::{ChartView, PaneGeometry};
use crate::object::{DailyBar, TradeExecution};
use crate::util::{format_price_label, format_thousands, format_volume};

/// Where the surface sits in the consumer's display space (CSS pixels).
///
/// Surfaces render at a fixed internal resolution independent of their
/// displayed size, so every pointer event must be rescaled by
/// `device / display` before any geometry comparison. The ratio is never
/// assumed to be 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// The currently hovered bar index, owned by the pointer controller.
///
/// Renderers consume the value read-only per draw; the host pushes
/// changes outward through its own callback when `set` reports one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverState {
    pub index: Option<usize>,
}

impl HoverState {
    /// Replace the hovered index. Returns true when the value changed.
    pub fn set(&mut self, index: Option<usize>) -> bool {
        let changed = self.index != index;
        self.index = index;
        changed
    }

    /// Clear on pointer-leave. Returns true when the value changed.
    pub fn clear(&mut self) -> bool {
        self.set(None)
    }
}

/// Rescale a display-space pointer position into device pixels.
fn device_point(
    client_x: f64,
    client_y: f64,
    rect: &DisplayRect,
    device_size: (f64, f64),
) -> Option<Point> {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return None;
    }
    let scale_x = device_size.0 / rect.width;
    let scale_y = device_size.1 / rect.height;
    Some(Point::new(
        (client_x - rect.left) * scale_x,
        (client_y - rect.top) * scale_y,
    ))
}

/// Resolve the bar index under a pointer position, or `None` when the
/// pointer is left of the pane or past the last bar.
///
/// Both panes share their horizontal insets, so the same call serves
/// pointer events from either surface; only the x coordinate matters.
pub fn bar_index_at(
    client_x: f64,
    client_y: f64,
    rect: &DisplayRect,
    device_size: (f64, f64),
    bar_count: usize,
) -> Option<usize> {
    let pointer = device_point(client_x, client_y, rect, device_size)?;
    let geometry = PaneGeometry::new(device_size.0, device_size.1, PRICE_PANE_INSETS, bar_count);
    geometry.index_at(pointer.x)
}

/// Hit-test the rendered trade markers against a pointer position on
/// the price surface.
///
/// Marker centers are recomputed with the exact render-path geometry; a
/// hit is a Euclidean distance within the drawn radius. Markers are
/// scanned linearly in input order and the first hit wins, which also
/// resolves coincident same-day markers deterministically.
pub fn marker_at<'a>(
    client_x: f64,
    client_y: f64,
    rect: &DisplayRect,
    device_size: (f64, f64),
    trades: &'a [TradeExecution],
    view: &ChartView,
) -> Option<&'a TradeExecution> {
    let pointer = device_point(client_x, client_y, rect, device_size)?;
    let geometry = PaneGeometry::new(device_size.0, device_size.1, PRICE_PANE_INSETS, view.len());
    let slot = geometry.slot_width();

    for trade in trades {
        let Ok(date) = trade.bar_date() else {
            continue;
        };
        let Some(index) = view.index_of_date(date) else {
            continue;
        };
        let center = Point::new(
            geometry.x(index) - slot * MARKER_OFFSET_RATIO,
            geometry.value_y(trade.price, view.price_min, view.price_max),
        );
        if pointer.distance(center) <= MARKER_RADIUS {
            return Some(trade);
        }
    }
    None
}

/// Multi-line readout for the hovered bar, for the host's info panel.
pub fn bar_info_text(view: &ChartView, index: usize) -> String {
    let Some(bar) = view.window.get(index) else {
        return String::new();
    };
    info_lines(bar)
}

fn info_lines(bar: &DailyBar) -> String {
    format!(
        "Date\n{}\n\nOpen\n{}\n\nHigh\n{}\n\nLow\n{}\n\nClose\n{}\n\nVolume\n{}",
        bar.date,
        format_price_label(bar.open),
        format_price_label(bar.high),
        format_price_label(bar.low),
        format_price_label(bar.close),
        format_volume(bar.volume as f64),
    )
}

/// Tooltip text for a trade marker.
///
/// The execution timestamp is display-only: when the token does not
/// parse, the raw string is shown instead of failing the tooltip.
pub fn marker_tooltip(trade: &TradeExecution) -> String {
    format!(
        "{} {} @ {}\n{}",
        trade.side,
        format_thousands(trade.quantity as i64),
        format_price_label(trade.price),
        format_executed_at(&trade.executed_at),
    )
}

fn format_executed_at(token: &str) -> String {
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(token, pattern) {
            return parsed.format("%Y-%m-%d %H:%M").to_string();
        }
    }
    token.to_string()
}
