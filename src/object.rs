//! Domain data objects consumed by the chart engine.
//!
//! Bars and trade executions are supplied wholesale per render by the
//! host's data-fetch layer; the engine never fetches or persists them.
//! Field names mirror the journal API's JSON payloads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ChartError;

/// One day's OHLCV record, with optional pre-computed overlays.
///
/// The host delivers bars in descending-date order (most recent first).
/// Moving-average fields are `None` for days where the server did not
/// compute a value (e.g. the leading days of a period); a `None` is a
/// gap in the drawn line, never a zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub trade_amount: f64,
    #[serde(default)]
    pub change_rate: Option<f64>,
    #[serde(default)]
    pub ma5: Option<f64>,
    #[serde(default)]
    pub ma10: Option<f64>,
    #[serde(default)]
    pub ma20: Option<f64>,
    #[serde(default)]
    pub ma60: Option<f64>,
}

impl DailyBar {
    /// Candle direction: close at or above open counts as up.
    pub fn is_up(&self) -> bool {
        self.close >= self.open
    }
}

/// Direction of an executed trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    /// Single-letter glyph drawn inside the marker circle.
    pub fn glyph(&self) -> &'static str {
        match self {
            TradeSide::Buy => "B",
            TradeSide::Sell => "S",
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "Buy"),
            TradeSide::Sell => write!(f, "Sell"),
        }
    }
}

/// One executed trade, positioned on the chart by date and price.
///
/// `date` uses the broker's compact 8-digit encoding ("YYYYMMDD") and
/// must be converted with [`TradeExecution::bar_date`] before matching
/// against a bar's date key. `executed_at` is an opaque timestamp token
/// used only for tooltip display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeExecution {
    pub id: i64,
    pub date: String,
    pub price: f64,
    pub quantity: u32,
    pub side: TradeSide,
    pub order_no: String,
    pub executed_at: String,
}

impl TradeExecution {
    /// Convert the compact date key to the bar-date key space.
    pub fn bar_date(&self) -> Result<NaiveDate, ChartError> {
        if self.date.len() != 8 || !self.date.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ChartError::InvalidTradeDate(self.date.clone()));
        }
        NaiveDate::parse_from_str(&self.date, "%Y%m%d")
            .map_err(|_| ChartError::InvalidTradeDate(self.date.clone()))
    }
}
