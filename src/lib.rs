//! Chart Engine - interactive daily candlestick chart rendering.
//!
//! A self-contained rendering and hit-testing library for the daily
//! chart of a stock trading journal: OHLC candlesticks, moving-average
//! overlays, a volume histogram, an optional reference-price line and
//! buy/sell execution markers, drawn onto two linked raster surfaces.
//! The engine consumes already-computed per-day values; it never
//! fetches or persists data.
//!
//! Rendering is immediate-mode through the [`chart::Surface`] trait.
//! A headless [`chart::RecordingSurface`] backend ships for tests and
//! snapshots, and an egui backend is available behind the `gui` feature.

pub mod chart;
pub mod error;
pub mod object;
pub mod util;

// Re-export commonly used types
pub use chart::{ChartView, HoverState, PricePane, VolumePane};
pub use error::ChartError;
pub use object::{DailyBar, TradeExecution, TradeSide};
