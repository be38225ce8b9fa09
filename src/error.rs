//! Error types for the chart engine.
//!
//! Rendering never fails: every draw-path problem (missing data, flat
//! price range, out-of-window markers) degrades locally. The only
//! fallible operation the engine exposes is the conversion of a trade's
//! compact date key, and callers inside the engine always recover from
//! it by skipping the trade.

use thiserror::Error;

/// Unified error type for the chart engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    /// A trade carried a date that is not an 8-digit YYYYMMDD key.
    #[error("invalid trade date `{0}`: expected 8-digit YYYYMMDD")]
    InvalidTradeDate(String),
}
