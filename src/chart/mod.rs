//! Interactive daily-chart rendering.
//!
//! Two linked raster panes (price and volume) are drawn from one shared
//! [`ChartView`], and pointer input is resolved back into domain objects
//! through the same pixel mapping the renderers use, so "what is under
//! the pointer" can never drift from "what was drawn".

pub mod base;
pub mod cursor;
pub mod price_pane;
pub mod scale;
pub mod surface;
pub mod volume_pane;

#[cfg(feature = "gui")]
pub mod egui_backend;

// Re-export commonly used types
pub use base::{Color, Insets, Point, Rect, Stroke, TextAlign, TextBaseline, TextStyle};
pub use cursor::{bar_index_at, bar_info_text, marker_at, marker_tooltip, DisplayRect, HoverState};
pub use price_pane::PricePane;
pub use scale::{ChartView, PaneGeometry, DEFAULT_WINDOW_SIZE};
pub use surface::{DrawCmd, RecordingSurface, Surface};
pub use volume_pane::VolumePane;

#[cfg(feature = "gui")]
pub use egui_backend::EguiSurface;
