//! Chart demo example showing the price and volume panes.
//!
//! Run with: cargo run --example chart_demo --features gui

use chart_engine::chart::{
    bar_index_at, bar_info_text, marker_at, marker_tooltip, ChartView, DisplayRect, EguiSurface,
    HoverState, PricePane, VolumePane, DEFAULT_WINDOW_SIZE,
};
use chart_engine::object::{DailyBar, TradeExecution, TradeSide};
use chrono::{Duration, NaiveDate};
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> eframe::Result<()> {
    setup_logging();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 700.0])
            .with_title("Chart Engine - Daily Chart Demo"),
        ..Default::default()
    };

    eframe::run_native(
        "Chart Demo",
        options,
        Box::new(|_cc| Ok(Box::new(ChartDemoApp::new()))),
    )
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

struct ChartDemoApp {
    /// Bars in descending date order, as the data service delivers them.
    bars: Vec<DailyBar>,
    trades: Vec<TradeExecution>,
    price_pane: PricePane,
    volume_pane: VolumePane,
    hover: HoverState,
    reference_price: Option<f64>,
    clicked_trade: Option<String>,
    seed: u64,
}

impl ChartDemoApp {
    fn new() -> Self {
        let mut seed = 0x9e37_79b9_7f4a_7c15;
        let bars = generate_sample_bars(120, &mut seed);
        let trades = generate_sample_trades(&bars);
        let reference_price = average_trade_price(&trades);

        Self {
            bars,
            trades,
            price_pane: PricePane::new(),
            volume_pane: VolumePane::new(),
            hover: HoverState::default(),
            reference_price,
            clicked_trade: None,
            seed,
        }
    }

    fn reload(&mut self) {
        self.bars = generate_sample_bars(120, &mut self.seed);
        self.trades = generate_sample_trades(&self.bars);
        self.reference_price = average_trade_price(&self.trades);
        self.hover.clear();
        self.clicked_trade = None;
    }
}

impl eframe::App for ChartDemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let view = ChartView::compute(&self.bars, DEFAULT_WINDOW_SIZE);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Daily Chart Demo");
                ui.separator();

                if ui.button("Reload data").clicked() {
                    self.reload();
                }
                if ui.button("Clear data").clicked() {
                    self.bars.clear();
                    self.trades.clear();
                    self.hover.clear();
                    self.clicked_trade = None;
                }

                ui.separator();
                ui.label(format!("Bars: {}", self.bars.len()));

                if let (Some(view), Some(index)) = (&view, self.hover.index) {
                    ui.separator();
                    ui.label(bar_info_text(view, index).replace('\n', " "));
                }
            });

            if let Some(tooltip) = &self.clicked_trade {
                ui.label(format!("Selected trade: {}", tooltip.replace('\n', "  ")));
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let total = ui.available_size();
            let price_height = (total.y - 8.0) * 0.75;
            let volume_height = total.y - 8.0 - price_height;

            let (price_rect, price_response) =
                ui.allocate_exact_size(egui::vec2(total.x, price_height), egui::Sense::click());
            ui.add_space(8.0);
            let (volume_rect, volume_response) =
                ui.allocate_exact_size(egui::vec2(total.x, volume_height), egui::Sense::hover());

            let Some(view) = &view else {
                let painter = ui.painter();
                self.price_pane
                    .render_placeholder(&mut EguiSurface::new(painter, price_rect));
                self.volume_pane
                    .render_placeholder(&mut EguiSurface::new(painter, volume_rect));
                return;
            };

            // The demo displays at the internal resolution, so the
            // device/display ratio is 1; the controller still derives it
            // from the rects rather than assuming so.
            let display = |rect: egui::Rect| {
                DisplayRect::new(
                    rect.min.x as f64,
                    rect.min.y as f64,
                    rect.width() as f64,
                    rect.height() as f64,
                )
            };
            let device = |rect: egui::Rect| (rect.width() as f64, rect.height() as f64);

            let mut hovered = None;
            for (rect, response) in [
                (price_rect, &price_response),
                (volume_rect, &volume_response),
            ] {
                if let Some(pos) = response.hover_pos() {
                    hovered = bar_index_at(
                        pos.x as f64,
                        pos.y as f64,
                        &display(rect),
                        device(rect),
                        view.len(),
                    );
                }
            }
            if self.hover.set(hovered) {
                tracing::debug!(index = ?self.hover.index, "hovered bar changed");
            }

            if price_response.clicked() {
                if let Some(pos) = price_response.interact_pointer_pos() {
                    if let Some(trade) = marker_at(
                        pos.x as f64,
                        pos.y as f64,
                        &display(price_rect),
                        device(price_rect),
                        &self.trades,
                        view,
                    ) {
                        tracing::info!(trade_id = trade.id, "trade marker clicked");
                        self.clicked_trade = Some(marker_tooltip(trade));
                    }
                }
            }

            let painter = ui.painter();
            self.price_pane.render(
                &mut EguiSurface::new(painter, price_rect),
                view,
                &self.trades,
                self.reference_price,
                self.hover.index,
            );
            self.volume_pane.render(
                &mut EguiSurface::new(painter, volume_rect),
                view,
                self.hover.index,
            );
        });
    }
}

/// Generate sample daily bars in descending date order.
fn generate_sample_bars(count: usize, seed: &mut u64) -> Vec<DailyBar> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 2).expect("valid date");
    let mut price = 68_000.0_f64;
    let mut ascending: Vec<DailyBar> = Vec::with_capacity(count);

    for i in 0..count {
        let change = (next_f64(seed) - 0.5) * 1_200.0;
        let open = price;
        let close = (price + change).max(1_000.0);
        let high = open.max(close) + next_f64(seed) * 400.0;
        let low = (open.min(close) - next_f64(seed) * 400.0).max(500.0);
        let volume = (80_000.0 + next_f64(seed) * 120_000.0 + change.abs() * 50.0) as u64;

        ascending.push(DailyBar {
            date: start + Duration::days(i as i64),
            open,
            high,
            low,
            close,
            volume,
            trade_amount: close * volume as f64,
            change_rate: Some(change / open * 100.0),
            ma5: None,
            ma10: None,
            ma20: None,
            ma60: None,
        });
        price = close;
    }

    let ma5 = trailing_means(&ascending, 5);
    let ma10 = trailing_means(&ascending, 10);
    let ma20 = trailing_means(&ascending, 20);
    let ma60 = trailing_means(&ascending, 60);
    for (i, bar) in ascending.iter_mut().enumerate() {
        bar.ma5 = ma5[i];
        bar.ma10 = ma10[i];
        bar.ma20 = ma20[i];
        bar.ma60 = ma60[i];
    }

    ascending.reverse();
    ascending
}

/// Trailing close-price means with a leading gap shorter than the period.
fn trailing_means(bars: &[DailyBar], period: usize) -> Vec<Option<f64>> {
    (0..bars.len())
        .map(|i| {
            if i + 1 < period {
                return None;
            }
            let sum: f64 = bars[i + 1 - period..=i].iter().map(|b| b.close).sum();
            Some(sum / period as f64)
        })
        .collect()
}

/// A few executions landing inside the default window.
fn generate_sample_trades(bars: &[DailyBar]) -> Vec<TradeExecution> {
    let picks = [
        (6usize, TradeSide::Buy),
        (13, TradeSide::Sell),
        (27, TradeSide::Buy),
    ];
    let mut trades = Vec::new();
    for (offset, side) in picks {
        if let Some(bar) = bars.get(offset) {
            trades.push(TradeExecution {
                id: offset as i64,
                date: bar.date.format("%Y%m%d").to_string(),
                price: (bar.high + bar.low) * 0.5,
                quantity: 100 * (offset as u32 + 1),
                side,
                order_no: format!("ORD-{offset:04}"),
                executed_at: format!("{} 10:15:00", bar.date),
            });
        }
    }
    trades
}

fn average_trade_price(trades: &[TradeExecution]) -> Option<f64> {
    if trades.is_empty() {
        return None;
    }
    Some(trades.iter().map(|t| t.price).sum::<f64>() / trades.len() as f64)
}

/// Simple xorshift pseudo-random number generator in [0, 1).
fn next_f64(seed: &mut u64) -> f64 {
    *seed ^= *seed << 13;
    *seed ^= *seed >> 7;
    *seed ^= *seed << 17;
    (*seed >> 11) as f64 / (1u64 << 53) as f64
}
