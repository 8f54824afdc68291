use std::sync::mpsc::{Sender, channel};
use std::time::Duration;

use eframe::egui::{Area, Color32, ComboBox, Context, Frame, Id, Order, RichText, Ui, vec2};
use egui_plot::{Axis, AxisHints, Line, Plot, PlotPoints, Polygon, VLine, VPlacement};
use strum::IntoEnumIterator;

use crate::config::API;
use crate::config::plot::PLOT_CONFIG;
use crate::data::{ApiClient, FetchState};
use crate::models::{EnrichKey, Interval, PricePoint, TechRecord, prepare_series};
use crate::ui::market::controller::{ChartPane, DualChartController, EnrichOutcome, HoverPhase, ViewRange};
use crate::utils::TimeUtils;

/// Relative range shortcuts in the chart footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::EnumIter)]
enum TimeFrame {
    Day1,
    Day5,
    Month1,
    Month3,
    Month6,
    YearToDate,
    Year1,
    Year5,
    All,
}

impl TimeFrame {
    fn label(&self) -> &'static str {
        match self {
            Self::Day1 => "1D",
            Self::Day5 => "5D",
            Self::Month1 => "1M",
            Self::Month3 => "3M",
            Self::Month6 => "6M",
            Self::YearToDate => "YTD",
            Self::Year1 => "1Y",
            Self::Year5 => "5Y",
            Self::All => "All",
        }
    }

    fn start_date(&self) -> String {
        match self {
            Self::Day1 => TimeUtils::days_ago_string(1),
            Self::Day5 => TimeUtils::days_ago_string(5),
            Self::Month1 => TimeUtils::days_ago_string(30),
            Self::Month3 => TimeUtils::days_ago_string(91),
            Self::Month6 => TimeUtils::days_ago_string(182),
            Self::YearToDate => TimeUtils::year_start_string(),
            Self::Year1 => TimeUtils::days_ago_string(365),
            Self::Year5 => TimeUtils::days_ago_string(365 * 5),
            // Far enough back to cover everything the system has recorded.
            Self::All => "2020-01-01".to_string(),
        }
    }
}

/// The candlestick + MACD screen: header inputs, the two synchronized plot
/// panes, the hover/enrichment overlay and the range-shortcut footer.
pub struct MarketView {
    symbol_input: String,
    start_date: String,
    end_date: String,
    interval: Interval,
    fetch: FetchState<TechRecord>,
    controller: DualChartController,
    seen_generation: u64,
    requested: Option<(String, String, String, Interval)>,
}

impl Default for MarketView {
    fn default() -> Self {
        Self {
            symbol_input: API.defaults.symbol.to_string(),
            start_date: API.defaults.start_date.to_string(),
            end_date: API.defaults.end_date.to_string(),
            interval: Interval::default(),
            fetch: FetchState::default(),
            controller: DualChartController::default(),
            seen_generation: 0,
            requested: None,
        }
    }
}

impl MarketView {
    /// Called when the user navigates off this screen; drops the hover
    /// selection and any in-flight enrichment so nothing resolves against a
    /// hidden view.
    pub fn teardown(&mut self) {
        self.controller.reset();
    }

    pub fn ui(&mut self, ui: &mut Ui, client: &ApiClient) {
        self.fetch.poll();
        self.controller.poll_enrichment();
        self.maybe_request(ui.ctx(), client);
        self.adopt_fresh_series();

        self.header(ui);

        if let Some(error) = self.fetch.error() {
            ui.colored_label(PLOT_CONFIG.color_error, error);
        } else if self.fetch.is_loading() && !self.controller.is_ready() {
            ui.label("Loading...");
        }

        // Reserve the footer strip, then give the rest to the two panes.
        let footer_height = 28.0;
        let plot_height = (ui.available_height() - footer_height).max(100.0);

        if self.controller.is_ready() {
            let chart_origin = ui.cursor().left_top();
            self.dual_charts(ui, client, plot_height);
            self.hover_overlay(ui.ctx(), chart_origin);
        } else {
            ui.allocate_space(vec2(ui.available_width(), plot_height));
        }

        self.footer(ui);
    }

    fn header(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label("Symbol");
            ui.text_edit_singleline(&mut self.symbol_input);
            ui.label("From");
            ui.text_edit_singleline(&mut self.start_date);
            ui.label("To");
            ui.text_edit_singleline(&mut self.end_date);
            ComboBox::from_id_salt("market_interval")
                .selected_text(self.interval.label())
                .show_ui(ui, |ui| {
                    for iv in Interval::iter() {
                        ui.selectable_value(&mut self.interval, iv, iv.label());
                    }
                });
        });
        ui.separator();
    }

    /// One request per parameter-set change; superseded responses are
    /// dropped by the fetch hook's id guard.
    fn maybe_request(&mut self, ctx: &Context, client: &ApiClient) {
        if self.symbol_input.is_empty() {
            return;
        }
        let params = (
            self.symbol_input.clone(),
            self.start_date.clone(),
            self.end_date.clone(),
            self.interval,
        );
        if self.requested.as_ref() == Some(&params) {
            return;
        }
        let url = client.market_url(&params.0, &params.1, &params.2, params.3);
        self.fetch.request(ctx, url);
        self.requested = Some(params);
    }

    fn adopt_fresh_series(&mut self) {
        if self.fetch.generation() == self.seen_generation {
            return;
        }
        self.seen_generation = self.fetch.generation();
        let series = prepare_series(self.fetch.data());
        self.controller.set_series(
            series,
            self.symbol_input.clone(),
            self.interval.as_str(),
            self.interval.seconds(),
        );
    }

    fn dual_charts(&mut self, ui: &mut Ui, client: &ApiClient, total_height: f32) {
        let price_height = total_height * PLOT_CONFIG.price_pane_share;
        let macd_height = total_height - price_height;

        let mut pointer_x: Option<f64> = None;
        self.pane(ui, ChartPane::Price, price_height, &mut pointer_x);
        self.pane(ui, ChartPane::Macd, macd_height, &mut pointer_x);

        let hovered = pointer_x.and_then(|x| self.controller.snap_timestamp(x));
        if let Some(key) = self.controller.on_hover(hovered) {
            let (tx, rx) = channel();
            spawn_enrichment(ui.ctx().clone(), client.enrichment_url(&key), key.clone(), tx);
            self.controller.enrichment_started(key, rx);
        }
    }

    fn pane(&mut self, ui: &mut Ui, pane: ChartPane, height: f32, pointer_x: &mut Option<f64>) {
        let forced = self.controller.take_range_for(pane);
        let seed = if self.controller.shared_range().is_none() {
            self.controller.default_range()
        } else {
            None
        };
        let hover_ts = self.controller.hover_timestamp();
        let interval_secs = self.controller.interval_secs();

        let plot_id = match pane {
            ChartPane::Price => "market_price_pane",
            ChartPane::Macd => "market_macd_pane",
        };

        // The series is borrowed inside the closure, so split it off first.
        let series: Vec<PricePoint> = self.controller.series().to_vec();

        let response = Plot::new(plot_id)
            .height(height)
            .custom_x_axes(vec![time_axis()])
            .label_formatter(|_, _| String::new())
            .allow_double_click_reset(false)
            .show(ui, |plot_ui| {
                if let Some(range) = seed {
                    plot_ui.set_plot_bounds_x(range.min..=range.max);
                }
                if let Some(range) = forced {
                    plot_ui.set_plot_bounds_x(range.min..=range.max);
                }
                match pane {
                    ChartPane::Price => draw_price_pane(plot_ui, &series, interval_secs),
                    ChartPane::Macd => draw_macd_pane(plot_ui, &series, interval_secs),
                }
                if let Some(ts) = hover_ts {
                    plot_ui.vline(
                        VLine::new("", ts as f64)
                            .color(Color32::from_gray(140))
                            .width(1.0),
                    );
                }
                if let Some(coord) = plot_ui.pointer_coordinate() {
                    *pointer_x = Some(coord.x);
                }
            });

        let bounds = response.transform.bounds();
        self.controller.observe_bounds(
            pane,
            ViewRange {
                min: *bounds.range_x().start(),
                max: *bounds.range_x().end(),
            },
        );
    }

    fn hover_overlay(&self, ctx: &Context, chart_origin: eframe::egui::Pos2) {
        let Some(point) = self.controller.hovered_point() else {
            return;
        };
        let phase = self.controller.hover_phase();

        Area::new(Id::new("market_hover_panel"))
            .order(Order::Foreground)
            .fixed_pos(chart_origin + vec2(16.0, 16.0))
            .show(ctx, |ui| {
                Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(format!(
                        "O: {:.2} | C: {:.2} | L: {:.2} | H: {:.2}",
                        point.open, point.close, point.low, point.high
                    ));
                    ui.label(format!(
                        "Upper BB: {:.2} | Middle BB: {:.2} | Lower BB: {:.2}",
                        point.upper_band, point.middle_band, point.lower_band
                    ));
                    ui.label(format!(
                        "MACD: {:.2} | Signal: {:.2} | Histogram: {:.2}",
                        point.macd, point.macd_signal, point.macd_histogram
                    ));
                    ui.label(format!("Time: {}", TimeUtils::epoch_to_spot_time(point.time)));
                    ui.separator();
                    match phase {
                        HoverPhase::Hovering { .. } | HoverPhase::Enriching { .. } => {
                            ui.label("Loading AI data...");
                        }
                        HoverPhase::Enriched { record, .. } => {
                            let pl_text = record
                                .profit_and_loss
                                .map(|v| format!("{v:.2}"))
                                .unwrap_or_else(|| "N/A".to_string());
                            let pl_color = match record.profit_and_loss {
                                Some(v) if v > 0.0 => PLOT_CONFIG.color_profit,
                                Some(_) => PLOT_CONFIG.color_loss,
                                None => PLOT_CONFIG.color_text_subdued,
                            };
                            ui.horizontal(|ui| {
                                ui.label("P&L:");
                                ui.colored_label(pl_color, pl_text);
                            });
                            ui.label(format!(
                                "Entry Type: {}",
                                record.entry_type.as_deref().unwrap_or("N/A")
                            ));
                            ui.label(format!(
                                "Entry Price: {}",
                                record
                                    .entry_price
                                    .map(|v| format!("{v:.2}"))
                                    .unwrap_or_else(|| "N/A".to_string())
                            ));
                        }
                        HoverPhase::Unavailable { .. } => {
                            ui.label("AI data not available");
                        }
                        HoverPhase::Idle => {}
                    }
                });
            });
    }

    fn footer(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            for tf in TimeFrame::iter() {
                if ui.small_button(tf.label()).clicked() {
                    self.start_date = tf.start_date();
                    self.end_date = TimeUtils::today_string();
                }
            }
            ui.with_layout(
                eframe::egui::Layout::right_to_left(eframe::egui::Align::Center),
                |ui| {
                    ui.label(RichText::new(TimeUtils::now_utc_string()).weak());
                },
            );
        });
        // Keep the clock ticking even when nothing else repaints.
        ui.ctx().request_repaint_after(Duration::from_secs(1));
    }
}

fn time_axis() -> AxisHints<'static> {
    AxisHints::new(Axis::X)
        .label("Time")
        .formatter(|mark, _range| TimeUtils::epoch_to_axis_label(mark.value as i64))
        .placement(VPlacement::Bottom)
}

fn draw_price_pane(plot_ui: &mut egui_plot::PlotUi, series: &[PricePoint], interval_secs: i64) {
    for point in series {
        draw_candle(plot_ui, point, interval_secs);
    }
    for (name, accessor) in [
        ("Upper BB", (|p: &PricePoint| p.upper_band) as fn(&PricePoint) -> f64),
        ("Middle BB", |p: &PricePoint| p.middle_band),
        ("Lower BB", |p: &PricePoint| p.lower_band),
    ] {
        let points: Vec<[f64; 2]> = series.iter().map(|p| [p.time as f64, accessor(p)]).collect();
        plot_ui.line(
            Line::new(name, PlotPoints::new(points))
                .color(PLOT_CONFIG.band_color)
                .width(PLOT_CONFIG.band_line_width),
        );
    }
}

fn draw_macd_pane(plot_ui: &mut egui_plot::PlotUi, series: &[PricePoint], interval_secs: i64) {
    // Histogram bars first so the lines draw over them. Green above zero,
    // red below.
    let half_w = interval_secs as f64 * PLOT_CONFIG.histogram_width_pct / 2.0;
    for point in series {
        let color = if point.macd_histogram >= 0.0 {
            PLOT_CONFIG.candle_bullish_color
        } else {
            PLOT_CONFIG.candle_bearish_color
        };
        draw_bar(plot_ui, point.time as f64, point.macd_histogram, half_w, color);
    }

    let macd: Vec<[f64; 2]> = series.iter().map(|p| [p.time as f64, p.macd]).collect();
    let signal: Vec<[f64; 2]> = series
        .iter()
        .map(|p| [p.time as f64, p.macd_signal])
        .collect();
    plot_ui.line(
        Line::new("MACD", PlotPoints::new(macd))
            .color(PLOT_CONFIG.macd_color)
            .width(PLOT_CONFIG.macd_line_width),
    );
    plot_ui.line(
        Line::new("Signal", PlotPoints::new(signal))
            .color(PLOT_CONFIG.macd_signal_color)
            .width(PLOT_CONFIG.macd_line_width),
    );
}

fn draw_candle(plot_ui: &mut egui_plot::PlotUi, point: &PricePoint, interval_secs: i64) {
    let x = point.time as f64;
    let color = if point.close >= point.open {
        PLOT_CONFIG.candle_bullish_color
    } else {
        PLOT_CONFIG.candle_bearish_color
    };

    // Wick
    plot_ui.line(
        Line::new("", PlotPoints::new(vec![[x, point.low], [x, point.high]]))
            .color(color)
            .width(PLOT_CONFIG.candle_wick_width),
    );

    // Body (dojis get a sliver of height so they stay visible)
    let top_raw = point.open.max(point.close);
    let bottom = point.open.min(point.close);
    let top = if (top_raw - bottom).abs() < f64::EPSILON {
        bottom + bottom.abs().max(1e-9) * 0.0001
    } else {
        top_raw
    };
    let half_w = interval_secs as f64 * PLOT_CONFIG.candle_width_pct / 2.0;
    draw_rect(plot_ui, x, half_w, bottom, top, color);
}

fn draw_bar(plot_ui: &mut egui_plot::PlotUi, x: f64, value: f64, half_w: f64, color: Color32) {
    let (bottom, top) = if value >= 0.0 { (0.0, value) } else { (value, 0.0) };
    if (top - bottom).abs() < f64::EPSILON {
        return;
    }
    draw_rect(plot_ui, x, half_w, bottom, top, color);
}

fn draw_rect(
    plot_ui: &mut egui_plot::PlotUi,
    x: f64,
    half_w: f64,
    bottom: f64,
    top: f64,
    color: Color32,
) {
    let pts = vec![
        [x - half_w, bottom],
        [x + half_w, bottom],
        [x + half_w, top],
        [x - half_w, top],
    ];
    plot_ui.polygon(
        Polygon::new("", PlotPoints::new(pts))
            .fill_color(color)
            .stroke(eframe::egui::Stroke::NONE),
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn spawn_enrichment(ctx: Context, url: String, key: EnrichKey, tx: Sender<EnrichOutcome>) {
    std::thread::spawn(move || {
        let outcome = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt
                .block_on(crate::data::get_enrichment(&url))
                .map_err(|e| format!("{e:#}")),
            Err(e) => Err(format!("failed to create runtime: {e}")),
        };
        let _ = tx.send((key, outcome));
        ctx.request_repaint();
    });
}

#[cfg(target_arch = "wasm32")]
fn spawn_enrichment(ctx: Context, url: String, key: EnrichKey, tx: Sender<EnrichOutcome>) {
    wasm_bindgen_futures::spawn_local(async move {
        let outcome = crate::data::get_enrichment(&url)
            .await
            .map_err(|e| format!("{e:#}"));
        let _ = tx.send((key, outcome));
        ctx.request_repaint();
    });
}
