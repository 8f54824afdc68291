//! Plot visualization configuration

use eframe::egui::Color32;

pub struct PlotConfig {
    pub candle_bullish_color: Color32,
    pub candle_bearish_color: Color32,
    /// Candle body width as a fraction of the bar interval
    pub candle_width_pct: f64,
    pub candle_wick_width: f32,

    pub band_color: Color32,
    pub band_line_width: f32,

    pub macd_color: Color32,
    pub macd_signal_color: Color32,
    pub macd_line_width: f32,
    /// Histogram bar width as a fraction of the bar interval
    pub histogram_width_pct: f64,

    pub balance_line_color: Color32,
    pub balance_line_width: f32,

    // --- SEMANTIC COLORS ---
    pub color_profit: Color32,
    pub color_loss: Color32,
    pub color_info: Color32,
    pub color_warning: Color32,
    pub color_error: Color32,
    pub color_text_subdued: Color32,

    /// Extra x-range padding applied right of the newest bar, as a fraction
    /// of the full data width (the "right offset" of the shared view)
    pub right_offset_pct: f64,
    /// Y padding for auto-fitted panes
    pub plot_y_padding_pct: f64,

    /// Height split between the price pane and the oscillator pane
    pub price_pane_share: f32,

    /// One distinct color per rolling model variant
    pub model_line_colors: [Color32; 12],
    pub model_line_width: f32,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    candle_bullish_color: Color32::from_rgb(38, 166, 154),
    candle_bearish_color: Color32::from_rgb(239, 83, 80),
    candle_width_pct: 0.7,
    candle_wick_width: 1.0,

    band_color: Color32::from_rgb(90, 120, 255),
    band_line_width: 1.0,

    macd_color: Color32::from_rgb(80, 140, 255),
    macd_signal_color: Color32::from_rgb(255, 99, 71),
    macd_line_width: 2.0,
    histogram_width_pct: 0.6,

    balance_line_color: Color32::from_rgb(130, 202, 157),
    balance_line_width: 3.0,

    color_profit: Color32::from_rgb(0, 200, 83),
    color_loss: Color32::from_rgb(229, 57, 53),
    color_info: Color32::from_rgb(76, 175, 80),
    color_warning: Color32::from_rgb(251, 192, 45),
    color_error: Color32::from_rgb(229, 57, 53),
    color_text_subdued: Color32::GRAY,

    right_offset_pct: 0.03,
    plot_y_padding_pct: 0.05,

    price_pane_share: 0.66,

    model_line_colors: [
        Color32::from_rgb(136, 132, 216),
        Color32::from_rgb(130, 202, 157),
        Color32::from_rgb(255, 198, 88),
        Color32::from_rgb(255, 115, 0),
        Color32::from_rgb(0, 136, 254),
        Color32::from_rgb(0, 196, 159),
        Color32::from_rgb(255, 187, 40),
        Color32::from_rgb(255, 128, 66),
        Color32::from_rgb(164, 222, 108),
        Color32::from_rgb(208, 237, 87),
        Color32::from_rgb(199, 134, 216),
        Color32::from_rgb(255, 99, 132),
    ],
    model_line_width: 2.0,
};
