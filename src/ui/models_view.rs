use eframe::egui::{ComboBox, Ui};
use egui_plot::{Axis, AxisHints, Line, Plot, PlotPoints, VPlacement};
use strum::IntoEnumIterator;

use crate::config::API;
use crate::config::plot::PLOT_CONFIG;
use crate::data::{ApiClient, FetchState};
use crate::models::{
    Interval, MetricKind, ModelTracePoint, TimePeriod, VARIANT_COUNT, variant_series,
};
use crate::ui::styles::{UiStyleExt, heading_text};
use crate::utils::TimeUtils;

/// Model performance screen: one rolling line per model variant, switchable
/// between the hit-rate and average-profit families. Hovering lists the
/// variants at that sample, best first.
pub struct ModelsView {
    period: TimePeriod,
    symbol: String,
    interval: Interval,
    metric: MetricKind,
    fetch: FetchState<ModelTracePoint>,
    requested: Option<(TimePeriod, String, Interval)>,
    hovered_ts: Option<i64>,
}

impl Default for ModelsView {
    fn default() -> Self {
        Self {
            period: TimePeriod::default(),
            symbol: API.defaults.symbol.to_string(),
            interval: Interval::default(),
            metric: MetricKind::default(),
            fetch: FetchState::default(),
            requested: None,
            hovered_ts: None,
        }
    }
}

impl ModelsView {
    pub fn ui(&mut self, ui: &mut Ui, client: &ApiClient) {
        self.fetch.poll();
        let params = (self.period, self.symbol.clone(), self.interval);
        if !self.symbol.is_empty() && self.requested.as_ref() != Some(&params) {
            let url = client.model_stats_url(self.period, &self.symbol, self.interval);
            self.fetch.request(ui.ctx(), url);
            self.requested = Some(params);
            self.hovered_ts = None;
        }

        ui.horizontal(|ui| {
            ui.label(heading_text("Model Performance"));
            ui.separator();
            ui.text_edit_singleline(&mut self.symbol);
            ComboBox::from_id_salt("models_interval")
                .selected_text(self.interval.label())
                .show_ui(ui, |ui| {
                    for iv in Interval::iter() {
                        ui.selectable_value(&mut self.interval, iv, iv.label());
                    }
                });
            for period in TimePeriod::iter() {
                if ui
                    .selectable_label(self.period == period, period.label())
                    .clicked()
                {
                    self.period = period;
                }
            }
            let other = match self.metric {
                MetricKind::HitRate => MetricKind::AvgProfit,
                MetricKind::AvgProfit => MetricKind::HitRate,
            };
            if ui.button(other.toggle_label()).clicked() {
                self.metric = other;
            }
        });
        ui.separator();

        if let Some(error) = self.fetch.error() {
            ui.colored_label(PLOT_CONFIG.color_error, error);
        }

        let points = self.fetch.data();
        if points.is_empty() {
            if self.fetch.is_loading() {
                ui.label("Loading...");
            } else if self.fetch.error().is_none() {
                ui.label_subdued("No tracing data for this period");
            }
            return;
        }

        self.hover_ranking(ui, points);

        let metric = self.metric;
        let serieses: Vec<Vec<[f64; 2]>> = (0..VARIANT_COUNT)
            .map(|v| variant_series(points, metric, v))
            .collect();
        let mut next_hover = None;

        Plot::new("model_traces")
            .height(ui.available_height())
            .legend(egui_plot::Legend::default())
            .custom_x_axes(vec![
                AxisHints::new(Axis::X)
                    .formatter(|mark, _range| TimeUtils::epoch_to_axis_label(mark.value as i64))
                    .placement(VPlacement::Bottom),
            ])
            .label_formatter(|_, _| String::new())
            .show(ui, |plot_ui| {
                for (variant, series) in serieses.iter().enumerate() {
                    plot_ui.line(
                        Line::new(metric.series_name(variant), PlotPoints::new(series.clone()))
                            .color(PLOT_CONFIG.model_line_colors[variant])
                            .width(PLOT_CONFIG.model_line_width),
                    );
                }
                if let Some(coord) = plot_ui.pointer_coordinate() {
                    next_hover = nearest_sample(points, coord.x);
                }
            });

        self.hovered_ts = next_hover;
    }

    /// One line of text per hovered sample: every variant's value, sorted
    /// descending so the current best model reads first.
    fn hover_ranking(&self, ui: &mut Ui, points: &[ModelTracePoint]) {
        let Some(ts) = self.hovered_ts else {
            ui.label_subdued("Hover the chart to rank variants at a sample");
            return;
        };
        let Some(point) = points.iter().find(|p| p.timestamp() == Some(ts)) else {
            ui.label_subdued("Hover the chart to rank variants at a sample");
            return;
        };

        let mut ranked: Vec<(usize, f64)> = (0..VARIANT_COUNT)
            .map(|v| (v, point.metric(self.metric, v)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        ui.horizontal_wrapped(|ui| {
            ui.label_subdued(TimeUtils::epoch_to_spot_time(ts));
            for (variant, value) in ranked {
                ui.metric(
                    &format!("v{}", variant + 1),
                    &format!("{value:.3}"),
                    PLOT_CONFIG.model_line_colors[variant],
                );
            }
        });
    }
}

fn nearest_sample(points: &[ModelTracePoint], x: f64) -> Option<i64> {
    points
        .iter()
        .filter_map(|p| p.timestamp())
        .min_by(|a, b| (*a as f64 - x).abs().total_cmp(&(*b as f64 - x).abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_sample_on_empty_points() {
        assert_eq!(nearest_sample(&[], 100.0), None);
    }
}
