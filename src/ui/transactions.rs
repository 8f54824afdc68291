use eframe::egui::{ComboBox, Ui};
use egui_plot::{Axis, AxisHints, Bar, BarChart, Plot, VPlacement};
use strum::IntoEnumIterator;

use crate::config::API;
use crate::config::plot::PLOT_CONFIG;
use crate::data::{ApiClient, FetchState};
use crate::models::{Interval, TimePeriod, TransactionRecord, pl_totals, transaction_points};
use crate::ui::styles::{UiStyleExt, format_signed, get_outcome_color, heading_text};
use crate::ui::ui_config::UI_CONFIG;
use crate::utils::TimeUtils;

/// Trade history screen: per-trade P&L histogram over time with a totals
/// strip and a detail line for the hovered bar.
pub struct TransactionsView {
    period: TimePeriod,
    symbol: String,
    interval: Interval,
    fetch: FetchState<TransactionRecord>,
    requested: Option<(TimePeriod, String, Interval)>,
    hovered_ts: Option<i64>,
}

impl Default for TransactionsView {
    fn default() -> Self {
        Self {
            period: TimePeriod::default(),
            symbol: API.defaults.symbol.to_string(),
            interval: Interval::default(),
            fetch: FetchState::default(),
            requested: None,
            hovered_ts: None,
        }
    }
}

impl TransactionsView {
    pub fn ui(&mut self, ui: &mut Ui, client: &ApiClient) {
        self.fetch.poll();
        let params = (self.period, self.symbol.clone(), self.interval);
        if !self.symbol.is_empty() && self.requested.as_ref() != Some(&params) {
            let url = client.transactions_url(self.period, &self.symbol, self.interval);
            self.fetch.request(ui.ctx(), url);
            self.requested = Some(params);
            self.hovered_ts = None;
        }

        ui.horizontal(|ui| {
            ui.label(heading_text("Transactions"));
            ui.separator();
            ui.text_edit_singleline(&mut self.symbol);
            ComboBox::from_id_salt("tx_interval")
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
        });
        ui.separator();

        if let Some(error) = self.fetch.error() {
            ui.colored_label(PLOT_CONFIG.color_error, error);
        }

        let records = self.fetch.data();
        if records.is_empty() {
            if self.fetch.is_loading() {
                ui.label("Loading...");
            } else if self.fetch.error().is_none() {
                ui.label_subdued("No transactions for this period");
            }
            return;
        }

        self.totals_strip(ui, records);
        self.detail_line(ui, records);

        let points = transaction_points(records);
        let bar_width = self.interval.seconds() as f64 * PLOT_CONFIG.histogram_width_pct;
        let bars: Vec<Bar> = points
            .iter()
            .map(|&(ts, pl)| {
                Bar::new(ts as f64, pl)
                    .width(bar_width)
                    .fill(get_outcome_color(pl))
            })
            .collect();
        let mut next_hover = None;

        Plot::new("transactions_histogram")
            .height(ui.available_height())
            .custom_x_axes(vec![
                AxisHints::new(Axis::X)
                    .formatter(|mark, _range| TimeUtils::epoch_to_axis_label(mark.value as i64))
                    .placement(VPlacement::Bottom),
            ])
            .label_formatter(|_, _| String::new())
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new("P&L", bars));
                if let Some(coord) = plot_ui.pointer_coordinate() {
                    next_hover = nearest_bar(&points, coord.x, self.interval.seconds());
                }
            });

        self.hovered_ts = next_hover;
    }

    fn totals_strip(&self, ui: &mut Ui, records: &[TransactionRecord]) {
        let totals = pl_totals(records);
        ui.horizontal(|ui| {
            UI_CONFIG.card_frame().show(ui, |ui| {
                ui.metric(
                    "Gross Profit",
                    &format!("{:.2}", totals.positive),
                    PLOT_CONFIG.color_profit,
                );
            });
            UI_CONFIG.card_frame().show(ui, |ui| {
                ui.metric(
                    "Gross Loss",
                    &format!("-{:.2}", totals.negative),
                    PLOT_CONFIG.color_loss,
                );
            });
            UI_CONFIG.card_frame().show(ui, |ui| {
                ui.metric(
                    "Net",
                    &format_signed(totals.net()),
                    get_outcome_color(totals.net()),
                );
            });
            UI_CONFIG.card_frame().show(ui, |ui| {
                ui.metric(
                    "Trades",
                    &records.len().to_string(),
                    PLOT_CONFIG.color_info,
                );
            });
        });
        ui.add_space(6.0);
    }

    fn detail_line(&self, ui: &mut Ui, records: &[TransactionRecord]) {
        let Some(ts) = self.hovered_ts else {
            ui.label_subdued("Hover a bar for trade details");
            return;
        };
        let Some(record) = records.iter().find(|r| r.timestamp() == Some(ts)) else {
            ui.label_subdued("Hover a bar for trade details");
            return;
        };
        ui.horizontal(|ui| {
            ui.label_subdued(TimeUtils::epoch_to_spot_time(ts));
            ui.colored_label(get_outcome_color(record.pl), format_signed(record.pl));
            ui.label_subdued(format!(
                "{} {} | pred {:.3}{}",
                record.tradetype,
                record.direction,
                record.pred,
                if record.losscut { " | losscut" } else { "" }
            ));
        });
    }
}

fn nearest_bar(points: &[(i64, f64)], x: f64, interval_secs: i64) -> Option<i64> {
    let half = interval_secs as f64 / 2.0;
    points
        .iter()
        .map(|&(ts, _)| (ts, (ts as f64 - x).abs()))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .filter(|(_, dist)| *dist <= half)
        .map(|(ts, _)| ts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_bar_respects_half_interval() {
        let points = vec![(3600, 1.0), (7200, -2.0)];
        assert_eq!(nearest_bar(&points, 3700.0, 3600), Some(3600));
        assert_eq!(nearest_bar(&points, 5400.0, 3600), Some(3600));
        assert_eq!(nearest_bar(&points, 12000.0, 3600), None);
    }
}
