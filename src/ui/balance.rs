use eframe::egui::Ui;
use egui_plot::{Axis, AxisHints, Line, Plot, PlotPoints, VLine, VPlacement};
use strum::IntoEnumIterator;

use crate::config::plot::PLOT_CONFIG;
use crate::data::{ApiClient, FetchState};
use crate::models::{AccountPoint, BalanceSummary, TimePeriod, balance_points};
use crate::ui::styles::{UiStyleExt, format_signed, get_outcome_color, heading_text};
use crate::ui::ui_config::UI_CONFIG;
use crate::utils::TimeUtils;

/// Account balance screen: period selector, the three statistics cards and
/// the equity curve. Hovering a point on the curve rebases the cards to it.
pub struct BalanceView {
    period: TimePeriod,
    fetch: FetchState<AccountPoint>,
    requested: Option<TimePeriod>,
    // Set while drawing the plot, read by next frame's cards.
    hovered: Option<(i64, f64)>,
}

impl Default for BalanceView {
    fn default() -> Self {
        Self {
            period: TimePeriod::default(),
            fetch: FetchState::default(),
            requested: None,
            hovered: None,
        }
    }
}

impl BalanceView {
    pub fn ui(&mut self, ui: &mut Ui, client: &ApiClient) {
        self.fetch.poll();
        if self.requested != Some(self.period) {
            self.fetch.request(ui.ctx(), client.account_url(self.period));
            self.requested = Some(self.period);
            self.hovered = None;
        }

        ui.horizontal(|ui| {
            ui.label(heading_text("Account Balance"));
            ui.separator();
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

        let points = self.fetch.data();
        if points.is_empty() {
            if self.fetch.is_loading() {
                ui.label("Loading...");
            } else if self.fetch.error().is_none() {
                ui.label_subdued("No account data for this period");
            }
            return;
        }

        self.stats_cards(ui, points);

        let series = balance_points(points);
        let hover_ts = self.hovered.map(|(ts, _)| ts);
        let mut next_hover = None;

        Plot::new("balance_curve")
            .height(ui.available_height())
            .custom_x_axes(vec![
                AxisHints::new(Axis::X)
                    .formatter(|mark, _range| TimeUtils::epoch_to_date_string(mark.value as i64))
                    .placement(VPlacement::Bottom),
            ])
            .label_formatter(|_, _| String::new())
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new("Total Assets", PlotPoints::new(series.clone()))
                        .color(PLOT_CONFIG.balance_line_color)
                        .width(PLOT_CONFIG.balance_line_width),
                );
                if let Some(ts) = hover_ts {
                    plot_ui.vline(
                        VLine::new("", ts as f64)
                            .color(PLOT_CONFIG.color_text_subdued)
                            .width(1.0),
                    );
                }
                if let Some(coord) = plot_ui.pointer_coordinate() {
                    next_hover = nearest_point(&series, coord.x);
                }
            });

        self.hovered = next_hover;
    }

    fn stats_cards(&self, ui: &mut Ui, points: &[AccountPoint]) {
        // Cards track the pointer when a point is hovered, else the newest.
        let (balance, label) = match self.hovered {
            Some((ts, balance)) => (balance, TimeUtils::epoch_to_date_string(ts)),
            None => {
                let latest = points.last().map(|p| p.total_assets).unwrap_or(0.0);
                (latest, "Latest".to_string())
            }
        };
        let summary = BalanceSummary::against_first(points, balance);

        ui.horizontal(|ui| {
            UI_CONFIG.card_frame().show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.label_subdued(format!("Balance ({label})"));
                    ui.label(heading_text(format!("{:.2}", summary.balance)));
                });
            });
            UI_CONFIG.card_frame().show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.label_subdued("Profit / Loss");
                    ui.colored_label(
                        get_outcome_color(summary.profit_loss),
                        format_signed(summary.profit_loss),
                    );
                });
            });
            UI_CONFIG.card_frame().show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.label_subdued("Return");
                    ui.colored_label(
                        get_outcome_color(summary.profit_loss_pct),
                        format!("{}%", format_signed(summary.profit_loss_pct)),
                    );
                });
            });
        });
        ui.add_space(6.0);
    }
}

fn nearest_point(series: &[[f64; 2]], x: f64) -> Option<(i64, f64)> {
    series
        .iter()
        .min_by(|a, b| (a[0] - x).abs().total_cmp(&(b[0] - x).abs()))
        .map(|p| (p[0] as i64, p[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_point_picks_closest_x() {
        let series = vec![[100.0, 1.0], [200.0, 2.0], [300.0, 3.0]];
        assert_eq!(nearest_point(&series, 180.0), Some((200, 2.0)));
        assert_eq!(nearest_point(&series, 90.0), Some((100, 1.0)));
    }

    #[test]
    fn nearest_point_on_empty_series() {
        assert_eq!(nearest_point(&[], 100.0), None);
    }
}
