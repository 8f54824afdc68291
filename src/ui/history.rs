use eframe::egui::{ComboBox, Ui};
use strum::IntoEnumIterator;

use crate::config::API;
use crate::config::plot::PLOT_CONFIG;
use crate::data::{ApiClient, FetchState};
use crate::models::{LevelFilter, LogEntry, filter_entries, sort_entries};
use crate::ui::monitor::log_table;
use crate::ui::styles::{UiStyleExt, heading_text};
use crate::utils::TimeUtils;

/// Historical log search: a date range, a severity filter and the same table
/// as the live monitor, fetched on demand instead of polled.
pub struct HistoryView {
    start_date: String,
    end_date: String,
    filter: LevelFilter,
    fetch: FetchState<LogEntry>,
    entries: Vec<LogEntry>,
    seen_generation: u64,
    searched: bool,
}

impl Default for HistoryView {
    fn default() -> Self {
        Self {
            start_date: TimeUtils::days_ago_string(API.logs.history_lookback_days),
            end_date: TimeUtils::today_string(),
            filter: LevelFilter::default(),
            fetch: FetchState::default(),
            entries: Vec::new(),
            seen_generation: 0,
            searched: false,
        }
    }
}

impl HistoryView {
    pub fn ui(&mut self, ui: &mut Ui, client: &ApiClient) {
        self.fetch.poll();
        if self.fetch.generation() != self.seen_generation {
            self.seen_generation = self.fetch.generation();
            self.entries = self.fetch.data().to_vec();
            sort_entries(&mut self.entries);
        }

        ui.horizontal(|ui| {
            ui.label(heading_text("Log History"));
            ui.separator();
            ui.label("From");
            ui.text_edit_singleline(&mut self.start_date);
            ui.label("To");
            ui.text_edit_singleline(&mut self.end_date);
            ComboBox::from_id_salt("history_level")
                .selected_text(self.filter.label())
                .show_ui(ui, |ui| {
                    for filter in LevelFilter::iter() {
                        ui.selectable_value(&mut self.filter, filter, filter.label());
                    }
                });
            if ui.button("Refresh").clicked() {
                let url = client.log_search_url(&self.start_date, &self.end_date);
                self.fetch.request(ui.ctx(), url);
                self.searched = true;
            }
            if let Some(error) = self.fetch.error() {
                ui.colored_label(PLOT_CONFIG.color_error, error);
            } else if self.fetch.is_loading() {
                ui.label_subdued("Searching...");
            }
        });
        ui.separator();

        let rows = filter_entries(&self.entries, self.filter);
        if rows.is_empty() {
            if self.searched && !self.fetch.is_loading() {
                ui.label_subdued("No log entries in this range");
            } else {
                ui.label_subdued("Pick a date range and press Refresh");
            }
            return;
        }
        ui.label_subdued(format!("{} entries", rows.len()));
        log_table(ui, &rows, false);
    }
}
