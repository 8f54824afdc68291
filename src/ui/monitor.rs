use std::time::Duration;

use eframe::egui::{Align, ComboBox, Ui};
use egui_extras::{Column, TableBuilder};
use strum::IntoEnumIterator;
use web_time::Instant;

use crate::config::API;
use crate::config::plot::PLOT_CONFIG;
use crate::data::{ApiClient, FetchState};
use crate::models::{LevelFilter, LogEntry, ScrollTracker, filter_entries, sort_entries};
use crate::ui::styles::{UiStyleExt, heading_text};
use crate::utils::TimeUtils;

/// Live system monitor: the newest trading-log entries, re-polled on a fixed
/// cadence, with a severity filter and opt-out auto-scroll.
pub struct MonitorView {
    filter: LevelFilter,
    auto_scroll: bool,
    fetch: FetchState<LogEntry>,
    entries: Vec<LogEntry>,
    seen_generation: u64,
    last_poll: Option<Instant>,
    scroll: ScrollTracker,
}

impl Default for MonitorView {
    fn default() -> Self {
        Self {
            filter: LevelFilter::default(),
            auto_scroll: true,
            fetch: FetchState::default(),
            entries: Vec::new(),
            seen_generation: 0,
            last_poll: None,
            scroll: ScrollTracker::default(),
        }
    }
}

impl MonitorView {
    pub fn ui(&mut self, ui: &mut Ui, client: &ApiClient) {
        self.fetch.poll();
        self.maybe_poll(ui, client);

        if self.fetch.generation() != self.seen_generation {
            self.seen_generation = self.fetch.generation();
            self.entries = self.fetch.data().to_vec();
            sort_entries(&mut self.entries);
        }

        ui.horizontal(|ui| {
            ui.label(heading_text("System Monitor"));
            ui.separator();
            ComboBox::from_id_salt("monitor_level")
                .selected_text(self.filter.label())
                .show_ui(ui, |ui| {
                    for filter in LevelFilter::iter() {
                        ui.selectable_value(&mut self.filter, filter, filter.label());
                    }
                });
            ui.checkbox(&mut self.auto_scroll, "Auto-scroll");
            if let Some(error) = self.fetch.error() {
                ui.colored_label(PLOT_CONFIG.color_error, error);
            } else if self.fetch.is_loading() {
                ui.label_subdued("Refreshing...");
            }
        });
        ui.separator();

        let rows = filter_entries(&self.entries, self.filter);
        if rows.is_empty() {
            ui.label_subdued("No log entries");
            return;
        }

        let jump = self
            .scroll
            .should_scroll_to_bottom(self.entries.len(), self.auto_scroll);
        log_table(ui, &rows, jump);
    }

    /// Refetch the tail immediately on entry and every poll interval after.
    fn maybe_poll(&mut self, ui: &Ui, client: &ApiClient) {
        let interval = Duration::from_secs(API.logs.poll_interval_secs);
        let due = match self.last_poll {
            None => true,
            Some(at) => at.elapsed() >= interval,
        };
        if due && !self.fetch.is_loading() {
            self.fetch
                .request(ui.ctx(), client.log_tail_url(API.logs.tail_entries));
            self.last_poll = Some(Instant::now());
        }
        ui.ctx().request_repaint_after(interval);
    }

    /// Drop the poll timer so re-entering the screen refetches at once.
    pub fn teardown(&mut self) {
        self.last_poll = None;
    }
}

pub(crate) fn log_table(ui: &mut Ui, rows: &[&LogEntry], jump_to_bottom: bool) {
    let mut table = TableBuilder::new(ui)
        .striped(true)
        .resizable(false)
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder());
    if jump_to_bottom {
        table = table.scroll_to_row(rows.len().saturating_sub(1), Some(Align::BOTTOM));
    }
    table
        .header(18.0, |mut header| {
            header.col(|ui| {
                ui.strong("Time");
            });
            header.col(|ui| {
                ui.strong("Level");
            });
            header.col(|ui| {
                ui.strong("Message");
            });
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let entry = rows[row.index()];
                let level = entry.level();
                row.col(|ui| {
                    let time = entry
                        .timestamp()
                        .map(TimeUtils::epoch_to_spot_time)
                        .unwrap_or_else(|| entry.date.clone());
                    ui.label_subdued(time);
                });
                row.col(|ui| {
                    ui.colored_label(level.color(), level.as_str());
                });
                row.col(|ui| {
                    ui.label(&entry.message);
                });
            });
        });
}
