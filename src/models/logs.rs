use eframe::egui::Color32;
use serde::Deserialize;
use strum_macros::EnumIter;

use crate::config::plot::PLOT_CONFIG;
use crate::utils::TimeUtils;

/// One trading-log row. `level` is present on the live feed but absent from
/// the historical search, where it has to be derived from the message text.
#[derive(Debug, Clone, Deserialize)]
pub struct LogEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub serial: i64,
    pub date: String,
    pub message: String,
    #[serde(default)]
    pub level: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }

    pub fn color(&self) -> Color32 {
        match self {
            Self::Info => PLOT_CONFIG.color_info,
            Self::Warning => PLOT_CONFIG.color_warning,
            Self::Error => PLOT_CONFIG.color_error,
        }
    }

    /// Keyword fallback for entries without an explicit level field.
    fn from_message(message: &str) -> Self {
        if message.contains("ERROR") {
            Self::Error
        } else if message.contains("WARNING") {
            Self::Warning
        } else {
            Self::Info
        }
    }
}

impl LogEntry {
    pub fn level(&self) -> LogLevel {
        match self.level.as_deref() {
            Some("ERROR") => LogLevel::Error,
            Some("WARNING") => LogLevel::Warning,
            Some("INFO") => LogLevel::Info,
            _ => LogLevel::from_message(&self.message),
        }
    }

    pub fn timestamp(&self) -> Option<i64> {
        TimeUtils::parse_server_datetime(&self.date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter)]
pub enum LevelFilter {
    #[default]
    All,
    Info,
    Warning,
    Error,
}

impl LevelFilter {
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All Levels",
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }

    fn matches(&self, level: LogLevel) -> bool {
        match self {
            Self::All => true,
            Self::Info => level == LogLevel::Info,
            Self::Warning => level == LogLevel::Warning,
            Self::Error => level == LogLevel::Error,
        }
    }
}

/// Client-side severity filter over the loaded entries.
pub fn filter_entries<'a>(entries: &'a [LogEntry], filter: LevelFilter) -> Vec<&'a LogEntry> {
    entries.iter().filter(|e| filter.matches(e.level())).collect()
}

/// The live endpoint returns newest-first; the tables want oldest at the top
/// so the newest row sits at the bottom where auto-scroll lands.
pub fn sort_entries(entries: &mut [LogEntry]) {
    entries.sort_by_key(|e| e.serial);
}

/// Decides when the log table should jump to the newest row: only when new
/// entries arrived and the user has auto-scroll enabled.
#[derive(Default)]
pub struct ScrollTracker {
    last_len: usize,
}

impl ScrollTracker {
    pub fn should_scroll_to_bottom(&mut self, len: usize, auto_scroll: bool) -> bool {
        let grew = len > self.last_len;
        self.last_len = len;
        auto_scroll && grew
    }
}
