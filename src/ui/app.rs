use eframe::egui::{Align, CentralPanel, Context, Layout, RichText, TopBottomPanel};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::Cli;
use crate::data::ApiClient;
use crate::ui::balance::BalanceView;
use crate::ui::history::HistoryView;
use crate::ui::market::MarketView;
use crate::ui::models_view::ModelsView;
use crate::ui::monitor::MonitorView;
use crate::ui::styles::UiStyleExt;
use crate::ui::transactions::TransactionsView;
use crate::ui::ui_config::UI_CONFIG;
use crate::utils::TimeUtils;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter)]
pub enum Screen {
    #[default]
    Market,
    Balance,
    Transactions,
    Models,
    Monitor,
    History,
}

impl Screen {
    fn label(&self) -> &'static str {
        match self {
            Self::Market => "Market",
            Self::Balance => "Balance",
            Self::Transactions => "Transactions",
            Self::Models => "Models",
            Self::Monitor => "Monitor",
            Self::History => "History",
        }
    }
}

/// Top-level dashboard: one screen visible at a time behind a nav bar, all
/// screens sharing one API client.
pub struct App {
    client: ApiClient,
    screen: Screen,
    market: MarketView,
    balance: BalanceView,
    transactions: TransactionsView,
    models: ModelsView,
    monitor: MonitorView,
    history: HistoryView,
}

impl App {
    pub fn new(_cc: &eframe::CreationContext<'_>, args: Cli) -> Self {
        log::info!("dashboard starting against {}", args.api_url);
        Self {
            client: ApiClient::new(args.api_url),
            screen: Screen::default(),
            market: MarketView::default(),
            balance: BalanceView::default(),
            transactions: TransactionsView::default(),
            models: ModelsView::default(),
            monitor: MonitorView::default(),
            history: HistoryView::default(),
        }
    }

    fn switch_to(&mut self, next: Screen) {
        if next == self.screen {
            return;
        }
        // Leaving a screen releases what it holds live (hover selections,
        // in-flight lookups, poll timers).
        match self.screen {
            Screen::Market => self.market.teardown(),
            Screen::Monitor => self.monitor.teardown(),
            _ => {}
        }
        self.screen = next;
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        TopBottomPanel::top("nav_bar")
            .frame(UI_CONFIG.top_panel_frame())
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let mut next = self.screen;
                    for screen in Screen::iter() {
                        if ui
                            .selectable_label(self.screen == screen, screen.label())
                            .clicked()
                        {
                            next = screen;
                        }
                    }
                    self.switch_to(next);
                });
            });

        TopBottomPanel::bottom("status_bar")
            .frame(UI_CONFIG.bottom_panel_frame())
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label_subdued(self.client.base_url().to_string());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(RichText::new(TimeUtils::now_utc_string()).weak());
                    });
                });
            });

        CentralPanel::default()
            .frame(UI_CONFIG.central_panel_frame())
            .show(ctx, |ui| match self.screen {
                Screen::Market => self.market.ui(ui, &self.client),
                Screen::Balance => self.balance.ui(ui, &self.client),
                Screen::Transactions => self.transactions.ui(ui, &self.client),
                Screen::Models => self.models.ui(ui, &self.client),
                Screen::Monitor => self.monitor.ui(ui, &self.client),
                Screen::History => self.history.ui(ui, &self.client),
            });
    }
}
