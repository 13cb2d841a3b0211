use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use eframe::{
    Frame, Storage,
    egui::{CentralPanel, Color32, Context, RichText, TopBottomPanel, Visuals},
};
use tokio::runtime::Runtime;

use crate::{
    Cli,
    app::{AppState, LoadStatus, Selection},
    config::{DF, TICKER},
    data::CoinbaseProvider,
    engine::AnalysisReport,
    ui::{selection_panel, show_chart},
};

// Share of the central panel height given to the price chart
const PRICE_CHART_SHARE: f32 = 0.5;

pub struct App {
    // Declared before the runtime so its tasks are aborted while the runtime is alive
    state: AppState,
    refresh_interval: Duration,
    _runtime: Runtime,
}

impl App {
    pub(crate) fn new(cc: &eframe::CreationContext<'_>, args: Cli) -> anyhow::Result<Self> {
        let mut selection: Selection = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        if let Some(ticker) = args.ticker {
            selection.ticker = ticker;
        }
        if let Some(timescale) = args.timescale {
            selection.timescale = timescale;
        }
        if DF.log_selection {
            log::info!("Restored selection {} {}", selection.ticker, selection.timescale);
        }

        let refresh_interval = args
            .refresh_ms
            .map(Duration::from_millis)
            .unwrap_or(TICKER.refresh_interval);

        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        let market = Arc::new(CoinbaseProvider::new().context("Failed to build HTTP client")?);
        let state = AppState::new(
            selection,
            market.clone(),
            market,
            runtime.handle().clone(),
            refresh_interval,
        );

        cc.egui_ctx.set_visuals(Visuals::dark());

        Ok(Self {
            state,
            refresh_interval,
            _runtime: runtime,
        })
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        self.state.poll();

        TopBottomPanel::top("selection_panel").show(ctx, |ui| {
            let selection = self.state.selection();
            if let Some(change) = selection_panel(ui, selection.ticker, selection.timescale) {
                self.state.select(change);
            }
        });

        TopBottomPanel::bottom("ticker_panel").show(ctx, |ui| {
            self.state.ticker().render(ui);
        });

        CentralPanel::default().show(ctx, |ui| {
            ui.label(status_text(self.state.status()));

            let available = ui.available_height() - ui.spacing().item_spacing.y * 2.0;
            let price_height = (available * PRICE_CHART_SHARE).max(0.0);
            let indicator_height = ((available - price_height) / 2.0).max(0.0);

            let charts = self.state.charts();
            show_chart(ui, &charts.price, price_height);
            show_chart(ui, &charts.indicator_top, indicator_height);
            show_chart(ui, &charts.indicator_bot, indicator_height);
        });

        ctx.request_repaint_after(self.refresh_interval);
    }

    fn save(&mut self, storage: &mut dyn Storage) {
        let selection = self.state.selection();
        if DF.log_selection {
            log::info!("Saving selection {:?}", selection);
        }
        eframe::set_value(storage, eframe::APP_KEY, &selection);
    }
}

fn status_text(status: &LoadStatus) -> RichText {
    match status {
        LoadStatus::Loading => RichText::new("Loading candles...").italics(),
        LoadStatus::Ready(report) => RichText::new(report_summary(report)).monospace(),
        LoadStatus::Failed(msg) => {
            RichText::new(format!("Load failed: {}", msg)).color(Color32::LIGHT_RED)
        }
    }
}

fn report_summary(report: &AnalysisReport) -> String {
    let mut parts = vec![format!("{} candles", report.num_candles)];
    if let Some(trend) = &report.trend {
        parts.push(format!("trend {:+.4}/s", trend.slope));
    }
    if let Some(price) = report.projection.as_ref().and_then(|p| p.last_point()).map(|(_, y)| y) {
        parts.push(format!("projected ${:.2}", price));
    }
    if let Some(rsi) = report.rsi.last() {
        parts.push(format!("RSI {:.1}", rsi));
    }
    if !report.skipped.is_empty() {
        let skipped: Vec<&str> = report.skipped.iter().map(|s| s.plot).collect();
        parts.push(format!("skipped: {}", skipped.join(", ")));
    }
    parts.join("  |  ")
}
