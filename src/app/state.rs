use std::sync::Arc;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::config::{DF, Ticker, Timescale};
use crate::data::{CandleRequest, FetchError, MarketDataProvider, PricePoller, TickerSource};
use crate::domain::Candle;
use crate::engine::{AnalysisReport, ChartSet, analysis};
use crate::ui::{SelectionChange, TickerDisplay};
use crate::utils::now_timestamp_sec;

/// The (ticker, timescale) pair the dashboard is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    pub ticker: Ticker,
    pub timescale: Timescale,
}

impl Selection {
    /// Returns true if the change selects something new.
    pub fn apply(&mut self, change: SelectionChange) -> bool {
        let before = *self;
        match change {
            SelectionChange::Ticker(ticker) => self.ticker = ticker,
            SelectionChange::Timescale(timescale) => self.timescale = timescale,
        }
        *self != before
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Loading,
    Ready(Box<AnalysisReport>),
    Failed(String),
}

struct CandleBatch {
    generation: u64,
    result: Result<Vec<Candle>, FetchError>,
}

/// Owns the selection and everything derived from it. Changing the selection
/// cancels the price poll, resets the charts and reloads candles; results
/// belonging to an older selection are discarded.
pub struct AppState {
    selection: Selection,
    generation: u64,
    charts: ChartSet,
    ticker: TickerDisplay,
    status: LoadStatus,
    poller: PricePoller,
    provider: Arc<dyn MarketDataProvider>,
    runtime: Handle,
    load_task: Option<JoinHandle<()>>,
    batch_tx: UnboundedSender<CandleBatch>,
    batch_rx: UnboundedReceiver<CandleBatch>,
    rng: StdRng,
}

impl AppState {
    pub fn new(
        selection: Selection,
        provider: Arc<dyn MarketDataProvider>,
        ticker_source: Arc<dyn TickerSource>,
        runtime: Handle,
        refresh_interval: Duration,
    ) -> Self {
        let (batch_tx, batch_rx) = mpsc::unbounded_channel();
        let poller = PricePoller::new(ticker_source, runtime.clone(), refresh_interval);
        let mut state = Self {
            selection,
            generation: 0,
            charts: ChartSet::default(),
            ticker: TickerDisplay::new(selection.ticker),
            status: LoadStatus::Loading,
            poller,
            provider,
            runtime,
            load_task: None,
            batch_tx,
            batch_rx,
            rng: StdRng::from_entropy(),
        };
        state.reload();
        state
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn charts(&self) -> &ChartSet {
        &self.charts
    }

    pub fn ticker(&self) -> &TickerDisplay {
        &self.ticker
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn select(&mut self, change: SelectionChange) {
        if !self.selection.apply(change) {
            return;
        }
        if DF.log_selection {
            log::info!(
                "Selection changed to {} {}",
                self.selection.ticker,
                self.selection.timescale
            );
        }
        self.reload();
    }

    // Cancel first so nothing from the old selection lands in the reset charts
    fn reload(&mut self) {
        self.poller.cancel();
        if let Some(task) = self.load_task.take() {
            task.abort();
        }

        self.generation += 1;
        self.charts.reset();
        self.ticker = TickerDisplay::new(self.selection.ticker);
        self.status = LoadStatus::Loading;

        let request = CandleRequest::for_timescale(self.selection.timescale, now_timestamp_sec());
        let provider = Arc::clone(&self.provider);
        let ticker = self.selection.ticker;
        let generation = self.generation;
        let tx = self.batch_tx.clone();
        self.load_task = Some(self.runtime.spawn(async move {
            let result = provider.fetch_candles(ticker, request).await;
            // Receiver only goes away with the state itself
            let _ = tx.send(CandleBatch { generation, result });
        }));

        self.poller.start(self.selection.ticker);
    }

    /// Applies whatever arrived since the last frame. Returns true if anything changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;

        for update in self.poller.drain() {
            self.ticker.apply(&update);
            changed = true;
        }

        while let Ok(batch) = self.batch_rx.try_recv() {
            if batch.generation != self.generation {
                if DF.log_selection {
                    log::info!("Dropping candles from superseded selection {}", batch.generation);
                }
                continue;
            }
            self.status = self.analyse(batch.result);
            changed = true;
        }

        changed
    }

    fn analyse(&mut self, result: Result<Vec<Candle>, FetchError>) -> LoadStatus {
        let candles = match result {
            Ok(candles) => candles,
            Err(e) => {
                log::warn!("Candle fetch for {} failed: {}", self.selection.ticker, e);
                return LoadStatus::Failed(e.to_string());
            }
        };

        let granularity = self.selection.timescale.granularity() as f64;
        match analysis(&candles, &mut self.charts, granularity, &mut self.rng) {
            Ok(report) => LoadStatus::Ready(Box::new(report)),
            Err(e) => {
                log::warn!("Analysis failed: {:#}", e);
                LoadStatus::Failed(format!("{:#}", e))
            }
        }
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        if let Some(task) = self.load_task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FakeMarket;

    #[async_trait]
    impl MarketDataProvider for FakeMarket {
        async fn fetch_candles(
            &self,
            ticker: Ticker,
            request: CandleRequest,
        ) -> Result<Vec<Candle>, FetchError> {
            if ticker == Ticker::Xtz {
                return Err(FetchError::Status(404));
            }
            let step = request.granularity as i64;
            Ok((0..30)
                .map(|i| {
                    let mid = 50.0 + i as f64 + (i % 3) as f64;
                    let time = request.start + i * step;
                    Candle::new(time, mid - 1.0, mid + 1.0, mid - 0.2, mid + 0.2, 1.0)
                })
                .collect())
        }
    }

    #[async_trait]
    impl TickerSource for FakeMarket {
        async fn fetch_price(&self, _ticker: Ticker) -> Result<f64, FetchError> {
            Ok(42.0)
        }
    }

    fn state() -> AppState {
        let market = Arc::new(FakeMarket);
        AppState::new(
            Selection::default(),
            market.clone(),
            market,
            Handle::current(),
            Duration::from_millis(500),
        )
    }

    #[test]
    fn selection_reports_real_changes_only() {
        let mut selection = Selection::default();
        assert!(!selection.apply(SelectionChange::Ticker(Ticker::Btc)));
        assert!(selection.apply(SelectionChange::Timescale(Timescale::M5)));
        assert_eq!(selection.timescale, Timescale::M5);
    }

    #[tokio::test(start_paused = true)]
    async fn loads_candles_and_draws_charts() {
        let mut state = state();
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(state.poll());
        assert!(matches!(state.status(), LoadStatus::Ready(_)));
        assert!(state.charts().price.entity("price").is_some());
        assert_eq!(state.ticker().text(), "BTC-USD: $42.00");
    }

    #[tokio::test(start_paused = true)]
    async fn selection_change_discards_old_results() {
        let mut state = state();
        // First load completes but is not consumed before the switch
        tokio::time::sleep(Duration::from_millis(10)).await;
        state.select(SelectionChange::Ticker(Ticker::Xtz));

        assert!(state.charts().price.entities().is_empty());
        assert_eq!(state.status(), &LoadStatus::Loading);

        tokio::time::sleep(Duration::from_millis(10)).await;
        state.poll();
        assert!(matches!(state.status(), LoadStatus::Failed(_)));
        assert!(state.charts().price.entity("price").is_none());
        assert!(state.ticker().text().starts_with("XTZ-USD"));
    }
}
