use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::config::{DF, Ticker};

use super::provider::TickerSource;

/// One successful poll. `generation` identifies the `start` call that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceUpdate {
    pub generation: u64,
    pub ticker: Ticker,
    pub price: f64,
}

/// Polls the live price of one ticker at a fixed interval on a tokio runtime.
/// Starting a new poll cancels the previous one; anything the cancelled poll
/// already queued is discarded.
pub struct PricePoller {
    source: Arc<dyn TickerSource>,
    runtime: Handle,
    interval: Duration,
    generation: u64,
    task: Option<JoinHandle<()>>,
    tx: UnboundedSender<PriceUpdate>,
    rx: UnboundedReceiver<PriceUpdate>,
}

impl PricePoller {
    pub fn new(source: Arc<dyn TickerSource>, runtime: Handle, interval: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source,
            runtime,
            interval,
            generation: 0,
            task: None,
            tx,
            rx,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Cancels the running poll (if any) and starts polling `ticker`.
    /// Returns the generation of the new poll.
    pub fn start(&mut self, ticker: Ticker) -> u64 {
        self.cancel();
        self.generation += 1;

        let generation = self.generation;
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let period = self.interval;
        self.task = Some(
            self.runtime
                .spawn(poll_loop(source, ticker, generation, period, tx)),
        );

        if DF.log_price_stream_updates {
            log::info!("Polling {} every {:?} (generation {})", ticker, period, generation);
        }
        generation
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Pending updates of the current generation, oldest first.
    pub fn drain(&mut self) -> Vec<PriceUpdate> {
        let mut updates = Vec::new();
        while let Ok(update) = self.rx.try_recv() {
            if update.generation == self.generation {
                updates.push(update);
            } else if DF.log_price_stream_updates {
                log::info!("Dropping stale price update from generation {}", update.generation);
            }
        }
        updates
    }
}

impl Drop for PricePoller {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn poll_loop(
    source: Arc<dyn TickerSource>,
    ticker: Ticker,
    generation: u64,
    period: Duration,
    tx: UnboundedSender<PriceUpdate>,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        match source.fetch_price(ticker).await {
            Ok(price) => {
                if DF.log_price_stream_updates {
                    log::info!("{} price {:.2}", ticker, price);
                }
                let update = PriceUpdate {
                    generation,
                    ticker,
                    price,
                };
                if tx.send(update).is_err() {
                    break;
                }
            }
            // Keep the last displayed price and try again next tick
            Err(e) => log::warn!("Price poll for {} failed: {}", ticker, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::FetchError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct ScriptedSource {
        replies: Mutex<VecDeque<Result<f64, FetchError>>>,
    }

    impl ScriptedSource {
        fn new(replies: Vec<Result<f64, FetchError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
            })
        }
    }

    #[async_trait]
    impl TickerSource for ScriptedSource {
        async fn fetch_price(&self, _ticker: Ticker) -> Result<f64, FetchError> {
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(FetchError::Http("script exhausted".into())))
        }
    }

    const TICK: Duration = Duration::from_millis(500);

    #[tokio::test(start_paused = true)]
    async fn failed_polls_do_not_stop_the_loop() {
        let source = ScriptedSource::new(vec![
            Ok(100.0),
            Err(FetchError::Status(503)),
            Ok(101.5),
        ]);
        let mut poller = PricePoller::new(source, Handle::current(), TICK);
        let generation = poller.start(Ticker::Btc);

        tokio::time::sleep(TICK * 3).await;
        let prices: Vec<f64> = poller.drain().iter().map(|u| u.price).collect();

        assert_eq!(prices, vec![100.0, 101.5]);
        assert!(poller.is_running());
        assert_eq!(generation, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_drops_updates_from_previous_generation() {
        let source = ScriptedSource::new(vec![Ok(1.0), Ok(2.0), Ok(3.0)]);
        let mut poller = PricePoller::new(source, Handle::current(), TICK);

        poller.start(Ticker::Btc);
        tokio::time::sleep(Duration::from_millis(10)).await;
        let second = poller.start(Ticker::Eth);
        tokio::time::sleep(Duration::from_millis(10)).await;

        let updates = poller.drain();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].generation, second);
        assert_eq!(updates[0].ticker, Ticker::Eth);
        assert_eq!(updates[0].price, 2.0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_polling() {
        let source = ScriptedSource::new(vec![Ok(1.0), Ok(2.0), Ok(3.0)]);
        let mut poller = PricePoller::new(source, Handle::current(), TICK);

        poller.start(Ticker::Btc);
        tokio::time::sleep(Duration::from_millis(10)).await;
        poller.cancel();
        tokio::time::sleep(TICK * 4).await;

        assert_eq!(poller.drain().len(), 1);
        assert!(!poller.is_running());
    }
}
