//! Exchange access: historical candles plus a cancellable live price poller.

mod price_stream;
mod provider;

pub use price_stream::{PricePoller, PriceUpdate};
pub use provider::{
    CandleRequest, CoinbaseProvider, FetchError, MarketDataProvider, TickerSource, parse_candles,
    parse_price,
};
