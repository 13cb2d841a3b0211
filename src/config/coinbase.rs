pub struct CoinbaseConfig {
    pub rest_base_url: &'static str,
    /// Coinbase rejects requests without a User-Agent
    pub user_agent: &'static str,
    pub timeout_ms: u64,
    /// Hard cap on candles returned per request
    pub max_candles: usize,
}

pub const COINBASE: CoinbaseConfig = CoinbaseConfig {
    rest_base_url: "https://api.exchange.coinbase.com/products/",
    user_agent: "trend-scope/0.1",
    timeout_ms: 5000,
    max_candles: 300,
};

impl CoinbaseConfig {
    pub fn ticker_url(&self, product: &str) -> String {
        format!("{}{}/ticker", self.rest_base_url, product)
    }

    pub fn candles_url(&self, product: &str) -> String {
        format!("{}{}/candles", self.rest_base_url, product)
    }
}
