//! Configuration module for the dashboard.

// Can all be private now because we have a public re-export.
mod analysis;
mod coinbase;
mod debug;
mod ticker;
mod types;

// Can't be private because we don't re-export it
pub mod plot;

// Re-export commonly used items
pub use analysis::{ANALYSIS, AnalysisConfig};
pub use coinbase::{COINBASE, CoinbaseConfig};
pub use debug::DF;
pub use ticker::{TICKER, TickerConfig};
pub use types::{GRANULARITY_LIST, PaddingPct, Ticker, Timescale};
