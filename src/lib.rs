#![allow(clippy::collapsible_if)]
#![allow(clippy::too_many_arguments)]

// Core modules
pub mod analysis;
pub mod app;
pub mod chart;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod ui;
pub mod utils;

// Re-export commonly used types outside of crate (for the analyze bin and tests)
pub use app::App;
pub use chart::Chart;
pub use domain::{Candle, ChartError, Curve, Line};
pub use engine::{AnalysisReport, ChartSet, analysis};

// CLI argument parsing
use clap::Parser;

use config::{Ticker, Timescale};

#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Ticker to open with, overriding the saved selection
    #[arg(long, value_enum)]
    pub ticker: Option<Ticker>,

    /// Timescale to open with, overriding the saved selection
    #[arg(long, value_enum)]
    pub timescale: Option<Timescale>,

    /// Live price refresh interval in milliseconds
    #[arg(long)]
    pub refresh_ms: Option<u64>,
}

/// Creates the GUI app. Fails if the async runtime or HTTP client cannot be built.
pub fn run_app(cc: &eframe::CreationContext<'_>, args: Cli) -> anyhow::Result<App> {
    App::new(cc, args)
}
