use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tabled::{Table, Tabled, settings::Style};

use trend_scope::config::{Ticker, Timescale};
use trend_scope::data::{CandleRequest, CoinbaseProvider, MarketDataProvider};
use trend_scope::domain::Candle;
use trend_scope::engine::{AnalysisReport, ChartSet, analysis};
use trend_scope::utils::{epoch_sec_to_utc, now_timestamp_sec};

/// Run one analysis pass without the GUI and print what it found.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, value_enum, default_value_t = Ticker::Btc)]
    ticker: Ticker,

    #[arg(long, value_enum, default_value_t = Timescale::H1)]
    timescale: Timescale,

    /// Use N generated candles instead of fetching from the exchange
    #[arg(long)]
    synthetic: Option<usize>,

    /// Seed for synthetic candles and the price projection
    #[arg(long, default_value_t = 7)]
    seed: u64,
}

#[derive(Tabled)]
struct Row {
    metric: &'static str,
    value: String,
}

fn row(metric: &'static str, value: impl Into<String>) -> Row {
    Row {
        metric,
        value: value.into(),
    }
}

// Random walk with a slight upward drift
fn synthetic_candles(n: usize, granularity: u32, rng: &mut StdRng) -> Vec<Candle> {
    let start = now_timestamp_sec() - (n as i64) * granularity as i64;
    let mut price = 100.0_f64;
    (0..n)
        .map(|i| {
            let open = price;
            price = (price + rng.gen_range(-1.0..1.2)).max(1.0);
            let close = price;
            let high = open.max(close) + rng.gen_range(0.0..0.5);
            let low = (open.min(close) - rng.gen_range(0.0..0.5)).max(0.5);
            let volume = rng.gen_range(1.0..10.0);
            Candle::new(start + i as i64 * granularity as i64, low, high, open, close, volume)
        })
        .collect()
}

fn summary(report: &AnalysisReport) -> Vec<Row> {
    let opt = |v: Option<f64>, digits: usize| {
        v.map_or("-".to_string(), |v| format!("{:.*}", digits, v))
    };

    let mut rows = vec![
        row("candles", report.num_candles.to_string()),
        row("last price", opt(report.last_price, 2)),
        row("horizon", epoch_sec_to_utc(report.horizon as i64)),
        row("trend slope", opt(report.trend.map(|l| l.slope), 6)),
        row("support slope", opt(report.support.map(|l| l.slope), 6)),
        row("resistance slope", opt(report.resistance.map(|l| l.slope), 6)),
        row(
            "projected price",
            opt(report.projection.as_ref().and_then(|p| p.last_point()).map(|(_, y)| y), 2),
        ),
        row("last MACD", opt(report.macd.last().copied(), 4)),
        row("last RSI", opt(report.rsi.last().copied(), 1)),
        row(
            "price optima",
            format!(
                "{} max / {} min",
                report.price_optima.maxima.len(),
                report.price_optima.minima.len()
            ),
        ),
    ];
    for skipped in &report.skipped {
        rows.push(row("skipped", format!("{}: {}", skipped.plot, skipped.reason)));
    }
    rows
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut rng = StdRng::seed_from_u64(args.seed);
    let granularity = args.timescale.granularity();

    let candles = match args.synthetic {
        Some(n) => {
            log::info!("Generating {} synthetic candles (seed {})", n, args.seed);
            synthetic_candles(n, granularity, &mut rng)
        }
        None => {
            log::info!("Fetching {} {} candles from Coinbase", args.ticker, args.timescale);
            let provider = CoinbaseProvider::new().context("Failed to build HTTP client")?;
            let request = CandleRequest::for_timescale(args.timescale, now_timestamp_sec());
            provider
                .fetch_candles(args.ticker, request)
                .await
                .with_context(|| format!("Failed to fetch candles for {}", args.ticker))?
        }
    };

    let mut charts = ChartSet::default();
    let report = analysis(&candles, &mut charts, granularity as f64, &mut rng)?;

    let drawn: usize = charts.charts().iter().map(|c| c.entities().len()).sum();
    log::info!("Analysis drew {} entities across 3 charts", drawn);

    println!("{}", Table::new(summary(&report)).with(Style::rounded()));
    Ok(())
}
