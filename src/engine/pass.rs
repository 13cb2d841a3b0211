use anyhow::{Context as _, Result, bail};
use rand::Rng;

use crate::analysis::{
    LocalOptima, bollinger_bands, derivative, exp_moving_average, line_best_fit, local_optima,
    macd, predict_price, rsi, support_resistance,
};
use crate::chart::{Chart, Context, ContextName, LayerName, RenderStyle};
use crate::config::plot::PLOT_CONFIG;
use crate::config::{ANALYSIS, DF, PaddingPct};
use crate::domain::{Candle, ChartError, Curve, Line};

use super::styles::STYLES;

/// Context on the upper indicator chart holding the moving-average derivative.
pub const MA_DERIVATIVE_CONTEXT: &str = "ma_derivative";

/// The three charts one analysis pass draws into.
#[derive(Debug, Clone)]
pub struct ChartSet {
    pub price: Chart,
    /// MACD bars plus the moving-average derivative
    pub indicator_top: Chart,
    /// RSI and its guide band
    pub indicator_bot: Chart,
}

impl Default for ChartSet {
    fn default() -> Self {
        let mut set = Self {
            price: Chart::default(),
            indicator_top: Chart::default(),
            indicator_bot: Chart::default(),
        };
        set.reset();
        set
    }
}

impl ChartSet {
    pub fn charts(&self) -> [&Chart; 3] {
        [&self.price, &self.indicator_top, &self.indicator_bot]
    }

    /// Clears every chart back to empty layers (axes, main, overlay).
    pub fn reset(&mut self) {
        for chart in [&mut self.price, &mut self.indicator_top, &mut self.indicator_bot] {
            chart.reset();
            chart.add_layer(LayerName::overlay());
        }
    }

    pub fn redraw_all(&mut self) -> Result<(), ChartError> {
        self.price.redraw_chart()?;
        self.indicator_top.redraw_chart()?;
        self.indicator_bot.redraw_chart()
    }
}

/// A plot the pass could not draw, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedPlot {
    pub plot: &'static str,
    pub reason: ChartError,
}

/// What one analysis pass computed and drew.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisReport {
    pub num_candles: usize,
    pub last_price: Option<f64>,
    /// Right edge of the price chart, past the last candle
    pub horizon: f64,
    pub trend: Option<Line>,
    pub support: Option<Line>,
    pub resistance: Option<Line>,
    pub projection: Option<Curve>,
    pub macd: Vec<f64>,
    pub rsi: Vec<f64>,
    pub price_optima: LocalOptima,
    pub ma_optima: LocalOptima,
    pub skipped: Vec<SkippedPlot>,
}

impl AnalysisReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn was_skipped(&self, plot: &str) -> bool {
        self.skipped.iter().any(|s| s.plot == plot)
    }

    fn skip(&mut self, plot: &'static str, reason: ChartError) {
        log::warn!("Skipping '{}': {}", plot, reason);
        self.skipped.push(SkippedPlot { plot, reason });
    }

    fn keep<T>(&mut self, plot: &'static str, result: Result<T, ChartError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.skip(plot, e);
                None
            }
        }
    }
}

fn step(name: &str) {
    if DF.log_analysis_steps {
        log::info!("Analysis step: {}", name);
    }
}

/// Candles in ascending time order.
pub fn sorted_candles(candles: &[Candle]) -> Vec<Candle> {
    let mut sorted = candles.to_vec();
    sorted.sort_by_key(|c| c.timestamp);
    sorted
}

/// (time, (high + low) / 2) per candle. Expects candles in time order.
pub fn mid_price_curve(candles: &[Candle]) -> Curve {
    Curve::from_points(candles.iter().map(|c| (c.timestamp as f64, c.mid_price())))
}

fn chart_padding() -> PaddingPct {
    PaddingPct::new(PLOT_CONFIG.chart_padding_pct)
}

fn x_range(chart: &Chart) -> Result<(f64, f64)> {
    let ctx = chart
        .context(&ContextName::default())
        .context("price chart has no default context")?;
    match (ctx.x_low, ctx.x_high) {
        (Some(low), Some(high)) => Ok((low, high)),
        _ => bail!("price context was not initialised by the price curve"),
    }
}

/// Runs every indicator over `candles` and draws the results into `charts`.
///
/// Only an unusable price curve is fatal. Any other failure skips the plots
/// that depend on it and is recorded in the report.
pub fn analysis<R: Rng>(
    candles: &[Candle],
    charts: &mut ChartSet,
    granularity: f64,
    rng: &mut R,
) -> Result<AnalysisReport> {
    if candles.is_empty() {
        bail!("no candles to analyse");
    }
    let cfg = &ANALYSIS;
    let candles = sorted_candles(candles);
    let price = mid_price_curve(&candles);
    let mut report = AnalysisReport {
        num_candles: candles.len(),
        last_price: price.last_point().map(|(_, y)| y),
        ..AnalysisReport::default()
    };

    charts.reset();

    // 1. Price curve, then push the right edge out to leave room for the projection
    step("price");
    charts
        .price
        .plot_curve(&price, "price", &STYLES.price.options().padding(chart_padding()))
        .context("plotting mid-price curve")?;
    let (x_low, x_high) = x_range(&charts.price)?;
    let horizon = x_high + cfg.projection.horizon_pct * (x_high - x_low);
    charts
        .price
        .set_context(
            Context {
                x_high: Some(horizon),
                ..Context::default()
            },
            &ContextName::default(),
        )
        .context("extending price horizon")?;
    report.horizon = horizon;
    let shared_x = Context::x_range(x_low, horizon);

    // 2. Moving average, derivatives, optima
    step("derivatives");
    let price_ma = price
        .with_y(exp_moving_average(price.y(), cfg.ma_window))
        .context("building moving average")?;
    let price_dv = report.keep("price_derivative", derivative(&price));
    let ma_dv = report.keep("ma_derivative", derivative(&price_ma));
    report.price_optima = price_dv.as_ref().map(local_optima).unwrap_or_default();
    report.ma_optima = ma_dv.as_ref().map(local_optima).unwrap_or_default();

    // 3. Upper indicator chart: MACD bars and the MA derivative
    step("macd");
    let macd = macd(price.y(), cfg.macd.period_short, cfg.macd.period_long);
    if let Err(e) = plot_macd(&mut charts.indicator_top, &price, &macd.difference, shared_x) {
        report.skip("macd", e);
    }
    report.macd = macd.difference;
    if let Some(dv) = &ma_dv {
        if let Err(e) = plot_ma_derivative(&mut charts.indicator_top, dv, shared_x) {
            report.skip("ma_derivative", e);
        }
    }

    // 4. Lower indicator chart: RSI
    step("rsi");
    let rsi_result = rsi(&candles, cfg.rsi.window)
        .and_then(|values| plot_rsi(&mut charts.indicator_bot, &price, values, shared_x));
    if let Some(values) = report.keep("rsi", rsi_result) {
        report.rsi = values;
    }

    // 5. Bollinger band behind the price
    step("bollinger");
    let bands = bollinger_bands(price.y(), cfg.bollinger.window, cfg.bollinger.num_std);
    let band_result = price.with_y(bands.lower).and_then(|lower| {
        let upper = price.with_y(bands.upper)?;
        charts
            .price
            .highlight_curve(&lower, &upper, "bollinger", &STYLES.bollinger.highlight())
    });
    report.keep("bollinger", band_result);

    // 6. Support / resistance
    step("levels");
    let levels = support_resistance(&price, &report.price_optima, cfg.num_peaks);
    let support = levels.support.and_then(|line| {
        charts
            .price
            .plot_line(line, "support", &STYLES.support.options())
            .map(|_| line)
    });
    report.support = report.keep("support", support);
    let resistance = levels.resistance.and_then(|line| {
        charts
            .price
            .plot_line(line, "resistance", &STYLES.resistance.options())
            .map(|_| line)
    });
    report.resistance = report.keep("resistance", resistance);

    // 7. Trend line over the whole price curve
    step("trendline");
    let trend = line_best_fit(&price).and_then(|line| {
        charts
            .price
            .plot_line(line, "trendline", &STYLES.trend(line.slope).options())
            .map(|_| line)
    });
    report.trend = report.keep("trendline", trend);

    step("price_ma");
    let ma_result = charts
        .price
        .plot_curve(&price_ma, "price_ma", &STYLES.price_ma.options());
    report.keep("price_ma", ma_result);

    // 8. Projection up to the horizon
    step("prediction");
    let projection = predict_price(&price, horizon, granularity, cfg.projection.noise, rng)
        .and_then(|curve| {
            charts
                .price
                .plot_curve(&curve, "prediction", &STYLES.projection.options())?;
            Ok(curve)
        });
    report.projection = report.keep("prediction", projection);

    if DF.log_analysis_steps {
        log::info!(
            "Analysed {} candles, {} plot(s) skipped",
            report.num_candles,
            report.skipped.len()
        );
    }
    Ok(report)
}

// Bars share the price chart's x range; y is symmetric around zero.
fn plot_macd(
    chart: &mut Chart,
    price: &Curve,
    difference: &[f64],
    shared_x: Context,
) -> Result<(), ChartError> {
    let diff = price.with_y(difference.to_vec())?;
    let peak = difference.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    let half_span = peak * (1.0 + PLOT_CONFIG.chart_padding_pct);
    chart.set_context(
        Context {
            y_low: Some(-half_span),
            y_high: Some(half_span),
            ..shared_x
        },
        &ContextName::default(),
    )?;

    let (positive, negative) = diff.split_by_sign();
    if !positive.is_empty() {
        let opts = STYLES.macd_positive.options().style(RenderStyle::Bar);
        chart.plot_curve(positive, "macd_positive", &opts)?;
    }
    if !negative.is_empty() {
        let opts = STYLES.macd_negative.options().style(RenderStyle::Bar);
        chart.plot_curve(negative, "macd_negative", &opts)?;
    }
    chart.plot_line(Line::horizontal(0.0), "macd_zero", &STYLES.zero_line.options())
}

fn plot_ma_derivative(chart: &mut Chart, dv: &Curve, shared_x: Context) -> Result<(), ChartError> {
    let ctx = ContextName::new(MA_DERIVATIVE_CONTEXT)?;
    chart.set_context(shared_x, &ctx)?;

    let opts = STYLES
        .ma_derivative
        .options()
        .padding(chart_padding())
        .context(ctx.clone())
        .layer(LayerName::overlay());
    chart.plot_curve(dv, "ma_derivative", &opts)?;

    let zero = STYLES
        .zero_line
        .options()
        .context(ctx)
        .layer(LayerName::overlay());
    chart.plot_line(Line::horizontal(0.0), "ma_derivative_zero", &zero)
}

fn plot_rsi(
    chart: &mut Chart,
    price: &Curve,
    values: Vec<f64>,
    shared_x: Context,
) -> Result<Vec<f64>, ChartError> {
    let settings = &ANALYSIS.rsi;
    chart.set_context(
        Context {
            y_low: Some(0.0),
            y_high: Some(100.0),
            ..shared_x
        },
        &ContextName::default(),
    )?;

    let curve = price.with_y(values)?;
    let n = curve.num_points();
    let oversold = price.with_y(vec![settings.oversold; n])?;
    let overbought = price.with_y(vec![settings.overbought; n])?;
    chart.highlight_curve(&oversold, &overbought, "rsi_band", &STYLES.rsi_band.highlight())?;
    chart.plot_curve(&curve, "rsi", &STYLES.rsi.options())?;

    Ok(curve.y().to_vec())
}
