//! Analysis orchestration: runs the indicator library over a candle batch and
//! draws the results into a set of charts.

mod pass;
mod styles;

pub use pass::{
    AnalysisReport, ChartSet, MA_DERIVATIVE_CONTEXT, SkippedPlot, analysis, mid_price_curve,
    sorted_candles,
};
pub use styles::{PlotStyle, STYLES, StyleTable};
