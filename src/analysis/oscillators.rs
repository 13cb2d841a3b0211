use crate::domain::{Candle, ChartError};

use super::regression::std_dev;
use super::smoothing::{exp_moving_average, moving_average};

/// MACD line plus the two EMAs it is derived from. All three have the input length.
#[derive(Debug, Clone, PartialEq)]
pub struct Macd {
    pub difference: Vec<f64>,
    pub ema_short: Vec<f64>,
    pub ema_long: Vec<f64>,
}

/// `ema_short - ema_long`, pointwise.
pub fn macd(prices: &[f64], period_short: usize, period_long: usize) -> Macd {
    let ema_short = exp_moving_average(prices, period_short);
    let ema_long = exp_moving_average(prices, period_long);

    let difference = ema_short
        .iter()
        .zip(&ema_long)
        .map(|(short, long)| short - long)
        .collect();

    Macd {
        difference,
        ema_short,
        ema_long,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CloseDirection {
    Up,
    Down,
    Flat,
}

// Compares each candle's close against its own open, not against the previous close.
fn close_direction(candle: &Candle) -> CloseDirection {
    let change = candle.closing_change();
    if change > 0.0 {
        CloseDirection::Up
    } else if change < 0.0 {
        CloseDirection::Down
    } else {
        CloseDirection::Flat
    }
}

/// Relative strength over the trailing `window` candles.
///
/// Counts up-closes and down-closes in the trailing window, smooths both counts
/// with an EMA of the same window and returns `100 - 100 / (1 + up / down)`.
/// Exactly 100 wherever the smoothed down count is zero. Candles must be in
/// time order.
pub fn rsi(candles: &[Candle], window: usize) -> Result<Vec<f64>, ChartError> {
    if window == 0 {
        return Err(ChartError::InvalidParameter("RSI window must be > 0"));
    }

    let mut up_counts = Vec::with_capacity(candles.len());
    let mut down_counts = Vec::with_capacity(candles.len());
    let (mut up, mut down) = (0usize, 0usize);

    for (i, candle) in candles.iter().enumerate() {
        match close_direction(candle) {
            CloseDirection::Up => up += 1,
            CloseDirection::Down => down += 1,
            CloseDirection::Flat => {}
        }
        if i >= window {
            match close_direction(&candles[i - window]) {
                CloseDirection::Up => up -= 1,
                CloseDirection::Down => down -= 1,
                CloseDirection::Flat => {}
            }
        }
        up_counts.push(up as f64);
        down_counts.push(down as f64);
    }

    let smoothed_up = exp_moving_average(&up_counts, window);
    let smoothed_down = exp_moving_average(&down_counts, window);

    Ok(smoothed_up
        .iter()
        .zip(&smoothed_down)
        .map(|(&up, &down)| {
            if down == 0.0 {
                100.0
            } else {
                100.0 - 100.0 / (1.0 + up / down)
            }
        })
        .collect())
}

/// Bollinger-style envelope around a trailing SMA.
#[derive(Debug, Clone, PartialEq)]
pub struct Bands {
    pub middle: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

/// SMA ± `num_std` sample standard deviations over the same trailing window.
/// Warm-up indices with a single point have zero width.
pub fn bollinger_bands(data: &[f64], window: usize, num_std: f64) -> Bands {
    let window = window.max(1);
    let middle = moving_average(data, window);

    let widths: Vec<f64> = (0..data.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            std_dev(&data[start..=i]).map_or(0.0, |sd| sd * num_std)
        })
        .collect();

    let upper = middle.iter().zip(&widths).map(|(m, w)| m + w).collect();
    let lower = middle.iter().zip(&widths).map(|(m, w)| m - w).collect();

    Bands {
        middle,
        upper,
        lower,
    }
}
