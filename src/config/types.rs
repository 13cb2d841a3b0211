//! Selection enums and clamped config values

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use strum_macros::{Display, EnumIter};

/// Supported trading pairs.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    Display,
    ValueEnum,
    Default,
)]
pub enum Ticker {
    #[default]
    #[strum(to_string = "BTC-USD")]
    #[value(name = "BTC-USD")]
    Btc,
    #[strum(to_string = "ETH-USD")]
    #[value(name = "ETH-USD")]
    Eth,
    #[strum(to_string = "LTC-USD")]
    #[value(name = "LTC-USD")]
    Ltc,
    #[strum(to_string = "XTZ-USD")]
    #[value(name = "XTZ-USD")]
    Xtz,
    #[strum(to_string = "LINK-USD")]
    #[value(name = "LINK-USD")]
    Link,
}

impl Ticker {
    /// Exchange product id, e.g. `BTC-USD`.
    pub fn product_id(&self) -> String {
        self.to_string()
    }
}

/// Candle bucket sizes the exchange accepts, in seconds.
pub const GRANULARITY_LIST: [u32; 6] = [60, 300, 900, 3600, 21600, 86400];

/// Named chart timescales: how far back to look and how wide each candle is.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, ValueEnum, Default,
)]
pub enum Timescale {
    #[value(name = "1m")]
    M1,
    #[value(name = "5m")]
    M5,
    #[value(name = "15m")]
    M15,
    #[default]
    #[value(name = "1h")]
    H1,
    #[value(name = "6h")]
    H6,
    #[value(name = "1d")]
    D1,
}

impl Timescale {
    pub fn lookback(&self) -> Duration {
        match self {
            Self::M1 => Duration::from_secs(90 * 60),
            Self::M5 => Duration::from_secs(500 * 60),
            Self::M15 => Duration::from_secs(24 * 60 * 60),
            Self::H1 => Duration::from_secs(4 * 24 * 60 * 60),
            Self::H6 => Duration::from_secs(25 * 24 * 60 * 60),
            Self::D1 => Duration::from_secs(100 * 24 * 60 * 60),
        }
    }

    /// Candle width in seconds.
    pub fn granularity(&self) -> u32 {
        match self {
            Self::M1 => GRANULARITY_LIST[0],
            Self::M5 => GRANULARITY_LIST[1],
            Self::M15 => GRANULARITY_LIST[2],
            Self::H1 => GRANULARITY_LIST[3],
            Self::H6 => GRANULARITY_LIST[4],
            Self::D1 => GRANULARITY_LIST[5],
        }
    }
}

impl std::fmt::Display for Timescale {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::M1 => write!(f, "1m"),
            Self::M5 => write!(f, "5m"),
            Self::M15 => write!(f, "15m"),
            Self::H1 => write!(f, "1h"),
            Self::H6 => write!(f, "6h"),
            Self::D1 => write!(f, "1d"),
        }
    }
}

/// Fraction in `0.0..=1.0`, used for context padding.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct PaddingPct(f64);

impl PaddingPct {
    pub const NONE: Self = Self(0.0);

    pub const fn new(val: f64) -> Self {
        let v = if val < 0.0 {
            0.0
        } else if val > 1.0 {
            1.0
        } else {
            val
        };
        Self(v)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for PaddingPct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}%", self.0 * 100.)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_timescale_uses_a_supported_granularity() {
        for ts in Timescale::iter() {
            assert!(GRANULARITY_LIST.contains(&ts.granularity()));
            let buckets = ts.lookback().as_secs() / ts.granularity() as u64;
            assert!(buckets <= 300, "{} asks for {} candles", ts, buckets);
        }
    }

    #[test]
    fn ticker_product_ids() {
        assert_eq!(Ticker::Btc.product_id(), "BTC-USD");
        assert_eq!(Ticker::Link.to_string(), "LINK-USD");
        assert_eq!(Ticker::default(), Ticker::Btc);
    }

    #[test]
    fn padding_is_clamped() {
        assert_eq!(PaddingPct::new(-1.0).value(), 0.0);
        assert_eq!(PaddingPct::new(3.0).value(), 1.0);
        assert_eq!(PaddingPct::new(0.2).value(), 0.2);
    }
}
