use serde::{Deserialize, Serialize};

/// One exchange candle. `timestamp` is the bucket start in epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: i64,

    pub low_price: f64,
    pub high_price: f64,
    pub open_price: f64,
    pub close_price: f64,

    pub volume: f64,
}

impl Candle {
    pub fn new(timestamp: i64, low: f64, high: f64, open: f64, close: f64, volume: f64) -> Self {
        Candle {
            timestamp,
            low_price: low,
            high_price: high,
            open_price: open,
            close_price: close,
            volume,
        }
    }

    /// Midpoint of the candle's range, the price the charts are built on.
    pub fn mid_price(&self) -> f64 {
        (self.high_price + self.low_price) / 2.0
    }

    /// Move within this candle: positive when it closed above its open.
    pub fn closing_change(&self) -> f64 {
        self.close_price - self.open_price
    }
}

/// Exchange wire format: `[time, low, high, open, close, volume]`.
impl From<[f64; 6]> for Candle {
    fn from(row: [f64; 6]) -> Self {
        Candle::new(row[0] as i64, row[1], row[2], row[3], row[4], row[5])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_row_maps_fields_in_order() {
        let candle = Candle::from([1_600_000_000.0, 9.0, 11.0, 9.5, 10.5, 42.0]);
        assert_eq!(candle.timestamp, 1_600_000_000);
        assert_eq!(candle.low_price, 9.0);
        assert_eq!(candle.high_price, 11.0);
        assert_eq!(candle.mid_price(), 10.0);
        assert_eq!(candle.closing_change(), 1.0);
    }
}
