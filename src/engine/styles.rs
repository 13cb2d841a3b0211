//! Role -> color/width table for everything the analysis pass draws.

use eframe::egui::Color32;

use crate::chart::{HighlightOptions, PlotOptions};
use crate::config::plot::PLOT_CONFIG;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotStyle {
    pub color: Color32,
    pub width: f32,
}

impl PlotStyle {
    pub fn options(&self) -> PlotOptions {
        PlotOptions::default().color(self.color).width(self.width)
    }

    /// Band fill in this style's color. Width is ignored.
    pub fn highlight(&self) -> HighlightOptions {
        HighlightOptions::default().color(self.color)
    }
}

pub struct StyleTable {
    pub price: PlotStyle,
    pub price_ma: PlotStyle,
    pub support: PlotStyle,
    pub resistance: PlotStyle,
    pub trend_up: PlotStyle,
    pub trend_down: PlotStyle,
    pub projection: PlotStyle,
    pub bollinger: PlotStyle,
    pub ma_derivative: PlotStyle,
    pub zero_line: PlotStyle,
    pub macd_positive: PlotStyle,
    pub macd_negative: PlotStyle,
    pub rsi: PlotStyle,
    pub rsi_band: PlotStyle,
}

pub const STYLES: StyleTable = StyleTable {
    price: PlotStyle {
        color: PLOT_CONFIG.palette.blue_light,
        width: PLOT_CONFIG.widths.medium,
    },
    price_ma: PlotStyle {
        color: PLOT_CONFIG.palette.orange_bitcoin,
        width: PLOT_CONFIG.widths.fine,
    },
    support: PlotStyle {
        color: PLOT_CONFIG.palette.white,
        width: PLOT_CONFIG.widths.fine,
    },
    resistance: PlotStyle {
        color: PLOT_CONFIG.palette.white,
        width: PLOT_CONFIG.widths.fine,
    },
    trend_up: PlotStyle {
        color: PLOT_CONFIG.palette.green_shrek,
        width: PLOT_CONFIG.widths.thin,
    },
    trend_down: PlotStyle {
        color: PLOT_CONFIG.palette.red_china,
        width: PLOT_CONFIG.widths.thin,
    },
    projection: PlotStyle {
        color: PLOT_CONFIG.palette.purple_barney,
        width: PLOT_CONFIG.widths.thin,
    },
    bollinger: PlotStyle {
        color: PLOT_CONFIG.palette.yellow_barry,
        width: PLOT_CONFIG.widths.hairline,
    },
    ma_derivative: PlotStyle {
        color: PLOT_CONFIG.palette.orange_bitcoin,
        width: PLOT_CONFIG.widths.thin,
    },
    zero_line: PlotStyle {
        color: PLOT_CONFIG.palette.grey,
        width: PLOT_CONFIG.widths.fine,
    },
    macd_positive: PlotStyle {
        color: PLOT_CONFIG.palette.green_shrek,
        width: PLOT_CONFIG.widths.thin,
    },
    macd_negative: PlotStyle {
        color: PLOT_CONFIG.palette.red_china,
        width: PLOT_CONFIG.widths.thin,
    },
    rsi: PlotStyle {
        color: PLOT_CONFIG.palette.blue_light,
        width: PLOT_CONFIG.widths.thin,
    },
    rsi_band: PlotStyle {
        color: PLOT_CONFIG.palette.purple_barney,
        width: PLOT_CONFIG.widths.hairline,
    },
};

impl StyleTable {
    pub fn trend(&self, slope: f64) -> PlotStyle {
        if slope > 0.0 { self.trend_up } else { self.trend_down }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_is_drawn_heaviest() {
        assert!(STYLES.price.width > STYLES.price_ma.width);
        assert!(STYLES.price_ma.width > STYLES.bollinger.width);
    }

    #[test]
    fn trend_color_follows_slope() {
        assert_eq!(STYLES.trend(0.5).color, STYLES.trend_up.color);
        assert_eq!(STYLES.trend(0.0).color, STYLES.trend_down.color);
        assert_eq!(STYLES.trend(-2.0).color, STYLES.trend_down.color);
    }
}
