use eframe::egui::{Color32, FontId, Pos2, Rect, Sense, Ui, Vec2};

use crate::config::{TICKER, Ticker};
use crate::data::PriceUpdate;

/// Move of the latest price against the previous successful poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceDirection {
    Up,
    Down,
    #[default]
    Unchanged,
}

impl PriceDirection {
    pub fn between(previous: f64, current: f64) -> Self {
        let delta = current - previous;
        if delta > 0.0 {
            Self::Up
        } else if delta < 0.0 {
            Self::Down
        } else {
            Self::Unchanged
        }
    }

    pub fn color(&self) -> Color32 {
        match self {
            Self::Up => TICKER.text_color_up,
            Self::Down => TICKER.text_color_down,
            Self::Unchanged => TICKER.text_color_neutral,
        }
    }
}

/// Live price read-out for the selected ticker.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerDisplay {
    ticker: Ticker,
    price: Option<f64>,
    direction: PriceDirection,
}

impl TickerDisplay {
    pub fn new(ticker: Ticker) -> Self {
        Self {
            ticker,
            price: None,
            direction: PriceDirection::Unchanged,
        }
    }

    pub fn price(&self) -> Option<f64> {
        self.price
    }

    pub fn direction(&self) -> PriceDirection {
        self.direction
    }

    /// Updates for another ticker are ignored.
    pub fn apply(&mut self, update: &PriceUpdate) {
        if update.ticker != self.ticker {
            return;
        }
        self.direction = match self.price {
            Some(previous) => PriceDirection::between(previous, update.price),
            None => PriceDirection::Unchanged,
        };
        self.price = Some(update.price);
    }

    pub fn text(&self) -> String {
        match self.price {
            Some(price) => format!("{}: ${:.2}", self.ticker, price),
            None => format!("{}: --", self.ticker),
        }
    }

    /// Draws the read-out as a full-width strip.
    pub fn render(&self, ui: &mut Ui) {
        let rect = ui.available_rect_before_wrap();
        let height = TICKER.font_size * 1.6;
        let panel_rect = Rect::from_min_size(rect.min, Vec2::new(rect.width(), height));
        ui.allocate_rect(panel_rect, Sense::hover());

        let painter = ui.painter().with_clip_rect(panel_rect);
        painter.rect_filled(panel_rect, 0.0, TICKER.background_color);

        let color = self.direction.color();
        let galley =
            painter.layout_no_wrap(self.text(), FontId::monospace(TICKER.font_size), color);
        let pos = Pos2::new(
            (panel_rect.min.x + TICKER.font_size).round(),
            (panel_rect.min.y + (height - galley.size().y) / 2.0).round(),
        );
        painter.galley(pos, galley, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(ticker: Ticker, price: f64) -> PriceUpdate {
        PriceUpdate {
            generation: 1,
            ticker,
            price,
        }
    }

    #[test]
    fn first_poll_is_unchanged() {
        let mut display = TickerDisplay::new(Ticker::Btc);
        assert_eq!(display.text(), "BTC-USD: --");

        display.apply(&update(Ticker::Btc, 43250.174));
        assert_eq!(display.text(), "BTC-USD: $43250.17");
        assert_eq!(display.direction(), PriceDirection::Unchanged);
    }

    #[test]
    fn direction_follows_previous_poll() {
        let mut display = TickerDisplay::new(Ticker::Eth);
        display.apply(&update(Ticker::Eth, 10.0));
        display.apply(&update(Ticker::Eth, 11.0));
        assert_eq!(display.direction(), PriceDirection::Up);
        display.apply(&update(Ticker::Eth, 9.0));
        assert_eq!(display.direction(), PriceDirection::Down);
        display.apply(&update(Ticker::Eth, 9.0));
        assert_eq!(display.direction(), PriceDirection::Unchanged);
    }

    #[test]
    fn other_tickers_are_ignored() {
        let mut display = TickerDisplay::new(Ticker::Ltc);
        display.apply(&update(Ticker::Btc, 50_000.0));
        assert_eq!(display.price(), None);
    }
}
