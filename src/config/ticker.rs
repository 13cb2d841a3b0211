use eframe::egui::Color32;
use std::time::Duration;

pub struct TickerConfig {
    /// Live price refresh interval
    pub refresh_interval: Duration,
    pub font_size: f32,
    pub background_color: Color32,

    // Colors
    pub text_color_neutral: Color32,
    pub text_color_up: Color32,
    pub text_color_down: Color32,
}

pub const TICKER: TickerConfig = TickerConfig {
    refresh_interval: Duration::from_millis(500),
    font_size: 22.0,
    background_color: Color32::from_rgb(10, 10, 15), // Very dark

    text_color_neutral: Color32::LIGHT_GRAY,
    text_color_up: Color32::from_rgb(0x9C, 0xDE, 0x47),
    text_color_down: Color32::from_rgb(0xDE, 0x29, 0x10),
};
