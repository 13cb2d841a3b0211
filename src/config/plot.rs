//! Chart layout and styling configuration

use eframe::egui::Color32;

pub struct Palette {
    pub blue_light: Color32,
    pub orange_bitcoin: Color32,
    pub green_shrek: Color32,
    pub purple_barney: Color32,
    pub red_china: Color32,
    pub yellow_light: Color32,
    pub yellow_barry: Color32,
    pub white: Color32,
    pub grey: Color32,
}

pub struct LineWidths {
    pub hairline: f32,
    pub fine: f32,
    pub thin: f32,
    pub medium: f32,
}

pub struct PlotConfig {
    /// Logical canvas size every layer is drawn at. The UI scales it to fit.
    pub chart_width: f32,
    pub chart_height: f32,

    /// Vertical padding added above/below data when a context is fitted (0.2 = 20% of the y span)
    pub chart_padding_pct: f64,

    pub font_size: f32,
    pub axes_padding: f32,
    /// Space reserved at the right for the y axis
    pub y_axis_margin: f32,
    /// Extra offset applied to the y-axis labels from the right edge
    pub y_axis_label_offset: f32,
    pub axes_line_width: f32,
    /// Horizontal offset of the x_high label from the axis corner
    pub x_high_label_offset: f32,

    pub highlight_opacity: f32,

    pub palette: Palette,
    pub widths: LineWidths,
}

impl PlotConfig {
    /// Space reserved at the bottom for the x axis and its labels
    pub const fn x_axis_margin(&self) -> f32 {
        self.font_size + self.axes_padding
    }
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    chart_width: 4096.0,
    chart_height: 2160.0,

    chart_padding_pct: 0.2,

    font_size: 70.0,
    axes_padding: 50.0,
    y_axis_margin: 50.0,
    y_axis_label_offset: 450.0,
    axes_line_width: 3.0,
    x_high_label_offset: 200.0,

    highlight_opacity: 0.3,

    palette: Palette {
        blue_light: Color32::from_rgb(0x33, 0xEC, 0xFF),
        orange_bitcoin: Color32::from_rgb(0xF6, 0x92, 0x1A),
        green_shrek: Color32::from_rgb(0x9C, 0xDE, 0x47),
        purple_barney: Color32::from_rgb(0xD9, 0x5A, 0x9D),
        red_china: Color32::from_rgb(0xDE, 0x29, 0x10),
        yellow_light: Color32::from_rgb(0xFC, 0xE8, 0x03),
        yellow_barry: Color32::from_rgb(0xFF, 0xF4, 0x4C),
        white: Color32::WHITE,
        grey: Color32::from_gray(120),
    },

    widths: LineWidths {
        hairline: 1.0,
        fine: 3.0,
        thin: 5.0,
        medium: 7.0,
    },
};
