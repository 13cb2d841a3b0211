use eframe::egui::Color32;

use crate::config::PaddingPct;
use crate::config::plot::PLOT_CONFIG;
use crate::domain::{Curve, Line};

use super::names::{ContextName, LayerName};

/// Bars are drawn from the zero line, lines connect consecutive points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStyle {
    #[default]
    Line,
    Bar,
}

/// Anything that can be handed to a plot call.
#[derive(Debug, Clone, PartialEq)]
pub enum Series {
    Curve(Curve),
    Line(Line),
}

impl From<Curve> for Series {
    fn from(curve: Curve) -> Self {
        Series::Curve(curve)
    }
}

impl From<&Curve> for Series {
    fn from(curve: &Curve) -> Self {
        Series::Curve(curve.clone())
    }
}

impl From<Line> for Series {
    fn from(line: Line) -> Self {
        Series::Line(line)
    }
}

/// Shape of a recorded plot.
#[derive(Debug, Clone, PartialEq)]
pub enum Plotted {
    Line(Line),
    CurveLine(Curve),
    CurveBar(Curve),
    Band {
        bottom: Curve,
        top: Curve,
        opacity: f32,
    },
}

/// A recorded plot. Replayed verbatim on redraw.
#[derive(Debug, Clone, PartialEq)]
pub struct PlottedEntity {
    pub name: String,
    pub plotted: Plotted,
    pub color: Color32,
    pub width: f32,
    pub context: ContextName,
    pub layer: LayerName,
}

/// Options for `plot_curve` and `plot_line`. `padding` and `style` are only
/// read by `plot_curve`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOptions {
    pub color: Color32,
    pub width: f32,
    pub padding: PaddingPct,
    pub context: ContextName,
    pub layer: LayerName,
    pub style: RenderStyle,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            color: PLOT_CONFIG.palette.white,
            width: PLOT_CONFIG.widths.hairline,
            padding: PaddingPct::NONE,
            context: ContextName::default(),
            layer: LayerName::main(),
            style: RenderStyle::Line,
        }
    }
}

impl PlotOptions {
    pub fn color(mut self, color: Color32) -> Self {
        self.color = color;
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn padding(mut self, padding: PaddingPct) -> Self {
        self.padding = padding;
        self
    }

    pub fn context(mut self, context: ContextName) -> Self {
        self.context = context;
        self
    }

    pub fn layer(mut self, layer: LayerName) -> Self {
        self.layer = layer;
        self
    }

    pub fn style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }
}

/// Options for `highlight_curve`.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightOptions {
    pub color: Color32,
    pub opacity: f32,
    pub context: ContextName,
    pub layer: LayerName,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            color: PLOT_CONFIG.palette.yellow_light,
            opacity: PLOT_CONFIG.highlight_opacity,
            context: ContextName::default(),
            layer: LayerName::overlay(),
        }
    }
}

impl HighlightOptions {
    pub fn color(mut self, color: Color32) -> Self {
        self.color = color;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn context(mut self, context: ContextName) -> Self {
        self.context = context;
        self
    }

    pub fn layer(mut self, layer: LayerName) -> Self {
        self.layer = layer;
        self
    }
}
