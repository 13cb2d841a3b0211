use std::collections::HashMap;

use eframe::egui::{Pos2, Rect, Stroke, Vec2};

use crate::config::plot::PLOT_CONFIG;
use crate::config::DF;
use crate::domain::{ChartError, Curve, Line};
use crate::trace_time;
use crate::utils::epoch_sec_to_hm;

use super::context::{Bounds, BoundingBox, BoundsUpdate, Context};
use super::entity::{HighlightOptions, PlotOptions, Plotted, PlottedEntity, RenderStyle, Series};
use super::layer::{DrawCommand, Layer};
use super::names::{ContextName, LayerName};

const NON_FINITE: ChartError = ChartError::InvalidParameter("plotted values must be finite");

/// Pixel geometry shared by every layer of a chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub width: f32,
    pub height: f32,
    pub x_axis_margin: f32,
    pub y_axis_margin: f32,
    pub font_size: f32,
    pub axes_padding: f32,
    pub axes_line_width: f32,
    pub y_axis_label_offset: f32,
    pub x_high_label_offset: f32,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: PLOT_CONFIG.chart_width,
            height: PLOT_CONFIG.chart_height,
            x_axis_margin: PLOT_CONFIG.x_axis_margin(),
            y_axis_margin: PLOT_CONFIG.y_axis_margin,
            font_size: PLOT_CONFIG.font_size,
            axes_padding: PLOT_CONFIG.axes_padding,
            axes_line_width: PLOT_CONFIG.axes_line_width,
            y_axis_label_offset: PLOT_CONFIG.y_axis_label_offset,
            x_high_label_offset: PLOT_CONFIG.x_high_label_offset,
        }
    }
}

impl ChartLayout {
    /// Width of the plotting area left of the y axis.
    fn plot_width(&self) -> f64 {
        (self.width - self.y_axis_margin) as f64
    }

    /// Height of the plotting area above the x axis.
    fn plot_height(&self) -> f64 {
        (self.height - self.x_axis_margin) as f64
    }

    pub fn domain_to_pixel(&self, bounds: &Bounds, x: f64, y: f64) -> (f64, f64) {
        let px = (x - bounds.x_low) / bounds.x_span() * self.plot_width();
        let py = self.height as f64
            - (y - bounds.y_low) / bounds.y_span() * self.plot_height()
            - self.x_axis_margin as f64;
        (px, py)
    }

    pub fn pixel_to_domain(&self, bounds: &Bounds, px: f64, py: f64) -> (f64, f64) {
        let x = px / self.plot_width() * bounds.x_span() + bounds.x_low;
        let y = (self.height as f64 - self.x_axis_margin as f64 - py) / self.plot_height()
            * bounds.y_span()
            + bounds.y_low;
        (x, y)
    }

    fn pos(&self, bounds: &Bounds, x: f64, y: f64) -> Pos2 {
        let (px, py) = self.domain_to_pixel(bounds, x, y);
        Pos2::new(px as f32, py as f32)
    }
}

/// A layered chart. Plot calls record an entity and draw it into its layer;
/// whenever a context grows every recorded entity is replayed.
#[derive(Debug, Clone)]
pub struct Chart {
    layout: ChartLayout,
    show_axes: bool,
    contexts: HashMap<ContextName, Context>,
    layers: Vec<Layer>,
    entities: Vec<PlottedEntity>,
    redraws: usize,
}

impl Default for Chart {
    fn default() -> Self {
        Self::new(ChartLayout::default(), true)
    }
}

impl Chart {
    pub fn new(layout: ChartLayout, show_axes: bool) -> Self {
        let mut chart = Self {
            layout,
            show_axes,
            contexts: HashMap::new(),
            layers: Vec::new(),
            entities: Vec::new(),
            redraws: 0,
        };
        chart.reset();
        chart
    }

    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    pub fn show_axes(&self) -> bool {
        self.show_axes
    }

    /// Layers in paint order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, name: &LayerName) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name() == name)
    }

    pub fn has_layer(&self, name: &LayerName) -> bool {
        self.layer(name).is_some()
    }

    /// Appends a layer above the existing ones. Adding an existing name is a no-op.
    pub fn add_layer(&mut self, name: LayerName) -> bool {
        if self.has_layer(&name) {
            log::info!("Layer '{}' already exists", name);
            return false;
        }
        self.layers.push(Layer::new(name));
        true
    }

    pub fn has_context(&self, name: &ContextName) -> bool {
        self.contexts.contains_key(name)
    }

    pub fn context(&self, name: &ContextName) -> Option<&Context> {
        self.contexts.get(name)
    }

    /// Returns the named context, creating it uninitialised if missing.
    pub fn context_or_create(&mut self, name: ContextName) -> &Context {
        self.contexts.entry(name).or_default()
    }

    /// Merges the provided fields into the named context and redraws. A missing
    /// context is created from `partial` with nothing to redraw.
    pub fn set_context(&mut self, partial: Context, name: &ContextName) -> Result<(), ChartError> {
        let (candidate, existed) = match self.contexts.get(name) {
            Some(current) => (current.merged(&partial), true),
            None => (partial, false),
        };
        if candidate.is_initialized() {
            candidate.bounds(name)?;
        }

        if DF.log_context_updates {
            log::info!("Context '{}' set to {:?}", name, candidate);
        }
        self.contexts.insert(name.clone(), candidate);

        if existed {
            self.redraw_chart()?;
        }
        Ok(())
    }

    pub fn to_pixel(&self, context: &ContextName, x: f64, y: f64) -> Result<Pos2, ChartError> {
        let bounds = self.bounds(context)?;
        Ok(self.layout.pos(&bounds, x, y))
    }

    pub fn to_domain(
        &self,
        context: &ContextName,
        px: f64,
        py: f64,
    ) -> Result<(f64, f64), ChartError> {
        let bounds = self.bounds(context)?;
        Ok(self.layout.pixel_to_domain(&bounds, px, py))
    }

    pub fn entities(&self) -> &[PlottedEntity] {
        &self.entities
    }

    pub fn entity(&self, name: &str) -> Option<&PlottedEntity> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Number of full redraws performed since the chart was created.
    pub fn redraw_count(&self) -> usize {
        self.redraws
    }

    /// Plots a straight line across the full x range of an initialised context.
    pub fn plot_line(
        &mut self,
        line: Line,
        name: &str,
        opts: &PlotOptions,
    ) -> Result<(), ChartError> {
        if !(line.slope.is_finite() && line.intercept.is_finite()) {
            return Err(NON_FINITE);
        }
        self.require_layer(&opts.layer)?;
        self.bounds(&opts.context)?;

        let entity = PlottedEntity {
            name: name.to_string(),
            plotted: Plotted::Line(line),
            color: opts.color,
            width: opts.width,
            context: opts.context.clone(),
            layer: opts.layer.clone(),
        };
        self.commit(entity, BoundsUpdate::Stable)
    }

    /// Plots a curve, fitting its context to the data first. Nothing changes if
    /// the call fails.
    pub fn plot_curve(
        &mut self,
        series: impl Into<Series>,
        name: &str,
        opts: &PlotOptions,
    ) -> Result<(), ChartError> {
        let Series::Curve(curve) = series.into() else {
            return Err(ChartError::NotACurve);
        };
        if !curve.is_finite() {
            return Err(NON_FINITE);
        }
        self.require_layer(&opts.layer)?;
        let current = *self
            .contexts
            .get(&opts.context)
            .ok_or_else(|| ChartError::UnknownContext(opts.context.to_string()))?;
        let bbox =
            BoundingBox::of(&curve).ok_or(ChartError::InsufficientData { needed: 1, got: 0 })?;

        let mut candidate = current;
        let update = candidate.fit(&bbox, opts.padding);
        candidate.bounds(&opts.context)?;

        if DF.log_context_updates && update != BoundsUpdate::Stable {
            log::info!("Context '{}' {:?} by '{}': {:?}", opts.context, update, name, candidate);
        }
        self.contexts.insert(opts.context.clone(), candidate);

        let plotted = match opts.style {
            RenderStyle::Line => Plotted::CurveLine(curve),
            RenderStyle::Bar => Plotted::CurveBar(curve),
        };
        let entity = PlottedEntity {
            name: name.to_string(),
            plotted,
            color: opts.color,
            width: opts.width,
            context: opts.context.clone(),
            layer: opts.layer.clone(),
        };
        self.commit(entity, update)
    }

    /// Fills the area between `bottom` and `top`. Does not touch the context.
    pub fn highlight_curve(
        &mut self,
        bottom: &Curve,
        top: &Curve,
        name: &str,
        opts: &HighlightOptions,
    ) -> Result<(), ChartError> {
        if bottom.num_points() != top.num_points() {
            return Err(ChartError::LengthMismatch {
                bottom: bottom.num_points(),
                top: top.num_points(),
            });
        }
        if !(bottom.is_finite() && top.is_finite()) {
            return Err(NON_FINITE);
        }
        self.require_layer(&opts.layer)?;
        self.bounds(&opts.context)?;

        let entity = PlottedEntity {
            name: name.to_string(),
            plotted: Plotted::Band {
                bottom: bottom.clone(),
                top: top.clone(),
                opacity: opts.opacity,
            },
            color: opts.color,
            width: 0.0,
            context: opts.context.clone(),
            layer: opts.layer.clone(),
        };
        self.commit(entity, BoundsUpdate::Stable)
    }

    /// Clears every layer and replays all recorded entities in plot order.
    pub fn redraw_chart(&mut self) -> Result<(), ChartError> {
        trace_time!("redraw_chart", 5_000, {
            self.redraws += 1;
            if DF.log_redraws {
                log::info!("Redrawing {} entities", self.entities.len());
            }

            self.layers.iter_mut().for_each(Layer::clear);
            if self.show_axes {
                self.draw_axes()?;
            }

            let mut commands = Vec::with_capacity(self.entities.len());
            for entity in &self.entities {
                commands.push((entity.layer.clone(), self.render(entity)?));
            }
            for (layer, drawn) in commands {
                self.layer_mut(&layer)?.extend(drawn);
            }
            Ok(())
        })
    }

    /// Forgets every entity and context and restores the default layers.
    pub fn reset(&mut self) {
        self.entities.clear();
        self.contexts.clear();
        self.contexts.insert(ContextName::default(), Context::default());
        self.layers.clear();
        self.add_layer(LayerName::axes());
        self.add_layer(LayerName::main());
    }

    /// Frame plus the low/high labels of the default context. Skipped while
    /// the default context has no bounds.
    pub fn draw_axes(&mut self) -> Result<(), ChartError> {
        let bounds = match self.bounds(&ContextName::default()) {
            Ok(bounds) => bounds,
            Err(ChartError::ContextNotInitialized(_)) => {
                log::debug!("Default context not initialised, skipping axes");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let l = self.layout;
        let white = PLOT_CONFIG.palette.white;
        let corner = Pos2::new(l.width - l.y_axis_margin, l.height - l.x_axis_margin);
        let y_label_x = l.width - l.y_axis_label_offset + 4.0 * l.axes_padding;
        let label = |pos: Pos2, text: String| DrawCommand::Text {
            pos,
            text,
            size: l.font_size,
            color: white,
        };

        let axes = vec![
            DrawCommand::Polyline {
                points: vec![
                    Pos2::new(0.0, corner.y),
                    corner,
                    Pos2::new(corner.x, 0.0),
                ],
                stroke: Stroke::new(l.axes_line_width, white),
            },
            label(
                Pos2::new(0.0, l.height - l.axes_padding),
                epoch_sec_to_hm(bounds.x_low as i64),
            ),
            label(
                Pos2::new(corner.x - l.x_high_label_offset, l.height - l.axes_padding),
                epoch_sec_to_hm(bounds.x_high as i64),
            ),
            label(
                Pos2::new(y_label_x, l.height - 2.0 * l.font_size),
                format!("{}", bounds.y_low.round()),
            ),
            label(Pos2::new(y_label_x, l.font_size), format!("{}", bounds.y_high.round())),
        ];

        let layer = self.layer_mut(&LayerName::axes())?;
        layer.clear();
        layer.extend(axes);
        Ok(())
    }

    fn bounds(&self, context: &ContextName) -> Result<Bounds, ChartError> {
        self.contexts
            .get(context)
            .ok_or_else(|| ChartError::UnknownContext(context.to_string()))?
            .bounds(context)
    }

    fn require_layer(&self, layer: &LayerName) -> Result<(), ChartError> {
        if self.has_layer(layer) {
            Ok(())
        } else {
            Err(ChartError::UnknownLayer(layer.to_string()))
        }
    }

    fn layer_mut(&mut self, name: &LayerName) -> Result<&mut Layer, ChartError> {
        self.layers
            .iter_mut()
            .find(|l| l.name() == name)
            .ok_or_else(|| ChartError::UnknownLayer(name.to_string()))
    }

    /// Records `entity`, replacing any entity of the same name, then draws it.
    /// Replacing or expanding invalidates everything already drawn.
    fn commit(&mut self, entity: PlottedEntity, update: BoundsUpdate) -> Result<(), ChartError> {
        let drawn = self.render(&entity)?;
        let layer = entity.layer.clone();
        let replaced = match self.entities.iter().position(|e| e.name == entity.name) {
            Some(idx) => {
                self.entities.remove(idx);
                true
            }
            None => false,
        };
        self.entities.push(entity);

        if replaced || update.needs_redraw() {
            return self.redraw_chart();
        }
        if update == BoundsUpdate::Initialized && self.show_axes {
            self.draw_axes()?;
        }
        self.layer_mut(&layer)?.extend(drawn);
        Ok(())
    }

    fn render(&self, entity: &PlottedEntity) -> Result<Vec<DrawCommand>, ChartError> {
        let bounds = self.bounds(&entity.context)?;
        let l = &self.layout;
        let stroke = Stroke::new(entity.width, entity.color);

        let commands = match &entity.plotted {
            Plotted::Line(line) => clip_line(line, &bounds)
                .map(|(p1, p2)| DrawCommand::Polyline {
                    points: vec![l.pos(&bounds, p1.0, p1.1), l.pos(&bounds, p2.0, p2.1)],
                    stroke,
                })
                .into_iter()
                .collect(),
            Plotted::CurveLine(curve) => vec![DrawCommand::Polyline {
                points: curve.points().map(|(x, y)| l.pos(&bounds, x, y)).collect(),
                stroke,
            }],
            Plotted::CurveBar(curve) => curve
                .points()
                .map(|(x, y)| {
                    let (px, top) = l.domain_to_pixel(&bounds, x, y.max(0.0));
                    let (_, zero) = l.domain_to_pixel(&bounds, x, 0.0);
                    let (_, tip) = l.domain_to_pixel(&bounds, x, y.abs());
                    DrawCommand::FillRect {
                        rect: Rect::from_min_size(
                            Pos2::new(px as f32 - entity.width, top as f32),
                            Vec2::new(2.0 * entity.width, (zero - tip) as f32),
                        ),
                        color: entity.color,
                    }
                })
                .collect(),
            Plotted::Band {
                bottom,
                top,
                opacity,
            } => band_triangles(l, &bounds, bottom, top)
                .map(|vertices| DrawCommand::FillTriangles {
                    vertices,
                    color: entity.color.gamma_multiply(*opacity),
                })
                .into_iter()
                .collect(),
        };
        Ok(commands)
    }
}

/// Endpoints of `line` across the context's x range. An endpoint below the
/// window floor is moved to where the line crosses it; a horizontal line below
/// the floor is not drawn.
fn clip_line(line: &Line, bounds: &Bounds) -> Option<((f64, f64), (f64, f64))> {
    let clip = |x: f64| {
        let y = line.compute_y(x);
        if y < bounds.y_low {
            line.compute_x(bounds.y_low).ok().map(|x| (x, bounds.y_low))
        } else {
            Some((x, y))
        }
    };
    Some((clip(bounds.x_low)?, clip(bounds.x_high)?))
}

/// Two triangles per segment between consecutive point pairs.
fn band_triangles(
    layout: &ChartLayout,
    bounds: &Bounds,
    bottom: &Curve,
    top: &Curve,
) -> Option<Vec<Pos2>> {
    if bottom.num_points() < 2 {
        return None;
    }
    let lo: Vec<Pos2> = bottom.points().map(|(x, y)| layout.pos(bounds, x, y)).collect();
    let hi: Vec<Pos2> = top.points().map(|(x, y)| layout.pos(bounds, x, y)).collect();

    let mut vertices = Vec::with_capacity((lo.len() - 1) * 6);
    for i in 0..lo.len() - 1 {
        vertices.extend([lo[i], lo[i + 1], hi[i + 1]]);
        vertices.extend([lo[i], hi[i + 1], hi[i]]);
    }
    Some(vertices)
}
