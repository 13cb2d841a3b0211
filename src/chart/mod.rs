//! Layered, context-based chart engine. Produces retained draw commands that
//! the UI paints.

mod context;
mod core;
mod entity;
mod layer;
mod names;

pub use context::{BoundingBox, Bounds, BoundsUpdate, Context};
pub use core::{Chart, ChartLayout};
pub use entity::{HighlightOptions, PlotOptions, Plotted, PlottedEntity, RenderStyle, Series};
pub use layer::{DrawCommand, Layer};
pub use names::{ContextName, LayerName};
