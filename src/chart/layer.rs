use eframe::egui::{Color32, Pos2, Rect, Stroke};

use super::names::LayerName;

/// One retained drawing primitive in layer pixel space.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Polyline { points: Vec<Pos2>, stroke: Stroke },
    FillRect { rect: Rect, color: Color32 },
    /// Flat list of vertices, three per triangle.
    FillTriangles { vertices: Vec<Pos2>, color: Color32 },
    /// `pos` is the left end of the text baseline.
    Text {
        pos: Pos2,
        text: String,
        size: f32,
        color: Color32,
    },
}

/// A transparent drawing surface. Layers cover the whole chart and are
/// painted in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    name: LayerName,
    commands: Vec<DrawCommand>,
}

impl Layer {
    pub fn new(name: LayerName) -> Self {
        Self {
            name,
            commands: Vec::new(),
        }
    }

    pub fn name(&self) -> &LayerName {
        &self.name
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_blank(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn extend(&mut self, commands: impl IntoIterator<Item = DrawCommand>) {
        self.commands.extend(commands);
    }
}
