use eframe::egui::{
    Align2, Color32, FontId, Mesh, Painter, Pos2, Rect, Response, Sense, Shape, Stroke, Ui, Vec2,
};

use crate::chart::{Chart, ContextName, DrawCommand};
use crate::config::TICKER;
use crate::utils::epoch_sec_to_hm;

// Maps chart pixel space onto the allocated screen rect.
struct ScreenTransform {
    origin: Pos2,
    sx: f32,
    sy: f32,
}

impl ScreenTransform {
    fn new(rect: Rect, chart: &Chart) -> Self {
        let layout = chart.layout();
        Self {
            origin: rect.min,
            sx: rect.width() / layout.width,
            sy: rect.height() / layout.height,
        }
    }

    fn to_screen(&self, p: Pos2) -> Pos2 {
        Pos2::new(self.origin.x + p.x * self.sx, self.origin.y + p.y * self.sy)
    }

    fn to_chart(&self, p: Pos2) -> Pos2 {
        Pos2::new((p.x - self.origin.x) / self.sx, (p.y - self.origin.y) / self.sy)
    }

    fn width(&self, w: f32) -> f32 {
        (w * self.sx.min(self.sy)).max(1.0)
    }
}

fn paint_command(painter: &Painter, t: &ScreenTransform, command: &DrawCommand) {
    match command {
        DrawCommand::Polyline { points, stroke } => {
            if points.len() < 2 {
                return;
            }
            let points = points.iter().map(|p| t.to_screen(*p)).collect();
            painter.add(Shape::line(points, Stroke::new(t.width(stroke.width), stroke.color)));
        }
        DrawCommand::FillRect { rect, color } => {
            let rect = Rect::from_min_max(t.to_screen(rect.min), t.to_screen(rect.max));
            painter.rect_filled(rect, 0.0, *color);
        }
        DrawCommand::FillTriangles { vertices, color } => {
            let mut mesh = Mesh::default();
            for tri in vertices.chunks_exact(3) {
                let base = mesh.vertices.len() as u32;
                for p in tri {
                    mesh.colored_vertex(t.to_screen(*p), *color);
                }
                mesh.add_triangle(base, base + 1, base + 2);
            }
            painter.add(Shape::mesh(mesh));
        }
        DrawCommand::Text {
            pos,
            text,
            size,
            color,
        } => {
            painter.text(
                t.to_screen(*pos),
                Align2::LEFT_BOTTOM,
                text,
                FontId::proportional((size * t.sy).max(8.0)),
                *color,
            );
        }
    }
}

/// Paints every layer of `chart` in order, scaled into a rect of the available
/// width and `height`. Hovering shows the default context's value under the pointer.
pub fn show_chart(ui: &mut Ui, chart: &Chart, height: f32) -> Response {
    let size = Vec2::new(ui.available_width(), height);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect;
    painter.rect_filled(rect, 0.0, TICKER.background_color);

    let painter = painter.with_clip_rect(rect);
    let transform = ScreenTransform::new(rect, chart);
    for layer in chart.layers() {
        for command in layer.commands() {
            paint_command(&painter, &transform, command);
        }
    }

    if let Some(pointer) = response.hover_pos() {
        let p = transform.to_chart(pointer);
        if let Ok((x, y)) = chart.to_domain(&ContextName::default(), p.x as f64, p.y as f64) {
            painter.text(
                rect.left_top() + Vec2::new(8.0, 8.0),
                Align2::LEFT_TOP,
                format!("{}  {:.2}", epoch_sec_to_hm(x as i64), y),
                FontId::monospace(12.0),
                Color32::LIGHT_GRAY,
            );
        }
    }

    response
}
