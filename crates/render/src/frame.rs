use crate::list::RenderList;
use glam::Vec3;
use hearth_assets::AssetId;
use hearth_world::{Tile, TileGrid};

/// One draw command collected during a render hook.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    /// A textured model with a world transform.
    Mesh {
        model: AssetId,
        texture: AssetId,
        position: Vec3,
        rotation: Vec3,
        scale: f32,
    },
    /// A flat colored quad in normalized screen coordinates.
    Quad {
        x: f64,
        y: f64,
        size: f64,
        color: [f32; 4],
    },
    /// A line segment in normalized screen coordinates.
    Line { x0: f64, y0: f64, x1: f64, y1: f64 },
}

/// The draw-call list for a single frame.
///
/// Plugins fill this during their render hook; the host hands the finished
/// frame to the platform for presentation. A fresh frame is created per
/// frame, so stale calls can never leak across frames.
#[derive(Debug, Default)]
pub struct Frame {
    calls: Vec<DrawCall>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, call: DrawCall) {
        self.calls.push(call);
    }

    /// Emit mesh calls for every renderable, in insertion order.
    pub fn draw_list(&mut self, list: &RenderList) {
        for (_, r) in list.iter() {
            self.calls.push(DrawCall::Mesh {
                model: r.model,
                texture: r.texture,
                position: r.position,
                rotation: r.rotation,
                scale: r.scale,
            });
        }
    }

    /// Emit one colored quad per tile plus grid lines, in normalized
    /// screen coordinates.
    pub fn draw_tiles(&mut self, grid: &TileGrid) {
        let dim = grid.dimension();
        let cell = 2.0 / dim as f64;
        for y in 0..dim {
            for x in 0..dim {
                let color = match grid.tile(x, y) {
                    Some(Tile::Air) => [0.0, 0.3, 0.8, 1.0],
                    Some(Tile::Grass) => [0.0, 0.8, 0.3, 1.0],
                    Some(Tile::Stone) => [0.8, 0.8, 0.8, 1.0],
                    None => continue,
                };
                self.calls.push(DrawCall::Quad {
                    x: x as f64 * cell - 1.0,
                    y: y as f64 * cell - 1.0,
                    size: cell,
                    color,
                });
            }
        }
        for i in 1..dim {
            let c = cell * i as f64 - 1.0;
            self.calls.push(DrawCall::Line {
                x0: c,
                y0: -1.0,
                x1: c,
                y1: 1.0,
            });
            self.calls.push(DrawCall::Line {
                x0: -1.0,
                y0: c,
                x1: 1.0,
                y1: c,
            });
        }
    }

    /// All calls collected so far, in emission order.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

/// Renderer-agnostic backend interface. Backends consume a finished frame
/// and produce their output; they never mutate host state.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one finished frame.
    fn render(&self, frame: &Frame) -> Self::Output;
}

/// Text backend producing a human-readable frame summary. Useful for the
/// CLI, logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &Frame) -> String {
        let mut meshes = 0usize;
        let mut quads = 0usize;
        let mut lines = 0usize;
        for call in frame.calls() {
            match call {
                DrawCall::Mesh { .. } => meshes += 1,
                DrawCall::Quad { .. } => quads += 1,
                DrawCall::Line { .. } => lines += 1,
            }
        }
        let mut out = format!(
            "=== Frame: {} calls (meshes={meshes}, quads={quads}, lines={lines}) ===\n",
            frame.len()
        );
        for call in frame.calls() {
            if let DrawCall::Mesh {
                position, scale, ..
            } = call
            {
                out.push_str(&format!(
                    "  mesh pos=({:.2}, {:.2}, {:.2}) scale={:.2}\n",
                    position.x, position.y, position.z, scale
                ));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::Renderable;

    #[test]
    fn draw_list_emits_in_insertion_order() {
        let mut list = RenderList::new();
        list.push(Renderable::new(Vec3::new(1.0, 0.0, 0.0), AssetId(1), AssetId(2)));
        list.push(Renderable::new(Vec3::new(2.0, 0.0, 0.0), AssetId(1), AssetId(2)));

        let mut frame = Frame::new();
        frame.draw_list(&list);

        let xs: Vec<f32> = frame
            .calls()
            .iter()
            .map(|c| match c {
                DrawCall::Mesh { position, .. } => position.x,
                _ => panic!("expected mesh"),
            })
            .collect();
        assert_eq!(xs, vec![1.0, 2.0]);
    }

    #[test]
    fn draw_tiles_covers_grid_and_lines() {
        let grid = TileGrid::create(4, "unused.dat");
        let mut frame = Frame::new();
        frame.draw_tiles(&grid);
        // 16 quads plus (dim - 1) * 2 lines.
        assert_eq!(frame.len(), 16 + 6);
    }

    #[test]
    fn tile_colors_follow_tile_kind() {
        let mut grid = TileGrid::create(2, "unused.dat");
        grid.set_tile(0, 0, Tile::Grass).unwrap();

        let mut frame = Frame::new();
        frame.draw_tiles(&grid);

        match &frame.calls()[0] {
            DrawCall::Quad { color, .. } => assert_eq!(*color, [0.0, 0.8, 0.3, 1.0]),
            other => panic!("expected quad, got {other:?}"),
        }
    }

    #[test]
    fn debug_renderer_summarizes() {
        let mut frame = Frame::new();
        frame.push(DrawCall::Quad {
            x: 0.0,
            y: 0.0,
            size: 1.0,
            color: [1.0; 4],
        });
        let out = DebugTextRenderer::new().render(&frame);
        assert!(out.contains("quads=1"));
    }
}
