//! Demo world drawn through the viewport: a terrain grid that is greener near
//! the origin, plus markers dropped where the user clicks.

use crate::error::Result;
use crate::state::InputState;
use crate::util::{Rgb, lerp_rgb, rgb_css};
use crate::viewport::{Surface, Viewport};

pub const GRID_SIZE: i32 = 50;
pub const HALF_GRID_SIZE: i32 = GRID_SIZE / 2;
/// Edge length of one terrain cell in world units.
pub const CELL_SIZE: f64 = 200.0;
pub const MARKER_RADIUS: f64 = 5.0;
pub const MARKER_COLOR: &str = "#004e00";

const INFERTILE_COLOR: Rgb = [200.0, 181.0, 170.0];
const FERTILE_COLOR: Rgb = [58.0, 46.0, 39.0];

#[derive(Clone, Debug, PartialEq)]
pub struct TerrainCell {
    /// Cell centre in world units.
    pub x: f64,
    pub y: f64,
    /// 1.0 at the origin falling to 0.0 at the grid corners.
    pub fertility: f64,
}

impl TerrainCell {
    pub fn color(&self) -> String {
        rgb_css(lerp_rgb(INFERTILE_COLOR, FERTILE_COLOR, self.fertility))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub cells: Vec<TerrainCell>,
    pub markers: Vec<Marker>,
    pointer_was_down: bool,
}

impl Scene {
    pub fn new() -> Self {
        let max_distance = ((HALF_GRID_SIZE * HALF_GRID_SIZE * 2) as f64).sqrt();
        let mut cells = Vec::with_capacity((GRID_SIZE * GRID_SIZE) as usize);
        for gx in -HALF_GRID_SIZE..HALF_GRID_SIZE {
            for gy in -HALF_GRID_SIZE..HALF_GRID_SIZE {
                let distance = ((gx * gx + gy * gy) as f64).sqrt();
                cells.push(TerrainCell {
                    x: gx as f64 * CELL_SIZE,
                    y: gy as f64 * CELL_SIZE,
                    fertility: 1.0 - distance / max_distance,
                });
            }
        }
        Self {
            cells,
            markers: Vec::new(),
            pointer_was_down: false,
        }
    }

    /// Drops a marker under the pointer on the frame its button goes down.
    /// Holding the button adds nothing more; it has to be released first.
    /// Returns the marker that was added, if any.
    pub fn place_marker_at_pointer<S: Surface>(
        &mut self,
        input: &InputState,
        viewport: &Viewport<S>,
    ) -> Option<Marker> {
        let down = input.is_pointer_down();
        let pressed = down && !self.pointer_was_down;
        self.pointer_was_down = down;
        if !pressed {
            return None;
        }
        let (x, y) = viewport.to_world(input.pointer_x(), input.pointer_y());
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let marker = Marker {
            x,
            y,
            radius: MARKER_RADIUS,
        };
        self.markers.push(marker);
        Some(marker)
    }

    pub fn clear_markers(&mut self) {
        self.markers.clear();
    }

    pub fn draw<S: Surface>(&self, viewport: &mut Viewport<S>) -> Result<()> {
        for cell in &self.cells {
            viewport.draw_rect(cell.x, cell.y, CELL_SIZE, CELL_SIZE, &cell.color())?;
        }
        for marker in &self.markers {
            viewport.draw_circle(marker.x, marker.y, marker.radius, MARKER_COLOR)?;
        }
        Ok(())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
