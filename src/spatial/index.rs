use macroquad::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index into a map's tile list.
pub type TileNum = u32;

/// Address of one grid cell. Serialized as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        GridPos { x, y }
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((x, y): (i32, i32)) -> Self {
        GridPos { x, y }
    }
}

impl From<GridPos> for (i32, i32) {
    fn from(p: GridPos) -> Self {
        (p.x, p.y)
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Top-left corner of `pos` for cells of size `cell`.
#[inline]
pub fn cell_origin(pos: GridPos, cell: Vec2) -> Vec2 {
    vec2(cell.x * pos.x as f32, cell.y * pos.y as f32)
}

/// Cell containing pixel `p`. Negative pixels map to negative cells.
#[inline]
pub fn pixel_to_cell(p: Vec2, cell: Vec2) -> GridPos {
    GridPos {
        x: (p.x / cell.x).floor() as i32,
        y: (p.y / cell.y).floor() as i32,
    }
}
