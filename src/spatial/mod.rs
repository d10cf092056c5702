mod index;

pub use index::{cell_origin, pixel_to_cell, GridPos, TileNum};
