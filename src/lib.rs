#![warn(missing_docs)]

//! Sparse tile-map editing on top of Macroquad.
//!
//! A [`MapDocument`] is the JSON map file; a [`TileGrid`] is the live,
//! editable grid built from it, plus the sprites that draw it.

mod error;
mod loader {
    pub mod json_loader;
}
mod map_file;
#[allow(missing_docs)]
pub mod render;
#[allow(missing_docs)]
pub mod spatial;
mod tile_grid;

pub use error::MapError;
pub use map_file::{MapDocument, TilemapEntry};
pub use render::{ImageLoader, Sprite, SpriteHandle, SpriteList, SpriteTexture, TextureLoader};
pub use spatial::{GridPos, TileNum};
pub use tile_grid::{GridGeometry, TileGrid, SCALE, TOOLBAR_SCALE};
