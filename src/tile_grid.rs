use crate::error::MapError;
use crate::map_file::MapDocument;
use crate::render::{ImageLoader, Sprite, SpriteHandle, SpriteList, SpriteTexture, TextureLoader};
use crate::spatial::{cell_origin, pixel_to_cell, GridPos, TileNum};
use log::{debug, info, warn};
use macroquad::prelude::*;
use std::collections::HashMap;
use std::path::Path;

/// Display multiplier applied to all map geometry.
pub const SCALE: f32 = 3.0;
/// Extra multiplier for toolbar sprites and slots, on top of [`SCALE`].
pub const TOOLBAR_SCALE: f32 = 4.0;

/// Screen-space layout derived once from the document and background size.
///
/// The map area spans `(0, 0)..(w, h - toolbar_h)`; the toolbar fills the
/// strip below it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    /// Scaled background size.
    pub bg_size: Vec2,
    /// Scaled grid cell size.
    pub cell: Vec2,
    /// Scaled grid offset.
    pub offset: Vec2,
    /// Height of the toolbar strip.
    pub toolbar_h: f32,
    /// Width of one toolbar slot.
    pub toolbar_w: f32,
    /// Left edge of the first toolbar slot.
    pub toolbar_x: f32,
    /// Window width.
    pub w: f32,
    /// Window height.
    pub h: f32,
}

impl GridGeometry {
    fn new(doc: &MapDocument, bg_native: Vec2, tile_count: usize) -> Self {
        let bg_size = bg_native * SCALE;
        let cell = vec2(doc.grid_size.0 as f32, doc.grid_size.1 as f32) * SCALE;
        let offset = vec2(doc.grid_offset.0 as f32, doc.grid_offset.1 as f32) * SCALE;
        let toolbar_h = cell.y * TOOLBAR_SCALE;
        let toolbar_w = cell.x * TOOLBAR_SCALE;
        let (w, h) = (bg_size.x, bg_size.y + toolbar_h);
        let toolbar_x = w / 2.0 - (tile_count as f32 * toolbar_w / 2.0).floor();

        GridGeometry {
            bg_size,
            cell,
            offset,
            toolbar_h,
            toolbar_w,
            toolbar_x,
            w,
            h,
        }
    }
}

/// Live, editable tile grid built from a [`MapDocument`].
///
/// Draw order is: background, one toolbar sprite per tile type, then one
/// sprite per occupied cell in placement order.
pub struct TileGrid<T> {
    document: MapDocument,
    geometry: GridGeometry,
    tile_textures: Vec<T>,
    tiles: HashMap<GridPos, (TileNum, SpriteHandle)>,
    sprites: SpriteList<T>,
    toolbar: Vec<SpriteHandle>,
}

impl<T: SpriteTexture> TileGrid<T> {
    /// Builds the grid and replays every placement of `document`.
    ///
    /// Fails with [`MapError::InvalidTile`] if any placement names a tile
    /// that `tile_textures` does not have.
    pub fn new(document: MapDocument, tile_textures: Vec<T>, bg_texture: T) -> Result<Self, MapError> {
        let geometry = GridGeometry::new(&document, bg_texture.size(), tile_textures.len());
        let mut sprites = SpriteList::new();

        let mut bg = Sprite::new(bg_texture).with_scale(SCALE);
        bg.left = -geometry.offset.x;
        bg.top = -geometry.offset.y;
        sprites.push(bg);

        let mut toolbar = Vec::with_capacity(tile_textures.len());
        for (n, t) in tile_textures.iter().enumerate() {
            let mut s = Sprite::new(t.clone()).with_scale(SCALE * TOOLBAR_SCALE);
            s.left = geometry.toolbar_x + n as f32 * geometry.toolbar_w;
            s.set_bottom(geometry.h);
            toolbar.push(sprites.push(s));
        }

        let entries = document.tilemap.clone();
        let mut grid = TileGrid {
            document,
            geometry,
            tile_textures,
            tiles: HashMap::with_capacity(entries.len()),
            sprites,
            toolbar,
        };
        for (pos, tile) in entries {
            grid.set(pos, Some(tile))?;
        }

        info!(
            "tile grid {}x{} px, {} tile types, {} placements",
            grid.geometry.w,
            grid.geometry.h,
            grid.tile_textures.len(),
            grid.tiles.len()
        );
        Ok(grid)
    }

    /// Loads the document at `path` and its images through `loader`.
    pub fn load_with<L>(path: impl AsRef<Path>, loader: &mut L) -> Result<Self, MapError>
    where
        L: ImageLoader<Texture = T>,
    {
        let document = MapDocument::load(path)?;
        let bg_texture = document.load_bg_texture(loader)?;
        let tile_textures = document.load_tile_textures(loader)?;
        Self::new(document, tile_textures, bg_texture)
    }

    /// Tile number placed at `pos`.
    pub fn get(&self, pos: GridPos) -> Result<TileNum, MapError> {
        self.tiles
            .get(&pos)
            .map(|&(tile, _)| tile)
            .ok_or(MapError::KeyNotFound(pos))
    }

    /// Places `tile` at `pos`, or clears `pos` when `tile` is `None`.
    ///
    /// Clearing an empty cell is a no-op. Replacing a tile keeps its sprite
    /// and draw position; only the texture changes.
    pub fn set(&mut self, pos: GridPos, tile: Option<TileNum>) -> Result<(), MapError> {
        let Some(tile) = tile else {
            if self.tiles.contains_key(&pos) {
                return self.delete(pos);
            }
            return Ok(());
        };

        let texture = match self.tile_textures.get(tile as usize) {
            Some(t) => t.clone(),
            None => {
                warn!("rejected tile {} at {}", tile, pos);
                return Err(MapError::InvalidTile {
                    tile,
                    tile_count: self.tile_textures.len(),
                });
            }
        };

        match self.tiles.get(&pos).copied() {
            Some((old, _)) if old == tile => {}
            Some((_, handle)) => {
                if let Some(s) = self.sprites.get_mut(handle) {
                    s.texture = texture;
                }
                self.tiles.insert(pos, (tile, handle));
                debug!("retiled {} -> {}", pos, tile);
            }
            None => {
                let origin = cell_origin(pos, self.geometry.cell);
                let mut s = Sprite::new(texture).with_size(self.geometry.cell);
                s.left = origin.x;
                s.top = origin.y;
                let handle = self.sprites.push(s);
                self.tiles.insert(pos, (tile, handle));
                debug!("placed {} at {}", tile, pos);
            }
        }
        Ok(())
    }

    /// Clears `pos`. Fails with [`MapError::KeyNotFound`] if it is empty.
    pub fn delete(&mut self, pos: GridPos) -> Result<(), MapError> {
        let (_, handle) = self.tiles.remove(&pos).ok_or(MapError::KeyNotFound(pos))?;
        self.sprites.remove(handle);
        debug!("cleared {}", pos);
        Ok(())
    }

    /// Copies the live placements into the document and writes it out.
    ///
    /// Entries are written in row-major order so saves are reproducible.
    pub fn save(&mut self) -> Result<(), MapError> {
        let mut entries: Vec<(GridPos, TileNum)> =
            self.tiles.iter().map(|(&pos, &(tile, _))| (pos, tile)).collect();
        entries.sort_unstable_by_key(|(p, _)| (p.y, p.x));
        self.document.tilemap = entries;
        self.document.save()
    }

    /// Tile whose toolbar slot contains `p`.
    pub fn toolbar_tile_at(&self, p: Vec2) -> Option<TileNum> {
        (0..self.tile_textures.len())
            .find(|&n| self.toolbar_slot(n).contains(p))
            .map(|n| n as TileNum)
    }

    /// Screen rectangle of toolbar slot `n`.
    pub fn toolbar_slot(&self, n: usize) -> Rect {
        let g = &self.geometry;
        Rect::new(
            g.toolbar_x + n as f32 * g.toolbar_w,
            g.h - g.toolbar_h,
            g.toolbar_w,
            g.toolbar_h,
        )
    }

    /// Grid cell under `p`, if `p` lies in the map area.
    pub fn cell_at(&self, p: Vec2) -> Option<GridPos> {
        let g = &self.geometry;
        if p.x < 0.0 || p.y < 0.0 || p.x >= g.w || p.y >= g.h - g.toolbar_h {
            return None;
        }
        Some(pixel_to_cell(p, g.cell))
    }

    /// Whether `pos` holds a tile.
    pub fn contains(&self, pos: GridPos) -> bool {
        self.tiles.contains_key(&pos)
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether no cell is occupied.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Occupied cells, in no particular order.
    pub fn placements(&self) -> impl Iterator<Item = (GridPos, TileNum)> + '_ {
        self.tiles.iter().map(|(&pos, &(tile, _))| (pos, tile))
    }

    /// Sprite showing the tile at `pos`.
    pub fn sprite_for(&self, pos: GridPos) -> Option<SpriteHandle> {
        self.tiles.get(&pos).map(|&(_, h)| h)
    }

    /// Number of tile types.
    pub fn tile_count(&self) -> usize {
        self.tile_textures.len()
    }

    /// Toolbar sprites, indexed by tile number.
    pub fn toolbar(&self) -> &[SpriteHandle] {
        &self.toolbar
    }

    /// Everything that gets drawn.
    pub fn sprites(&self) -> &SpriteList<T> {
        &self.sprites
    }

    /// Backing document. Its `tilemap` is only refreshed by [`save`](Self::save).
    pub fn document(&self) -> &MapDocument {
        &self.document
    }

    /// Derived layout.
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Window width needed to show the map and toolbar.
    pub fn w(&self) -> f32 {
        self.geometry.w
    }

    /// Window height needed to show the map and toolbar.
    pub fn h(&self) -> f32 {
        self.geometry.h
    }
}

impl TileGrid<Texture2D> {
    /// Loads a map and its textures. Needs a live Macroquad context.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        Self::load_with(path, &mut TextureLoader)
    }

    /// Draws background, toolbar and tiles without smoothing.
    pub fn draw(&self) {
        self.sprites.draw(FilterMode::Nearest);
    }
}
