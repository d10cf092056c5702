use crate::error::MapError;
use crate::loader::json_loader::{decode_map_file, encode_map_file, write_map_file, JsonMapFile, JsonTilemapEntry};
use crate::render::ImageLoader;
use crate::spatial::{GridPos, TileNum};
use log::info;
use std::path::{Path, PathBuf};

/// One persisted placement: grid position and tile number.
pub type TilemapEntry = (GridPos, TileNum);

/// A map file on disk: grid geometry, image references and the sparse
/// placement list.
///
/// Tile numbers in `tilemap` are not checked against `tiles` here; that
/// happens when a [`TileGrid`](crate::TileGrid) is built from the document.
#[derive(Debug, Clone, PartialEq)]
pub struct MapDocument {
    /// Location of the map file. Relative image paths resolve against its parent.
    pub path: PathBuf,
    /// Unscaled size of one grid cell in pixels.
    pub grid_size: (u32, u32),
    /// Unscaled pixel offset of the grid inside the background.
    pub grid_offset: (i32, i32),
    /// Background image, relative to the map file.
    pub bg: String,
    /// Tile images, relative to the map file. Index is the tile number.
    pub tiles: Vec<String>,
    /// Placements as persisted.
    pub tilemap: Vec<TilemapEntry>,
}

impl MapDocument {
    /// Creates an empty document that will be saved to `path`.
    pub fn new(
        path: impl Into<PathBuf>,
        grid_size: (u32, u32),
        bg: impl Into<String>,
        tiles: Vec<String>,
    ) -> Self {
        Self {
            path: path.into(),
            grid_size,
            grid_offset: (0, 0),
            bg: bg.into(),
            tiles,
            tilemap: Vec::new(),
        }
    }

    /// Reads a map file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let j = decode_map_file(path)?;
        info!("loaded map file {}", path.display());
        Ok(Self::from_json(path.to_path_buf(), j))
    }

    /// Writes the document back to [`path`](Self::path), pretty-printed
    /// with four-space indentation.
    pub fn save(&self) -> Result<(), MapError> {
        write_map_file(&self.path, &self.to_json())?;
        info!("saved map file {}", self.path.display());
        Ok(())
    }

    /// The text [`save`](Self::save) would write, without the trailing newline.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        let buf = encode_map_file(&self.to_json())?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Map file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory image references are resolved against.
    pub fn root(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("./"))
    }

    /// Resolved background image path.
    pub fn bg_path(&self) -> PathBuf {
        self.root().join(&self.bg)
    }

    /// Resolved tile image paths, in tile-number order.
    pub fn tile_paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        let root = self.root();
        self.tiles.iter().map(move |t| root.join(t))
    }

    /// Loads the background image through `loader`.
    pub fn load_bg_texture<L: ImageLoader>(&self, loader: &mut L) -> Result<L::Texture, MapError> {
        loader.load_image(&self.bg_path())
    }

    /// Loads every tile image through `loader`, failing on the first error.
    pub fn load_tile_textures<L: ImageLoader>(
        &self,
        loader: &mut L,
    ) -> Result<Vec<L::Texture>, MapError> {
        self.tile_paths()
            .map(|p| loader.load_image(&p))
            .collect()
    }

    fn from_json(path: PathBuf, j: JsonMapFile) -> Self {
        Self {
            path,
            grid_size: j.grid_size,
            grid_offset: j.grid_offset,
            bg: j.bg,
            tiles: j.tiles,
            tilemap: j
                .tilemap
                .into_iter()
                .map(|JsonTilemapEntry(pos, tile)| (pos, tile))
                .collect(),
        }
    }

    fn to_json(&self) -> JsonMapFile {
        JsonMapFile {
            grid_size: self.grid_size,
            grid_offset: self.grid_offset,
            bg: self.bg.clone(),
            tiles: self.tiles.clone(),
            tilemap: self
                .tilemap
                .iter()
                .map(|&(pos, tile)| JsonTilemapEntry(pos, tile))
                .collect(),
        }
    }
}
