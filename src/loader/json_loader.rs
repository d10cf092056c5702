// src/loader/json_loader.rs
use crate::error::MapError;
use crate::spatial::{GridPos, TileNum};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

const INDENT: &[u8] = b"    ";

/// On-disk shape of a map file, 1-to-1 with the JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct JsonMapFile {
    pub grid_size: (u32, u32),
    #[serde(default)]
    pub grid_offset: (i32, i32),
    pub bg: String,
    pub tiles: Vec<String>,
    #[serde(default)]
    pub tilemap: Vec<JsonTilemapEntry>,
}

/// `[[x, y], tile]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct JsonTilemapEntry(pub GridPos, pub TileNum);

pub(crate) fn decode_map_file(path: &Path) -> Result<JsonMapFile, MapError> {
    let parse_err = |source| MapError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path)
        .map_err(serde_json::Error::io)
        .map_err(parse_err)?;
    let j: JsonMapFile = serde_json::from_reader(BufReader::new(file)).map_err(parse_err)?;

    debug!(
        "decoded {}: {} tiles, {} placements",
        path.display(),
        j.tiles.len(),
        j.tilemap.len()
    );
    Ok(j)
}

pub(crate) fn encode_map_file(j: &JsonMapFile) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    j.serialize(&mut ser)?;
    Ok(buf)
}

pub(crate) fn write_map_file(path: &Path, j: &JsonMapFile) -> Result<(), MapError> {
    let io_err = |source| MapError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut buf = encode_map_file(j).map_err(io::Error::from).map_err(io_err)?;
    buf.push(b'\n');
    std::fs::write(path, buf).map_err(io_err)?;

    debug!("wrote {} ({} placements)", path.display(), j.tilemap.len());
    Ok(())
}
