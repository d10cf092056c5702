// tests/map_document_tests.rs

use nap_editor::{GridPos, MapDocument, MapError};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("nap_doc_{tag}_{nanos}"));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

const FULL_MAP: &str = r#"{
    "grid_size": [16, 16],
    "grid_offset": [4, 2],
    "bg": "bg.png",
    "tiles": ["a.png", "b.png"],
    "tilemap": [[[0, 0], 1], [[1, 0], 0]]
}"#;

#[test]
fn load_reads_every_field() -> anyhow::Result<()> {
    let dir = temp_dir("fields");
    let path = dir.join("map.json");
    fs::write(&path, FULL_MAP)?;

    let doc = MapDocument::load(&path)?;
    assert_eq!(doc.path(), path.as_path());
    assert_eq!(doc.grid_size, (16, 16));
    assert_eq!(doc.grid_offset, (4, 2));
    assert_eq!(doc.bg, "bg.png");
    assert_eq!(doc.tiles, vec!["a.png".to_string(), "b.png".to_string()]);
    assert_eq!(
        doc.tilemap,
        vec![(GridPos::new(0, 0), 1), (GridPos::new(1, 0), 0)]
    );
    Ok(())
}

#[test]
fn save_then_load_reproduces_document() -> anyhow::Result<()> {
    let dir = temp_dir("roundtrip");
    let mut doc = MapDocument::new(
        dir.join("out.json"),
        (8, 12),
        "backgrounds/castle.png",
        vec!["t0.png".into(), "t1.png".into(), "t2.png".into()],
    );
    doc.grid_offset = (-3, 7);
    doc.tilemap = vec![
        (GridPos::new(5, 1), 2),
        (GridPos::new(-1, 0), 0),
        (GridPos::new(0, 9), 1),
    ];

    doc.save()?;
    let back = MapDocument::load(&doc.path)?;
    assert_eq!(back, doc);
    Ok(())
}

#[test]
fn tile_numbers_are_not_range_checked_on_load() -> anyhow::Result<()> {
    let dir = temp_dir("range");
    let path = dir.join("map.json");
    fs::write(
        &path,
        r#"{ "grid_size": [16, 16], "bg": "bg.png", "tiles": ["a.png"], "tilemap": [[[0, 0], 5]] }"#,
    )?;

    let doc = MapDocument::load(&path)?;
    assert_eq!(doc.tilemap, vec![(GridPos::new(0, 0), 5)]);
    Ok(())
}

#[test]
fn saved_file_uses_four_space_indent() -> anyhow::Result<()> {
    let dir = temp_dir("indent");
    let path = dir.join("map.json");
    fs::write(&path, FULL_MAP)?;

    let doc = MapDocument::load(&path)?;
    doc.save()?;
    let txt = fs::read_to_string(&path)?;
    assert!(txt.contains("\n    \"bg\": \"bg.png\",\n"));
    assert!(txt.contains("\n        [\n            [\n                0,"));
    Ok(())
}

#[test]
fn missing_bg_is_a_parse_error() {
    let dir = temp_dir("nobg");
    let path = dir.join("map.json");
    fs::write(&path, r#"{ "grid_size": [16, 16], "tiles": ["a.png"] }"#)
        .expect("failed to write map");

    let err = MapDocument::load(&path).unwrap_err();
    match err {
        MapError::Parse { path: p, source } => {
            assert_eq!(p, path);
            assert!(source.is_data());
        }
        other => panic!("expected Parse, got {:?}", other),
    }
}

#[test]
fn missing_file_is_a_parse_error() {
    let dir = temp_dir("nofile");
    let err = MapDocument::load(dir.join("absent.json")).unwrap_err();
    assert!(matches!(err, MapError::Parse { .. }));
}

#[test]
fn save_into_missing_directory_is_an_io_error() {
    let dir = temp_dir("nodir");
    let doc = MapDocument::new(dir.join("missing").join("map.json"), (16, 16), "bg.png", vec![]);
    let err = doc.save().unwrap_err();
    assert!(matches!(err, MapError::Io { .. }));
}
