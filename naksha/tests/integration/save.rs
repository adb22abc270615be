//! Saving maps and reading them back.

use std::fs;

use naksha::{
    MapDescriptor, MapMetaData, MapOrigin, OccupancyGrid, RasterFormat, SaveOptions, Thresholds,
    load_map, save_map, save_map_with,
};
use tempfile::TempDir;

use crate::fixtures::{OFFICE_CELLS, list_dir};

fn office_grid() -> OccupancyGrid {
    let info = MapMetaData::new(0.05, 5, 4, MapOrigin::new(-10.0, -7.25, 0.5));
    OccupancyGrid::new(info, OFFICE_CELLS.to_vec()).unwrap()
}

fn assert_roundtrip(format: RasterFormat) {
    let dir = TempDir::new().unwrap();
    let grid = office_grid();

    let saved = save_map(&grid, &dir.path().join("office"), format).unwrap();
    let ext = format.extension();
    assert_eq!(saved.raster_path, dir.path().join(format!("office.{}", ext)));
    assert_eq!(saved.descriptor_path, dir.path().join("office.yaml"));
    assert_eq!(
        list_dir(dir.path()),
        vec![format!("office.{}", ext), "office.yaml".to_string()]
    );

    let loaded = load_map(&saved.descriptor_path).unwrap();
    assert_eq!(loaded.grid.info(), grid.info());
    assert_eq!(loaded.grid.cells(), grid.cells());
    assert_eq!(loaded.descriptor.image, format!("office.{}", ext));
    assert!(!loaded.descriptor.negate);
    assert_eq!(loaded.descriptor.format, Some(format));

    // Nothing stays locked or open
    fs::remove_file(&saved.raster_path).unwrap();
    fs::remove_file(&saved.descriptor_path).unwrap();
    assert!(list_dir(dir.path()).is_empty());
}

#[test]
fn test_pgm_roundtrip() {
    assert_roundtrip(RasterFormat::Pgm);
}

#[test]
fn test_png_roundtrip() {
    assert_roundtrip(RasterFormat::Png);
}

#[test]
fn test_saved_descriptor_contents() {
    let dir = TempDir::new().unwrap();
    let options = SaveOptions {
        format: RasterFormat::Pgm,
        thresholds: Thresholds::new(0.7, 0.2, true),
    };
    let saved = save_map_with(&office_grid(), &dir.path().join("office"), &options).unwrap();

    let text = fs::read_to_string(&saved.descriptor_path).unwrap();
    let descriptor = MapDescriptor::parse(&text).unwrap();
    assert_eq!(descriptor.resolution, 0.05);
    assert_eq!(descriptor.origin, MapOrigin::new(-10.0, -7.25, 0.5));
    assert_eq!(descriptor.occupied_thresh, 0.7);
    assert_eq!(descriptor.free_thresh, 0.2);
    // Palette is written un-negated regardless of the options
    assert!(!descriptor.negate);
}

#[test]
fn test_overwrite_existing_map() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("office");
    let grid = office_grid();
    save_map(&grid, &base, RasterFormat::Pgm).unwrap();

    let info = MapMetaData::new(0.05, 1, 1, MapOrigin::ZERO);
    let small = OccupancyGrid::filled(info, naksha::CellState::Occupied).unwrap();
    let saved = save_map(&small, &base, RasterFormat::Pgm).unwrap();

    let loaded = load_map(&saved.descriptor_path).unwrap();
    assert_eq!(loaded.grid.width(), 1);
    assert_eq!(list_dir(dir.path()), vec!["office.pgm", "office.yaml"]);
}

#[test]
fn test_save_into_missing_directory() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("missing").join("office");
    let err = save_map(&office_grid(), &base, RasterFormat::Png).unwrap_err();
    assert!(matches!(err, naksha::Error::Io { .. }));
    assert!(list_dir(dir.path()).is_empty());
}

#[test]
fn test_pgm_output_bytes() {
    let dir = TempDir::new().unwrap();
    let saved = save_map(&office_grid(), &dir.path().join("office"), RasterFormat::Pgm).unwrap();

    // Top raster row first; 0 occupied, 254 free, 205 unknown
    let mut expected = b"P5\n5 4\n255\n".to_vec();
    expected.extend_from_slice(&[
        0x00, 0xFE, 0xCD, 0x00, 0xFE, //
        0xFE, 0xFE, 0xCD, 0xCD, 0x00, //
        0xCD, 0x00, 0x00, 0xFE, 0xCD, //
        0xFE, 0xFE, 0xFE, 0x00, 0xCD, //
    ]);
    assert_eq!(fs::read(&saved.raster_path).unwrap(), expected);
}

#[test]
fn test_empty_grid_is_never_saved() {
    let dir = TempDir::new().unwrap();
    for (width, height, field) in [(0, 3, "width"), (3, 0, "height")] {
        let info = MapMetaData::new(0.05, width, height, MapOrigin::ZERO);
        match OccupancyGrid::new(info, Vec::new()) {
            Err(naksha::Error::Validation { field: f, .. }) => assert_eq!(f, field),
            other => panic!("{}x{} grid was accepted: {:?}", width, height, other),
        }
    }
    // Files with empty dimensions are rejected on load as well
    let path = dir.path().join("empty.pgm");
    fs::write(&path, "P5\n0 3\n255\n").unwrap();
    let params = naksha::LoadParams::new(0.05, MapOrigin::ZERO);
    assert!(matches!(
        naksha::load_map_image(&path, &params),
        Err(naksha::Error::Format(_))
    ));
}
