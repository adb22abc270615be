//! Loading maps from disk.

use naksha::{CellState, LoadParams, MapOrigin, Thresholds, load_map, load_map_image};
use tempfile::TempDir;

use crate::fixtures::{OFFICE_CELLS, OFFICE_RESOLUTION, write_office_map};

#[test]
fn test_office_map_through_descriptor() {
    let dir = TempDir::new().unwrap();
    let yaml = write_office_map(dir.path(), "");

    let loaded = load_map(&yaml).unwrap();
    assert_eq!(loaded.image_path, dir.path().join("office.pgm"));

    let grid = &loaded.grid;
    assert_eq!(grid.width(), 5);
    assert_eq!(grid.height(), 4);
    assert_eq!(grid.resolution(), OFFICE_RESOLUTION);
    assert_eq!(grid.origin(), MapOrigin::new(-1.5, 2.0, 0.0));
    assert_eq!(grid.frame_id(), "map");
    assert_eq!(grid.cells(), &OFFICE_CELLS[..]);

    // Top-left pixel (0) lands in the top grid row
    assert_eq!(grid.get(0, 3), Some(CellState::Occupied));
    // Bottom-left pixel (255) is grid (0, 0)
    assert_eq!(grid.get(0, 0), Some(CellState::Free));

    let counts = grid.count_by_state();
    assert_eq!((counts.free, counts.occupied, counts.unknown), (8, 6, 6));
}

#[test]
fn test_office_map_direct() {
    let dir = TempDir::new().unwrap();
    write_office_map(dir.path(), "");

    let params = LoadParams::new(OFFICE_RESOLUTION, MapOrigin::ZERO);
    let grid = load_map_image(&dir.path().join("office.pgm"), &params).unwrap();
    assert_eq!(grid.cells(), &OFFICE_CELLS[..]);
    assert_eq!(grid.origin(), MapOrigin::ZERO);
}

#[test]
fn test_negated_office_map() {
    let dir = TempDir::new().unwrap();
    write_office_map(dir.path(), "");

    let params = LoadParams::new(OFFICE_RESOLUTION, MapOrigin::ZERO)
        .with_thresholds(Thresholds::new(0.65, 0.1, true));
    let grid = load_map_image(&dir.path().join("office.pgm"), &params).unwrap();

    // Pure black (0) is free and pure white (255) occupied once negated
    assert_eq!(grid.get(0, 3), Some(CellState::Free));
    assert_eq!(grid.get(0, 0), Some(CellState::Occupied));
    // 205 scores 0.804 negated
    assert_eq!(grid.get(2, 3), Some(CellState::Occupied));
}

#[test]
fn test_descriptor_thresholds_applied() {
    let dir = TempDir::new().unwrap();
    // 100 scores 0.608 and 200 scores 0.216
    let yaml = write_office_map(dir.path(), "occupied_thresh: 0.6\nfree_thresh: 0.3\n");

    let loaded = load_map(&yaml).unwrap();
    assert_eq!(loaded.descriptor.occupied_thresh, 0.6);
    assert_eq!(loaded.grid.get(2, 2), Some(CellState::Occupied));
    assert_eq!(loaded.grid.get(3, 2), Some(CellState::Free));
}

#[test]
fn test_png_map_through_descriptor() {
    let dir = TempDir::new().unwrap();
    let image = naksha::RasterImage::gray(2, 1, vec![0, 255]).unwrap();
    let bytes = naksha::codec::encode(&image, naksha::RasterFormat::Png).unwrap();
    std::fs::write(dir.path().join("tiny.png"), bytes).unwrap();
    let yaml = dir.path().join("tiny.yaml");
    std::fs::write(
        &yaml,
        "image: tiny.png\nresolution: 0.5\norigin: [0.0, 0.0, 0.0]\nnegate: false\n",
    )
    .unwrap();

    let loaded = load_map(&yaml).unwrap();
    assert_eq!(
        loaded.grid.cells(),
        &[CellState::Occupied, CellState::Free][..]
    );
}
