//! Threshold boundary policy on decoded files.

use std::fs;

use naksha::CellState::{Free as F, Occupied as O, Unknown as U};
use naksha::{
    LoadParams, MapOrigin, PixelLayout, RasterFormat, RasterImage, Thresholds, load_map_image,
};
use tempfile::TempDir;

#[test]
fn test_exact_thresholds_are_unknown() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("steps.pgm");
    // maxval 20: scores 0.7, 0.65, 0.1, 0.05
    fs::write(&path, "P2\n4 1\n20\n6 7 18 19\n").unwrap();

    let params = LoadParams::new(0.05, MapOrigin::ZERO);
    let grid = load_map_image(&path, &params).unwrap();
    assert_eq!(grid.cells(), &[O, U, U, F][..]);
}

#[test]
fn test_exact_thresholds_negated() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("steps.pgm");
    // Negated scores 0.3, 0.65, 0.7, 0.1
    fs::write(&path, "P2\n4 1\n20\n6 13 14 2\n").unwrap();

    let params = LoadParams::new(0.05, MapOrigin::ZERO)
        .with_thresholds(Thresholds::new(0.65, 0.1, true));
    let grid = load_map_image(&path, &params).unwrap();
    assert_eq!(grid.cells(), &[U, U, O, U][..]);
}

#[test]
fn test_transparent_pixels_are_unknown() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("alpha.png");
    #[rustfmt::skip]
    let samples = vec![
        0, 0, 0, 255,       // opaque black
        255, 255, 255, 0,   // transparent white
        255, 255, 255, 255, // opaque white
        0, 0, 0, 0,         // transparent black
    ];
    let image = RasterImage::new(4, 1, PixelLayout::Rgba, 255, samples).unwrap();
    fs::write(&path, naksha::codec::encode(&image, RasterFormat::Png).unwrap()).unwrap();

    let params = LoadParams::new(0.05, MapOrigin::ZERO);
    let grid = load_map_image(&path, &params).unwrap();
    assert_eq!(grid.cells(), &[O, U, F, U][..]);
}

#[test]
fn test_sixteen_bit_pgm() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deep.pgm");
    let mut bytes = b"P5\n3 1\n65535\n".to_vec();
    for sample in [0u16, 65535, 30000] {
        bytes.extend_from_slice(&sample.to_be_bytes());
    }
    fs::write(&path, bytes).unwrap();

    let params = LoadParams::new(0.05, MapOrigin::ZERO);
    let grid = load_map_image(&path, &params).unwrap();
    // 30000 scores ~0.54
    assert_eq!(grid.cells(), &[O, F, U][..]);
}

#[test]
fn test_wide_maxval_thresholds_exact() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fine.pgm");
    // maxval 1000: scores 0.66, 0.65, 0.1, 0.09
    fs::write(&path, "P2\n4 1\n1000\n340 350 900 910\n").unwrap();

    let params = LoadParams::new(0.05, MapOrigin::ZERO);
    let grid = load_map_image(&path, &params).unwrap();
    assert_eq!(grid.cells(), &[O, U, U, F][..]);
}
