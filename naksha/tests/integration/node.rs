//! Map server publishing to a map saver.

use std::fs;
use std::thread;
use std::time::Duration;

use naksha::{
    CellState, MapMetaData, MapOrigin, MapSaver, MapServer, OccupancyGrid, RasterFormat,
    SaveOptions, load_map,
};
use tempfile::TempDir;

use crate::fixtures::{OFFICE_CELLS, list_dir, write_office_map};

#[test]
fn test_server_to_saver() {
    let dir = TempDir::new().unwrap();
    let yaml = write_office_map(dir.path(), "");
    let server = MapServer::open(&yaml, "office").unwrap();

    let out = dir.path().join("out");
    fs::create_dir(&out).unwrap();
    let saver = MapSaver::new(out.join("copy"), SaveOptions::new(RasterFormat::Png));

    // Subscribing after the publish still delivers the latched snapshot
    let rx = server.subscribe_map();
    let saved = saver
        .save_next(&rx, Duration::from_secs(1))
        .unwrap()
        .expect("latched map");
    assert_eq!(list_dir(&out), vec!["copy.png", "copy.yaml"]);

    let loaded = load_map(&saved.descriptor_path).unwrap();
    assert_eq!(loaded.grid.cells(), &OFFICE_CELLS[..]);
    assert_eq!(loaded.grid.info(), server.get_map().info());
    assert_eq!(server.get_map().frame_id(), "office");
}

#[test]
fn test_saver_receives_replacement_from_other_thread() {
    let dir = TempDir::new().unwrap();
    let yaml = write_office_map(dir.path(), "");
    let server = MapServer::open(&yaml, "map").unwrap();
    let rx = server.subscribe_map();
    // Drain the latched snapshot
    rx.recv_timeout(Duration::from_secs(1)).unwrap();

    let saver = MapSaver::new(dir.path().join("live"), SaveOptions::default());
    let info = MapMetaData::new(0.2, 2, 1, MapOrigin::new(1.0, 1.0, 0.0));
    let grid = OccupancyGrid::new(info, vec![CellState::Occupied, CellState::Unknown]).unwrap();

    let saved = thread::scope(|s| {
        let handle = s.spawn(|| saver.save_next(&rx, Duration::from_secs(5)));
        server.replace(grid.clone());
        handle.join().unwrap()
    })
    .unwrap()
    .expect("replacement published");

    let loaded = load_map(&saved.descriptor_path).unwrap();
    assert_eq!(loaded.grid.cells(), grid.cells());
    assert_eq!(loaded.grid.resolution(), 0.2);
}

#[test]
fn test_reload_after_file_change() {
    let dir = TempDir::new().unwrap();
    let yaml = write_office_map(dir.path(), "");
    let server = MapServer::open(&yaml, "map").unwrap();
    assert_eq!(server.metadata().width, 5);

    fs::write(dir.path().join("office.pgm"), "P2\n2 1\n255\n0 255\n").unwrap();
    let reloaded = server.reload().unwrap();
    assert_eq!(reloaded.cells(), &[CellState::Occupied, CellState::Free][..]);
    assert_eq!(server.metadata().width, 2);

    // A broken file leaves the served map untouched
    fs::write(dir.path().join("office.pgm"), "garbage").unwrap();
    assert!(server.reload().is_err());
    assert_eq!(server.metadata().width, 2);
}

#[test]
fn test_saver_times_out_without_publisher() {
    let dir = TempDir::new().unwrap();
    let topic = naksha::Topic::<std::sync::Arc<OccupancyGrid>>::new("map");
    let rx = topic.subscribe();
    let saver = MapSaver::new(dir.path().join("never"), SaveOptions::default());

    let result = saver.save_next(&rx, Duration::from_millis(20)).unwrap();
    assert!(result.is_none());
    assert!(list_dir(dir.path()).is_empty());
}
