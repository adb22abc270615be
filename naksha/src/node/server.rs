//! Static map server.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crossbeam_channel::Receiver;
use parking_lot::{Mutex, RwLock};

use super::topic::Topic;
use crate::core::{MapMetaData, OccupancyGrid};
use crate::error::Result;
use crate::io::load_map;

/// Topic carrying full grid snapshots
pub const MAP_TOPIC: &str = "map";

/// Topic carrying grid geometry only
pub const METADATA_TOPIC: &str = "map_metadata";

/// Serves one map loaded from a descriptor.
///
/// The grid is held as an immutable `Arc` snapshot: `get_map` hands out
/// clones of the handle, and a reload swaps in a new snapshot without
/// disturbing readers of the old one.
pub struct MapServer {
    descriptor_path: PathBuf,
    frame_id: String,
    current: RwLock<Arc<OccupancyGrid>>,
    map_topic: Topic<Arc<OccupancyGrid>>,
    metadata_topic: Topic<MapMetaData>,
    reload_lock: Mutex<()>,
}

impl MapServer {
    /// Load the descriptor and start serving it in `frame_id`.
    pub fn open(descriptor_path: &Path, frame_id: &str) -> Result<Self> {
        let grid = Arc::new(load_map(descriptor_path)?.grid.with_frame_id(frame_id));

        let server = Self {
            descriptor_path: descriptor_path.to_path_buf(),
            frame_id: frame_id.to_string(),
            current: RwLock::new(grid.clone()),
            map_topic: Topic::new(MAP_TOPIC),
            metadata_topic: Topic::new(METADATA_TOPIC),
            reload_lock: Mutex::new(()),
        };
        server.announce(grid);

        log::info!(
            "Serving {} in frame '{}'",
            descriptor_path.display(),
            frame_id
        );
        Ok(server)
    }

    /// Current snapshot (static map service)
    pub fn get_map(&self) -> Arc<OccupancyGrid> {
        self.current.read().clone()
    }

    /// Geometry of the current snapshot
    pub fn metadata(&self) -> MapMetaData {
        *self.current.read().info()
    }

    /// Descriptor the map was loaded from
    pub fn descriptor_path(&self) -> &Path {
        &self.descriptor_path
    }

    /// Subscribe to grid snapshots; the current one arrives first.
    pub fn subscribe_map(&self) -> Receiver<Arc<OccupancyGrid>> {
        self.map_topic.subscribe()
    }

    /// Subscribe to map metadata; the current value arrives first.
    pub fn subscribe_metadata(&self) -> Receiver<MapMetaData> {
        self.metadata_topic.subscribe()
    }

    /// Re-read the descriptor and publish the new snapshot.
    ///
    /// Concurrent reloads are serialized. On failure the previous snapshot
    /// stays in service.
    pub fn reload(&self) -> Result<Arc<OccupancyGrid>> {
        let _guard = self.reload_lock.lock();
        let grid = load_map(&self.descriptor_path)?.grid.with_frame_id(&self.frame_id);
        Ok(self.replace(grid))
    }

    /// Serve `grid` in place of the current snapshot.
    ///
    /// The write lock is held until both topics are published, so concurrent
    /// replacements latch the same snapshot that `get_map` returns.
    pub fn replace(&self, grid: OccupancyGrid) -> Arc<OccupancyGrid> {
        let grid = Arc::new(grid);
        let mut current = self.current.write();
        *current = grid.clone();
        self.announce(grid.clone());
        drop(current);
        grid
    }

    fn announce(&self, grid: Arc<OccupancyGrid>) {
        self.metadata_topic.publish(*grid.info());
        self.map_topic.publish(grid);
    }
}
