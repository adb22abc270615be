//! Map saver: persists grid snapshots received from a topic.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError};
use parking_lot::Mutex;

use crate::core::OccupancyGrid;
use crate::error::Result;
use crate::io::{SaveOptions, SavedMap, save_map_with};

/// Writes snapshots to a fixed base path.
///
/// Saves through one saver are serialized, so two snapshots never race on
/// the same target files.
pub struct MapSaver {
    base_path: PathBuf,
    options: SaveOptions,
    save_lock: Mutex<()>,
}

impl MapSaver {
    /// Create a saver writing `<base_path>.<format>` and `<base_path>.yaml`
    pub fn new(base_path: impl Into<PathBuf>, options: SaveOptions) -> Self {
        Self {
            base_path: base_path.into(),
            options,
            save_lock: Mutex::new(()),
        }
    }

    /// Target base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Save options
    pub fn options(&self) -> &SaveOptions {
        &self.options
    }

    /// Persist one snapshot. The grid is only read.
    pub fn save_snapshot(&self, grid: &OccupancyGrid) -> Result<SavedMap> {
        let _guard = self.save_lock.lock();
        log::info!(
            "Saving {}x{} map ({} m/cell) to {}",
            grid.width(),
            grid.height(),
            grid.resolution(),
            self.base_path.display()
        );
        save_map_with(grid, &self.base_path, &self.options)
    }

    /// Wait up to `timeout` for the next snapshot and save it.
    ///
    /// Returns `Ok(None)` if nothing arrived in time or the publisher went away.
    pub fn save_next(
        &self,
        rx: &Receiver<Arc<OccupancyGrid>>,
        timeout: Duration,
    ) -> Result<Option<SavedMap>> {
        match rx.recv_timeout(timeout) {
            Ok(grid) => self.save_snapshot(&grid).map(Some),
            Err(RecvTimeoutError::Timeout) => {
                log::warn!("No map received within {:?}", timeout);
                Ok(None)
            }
            Err(RecvTimeoutError::Disconnected) => {
                log::warn!("Map publisher disconnected");
                Ok(None)
            }
        }
    }
}
