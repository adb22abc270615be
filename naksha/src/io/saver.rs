//! Map saving with all-or-nothing file replacement.
//!
//! Raster and descriptor are first written to temporary files next to their
//! targets and renamed into place only once both are complete. Temporary
//! files are removed on any failure, so readers never see a half-written map.
//!
//! A raster being overwritten is moved aside first. If the descriptor cannot
//! be put in place, the old raster is moved back so the old descriptor still
//! describes it.

use std::ffi::OsString;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::{NamedTempFile, TempPath};

use crate::codec::{self, RasterFormat};
use crate::core::OccupancyGrid;
use crate::descriptor::MapDescriptor;
use crate::error::{Error, Result};
use crate::occupancy::{Thresholds, grid_to_raster};

/// How a grid is written to disk
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SaveOptions {
    /// Raster format
    pub format: RasterFormat,
    /// Thresholds recorded in the descriptor. `negate` is always written as 0.
    pub thresholds: Thresholds,
}

impl SaveOptions {
    /// Default thresholds in the given format
    pub fn new(format: RasterFormat) -> Self {
        Self {
            format,
            thresholds: Thresholds::default(),
        }
    }
}

/// Files produced by a save
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedMap {
    /// `<base>.pgm` or `<base>.png`
    pub raster_path: PathBuf,
    /// `<base>.yaml`
    pub descriptor_path: PathBuf,
}

/// Save `grid` as `<base>.<format>` plus `<base>.yaml` with default thresholds.
pub fn save_map(grid: &OccupancyGrid, base_path: &Path, format: RasterFormat) -> Result<SavedMap> {
    save_map_with(grid, base_path, &SaveOptions::new(format))
}

/// Save `grid` with explicit options.
pub fn save_map_with(
    grid: &OccupancyGrid,
    base_path: &Path,
    options: &SaveOptions,
) -> Result<SavedMap> {
    // The palette is not polarity-reversed, so the descriptor never negates
    let thresholds = Thresholds {
        negate: false,
        ..options.thresholds
    };
    thresholds.validate()?;

    let file_name = base_path
        .file_name()
        .ok_or_else(|| {
            Error::validation("base_path", format!("{:?} has no file name", base_path))
        })?;

    let raster_path = with_suffix(base_path, options.format.extension());
    let descriptor_path = with_suffix(base_path, "yaml");
    let image_name = {
        let mut name = file_name.to_os_string();
        name.push(".");
        name.push(options.format.extension());
        name.to_string_lossy().into_owned()
    };

    let raster = codec::encode(&grid_to_raster(grid), options.format)?;
    let descriptor = MapDescriptor::for_grid(grid, image_name, options.format, &thresholds);
    let text = descriptor.serialize()?;

    let dir = match base_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let raster_tmp = write_temp(dir, &raster)?;
    let descriptor_tmp = write_temp(dir, text.as_bytes())?;

    let previous = set_aside(dir, &raster_path)?;

    if let Err(e) = raster_tmp.persist(&raster_path) {
        roll_back(previous, &raster_path);
        return Err(Error::io(&raster_path, e.error));
    }

    if let Err(e) = descriptor_tmp.persist(&descriptor_path) {
        roll_back(previous, &raster_path);
        return Err(Error::io(&descriptor_path, e.error));
    }

    log::info!(
        "Saved {}x{} map to {} and {}",
        grid.width(),
        grid.height(),
        raster_path.display(),
        descriptor_path.display()
    );

    Ok(SavedMap {
        raster_path,
        descriptor_path,
    })
}

/// Append `.ext` without replacing an existing extension
fn with_suffix(base: &Path, ext: &str) -> PathBuf {
    let mut s = OsString::from(base.as_os_str());
    s.push(".");
    s.push(ext);
    PathBuf::from(s)
}

/// Move an existing raster to a temporary path in `dir`.
///
/// The backup is deleted when dropped, which is what a successful save wants.
fn set_aside(dir: &Path, path: &Path) -> Result<Option<TempPath>> {
    if !path.is_file() {
        return Ok(None);
    }
    let backup = NamedTempFile::new_in(dir)
        .map_err(|e| Error::io(dir, e))?
        .into_temp_path();
    std::fs::rename(path, &backup).map_err(|e| Error::io(path, e))?;
    log::debug!("Moved {} aside to {}", path.display(), backup.display());
    Ok(Some(backup))
}

/// Put back the raster that was at `raster_path` before the save, or remove
/// the new one if there was none.
fn roll_back(previous: Option<TempPath>, raster_path: &Path) {
    let result = match previous {
        Some(backup) => backup.persist(raster_path).map_err(|e| e.error),
        None => match std::fs::remove_file(raster_path) {
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            other => other,
        },
    };
    if let Err(e) = result {
        log::warn!(
            "Failed to restore {} after a failed save: {}",
            raster_path.display(),
            e
        );
    }
}

/// Write `bytes` to a fresh temporary file in `dir`; dropped on error.
fn write_temp(dir: &Path, bytes: &[u8]) -> Result<NamedTempFile> {
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    tmp.write_all(bytes).map_err(|e| Error::io(tmp.path(), e))?;
    tmp.as_file().sync_all().map_err(|e| Error::io(tmp.path(), e))?;
    Ok(tmp)
}
