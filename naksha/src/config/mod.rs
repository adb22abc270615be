//! Node configuration loading.
//!
//! Loads server and saver settings from a single TOML file with defaults for
//! everything.
//!
//! ## Example TOML
//!
//! ```toml
//! [map]
//! descriptor = "maps/office.yaml"
//! frame_id = "map"
//!
//! [saver]
//! output = "maps/office_copy"   # writes office_copy.pgm + office_copy.yaml
//! format = "pgm"                # or "png"
//! occupied_thresh = 0.65
//! free_thresh = 0.1
//! wait_timeout_secs = 5.0
//! ```

mod defaults;
mod error;
mod node;

pub use error::ConfigLoadError;
pub use node::{DEFAULT_CONFIG_PATH, MapSection, NodeConfig, SaverSection};
