//! In-process map server node.
//!
//! - [`MapServer`]: answers "current map" requests and publishes the grid on
//!   latched `map` / `map_metadata` topics
//! - [`MapSaver`]: persists a snapshot received from a topic
//! - [`Topic`]: latched publish/subscribe over crossbeam channels
//!
//! Snapshots travel as `Arc<OccupancyGrid>`; receivers share them read-only.

mod saver;
mod server;
mod topic;

pub use saver::MapSaver;
pub use server::{MAP_TOPIC, METADATA_TOPIC, MapServer};
pub use topic::Topic;
