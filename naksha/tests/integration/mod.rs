//! Integration tests for naksha
//!
//! Exercise the public load/save API and the server/saver node against real
//! files in temporary directories.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p naksha --test integration -- --nocapture
//! ```

mod boundaries;
mod load;
mod node;
mod save;
