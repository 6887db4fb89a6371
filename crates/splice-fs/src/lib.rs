//! Filesystem boundary for splice
//!
//! Everything that touches the disk lives here: path normalization,
//! whole-file text reads, atomic locked writes and recipe loading.
//! The transformation crates never open a file themselves.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::NormalizedPath;
