//! Prelude module for convenient imports.

pub use crate::backend::OpendalFileSystem;
#[cfg(feature = "fs")]
pub use crate::config::FsConfig;
pub use crate::config::{MemoryConfig, StorageConfig};
