//! Prelude module for convenient imports.

pub use crate::config::CreateConfig;
pub use crate::context::{CreateContext, CreateMode};
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::file::{FileInfo, FileKind, Properties};
pub use crate::path::FsPath;
pub use crate::secondary::{OutputStream, SecondaryFileSystem, SharedFileSystem};
