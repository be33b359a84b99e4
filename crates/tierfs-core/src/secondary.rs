//! Secondary file system abstraction.
//!
//! This module defines the [`SecondaryFileSystem`] trait, the capability the
//! distributed layer delegates file creation and metadata lookup to. Concrete
//! storage backends implement it; [`CreateContext`](crate::CreateContext)
//! consumes it.

use std::sync::Arc;

use futures::io::AsyncWrite;

use crate::{FileInfo, FsPath, Properties, Result};

/// Writable handle to a newly created file.
///
/// Content is committed once the handle is closed.
pub type OutputStream = Box<dyn AsyncWrite + Send + Unpin>;

/// Shared reference to a secondary file system.
pub type SharedFileSystem = Arc<dyn SecondaryFileSystem>;

/// Pluggable backing storage for file creation and metadata lookup.
///
/// Implementations report failures with their original classification; callers
/// such as [`CreateContext`](crate::CreateContext) pass them through unchanged.
#[async_trait::async_trait]
pub trait SecondaryFileSystem: Send + Sync {
    /// Creates a file using only the path and overwrite flag.
    ///
    /// # Parameters
    ///
    /// - `path`: The file to create
    /// - `overwrite`: Whether an existing file may be replaced
    ///
    /// # Errors
    ///
    /// Fails with [`ErrorKind::AlreadyExists`](crate::ErrorKind::AlreadyExists)
    /// when the file exists and `overwrite` is false, or with whatever the
    /// backend reports (missing parent, permissions, I/O).
    async fn create(&self, path: &FsPath, overwrite: bool) -> Result<OutputStream>;

    /// Creates a file with explicit sizing and properties.
    ///
    /// Backends are free to ignore parameters that have no meaning for their
    /// storage model.
    async fn create_with(
        &self,
        path: &FsPath,
        buffer_size: i32,
        overwrite: bool,
        replication: i16,
        block_size: i64,
        properties: &Properties,
    ) -> Result<OutputStream>;

    /// Returns metadata for an existing file or directory.
    async fn info(&self, path: &FsPath) -> Result<FileInfo>;

    /// Short backend identifier used in logs.
    fn backend_name(&self) -> &'static str {
        "custom"
    }
}
