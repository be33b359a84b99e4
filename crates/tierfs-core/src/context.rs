//! Create requests against a secondary file system.
//!
//! A [`CreateContext`] is built by the distributed layer right before it needs
//! an output stream from the secondary file system. It captures which create
//! variant to use and the parameters that variant needs, so the caller does
//! not deal with the two-call shape of [`SecondaryFileSystem`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    FileInfo, FsPath, OutputStream, Properties, Result, SecondaryFileSystem, SharedFileSystem,
};

/// Tracing target for create context operations.
pub const TRACING_TARGET: &str = "tierfs_core::context";

/// Which create call a [`CreateContext`] issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CreateMode {
    /// Only path and overwrite flag are forwarded.
    Simple,
    /// Sizing parameters and properties are forwarded as well.
    Extended {
        replication: i16,
        block_size: i64,
        buffer_size: i32,
    },
}

impl CreateMode {
    /// Builds a mode from a simple-create flag and sizing values.
    ///
    /// Sizing values are discarded when `simple_create` is set.
    pub fn from_flag(simple_create: bool, replication: i16, block_size: i64, buffer_size: i32) -> Self {
        if simple_create {
            Self::Simple
        } else {
            Self::Extended {
                replication,
                block_size,
                buffer_size,
            }
        }
    }

    /// Returns `true` for [`CreateMode::Simple`].
    pub fn is_simple(&self) -> bool {
        matches!(self, Self::Simple)
    }

    /// Returns the mode name as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Extended { .. } => "extended",
        }
    }
}

/// Immutable descriptor of a create request on a secondary file system.
///
/// The context shares the file system with its creator and never manages its
/// lifecycle. Cloning is cheap and clones may be used concurrently.
#[derive(Clone)]
pub struct CreateContext {
    fs: SharedFileSystem,
    mode: CreateMode,
}

impl CreateContext {
    /// Creates a new context.
    pub fn new(fs: SharedFileSystem, mode: CreateMode) -> Self {
        Self { fs, mode }
    }

    /// Creates a context issuing simple creates.
    pub fn simple(fs: SharedFileSystem) -> Self {
        Self::new(fs, CreateMode::Simple)
    }

    /// Creates a context issuing extended creates.
    pub fn extended(fs: SharedFileSystem, replication: i16, block_size: i64, buffer_size: i32) -> Self {
        Self::new(
            fs,
            CreateMode::Extended {
                replication,
                block_size,
                buffer_size,
            },
        )
    }

    /// Creates a context from a simple-create flag and sizing values.
    ///
    /// No range checks are applied; see [`CreateMode::from_flag`]. Sizing
    /// values are only kept in extended mode, so the sizing accessors return
    /// them unchanged there and `None` when `simple_create` is set.
    pub fn from_parts(
        fs: SharedFileSystem,
        simple_create: bool,
        replication: i16,
        block_size: i64,
        buffer_size: i32,
    ) -> Self {
        Self::new(
            fs,
            CreateMode::from_flag(simple_create, replication, block_size, buffer_size),
        )
    }

    /// Creates a file in the secondary file system.
    ///
    /// In simple mode only `path` and `overwrite` are forwarded and
    /// `properties` is ignored. In extended mode every parameter is forwarded
    /// unchanged. The returned stream and any error come straight from the
    /// secondary file system.
    pub async fn create(
        &self,
        path: &FsPath,
        overwrite: bool,
        properties: &Properties,
    ) -> Result<OutputStream> {
        tracing::debug!(
            target: TRACING_TARGET,
            backend = self.fs.backend_name(),
            mode = self.mode.as_str(),
            path = %path,
            overwrite,
            "Creating file on secondary file system"
        );

        let result = match self.mode {
            CreateMode::Simple => self.fs.create(path, overwrite).await,
            CreateMode::Extended {
                replication,
                block_size,
                buffer_size,
            } => {
                self.fs
                    .create_with(
                        path,
                        buffer_size,
                        overwrite,
                        replication,
                        block_size,
                        properties,
                    )
                    .await
            }
        };

        result.inspect_err(|err| {
            tracing::debug!(
                target: TRACING_TARGET,
                path = %path,
                error = %err,
                "Secondary create failed"
            );
        })
    }

    /// Returns metadata of `path` from the secondary file system.
    pub async fn info(&self, path: &FsPath) -> Result<FileInfo> {
        tracing::trace!(
            target: TRACING_TARGET,
            backend = self.fs.backend_name(),
            path = %path,
            "Fetching secondary file info"
        );

        self.fs.info(path).await
    }

    /// Returns the secondary file system.
    pub fn file_system(&self) -> &SharedFileSystem {
        &self.fs
    }

    /// Returns the create mode.
    pub fn mode(&self) -> CreateMode {
        self.mode
    }

    /// Returns `true` when only path and overwrite flag are forwarded.
    pub fn is_simple(&self) -> bool {
        self.mode.is_simple()
    }

    /// Replication factor, `None` in simple mode.
    pub fn replication(&self) -> Option<i16> {
        match self.mode {
            CreateMode::Extended { replication, .. } => Some(replication),
            CreateMode::Simple => None,
        }
    }

    /// Block size in bytes, `None` in simple mode.
    pub fn block_size(&self) -> Option<i64> {
        match self.mode {
            CreateMode::Extended { block_size, .. } => Some(block_size),
            CreateMode::Simple => None,
        }
    }

    /// Buffer size in bytes, `None` in simple mode.
    pub fn buffer_size(&self) -> Option<i32> {
        match self.mode {
            CreateMode::Extended { buffer_size, .. } => Some(buffer_size),
            CreateMode::Simple => None,
        }
    }
}

impl fmt::Debug for CreateContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateContext")
            .field("backend", &self.fs.backend_name())
            .field("mode", &self.mode)
            .finish()
    }
}
