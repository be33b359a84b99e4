//! Recording secondary file system for testing.
//!
//! [`MockFileSystem`] remembers every call it receives so tests can assert
//! which create variant was invoked and with which arguments. It keeps an
//! in-memory table of known files to answer `info` requests.
//!
//! # Feature Flag
//!
//! This module is only available when the `test-utils` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! tierfs-core = { version = "...", features = ["test-utils"] }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tierfs_core::mock::{FsCall, MockFileSystem};
//!
//! let fs = Arc::new(MockFileSystem::new());
//! let ctx = CreateContext::simple(fs.clone());
//! ctx.create(&path, false, &Properties::new()).await?;
//! assert_eq!(fs.calls().await, vec![FsCall::Create { path, overwrite: false }]);
//! ```

use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::{
    Error, ErrorKind, FileInfo, FsPath, OutputStream, Properties, Result, SecondaryFileSystem,
};

/// A call received by [`MockFileSystem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsCall {
    /// Simple create.
    Create { path: FsPath, overwrite: bool },
    /// Extended create.
    CreateWith {
        path: FsPath,
        buffer_size: i32,
        overwrite: bool,
        replication: i16,
        block_size: i64,
        properties: Properties,
    },
    /// Metadata lookup.
    Info { path: FsPath },
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<FsCall>,
    files: HashMap<FsPath, FileInfo>,
    failure: Option<ErrorKind>,
}

/// Recording secondary file system.
#[derive(Debug, Default)]
pub struct MockFileSystem {
    state: Mutex<MockState>,
}

impl MockFileSystem {
    /// Creates an empty mock file system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an entry that `info` will report.
    pub fn with_file(mut self, info: FileInfo) -> Self {
        let state = self.state.get_mut();
        state.files.insert(info.path.clone(), info);
        self
    }

    /// Makes every call fail with the given kind.
    ///
    /// The error carries an I/O error as its source.
    pub fn fail_with(mut self, kind: ErrorKind) -> Self {
        self.state.get_mut().failure = Some(kind);
        self
    }

    /// Returns the calls received so far, in order.
    pub async fn calls(&self) -> Vec<FsCall> {
        self.state.lock().await.calls.clone()
    }

    /// Returns the metadata currently stored for `path`.
    pub async fn file(&self, path: &FsPath) -> Option<FileInfo> {
        self.state.lock().await.files.get(path).cloned()
    }

    async fn record_create(&self, call: FsCall, entry: FileInfo, overwrite: bool) -> Result<OutputStream> {
        let mut state = self.state.lock().await;
        state.calls.push(call);

        if let Some(kind) = state.failure {
            return Err(injected(kind, &entry.path));
        }

        if !overwrite && state.files.contains_key(&entry.path) {
            return Err(Error::already_exists().with_message(entry.path.to_string()));
        }

        state.files.insert(entry.path.clone(), entry);
        Ok(Box::new(futures::io::sink()))
    }
}

/// Injected failures carry an I/O error as source.
fn injected(kind: ErrorKind, path: &FsPath) -> Error {
    Error::new(kind)
        .with_message(format!("injected failure for {path}"))
        .with_source(std::io::Error::other("mock backend failure"))
}

#[async_trait::async_trait]
impl SecondaryFileSystem for MockFileSystem {
    async fn create(&self, path: &FsPath, overwrite: bool) -> Result<OutputStream> {
        let call = FsCall::Create {
            path: path.clone(),
            overwrite,
        };

        self.record_create(call, FileInfo::file(path.clone(), 0), overwrite)
            .await
    }

    async fn create_with(
        &self,
        path: &FsPath,
        buffer_size: i32,
        overwrite: bool,
        replication: i16,
        block_size: i64,
        properties: &Properties,
    ) -> Result<OutputStream> {
        let call = FsCall::CreateWith {
            path: path.clone(),
            buffer_size,
            overwrite,
            replication,
            block_size,
            properties: properties.clone(),
        };
        let entry = FileInfo::file(path.clone(), 0)
            .with_block_size(u64::try_from(block_size).unwrap_or_default())
            .with_properties(properties.clone());

        self.record_create(call, entry, overwrite).await
    }

    async fn info(&self, path: &FsPath) -> Result<FileInfo> {
        let mut state = self.state.lock().await;
        state.calls.push(FsCall::Info { path: path.clone() });

        if let Some(kind) = state.failure {
            return Err(injected(kind, path));
        }

        state
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::not_found().with_message(path.to_string()))
    }

    fn backend_name(&self) -> &'static str {
        "mock"
    }
}
