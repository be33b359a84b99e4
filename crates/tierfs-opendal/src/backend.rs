//! Secondary file system backed by an OpenDAL operator.

use futures::TryStreamExt;
use opendal::{Operator, services};
use tierfs_core::{
    Error, FileInfo, FsPath, OutputStream, Properties, Result, SecondaryFileSystem,
};

use crate::TRACING_TARGET;
use crate::config::StorageConfig;
use crate::error::from_opendal;

/// Secondary file system that stores files through OpenDAL.
///
/// Replication and block size have no meaning for the supported services and
/// are not applied. The buffer size of extended creates becomes the writer
/// chunk size.
#[derive(Clone)]
pub struct OpendalFileSystem {
    operator: Operator,
    config: StorageConfig,
}

impl OpendalFileSystem {
    /// Creates a new file system from configuration.
    pub fn new(config: StorageConfig) -> Result<Self> {
        let operator = Self::create_operator(&config)?;

        tracing::info!(
            target: TRACING_TARGET,
            backend = config.backend_name(),
            root = config.root().unwrap_or("/"),
            "Secondary file system initialized"
        );

        Ok(Self { operator, config })
    }

    /// Returns the configuration for this file system.
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Returns the underlying operator.
    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    async fn open_writer(
        &self,
        path: &FsPath,
        overwrite: bool,
        chunk: Option<usize>,
    ) -> Result<OutputStream> {
        if path.is_root() {
            return Err(Error::invalid_path().with_message("cannot create the root directory as a file"));
        }

        let key = object_key(path);

        // Not atomic: a concurrent writer may create the object in between.
        if !overwrite && self.operator.exists(key).await.map_err(from_opendal)? {
            return Err(Error::already_exists().with_message(path.to_string()));
        }

        let mut writer = self.operator.writer_with(key);
        if let Some(chunk) = chunk {
            writer = writer.chunk(chunk);
        }

        let writer = writer.await.map_err(from_opendal)?;

        tracing::debug!(
            target: TRACING_TARGET,
            path = %path,
            overwrite,
            chunk = ?chunk,
            "File opened for writing"
        );

        Ok(Box::new(writer.into_futures_async_write()))
    }

    /// Returns `true` when some object lives under `key` as a prefix.
    ///
    /// Object stores keep directories implicit: writing `a/b.txt` creates
    /// no `a` entry of its own.
    async fn has_children(&self, key: &str) -> Result<bool> {
        let prefix = format!("{key}/");
        let mut lister = match self.operator.lister(&prefix).await {
            Ok(lister) => lister,
            Err(err) if err.kind() == opendal::ErrorKind::NotFound => return Ok(false),
            Err(err) => return Err(from_opendal(err)),
        };

        // Some services list the prefix itself first.
        while let Some(entry) = lister.try_next().await.map_err(from_opendal)? {
            if entry.path() != prefix {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Creates an OpenDAL operator based on configuration.
    fn create_operator(config: &StorageConfig) -> Result<Operator> {
        let operator = match config {
            #[cfg(feature = "fs")]
            StorageConfig::Fs(fs) => {
                Operator::new(services::Fs::default().root(&fs.root)).map(|op| op.finish())
            }
            StorageConfig::Memory(memory) => {
                let mut builder = services::Memory::default();
                if let Some(ref root) = memory.root {
                    builder = builder.root(root);
                }

                Operator::new(builder).map(|op| op.finish())
            }
        };

        operator.map_err(|err| {
            Error::configuration()
                .with_message(format!("cannot initialize {} backend", config.backend_name()))
                .with_source(err)
        })
    }
}

#[async_trait::async_trait]
impl SecondaryFileSystem for OpendalFileSystem {
    async fn create(&self, path: &FsPath, overwrite: bool) -> Result<OutputStream> {
        self.open_writer(path, overwrite, None).await
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
        tracing::debug!(
            target: TRACING_TARGET,
            path = %path,
            replication,
            block_size,
            properties = ?properties,
            "Ignoring sizing hints and properties unsupported by storage"
        );

        // Non-positive buffer sizes leave chunking to the service.
        let chunk = usize::try_from(buffer_size).ok().filter(|size| *size > 0);
        self.open_writer(path, overwrite, chunk).await
    }

    async fn info(&self, path: &FsPath) -> Result<FileInfo> {
        if path.is_root() {
            return Ok(FileInfo::directory(path.clone()));
        }

        let key = object_key(path);
        let meta = match self.operator.stat(key).await {
            Ok(meta) => meta,
            Err(err) if err.kind() == opendal::ErrorKind::NotFound => {
                if self.has_children(key).await? {
                    return Ok(FileInfo::directory(path.clone()));
                }

                return Err(from_opendal(err));
            }
            Err(err) => return Err(from_opendal(err)),
        };

        if meta.is_dir() {
            return Ok(FileInfo::directory(path.clone()));
        }

        let mut info = FileInfo::file(path.clone(), meta.content_length());

        // Convert chrono DateTime to jiff Timestamp
        if let Some(modified) = meta
            .last_modified()
            .and_then(|dt| jiff::Timestamp::from_second(dt.timestamp()).ok())
        {
            info = info.with_modification_time(modified);
        }

        Ok(info)
    }

    fn backend_name(&self) -> &'static str {
        self.config.backend_name()
    }
}

impl std::fmt::Debug for OpendalFileSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpendalFileSystem")
            .field("backend", &self.config.backend_name())
            .field("root", &self.config.root())
            .finish()
    }
}

/// OpenDAL keys are relative to the operator root.
fn object_key(path: &FsPath) -> &str {
    path.as_str().trim_start_matches(tierfs_core::SEPARATOR)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use futures::io::AsyncWriteExt;
    use tierfs_core::{CreateContext, ErrorKind};

    use super::*;
    use crate::config::MemoryConfig;

    fn memory_fs() -> OpendalFileSystem {
        OpendalFileSystem::new(StorageConfig::Memory(MemoryConfig::default())).unwrap()
    }

    fn path(raw: &str) -> FsPath {
        FsPath::new(raw).unwrap()
    }

    async fn write(mut out: OutputStream, data: &[u8]) {
        out.write_all(data).await.unwrap();
        out.close().await.unwrap();
    }

    #[tokio::test]
    async fn create_then_info_reports_length() {
        let fs = memory_fs();

        let out = fs.create(&path("/a/b.txt"), false).await.unwrap();
        write(out, b"hello").await;

        let info = fs.info(&path("/a/b.txt")).await.unwrap();
        assert!(info.is_file());
        assert_eq!(info.length, 5);
        assert_eq!(info.name(), "b.txt");
    }

    #[tokio::test]
    async fn overwrite_flag_is_honored() {
        let fs = memory_fs();
        write(fs.create(&path("/f"), false).await.unwrap(), b"first").await;

        let err = fs.create(&path("/f"), false).await.err().unwrap();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);

        write(fs.create(&path("/f"), true).await.unwrap(), b"2nd").await;
        assert_eq!(fs.info(&path("/f")).await.unwrap().length, 3);
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let fs = memory_fs();
        let err = fs.info(&path("/nope")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn root_is_a_directory_and_not_creatable() {
        let fs = memory_fs();
        assert!(fs.info(&FsPath::root()).await.unwrap().is_directory());

        let err = fs.create(&FsPath::root(), true).await.err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidPath);
    }

    #[tokio::test]
    async fn extended_create_through_context() {
        let fs = Arc::new(memory_fs());
        let ctx = CreateContext::extended(fs.clone(), 3, 65536, 4096);

        let mut props = Properties::new();
        props.insert("owner".into(), "u".into());

        let out = ctx.create(&path("/x"), true, &props).await.unwrap();
        write(out, &[7u8; 10_000]).await;

        let info = ctx.info(&path("/x")).await.unwrap();
        assert_eq!(info.length, 10_000);
        assert_eq!(ctx.file_system().backend_name(), "memory");
    }

    #[tokio::test]
    async fn implicit_directory_is_reported_as_directory() {
        let fs = memory_fs();
        write(fs.create(&path("/a/b.txt"), false).await.unwrap(), b"x").await;

        let info = fs.info(&path("/a")).await.unwrap();
        assert!(info.is_directory());
        assert_eq!(info.length, 0);

        let err = fs.info(&path("/a/c")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn non_positive_sizes_still_write() {
        let fs = memory_fs();

        let out = fs
            .create_with(&path("/neg"), -1, true, -1, -1, &Properties::new())
            .await
            .unwrap();
        write(out, b"data").await;

        assert_eq!(fs.info(&path("/neg")).await.unwrap().length, 4);
    }

    #[test]
    fn object_keys_are_relative() {
        assert_eq!(object_key(&path("/a/b")), "a/b");
    }
}
