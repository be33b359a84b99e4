#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod context;
mod error;
mod file;
mod path;
mod secondary;

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub mod mock;

#[doc(hidden)]
pub mod prelude;

pub use config::{CreateConfig, DEFAULT_BLOCK_SIZE, DEFAULT_BUFFER_SIZE, DEFAULT_REPLICATION};
pub use context::{CreateContext, CreateMode, TRACING_TARGET};
pub use error::{BoxedError, Error, ErrorKind, Result};
pub use file::{FileInfo, FileKind, PROP_GROUP_NAME, PROP_PERMISSION, PROP_USER_NAME, Properties};
pub use path::{FsPath, SEPARATOR};
pub use secondary::{OutputStream, SecondaryFileSystem, SharedFileSystem};
