//! Create request configuration.

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::{CreateContext, CreateMode, Error, Result, SharedFileSystem};

/// Default replication factor.
pub const DEFAULT_REPLICATION: i16 = 1;

/// Default block size in bytes (64 KiB).
pub const DEFAULT_BLOCK_SIZE: i64 = 1 << 16;

/// Default buffer size in bytes (64 KiB).
pub const DEFAULT_BUFFER_SIZE: i32 = 1 << 16;

/// Parameters used to build a [`CreateContext`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct CreateConfig {
    /// Forward only path and overwrite flag to the secondary file system.
    #[cfg_attr(
        feature = "config",
        arg(long = "simple-create", env = "TIERFS_SIMPLE_CREATE", default_value_t = false)
    )]
    #[serde(default)]
    pub simple_create: bool,

    /// Replication factor for extended creates.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "create-replication",
            env = "TIERFS_CREATE_REPLICATION",
            default_value_t = DEFAULT_REPLICATION
        )
    )]
    #[serde(default = "default_replication")]
    pub replication: i16,

    /// Block size in bytes for extended creates.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "create-block-size",
            env = "TIERFS_CREATE_BLOCK_SIZE",
            default_value_t = DEFAULT_BLOCK_SIZE
        )
    )]
    #[serde(default = "default_block_size")]
    pub block_size: i64,

    /// Buffer size in bytes for extended creates.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "create-buffer-size",
            env = "TIERFS_CREATE_BUFFER_SIZE",
            default_value_t = DEFAULT_BUFFER_SIZE
        )
    )]
    #[serde(default = "default_buffer_size")]
    pub buffer_size: i32,
}

fn default_replication() -> i16 {
    DEFAULT_REPLICATION
}

fn default_block_size() -> i64 {
    DEFAULT_BLOCK_SIZE
}

fn default_buffer_size() -> i32 {
    DEFAULT_BUFFER_SIZE
}

impl Default for CreateConfig {
    fn default() -> Self {
        Self {
            simple_create: false,
            replication: default_replication(),
            block_size: default_block_size(),
            buffer_size: default_buffer_size(),
        }
    }
}

impl CreateConfig {
    /// Creates a configuration issuing simple creates.
    pub fn simple() -> Self {
        Self {
            simple_create: true,
            ..Default::default()
        }
    }

    /// Returns the create mode described by this configuration.
    pub fn mode(&self) -> CreateMode {
        CreateMode::from_flag(
            self.simple_create,
            self.replication,
            self.block_size,
            self.buffer_size,
        )
    }

    /// Validates sizing values of extended creates.
    ///
    /// Building a context does not call this; configuration loaders do.
    pub fn validate(&self) -> Result<()> {
        if self.simple_create {
            return Ok(());
        }

        if self.replication <= 0 {
            return Err(Error::configuration().with_message("replication must be at least 1"));
        }

        if self.block_size <= 0 {
            return Err(Error::configuration().with_message("block size must be greater than 0"));
        }

        if self.buffer_size <= 0 {
            return Err(Error::configuration().with_message("buffer size must be greater than 0"));
        }

        Ok(())
    }

    /// Builds a create context over `fs`.
    pub fn into_context(self, fs: SharedFileSystem) -> CreateContext {
        CreateContext::new(fs, self.mode())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::ErrorKind;
    use crate::mock::MockFileSystem;

    #[test]
    fn validate_default_config() {
        let config = CreateConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.mode(),
            CreateMode::Extended {
                replication: 1,
                block_size: 65536,
                buffer_size: 65536,
            }
        );
    }

    #[test]
    fn reject_zero_sizes_in_extended_mode() {
        let mut config = CreateConfig::default();

        config.block_size = 0;
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);

        config.block_size = 4096;
        config.buffer_size = 0;
        assert!(config.validate().is_err());

        config.buffer_size = 4096;
        config.replication = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_negative_sizes_in_extended_mode() {
        let mut config = CreateConfig::default();

        config.replication = -1;
        assert!(config.validate().is_err());

        config.replication = 2;
        config.block_size = -4096;
        assert!(config.validate().is_err());

        config.block_size = 4096;
        config.buffer_size = i32::MIN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn simple_mode_skips_sizing_checks() {
        let config = CreateConfig {
            simple_create: true,
            replication: 0,
            block_size: 0,
            buffer_size: 0,
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.mode(), CreateMode::Simple);
    }

    #[test]
    fn deserialize_fills_defaults() {
        let config: CreateConfig = serde_json::from_str(r#"{"replication": 3}"#).unwrap();
        assert!(!config.simple_create);
        assert_eq!(config.replication, 3);
        assert_eq!(config.block_size, DEFAULT_BLOCK_SIZE);
        assert_eq!(config.buffer_size, DEFAULT_BUFFER_SIZE);
    }

    #[test]
    fn into_context_keeps_values() {
        let config = CreateConfig {
            simple_create: false,
            replication: 3,
            block_size: 65536,
            buffer_size: 4096,
        };
        let ctx = config.into_context(Arc::new(MockFileSystem::new()));

        assert_eq!(ctx.replication(), Some(3));
        assert_eq!(ctx.block_size(), Some(65536));
        assert_eq!(ctx.buffer_size(), Some(4096));

        let ctx = CreateConfig::simple().into_context(Arc::new(MockFileSystem::new()));
        assert!(ctx.is_simple());
    }
}
