//! Storage configuration types.

use serde::{Deserialize, Serialize};

/// Storage backend configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum StorageConfig {
    /// Local file system rooted at a directory.
    #[cfg(feature = "fs")]
    Fs(FsConfig),
    /// Process-local in-memory storage.
    Memory(MemoryConfig),
}

impl StorageConfig {
    /// Returns the backend name as a static string.
    pub fn backend_name(&self) -> &'static str {
        match self {
            #[cfg(feature = "fs")]
            Self::Fs(_) => "fs",
            Self::Memory(_) => "memory",
        }
    }

    /// Returns the configured root, if any.
    pub fn root(&self) -> Option<&str> {
        match self {
            #[cfg(feature = "fs")]
            Self::Fs(config) => Some(&config.root),
            Self::Memory(config) => config.root.as_deref(),
        }
    }
}

/// Local file system configuration.
#[cfg(feature = "fs")]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FsConfig {
    /// Directory all paths are resolved against.
    pub root: String,
}

#[cfg(feature = "fs")]
impl FsConfig {
    /// Creates a new local file system configuration.
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }
}

/// In-memory storage configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Optional key prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
}

impl MemoryConfig {
    /// Sets the key prefix.
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_by_type() {
        let config: StorageConfig = serde_json::from_str(r#"{"type":"memory"}"#).unwrap();
        assert_eq!(config, StorageConfig::Memory(MemoryConfig::default()));
        assert_eq!(config.backend_name(), "memory");
        assert_eq!(config.root(), None);
    }

    #[cfg(feature = "fs")]
    #[test]
    fn fs_requires_root() {
        let config: StorageConfig =
            serde_json::from_str(r#"{"type":"fs","root":"/var/lib/tierfs"}"#).unwrap();
        assert_eq!(config.root(), Some("/var/lib/tierfs"));
        assert!(serde_json::from_str::<StorageConfig>(r#"{"type":"fs"}"#).is_err());
    }
}
