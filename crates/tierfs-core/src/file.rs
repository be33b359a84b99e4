//! File metadata returned by secondary file systems.

use std::collections::BTreeMap;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::FsPath;

/// File properties: unique string keys mapped to string values.
pub type Properties = BTreeMap<String, String>;

/// Property holding the owning user name.
pub const PROP_USER_NAME: &str = "usrName";

/// Property holding the owning group name.
pub const PROP_GROUP_NAME: &str = "grpName";

/// Property holding the permission string.
pub const PROP_PERMISSION: &str = "permission";

/// Kind of file system entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
}

/// Metadata of a file or directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Path of the entry.
    pub path: FsPath,
    /// Entry kind.
    pub kind: FileKind,
    /// Length in bytes, zero for directories.
    pub length: u64,
    /// Block size in bytes, zero when the backend has no such notion.
    #[serde(default)]
    pub block_size: u64,
    /// Last modification time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modification_time: Option<Timestamp>,
    /// Last access time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_time: Option<Timestamp>,
    /// Entry properties.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: Properties,
}

impl FileInfo {
    /// Creates metadata for a regular file.
    #[must_use]
    pub fn file(path: FsPath, length: u64) -> Self {
        Self {
            path,
            kind: FileKind::File,
            length,
            block_size: 0,
            modification_time: None,
            access_time: None,
            properties: Properties::new(),
        }
    }

    /// Creates metadata for a directory.
    #[must_use]
    pub fn directory(path: FsPath) -> Self {
        Self {
            kind: FileKind::Directory,
            ..Self::file(path, 0)
        }
    }

    /// Sets the block size.
    pub fn with_block_size(mut self, block_size: u64) -> Self {
        self.block_size = block_size;
        self
    }

    /// Sets the modification time.
    pub fn with_modification_time(mut self, time: Timestamp) -> Self {
        self.modification_time = Some(time);
        self
    }

    /// Sets the access time.
    pub fn with_access_time(mut self, time: Timestamp) -> Self {
        self.access_time = Some(time);
        self
    }

    /// Replaces all properties.
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    /// Sets a single property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Last path component.
    pub fn name(&self) -> &str {
        self.path.name()
    }

    /// Returns `true` for regular files.
    pub fn is_file(&self) -> bool {
        self.kind == FileKind::File
    }

    /// Returns `true` for directories.
    pub fn is_directory(&self) -> bool {
        self.kind == FileKind::Directory
    }

    /// Looks up a property by key.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Owning user, if recorded.
    pub fn user_name(&self) -> Option<&str> {
        self.property(PROP_USER_NAME)
    }

    /// Owning group, if recorded.
    pub fn group_name(&self) -> Option<&str> {
        self.property(PROP_GROUP_NAME)
    }

    /// Permission string, if recorded.
    pub fn permission(&self) -> Option<&str> {
        self.property(PROP_PERMISSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_has_no_length() {
        let info = FileInfo::directory(FsPath::new("/logs").unwrap());
        assert!(info.is_directory());
        assert!(!info.is_file());
        assert_eq!(info.length, 0);
        assert_eq!(info.name(), "logs");
    }

    #[test]
    fn well_known_properties() {
        let info = FileInfo::file(FsPath::new("/a/b.txt").unwrap(), 12)
            .with_property(PROP_USER_NAME, "alice")
            .with_property(PROP_PERMISSION, "0644");

        assert_eq!(info.user_name(), Some("alice"));
        assert_eq!(info.group_name(), None);
        assert_eq!(info.permission(), Some("0644"));
    }

    #[test]
    fn serializes_without_empty_optionals() {
        let info = FileInfo::file(FsPath::new("/x").unwrap(), 3);
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "path": "/x", "kind": "file", "length": 3, "block_size": 0 })
        );
    }
}
