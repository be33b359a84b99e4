//! Secondary file system paths.
//!
//! This module provides the [`FsPath`] type, a normalized absolute path in the
//! namespace shared by the distributed layer and its secondary file system.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Path separator.
pub const SEPARATOR: char = '/';

/// Normalized absolute path.
///
/// Always starts with `/`, never contains empty, `.` or `..` components and
/// never ends with a separator unless it is the root itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FsPath {
    inner: String,
}

impl FsPath {
    /// Parses and normalizes an absolute path.
    ///
    /// # Example
    ///
    /// ```
    /// use tierfs_core::FsPath;
    ///
    /// let path = FsPath::new("//a/./b.txt").unwrap();
    /// assert_eq!(path.as_str(), "/a/b.txt");
    /// ```
    pub fn new(path: &str) -> Result<Self> {
        if !path.starts_with(SEPARATOR) {
            return Err(Error::invalid_path().with_message(format!("path is not absolute: {path:?}")));
        }

        let mut inner = String::with_capacity(path.len());
        for component in path.split(SEPARATOR) {
            match component {
                "" | "." => continue,
                ".." => {
                    return Err(Error::invalid_path()
                        .with_message(format!("parent references are not allowed: {path:?}")));
                }
                name => {
                    inner.push(SEPARATOR);
                    inner.push_str(name);
                }
            }
        }

        if inner.is_empty() {
            inner.push(SEPARATOR);
        }

        Ok(Self { inner })
    }

    /// Returns the root path.
    #[must_use]
    pub fn root() -> Self {
        Self {
            inner: SEPARATOR.to_string(),
        }
    }

    /// Returns the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns `true` for the root path.
    pub fn is_root(&self) -> bool {
        self.inner.len() == 1
    }

    /// Returns the last component, or an empty string for the root.
    pub fn name(&self) -> &str {
        self.inner
            .rsplit(SEPARATOR)
            .next()
            .unwrap_or_default()
    }

    /// Returns the parent path, or `None` for the root.
    pub fn parent(&self) -> Option<FsPath> {
        if self.is_root() {
            return None;
        }

        let idx = self.inner.rfind(SEPARATOR)?;
        let inner = if idx == 0 {
            SEPARATOR.to_string()
        } else {
            self.inner[..idx].to_string()
        };

        Some(Self { inner })
    }

    /// Appends a relative path to this one.
    pub fn join(&self, child: &str) -> Result<FsPath> {
        Self::new(&format!("{}{SEPARATOR}{child}", self.inner))
    }

    /// Iterates over the path components, excluding the root.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.inner.split(SEPARATOR).filter(|c| !c.is_empty())
    }

    /// Number of components below the root.
    pub fn depth(&self) -> usize {
        self.components().count()
    }

    /// Returns `true` if `other` lies strictly below this path.
    pub fn is_ancestor_of(&self, other: &FsPath) -> bool {
        if self.is_root() {
            return !other.is_root();
        }

        other
            .inner
            .strip_prefix(&self.inner)
            .is_some_and(|rest| rest.starts_with(SEPARATOR))
    }
}

impl Default for FsPath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for FsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

impl AsRef<str> for FsPath {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl FromStr for FsPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for FsPath {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl TryFrom<&str> for FsPath {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl From<FsPath> for String {
    fn from(path: FsPath) -> Self {
        path.inner
    }
}
