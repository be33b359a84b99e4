//! Conversion of OpenDAL errors.

use opendal::ErrorKind as DalKind;
use tierfs_core::{Error, ErrorKind};

/// Maps an OpenDAL error onto the shared error type, keeping it as source.
pub(crate) fn from_opendal(err: opendal::Error) -> Error {
    let kind = match err.kind() {
        DalKind::NotFound => ErrorKind::NotFound,
        DalKind::PermissionDenied => ErrorKind::PermissionDenied,
        DalKind::AlreadyExists => ErrorKind::AlreadyExists,
        DalKind::Unsupported => ErrorKind::Unsupported,
        DalKind::ConfigInvalid => ErrorKind::Configuration,
        _ => ErrorKind::Backend,
    };

    Error::new(kind).with_message(err.to_string()).with_source(err)
}
