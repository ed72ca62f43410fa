use crate::{Error, Result};

/// Path naming the root directory of a store.
pub const ROOT: &str = ".";

/// Check that `path` is a valid store path.
///
/// Store paths are slash-separated and unrooted: no leading or trailing
/// slash, and no empty, `.` or `..` elements. The single path `"."` names
/// the root directory.
pub fn validate_path(path: &str) -> Result<()> {
    if path == ROOT {
        return Ok(());
    }
    if path.is_empty() {
        return Err(Error::InvalidPath(path.to_string()));
    }

    for element in path.split('/') {
        match element {
            "" | "." | ".." => return Err(Error::InvalidPath(path.to_string())),
            _ => {}
        }
    }

    Ok(())
}

/// Last element of a store path.
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Whether `path` names a directory implied by `entry` (a file path below it).
pub(crate) fn is_ancestor_of(path: &str, entry: &str) -> bool {
    if path == ROOT {
        return true;
    }
    entry
        .strip_prefix(path)
        .is_some_and(|rest| rest.starts_with('/'))
}
