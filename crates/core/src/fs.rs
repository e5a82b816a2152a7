//! Filesystem checks
//!
//! The service never creates or writes files; these helpers only verify that
//! a pre-existing database file is where configuration says it is.

use std::path::Path;

/// Check if a path exists
pub fn path_exists(path: &str) -> bool {
    Path::new(path).exists()
}

/// Check if a path exists and is a regular file
pub fn is_file(path: &str) -> bool {
    Path::new(path).is_file()
}
