pub mod csv;
pub mod json;

use std::{fs, io, path::Path};

/// Writes `contents` to `path` in a single call, creating parent
/// directories first.
pub(crate) fn write_whole(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}
