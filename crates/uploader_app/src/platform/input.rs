use std::fs;
use std::io;
use std::path::Path;

use uploader_core::LocalFile;

/// Turns a dropped path into a file handle; directories and missing paths are refused.
pub(crate) fn local_file(path: &Path) -> io::Result<LocalFile> {
    let metadata = fs::metadata(path)?;
    if !metadata.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        ));
    }
    let original_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(LocalFile::new(path, original_name, metadata.len()))
}
