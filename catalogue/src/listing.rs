use std::path::Path;

use asapcat_toolkit::Error;
use asapcat_wordbank::PathList;
use walkdir::WalkDir;

/// Recursively lists the regular files under `root`, sorted and deduplicated.
/// Symlinks are followed transparently by `walkdir`; anything that isn't a
/// regular file (directories, sockets, ...) is skipped.
pub fn list_directory(root: impl AsRef<Path>) -> Result<PathList, Error> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(root.as_ref()).follow_links(true) {
        let entry = entry.map_err(|e| {
            Error::invalid_argument(format!("failed to walk {}: {e}", root.as_ref().display()))
        })?;
        if entry.file_type().is_file() {
            paths.push(entry.into_path());
        }
    }
    Ok(PathList::from_paths(paths))
}
