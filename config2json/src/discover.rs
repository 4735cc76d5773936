use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use xml_config_core::{emit, Console};

/// Extensions (without the dot) of files that are migrated.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["config", "xml"];

/// True when `path` has a supported extension (ASCII case-insensitive).
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(ext))
        })
}

/// Candidate files for `path`: the file itself, or every file directly inside a directory.
///
/// Directory entries are sorted by name; subdirectories are not descended into.
pub fn files_to_migrate(path: &Path, console: Option<&dyn Console>) -> io::Result<Vec<PathBuf>> {
    emit(console, &format!("Checking '{}'...", path.display()));

    if !fs::metadata(path)?.is_dir() {
        emit(console, &format!("Path '{}' is a file", path.display()));
        return Ok(vec![path.to_path_buf()]);
    }

    emit(
        console,
        &format!("Path '{}' is a directory, migrating all config", path.display()),
    );
    let mut files = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}
