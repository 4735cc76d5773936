use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while writing a JSON document.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to create, write or flush the output file.
    #[error("failed to write JSON file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to serialize the document.
    #[error("failed to serialize JSON for {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Output path for `input`: the same path with a `.json` extension.
pub fn json_path_for(input: &Path) -> PathBuf {
    input.with_extension("json")
}

/// Serialize `value` as indented JSON into `path`, replacing any existing file.
///
/// The file is closed before returning, on success and on failure.
pub fn write_json_file(value: &Value, path: &Path) -> Result<(), WriteError> {
    let io_err = |source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, value).map_err(|source| WriteError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    out.flush().map_err(io_err)?;
    Ok(())
}
