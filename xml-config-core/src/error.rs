use std::path::PathBuf;

use thiserror::Error;

use crate::parser::ParseError;
use crate::writer::WriteError;

/// Errors raised while loading a configuration source into a flat store.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A required source file does not exist.
    #[error("could not find configuration file to load: {}", path.display())]
    NotFound { path: PathBuf },
    /// The source file exists but could not be read.
    #[error("failed to read configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The source is not well-formed XML.
    #[error(transparent)]
    MalformedInput(#[from] ParseError),
}

/// Failure converting one source file; later files are unaffected.
#[derive(Debug, Error)]
pub enum MigrateError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Write(#[from] WriteError),
}
