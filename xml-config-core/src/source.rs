use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::console::Console;
use crate::error::LoadError;
use crate::flat::FlatConfig;
use crate::parser::parse;
use crate::resolve::ElementResolver;
use crate::rule::ShapeRule;

/// Where configuration XML comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// A file on disk. A missing optional file loads as empty.
    File { path: PathBuf, optional: bool },
    /// XML supplied directly.
    Inline(String),
}

impl ConfigSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File {
            path: path.into(),
            optional: false,
        }
    }

    pub fn optional_file(path: impl Into<PathBuf>) -> Self {
        Self::File {
            path: path.into(),
            optional: true,
        }
    }

    /// Parse the source and flatten it with `rules`.
    pub fn load(
        &self,
        rules: &[ShapeRule],
        console: Option<&dyn Console>,
    ) -> Result<FlatConfig, LoadError> {
        let root = match self {
            Self::Inline(xml) => parse(xml.as_bytes())?,
            Self::File { path, optional } => match fs::read(path) {
                Ok(bytes) => parse(&bytes)?,
                Err(err) if err.kind() == ErrorKind::NotFound => {
                    if *optional {
                        tracing::debug!(path = %path.display(), "optional source missing");
                        return Ok(FlatConfig::new());
                    }
                    return Err(LoadError::NotFound { path: path.clone() });
                }
                Err(source) => {
                    return Err(LoadError::Read {
                        path: path.clone(),
                        source,
                    })
                }
            },
        };

        Ok(ElementResolver::new(rules)
            .with_console(console)
            .resolve(&root))
    }
}
