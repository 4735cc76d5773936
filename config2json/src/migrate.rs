//! Sequential per-file migration.
//!
//! Each file gets its own flat store; a failure is recorded against that file
//! and the next file is processed regardless.

use std::path::{Path, PathBuf};

use xml_config_core::{
    emit, format_raw, json_path_for, reconstruct, wrap_namespace, write_json_file,
    ConfigSource, Console, MigrateError, ShapeRule,
};

use crate::discover::is_supported;

/// Settings shared by every file of a run.
#[derive(Debug, Clone)]
pub struct MigrateOptions {
    /// Namespace wrapping the generated document, if non-empty.
    pub prefix: Option<String>,
    /// Print flattened `key = value` pairs before reconstruction.
    pub raw: bool,
    /// Shape rules in priority order.
    pub rules: Vec<ShapeRule>,
}

impl Default for MigrateOptions {
    fn default() -> Self {
        Self {
            prefix: None,
            raw: false,
            rules: ShapeRule::defaults(),
        }
    }
}

/// Result of migrating one input file.
#[derive(Debug)]
pub struct MigrationOutcome {
    pub input: PathBuf,
    /// Output path on success.
    pub result: Result<PathBuf, MigrateError>,
}

/// Outcomes of a run, in processing order.
#[derive(Debug, Default)]
pub struct MigrationReport {
    pub outcomes: Vec<MigrationOutcome>,
    /// Candidates ignored because of their extension.
    pub skipped: usize,
}

impl MigrationReport {
    pub fn converted(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }

    pub fn summary_line(&self) -> String {
        format!(
            "migration_summary converted={} failed={} skipped={}",
            self.converted(),
            self.failed(),
            self.skipped
        )
    }
}

pub struct FileMigrator<'a> {
    options: &'a MigrateOptions,
    console: Option<&'a dyn Console>,
}

impl<'a> FileMigrator<'a> {
    pub fn new(options: &'a MigrateOptions, console: Option<&'a dyn Console>) -> Self {
        Self { options, console }
    }

    /// Migrate every supported file in `files`, one after another.
    pub fn migrate_files(&self, files: &[PathBuf]) -> MigrationReport {
        let mut report = MigrationReport::default();
        for file in files {
            if !is_supported(file) {
                tracing::debug!(file = %file.display(), "skipping unsupported extension");
                report.skipped += 1;
                continue;
            }

            let name = display_name(file);
            self.say(&format!("Migrating {name}..."));
            let result = self.migrate_file(file);
            match &result {
                Ok(output) => self.say(&format!(
                    "Migration of {name} to {} complete",
                    display_name(output)
                )),
                Err(err) => self.say(&format!("An error occurred migrating {name}: {err}")),
            }
            report.outcomes.push(MigrationOutcome {
                input: file.clone(),
                result,
            });
        }
        report
    }

    /// Convert one file and write the JSON next to it.
    pub fn migrate_file(&self, file: &Path) -> Result<PathBuf, MigrateError> {
        let flat = ConfigSource::file(file).load(&self.options.rules, self.console)?;
        tracing::debug!(file = %file.display(), keys = flat.len(), "flattened");

        if self.options.raw && !flat.is_empty() {
            self.say(&format_raw(&flat));
        }

        let document = wrap_namespace(reconstruct(&flat), self.options.prefix.as_deref());
        let output = json_path_for(file);
        write_json_file(&document, &output)?;
        Ok(output)
    }

    fn say(&self, line: &str) {
        emit(self.console, line);
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
