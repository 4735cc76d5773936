//! Migration of `web.config`/`app.config` style XML files to `appsettings`-style JSON.
//!
//! The conversion itself lives in `xml-config-core`; this crate adds what a
//! command-line run needs around it:
//!
//! - [`discover`] — expand a file or directory argument into candidate files
//! - [`migrate`] — sequential per-file conversion with per-file outcomes
//! - [`rules_file`] — shape rules from TOML, with embedded defaults
//! - [`terminal`] — stdout console with colored status lines

pub mod discover;
pub mod migrate;
pub mod rules_file;
pub mod terminal;
