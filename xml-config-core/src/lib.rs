//! Flattening of `.config`-style XML into ordered key/value pairs, and
//! reconstruction of those pairs as nested JSON.
//!
//! The pipeline has two stages:
//!
//! 1. [`ElementResolver`] walks the XML tree. Attributes become keys such as
//!    `section:element:attribute`; elements whose children follow an
//!    `add`/`remove`/`clear` convention (see [`ShapeRule`]) are replayed as
//!    mutations of the [`FlatConfig`] instead of being walked.
//! 2. [`reconstruct`] turns the flat keys back into a tree, emitting arrays for
//!    nodes whose children are all numeric segments.
//!
//! ```ignore
//! use xml_config_core::{reconstruct, write_json_file, ConfigSource, ShapeRule};
//!
//! let rules = ShapeRule::defaults();
//! let flat = ConfigSource::file("web.config").load(&rules, None)?;
//! write_json_file(&reconstruct(&flat), "web.json".as_ref())?;
//! ```

pub mod console;
pub mod error;
pub mod flat;
pub mod format;
pub mod parser;
pub mod path;
pub mod reconstruct;
pub mod resolve;
pub mod rule;
pub mod source;
pub mod tree;
pub mod writer;

pub use console::{emit, Console};
pub use error::{LoadError, MigrateError};
pub use flat::{ConfigSection, FlatConfig};
pub use format::format_raw;
pub use parser::{parse, parse_str, ParseError};
pub use path::{PathContext, KEY_DELIMITER};
pub use reconstruct::{reconstruct, reconstruct_section, wrap_namespace};
pub use resolve::ElementResolver;
pub use rule::{Action, ShapeRule};
pub use source::ConfigSource;
pub use tree::{XmlAttribute, XmlNode};
pub use writer::{json_path_for, write_json_file, WriteError};
