//! Text renderings of flattened configuration.

pub mod raw;

pub use raw::format_raw;
