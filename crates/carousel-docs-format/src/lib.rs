//! Source formatters for generated sandbox files.
//!
//! Every generated sandbox file passes through one of four formatters before it
//! is written into a file map: markup, stylesheet, script and typed script.
//! All of them are deterministic and idempotent, so formatting already
//! formatted text leaves it unchanged.

pub mod formatter;
pub mod html;
pub mod script;
pub mod style;

pub use formatter::{Dialect, FormatError, Formatter, FormatterConfig, TrailingComma};
