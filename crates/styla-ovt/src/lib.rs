//! The OVT theme format: rendering, parsing, validation and imports.

pub mod builtin;
pub mod convert;
pub mod import;
pub mod parse;
pub mod render;
pub mod validate;

pub use convert::{ConvertError, convert_json};
pub use render::render;
pub use validate::validate_theme_content;
