pub mod api;
pub mod color;
pub mod meta;

pub use meta::ThemeMeta;
