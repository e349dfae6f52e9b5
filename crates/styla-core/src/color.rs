//! Color-string classification shared by the validator and importers.

use regex::Regex;
use std::sync::OnceLock;

fn hex_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^#(?:[0-9A-Fa-f]{3}|[0-9A-Fa-f]{6}|[0-9A-Fa-f]{8})$")
            .expect("hex color regex should compile")
    })
}

fn rgb_func_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^rgba?\(.*\)$").expect("rgb color regex should compile"))
}

fn var_ref_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"var\(--([a-zA-Z0-9_-]+)\)").expect("var reference regex should compile")
    })
}

/// `#rgb`, `#rrggbb` or `#rrggbbaa`.
pub fn is_hex(value: &str) -> bool {
    hex_regex().is_match(value)
}

/// `rgb(...)` / `rgba(...)`, case-insensitive. The argument list is not checked.
pub fn is_rgb_func(value: &str) -> bool {
    rgb_func_regex().is_match(value)
}

/// Heuristic used before strict color validation: values starting with `#`,
/// `rgb`/`rgba` or `hsl` are treated as colors.
pub fn looks_like_color(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    value.starts_with('#') || lower.starts_with("rgb") || lower.starts_with("hsl")
}

/// A color-looking value that actually parses as one.
pub fn is_valid_color(value: &str) -> bool {
    is_hex(value) || is_rgb_func(value)
}

/// Names referenced through `var(--name)` within a value, in order.
pub fn var_refs(value: &str) -> Vec<String> {
    var_ref_regex()
        .captures_iter(value)
        .map(|c| c[1].to_string())
        .collect()
}
