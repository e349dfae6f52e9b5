//! Filename and theme-name validation for the store.
//!
//! Stored themes live flat in one directory; anything that could escape it
//! (separators, `..`) is rejected before a path is ever built.

/// File extensions the store manages.
pub const ALLOWED_EXTENSIONS: &[&str] = &["ovt", "obt", "json"];

/// Windows device names that must not be used as file stems.
const RESERVED_NAMES: &[&str] = &[
    "con", "prn", "aux", "nul", "com1", "com2", "com3", "com4", "com5", "com6", "com7", "com8",
    "com9", "lpt1", "lpt2", "lpt3", "lpt4", "lpt5", "lpt6", "lpt7", "lpt8", "lpt9",
];

/// Does `name` end in one of the allowed extensions (case-insensitive)?
pub fn has_allowed_extension(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    ALLOWED_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{}", ext)))
}

/// Validate a stored-file name: length, no traversal, allowed extension.
pub fn validate_file_name(name: &str) -> Result<(), String> {
    if name.is_empty() || name.len() > 255 {
        return Err("Invalid filename length".to_string());
    }
    if name.contains("..") || name.contains('/') || name.contains('\\') {
        return Err("Path traversal not allowed".to_string());
    }
    if !has_allowed_extension(name) {
        return Err("File type not allowed".to_string());
    }
    Ok(())
}

/// Validate a user-supplied theme name (duplicate target), before an
/// extension is attached.
pub fn validate_theme_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if name.len() > 100 {
        return Err("Name too long (max 100 characters)".to_string());
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || matches!(c, '_' | '-' | '.'))
    {
        return Err("Name contains invalid characters".to_string());
    }
    let stem = name.split('.').next().unwrap_or_default().to_ascii_lowercase();
    if RESERVED_NAMES.contains(&stem.as_str()) {
        return Err("Name cannot be a reserved system name".to_string());
    }
    Ok(())
}
