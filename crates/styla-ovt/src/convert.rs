//! JSON document → OVT conversion behind `POST /api/convert`.

use crate::render::render;
use serde_json::Value;
use styla_core::ThemeMeta;

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("document root must be a JSON object")]
    NotAnObject,
    #[error("document has no \"vars\" or \"colors\" object")]
    MissingVars,
    #[error("invalid meta: {0}")]
    InvalidMeta(String),
}

/// Convert a JSON theme document into OVT text.
///
/// The document is `{ "meta": { … }, "vars": { … } }`; `colors` is accepted
/// as an alias for `vars`. Missing meta fields are defaulted, never
/// rejected; a meta field that is present but malformed (id charset,
/// non-semver version) is an error.
pub fn convert_json(input: &str) -> Result<String, ConvertError> {
    let doc: Value = serde_json::from_str(input)?;
    let root = doc.as_object().ok_or(ConvertError::NotAnObject)?;

    let meta = meta_from_value(root.get("meta"));
    let problems = meta.validate();
    if !problems.is_empty() {
        return Err(ConvertError::InvalidMeta(problems.join("; ")));
    }

    let vars_obj = root
        .get("vars")
        .or_else(|| root.get("colors"))
        .and_then(Value::as_object)
        .ok_or(ConvertError::MissingVars)?;

    let vars: Vec<(String, String)> = vars_obj
        .iter()
        .map(|(name, value)| (name.clone(), value_to_text(value)))
        .collect();

    Ok(render(&meta, &vars))
}

/// Build a [`ThemeMeta`] from an optional `meta` object, defaulting every
/// missing field.
fn meta_from_value(value: Option<&Value>) -> ThemeMeta {
    let mut meta = ThemeMeta::default();
    let Some(obj) = value.and_then(Value::as_object) else {
        return meta;
    };

    if let Some(id) = obj.get("id").and_then(Value::as_str) {
        meta.id = id.to_string();
    }
    if let Some(name) = obj.get("name").and_then(Value::as_str) {
        meta.name = name.to_string();
    }
    if let Some(author) = obj.get("author").and_then(Value::as_str) {
        meta.author = author.to_string();
    }
    if let Some(extends) = obj.get("extends").and_then(Value::as_str) {
        meta.extends = extends.to_string();
    }
    if let Some(version) = obj.get("version").and_then(Value::as_str) {
        meta.version = Some(version.to_string());
    }
    // `dark` arrives as a bool from well-formed documents, but the legacy
    // editors serialized it as a string.
    match obj.get("dark") {
        Some(Value::Bool(dark)) => meta.dark = *dark,
        Some(Value::String(s)) => meta.dark = s.eq_ignore_ascii_case("true"),
        _ => {}
    }

    meta
}

/// Vars values are usually strings; scalars are written as-is.
fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
