use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Default theme every generated/converted theme extends unless told otherwise.
pub const DEFAULT_EXTENDS: &str = "com.obsproject.Yami";

/// Metadata block of an OVT theme.
///
/// All fields are free-form strings except `dark`; `id` and `version` have
/// format checks applied by [`ThemeMeta::validate`]. `version` has no slot in
/// the OVT meta template, so it is only rendered when explicitly set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThemeMeta {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default = "default_extends")]
    pub extends: String,
    #[serde(default = "default_dark")]
    pub dark: bool,
}

fn default_extends() -> String {
    DEFAULT_EXTENDS.to_string()
}

fn default_dark() -> bool {
    true
}

impl Default for ThemeMeta {
    fn default() -> Self {
        Self {
            id: "com.example.default-theme".to_string(),
            name: "Default Theme".to_string(),
            author: "styla".to_string(),
            version: None,
            extends: default_extends(),
            dark: true,
        }
    }
}

fn id_charset_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z0-9._-]+$").expect("id charset regex should compile"))
}

impl ThemeMeta {
    /// Check field formats, returning one message per problem.
    ///
    /// Empty name, bad id charset and non-semver version are rejected;
    /// everything else is free-form.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.name.trim().is_empty() {
            problems.push("Theme name cannot be empty".to_string());
        }

        if !id_charset_regex().is_match(&self.id) {
            problems.push(format!(
                "Theme ID must contain only lowercase letters, numbers, dots, underscores and hyphens: {}",
                self.id
            ));
        }

        if let Some(version) = &self.version {
            if semver::Version::parse(version).is_err() {
                problems.push(format!("Theme version is not a semantic version: {}", version));
            }
        }

        problems
    }
}
