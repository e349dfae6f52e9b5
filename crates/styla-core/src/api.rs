use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── API request/response types ──────────────────────────────────────────────

/// GET /health response
#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// One stored theme file, as reported by GET /api/themes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThemeEntry {
    pub name: String,
    pub path: String,
    pub size: u64,
    /// Last modification time, unix seconds.
    pub modified: u64,
}

/// GET /api/themes response
#[derive(Serialize, Deserialize)]
pub struct ThemeListResponse {
    pub themes: Vec<ThemeEntry>,
}

/// Body of mutation success responses.
#[derive(Serialize, Deserialize)]
pub struct OkResponse {
    pub success: bool,
    pub message: String,
}

impl OkResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// POST /api/themes/{name}/duplicate request body
#[derive(Debug, Serialize, Deserialize)]
pub struct DuplicateRequest {
    pub new_name: String,
}

/// POST /api/themes/{name}/meta request body
#[derive(Debug, Serialize, Deserialize)]
pub struct MetaUpdateRequest {
    pub meta: serde_json::Map<String, Value>,
}

/// POST /api/convert request body: a JSON document (as text) with `meta`
/// plus a `vars` or `colors` object.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConvertRequest {
    pub json: String,
}

/// POST /api/convert response
#[derive(Serialize, Deserialize)]
pub struct ConvertResponse {
    pub ovt: String,
}

/// Per-theme outcome of POST /api/generate.
#[derive(Debug, Serialize, Deserialize)]
pub struct GeneratedTheme {
    pub name: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// POST /api/generate response
#[derive(Serialize, Deserialize)]
pub struct GenerateResponse {
    pub results: Vec<GeneratedTheme>,
    pub themes: Vec<ThemeEntry>,
}

/// One file's entry in GET /api/validate.
#[derive(Debug, Serialize, Deserialize)]
pub struct FileValidation {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<ValidationReport>,
}

/// A theme id claimed by more than one stored file.
#[derive(Debug, Serialize, Deserialize)]
pub struct DuplicateThemeId {
    pub id: String,
    pub files: Vec<String>,
}

/// GET /api/validate response
#[derive(Serialize, Deserialize)]
pub struct ValidateResponse {
    pub validations: Vec<FileValidation>,
    pub duplicate_ids: Vec<DuplicateThemeId>,
}

// ── Validation report ───────────────────────────────────────────────────────

/// Structured validation report for one theme file.
///
/// `meta` holds parsed metadata (with `dark` normalized to a bool when
/// well-formed); `errors` are fatal, `warnings` are suggestions.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub meta: serde_json::Map<String, Value>,
    pub vars: Vec<VarEntry>,
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
    pub summary: Summary,
}

/// One declaration parsed out of the `@OBSThemeVars` block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarEntry {
    pub name: String,
    pub value: String,
    /// 1-based line number within the vars block.
    pub line: usize,
    pub looks_like_color: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_valid: Option<bool>,
}

/// A single error or warning, with a machine-readable code and whatever
/// context fields apply to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_line: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub var_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub var: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
}

impl Issue {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            field: None,
            value: None,
            line: None,
            first_line: None,
            name: None,
            var_ref: None,
            var: None,
            raw: None,
            files: None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub vars_count: usize,
}
