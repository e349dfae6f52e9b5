//! Validation pipeline for OVT theme text.
//!
//! Produces a structured [`ValidationReport`]: parsed meta, parsed vars with
//! type hints, fatal errors, non-fatal warnings and summary counts.

use crate::parse;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;
use styla_core::api::{Issue, Summary, ValidationReport, VarEntry};
use styla_core::color;

// Error and warning codes, in the wire format.
pub const META_BLOCK_MISSING: &str = "META_BLOCK_MISSING";
pub const META_FIELD_MISSING: &str = "META_FIELD_MISSING";
pub const META_ID_INVALID: &str = "META_ID_INVALID";
pub const META_DARK_INVALID: &str = "META_DARK_INVALID";
pub const VARS_BLOCK_MISSING: &str = "VARS_BLOCK_MISSING";
pub const VARS_PARSE_ERROR: &str = "VARS_PARSE_ERROR";
pub const VAR_COLOR_INVALID: &str = "VAR_COLOR_INVALID";
pub const VAR_DUPLICATE: &str = "VAR_DUPLICATE";
pub const VAR_REF_UNDEFINED: &str = "VAR_REF_UNDEFINED";
pub const VAR_REQUIRED_MISSING: &str = "VAR_REQUIRED_MISSING";
pub const DUPLICATE_THEME_ID: &str = "DUPLICATE_THEME_ID";

/// Semantic variables every complete theme is expected to declare.
/// Absence is a warning, not an error.
pub const REQUIRED_VARS: &[&str] = &[
    "base", "mantle", "crust", "surface0", "surface1", "surface2", "overlay0", "overlay1",
    "overlay2", "text", "subtext0", "subtext1",
];

/// Reverse-domain id: at least two dot-separated segments, each starting
/// and ending with `[a-z0-9]`.
fn theme_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[a-z0-9](?:[a-z0-9._-]*[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9._-]*[a-z0-9])?)+$")
            .expect("theme id regex should compile")
    })
}

/// CSS-style declaration: `--name: value;`
fn css_var_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^--([a-zA-Z0-9_-]+)\s*:\s*(.+?);?$").expect("css var regex should compile")
    })
}

/// Bare `name: value` declaration, accepted for hand-written blocks.
fn bare_var_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([a-zA-Z0-9_-]+)\s*:\s*(.+)$").expect("bare var regex should compile")
    })
}

/// Validate one theme file's text, returning the full report.
pub fn validate_theme_content(text: &str) -> ValidationReport {
    let mut report = ValidationReport::default();

    let (meta_block, vars_block) = parse::extract_blocks(text);

    if meta_block.is_none() {
        report
            .errors
            .push(Issue::new(META_BLOCK_MISSING, "Missing @OBSThemeMeta section"));
    }
    if vars_block.is_none() {
        report
            .errors
            .push(Issue::new(VARS_BLOCK_MISSING, "Missing @OBSThemeVars section"));
    }

    for (key, value) in parse::parse_meta_block(meta_block.as_deref().unwrap_or_default()) {
        report.meta.insert(key, Value::String(value));
    }

    check_meta(&mut report);

    let declared = check_vars(&mut report, vars_block.as_deref().unwrap_or_default());
    check_var_refs(&mut report, &declared);
    check_required_vars(&mut report, &declared);

    report.summary = Summary {
        errors: report.errors.len(),
        warnings: report.warnings.len(),
        vars_count: report.vars.len(),
    };
    report
}

fn check_meta(report: &mut ValidationReport) {
    for key in ["id", "name", "dark"] {
        if !report.meta.contains_key(key) {
            let mut issue =
                Issue::new(META_FIELD_MISSING, format!("Missing metadata field: {}", key));
            issue.field = Some(key.to_string());
            report.errors.push(issue);
        }
    }

    if let Some(Value::String(id)) = report.meta.get("id").cloned() {
        if !theme_id_regex().is_match(&id) {
            let mut issue = Issue::new(
                META_ID_INVALID,
                format!("Metadata 'id' does not match expected reverse-domain format: {}", id),
            );
            issue.value = Some(id);
            report.errors.push(issue);
        }
    }

    // Normalize dark to a bool.
    if let Some(Value::String(dark)) = report.meta.get("dark").cloned() {
        match dark.trim().to_ascii_lowercase().as_str() {
            "true" => {
                report.meta.insert("dark".to_string(), Value::Bool(true));
            }
            "false" => {
                report.meta.insert("dark".to_string(), Value::Bool(false));
            }
            _ => {
                let mut issue = Issue::new(
                    META_DARK_INVALID,
                    format!("Metadata 'dark' must be true/false: {}", dark),
                );
                issue.value = Some(dark);
                report.errors.push(issue);
            }
        }
    }
}

/// Parse the vars block, recording entries and duplicate warnings.
/// Returns declared name → first declaration line.
fn check_vars(report: &mut ValidationReport, block: &str) -> HashMap<String, usize> {
    let mut declared: HashMap<String, usize> = HashMap::new();

    for (idx, raw_line) in block.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();
        if line.is_empty()
            || line.starts_with("//")
            || line.starts_with("/*")
            || line.starts_with('#')
        {
            continue;
        }

        let (name, value) = if let Some(caps) = css_var_regex().captures(line) {
            (caps[1].to_string(), caps[2].trim().to_string())
        } else if let Some(caps) = bare_var_regex().captures(line) {
            (
                caps[1].to_string(),
                caps[2].trim().trim_end_matches([',', ';']).to_string(),
            )
        } else {
            let mut issue = Issue::new(
                VARS_PARSE_ERROR,
                format!("Could not parse line in @OBSThemeVars: {}", line),
            );
            issue.line = Some(line_no);
            issue.raw = Some(line.to_string());
            report.errors.push(issue);
            continue;
        };

        let looks_like_color = color::looks_like_color(&value);
        let mut entry = VarEntry {
            name: name.clone(),
            value: value.clone(),
            line: line_no,
            looks_like_color,
            color_valid: None,
        };
        if looks_like_color {
            let valid = color::is_valid_color(&value);
            entry.color_valid = Some(valid);
            if !valid {
                let mut issue = Issue::new(
                    VAR_COLOR_INVALID,
                    format!("Variable {} contains invalid color value: {}", name, value),
                );
                issue.line = Some(line_no);
                issue.value = Some(value.clone());
                report.errors.push(issue);
            }
        }
        report.vars.push(entry);

        if let Some(first_line) = declared.get(&name) {
            let mut issue =
                Issue::new(VAR_DUPLICATE, format!("Duplicate variable declaration: {}", name));
            issue.first_line = Some(*first_line);
            issue.line = Some(line_no);
            issue.name = Some(name.clone());
            report.warnings.push(issue);
        }
        declared.insert(name, line_no);
    }

    declared
}

/// Resolve `var(--x)` references. Undefined refs are errors, demoted to
/// warnings when the theme extends another (the parent may declare them).
fn check_var_refs(report: &mut ValidationReport, declared: &HashMap<String, usize>) {
    let extends = report.meta.contains_key("extends");
    let mut issues = Vec::new();

    for entry in &report.vars {
        for var_ref in color::var_refs(&entry.value) {
            if declared.contains_key(&var_ref) {
                continue;
            }
            let message = if extends {
                format!(
                    "Variable {} references undefined var --{} (may be provided by extends)",
                    entry.name, var_ref
                )
            } else {
                format!("Variable {} references undefined var --{}", entry.name, var_ref)
            };
            let mut issue = Issue::new(VAR_REF_UNDEFINED, message);
            issue.line = Some(entry.line);
            issue.var_ref = Some(var_ref);
            issues.push(issue);
        }
    }

    if extends {
        report.warnings.extend(issues);
    } else {
        report.errors.extend(issues);
    }
}

fn check_required_vars(report: &mut ValidationReport, declared: &HashMap<String, usize>) {
    for required in REQUIRED_VARS {
        if !declared.contains_key(*required) {
            let mut issue = Issue::new(
                VAR_REQUIRED_MISSING,
                format!("Recommended semantic variable missing: {}", required),
            );
            issue.var = Some(required.to_string());
            report.warnings.push(issue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(meta: &str, vars: &str) -> String {
        format!("@OBSThemeMeta {{\n{}\n}}\n\n@OBSThemeVars {{\n{}\n}}\n", meta, vars)
    }

    fn full_vars() -> String {
        REQUIRED_VARS
            .iter()
            .map(|name| format!("    --{}: #24273a;", name))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_clean_theme_has_no_issues() {
        let text = wrap(
            "    id: 'com.example.night';\n    name: 'Night';\n    dark: 'true';",
            &full_vars(),
        );
        let report = validate_theme_content(&text);
        assert_eq!(report.summary.errors, 0);
        assert_eq!(report.summary.warnings, 0);
        assert_eq!(report.summary.vars_count, REQUIRED_VARS.len());
        assert_eq!(report.meta.get("dark"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_missing_blocks() {
        let report = validate_theme_content("not a theme at all");
        let codes: Vec<&str> = report.errors.iter().map(|e| e.code.as_str()).collect();
        assert!(codes.contains(&META_BLOCK_MISSING));
        assert!(codes.contains(&VARS_BLOCK_MISSING));
    }

    #[test]
    fn test_missing_required_meta_fields() {
        let text = wrap("    name: 'No Id';", &full_vars());
        let report = validate_theme_content(&text);
        let missing: Vec<&str> = report
            .errors
            .iter()
            .filter(|e| e.code == META_FIELD_MISSING)
            .filter_map(|e| e.field.as_deref())
            .collect();
        assert_eq!(missing, vec!["id", "dark"]);
    }

    #[test]
    fn test_id_must_be_reverse_domain() {
        let text = wrap(
            "    id: 'not-reverse-domain';\n    name: 'X';\n    dark: 'true';",
            &full_vars(),
        );
        let report = validate_theme_content(&text);
        assert!(report.errors.iter().any(|e| e.code == META_ID_INVALID));
    }

    #[test]
    fn test_dark_must_be_boolean() {
        let text = wrap(
            "    id: 'com.example.x';\n    name: 'X';\n    dark: 'maybe';",
            &full_vars(),
        );
        let report = validate_theme_content(&text);
        assert!(report.errors.iter().any(|e| e.code == META_DARK_INVALID));
    }

    #[test]
    fn test_invalid_color_value() {
        let text = wrap(
            "    id: 'com.example.x';\n    name: 'X';\n    dark: 'true';",
            &format!("{}\n    --accent: #24273;", full_vars()),
        );
        let report = validate_theme_content(&text);
        let issue = report
            .errors
            .iter()
            .find(|e| e.code == VAR_COLOR_INVALID)
            .unwrap();
        assert_eq!(issue.value.as_deref(), Some("#24273"));
    }

    #[test]
    fn test_duplicate_declaration_warns() {
        let text = wrap(
            "    id: 'com.example.x';\n    name: 'X';\n    dark: 'true';",
            &format!("{}\n    --base: #ffffff;", full_vars()),
        );
        let report = validate_theme_content(&text);
        let dup = report
            .warnings
            .iter()
            .find(|w| w.code == VAR_DUPLICATE)
            .unwrap();
        assert_eq!(dup.name.as_deref(), Some("base"));
        assert!(dup.first_line.unwrap() < dup.line.unwrap());
    }

    #[test]
    fn test_undefined_ref_is_error_without_extends() {
        let text = wrap(
            "    id: 'com.example.x';\n    name: 'X';\n    dark: 'true';",
            &format!("{}\n    --accent: var(--missing);", full_vars()),
        );
        let report = validate_theme_content(&text);
        assert!(report.errors.iter().any(|e| e.code == VAR_REF_UNDEFINED));
    }

    #[test]
    fn test_undefined_ref_demoted_with_extends() {
        let text = wrap(
            "    id: 'com.example.x';\n    name: 'X';\n    dark: 'true';\n    extends: 'com.obsproject.Yami';",
            &format!("{}\n    --accent: var(--missing);", full_vars()),
        );
        let report = validate_theme_content(&text);
        assert!(report.errors.iter().all(|e| e.code != VAR_REF_UNDEFINED));
        assert!(report.warnings.iter().any(|w| w.code == VAR_REF_UNDEFINED));
    }

    #[test]
    fn test_recommended_vars_warn_when_missing() {
        let text = wrap(
            "    id: 'com.example.x';\n    name: 'X';\n    dark: 'true';",
            "    --accent: #89b4fa;",
        );
        let report = validate_theme_content(&text);
        let missing = report
            .warnings
            .iter()
            .filter(|w| w.code == VAR_REQUIRED_MISSING)
            .count();
        assert_eq!(missing, REQUIRED_VARS.len());
    }

    #[test]
    fn test_unparseable_vars_line() {
        let text = wrap(
            "    id: 'com.example.x';\n    name: 'X';\n    dark: 'true';",
            &format!("{}\n    !!garbage!!", full_vars()),
        );
        let report = validate_theme_content(&text);
        let issue = report
            .errors
            .iter()
            .find(|e| e.code == VARS_PARSE_ERROR)
            .unwrap();
        assert!(issue.message.contains("Could not parse line"));
    }

    #[test]
    fn test_bare_declarations_accepted() {
        let text = wrap(
            "    id: 'com.example.x';\n    name: 'X';\n    dark: 'true';",
            &format!("{}\n    accent: #89b4fa,", full_vars()),
        );
        let report = validate_theme_content(&text);
        assert_eq!(report.summary.errors, 0);
        let accent = report.vars.iter().find(|v| v.name == "accent").unwrap();
        assert_eq!(accent.value, "#89b4fa");
        assert_eq!(accent.color_valid, Some(true));
    }

    #[test]
    fn test_rendered_builtins_validate_without_errors() {
        for theme in crate::builtin::builtin_themes() {
            let report = validate_theme_content(&theme.render());
            assert_eq!(report.summary.errors, 0, "builtin {} has errors", theme.file_name);
        }
    }

    #[test]
    fn test_catppuccin_builtins_validate_without_warnings() {
        for theme in crate::builtin::builtin_themes() {
            if !theme.file_name.starts_with("catppuccin") {
                continue;
            }
            let report = validate_theme_content(&theme.render());
            assert_eq!(report.summary.warnings, 0, "builtin {} has warnings", theme.file_name);
        }
    }
}
