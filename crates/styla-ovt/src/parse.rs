//! Block-level parsing of OVT text.
//!
//! The format is parsed leniently: blocks are located by regex, meta lines
//! accept single quotes, double quotes or bare words, and trailing `,`/`;`
//! are ignored. Strictness lives in [`crate::validate`].

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

fn meta_block_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"@OBSThemeMeta\s*\{([\s\S]*?)\}").expect("meta block regex should compile")
    })
}

fn vars_block_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"@OBSThemeVars\s*\{([\s\S]*?)\}").expect("vars block regex should compile")
    })
}

fn meta_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^([a-zA-Z0-9_-]+)\s*:\s*(?:'([^']*)'|"([^"]*)"|([^,;]+))"#)
            .expect("meta line regex should compile")
    })
}

/// Extract the inner text of the `@OBSThemeMeta` and `@OBSThemeVars` blocks.
pub fn extract_blocks(text: &str) -> (Option<String>, Option<String>) {
    let meta = meta_block_regex()
        .captures(text)
        .map(|c| c[1].to_string());
    let vars = vars_block_regex()
        .captures(text)
        .map(|c| c[1].to_string());
    (meta, vars)
}

/// Parse `key: value` lines out of a meta block, in declaration order.
/// Comment lines and blank lines are skipped.
pub fn parse_meta_block(block: &str) -> Vec<(String, String)> {
    let mut entries = Vec::new();
    for raw_line in block.lines() {
        let line = raw_line.trim().trim_end_matches([',', ';']);
        if line.is_empty() || line.starts_with("//") || line.starts_with("/*") {
            continue;
        }
        if let Some(caps) = meta_line_regex().captures(line) {
            let key = caps[1].to_string();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default();
            entries.push((key, value));
        }
    }
    entries
}

/// Rewrite the `@OBSThemeMeta` block of `text` in place with the given
/// entries, leaving the rest of the file untouched. Values are written
/// JSON-quoted; returns `None` when the file has no meta block.
pub fn rewrite_meta_block(text: &str, meta: &serde_json::Map<String, Value>) -> Option<String> {
    let caps = meta_block_regex().captures(text)?;
    let block = caps.get(0)?;

    let mut replacement = String::from("@OBSThemeMeta {\n");
    for (key, value) in meta {
        let text_value = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        replacement.push_str(&format!(
            "    {}: {},\n",
            key,
            serde_json::to_string(&text_value).unwrap_or_default()
        ));
    }
    replacement.push('}');

    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..block.start()]);
    out.push_str(&replacement);
    out.push_str(&text[block.end()..]);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "@OBSThemeMeta {\n    name: 'Night';\n    id: \"com.example.night\";\n    dark: true;\n}\n\n@OBSThemeVars {\n    --base: #24273a;\n}\n";

    #[test]
    fn test_extracts_both_blocks() {
        let (meta, vars) = extract_blocks(SAMPLE);
        assert!(meta.unwrap().contains("name: 'Night'"));
        assert!(vars.unwrap().contains("--base"));
    }

    #[test]
    fn test_missing_blocks_are_none() {
        let (meta, vars) = extract_blocks("just text");
        assert!(meta.is_none());
        assert!(vars.is_none());
    }

    #[test]
    fn test_meta_quote_styles() {
        let (meta, _) = extract_blocks(SAMPLE);
        let entries = parse_meta_block(&meta.unwrap());
        assert_eq!(
            entries,
            vec![
                ("name".to_string(), "Night".to_string()),
                ("id".to_string(), "com.example.night".to_string()),
                ("dark".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_meta_skips_comments() {
        let entries = parse_meta_block("// a comment\n\nname: 'x';\n/* block */\n");
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_rewrite_meta_preserves_rest() {
        let mut meta = serde_json::Map::new();
        meta.insert("name".to_string(), Value::String("Renamed".to_string()));
        meta.insert("id".to_string(), Value::String("com.example.renamed".to_string()));

        let out = rewrite_meta_block(SAMPLE, &meta).unwrap();
        assert!(out.contains("    name: \"Renamed\",\n"));
        assert!(out.contains("    id: \"com.example.renamed\",\n"));
        // Vars block untouched.
        assert!(out.contains("@OBSThemeVars {\n    --base: #24273a;\n}"));
        // Old meta gone.
        assert!(!out.contains("Night"));
    }

    #[test]
    fn test_rewrite_without_meta_block() {
        assert!(rewrite_meta_block("no blocks here", &serde_json::Map::new()).is_none());
    }
}
