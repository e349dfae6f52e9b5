use styla_core::ThemeMeta;

/// Render a theme into the OVT text format.
///
/// Deterministic and total: the meta block carries the five fixed keys
/// (plus `version` when set), then one `--name: value;` line per var in
/// input order. Line order of vars is cosmetic only.
pub fn render(meta: &ThemeMeta, vars: &[(String, String)]) -> String {
    let mut out = String::new();

    out.push_str("@OBSThemeMeta {\n");
    out.push_str(&format!("    name: '{}';\n", meta.name));
    out.push_str(&format!("    id: '{}';\n", meta.id));
    out.push_str(&format!("    extends: '{}';\n", meta.extends));
    out.push_str(&format!("    author: '{}';\n", meta.author));
    out.push_str(&format!("    dark: '{}';\n", meta.dark));
    if let Some(version) = &meta.version {
        out.push_str(&format!("    version: '{}';\n", version));
    }
    out.push_str("}\n\n");

    out.push_str("@OBSThemeVars {\n");
    for (name, value) in vars {
        out.push_str(&format!("    --{}: {};\n", name, value));
    }
    out.push_str("}\n\n/* Add custom QSS rules here */\n");

    out
}
