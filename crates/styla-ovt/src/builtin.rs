//! Builtin palettes and theme generation.
//!
//! Replaces the generation scripts of the legacy toolchain: four Catppuccin
//! flavors plus Dracula, each expanded with the semantic variable layer the
//! OBS stylesheet consumes.

use crate::render::render;
use styla_core::ThemeMeta;

/// A theme shipped with the toolkit, ready to render and write.
pub struct BuiltinTheme {
    pub file_name: String,
    pub meta: ThemeMeta,
    pub vars: Vec<(String, String)>,
}

impl BuiltinTheme {
    pub fn render(&self) -> String {
        render(&self.meta, &self.vars)
    }
}

const CATPPUCCIN_LATTE: &[(&str, &str)] = &[
    ("rosewater", "#dc8a78"), ("flamingo", "#dd7878"), ("pink", "#ea76cb"),
    ("mauve", "#8839ef"), ("red", "#d20f39"), ("maroon", "#e64553"),
    ("peach", "#fe640b"), ("yellow", "#df8e1d"), ("green", "#40a02b"),
    ("teal", "#179299"), ("sky", "#04a5e5"), ("sapphire", "#209fb5"),
    ("blue", "#1e66f5"), ("lavender", "#7287fd"), ("text", "#4c4f69"),
    ("subtext1", "#5c5f77"), ("subtext0", "#6c6f85"), ("overlay2", "#7c7f93"),
    ("overlay1", "#8c8fa1"), ("overlay0", "#9ca0b0"), ("surface2", "#acb0be"),
    ("surface1", "#bcc0cc"), ("surface0", "#ccd0da"), ("base", "#eff1f5"),
    ("mantle", "#e6e9ef"), ("crust", "#dce0e8"),
];

const CATPPUCCIN_FRAPPE: &[(&str, &str)] = &[
    ("rosewater", "#f2d5cf"), ("flamingo", "#eebebe"), ("pink", "#f4b8e4"),
    ("mauve", "#ca9ee6"), ("red", "#e78284"), ("maroon", "#ea999c"),
    ("peach", "#ef9f76"), ("yellow", "#e5c890"), ("green", "#a6d189"),
    ("teal", "#81c8be"), ("sky", "#99d1db"), ("sapphire", "#85c1dc"),
    ("blue", "#8caaee"), ("lavender", "#babbf1"), ("text", "#c6d0f5"),
    ("subtext1", "#b5bfe2"), ("subtext0", "#a5adce"), ("overlay2", "#949cbb"),
    ("overlay1", "#838ba7"), ("overlay0", "#737994"), ("surface2", "#626880"),
    ("surface1", "#51576d"), ("surface0", "#414559"), ("base", "#303446"),
    ("mantle", "#292c3c"), ("crust", "#232634"),
];

const CATPPUCCIN_MACCHIATO: &[(&str, &str)] = &[
    ("rosewater", "#f4dbd6"), ("flamingo", "#f0c6c6"), ("pink", "#f5bde6"),
    ("mauve", "#c6a0f6"), ("red", "#ed8796"), ("maroon", "#ee99a0"),
    ("peach", "#f5a97f"), ("yellow", "#eed49f"), ("green", "#a6da95"),
    ("teal", "#8bd5ca"), ("sky", "#91d7e3"), ("sapphire", "#7dc4e4"),
    ("blue", "#8aadf4"), ("lavender", "#b7bdf8"), ("text", "#cad3f5"),
    ("subtext1", "#b8c0e0"), ("subtext0", "#a5adcb"), ("overlay2", "#939ab7"),
    ("overlay1", "#8087a2"), ("overlay0", "#6e738d"), ("surface2", "#5b6078"),
    ("surface1", "#494d64"), ("surface0", "#363a4f"), ("base", "#24273a"),
    ("mantle", "#1e2030"), ("crust", "#181926"),
];

const CATPPUCCIN_MOCHA: &[(&str, &str)] = &[
    ("rosewater", "#f5e0dc"), ("flamingo", "#f2cdcd"), ("pink", "#f5c2e7"),
    ("mauve", "#cba6f7"), ("red", "#f38ba8"), ("maroon", "#eba0ac"),
    ("peach", "#fab387"), ("yellow", "#f9e2af"), ("green", "#a6e3a1"),
    ("teal", "#94e2d5"), ("sky", "#89dceb"), ("sapphire", "#74c7ec"),
    ("blue", "#89b4fa"), ("lavender", "#b4befe"), ("text", "#cdd6f4"),
    ("subtext1", "#bac2de"), ("subtext0", "#a6adc8"), ("overlay2", "#9399b2"),
    ("overlay1", "#7f849c"), ("overlay0", "#6c7086"), ("surface2", "#585b70"),
    ("surface1", "#45475a"), ("surface0", "#313244"), ("base", "#1e1e2e"),
    ("mantle", "#181825"), ("crust", "#11111b"),
];

/// Semantic layer shared by every Catppuccin flavor: everything routes
/// through the palette via `var(--x)` so flavors differ only in hex values.
const CATPPUCCIN_SEMANTIC: &[(&str, &str)] = &[
    ("bg_window", "var(--base)"),
    ("bg_base", "var(--mantle)"),
    ("bg_surface", "var(--surface0)"),
    ("bg_surface_raised", "var(--surface1)"),
    ("bg_surface_hover", "var(--surface2)"),
    ("bg_button", "var(--surface0)"),
    ("bg_button_hover", "var(--surface1)"),
    ("bg_button_pressed", "var(--surface2)"),
    ("bg_button_checked", "var(--mauve)"),
    ("bg_button_disabled", "var(--overlay0)"),
    ("text_primary", "var(--text)"),
    ("text_secondary", "var(--subtext1)"),
    ("text_tertiary", "var(--subtext0)"),
    ("text_disabled", "var(--overlay1)"),
    ("text_link", "var(--blue)"),
    ("text_link_hover", "var(--sky)"),
    ("accent_primary", "var(--mauve)"),
    ("accent_secondary", "var(--lavender)"),
    ("accent_success", "var(--green)"),
    ("accent_warning", "var(--yellow)"),
    ("accent_error", "var(--red)"),
    ("accent_info", "var(--blue)"),
    ("border_base", "var(--overlay0)"),
    ("border_focus", "var(--mauve)"),
    ("border_hover", "var(--overlay1)"),
    ("border_pressed", "var(--overlay2)"),
];

const DRACULA: &[(&str, &str)] = &[
    ("background", "#282a36"),
    ("current_line", "#44475a"),
    ("foreground", "#f8f8f2"),
    ("comment", "#6272a4"),
    ("cyan", "#8be9fd"),
    ("green", "#50fa7b"),
    ("orange", "#ffb86c"),
    ("pink", "#ff79c6"),
    ("purple", "#bd93f9"),
    ("red", "#ff5555"),
    ("yellow", "#f1fa8c"),
];

/// Semantic layer over the eleven-token editor palette. The Dracula
/// builtin and imported TextMate themes share it.
const PALETTE_SEMANTIC: &[(&str, &str)] = &[
    ("bg_window", "var(--background)"),
    ("bg_base", "var(--current_line)"),
    ("bg_surface", "#3a3c4e"),
    ("bg_surface_raised", "#4e5066"),
    ("bg_surface_hover", "#5a5c72"),
    ("bg_button", "var(--current_line)"),
    ("bg_button_hover", "#5a5c72"),
    ("bg_button_pressed", "#6b6d80"),
    ("bg_button_checked", "var(--purple)"),
    ("bg_button_disabled", "var(--comment)"),
    ("text_primary", "var(--foreground)"),
    ("text_secondary", "#e0e0e0"),
    ("text_tertiary", "#c0c0c0"),
    ("text_disabled", "var(--comment)"),
    ("text_link", "var(--cyan)"),
    ("text_link_hover", "#a0ffff"),
    ("accent_primary", "var(--purple)"),
    ("accent_secondary", "var(--pink)"),
    ("accent_success", "var(--green)"),
    ("accent_warning", "var(--orange)"),
    ("accent_error", "var(--red)"),
    ("accent_info", "var(--cyan)"),
    ("border_base", "var(--comment)"),
    ("border_focus", "var(--purple)"),
    ("border_hover", "#7a88b8"),
    ("border_pressed", "#8a98c8"),
];

/// Non-color layout variables, identical across builtins.
const SIZING_AND_MOTION: &[(&str, &str)] = &[
    ("border_radius", "8px"),
    ("border_radius_small", "4px"),
    ("border_radius_large", "12px"),
    ("spacing_xs", "4px"),
    ("spacing_sm", "8px"),
    ("spacing_md", "12px"),
    ("spacing_lg", "16px"),
    ("spacing_xl", "24px"),
    ("transition_fast", "150ms"),
    ("transition_normal", "250ms"),
    ("transition_slow", "350ms"),
];

fn pairs(sections: &[&[(&str, &str)]]) -> Vec<(String, String)> {
    sections
        .iter()
        .flat_map(|section| section.iter())
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

/// Expand an eleven-token editor palette with the shared semantic and
/// sizing layers, yielding a complete vars block.
pub fn expand_palette(palette: &[(String, String)]) -> Vec<(String, String)> {
    let mut vars = palette.to_vec();
    vars.extend(pairs(&[PALETTE_SEMANTIC, SIZING_AND_MOTION]));
    vars
}

fn catppuccin(flavor: &str, palette: &[(&str, &str)], dark: bool) -> BuiltinTheme {
    let mut title = flavor.to_string();
    if let Some(first) = title.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    BuiltinTheme {
        file_name: format!("catppuccin_{}.ovt", flavor),
        meta: ThemeMeta {
            id: format!("com.catppuccin.enhanced.{}", flavor),
            name: format!("Catppuccin Enhanced {}", title),
            author: "styla".to_string(),
            version: None,
            extends: styla_core::meta::DEFAULT_EXTENDS.to_string(),
            dark,
        },
        vars: pairs(&[palette, CATPPUCCIN_SEMANTIC, SIZING_AND_MOTION]),
    }
}

/// Every theme the toolkit can generate, in output order.
pub fn builtin_themes() -> Vec<BuiltinTheme> {
    vec![
        catppuccin("latte", CATPPUCCIN_LATTE, false),
        catppuccin("frappe", CATPPUCCIN_FRAPPE, true),
        catppuccin("macchiato", CATPPUCCIN_MACCHIATO, true),
        catppuccin("mocha", CATPPUCCIN_MOCHA, true),
        BuiltinTheme {
            file_name: "dracula.ovt".to_string(),
            meta: ThemeMeta {
                id: "com.dracula.enhanced".to_string(),
                name: "Dracula Enhanced".to_string(),
                author: "styla".to_string(),
                version: None,
                extends: styla_core::meta::DEFAULT_EXTENDS.to_string(),
                dark: true,
            },
            vars: expand_palette(&pairs(&[DRACULA])),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_inventory() {
        let themes = builtin_themes();
        assert_eq!(themes.len(), 5);
        let names: Vec<&str> = themes.iter().map(|t| t.file_name.as_str()).collect();
        assert!(names.contains(&"catppuccin_mocha.ovt"));
        assert!(names.contains(&"dracula.ovt"));
    }

    #[test]
    fn test_latte_is_the_only_light_flavor() {
        let themes = builtin_themes();
        for theme in &themes {
            let expect_dark = !theme.file_name.contains("latte");
            assert_eq!(theme.meta.dark, expect_dark, "{}", theme.file_name);
        }
    }

    #[test]
    fn test_catppuccin_semantic_layer_refs_palette() {
        let mocha = builtin_themes()
            .into_iter()
            .find(|t| t.file_name == "catppuccin_mocha.ovt")
            .unwrap();
        let declared: Vec<&str> = mocha.vars.iter().map(|(n, _)| n.as_str()).collect();
        for (_, value) in &mocha.vars {
            for referenced in styla_core::color::var_refs(value) {
                assert!(declared.contains(&referenced.as_str()), "undeclared --{}", referenced);
            }
        }
    }

    #[test]
    fn test_expanded_palette_resolves_refs() {
        // The default TextMate palette must satisfy every semantic ref.
        let vars = expand_palette(&crate::import::import_textmate(&serde_json::Map::new()));
        let declared: Vec<&str> = vars.iter().map(|(n, _)| n.as_str()).collect();
        for (_, value) in &vars {
            for referenced in styla_core::color::var_refs(value) {
                assert!(declared.contains(&referenced.as_str()), "undeclared --{}", referenced);
            }
        }
    }

    #[test]
    fn test_builtin_meta_is_valid() {
        for theme in builtin_themes() {
            assert!(theme.meta.validate().is_empty(), "{}", theme.file_name);
        }
    }
}
