//! Editor-theme imports: static remaps from well-known editor color keys to
//! OBS palette token names.

use serde_json::{Map, Value};

/// VSCode workbench color key → OBS palette token. Iterated in order;
/// when two source keys map to the same token, the later key wins.
pub const VSCODE_TO_OBS: &[(&str, &str)] = &[
    // Core UI
    ("editor.background", "ui_background"),
    ("editor.foreground", "ui_text"),
    ("activityBar.background", "dock_background"),
    ("sideBar.background", "dock_background"),
    ("sideBar.foreground", "ui_text"),
    ("sideBar.border", "ui_border"),
    ("titleBar.activeBackground", "header_background"),
    ("titleBar.activeForeground", "ui_text"),
    ("titleBar.inactiveBackground", "header_background"),
    // Interactive elements
    ("focusBorder", "accent"),
    // Components
    ("button.background", "button_background"),
    ("button.foreground", "button_text"),
    ("button.hoverBackground", "button_background_hover"),
    ("input.background", "input_background"),
    ("input.foreground", "input_text"),
    ("input.border", "input_border"),
    ("inputOption.activeBorder", "accent"),
    ("list.activeSelectionBackground", "list_active_selection_background"),
    ("list.activeSelectionForeground", "list_active_selection_text"),
    ("list.hoverBackground", "list_hover_background"),
    ("list.focusBackground", "list_active_selection_background"),
    ("scrollbar.shadow", "ui_background_dark"),
    ("scrollbarSlider.background", "scrollbar_handle"),
    ("scrollbarSlider.hoverBackground", "scrollbar_handle_hover"),
    ("scrollbarSlider.activeBackground", "scrollbar_handle_hover"),
    // Status bar
    ("statusBar.background", "statusbar_background"),
    ("statusBar.foreground", "statusbar_text"),
    ("statusBar.noFolderBackground", "statusbar_background"),
    // Semantic colors
    ("editorError.foreground", "error"),
    ("editorWarning.foreground", "warning"),
    ("editorInfo.foreground", "info"),
    // Editor
    ("editor.selectionBackground", "list_active_selection_background"),
    ("editorLineNumber.foreground", "ui_text_dark"),
    ("editorLineNumber.activeForeground", "accent"),
    // Tabs
    ("tab.activeBackground", "tab_active_background"),
    ("tab.inactiveBackground", "tab_background"),
    ("tab.activeForeground", "tab_active_text"),
    ("tab.inactiveForeground", "tab_text"),
    ("tab.border", "ui_border"),
    // Tooltip & menu
    ("editor.hoverHighlightBackground", "tooltip_background"),
    ("menu.background", "menu_background"),
    ("menu.foreground", "menu_text"),
    ("menu.selectionBackground", "menu_selection_background"),
];

/// Remap a VSCode theme's `colors` object to OBS palette tokens.
///
/// Only mapped keys with string values are carried over. Each token keeps
/// its first-assignment position; later source keys overwrite the value.
pub fn import_vscode(colors: &Map<String, Value>) -> Vec<(String, String)> {
    let mut out: Vec<(String, String)> = Vec::new();
    for (vscode_key, obs_token) in VSCODE_TO_OBS {
        let Some(value) = colors.get(*vscode_key).and_then(Value::as_str) else {
            continue;
        };
        match out.iter_mut().find(|(name, _)| name == obs_token) {
            Some(existing) => existing.1 = value.to_string(),
            None => out.push((obs_token.to_string(), value.to_string())),
        }
    }
    out
}

/// Remap TextMate/editor colors to the eleven-token palette used by the
/// generated themes, with last-resort Dracula defaults.
pub fn import_textmate(colors: &Map<String, Value>) -> Vec<(String, String)> {
    let pick = |keys: &[&str], fallback: &str| -> String {
        keys.iter()
            .find_map(|key| colors.get(*key).and_then(Value::as_str))
            .unwrap_or(fallback)
            .to_string()
    };

    vec![
        ("background".to_string(), pick(&["editor.background", "background"], "#282a36")),
        (
            "current_line".to_string(),
            pick(&["editor.selectionBackground", "selection.background"], "#44475a"),
        ),
        ("foreground".to_string(), pick(&["editor.foreground", "foreground"], "#f8f8f2")),
        (
            "comment".to_string(),
            pick(&["editorLineNumber.foreground", "comments"], "#6272a4"),
        ),
        (
            "cyan".to_string(),
            pick(&["editorInfo.foreground", "editor.infoForeground"], "#8be9fd"),
        ),
        ("green".to_string(), pick(&["editorGutter.addedBackground"], "#50fa7b")),
        (
            "orange".to_string(),
            pick(&["editorWarning.foreground", "editor.warningForeground"], "#ffb86c"),
        ),
        ("pink".to_string(), pick(&["editorGutter.modifiedBackground"], "#ff79c6")),
        ("purple".to_string(), pick(&["editorGutter.deletedBackground"], "#bd93f9")),
        (
            "red".to_string(),
            pick(&["editorError.foreground", "editor.errorForeground"], "#ff5555"),
        ),
        ("yellow".to_string(), pick(&["editorWarning.foreground"], "#f1fa8c")),
    ]
}
