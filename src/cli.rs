use crate::config::{Config, default_theme_dir};
use crate::server;
use anyhow::{Context, bail};
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;
use styla_core::ThemeMeta;
use styla_ovt::{builtin, convert_json, import, render};
use styla_store::ThemeStore;

const USAGE: &str = "\
styla — OBS .ovt theme toolkit

USAGE:
  styla [serve]             run the theme-library server (default)
  styla validate [DIR]      validate every theme in DIR, print a JSON report
  styla generate [DIR]      write the builtin themes into DIR
  styla convert [FILE]      convert a JSON theme document (FILE or stdin) to OVT
  styla import [--textmate] FILE
                            convert an editor theme JSON to OVT; VSCode
                            workbench keys by default, --textmate remaps
                            through the generated-theme palette

Server environment: STYLA_HOST, STYLA_PORT, STYLA_THEME_DIR, STYLA_MAX_BODY_BYTES
";

pub fn run() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None | Some("serve") => server::run(Config::from_env()),
        Some("validate") => validate(args.get(1)),
        Some("generate") => generate(args.get(1)),
        Some("convert") => convert(args.get(1)),
        Some("import") => import_theme(&args[1..]),
        Some("help" | "--help" | "-h") => {
            print!("{}", USAGE);
            Ok(())
        }
        Some(other) => bail!("unknown command '{}'\n\n{}", other, USAGE),
    }
}

fn theme_dir(arg: Option<&String>) -> PathBuf {
    arg.map(PathBuf::from).unwrap_or_else(default_theme_dir)
}

fn validate(dir: Option<&String>) -> anyhow::Result<()> {
    let store = ThemeStore::open(theme_dir(dir))?;
    let response = store.validate_all();
    println!("{}", serde_json::to_string_pretty(&response)?);

    let failing = response
        .validations
        .iter()
        .filter(|v| {
            v.error.is_some() || v.report.as_ref().is_some_and(|r| r.summary.errors > 0)
        })
        .count();
    if failing > 0 {
        bail!("{} theme(s) failed validation", failing);
    }
    Ok(())
}

fn generate(dir: Option<&String>) -> anyhow::Result<()> {
    let store = ThemeStore::open(theme_dir(dir))?;
    for result in store.generate_builtins() {
        match result.error {
            None => println!("{}: {}", result.name, result.status),
            Some(error) => println!("{}: {} ({})", result.name, result.status, error),
        }
    }
    Ok(())
}

fn read_input(path: Option<&String>) -> anyhow::Result<String> {
    match path.map(String::as_str) {
        None | Some("-") => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("reading stdin")?;
            Ok(input)
        }
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path))
        }
    }
}

fn convert(path: Option<&String>) -> anyhow::Result<()> {
    let input = read_input(path)?;
    let ovt = convert_json(&input)?;
    print!("{}", ovt);
    Ok(())
}

/// Convert an editor color theme into an OVT file on stdout.
fn import_theme(args: &[String]) -> anyhow::Result<()> {
    let mut textmate = false;
    let mut file = None;
    for arg in args {
        match arg.as_str() {
            "--textmate" => textmate = true,
            other => file = Some(other),
        }
    }
    let Some(path) = file else {
        bail!("import requires a FILE argument\n\n{}", USAGE);
    };
    let input = std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    let doc: Value = serde_json::from_str(&input).context("parsing theme JSON")?;
    print!("{}", imported_theme_text(&doc, textmate)?);
    Ok(())
}

/// Build OVT text from an editor theme document.
///
/// The default path remaps VSCode workbench keys to OBS tokens one-to-one;
/// the TextMate path funnels the colors into the eleven-token palette and
/// expands it with the semantic layer the generated themes share.
fn imported_theme_text(doc: &Value, textmate: bool) -> anyhow::Result<String> {
    let colors = doc
        .get("colors")
        .and_then(Value::as_object)
        .context("theme has no \"colors\" object")?;

    let vars = if textmate {
        builtin::expand_palette(&import::import_textmate(colors))
    } else {
        let vars = import::import_vscode(colors);
        if vars.is_empty() {
            bail!("no importable color keys found");
        }
        vars
    };

    let name = doc
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("Imported Theme")
        .to_string();
    let meta = ThemeMeta {
        id: format!("com.imported.{}", id_slug(&name)),
        name,
        author: "styla import".to_string(),
        dark: doc.get("type").and_then(Value::as_str) != Some("light"),
        ..Default::default()
    };

    Ok(render(&meta, &vars))
}

/// Lowercase alphanumeric slug for generated theme ids.
fn id_slug(name: &str) -> String {
    let slug: String = name
        .to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    if slug.is_empty() { "theme".to_string() } else { slug }
}
