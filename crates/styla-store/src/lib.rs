//! Filesystem store for a directory of OVT theme files.
//!
//! The store owns every mutation of the theme directory: listing with a
//! short-lived scan cache, reads, atomic writes, deletion, duplication,
//! in-place metadata rewrites and builtin-theme generation.

pub mod names;

use parking_lot::Mutex;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant, UNIX_EPOCH};
use std::collections::HashMap;
use styla_core::api::{
    DuplicateThemeId, FileValidation, GeneratedTheme, Issue, ThemeEntry, ValidateResponse,
};
use styla_ovt::{builtin, parse, validate, validate_theme_content};

/// How long a directory scan stays cached. Mutations through the store
/// invalidate it immediately; the TTL only covers outside edits.
pub const SCAN_CACHE_TTL: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    InvalidName(String),
    #[error("File not found")]
    NotFound,
    #[error("File with new_name already exists")]
    AlreadyExists,
    #[error("Missing meta")]
    EmptyMeta,
    #[error("Could not find @OBSThemeMeta block")]
    NoMetaBlock,
    #[error("File access error: {0}")]
    Io(#[from] io::Error),
}

struct CachedScan {
    taken_at: Instant,
    entries: Vec<ThemeEntry>,
}

pub struct ThemeStore {
    root: PathBuf,
    cache: Mutex<Option<CachedScan>>,
}

impl ThemeStore {
    /// Open (creating if needed) a theme directory.
    pub fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root: root.canonicalize()?,
            cache: Mutex::new(None),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate `name` and resolve it inside the store root.
    fn resolve(&self, name: &str) -> Result<PathBuf, StoreError> {
        names::validate_file_name(name).map_err(StoreError::InvalidName)?;
        Ok(self.root.join(name))
    }

    /// List stored themes, sorted by name. Serves a cached scan when fresh.
    pub fn list(&self) -> Vec<ThemeEntry> {
        {
            let cache = self.cache.lock();
            if let Some(cached) = cache.as_ref() {
                if cached.taken_at.elapsed() < SCAN_CACHE_TTL {
                    return cached.entries.clone();
                }
            }
        }

        let entries = self.scan();
        *self.cache.lock() = Some(CachedScan {
            taken_at: Instant::now(),
            entries: entries.clone(),
        });
        entries
    }

    fn scan(&self) -> Vec<ThemeEntry> {
        let mut entries = Vec::new();
        let Ok(dir) = fs::read_dir(&self.root) else {
            return entries;
        };
        for item in dir.flatten() {
            let path = item.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !path.is_file() || !names::has_allowed_extension(name) {
                continue;
            }
            let Ok(meta) = item.metadata() else { continue };
            let modified = meta
                .modified()
                .ok()
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map(|d| d.as_secs())
                .unwrap_or(0);
            entries.push(ThemeEntry {
                name: name.to_string(),
                path: name.to_string(),
                size: meta.len(),
                modified,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }

    /// Drop the scan cache; every mutation path calls this.
    pub fn invalidate(&self) {
        *self.cache.lock() = None;
    }

    pub fn read(&self, name: &str) -> Result<String, StoreError> {
        let path = self.resolve(name)?;
        fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound,
            _ => StoreError::Io(e),
        })
    }

    /// Write a theme file atomically (temp file + rename).
    pub fn write(&self, name: &str, content: &str) -> Result<(), StoreError> {
        static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

        let path = self.resolve(name)?;
        // Temp name carries the full file name plus a sequence number so
        // sibling stems and concurrent writes never stage through the
        // same file.
        let tmp_path = self.root.join(format!(
            ".{}.{}.tmp",
            name,
            TMP_SEQ.fetch_add(1, Ordering::Relaxed)
        ));
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &path)?;
        self.invalidate();
        Ok(())
    }

    pub fn delete(&self, name: &str) -> Result<(), StoreError> {
        let path = self.resolve(name)?;
        fs::remove_file(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound,
            _ => StoreError::Io(e),
        })?;
        self.invalidate();
        log::info!("Deleted theme {}", name);
        Ok(())
    }

    /// Copy `name` to `new_name`, inheriting the source extension when the
    /// target has none. Returns the final target name.
    pub fn duplicate(&self, name: &str, new_name: &str) -> Result<String, StoreError> {
        let source = self.resolve(name)?;

        let trimmed = new_name.trim();
        names::validate_theme_name(trimmed)
            .map_err(|m| StoreError::InvalidName(format!("Invalid new_name: {}", m)))?;

        let mut target_name = trimmed.to_string();
        if !names::has_allowed_extension(&target_name) {
            if let Some(ext) = source.extension().and_then(|e| e.to_str()) {
                target_name = format!("{}.{}", target_name, ext);
            }
        }
        let target = self.resolve(&target_name)?;

        if !source.is_file() {
            return Err(StoreError::NotFound);
        }
        if target.exists() {
            return Err(StoreError::AlreadyExists);
        }

        fs::copy(&source, &target)?;
        self.invalidate();
        log::info!("Duplicated theme {} to {}", name, target_name);
        Ok(target_name)
    }

    /// Parsed metadata of a stored theme.
    pub fn meta(&self, name: &str) -> Result<serde_json::Map<String, Value>, StoreError> {
        let text = self.read(name)?;
        Ok(validate_theme_content(&text).meta)
    }

    /// Rewrite a stored theme's `@OBSThemeMeta` block in place. An empty
    /// map is rejected rather than wiping the block.
    pub fn update_meta(
        &self,
        name: &str,
        meta: &serde_json::Map<String, Value>,
    ) -> Result<(), StoreError> {
        if meta.is_empty() {
            return Err(StoreError::EmptyMeta);
        }
        let text = self.read(name)?;
        let updated = parse::rewrite_meta_block(&text, meta).ok_or(StoreError::NoMetaBlock)?;
        self.write(name, &updated)
    }

    /// Validate every stored theme and detect theme ids claimed by more
    /// than one file. Duplicate-id warnings are added to each affected
    /// file's report.
    pub fn validate_all(&self) -> ValidateResponse {
        let mut validations = Vec::new();
        let mut id_map: HashMap<String, Vec<String>> = HashMap::new();

        for entry in self.list() {
            let text = match self.read(&entry.name) {
                Ok(text) => text,
                Err(e) => {
                    validations.push(FileValidation {
                        name: entry.name,
                        error: Some(format!("Could not read file: {}", e)),
                        report: None,
                    });
                    continue;
                }
            };
            let report = validate_theme_content(&text);
            if let Some(Value::String(id)) = report.meta.get("id") {
                id_map.entry(id.clone()).or_default().push(entry.name.clone());
            }
            validations.push(FileValidation {
                name: entry.name,
                error: None,
                report: Some(report),
            });
        }

        let mut duplicate_ids: Vec<DuplicateThemeId> = id_map
            .into_iter()
            .filter(|(_, files)| files.len() > 1)
            .map(|(id, files)| DuplicateThemeId { id, files })
            .collect();
        duplicate_ids.sort_by(|a, b| a.id.cmp(&b.id));

        for duplicate in &duplicate_ids {
            for validation in &mut validations {
                if !duplicate.files.contains(&validation.name) {
                    continue;
                }
                let Some(report) = validation.report.as_mut() else { continue };
                let mut issue = Issue::new(
                    validate::DUPLICATE_THEME_ID,
                    format!("Theme id {} used by multiple files", duplicate.id),
                );
                issue.files = Some(duplicate.files.clone());
                report.warnings.push(issue);
                report.summary.warnings = report.warnings.len();
            }
        }

        ValidateResponse {
            validations,
            duplicate_ids,
        }
    }

    /// Write every builtin theme into the store, reporting per-theme results.
    pub fn generate_builtins(&self) -> Vec<GeneratedTheme> {
        builtin::builtin_themes()
            .iter()
            .map(|theme| match self.write(&theme.file_name, &theme.render()) {
                Ok(()) => GeneratedTheme {
                    name: theme.file_name.clone(),
                    status: "written".to_string(),
                    error: None,
                },
                Err(e) => {
                    log::warn!("Failed to generate {}: {}", theme.file_name, e);
                    GeneratedTheme {
                        name: theme.file_name.clone(),
                        status: "error".to_string(),
                        error: Some(e.to_string()),
                    }
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, ThemeStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ThemeStore::open(dir.path()).unwrap();
        (dir, store)
    }

    const SAMPLE: &str = "@OBSThemeMeta {\n    id: 'com.example.night';\n    name: 'Night';\n    dark: 'true';\n}\n\n@OBSThemeVars {\n    --base: #24273a;\n}\n";

    #[test]
    fn test_list_sorted_with_metadata() {
        let (_dir, store) = store();
        store.write("zeta.ovt", SAMPLE).unwrap();
        store.write("alpha.obt", SAMPLE).unwrap();
        std::fs::write(store.root().join("notes.txt"), "ignored").unwrap();

        let entries = store.list();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["alpha.obt", "zeta.ovt"]);
        assert_eq!(entries[0].size, SAMPLE.len() as u64);
        assert!(entries[0].modified > 0);
    }

    #[test]
    fn test_mutations_invalidate_scan_cache() {
        let (_dir, store) = store();
        assert!(store.list().is_empty());
        store.write("night.ovt", SAMPLE).unwrap();
        assert_eq!(store.list().len(), 1);
        store.delete("night.ovt").unwrap();
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let (_dir, store) = store();
        assert!(matches!(store.delete("ghost.ovt"), Err(StoreError::NotFound)));
    }

    #[test]
    fn test_traversal_names_rejected() {
        let (_dir, store) = store();
        assert!(matches!(store.read("../secret.ovt"), Err(StoreError::InvalidName(_))));
        assert!(matches!(store.delete("a/b.ovt"), Err(StoreError::InvalidName(_))));
        assert!(matches!(
            store.write("theme.exe", "x"),
            Err(StoreError::InvalidName(_))
        ));
    }

    #[test]
    fn test_duplicate_inherits_extension() {
        let (_dir, store) = store();
        store.write("night.ovt", SAMPLE).unwrap();
        let target = store.duplicate("night.ovt", "night copy").unwrap();
        assert_eq!(target, "night copy.ovt");
        assert_eq!(store.read("night copy.ovt").unwrap(), SAMPLE);
    }

    #[test]
    fn test_duplicate_refuses_existing_target() {
        let (_dir, store) = store();
        store.write("night.ovt", SAMPLE).unwrap();
        store.write("day.ovt", SAMPLE).unwrap();
        assert!(matches!(
            store.duplicate("night.ovt", "day.ovt"),
            Err(StoreError::AlreadyExists)
        ));
    }

    #[test]
    fn test_duplicate_rejects_reserved_target() {
        let (_dir, store) = store();
        store.write("night.ovt", SAMPLE).unwrap();
        assert!(matches!(
            store.duplicate("night.ovt", "con"),
            Err(StoreError::InvalidName(_))
        ));
    }

    #[test]
    fn test_meta_roundtrip() {
        let (_dir, store) = store();
        store.write("night.ovt", SAMPLE).unwrap();

        let mut meta = store.meta("night.ovt").unwrap();
        assert_eq!(meta.get("name"), Some(&Value::String("Night".to_string())));

        meta.insert("name".to_string(), Value::String("Midnight".to_string()));
        store.update_meta("night.ovt", &meta).unwrap();

        let updated = store.meta("night.ovt").unwrap();
        assert_eq!(updated.get("name"), Some(&Value::String("Midnight".to_string())));
        // Vars block untouched by the rewrite.
        assert!(store.read("night.ovt").unwrap().contains("--base: #24273a;"));
    }

    #[test]
    fn test_update_meta_without_block() {
        let (_dir, store) = store();
        store.write("vars-only.ovt", "@OBSThemeVars {\n    --base: #fff;\n}\n").unwrap();
        let mut meta = serde_json::Map::new();
        meta.insert("name".to_string(), Value::String("X".to_string()));
        assert!(matches!(
            store.update_meta("vars-only.ovt", &meta),
            Err(StoreError::NoMetaBlock)
        ));
    }

    #[test]
    fn test_update_meta_rejects_empty_map() {
        let (_dir, store) = store();
        store.write("night.ovt", SAMPLE).unwrap();
        assert!(matches!(
            store.update_meta("night.ovt", &serde_json::Map::new()),
            Err(StoreError::EmptyMeta)
        ));
        // File untouched.
        assert_eq!(store.read("night.ovt").unwrap(), SAMPLE);
    }

    #[test]
    fn test_write_siblings_with_shared_stem() {
        let (_dir, store) = store();
        store.write("a.ovt", "one").unwrap();
        store.write("a.obt", "two").unwrap();
        assert_eq!(store.read("a.ovt").unwrap(), "one");
        assert_eq!(store.read("a.obt").unwrap(), "two");

        let leftover_tmp = std::fs::read_dir(store.root())
            .unwrap()
            .flatten()
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(leftover_tmp, 0);
    }

    #[test]
    fn test_validate_all_flags_duplicate_ids() {
        let (_dir, store) = store();
        store.write("night.ovt", SAMPLE).unwrap();
        store.write("night2.ovt", SAMPLE).unwrap();

        let response = store.validate_all();
        assert_eq!(response.validations.len(), 2);
        assert_eq!(response.duplicate_ids.len(), 1);
        assert_eq!(response.duplicate_ids[0].id, "com.example.night");

        for validation in &response.validations {
            let report = validation.report.as_ref().unwrap();
            assert!(
                report
                    .warnings
                    .iter()
                    .any(|w| w.code == validate::DUPLICATE_THEME_ID),
                "{} missing duplicate-id warning",
                validation.name
            );
            assert_eq!(report.summary.warnings, report.warnings.len());
        }
    }

    #[test]
    fn test_generate_builtins_writes_files() {
        let (_dir, store) = store();
        let results = store.generate_builtins();
        assert_eq!(results.len(), 5);
        assert!(results.iter().all(|r| r.status == "written"));

        let listed = store.list();
        assert_eq!(listed.len(), 5);
        for entry in &listed {
            let report = validate_theme_content(&store.read(&entry.name).unwrap());
            assert_eq!(report.summary.errors, 0, "{}", entry.name);
        }
    }
}
