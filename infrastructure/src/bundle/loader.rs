//! Local bundle loader
//!
//! The bundle is a directory of `<key>.json` files, each holding a JSON array
//! of quote records. It is the fallback for every category whose remote
//! fetch fails.
//!
//! ```text
//! sentences/
//! ├── a.json
//! ├── b.json
//! └── ...
//! ```
//!
//! A file that cannot be read or parsed is skipped with a warning; the rest
//! of the bundle still loads.

use hitokoto_domain::{Corpus, QuoteRecord};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that prevent the bundle directory from being scanned at all
#[derive(Error, Debug)]
pub enum BundleError {
    #[error("bundle path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to read bundle directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Loads the local quote bundle from disk
#[derive(Debug, Clone)]
pub struct BundleLoader {
    dir: PathBuf,
}

impl BundleLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load every `*.json` category file in the directory
    ///
    /// A missing directory yields an empty corpus.
    pub fn load(&self) -> Result<Corpus, BundleError> {
        if !self.dir.exists() {
            warn!(
                "Bundle directory {} does not exist, starting with an empty bundle",
                self.dir.display()
            );
            return Ok(Corpus::new());
        }
        if !self.dir.is_dir() {
            return Err(BundleError::NotADirectory(self.dir.clone()));
        }

        let entries = fs::read_dir(&self.dir).map_err(|source| BundleError::ReadDir {
            path: self.dir.clone(),
            source,
        })?;

        let mut categories = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            let Some(key) = category_key(&path) else {
                continue;
            };
            match Self::load_file(&path) {
                Ok(quotes) => {
                    debug!("Loaded bundle category '{}' ({} quotes)", key, quotes.len());
                    categories.push((key, quotes));
                }
                Err(e) => warn!("Skipping bundle file {}: {}", path.display(), e),
            }
        }

        let corpus: Corpus = categories.into_iter().collect();
        info!(
            "Loaded local bundle from {}: {} categories, {} quotes",
            self.dir.display(),
            corpus.len(),
            corpus.quote_count()
        );
        Ok(corpus)
    }

    fn load_file(path: &Path) -> Result<Vec<QuoteRecord>, String> {
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        let quotes: Vec<QuoteRecord> = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        let inconsistent = quotes.iter().filter(|q| !q.is_length_consistent()).count();
        if inconsistent > 0 {
            debug!(
                "{} quotes in {} have a length that differs from their text",
                inconsistent,
                path.display()
            );
        }
        Ok(quotes)
    }
}

/// File stem of a regular `*.json` file
fn category_key(path: &Path) -> Option<String> {
    if !path.is_file() {
        return None;
    }
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == "json");
    if !is_json {
        return None;
    }
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const A_JSON: &str = r#"[
        {"id": 1, "uuid": "a-1", "hitokoto": "hello", "type": "a", "from": "f",
         "from_who": null, "creator": "c", "creator_uid": 1, "reviewer": 2,
         "commit_from": "web", "created_at": "1468605909", "length": 5}
    ]"#;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_loads_json_files_by_stem() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a.json", A_JSON);
        write(temp.path(), "b.json", "[]");
        write(temp.path(), "README.md", "# not a category");

        let corpus = BundleLoader::new(temp.path()).load().unwrap();

        assert_eq!(corpus.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(corpus.get("a").unwrap()[0].hitokoto, "hello");
        assert!(corpus.get("b").unwrap().is_empty());
    }

    #[test]
    fn test_skips_malformed_files() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a.json", A_JSON);
        write(temp.path(), "broken.json", "{ not json");
        write(temp.path(), "object.json", r#"{"id": 1}"#);

        let corpus = BundleLoader::new(temp.path()).load().unwrap();

        assert_eq!(corpus.keys().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let temp = TempDir::new().unwrap();
        let corpus = BundleLoader::new(temp.path().join("nope")).load().unwrap();
        assert!(corpus.is_empty());
    }

    #[test]
    fn test_file_path_is_rejected() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a.json", A_JSON);
        let result = BundleLoader::new(temp.path().join("a.json")).load();
        assert!(matches!(result, Err(BundleError::NotADirectory(_))));
    }

    #[test]
    fn test_shipped_bundle_is_consistent() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../sentences");
        let corpus = BundleLoader::new(dir).load().unwrap();

        assert!(corpus.contains("a"));
        for (key, quotes) in corpus.categories() {
            assert!(!quotes.is_empty(), "category {} is empty", key);
            for quote in quotes {
                assert!(quote.is_length_consistent(), "{} in {}", quote.uuid, key);
                assert_eq!(quote.kind, key);
            }
        }
    }

    #[test]
    fn test_ignores_subdirectories() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("nested.json")).unwrap();
        write(temp.path(), "a.json", A_JSON);

        let corpus = BundleLoader::new(temp.path()).load().unwrap();

        assert_eq!(corpus.len(), 1);
    }
}
