use crate::config::default_extensions;
use crate::error::DocumentError;
use crate::map::TranslationMap;
use crate::text::{TranslatedDocument, apply};
use log::{debug, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;
use walkdir::WalkDir;

/// The text of one file and where it came from.
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub text: String,
}

impl Document {
    pub async fn read(path: impl Into<PathBuf>) -> Result<Self, DocumentError> {
        let path = path.into();
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(Self { path, text }),
            Err(source) => Err(DocumentError::Io { path, source }),
        }
    }

    pub fn translate(&self, map: &TranslationMap) -> TranslatedDocument {
        apply(map, &self.text)
    }
}

pub async fn write(path: &Path, text: &str) -> Result<(), DocumentError> {
    tokio::fs::write(path, text)
        .await
        .map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Files under `root` whose extension is in `extensions`, sorted by path.
/// A root that is itself a file is returned as-is.
pub fn discover(root: &Path, extensions: &[String]) -> Result<Vec<PathBuf>, DocumentError> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .path()
            .extension()
            .map(|ext| {
                let ext = ext.to_string_lossy();
                extensions
                    .iter()
                    .any(|want| want.trim_start_matches('.').eq_ignore_ascii_case(&ext))
            })
            .unwrap_or(false);
        if matches {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

#[derive(Debug, Clone)]
pub struct TreeOptions {
    pub extensions: Vec<String>,
    pub dry_run: bool,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            dry_run: false,
        }
    }
}

#[derive(Debug)]
pub struct DocumentReport {
    pub substitutions: usize,
    pub phrases_found: usize,
    pub written: bool,
}

/// Per-document outcome of a tree run; one failure does not stop the rest.
#[derive(Debug)]
pub struct DocumentOutcome {
    pub path: PathBuf,
    pub result: Result<DocumentReport, DocumentError>,
}

async fn translate_file(
    map: Arc<TranslationMap>,
    path: PathBuf,
    dry_run: bool,
) -> Result<DocumentReport, DocumentError> {
    let start = std::time::Instant::now();
    let document = Document::read(path).await?;
    let translated = document.translate(&map);

    let changed = translated.text != document.text;
    let written = changed && !dry_run;
    if written {
        write(&document.path, &translated.text).await?;
    }
    debug!(
        "{:?}: substitutions={} found={} written={written} in {:?}",
        document.path,
        translated.substitutions,
        translated.phrases_found,
        start.elapsed()
    );

    Ok(DocumentReport {
        substitutions: translated.substitutions,
        phrases_found: translated.phrases_found,
        written,
    })
}

/// Apply `map` to every matching file under `root`, each as its own task.
/// Outcomes are sorted by path.
pub async fn translate_tree(
    map: Arc<TranslationMap>,
    root: &Path,
    options: &TreeOptions,
) -> Result<Vec<DocumentOutcome>, DocumentError> {
    let files = discover(root, &options.extensions)?;
    debug!("{} documents under {root:?}", files.len());

    let mut tasks = JoinSet::new();
    let mut paths = HashMap::new();
    for path in files {
        let handle = tasks.spawn(translate_file(map.clone(), path.clone(), options.dry_run));
        paths.insert(handle.id(), path);
    }

    let mut outcomes = Vec::new();
    while let Some(joined) = tasks.join_next_with_id().await {
        let (id, result) = match joined {
            Ok((id, result)) => (id, result),
            Err(e) => (e.id(), Err(DocumentError::Join(e))),
        };
        let Some(path) = paths.remove(&id) else {
            continue;
        };
        if let Err(e) = &result {
            warn!("{path:?}: {e}");
        }
        outcomes.push(DocumentOutcome { path, result });
    }

    outcomes.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(outcomes)
}
