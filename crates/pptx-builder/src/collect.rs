//! Input collection
//!
//! Turns user-supplied paths into ordered lists of slide sources.
//! Ordering is a case-insensitive lexical sort on the file name, which is
//! deterministic but not numeric-aware: `img10` sorts before `img2`.

use crate::constants::{DOCUMENT_EXTENSIONS, IMAGE_EXTENSIONS};
use crate::types::{DeckError, InputKind, Result};
use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// What to do with the contents of one folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderPlan {
    /// Convert each document into its own deck
    Documents(Vec<PathBuf>),
    /// Build one deck from all images
    Images(Vec<PathBuf>),
    /// Nothing convertible here
    Empty,
}

fn extension_in(path: &Path, allowed: &[&str]) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            allowed.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Whether `path` has a supported raster image extension
pub fn is_image_path(path: &Path) -> bool {
    extension_in(path, IMAGE_EXTENSIONS)
}

/// Whether `path` has a supported document extension
pub fn is_document_path(path: &Path) -> bool {
    extension_in(path, DOCUMENT_EXTENSIONS)
}

/// Sort paths by file name, case-insensitively.
///
/// Names that compare equal once lower-cased fall back to their raw
/// bytes so the result never depends on directory iteration order.
pub fn sort_by_name(paths: &mut [PathBuf]) {
    paths.sort_by_cached_key(|p| {
        let name = p.file_name().unwrap_or_default();
        (
            name.to_string_lossy().to_lowercase(),
            name.as_encoded_bytes().to_vec(),
        )
    });
}

/// Remove repeated paths, keeping the first occurrence
pub fn dedup_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    paths
        .into_iter()
        .filter(|p| {
            let key = fs::canonicalize(p).unwrap_or_else(|_| p.clone());
            seen.insert(key)
        })
        .collect()
}

fn list_files_where(dir: &Path, keep: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(DeckError::invalid_input(dir, "not a directory"));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && keep(&path) {
            files.push(path);
        }
    }
    sort_by_name(&mut files);
    Ok(files)
}

/// List the supported images directly inside `dir`, sorted by name.
///
/// Subdirectories and files with other extensions are skipped.
pub fn list_images(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    list_files_where(dir.as_ref(), is_image_path)
}

/// List the documents directly inside `dir`, sorted by name
pub fn list_documents(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    list_files_where(dir.as_ref(), is_document_path)
}

/// Classify an input path.
///
/// A directory only counts as an image folder when it holds at least one
/// supported image; an empty or unreadable directory is `Unknown`.
pub fn detect_kind(path: impl AsRef<Path>) -> InputKind {
    let path = path.as_ref();
    if path.is_file() && is_document_path(path) {
        return InputKind::Document;
    }
    if path.is_dir() {
        match list_images(path) {
            Ok(images) if !images.is_empty() => return InputKind::ImageFolder,
            Ok(_) => {}
            Err(e) => log::debug!("Could not list {}: {}", path.display(), e),
        }
    }
    InputKind::Unknown
}

/// Decide how a folder is converted.
///
/// When a folder holds both documents and images, only the documents are
/// converted and a warning is logged.
pub fn plan_folder(dir: impl AsRef<Path>) -> Result<FolderPlan> {
    let dir = dir.as_ref();
    let documents = list_documents(dir)?;
    let images = list_images(dir)?;

    match (documents.is_empty(), images.is_empty()) {
        (false, false) => {
            log::warn!(
                "Mixed content in {}: converting {} document(s), ignoring {} image(s)",
                dir.display(),
                documents.len(),
                images.len()
            );
            Ok(FolderPlan::Documents(documents))
        }
        (false, true) => Ok(FolderPlan::Documents(documents)),
        (true, false) => Ok(FolderPlan::Images(images)),
        (true, true) => Ok(FolderPlan::Empty),
    }
}

/// Immediate subdirectories of `dir`, sorted by name
pub fn subfolders(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    sort_by_name(&mut dirs);
    Ok(dirs)
}

/// Result of walking a folder tree
#[derive(Debug, Default)]
pub struct FolderWalk {
    /// Folders to process, parents before children
    pub folders: Vec<PathBuf>,
    /// Folders that could not be read, with the reason
    pub failed: Vec<(PathBuf, DeckError)>,
}

/// The folders to process for `root`: just `root`, or with `recursive`
/// every folder below it, each visited once with parents before children.
///
/// A folder that cannot be read is recorded in [`FolderWalk::failed`] and
/// the walk carries on with its siblings. Only a `root` that is not a
/// directory fails the whole walk.
pub fn walk_folders(root: impl AsRef<Path>, recursive: bool) -> Result<FolderWalk> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(DeckError::invalid_input(root, "not a directory"));
    }

    let mut walk = FolderWalk::default();
    let mut visited = HashSet::new();
    let mut stack = vec![root.to_owned()];
    while let Some(dir) = stack.pop() {
        // Symlinked directories can form cycles
        let canonical = match fs::canonicalize(&dir) {
            Ok(canonical) => canonical,
            Err(e) => {
                log::warn!("Skipping {}: {}", dir.display(), e);
                walk.failed.push((dir, e.into()));
                continue;
            }
        };
        if !visited.insert(canonical) {
            continue;
        }
        if recursive {
            match subfolders(&dir) {
                Ok(mut children) => {
                    children.reverse();
                    stack.extend(children);
                }
                Err(e) => {
                    log::warn!("Skipping {}: {}", dir.display(), e);
                    walk.failed.push((dir, e));
                    continue;
                }
            }
        }
        walk.folders.push(dir);
    }
    Ok(walk)
}
