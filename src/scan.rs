//! Sprite discovery - lists sprite files and sprite folders on disk

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::PackError;

/// Result of listing a sprite directory.
///
/// Keeps "directory absent" and "directory unreadable" apart from
/// "directory empty", which the flat [`get_files`] contract conflates.
#[derive(Debug)]
pub enum ScanOutcome {
    /// Matching files, in natural order (may be empty)
    Listed(Vec<PathBuf>),
    /// The directory does not exist
    Missing,
    /// The directory exists but could not be listed
    Unreadable(io::Error),
}

impl ScanOutcome {
    /// Matching files, or nothing when the directory could not be listed.
    pub fn into_paths(self) -> Vec<PathBuf> {
        match self {
            ScanOutcome::Listed(paths) => paths,
            ScanOutcome::Missing | ScanOutcome::Unreadable(_) => Vec::new(),
        }
    }

    pub fn is_listed(&self) -> bool {
        matches!(self, ScanOutcome::Listed(_))
    }
}

/// Options controlling which subdirectories of the root count as sprite folders.
#[derive(Debug, Clone, Default)]
pub struct FolderFilter {
    /// Include directories whose name starts with `.`
    pub include_hidden: bool,
    /// Directory never treated as a sprite folder (usually the output directory)
    pub exclude: Option<PathBuf>,
}

/// List regular files directly inside `dir` whose name ends with `extension`.
///
/// The match is a case-sensitive suffix match on the file name. Results are
/// sorted naturally so `walk_2.png` comes before `walk_10.png`.
pub fn scan_dir(dir: &Path, extension: &str) -> ScanOutcome {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return ScanOutcome::Missing,
        Err(e) => return ScanOutcome::Unreadable(e),
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => return ScanOutcome::Unreadable(e),
        };
        let path = entry.path();
        // Lossy so non-UTF-8 names still match on their suffix
        let matches = entry.file_name().to_string_lossy().ends_with(extension);
        if matches && path.is_file() {
            files.push(path);
        }
    }

    alphanumeric_sort::sort_path_slice(&mut files);
    ScanOutcome::Listed(files)
}

/// List matching files in `dir`, treating any access failure as "no files".
pub fn get_files(dir: &Path, extension: &str) -> Vec<PathBuf> {
    scan_dir(dir, extension).into_paths()
}

/// List the sprite folders directly under `root`, naturally sorted.
pub fn list_folders(root: &Path, filter: &FolderFilter) -> Result<Vec<PathBuf>, PackError> {
    let entries = fs::read_dir(root)
        .map_err(|source| PackError::Root { path: root.to_path_buf(), source })?;

    let excluded = filter.exclude.as_ref().and_then(|p| p.canonicalize().ok());

    let mut folders = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| PackError::Root { path: root.to_path_buf(), source })?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if !filter.include_hidden && entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        if let Some(ref excluded) = excluded {
            if path.canonicalize().ok().as_ref() == Some(excluded) {
                log::debug!("Skipping output directory {}", path.display());
                continue;
            }
        }
        folders.push(path);
    }

    alphanumeric_sort::sort_path_slice(&mut folders);
    Ok(folders)
}

/// Folder name used as the manifest key.
pub fn folder_name(folder: &Path) -> String {
    folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| folder.display().to_string())
}
