//! Filesystem helpers for command handlers.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Error from a filesystem helper.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("program \"{0}\" not found")]
    ProgramNotFound(String),
    #[error("home directory not found")]
    HomeNotFound,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}

/// Locates an executable on the search path.
pub fn find_program(name: &str) -> Result<PathBuf, FsError> {
    which::which(name).map_err(|_| FsError::ProgramNotFound(name.to_string()))
}

/// The current user's home directory.
pub fn home_dir() -> Result<PathBuf, FsError> {
    dirs::home_dir().ok_or(FsError::HomeNotFound)
}

/// Removes empty directories under `dir`, bottom-up.
///
/// `dir` itself is kept. With `fail_ok`, permission errors on individual
/// removals are ignored instead of aborting the sweep.
pub fn clean_dir(dir: &Path, fail_ok: bool) -> Result<(), FsError> {
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .contents_first(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        if std::fs::read_dir(entry.path())?.next().is_some() {
            continue;
        }
        match std::fs::remove_dir(entry.path()) {
            Ok(()) => {}
            Err(err) if fail_ok && err.kind() == io::ErrorKind::PermissionDenied => {}
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

/// Walks files under `start` in sorted order.
///
/// `include_suffixes` filters by extension (case-insensitive, no leading
/// dot); `ignore_dirs` prunes whole directories by name. Unreadable
/// entries are skipped.
pub fn iter_files(
    start: &Path,
    include_suffixes: Option<&[&str]>,
    ignore_dirs: Option<&[&str]>,
) -> impl Iterator<Item = PathBuf> {
    let include: Option<Vec<String>> = include_suffixes.map(|suffixes| {
        suffixes
            .iter()
            .map(|s| s.trim_start_matches('.').to_lowercase())
            .collect()
    });
    let ignore: Vec<String> = ignore_dirs
        .map(|dirs| dirs.iter().map(|s| s.to_string()).collect())
        .unwrap_or_default();

    WalkDir::new(start)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| {
            !(entry.file_type().is_dir()
                && entry
                    .file_name()
                    .to_str()
                    .map(|name| ignore.iter().any(|i| i == name))
                    .unwrap_or(false))
        })
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(move |entry| match &include {
            None => true,
            Some(suffixes) => entry
                .path()
                .extension()
                .map(|ext| suffixes.iter().any(|s| ext.eq_ignore_ascii_case(s)))
                .unwrap_or(false),
        })
        .map(|entry| entry.into_path())
}
