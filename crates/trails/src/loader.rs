//! Background ingestion of a directory of GPX files into a [`TrailStore`].

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    sync::Arc,
};

use gpx::Gpx;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::{
    metrics,
    store::{StoreError, TrailStore},
};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("GPX parse error: {0}")]
    Parse(#[from] gpx::errors::GpxError),
}

/// Outcome of one load run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub files_found: usize,
    /// Successful inserts. A file whose id repeats an earlier one still
    /// counts, so this can exceed the number of trails in the store.
    pub trails_inserted: usize,
    pub files_failed: usize,
}

/// Trail id for a file: its name without directory or final extension.
pub fn trail_id_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn is_gpx(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gpx"))
}

/// Every `.gpx` file below `dir`, searched recursively.
///
/// Each directory's entries are visited in lexical order. Symlinked
/// directories are not descended into. Unreadable subdirectories are logged
/// and skipped.
pub fn discover_gpx_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    let mut entries = read_sorted(dir)?;
    // Depth-first, keeping lexical order: walk a stack of reversed entries.
    entries.reverse();
    let mut stack = entries;

    while let Some((path, is_dir)) = stack.pop() {
        if is_dir {
            match read_sorted(&path) {
                Ok(mut children) => {
                    children.reverse();
                    stack.extend(children);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), "Skipping unreadable directory: {e}")
                }
            }
        } else if is_gpx(&path) {
            found.push(path);
        }
    }

    Ok(found)
}

/// Entries of `dir` sorted by path, each flagged when it is a real directory.
fn read_sorted(dir: &Path) -> std::io::Result<Vec<(PathBuf, bool)>> {
    let mut paths = std::fs::read_dir(dir)?
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            Some((entry.path(), is_dir))
        })
        .collect::<Vec<_>>();
    paths.sort();
    Ok(paths)
}

/// Reads and parses one GPX file.
pub fn decode_file(path: &Path) -> Result<Gpx, DecodeError> {
    let file = File::open(path)?;
    let gpx = gpx::read(BufReader::new(file))?;
    Ok(gpx)
}

/// Loads every GPX file below `dir` into `store` and marks it ready.
///
/// Files that fail to decode are logged and counted but never stop the run.
/// A missing directory leaves the store ready and empty.
pub fn load_directory(store: &TrailStore, dir: &Path) -> Result<LoadReport, StoreError> {
    store.begin_load()?;
    let mut report = LoadReport::default();

    let files = match discover_gpx_files(dir) {
        Ok(files) => files,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), "GPX directory not readable: {e}");
            Vec::new()
        }
    };
    report.files_found = files.len();

    for path in &files {
        tracing::debug!(path = %path.display(), "Loading GPX file");
        match decode_file(path) {
            Ok(doc) => {
                let trail = metrics::extract(&doc, trail_id_from_path(path));
                store.insert(trail)?;
                report.trails_inserted += 1;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "Failed to load GPX file: {e}");
                report.files_failed += 1;
            }
        }
    }

    store.finish_load()?;
    tracing::info!(
        files_found = report.files_found,
        trails_inserted = report.trails_inserted,
        files_failed = report.files_failed,
        trails_in_store = store.status().trail_count,
        "Finished loading trails"
    );
    Ok(report)
}

/// Runs [`load_directory`] on the blocking pool and returns immediately.
pub fn spawn_loader(
    store: Arc<TrailStore>,
    dir: PathBuf,
) -> JoinHandle<Result<LoadReport, StoreError>> {
    tokio::task::spawn_blocking(move || {
        tracing::info!(dir = %dir.display(), "Loading GPX files in background");
        load_directory(&store, &dir)
    })
}
