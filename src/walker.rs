use crate::search::CancelToken;
use log::debug;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Recursive walk that follows symlinks but never descends into the same
/// real directory twice, so link cycles and diamond-shaped link layouts
/// terminate. Unreadable entries are logged and skipped.
pub fn walk_dir(path: &Path) -> impl Iterator<Item = DirEntry> {
    let mut visited: HashSet<PathBuf> = HashSet::new();
    WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_entry(move |entry| {
            if !entry.file_type().is_dir() {
                return true;
            }
            match entry.path().canonicalize() {
                Ok(real) => visited.insert(real),
                // Keep the entry; the walker surfaces the real error later.
                Err(_) => true,
            }
        })
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("Skipping unreadable entry: {e}");
                None
            }
        })
}

/// Pre-pass file count used as the progress denominator. Observes the
/// cancellation token so a stopped session does not finish counting a
/// large tree first.
pub fn count_files(path: &Path, cancel: &CancelToken) -> usize {
    let mut total = 0;
    for entry in walk_dir(path) {
        if cancel.is_cancelled() {
            break;
        }
        if entry.file_type().is_file() {
            total += 1;
        }
    }
    total
}
