//! The traversal engine: one cancellable two-pass run over a tree.

use crate::extract;
use crate::matcher::SearchQuery;
use crate::progress::ProgressReporter;
use crate::search::{CancelToken, ContentMatch, SearchResult};
use crate::walker;
use log::{debug, info};
use std::path::Path;

/// Walks every regular file under `root`, testing the file name and the
/// extracted content independently against `query`. The cancel token is
/// observed before each entry; an in-progress single-file extraction is
/// allowed to finish before the next check.
pub fn run(
    root: &Path,
    query: &SearchQuery,
    cancel: &CancelToken,
    reporter: &dyn ProgressReporter,
) -> SearchResult {
    let total = walker::count_files(root, cancel);
    debug!("Counted {total} files under {}", root.display());

    let mut result = SearchResult::default();
    if cancel.is_cancelled() {
        return result;
    }
    if total == 0 {
        reporter.progress(100.0, 0);
        return result;
    }

    let mut processed = 0usize;
    for entry in walker::walk_dir(root) {
        if cancel.is_cancelled() {
            info!("Traversal cancelled after {processed} files");
            break;
        }
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();

        if let Some(name) = path.file_name().map(|n| n.to_string_lossy()) {
            if query.matches(&name) {
                result.file_matches.push(path.to_path_buf());
            }
        }

        let ext = path.extension().map(|e| e.to_string_lossy());
        if let Some(ext) = ext {
            if extract::contains_text(path, &ext, query) {
                result.content_matches.push(ContentMatch::new(path.to_path_buf()));
            }
        }

        processed += 1;
        let percent = (processed as f64 / total as f64 * 100.0).min(100.0);
        reporter.progress(percent, result.total());
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::SearchEvent;
    use parking_lot::Mutex;
    use std::fs;
    use tempfile::TempDir;

    /// Reporter that records every notification for assertions.
    #[derive(Default)]
    struct RecordingReporter {
        events: Mutex<Vec<SearchEvent>>,
    }

    impl ProgressReporter for RecordingReporter {
        fn progress(&self, percent: f64, results_so_far: usize) {
            self.events.lock().push(SearchEvent::Progress {
                percent,
                results_so_far,
            });
        }

        fn completed(&self, result: SearchResult, was_stopped: bool) {
            self.events.lock().push(SearchEvent::Completed {
                result,
                was_stopped,
            });
        }
    }

    fn progress_values(reporter: &RecordingReporter) -> Vec<(f64, usize)> {
        reporter
            .events
            .lock()
            .iter()
            .filter_map(|e| match e {
                SearchEvent::Progress {
                    percent,
                    results_so_far,
                } => Some((*percent, *results_so_far)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn name_and_content_tests_are_independent() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("report.txt"), "Annual Budget 2024").unwrap();
        fs::write(temp_dir.path().join("budget_plain.dat"), "no text match").unwrap();
        fs::write(temp_dir.path().join("budget_notes.txt"), "see Budget details").unwrap();
        fs::write(temp_dir.path().join("unrelated.txt"), "nothing here").unwrap();

        let reporter = RecordingReporter::default();
        let query = SearchQuery::new("budget");
        let result = run(temp_dir.path(), &query, &CancelToken::new(), &reporter);

        // Name hits: the two files with "budget" in the name, whatever
        // their content; content hits: the two txt files that contain it.
        assert_eq!(result.file_matches.len(), 2);
        assert_eq!(result.content_matches.len(), 2);
        assert!(result
            .content_matches
            .iter()
            .any(|m| m.description == "budget_notes.txt (content match)"));
        assert_eq!(result.total(), 4);
    }

    #[test]
    fn each_path_appears_at_most_once_per_list() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("budget.txt"), "budget budget budget").unwrap();

        let reporter = RecordingReporter::default();
        let query = SearchQuery::new("budget");
        let result = run(temp_dir.path(), &query, &CancelToken::new(), &reporter);

        assert_eq!(result.file_matches.len(), 1);
        assert_eq!(result.content_matches.len(), 1);
    }

    #[test]
    fn progress_is_monotonic_and_reaches_100() {
        let temp_dir = TempDir::new().unwrap();
        for i in 0..5 {
            fs::write(temp_dir.path().join(format!("file{i}.txt")), "budget").unwrap();
        }

        let reporter = RecordingReporter::default();
        let query = SearchQuery::new("budget");
        run(temp_dir.path(), &query, &CancelToken::new(), &reporter);

        let values = progress_values(&reporter);
        assert_eq!(values.len(), 5);
        for pair in values.windows(2) {
            assert!(pair[1].0 >= pair[0].0, "percent regressed: {pair:?}");
            assert!(pair[1].1 >= pair[0].1, "results regressed: {pair:?}");
        }
        assert_eq!(values.last().unwrap().0, 100.0);
    }

    #[test]
    fn empty_tree_reports_100_percent_once() {
        let temp_dir = TempDir::new().unwrap();
        let reporter = RecordingReporter::default();
        let query = SearchQuery::new("budget");
        let result = run(temp_dir.path(), &query, &CancelToken::new(), &reporter);

        assert_eq!(result.total(), 0);
        assert_eq!(progress_values(&reporter), vec![(100.0, 0)]);
    }

    #[test]
    fn pre_cancelled_run_does_no_work() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("budget.txt"), "budget").unwrap();

        let cancel = CancelToken::new();
        cancel.cancel();
        let reporter = RecordingReporter::default();
        let result = run(temp_dir.path(), &SearchQuery::new("budget"), &cancel, &reporter);

        assert_eq!(result.total(), 0);
        assert!(progress_values(&reporter).is_empty());
    }

    #[test]
    fn unreadable_entries_do_not_stall_the_percentage() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("ok.txt"), "budget").unwrap();
        // A broken symlink stat-fails in both passes, so the denominator
        // and the processed count stay consistent.
        #[cfg(unix)]
        std::os::unix::fs::symlink(
            temp_dir.path().join("gone.txt"),
            temp_dir.path().join("dangling.txt"),
        )
        .unwrap();

        let reporter = RecordingReporter::default();
        let query = SearchQuery::new("budget");
        let result = run(temp_dir.path(), &query, &CancelToken::new(), &reporter);

        assert_eq!(result.file_matches.len(), 0);
        assert_eq!(result.content_matches.len(), 1);
        let values = progress_values(&reporter);
        assert_eq!(values.last().unwrap().0, 100.0);
    }
}
