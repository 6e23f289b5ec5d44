//! Search core: result model, cancellation token, traversal engine,
//! result cache and the session controller.

pub mod cache;
pub mod controller;
pub mod engine;

pub use cache::ResultCache;
pub use controller::SearchController;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A content hit: the path plus the human-readable description shown in
/// result lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentMatch {
    pub path: PathBuf,
    pub description: String,
}

impl ContentMatch {
    pub fn new(path: PathBuf) -> Self {
        let basename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            description: format!("{basename} (content match)"),
            path,
        }
    }
}

/// Result of one search session: name hits and content hits in discovery
/// order. A path may appear in both lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub file_matches: Vec<PathBuf>,
    pub content_matches: Vec<ContentMatch>,
}

impl SearchResult {
    pub fn total(&self) -> usize {
        self.file_matches.len() + self.content_matches.len()
    }
}

/// Lifecycle of one search session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running,
    Cancelling,
    Completed,
    Stopped,
}

/// Level-triggered cancellation signal, shared between a controller and
/// its worker. Once set it stays set for the session's lifetime, so a
/// check at any later point still observes it.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn content_match_description_uses_basename() {
        let m = ContentMatch::new(Path::new("/a/b/report.txt").to_path_buf());
        assert_eq!(m.description, "report.txt (content match)");
    }

    #[test]
    fn total_counts_both_lists() {
        let mut result = SearchResult::default();
        result.file_matches.push("/a/budget.docx".into());
        result
            .content_matches
            .push(ContentMatch::new("/a/budget.docx".into()));
        result
            .content_matches
            .push(ContentMatch::new("/a/report.txt".into()));
        assert_eq!(result.total(), 3);
    }

    #[test]
    fn cancel_token_is_level_triggered() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        token.cancel();
        assert!(token.is_cancelled());
        // Still set on a later check, and on clones.
        assert!(token.clone().is_cancelled());
    }
}
