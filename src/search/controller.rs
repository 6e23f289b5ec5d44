//! Session orchestration: one search at a time, cache short-circuit,
//! cancellation ownership and terminal notification.

use crate::error::{DocseekError, Result};
use crate::matcher::SearchQuery;
use crate::progress::ProgressReporter;
use crate::search::{engine, CancelToken, ResultCache, SessionState};
use log::{debug, info};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::JoinHandle;

struct Shared {
    state: Mutex<SessionState>,
    cache: ResultCache,
}

/// Owns the result cache, the session state machine and the cancellation
/// token of the in-flight session. One controller instance serves the
/// whole process; collaborators hold it behind an `Arc`.
pub struct SearchController<R> {
    root: PathBuf,
    reporter: R,
    shared: Arc<Shared>,
    token: Mutex<CancelToken>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl<R> SearchController<R>
where
    R: ProgressReporter + Clone + Send + 'static,
{
    pub fn new(root: impl Into<PathBuf>, reporter: R) -> Self {
        Self {
            root: root.into(),
            reporter,
            shared: Arc::new(Shared {
                state: Mutex::new(SessionState::Idle),
                cache: ResultCache::new(),
            }),
            token: Mutex::new(CancelToken::new()),
            worker: Mutex::new(None),
        }
    }

    /// Starts a session for `term`. A cached term is answered synchronously
    /// through the reporter with no traversal; otherwise a worker thread is
    /// spawned and the call returns without blocking on any I/O.
    pub fn start(&self, term: &str) -> Result<()> {
        if term.is_empty() {
            return Err(DocseekError::EmptyQuery);
        }
        let query = SearchQuery::new(term);

        if let Some(result) = self.shared.cache.get(query.folded()) {
            debug!("Cache hit for '{}'", query.original());
            self.reporter.completed(result, false);
            return Ok(());
        }

        {
            let mut state = self.shared.state.lock();
            if matches!(*state, SessionState::Running | SessionState::Cancelling) {
                return Err(DocseekError::SearchRunning);
            }
            *state = SessionState::Running;
        }
        self.reap_worker();

        // Fresh token per session; the previous session's signal must not
        // leak into this one.
        let token = CancelToken::new();
        *self.token.lock() = token.clone();

        info!("Starting search for '{}' under {}", query.original(), self.root.display());
        let shared = Arc::clone(&self.shared);
        let reporter = self.reporter.clone();
        let root = self.root.clone();
        let handle = std::thread::spawn(move || {
            let result = engine::run(&root, &query, &token, &reporter);
            let was_stopped = token.is_cancelled();
            if was_stopped {
                info!("Search for '{}' stopped", query.original());
            } else {
                shared
                    .cache
                    .insert(query.folded().to_string(), result.clone());
                info!(
                    "Search for '{}' completed with {} results",
                    query.original(),
                    result.total()
                );
            }
            *shared.state.lock() = if was_stopped {
                SessionState::Stopped
            } else {
                SessionState::Completed
            };
            reporter.completed(result, was_stopped);
        });
        *self.worker.lock() = Some(handle);

        Ok(())
    }

    /// Signals the running session to stop at its next check point. A
    /// no-op when nothing is running.
    pub fn stop(&self) {
        let mut state = self.shared.state.lock();
        if *state == SessionState::Running {
            self.token.lock().cancel();
            *state = SessionState::Cancelling;
        }
    }

    pub fn state(&self) -> SessionState {
        *self.shared.state.lock()
    }

    /// Result a completed session stored for `term`, if any.
    pub fn cached_result(&self, term: &str) -> Option<crate::search::SearchResult> {
        self.shared.cache.get(SearchQuery::new(term).folded())
    }

    /// Blocks until the in-flight worker (if any) has delivered its
    /// terminal notification.
    pub fn join(&self) {
        if let Some(handle) = self.worker.lock().take() {
            let _ = handle.join();
        }
    }

    fn reap_worker(&self) {
        // The previous session is terminal at this point; joining just
        // releases its thread handle.
        if let Some(handle) = self.worker.lock().take() {
            let _ = handle.join();
        }
    }
}
