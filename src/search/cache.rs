//! Process-lifetime cache of completed search results.

use crate::search::SearchResult;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Maps a folded search term to the result of its completed session.
/// Entries are written once on natural completion, never evicted and
/// never updated; a stopped session writes nothing.
#[derive(Default)]
pub struct ResultCache {
    entries: Mutex<HashMap<String, SearchResult>>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, term: &str) -> Option<SearchResult> {
        self.entries.lock().get(term).cloned()
    }

    pub fn insert(&self, term: String, result: SearchResult) {
        self.entries.lock().entry(term).or_insert(result);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
