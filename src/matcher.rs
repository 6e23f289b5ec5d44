//! Case-insensitive substring matching shared by name and content tests.

/// A search term, folded once at construction so every comparison in a
/// session reuses the same lower-cased form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    original: String,
    folded: String,
}

impl SearchQuery {
    pub fn new(term: &str) -> Self {
        Self {
            original: term.to_string(),
            folded: term.to_lowercase(),
        }
    }

    /// The term exactly as the caller typed it, for display.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The lower-cased form used for comparisons and as the cache key.
    pub fn folded(&self) -> &str {
        &self.folded
    }

    /// Case-insensitive containment test.
    pub fn matches(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.folded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_ignores_case_on_both_sides() {
        let query = SearchQuery::new("BuDgEt");
        assert!(query.matches("annual_BUDGET_2024.txt"));
        assert!(query.matches("see budget details"));
        assert!(!query.matches("annual report"));
    }

    #[test]
    fn original_case_is_preserved_for_display() {
        let query = SearchQuery::new("Budget");
        assert_eq!(query.original(), "Budget");
        assert_eq!(query.folded(), "budget");
    }

    #[test]
    fn empty_haystack_never_matches_nonempty_term() {
        let query = SearchQuery::new("budget");
        assert!(!query.matches(""));
    }

    #[test]
    fn unicode_terms_fold_correctly() {
        let query = SearchQuery::new("RÉSUMÉ");
        assert!(query.matches("my résumé draft"));
    }
}
