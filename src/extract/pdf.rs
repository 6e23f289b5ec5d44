//! PDF content test backed by lopdf's per-page text extraction.

use crate::matcher::SearchQuery;
use anyhow::{Context, Result};
use log::warn;
use lopdf::Document;
use std::path::Path;

/// Extracts text page by page and short-circuits on the first hit. A page
/// whose extraction fails contributes no match and does not abort the
/// remaining pages.
pub fn contains_text(path: &Path, query: &SearchQuery) -> Result<bool> {
    let doc = Document::load(path)
        .with_context(|| format!("failed to load PDF {}", path.display()))?;

    for &page_number in doc.get_pages().keys() {
        match doc.extract_text(&[page_number]) {
            Ok(text) => {
                if query.matches(&text) {
                    return Ok(true);
                }
            }
            Err(e) => {
                warn!(
                    "Skipping page {page_number} of {}: {e}",
                    path.display()
                );
            }
        }
    }

    Ok(false)
}
