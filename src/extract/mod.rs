//! Format-aware content containment tests.
//!
//! Dispatch is by file extension; unsupported extensions are answered
//! without opening the file. Extraction failures are never propagated to
//! the traversal: they are logged and treated as "no match".

pub mod docx;
pub mod pdf;
pub mod xlsx;

use crate::matcher::SearchQuery;
use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::path::Path;

/// Best-effort test for whether the decoded text of `path` contains the
/// query term. Only `.txt`, `.pdf`, `.docx` and `.xlsx` are inspected.
pub fn contains_text(path: &Path, ext: &str, query: &SearchQuery) -> bool {
    let outcome = match ext.to_ascii_lowercase().as_str() {
        "txt" => plain_text_contains(path, query),
        "pdf" => pdf::contains_text(path, query),
        "docx" => docx::contains_text(path, query),
        "xlsx" => xlsx::contains_text(path, query),
        _ => return false,
    };

    match outcome {
        Ok(hit) => hit,
        Err(e) => {
            warn!("Content extraction failed for {}: {e:#}", path.display());
            false
        }
    }
}

/// Plain text files are decoded permissively; invalid byte sequences are
/// replaced rather than treated as an error.
fn plain_text_contains(path: &Path, query: &SearchQuery) -> Result<bool> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(query.matches(&String::from_utf8_lossy(&bytes)))
}
