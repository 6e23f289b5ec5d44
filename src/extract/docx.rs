//! Word document content test.
//!
//! A `.docx` file is a zip archive; the paragraph text lives in text runs
//! (`w:t` elements) inside `word/document.xml`.

use crate::matcher::SearchQuery;
use anyhow::{Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use zip::ZipArchive;

pub fn contains_text(path: &Path, query: &SearchQuery) -> Result<bool> {
    let text = paragraph_text(path)?;
    Ok(query.matches(&text))
}

/// All paragraph texts of the document, joined with newline separators.
pub(crate) fn paragraph_text(path: &Path) -> Result<String> {
    let file = File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let mut archive = ZipArchive::new(BufReader::new(file))
        .with_context(|| format!("{} is not a zip archive", path.display()))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .context("missing word/document.xml part")?
        .read_to_string(&mut xml)
        .context("failed to read word/document.xml")?;

    let mut reader = Reader::from_str(&xml);
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_run = false;

    loop {
        match reader.read_event().context("malformed document.xml")? {
            Event::Start(e) if e.local_name().as_ref() == b"t" => in_run = true,
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_run = false,
                b"p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Event::Text(e) => {
                if in_run {
                    current.push_str(&e.unescape().context("bad text run")?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    Ok(paragraphs.join("\n"))
}
