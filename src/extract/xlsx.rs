//! Excel workbook content test.
//!
//! A `.xlsx` file is a zip archive holding one XML part per worksheet plus
//! a shared-string table. Worksheets are streamed part by part; every
//! non-empty cell value is tested in its string representation and the
//! scan short-circuits on the first hit.

use crate::matcher::SearchQuery;
use anyhow::{Context, Result};
use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use zip::ZipArchive;

const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

pub fn contains_text(path: &Path, query: &SearchQuery) -> Result<bool> {
    let file = File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let mut archive = ZipArchive::new(BufReader::new(file))
        .with_context(|| format!("{} is not a zip archive", path.display()))?;

    let shared = match read_part(&mut archive, SHARED_STRINGS_PART) {
        Some(xml) => parse_shared_strings(&xml)?,
        None => Vec::new(),
    };

    let sheet_parts: Vec<String> = archive
        .file_names()
        .filter(|name| name.starts_with("xl/worksheets/") && name.ends_with(".xml"))
        .map(str::to_string)
        .collect();

    for part in sheet_parts {
        let xml = read_part(&mut archive, &part)
            .with_context(|| format!("worksheet part {part} vanished"))?;
        if sheet_contains(&xml, &shared, query)? {
            return Ok(true);
        }
    }

    Ok(false)
}

fn read_part<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Option<String> {
    let mut xml = String::new();
    archive.by_name(name).ok()?.read_to_string(&mut xml).ok()?;
    Some(xml)
}

/// The shared-string table, indexed by the `t="s"` cell references.
fn parse_shared_strings(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut strings = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event().context("malformed sharedStrings.xml")? {
            Event::Start(e) if e.local_name().as_ref() == b"t" => in_text = true,
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"si" => strings.push(std::mem::take(&mut current)),
                _ => {}
            },
            Event::Text(e) => {
                if in_text {
                    current.push_str(&e.unescape().context("bad shared string")?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(strings)
}

fn sheet_contains(xml: &str, shared: &[String], query: &SearchQuery) -> Result<bool> {
    let mut reader = Reader::from_str(xml);
    // t="s" marks a shared-string reference; anything else is tested as-is.
    let mut cell_is_shared = false;
    let mut in_value = false;
    let mut in_inline_text = false;

    loop {
        match reader.read_event().context("malformed worksheet xml")? {
            Event::Start(e) | Event::Empty(e) => match e.local_name().as_ref() {
                b"c" => {
                    cell_is_shared = matches!(
                        e.try_get_attribute("t").context("bad cell attribute")?,
                        Some(attr) if attr.value.as_ref() == b"s"
                    );
                }
                b"v" => in_value = true,
                b"t" => in_inline_text = true,
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"v" => in_value = false,
                b"t" => in_inline_text = false,
                _ => {}
            },
            Event::Text(e) => {
                let raw = e.unescape().context("bad cell value")?;
                if in_value {
                    let hit = if cell_is_shared {
                        match raw.trim().parse::<usize>().ok().and_then(|i| shared.get(i)) {
                            Some(text) => query.matches(text),
                            None => {
                                debug!("Unresolvable shared-string index {raw}");
                                false
                            }
                        }
                    } else {
                        query.matches(&raw)
                    };
                    if hit {
                        return Ok(true);
                    }
                } else if in_inline_text && query.matches(&raw) {
                    return Ok(true);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(false)
}
