//! Letter/page-range reference mappings.
//!
//! The corpus ships a hand-maintained reference file with one line per
//! partition:
//!
//! ```text
//! Arabic Letter: ب | Pages: 150–280 | File: ub0.xml
//! ```
//!
//! It supplies the start page for entries that precede the first page
//! milestone, and populates the `lexicon` table.

use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::LexError;

lazy_static! {
    static ref LETTER_RE: Regex = Regex::new(r"Arabic Letter:\s*(.+)").unwrap();
    // The reference file uses an en dash in page ranges, but accept a
    // plain hyphen too.
    static ref PAGES_RE: Regex = Regex::new(r"Pages:\s*(\d+)[–-](\d+)").unwrap();
    static ref FILE_RE: Regex = Regex::new(r"File:\s*(\S+)").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterMapping {
    pub letter: String,
    pub start_page: Option<i64>,
    pub end_page: Option<i64>,
    pub filename: String,
    pub file_abbrev: String,
    pub is_supplement: bool,
}

/// Parse the reference file. Lines that do not carry all three fields are
/// ignored, matching how loosely the file is maintained.
pub fn parse_reference(content: &str) -> Vec<LetterMapping> {
    let mut mappings = Vec::new();
    for line in content.lines() {
        if !line.contains('|') || !line.contains("Pages:") || !line.contains("File:") {
            continue;
        }
        let letter = match LETTER_RE.captures(line) {
            Some(c) => c[1].split('|').next().unwrap_or("").trim().to_string(),
            None => continue,
        };
        let filename = match FILE_RE.captures(line) {
            Some(c) => c[1].to_string(),
            None => continue,
        };
        let (start_page, end_page) = match PAGES_RE.captures(line) {
            Some(c) => (c[1].parse().ok(), c[2].parse().ok()),
            None => (None, None),
        };
        let file_abbrev = filename.trim_end_matches(".xml").to_string();
        mappings.push(LetterMapping {
            letter,
            start_page,
            end_page,
            filename,
            file_abbrev,
            is_supplement: line.contains("Supplement"),
        });
    }
    mappings
}

pub fn load_reference(path: &Path) -> Result<Vec<LetterMapping>, LexError> {
    let content = fs::read_to_string(path).map_err(|e| LexError::io(path, e))?;
    Ok(parse_reference(&content))
}

/// Start page for a given filename, if the reference knows it.
pub fn start_page_for(mappings: &[LetterMapping], filename: &str) -> Option<i64> {
    mappings
        .iter()
        .find(|m| m.filename == filename)
        .and_then(|m| m.start_page)
}
