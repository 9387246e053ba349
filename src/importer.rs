//! Entry extraction and import.
//!
//! A streaming pass over each document tracks the enclosing root section
//! and the last page milestone, and captures every `entryFree` element as a
//! raw fragment. Field-level extraction inside a fragment is plain pattern
//! matching, the same as the correction passes.

use std::collections::HashSet;
use std::path::Path;

use lazy_static::lazy_static;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::config::{Partition, partition_for};
use crate::error::LexError;
use crate::headword::pick_headword;
use crate::script::{consonant_skeleton, is_arabic_letter, is_diacritic, strip_diacritics};
use crate::store::Store;

lazy_static! {
    static ref ITYPE_RE: Regex = Regex::new(r"<itype[^>]*>([^<]*)</itype>").unwrap();
    static ref TAG_RE: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref PB_RE: Regex = Regex::new(r#"<pb\b[^>]*\bn="(\d+)""#).unwrap();
}

/// One normalized row for the entry table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRow {
    pub nodeid: String,
    pub word: String,
    /// The headword with diacritics stripped, for bare-word lookup.
    pub bword: String,
    pub root: String,
    pub itype: String,
    pub page: Option<i64>,
    pub supplement: i64,
    pub file: String,
    pub xml: String,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ImportCounts {
    pub imported: usize,
    /// Entries with no usable headword.
    pub skipped_entries: usize,
    /// Rows ignored because the nodeid already exists in the store.
    pub duplicate_rows: usize,
    /// The whole file was in the exclusion set; nothing was read.
    pub file_excluded: bool,
}

fn attr(e: &BytesStart, name: &str, path: &Path) -> Result<Option<String>, LexError> {
    let value = e
        .try_get_attribute(name)
        .map_err(|err| LexError::malformed(path, err.to_string()))?;
    match value {
        Some(a) => {
            let v = a
                .unescape_value()
                .map_err(|err| LexError::malformed(path, err.to_string()))?;
            Ok(Some(v.into_owned()))
        }
        None => Ok(None),
    }
}

fn pb_page(e: &BytesStart, path: &Path) -> Result<Option<i64>, LexError> {
    Ok(attr(e, "n", path)?.and_then(|n| n.parse().ok()))
}

/// The Arabic words of an entry's display text, NFC-normalized, in display
/// order. Tags become whitespace; tokens without an Arabic letter (Latin
/// glosses, markers like `aor.`) are dropped.
fn display_words(inner: &str) -> Vec<String> {
    let text = TAG_RE.replace_all(inner, " ");
    text.split_whitespace()
        .map(|t| t.trim_matches(|c: char| !(is_arabic_letter(c) || is_diacritic(c))))
        .filter(|t| t.chars().any(is_arabic_letter))
        .map(|t| t.nfc().collect::<String>())
        .collect()
}

/// Extract all import rows from one document. Returns the rows plus the
/// count of entries skipped for lack of a headword.
pub fn extract_entries(
    content: &str,
    filename: &str,
    supplement: i64,
    start_page: Option<i64>,
) -> Result<(Vec<EntryRow>, usize), LexError> {
    let path = Path::new(filename);
    let file_abbrev = filename.trim_end_matches(".xml").to_string();
    let mut reader = Reader::from_str(content);

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    let mut current_root = String::new();
    let mut current_page = start_page;
    let mut awaiting_head = false;
    let mut in_root_head = false;
    let mut in_head_foreign = false;

    loop {
        match reader.read_event() {
            Err(e) => return Err(LexError::malformed(path, e.to_string())),
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"div2" => {
                    if attr(&e, "type", path)?.as_deref() == Some("root") {
                        awaiting_head = true;
                        current_root.clear();
                    }
                }
                b"head" if awaiting_head => in_root_head = true,
                b"foreign" if in_root_head => {
                    if attr(&e, "lang", path)?.as_deref() == Some("ar") {
                        in_head_foreign = true;
                    }
                }
                b"pb" => {
                    if let Some(n) = pb_page(&e, path)? {
                        current_page = Some(n);
                    }
                }
                b"entryFree" => {
                    let nodeid = attr(&e, "id", path)?.unwrap_or_default();
                    let key = attr(&e, "key", path)?.unwrap_or_default();
                    let end = e.to_end().into_owned();
                    let span = reader
                        .read_to_end(end.name())
                        .map_err(|err| LexError::malformed(path, err.to_string()))?;
                    let inner = &content[span.start as usize..span.end as usize];

                    match build_row(
                        inner,
                        &nodeid,
                        &key,
                        &current_root,
                        current_page,
                        supplement,
                        &file_abbrev,
                    ) {
                        Some(row) => rows.push(row),
                        None => {
                            skipped += 1;
                            tracing::warn!(node = %nodeid, file = %filename, "entry has no usable headword, skipped");
                        }
                    }

                    // Page milestones inside the captured fragment still
                    // advance the page counter for later entries.
                    if let Some(caps) = PB_RE.captures_iter(inner).last() {
                        if let Ok(n) = caps[1].parse() {
                            current_page = Some(n);
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if e.name().as_ref() == b"pb" {
                    if let Some(n) = pb_page(&e, path)? {
                        current_page = Some(n);
                    }
                }
            }
            Ok(Event::Text(t)) if in_head_foreign => {
                let text = t
                    .unescape()
                    .map_err(|err| LexError::malformed(path, err.to_string()))?;
                current_root.push_str(&consonant_skeleton(&text));
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"foreign" => in_head_foreign = false,
                b"head" => {
                    if in_root_head {
                        awaiting_head = false;
                    }
                    in_root_head = false;
                }
                b"div2" => current_root.clear(),
                _ => {}
            },
            Ok(_) => {}
        }
    }

    Ok((rows, skipped))
}

fn build_row(
    inner: &str,
    nodeid: &str,
    key: &str,
    root: &str,
    page: Option<i64>,
    supplement: i64,
    file_abbrev: &str,
) -> Option<EntryRow> {
    let itype = ITYPE_RE
        .captures(inner)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    let (word, root_value) = if itype == "alphabetical letter" {
        // Letter headers carry their own letter in the key attribute.
        let word: String = key.nfc().collect();
        if word.is_empty() {
            return None;
        }
        let root = consonant_skeleton(&word);
        (word, root)
    } else {
        let words = display_words(inner);
        let radicals: Vec<char> = root.chars().collect();
        let word = pick_headword(&words, &radicals)?;
        (word, root.to_string())
    };

    Some(EntryRow {
        nodeid: nodeid.to_string(),
        bword: strip_diacritics(&word),
        word,
        root: root_value,
        itype,
        page,
        supplement,
        file: file_abbrev.to_string(),
        xml: inner.trim().to_string(),
    })
}

/// Extract and insert every entry of one file. Both file-level policies
/// are enforced here: a filename in the exclusion set contributes zero
/// rows regardless of content, and the suffix convention is checked before
/// the file is read.
pub fn import_file(
    store: &Store,
    path: &Path,
    excluded: &HashSet<String>,
    start_page: Option<i64>,
) -> Result<ImportCounts, LexError> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    if excluded.contains(&filename) {
        tracing::info!(file = %filename, "excluded, contributes no rows");
        return Ok(ImportCounts {
            file_excluded: true,
            ..ImportCounts::default()
        });
    }
    let partition: Partition = partition_for(&filename)?;

    let content = std::fs::read_to_string(path).map_err(|e| LexError::io(path, e))?;
    let (rows, skipped) = extract_entries(&content, &filename, partition.flag(), start_page)?;

    let mut counts = ImportCounts {
        skipped_entries: skipped,
        ..ImportCounts::default()
    };
    for row in &rows {
        // One failed insert must not abort the batch.
        match store.insert_entry(row) {
            Ok(true) => counts.imported += 1,
            Ok(false) => counts.duplicate_rows += 1,
            Err(e) => {
                counts.skipped_entries += 1;
                tracing::error!(node = %row.nodeid, error = %e, "insert failed, continuing");
            }
        }
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{DAMMA, FATHA};

    fn sample_doc() -> String {
        let headword: String = ['ب', FATHA, 'ت', FATHA, 'ر', FATHA].iter().collect();
        let aorist: String = ['ب', FATHA, 'ت', DAMMA, 'ر', FATHA].iter().collect();
        format!(
            r#"<TEI.2><text><body>
<div1 type="alphabetical letter">
<entryFree id="n13590" key="ب"><itype>alphabetical letter</itype></entryFree>
<pb n="150"/>
<div2 type="root" n="btr">
<head><foreign lang="ar">بتر</foreign></head>
<entryFree id="n13600" key="btr" type="main">
<form><orth orig="" lang="ar">{headword}</orth></form> aor.
<form n="infl">
<orth orig="" lang="ar">{aorist}</orth></form>
</entryFree>
<pb n="151"/>
<entryFree id="n13601" type="main">
<form><orth lang="ar">من</orth></form> on particles only
</entryFree>
</div2>
</div1>
</body></text></TEI.2>"#
        )
    }

    #[test]
    fn extracts_rows_with_root_page_and_flags() {
        let doc = sample_doc();
        let (rows, skipped) = extract_entries(&doc, "ub0.xml", 0, Some(149)).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(skipped, 1, "particle-only entry yields no row");

        let letter = &rows[0];
        assert_eq!(letter.nodeid, "n13590");
        assert_eq!(letter.word, "ب");
        assert_eq!(letter.page, Some(149), "before any milestone: start page");

        let entry = &rows[1];
        assert_eq!(entry.nodeid, "n13600");
        assert_eq!(entry.root, "بتر");
        assert_eq!(entry.page, Some(150));
        assert_eq!(entry.supplement, 0);
        assert_eq!(entry.file, "ub0");
        assert_eq!(entry.bword, consonant_skeleton(&entry.word));
        assert!(entry.xml.contains("orth"));
    }

    #[test]
    fn headword_carries_the_root() {
        let doc = sample_doc();
        let (rows, _) = extract_entries(&doc, "ub0.xml", 0, None).unwrap();
        let entry = rows.iter().find(|r| r.nodeid == "n13600").unwrap();
        assert_eq!(consonant_skeleton(&entry.word), "بتر");
    }

    #[test]
    fn malformed_document_is_an_error() {
        let doc = "<TEI.2><text><body><entryFree id=\"n1\"></body>";
        let err = extract_entries(doc, "ub0.xml", 0, None).unwrap_err();
        assert!(matches!(err, LexError::MalformedDocument { .. }));
    }

    #[test]
    fn import_is_idempotent_per_node() {
        let store = Store::in_memory().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ub0.xml");
        std::fs::write(&path, sample_doc()).unwrap();
        let excluded = HashSet::new();

        let first = import_file(&store, &path, &excluded, None).unwrap();
        assert_eq!(first.imported, 2);
        let second = import_file(&store, &path, &excluded, None).unwrap();
        assert_eq!(second.imported, 0);
        assert_eq!(second.duplicate_rows, 2);
        assert_eq!(store.entry_count().unwrap(), 2);
    }

    #[test]
    fn excluded_file_contributes_no_rows() {
        let store = Store::in_memory().unwrap();
        let dir = tempfile::tempdir().unwrap();
        // Well formed and importable, but named in the exclusion set.
        let path = dir.path().join("uwa1.xml");
        std::fs::write(&path, sample_doc()).unwrap();

        let excluded = crate::config::exclusion_set(&[]);
        let counts = import_file(&store, &path, &excluded, None).unwrap();
        assert!(counts.file_excluded);
        assert_eq!(counts.imported, 0);
        assert_eq!(store.entry_count().unwrap(), 0);
    }

    #[test]
    fn bad_suffix_contributes_nothing() {
        let store = Store::in_memory().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ub2.xml");
        std::fs::write(&path, sample_doc()).unwrap();

        let err = import_file(&store, &path, &HashSet::new(), None).unwrap_err();
        assert!(matches!(err, LexError::UnknownFileSuffix(_)));
        assert_eq!(store.entry_count().unwrap(), 0);
    }
}
