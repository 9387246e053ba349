//! SQLite store for imported entries.
//!
//! Inserts are append-only and keyed by nodeid, so re-running an import is
//! idempotent: rows already present are ignored. Each insert commits on its
//! own; one failure never aborts the batch.

use std::path::Path;

use rusqlite::{Connection, params};

use crate::error::LexError;
use crate::importer::EntryRow;
use crate::reference::LetterMapping;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS entry (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    root TEXT,
    word TEXT,
    bword TEXT,
    itype TEXT,
    nodeid TEXT UNIQUE,
    xml TEXT,
    file TEXT,
    page INTEGER,
    supplement INTEGER DEFAULT 0
);
CREATE TABLE IF NOT EXISTS lexicon (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    letter TEXT,
    start_page INTEGER,
    end_page INTEGER,
    filename TEXT,
    file_abbrev TEXT,
    is_supplement INTEGER DEFAULT 0
);
";

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self, LexError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Store { conn })
    }

    #[cfg(test)]
    pub fn in_memory() -> Result<Self, LexError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Store { conn })
    }

    /// Insert one entry row; returns false when a row with the same nodeid
    /// already exists (re-run, duplicate node).
    pub fn insert_entry(&self, row: &EntryRow) -> Result<bool, LexError> {
        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO entry
                 (root, word, bword, itype, nodeid, xml, file, page, supplement)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                row.root,
                row.word,
                row.bword,
                row.itype,
                row.nodeid,
                row.xml,
                row.file,
                row.page,
                row.supplement,
            ],
        )?;
        Ok(changed > 0)
    }

    /// Insert one letter/page-range mapping from the reference file.
    pub fn insert_letter(&self, mapping: &LetterMapping) -> Result<(), LexError> {
        self.conn.execute(
            "INSERT INTO lexicon
                 (letter, start_page, end_page, filename, file_abbrev, is_supplement)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                mapping.letter,
                mapping.start_page,
                mapping.end_page,
                mapping.filename,
                mapping.file_abbrev,
                mapping.is_supplement as i64,
            ],
        )?;
        Ok(())
    }

    pub fn entry_count(&self) -> Result<i64, LexError> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM entry", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row(nodeid: &str) -> EntryRow {
        EntryRow {
            nodeid: nodeid.to_string(),
            word: "بَتَرَ".to_string(),
            bword: "بتر".to_string(),
            root: "بتر".to_string(),
            itype: String::new(),
            page: Some(150),
            supplement: 0,
            file: "ub0".to_string(),
            xml: "<orth>بَتَرَ</orth>".to_string(),
        }
    }

    #[test]
    fn reinsert_of_same_node_is_ignored() {
        let store = Store::in_memory().unwrap();
        assert!(store.insert_entry(&sample_row("n13600")).unwrap());
        assert!(!store.insert_entry(&sample_row("n13600")).unwrap());
        assert_eq!(store.entry_count().unwrap(), 1);
    }

    #[test]
    fn distinct_nodes_accumulate() {
        let store = Store::in_memory().unwrap();
        assert!(store.insert_entry(&sample_row("n1")).unwrap());
        assert!(store.insert_entry(&sample_row("n2")).unwrap());
        assert_eq!(store.entry_count().unwrap(), 2);
    }
}
